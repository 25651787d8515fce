//! Repository ports for resource snapshots and weekly workload history.

use crate::capacity::domain::{
    DateRange, ProjectId, Resource, ResourceId, ResourceRole, WeeklyWorkload,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for resource repository operations.
pub type ResourceRepositoryResult<T> = Result<T, ResourceRepositoryError>;

/// Result type for workload repository operations.
pub type WorkloadRepositoryResult<T> = Result<T, WorkloadRepositoryError>;

/// Predicate set for resource filtering; all supplied predicates must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceFilter {
    /// Exact role match.
    pub role: Option<ResourceRole>,
    /// Case-insensitive substring match on the display name.
    pub name_contains: Option<String>,
    /// Inclusive lower bound on the snapshot load percentage.
    pub min_load: Option<f64>,
    /// Inclusive upper bound on the snapshot load percentage.
    pub max_load: Option<f64>,
    /// Archived-flag match; absent means both archived and active.
    pub is_archived: Option<bool>,
}

impl ResourceFilter {
    /// Creates an empty filter matching every resource.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the resource satisfies every supplied predicate.
    #[must_use]
    pub fn matches(&self, resource: &Resource) -> bool {
        if self.role.is_some_and(|role| resource.role() != role) {
            return false;
        }
        if let Some(needle) = &self.name_contains
            && !resource
                .name()
                .to_lowercase()
                .contains(&needle.to_lowercase())
        {
            return false;
        }
        if self
            .min_load
            .is_some_and(|min| resource.load_percentage() < min)
        {
            return false;
        }
        if self
            .max_load
            .is_some_and(|max| resource.load_percentage() > max)
        {
            return false;
        }
        if self
            .is_archived
            .is_some_and(|archived| resource.is_archived() != archived)
        {
            return false;
        }
        true
    }
}

/// Resource snapshot persistence contract.
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Stores a new resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceRepositoryError::DuplicateName`] when a resource
    /// with the same name already exists in the project, regardless of
    /// archive state.
    async fn insert(&self, resource: &Resource) -> ResourceRepositoryResult<()>;

    /// Persists changes to an existing resource as a single-row write.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceRepositoryError::NotFound`] when the resource does
    /// not exist.
    async fn update(&self, resource: &Resource) -> ResourceRepositoryResult<()>;

    /// Finds a resource by identifier.
    ///
    /// Returns `None` when the resource does not exist.
    async fn find_by_id(&self, id: ResourceId) -> ResourceRepositoryResult<Option<Resource>>;

    /// Returns the project's resources ordered by name ascending.
    ///
    /// With `include_archived` unset, archived resources are filtered out.
    async fn list_by_project(
        &self,
        project_id: ProjectId,
        include_archived: bool,
    ) -> ResourceRepositoryResult<Vec<Resource>>;

    /// Returns the project's resources matching every supplied predicate,
    /// ordered by name ascending.
    async fn filter(
        &self,
        project_id: ProjectId,
        filter: &ResourceFilter,
    ) -> ResourceRepositoryResult<Vec<Resource>>;

    /// Removes a resource. Administrative cleanup only; archival is the
    /// normal terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceRepositoryError::NotFound`] when the resource does
    /// not exist.
    async fn delete(&self, id: ResourceId) -> ResourceRepositoryResult<()>;
}

/// Weekly workload persistence contract.
///
/// Rows are keyed by `(resource, week start)`; the upsert is the only write
/// path and must be a single atomic insert-or-update primitive at the
/// storage layer so concurrent writers resolve as last-committed-wins,
/// never a partial mix of two writers' fields.
#[async_trait]
pub trait WorkloadRepository: Send + Sync {
    /// Inserts the record, or revises the existing record for the same
    /// `(resource, week start)` key.
    ///
    /// On revision the stored hours and derived fields are overwritten and
    /// stored notes are replaced only when `record` carries notes. Returns
    /// the stored row.
    async fn upsert(&self, record: WeeklyWorkload) -> WorkloadRepositoryResult<WeeklyWorkload>;

    /// Returns all weekly records for one resource, week-start ascending.
    async fn list_by_resource(
        &self,
        resource_id: ResourceId,
    ) -> WorkloadRepositoryResult<Vec<WeeklyWorkload>>;

    /// Returns the weekly records of the given resources whose week start
    /// falls inclusively within the range, week-start ascending.
    ///
    /// One query for the whole resource set; callers must not loop this per
    /// resource.
    async fn list_in_range(
        &self,
        resource_ids: &[ResourceId],
        range: DateRange,
    ) -> WorkloadRepositoryResult<Vec<WeeklyWorkload>>;

    /// Removes all weekly records owned by the resource.
    ///
    /// Supports the cascade from resource deletion; a workload row never
    /// outlives its resource.
    async fn delete_by_resource(&self, resource_id: ResourceId) -> WorkloadRepositoryResult<()>;
}

/// Errors returned by resource repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ResourceRepositoryError {
    /// A resource with the same name already exists in the project.
    #[error("duplicate resource name '{name}' in project {project_id}")]
    DuplicateName {
        /// Project in which the collision occurred.
        project_id: ProjectId,
        /// The colliding display name.
        name: String,
    },

    /// The resource was not found.
    #[error("resource not found: {0}")]
    NotFound(ResourceId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ResourceRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Errors returned by workload repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkloadRepositoryError {
    /// The owning resource was not found.
    #[error("resource not found: {0}")]
    ResourceNotFound(ResourceId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkloadRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
