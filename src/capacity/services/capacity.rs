//! Capacity orchestration service: resource lifecycle, weekly upserts, and
//! report assembly over the repository ports.

use super::reporting::{self, CapacitySummary, HeatmapRow};
use crate::capacity::domain::{
    CapacityDomainError, DateRange, NewResource, ProjectId, Resource, ResourceId, ResourceUpdate,
    WeeklyAssignment, WeeklyWindow, WeeklyWorkload,
};
use crate::capacity::ports::{
    ProjectDirectory, ProjectDirectoryError, ResourceFilter, ResourceRepository,
    ResourceRepositoryError, WorkloadRepository, WorkloadRepositoryError,
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Result type for capacity service operations.
pub type CapacityResult<T> = Result<T, CapacityError>;

/// Stable classification of a service error for transport mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced project or resource does not exist (404-equivalent).
    NotFound,
    /// A business rule rejected the write (409-equivalent).
    Conflict,
    /// Infrastructure failure below the business rules.
    Internal,
}

/// Service-level errors for capacity operations.
///
/// Every variant is a synchronous business-rule rejection or an
/// infrastructure pass-through; none represents a transient condition, so
/// nothing is retried internally. The same-key upsert race is resolved by
/// storage atomicity, not by retry.
#[derive(Debug, Clone, Error)]
pub enum CapacityError {
    /// The referenced project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The referenced resource does not exist.
    #[error("resource not found: {0}")]
    ResourceNotFound(ResourceId),

    /// A resource with the same name already exists in the project.
    #[error("a resource named '{name}' already exists in project {project_id}")]
    DuplicateResourceName {
        /// Project in which the collision occurred.
        project_id: ProjectId,
        /// The colliding display name.
        name: String,
    },

    /// The role is `Other` but no custom role label was supplied.
    #[error("a custom role name is required when the role is 'other'")]
    MissingCustomRole,

    /// The resource is archived and rejects new weekly assignments.
    #[error("resource {0} is archived and cannot receive weekly assignments")]
    ResourceArchived(ResourceId),

    /// Infrastructure failure.
    #[error("persistence error: {0}")]
    Repository(Arc<dyn std::error::Error + Send + Sync>),
}

impl CapacityError {
    /// Returns the stable error kind for transport mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ProjectNotFound(_) | Self::ResourceNotFound(_) => ErrorKind::NotFound,
            Self::DuplicateResourceName { .. }
            | Self::MissingCustomRole
            | Self::ResourceArchived(_) => ErrorKind::Conflict,
            Self::Repository(_) => ErrorKind::Internal,
        }
    }
}

impl From<CapacityDomainError> for CapacityError {
    fn from(err: CapacityDomainError) -> Self {
        match err {
            CapacityDomainError::MissingCustomRole => Self::MissingCustomRole,
        }
    }
}

impl From<ResourceRepositoryError> for CapacityError {
    fn from(err: ResourceRepositoryError) -> Self {
        match err {
            ResourceRepositoryError::DuplicateName { project_id, name } => {
                Self::DuplicateResourceName { project_id, name }
            }
            ResourceRepositoryError::NotFound(id) => Self::ResourceNotFound(id),
            ResourceRepositoryError::Persistence(source) => Self::Repository(source),
        }
    }
}

impl From<WorkloadRepositoryError> for CapacityError {
    fn from(err: WorkloadRepositoryError) -> Self {
        match err {
            WorkloadRepositoryError::ResourceNotFound(id) => Self::ResourceNotFound(id),
            WorkloadRepositoryError::Persistence(source) => Self::Repository(source),
        }
    }
}

impl From<ProjectDirectoryError> for CapacityError {
    fn from(err: ProjectDirectoryError) -> Self {
        match err {
            ProjectDirectoryError::Lookup(source) => Self::Repository(source),
        }
    }
}

/// Capacity tracking orchestration service.
///
/// All operations are request-scoped and stateless between calls; atomicity
/// for concurrent same-row writes is delegated to the storage layer.
#[derive(Clone)]
pub struct CapacityService<RR, WR, P, C>
where
    RR: ResourceRepository,
    WR: WorkloadRepository,
    P: ProjectDirectory,
    C: Clock + Send + Sync,
{
    resources: Arc<RR>,
    workloads: Arc<WR>,
    projects: Arc<P>,
    clock: Arc<C>,
}

impl<RR, WR, P, C> CapacityService<RR, WR, P, C>
where
    RR: ResourceRepository,
    WR: WorkloadRepository,
    P: ProjectDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new capacity service.
    #[must_use]
    pub const fn new(resources: Arc<RR>, workloads: Arc<WR>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            resources,
            workloads,
            projects,
            clock,
        }
    }

    /// Creates a resource within a project.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::ProjectNotFound`] when the project reference
    /// does not resolve, [`CapacityError::DuplicateResourceName`] when the
    /// name is taken in the project (archived or not), and
    /// [`CapacityError::MissingCustomRole`] for an `Other` role without a
    /// label.
    pub async fn create_resource(
        &self,
        project_id: ProjectId,
        spec: NewResource,
    ) -> CapacityResult<Resource> {
        if !self.projects.exists(project_id).await? {
            return Err(CapacityError::ProjectNotFound(project_id));
        }
        let resource = Resource::new(project_id, spec, &*self.clock)?;
        self.resources.insert(&resource).await?;
        Ok(resource)
    }

    /// Applies a partial update to a resource and returns the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::ResourceNotFound`] when the resource does
    /// not exist and [`CapacityError::MissingCustomRole`] when a role change
    /// to `Other` lacks a custom label.
    pub async fn update_resource(
        &self,
        id: ResourceId,
        update: ResourceUpdate,
    ) -> CapacityResult<Resource> {
        let mut resource = self
            .resources
            .find_by_id(id)
            .await?
            .ok_or(CapacityError::ResourceNotFound(id))?;
        resource.apply_update(update, &*self.clock)?;
        self.resources.update(&resource).await?;
        Ok(resource)
    }

    /// Archives a resource.
    ///
    /// Sugar for an archived-flag update: workload history is retained, but
    /// the resource rejects new weekly assignments from then on.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::ResourceNotFound`] when the resource does
    /// not exist.
    pub async fn archive_resource(&self, id: ResourceId) -> CapacityResult<Resource> {
        self.update_resource(id, ResourceUpdate::new().with_archived(true))
            .await
    }

    /// Removes a resource and all of its weekly history.
    ///
    /// Administrative cleanup only; archival is the normal terminal state.
    /// The weekly rows go with the resource: PostgreSQL cascades through the
    /// foreign key, and the explicit workload delete keeps the in-memory
    /// adapter to the same ownership rule.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::ResourceNotFound`] when the resource does
    /// not exist.
    pub async fn delete_resource(&self, id: ResourceId) -> CapacityResult<()> {
        self.resources.delete(id).await?;
        self.workloads.delete_by_resource(id).await?;
        Ok(())
    }

    /// Retrieves a resource snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::ResourceNotFound`] when the resource does
    /// not exist.
    pub async fn get_resource(&self, id: ResourceId) -> CapacityResult<Resource> {
        self.resources
            .find_by_id(id)
            .await?
            .ok_or(CapacityError::ResourceNotFound(id))
    }

    /// Lists a project's resources ordered by name ascending.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::Repository`] when the lookup fails.
    pub async fn list_resources(
        &self,
        project_id: ProjectId,
        include_archived: bool,
    ) -> CapacityResult<Vec<Resource>> {
        Ok(self
            .resources
            .list_by_project(project_id, include_archived)
            .await?)
    }

    /// Lists a project's resources matching every supplied predicate,
    /// ordered by name ascending.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::Repository`] when the lookup fails.
    pub async fn filter_resources(
        &self,
        project_id: ProjectId,
        filter: &ResourceFilter,
    ) -> CapacityResult<Vec<Resource>> {
        Ok(self.resources.filter(project_id, filter).await?)
    }

    /// Records a resource's capacity for one week, idempotently.
    ///
    /// The week window is resolved from the given start date (trusted as the
    /// intended week start), the assignment is classified, and the row is
    /// written through the storage upsert primitive: a first write inserts,
    /// a later write for the same week revises in place, preserving stored
    /// notes when the assignment carries none.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::ResourceNotFound`] when the resource does
    /// not exist and [`CapacityError::ResourceArchived`] when it has been
    /// archived.
    pub async fn upsert_week(
        &self,
        resource_id: ResourceId,
        week_start: NaiveDate,
        assignment: WeeklyAssignment,
    ) -> CapacityResult<WeeklyWorkload> {
        let resource = self.get_resource(resource_id).await?;
        if resource.is_archived() {
            return Err(CapacityError::ResourceArchived(resource_id));
        }
        let window = WeeklyWindow::from_start(week_start);
        let record = WeeklyWorkload::new(resource_id, window, assignment, &*self.clock);
        Ok(self.workloads.upsert(record).await?)
    }

    /// Returns a resource's full weekly history, week-start ascending.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::Repository`] when the lookup fails.
    pub async fn list_weeks(&self, resource_id: ResourceId) -> CapacityResult<Vec<WeeklyWorkload>> {
        Ok(self.workloads.list_by_resource(resource_id).await?)
    }

    /// Returns all weekly rows of the project's resources whose week start
    /// falls inclusively within the range, week-start ascending.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::Repository`] when the lookup fails.
    pub async fn project_weeks_in_range(
        &self,
        project_id: ProjectId,
        range: DateRange,
    ) -> CapacityResult<Vec<WeeklyWorkload>> {
        let resources = self.resources.list_by_project(project_id, true).await?;
        let ids: Vec<ResourceId> = resources.iter().map(Resource::id).collect();
        Ok(self.workloads.list_in_range(&ids, range).await?)
    }

    /// Assembles the utilization heatmap for a project over a date range.
    ///
    /// Non-archived resources (name-ascending) each appear once, with their
    /// stored weeks in the range; one workload query covers the whole set.
    /// An empty result is valid, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::Repository`] when a lookup fails.
    pub async fn heatmap(
        &self,
        project_id: ProjectId,
        range: DateRange,
    ) -> CapacityResult<Vec<HeatmapRow>> {
        let resources = self.resources.list_by_project(project_id, false).await?;
        let ids: Vec<ResourceId> = resources.iter().map(Resource::id).collect();
        let records = self.workloads.list_in_range(&ids, range).await?;
        Ok(reporting::assemble_heatmap(&resources, records))
    }

    /// Computes the portfolio summary over non-archived resources' current
    /// snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::Repository`] when the lookup fails.
    pub async fn capacity_summary(&self, project_id: ProjectId) -> CapacityResult<CapacitySummary> {
        let resources = self.resources.list_by_project(project_id, false).await?;
        Ok(reporting::summarize(&resources))
    }
}
