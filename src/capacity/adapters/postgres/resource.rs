//! `PostgreSQL` repository implementation for resource snapshots.

use super::CapacityPgPool;
use super::models::{ResourceRow, resource_to_record, row_to_resource};
use super::schema::capacity_resources;
use crate::capacity::domain::{ProjectId, Resource, ResourceId};
use crate::capacity::ports::{
    ResourceFilter, ResourceRepository, ResourceRepositoryError, ResourceRepositoryResult,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed resource repository.
#[derive(Debug, Clone)]
pub struct PostgresResourceRepository {
    pool: CapacityPgPool,
}

impl PostgresResourceRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CapacityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ResourceRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ResourceRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ResourceRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ResourceRepositoryError::persistence)?
    }
}

#[async_trait]
impl ResourceRepository for PostgresResourceRepository {
    async fn insert(&self, resource: &Resource) -> ResourceRepositoryResult<()> {
        let record = resource_to_record(resource)?;
        let project_id = resource.project_id();
        let name = resource.name().to_owned();

        self.run_blocking(move |connection| {
            diesel::insert_into(capacity_resources::table)
                .values(&record)
                .execute(connection)
                .map_err(|err| duplicate_name_or_persistence(err, project_id, &name))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, resource: &Resource) -> ResourceRepositoryResult<()> {
        let record = resource_to_record(resource)?;
        let id = resource.id();
        let project_id = resource.project_id();
        let name = resource.name().to_owned();

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                capacity_resources::table.filter(capacity_resources::id.eq(id.into_inner())),
            )
            .set(&record)
            .execute(connection)
            .map_err(|err| duplicate_name_or_persistence(err, project_id, &name))?;
            if updated == 0 {
                return Err(ResourceRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ResourceId) -> ResourceRepositoryResult<Option<Resource>> {
        self.run_blocking(move |connection| {
            let row = capacity_resources::table
                .filter(capacity_resources::id.eq(id.into_inner()))
                .select(ResourceRow::as_select())
                .first::<ResourceRow>(connection)
                .optional()
                .map_err(ResourceRepositoryError::persistence)?;
            row.map(row_to_resource).transpose()
        })
        .await
    }

    async fn list_by_project(
        &self,
        project_id: ProjectId,
        include_archived: bool,
    ) -> ResourceRepositoryResult<Vec<Resource>> {
        self.run_blocking(move |connection| {
            let mut query = capacity_resources::table
                .filter(capacity_resources::project_id.eq(project_id.into_inner()))
                .into_boxed();
            if !include_archived {
                query = query.filter(capacity_resources::is_archived.eq(false));
            }
            let rows = query
                .order(capacity_resources::name.asc())
                .select(ResourceRow::as_select())
                .load::<ResourceRow>(connection)
                .map_err(ResourceRepositoryError::persistence)?;
            rows.into_iter().map(row_to_resource).collect()
        })
        .await
    }

    async fn filter(
        &self,
        project_id: ProjectId,
        filter: &ResourceFilter,
    ) -> ResourceRepositoryResult<Vec<Resource>> {
        let filter = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = capacity_resources::table
                .filter(capacity_resources::project_id.eq(project_id.into_inner()))
                .into_boxed();
            if let Some(role) = filter.role {
                query = query.filter(capacity_resources::role.eq(role.as_str()));
            }
            if let Some(needle) = &filter.name_contains {
                query = query.filter(capacity_resources::name.ilike(format!("%{needle}%")));
            }
            if let Some(min_load) = filter.min_load {
                query = query.filter(capacity_resources::load_percentage.ge(min_load));
            }
            if let Some(max_load) = filter.max_load {
                query = query.filter(capacity_resources::load_percentage.le(max_load));
            }
            if let Some(archived) = filter.is_archived {
                query = query.filter(capacity_resources::is_archived.eq(archived));
            }
            let rows = query
                .order(capacity_resources::name.asc())
                .select(ResourceRow::as_select())
                .load::<ResourceRow>(connection)
                .map_err(ResourceRepositoryError::persistence)?;
            rows.into_iter().map(row_to_resource).collect()
        })
        .await
    }

    async fn delete(&self, id: ResourceId) -> ResourceRepositoryResult<()> {
        self.run_blocking(move |connection| {
            // Weekly rows go with the resource via the ON DELETE CASCADE
            // foreign key.
            let deleted = diesel::delete(
                capacity_resources::table.filter(capacity_resources::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(ResourceRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(ResourceRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn duplicate_name_or_persistence(
    err: DieselError,
    project_id: ProjectId,
    name: &str,
) -> ResourceRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_project_name_unique_violation(info.as_ref()) =>
        {
            ResourceRepositoryError::DuplicateName {
                project_id,
                name: name.to_owned(),
            }
        }
        _ => ResourceRepositoryError::persistence(err),
    }
}

fn is_project_name_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|constraint| constraint == "idx_capacity_resources_project_name_unique")
}
