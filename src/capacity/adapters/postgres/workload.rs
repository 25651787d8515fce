//! `PostgreSQL` repository implementation for weekly workload history.

use super::CapacityPgPool;
use super::models::{WorkloadRow, row_to_workload, workload_to_row};
use super::schema::resource_workloads;
use crate::capacity::domain::{DateRange, ResourceId, WeeklyWorkload};
use crate::capacity::ports::{
    WorkloadRepository, WorkloadRepositoryError, WorkloadRepositoryResult,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// `PostgreSQL`-backed weekly workload repository.
#[derive(Debug, Clone)]
pub struct PostgresWorkloadRepository {
    pool: CapacityPgPool,
}

impl PostgresWorkloadRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CapacityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WorkloadRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WorkloadRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WorkloadRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WorkloadRepositoryError::persistence)?
    }
}

#[async_trait]
impl WorkloadRepository for PostgresWorkloadRepository {
    async fn upsert(&self, record: WeeklyWorkload) -> WorkloadRepositoryResult<WeeklyWorkload> {
        let resource_id = record.resource_id();
        let row = workload_to_row(&record);

        // One INSERT ... ON CONFLICT DO UPDATE statement: concurrent writers
        // to the same (resource, week start) key resolve as
        // last-committed-wins, never a partial mix of two writers' fields.
        // The stored id, created_at, and (when the new row carries none)
        // notes are left untouched by the conflict branch.
        self.run_blocking(move |connection| {
            let insert = diesel::insert_into(resource_workloads::table).values(&row);
            let conflict_target = (
                resource_workloads::resource_id,
                resource_workloads::week_start,
            );
            let stored = if row.notes.is_some() {
                insert
                    .on_conflict(conflict_target)
                    .do_update()
                    .set((
                        resource_workloads::availability.eq(row.availability),
                        resource_workloads::workload.eq(row.workload),
                        resource_workloads::load_percentage.eq(row.load_percentage),
                        resource_workloads::rag_status.eq(row.rag_status.clone()),
                        resource_workloads::notes.eq(row.notes.clone()),
                        resource_workloads::updated_at.eq(row.updated_at),
                    ))
                    .returning(WorkloadRow::as_returning())
                    .get_result::<WorkloadRow>(connection)
            } else {
                insert
                    .on_conflict(conflict_target)
                    .do_update()
                    .set((
                        resource_workloads::availability.eq(row.availability),
                        resource_workloads::workload.eq(row.workload),
                        resource_workloads::load_percentage.eq(row.load_percentage),
                        resource_workloads::rag_status.eq(row.rag_status.clone()),
                        resource_workloads::updated_at.eq(row.updated_at),
                    ))
                    .returning(WorkloadRow::as_returning())
                    .get_result::<WorkloadRow>(connection)
            }
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    WorkloadRepositoryError::ResourceNotFound(resource_id)
                }
                _ => WorkloadRepositoryError::persistence(err),
            })?;
            row_to_workload(stored)
        })
        .await
    }

    async fn list_by_resource(
        &self,
        resource_id: ResourceId,
    ) -> WorkloadRepositoryResult<Vec<WeeklyWorkload>> {
        self.run_blocking(move |connection| {
            let rows = resource_workloads::table
                .filter(resource_workloads::resource_id.eq(resource_id.into_inner()))
                .order(resource_workloads::week_start.asc())
                .select(WorkloadRow::as_select())
                .load::<WorkloadRow>(connection)
                .map_err(WorkloadRepositoryError::persistence)?;
            rows.into_iter().map(row_to_workload).collect()
        })
        .await
    }

    async fn list_in_range(
        &self,
        resource_ids: &[ResourceId],
        range: DateRange,
    ) -> WorkloadRepositoryResult<Vec<WeeklyWorkload>> {
        let ids: Vec<Uuid> = resource_ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = resource_workloads::table
                .filter(resource_workloads::resource_id.eq_any(ids))
                .filter(resource_workloads::week_start.between(range.start, range.end))
                .order((
                    resource_workloads::week_start.asc(),
                    resource_workloads::resource_id.asc(),
                ))
                .select(WorkloadRow::as_select())
                .load::<WorkloadRow>(connection)
                .map_err(WorkloadRepositoryError::persistence)?;
            rows.into_iter().map(row_to_workload).collect()
        })
        .await
    }

    async fn delete_by_resource(&self, resource_id: ResourceId) -> WorkloadRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(
                resource_workloads::table
                    .filter(resource_workloads::resource_id.eq(resource_id.into_inner())),
            )
            .execute(connection)
            .map_err(WorkloadRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}
