//! In-memory weekly workload repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::capacity::domain::{DateRange, ResourceId, WeeklyWorkload};
use crate::capacity::ports::{
    WorkloadRepository, WorkloadRepositoryError, WorkloadRepositoryResult,
};

/// Thread-safe in-memory weekly workload repository.
///
/// Rows are keyed by `(resource, week start)`; the upsert runs under one
/// write-lock acquisition, giving the same last-committed-wins guarantee the
/// PostgreSQL adapter gets from its single `ON CONFLICT` statement.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkloadRepository {
    state: Arc<RwLock<HashMap<(ResourceId, NaiveDate), WeeklyWorkload>>>,
}

impl InMemoryWorkloadRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> WorkloadRepositoryError {
    WorkloadRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn sorted_by_week(mut records: Vec<WeeklyWorkload>) -> Vec<WeeklyWorkload> {
    records.sort_by_key(|record| (record.window().start(), record.resource_id()));
    records
}

#[async_trait]
impl WorkloadRepository for InMemoryWorkloadRepository {
    async fn upsert(&self, record: WeeklyWorkload) -> WorkloadRepositoryResult<WeeklyWorkload> {
        let mut state = self.state.write().map_err(lock_error)?;
        let key = (record.resource_id(), record.window().start());
        let stored = match state.get(&key) {
            Some(existing) => record.as_revision_of(existing),
            None => record,
        };
        state.insert(key, stored.clone());
        Ok(stored)
    }

    async fn list_by_resource(
        &self,
        resource_id: ResourceId,
    ) -> WorkloadRepositoryResult<Vec<WeeklyWorkload>> {
        let state = self.state.read().map_err(lock_error)?;
        let records = state
            .values()
            .filter(|record| record.resource_id() == resource_id)
            .cloned()
            .collect();
        Ok(sorted_by_week(records))
    }

    async fn list_in_range(
        &self,
        resource_ids: &[ResourceId],
        range: DateRange,
    ) -> WorkloadRepositoryResult<Vec<WeeklyWorkload>> {
        let state = self.state.read().map_err(lock_error)?;
        let wanted: HashSet<ResourceId> = resource_ids.iter().copied().collect();
        let records = state
            .values()
            .filter(|record| wanted.contains(&record.resource_id()))
            .filter(|record| range.contains(record.window().start()))
            .cloned()
            .collect();
        Ok(sorted_by_week(records))
    }

    async fn delete_by_resource(&self, resource_id: ResourceId) -> WorkloadRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.retain(|_, record| record.resource_id() != resource_id);
        Ok(())
    }
}
