//! In-memory resource repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::capacity::domain::{ProjectId, Resource, ResourceId};
use crate::capacity::ports::{
    ResourceFilter, ResourceRepository, ResourceRepositoryError, ResourceRepositoryResult,
};

/// Thread-safe in-memory resource repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResourceRepository {
    state: Arc<RwLock<InMemoryResourceState>>,
}

#[derive(Debug, Default)]
struct InMemoryResourceState {
    resources: HashMap<ResourceId, Resource>,
    // Project-scoped name uniqueness, blind to archive state.
    name_index: HashMap<(ProjectId, String), ResourceId>,
}

impl InMemoryResourceRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> ResourceRepositoryError {
    ResourceRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn name_key(resource: &Resource) -> (ProjectId, String) {
    (resource.project_id(), resource.name().to_owned())
}

fn sorted_by_name(mut resources: Vec<Resource>) -> Vec<Resource> {
    resources.sort_by(|a, b| a.name().cmp(b.name()));
    resources
}

#[async_trait]
impl ResourceRepository for InMemoryResourceRepository {
    async fn insert(&self, resource: &Resource) -> ResourceRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let key = name_key(resource);
        if state.name_index.contains_key(&key) {
            return Err(ResourceRepositoryError::DuplicateName {
                project_id: resource.project_id(),
                name: resource.name().to_owned(),
            });
        }
        state.name_index.insert(key, resource.id());
        state.resources.insert(resource.id(), resource.clone());
        Ok(())
    }

    async fn update(&self, resource: &Resource) -> ResourceRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .resources
            .get(&resource.id())
            .ok_or(ResourceRepositoryError::NotFound(resource.id()))?
            .clone();

        let new_key = name_key(resource);
        if resource.name() != stored.name() {
            // A rename still has to respect the uniqueness constraint.
            if state
                .name_index
                .get(&new_key)
                .is_some_and(|id| *id != resource.id())
            {
                return Err(ResourceRepositoryError::DuplicateName {
                    project_id: resource.project_id(),
                    name: resource.name().to_owned(),
                });
            }
            state.name_index.remove(&name_key(&stored));
            state.name_index.insert(new_key, resource.id());
        }
        state.resources.insert(resource.id(), resource.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ResourceId) -> ResourceRepositoryResult<Option<Resource>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.resources.get(&id).cloned())
    }

    async fn list_by_project(
        &self,
        project_id: ProjectId,
        include_archived: bool,
    ) -> ResourceRepositoryResult<Vec<Resource>> {
        let state = self.state.read().map_err(lock_error)?;
        let resources = state
            .resources
            .values()
            .filter(|resource| resource.project_id() == project_id)
            .filter(|resource| include_archived || !resource.is_archived())
            .cloned()
            .collect();
        Ok(sorted_by_name(resources))
    }

    async fn filter(
        &self,
        project_id: ProjectId,
        filter: &ResourceFilter,
    ) -> ResourceRepositoryResult<Vec<Resource>> {
        let state = self.state.read().map_err(lock_error)?;
        let resources = state
            .resources
            .values()
            .filter(|resource| resource.project_id() == project_id)
            .filter(|resource| filter.matches(resource))
            .cloned()
            .collect();
        Ok(sorted_by_name(resources))
    }

    async fn delete(&self, id: ResourceId) -> ResourceRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .resources
            .remove(&id)
            .ok_or(ResourceRepositoryError::NotFound(id))?;
        state.name_index.remove(&name_key(&removed));
        Ok(())
    }
}
