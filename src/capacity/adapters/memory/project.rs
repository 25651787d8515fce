//! In-memory project directory for tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::capacity::domain::ProjectId;
use crate::capacity::ports::{ProjectDirectory, ProjectDirectoryError, ProjectDirectoryResult};

/// Project directory backed by a registered-identifier set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectDirectory {
    projects: Arc<RwLock<HashSet<ProjectId>>>,
}

impl InMemoryProjectDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a project so subsequent existence checks resolve.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDirectoryError::Lookup`] when the lock is poisoned.
    pub fn register(&self, project_id: ProjectId) -> ProjectDirectoryResult<()> {
        let mut projects = self
            .projects
            .write()
            .map_err(|err| ProjectDirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        projects.insert(project_id);
        Ok(())
    }
}

#[async_trait]
impl ProjectDirectory for InMemoryProjectDirectory {
    async fn exists(&self, project_id: ProjectId) -> ProjectDirectoryResult<bool> {
        let projects = self
            .projects
            .read()
            .map_err(|err| ProjectDirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(projects.contains(&project_id))
    }
}
