//! Project directory port: the external collaborator boundary for project
//! lookup.
//!
//! Project records live outside this bounded context; the capacity service
//! only needs an existence check before attaching resources to a project.

use crate::capacity::domain::ProjectId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project directory operations.
pub type ProjectDirectoryResult<T> = Result<T, ProjectDirectoryError>;

/// Read-only lookup of project existence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Returns whether the project reference resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDirectoryError::Lookup`] when the backing store
    /// cannot be consulted.
    async fn exists(&self, project_id: ProjectId) -> ProjectDirectoryResult<bool>;
}

/// Errors returned by project directory implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectDirectoryError {
    /// The backing store could not be consulted.
    #[error("project lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectDirectoryError {
    /// Wraps a lookup failure.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
