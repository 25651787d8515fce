//! Port contracts for resource capacity tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by capacity services.

pub mod projects;
pub mod repository;

pub use projects::{ProjectDirectory, ProjectDirectoryError, ProjectDirectoryResult};
pub use repository::{
    ResourceFilter, ResourceRepository, ResourceRepositoryError, ResourceRepositoryResult,
    WorkloadRepository, WorkloadRepositoryError, WorkloadRepositoryResult,
};
