//! Thread-safe in-memory adapters for tests and development.

mod project;
mod resource;
mod workload;

pub use project::InMemoryProjectDirectory;
pub use resource::InMemoryResourceRepository;
pub use workload::InMemoryWorkloadRepository;
