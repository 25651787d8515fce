//! Domain model for resource capacity tracking.
//!
//! The capacity domain models resource snapshots, per-week workload records,
//! and the utilization classification rule shared by both, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod rag;
mod resource;
mod role;
mod utilization;
mod week;
mod workload;

pub use error::{CapacityDomainError, ParseRagStatusError, ParseResourceRoleError};
pub use ids::{ProjectId, ResourceId, WorkloadId};
pub use rag::{AMBER_THRESHOLD, RED_THRESHOLD, RagStatus};
pub use resource::{
    DEFAULT_WEEKLY_AVAILABILITY, DEFAULT_WEEKLY_WORKLOAD, NewResource, PersistedResourceData,
    Resource, ResourceUpdate,
};
pub use role::ResourceRole;
pub use utilization::Utilization;
pub use week::{DateRange, WeeklyWindow};
pub use workload::{PersistedWorkloadData, WeeklyAssignment, WeeklyWorkload};
