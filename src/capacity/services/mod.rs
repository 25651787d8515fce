//! Orchestration services for resource capacity tracking.

mod capacity;
mod reporting;

pub use capacity::{CapacityError, CapacityResult, CapacityService, ErrorKind};
pub use reporting::{CapacitySummary, HeatmapRow, RagDistribution, WeeklyCell};
