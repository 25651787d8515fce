//! Read-side aggregation: heatmap assembly and portfolio summary.
//!
//! These folds never mutate stored state and never recompute stored derived
//! fields; they rearrange what the write paths already classified. Reads are
//! not transactionally isolated from concurrent writes, so a heatmap may
//! observe a partially-updated set of weekly rows; that is accepted
//! behaviour, not a defect.

use crate::capacity::domain::{
    RagStatus, Resource, ResourceId, ResourceRole, WeeklyWorkload,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One cell of the heatmap: a single stored week for a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyCell {
    /// First day of the week window.
    pub week_start: NaiveDate,
    /// Last day of the week window.
    pub week_end: NaiveDate,
    /// Available hours for the week.
    pub availability: f64,
    /// Planned workload hours for the week.
    pub workload: f64,
    /// Derived load percentage, as stored at write time.
    pub load_percentage: f64,
    /// Derived RAG status, as stored at write time.
    pub rag_status: RagStatus,
    /// Free-text notes for the week, if any.
    pub notes: Option<String>,
}

impl WeeklyCell {
    fn from_record(record: WeeklyWorkload) -> Self {
        Self {
            week_start: record.window().start(),
            week_end: record.window().end(),
            availability: record.availability(),
            workload: record.workload(),
            load_percentage: record.load_percentage(),
            rag_status: record.rag_status(),
            notes: record.notes().map(str::to_owned),
        }
    }
}

/// One resource's row in the utilization heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRow {
    /// Resource identifier.
    pub resource_id: ResourceId,
    /// Resource display name.
    pub resource_name: String,
    /// Resource role.
    pub role: ResourceRole,
    /// Custom role label when the role is `other`.
    pub custom_role_name: Option<String>,
    /// The resource's stored weeks within the requested range, week-start
    /// ascending. Empty when no week in the range has data; missing weeks
    /// are not gap-filled.
    pub weekly_data: Vec<WeeklyCell>,
}

/// Count of resources per RAG status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagDistribution {
    /// Resources classified green.
    pub green: usize,
    /// Resources classified amber.
    pub amber: usize,
    /// Resources classified red.
    pub red: usize,
}

/// Portfolio-level utilization summary over current snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacitySummary {
    /// Number of non-archived resources considered.
    pub total_resources: usize,
    /// Resources with stored load below the amber threshold.
    pub underutilized: usize,
    /// Resources with stored load in the ideal band (inclusive).
    pub ideal: usize,
    /// Resources with stored load above 100%.
    pub overloaded: usize,
    /// RAG counts over the same resource set.
    pub rag_distribution: RagDistribution,
}

/// Folds project resources and their in-range weekly rows into heatmap rows.
///
/// Resources keep their given (name-ascending) order and appear even with no
/// matching weekly rows; rows are partitioned by resource in one pass, so
/// the caller needs exactly one workload query for the whole set.
#[must_use]
pub fn assemble_heatmap(
    resources: &[Resource],
    records: Vec<WeeklyWorkload>,
) -> Vec<HeatmapRow> {
    let mut by_resource: HashMap<ResourceId, Vec<WeeklyCell>> = HashMap::new();
    for record in records {
        by_resource
            .entry(record.resource_id())
            .or_default()
            .push(WeeklyCell::from_record(record));
    }

    resources
        .iter()
        .map(|resource| HeatmapRow {
            resource_id: resource.id(),
            resource_name: resource.name().to_owned(),
            role: resource.role(),
            custom_role_name: resource.custom_role_name().map(str::to_owned),
            weekly_data: by_resource.remove(&resource.id()).unwrap_or_default(),
        })
        .collect()
}

/// Folds resource snapshots into the portfolio summary.
///
/// Load buckets reapply the shared threshold rule to the *stored* load
/// percentage while the RAG distribution counts the *stored* status; the two
/// agree because every write path derived both from the same classifier.
#[must_use]
pub fn summarize(resources: &[Resource]) -> CapacitySummary {
    let mut summary = CapacitySummary {
        total_resources: resources.len(),
        ..CapacitySummary::default()
    };

    for resource in resources {
        match RagStatus::from_load(resource.load_percentage()) {
            RagStatus::Green => summary.underutilized += 1,
            RagStatus::Amber => summary.ideal += 1,
            RagStatus::Red => summary.overloaded += 1,
        }
        match resource.rag_status() {
            RagStatus::Green => summary.rag_distribution.green += 1,
            RagStatus::Amber => summary.rag_distribution.amber += 1,
            RagStatus::Red => summary.rag_distribution.red += 1,
        }
    }

    summary
}
