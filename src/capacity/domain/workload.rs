//! Weekly workload records: the per-resource utilization time series.

use super::{RagStatus, ResourceId, Utilization, WeeklyWindow, WorkloadId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Raw inputs for one week's assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyAssignment {
    availability: f64,
    workload: f64,
    notes: Option<String>,
}

impl WeeklyAssignment {
    /// Creates an assignment from that week's hour figures.
    #[must_use]
    pub const fn new(availability: f64, workload: f64) -> Self {
        Self {
            availability,
            workload,
            notes: None,
        }
    }

    /// Attaches free-text notes for the week.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns the available hours for the week.
    #[must_use]
    pub const fn availability(&self) -> f64 {
        self.availability
    }

    /// Returns the planned workload hours for the week.
    #[must_use]
    pub const fn workload(&self) -> f64 {
        self.workload
    }

    /// Returns the notes, if supplied.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// One week of a resource's capacity history.
///
/// The business key is `(resource, window start)`: at most one record may
/// exist per pair, and a write for an existing pair revises the record in
/// place rather than creating a sibling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyWorkload {
    id: WorkloadId,
    resource_id: ResourceId,
    window: WeeklyWindow,
    availability: f64,
    workload: f64,
    load_percentage: f64,
    rag_status: RagStatus,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted weekly record.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedWorkloadData {
    /// Persisted row identifier.
    pub id: WorkloadId,
    /// Persisted owning resource.
    pub resource_id: ResourceId,
    /// Persisted week window.
    pub window: WeeklyWindow,
    /// Persisted available hours.
    pub availability: f64,
    /// Persisted workload hours.
    pub workload: f64,
    /// Persisted derived load percentage.
    pub load_percentage: f64,
    /// Persisted derived RAG status.
    pub rag_status: RagStatus,
    /// Persisted notes, if any.
    pub notes: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest revision timestamp.
    pub updated_at: DateTime<Utc>,
}

impl WeeklyWorkload {
    /// Creates the first record for a resource's week.
    #[must_use]
    pub fn new(
        resource_id: ResourceId,
        window: WeeklyWindow,
        assignment: WeeklyAssignment,
        clock: &impl Clock,
    ) -> Self {
        let utilization = Utilization::classify(assignment.availability, assignment.workload);
        let timestamp = clock.utc();
        Self {
            id: WorkloadId::new(),
            resource_id,
            window,
            availability: assignment.availability,
            workload: assignment.workload,
            load_percentage: utilization.load_percentage,
            rag_status: utilization.rag_status,
            notes: assignment.notes,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWorkloadData) -> Self {
        Self {
            id: data.id,
            resource_id: data.resource_id,
            window: data.window,
            availability: data.availability,
            workload: data.workload,
            load_percentage: data.load_percentage,
            rag_status: data.rag_status,
            notes: data.notes,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Rewrites this record as a revision of a previously stored row for the
    /// same `(resource, week start)` key.
    ///
    /// The stored identity and creation timestamp are kept, and stored notes
    /// survive when this record carries none: omitting notes on a later
    /// assignment never clears them.
    #[must_use]
    pub fn as_revision_of(mut self, stored: &Self) -> Self {
        self.id = stored.id;
        self.created_at = stored.created_at;
        if self.notes.is_none() {
            self.notes = stored.notes.clone();
        }
        self
    }

    /// Returns the row identifier.
    #[must_use]
    pub const fn id(&self) -> WorkloadId {
        self.id
    }

    /// Returns the owning resource.
    #[must_use]
    pub const fn resource_id(&self) -> ResourceId {
        self.resource_id
    }

    /// Returns the week window.
    #[must_use]
    pub const fn window(&self) -> WeeklyWindow {
        self.window
    }

    /// Returns the available hours for the week.
    #[must_use]
    pub const fn availability(&self) -> f64 {
        self.availability
    }

    /// Returns the planned workload hours for the week.
    #[must_use]
    pub const fn workload(&self) -> f64 {
        self.workload
    }

    /// Returns the derived load percentage.
    #[must_use]
    pub const fn load_percentage(&self) -> f64 {
        self.load_percentage
    }

    /// Returns the derived RAG status.
    #[must_use]
    pub const fn rag_status(&self) -> RagStatus {
        self.rag_status
    }

    /// Returns the notes for the week, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest revision timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
