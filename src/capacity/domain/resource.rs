//! Resource aggregate root and partial-update rules.

use super::{
    CapacityDomainError, ProjectId, RagStatus, ResourceId, ResourceRole, Utilization,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Weekly availability assumed when none is supplied at creation.
pub const DEFAULT_WEEKLY_AVAILABILITY: f64 = 40.0;

/// Weekly workload assumed when none is supplied at creation.
pub const DEFAULT_WEEKLY_WORKLOAD: f64 = 0.0;

/// Input payload for creating a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResource {
    name: String,
    role: ResourceRole,
    custom_role_name: Option<String>,
    skills: BTreeSet<String>,
    weekly_availability: Option<f64>,
    weekly_workload: Option<f64>,
    notes: Option<String>,
}

impl NewResource {
    /// Creates a payload with required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, role: ResourceRole) -> Self {
        Self {
            name: name.into(),
            role,
            custom_role_name: None,
            skills: BTreeSet::new(),
            weekly_availability: None,
            weekly_workload: None,
            notes: None,
        }
    }

    /// Sets the custom role label used when the role is `Other`.
    #[must_use]
    pub fn with_custom_role_name(mut self, label: impl Into<String>) -> Self {
        self.custom_role_name = Some(label.into());
        self
    }

    /// Sets the skill tags.
    #[must_use]
    pub fn with_skills(mut self, skills: impl IntoIterator<Item = String>) -> Self {
        self.skills = skills.into_iter().collect();
        self
    }

    /// Sets the current weekly availability in hours (defaults to 40.0).
    #[must_use]
    pub const fn with_availability(mut self, hours: f64) -> Self {
        self.weekly_availability = Some(hours);
        self
    }

    /// Sets the current weekly workload in hours (defaults to 0.0).
    #[must_use]
    pub const fn with_workload(mut self, hours: f64) -> Self {
        self.weekly_workload = Some(hours);
        self
    }

    /// Sets free-text notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial update for a resource.
///
/// Absent fields are left untouched. Role and availability/workload changes
/// carry cross-field rules applied by [`Resource::apply_update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceUpdate {
    name: Option<String>,
    role: Option<ResourceRole>,
    custom_role_name: Option<String>,
    skills: Option<BTreeSet<String>>,
    weekly_availability: Option<f64>,
    weekly_workload: Option<f64>,
    notes: Option<String>,
    is_archived: Option<bool>,
}

impl ResourceUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Changes the role.
    #[must_use]
    pub const fn with_role(mut self, role: ResourceRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Supplies a custom role label alongside a role change to `Other`.
    #[must_use]
    pub fn with_custom_role_name(mut self, label: impl Into<String>) -> Self {
        self.custom_role_name = Some(label.into());
        self
    }

    /// Replaces the skill tags.
    #[must_use]
    pub fn with_skills(mut self, skills: impl IntoIterator<Item = String>) -> Self {
        self.skills = Some(skills.into_iter().collect());
        self
    }

    /// Replaces the current weekly availability.
    #[must_use]
    pub const fn with_availability(mut self, hours: f64) -> Self {
        self.weekly_availability = Some(hours);
        self
    }

    /// Replaces the current weekly workload.
    #[must_use]
    pub const fn with_workload(mut self, hours: f64) -> Self {
        self.weekly_workload = Some(hours);
        self
    }

    /// Replaces the free-text notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets or clears the archived flag.
    #[must_use]
    pub const fn with_archived(mut self, archived: bool) -> Self {
        self.is_archived = Some(archived);
        self
    }
}

/// Resource aggregate root: a tracked capacity unit within a project.
///
/// Carries the *current snapshot* of availability and workload together with
/// the derived load percentage and RAG status. The derived pair is replaced
/// in the same mutation as the raw hours, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    id: ResourceId,
    project_id: ProjectId,
    name: String,
    role: ResourceRole,
    custom_role_name: Option<String>,
    skills: BTreeSet<String>,
    weekly_availability: f64,
    weekly_workload: f64,
    load_percentage: f64,
    rag_status: RagStatus,
    notes: Option<String>,
    is_archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted resource aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedResourceData {
    /// Persisted resource identifier.
    pub id: ResourceId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted display name.
    pub name: String,
    /// Persisted role.
    pub role: ResourceRole,
    /// Persisted custom role label, if any.
    pub custom_role_name: Option<String>,
    /// Persisted skill tags.
    pub skills: BTreeSet<String>,
    /// Persisted current weekly availability.
    pub weekly_availability: f64,
    /// Persisted current weekly workload.
    pub weekly_workload: f64,
    /// Persisted derived load percentage.
    pub load_percentage: f64,
    /// Persisted derived RAG status.
    pub rag_status: RagStatus,
    /// Persisted notes, if any.
    pub notes: Option<String>,
    /// Persisted archived flag.
    pub is_archived: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// Creates a new resource within a project.
    ///
    /// Missing availability/workload default to 40.0 and 0.0 hours; the
    /// derived fields are classified from the resolved pair.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityDomainError::MissingCustomRole`] when the role is
    /// [`ResourceRole::Other`] and no non-empty custom label is supplied.
    pub fn new(
        project_id: ProjectId,
        spec: NewResource,
        clock: &impl Clock,
    ) -> Result<Self, CapacityDomainError> {
        let custom_role_name = resolve_custom_role(spec.role, spec.custom_role_name)?;
        let weekly_availability = spec
            .weekly_availability
            .unwrap_or(DEFAULT_WEEKLY_AVAILABILITY);
        let weekly_workload = spec.weekly_workload.unwrap_or(DEFAULT_WEEKLY_WORKLOAD);
        let utilization = Utilization::classify(weekly_availability, weekly_workload);
        let timestamp = clock.utc();

        Ok(Self {
            id: ResourceId::new(),
            project_id,
            name: spec.name,
            role: spec.role,
            custom_role_name,
            skills: spec.skills,
            weekly_availability,
            weekly_workload,
            load_percentage: utilization.load_percentage,
            rag_status: utilization.rag_status,
            notes: spec.notes,
            is_archived: false,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a resource from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedResourceData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            role: data.role,
            custom_role_name: data.custom_role_name,
            skills: data.skills,
            weekly_availability: data.weekly_availability,
            weekly_workload: data.weekly_workload,
            load_percentage: data.load_percentage,
            rag_status: data.rag_status,
            notes: data.notes,
            is_archived: data.is_archived,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Applies a partial update.
    ///
    /// A role moving to `Other` must carry a custom label in the same call
    /// (an existing label survives a no-op role resubmit); a role moving away
    /// from `Other` clears the label regardless of what was supplied. When
    /// either hour figure changes, both are resolved (new value or current
    /// value) and re-classified in the same mutation.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityDomainError::MissingCustomRole`] when the effective
    /// role is `Other` without a usable custom label.
    pub fn apply_update(
        &mut self,
        update: ResourceUpdate,
        clock: &impl Clock,
    ) -> Result<(), CapacityDomainError> {
        let effective_role = update.role.unwrap_or(self.role);
        // A label survives only while the resource stays `Other`; it is
        // cleared the moment the role moves away.
        let supplied_label = update.custom_role_name.or_else(|| {
            (self.role == ResourceRole::Other)
                .then(|| self.custom_role_name.clone())
                .flatten()
        });
        self.custom_role_name = resolve_custom_role(effective_role, supplied_label)?;
        self.role = effective_role;

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(skills) = update.skills {
            self.skills = skills;
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }

        if update.weekly_availability.is_some() || update.weekly_workload.is_some() {
            let availability = update
                .weekly_availability
                .unwrap_or(self.weekly_availability);
            let workload = update.weekly_workload.unwrap_or(self.weekly_workload);
            let utilization = Utilization::classify(availability, workload);
            self.weekly_availability = availability;
            self.weekly_workload = workload;
            self.load_percentage = utilization.load_percentage;
            self.rag_status = utilization.rag_status;
        }

        if let Some(archived) = update.is_archived {
            self.is_archived = archived;
        }

        self.touch(clock);
        Ok(())
    }

    /// Returns the resource identifier.
    #[must_use]
    pub const fn id(&self) -> ResourceId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> ResourceRole {
        self.role
    }

    /// Returns the custom role label when the role is `Other`.
    #[must_use]
    pub fn custom_role_name(&self) -> Option<&str> {
        self.custom_role_name.as_deref()
    }

    /// Returns the skill tags.
    #[must_use]
    pub const fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    /// Returns the current weekly availability in hours.
    #[must_use]
    pub const fn weekly_availability(&self) -> f64 {
        self.weekly_availability
    }

    /// Returns the current weekly workload in hours.
    #[must_use]
    pub const fn weekly_workload(&self) -> f64 {
        self.weekly_workload
    }

    /// Returns the derived load percentage of the current snapshot.
    #[must_use]
    pub const fn load_percentage(&self) -> f64 {
        self.load_percentage
    }

    /// Returns the derived RAG status of the current snapshot.
    #[must_use]
    pub const fn rag_status(&self) -> RagStatus {
        self.rag_status
    }

    /// Returns the free-text notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns whether the resource has been archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.is_archived
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Resolves the custom role label against the role.
///
/// `Other` requires a non-empty label (whitespace trimmed); any other role
/// discards the label entirely.
fn resolve_custom_role(
    role: ResourceRole,
    label: Option<String>,
) -> Result<Option<String>, CapacityDomainError> {
    if role != ResourceRole::Other {
        return Ok(None);
    }
    match label {
        Some(value) if !value.trim().is_empty() => Ok(Some(value)),
        _ => Err(CapacityDomainError::MissingCustomRole),
    }
}
