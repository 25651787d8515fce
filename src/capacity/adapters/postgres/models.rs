//! Diesel row models and domain conversions for capacity persistence.

use super::schema::{capacity_resources, resource_workloads};
use crate::capacity::domain::{
    PersistedResourceData, PersistedWorkloadData, ProjectId, RagStatus, Resource, ResourceId,
    ResourceRole, WeeklyWindow, WeeklyWorkload, WorkloadId,
};
use crate::capacity::ports::{
    ResourceRepositoryError, ResourceRepositoryResult, WorkloadRepositoryError,
    WorkloadRepositoryResult,
};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;
use std::collections::BTreeSet;

/// Query result row for resource records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = capacity_resources)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ResourceRow {
    /// Resource identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Role enumeration value.
    pub role: String,
    /// Custom role label, if any.
    pub custom_role_name: Option<String>,
    /// Skill tags JSON payload.
    pub skills: Value,
    /// Current weekly availability in hours.
    pub weekly_availability: f64,
    /// Current weekly workload in hours.
    pub weekly_workload: f64,
    /// Derived load percentage.
    pub load_percentage: f64,
    /// Derived RAG status.
    pub rag_status: String,
    /// Free-text notes, if any.
    pub notes: Option<String>,
    /// Archived flag.
    pub is_archived: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and update model for resource records.
///
/// `AsChangeset` skips the primary key, so the same model serves both the
/// initial insert and subsequent whole-snapshot updates. Updates replace the
/// whole row: `treat_none_as_null` makes an absent `custom_role_name` or
/// `notes` write `NULL` instead of leaving the stored value behind, so a
/// label cleared by a role change is cleared in the database too.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = capacity_resources)]
#[diesel(treat_none_as_null = true)]
pub struct ResourceRecord {
    /// Resource identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Role enumeration value.
    pub role: String,
    /// Custom role label, if any.
    pub custom_role_name: Option<String>,
    /// Skill tags JSON payload.
    pub skills: Value,
    /// Current weekly availability in hours.
    pub weekly_availability: f64,
    /// Current weekly workload in hours.
    pub weekly_workload: f64,
    /// Derived load percentage.
    pub load_percentage: f64,
    /// Derived RAG status.
    pub rag_status: String,
    /// Free-text notes, if any.
    pub notes: Option<String>,
    /// Archived flag.
    pub is_archived: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for weekly workload records.
///
/// `week_end` is not read back: the window is rehydrated from `week_start`
/// alone, the same derivation every insert used to produce the stored value.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = resource_workloads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkloadRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Owning resource identifier.
    pub resource_id: uuid::Uuid,
    /// First day of the week window.
    pub week_start: NaiveDate,
    /// Available hours for the week.
    pub availability: f64,
    /// Planned workload hours for the week.
    pub workload: f64,
    /// Derived load percentage.
    pub load_percentage: f64,
    /// Derived RAG status.
    pub rag_status: String,
    /// Free-text notes, if any.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last revision timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for weekly workload records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = resource_workloads)]
pub struct NewWorkloadRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Owning resource identifier.
    pub resource_id: uuid::Uuid,
    /// First day of the week window.
    pub week_start: NaiveDate,
    /// Last day of the week window.
    pub week_end: NaiveDate,
    /// Available hours for the week.
    pub availability: f64,
    /// Planned workload hours for the week.
    pub workload: f64,
    /// Derived load percentage.
    pub load_percentage: f64,
    /// Derived RAG status.
    pub rag_status: String,
    /// Free-text notes, if any.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last revision timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Maps a resource aggregate to its storage record.
///
/// # Errors
///
/// Returns a persistence error when the skill tags cannot be serialized.
pub fn resource_to_record(resource: &Resource) -> ResourceRepositoryResult<ResourceRecord> {
    let skills =
        serde_json::to_value(resource.skills()).map_err(ResourceRepositoryError::persistence)?;
    Ok(ResourceRecord {
        id: resource.id().into_inner(),
        project_id: resource.project_id().into_inner(),
        name: resource.name().to_owned(),
        role: resource.role().as_str().to_owned(),
        custom_role_name: resource.custom_role_name().map(str::to_owned),
        skills,
        weekly_availability: resource.weekly_availability(),
        weekly_workload: resource.weekly_workload(),
        load_percentage: resource.load_percentage(),
        rag_status: resource.rag_status().as_str().to_owned(),
        notes: resource.notes().map(str::to_owned),
        is_archived: resource.is_archived(),
        created_at: resource.created_at(),
        updated_at: resource.updated_at(),
    })
}

/// Rehydrates a resource aggregate from its storage row.
///
/// # Errors
///
/// Returns a persistence error when stored enum values or the skills payload
/// fail to parse.
pub fn row_to_resource(row: ResourceRow) -> ResourceRepositoryResult<Resource> {
    let role =
        ResourceRole::try_from(row.role.as_str()).map_err(ResourceRepositoryError::persistence)?;
    let rag_status =
        RagStatus::try_from(row.rag_status.as_str()).map_err(ResourceRepositoryError::persistence)?;
    let skills: BTreeSet<String> =
        serde_json::from_value(row.skills).map_err(ResourceRepositoryError::persistence)?;

    Ok(Resource::from_persisted(PersistedResourceData {
        id: ResourceId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        name: row.name,
        role,
        custom_role_name: row.custom_role_name,
        skills,
        weekly_availability: row.weekly_availability,
        weekly_workload: row.weekly_workload,
        load_percentage: row.load_percentage,
        rag_status,
        notes: row.notes,
        is_archived: row.is_archived,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

/// Maps a weekly workload record to its insert row.
#[must_use]
pub fn workload_to_row(record: &WeeklyWorkload) -> NewWorkloadRow {
    NewWorkloadRow {
        id: record.id().into_inner(),
        resource_id: record.resource_id().into_inner(),
        week_start: record.window().start(),
        week_end: record.window().end(),
        availability: record.availability(),
        workload: record.workload(),
        load_percentage: record.load_percentage(),
        rag_status: record.rag_status().as_str().to_owned(),
        notes: record.notes().map(str::to_owned),
        created_at: record.created_at(),
        updated_at: record.updated_at(),
    }
}

/// Rehydrates a weekly workload record from its storage row.
///
/// # Errors
///
/// Returns a persistence error when the stored RAG value fails to parse.
pub fn row_to_workload(row: WorkloadRow) -> WorkloadRepositoryResult<WeeklyWorkload> {
    let rag_status =
        RagStatus::try_from(row.rag_status.as_str()).map_err(WorkloadRepositoryError::persistence)?;

    Ok(WeeklyWorkload::from_persisted(PersistedWorkloadData {
        id: WorkloadId::from_uuid(row.id),
        resource_id: ResourceId::from_uuid(row.resource_id),
        window: WeeklyWindow::from_start(row.week_start),
        availability: row.availability,
        workload: row.workload,
        load_percentage: row.load_percentage,
        rag_status,
        notes: row.notes,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
