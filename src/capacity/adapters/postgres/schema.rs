//! Diesel schema for capacity persistence.
//!
//! `capacity_resources.name` carries a project-scoped unique index
//! (`idx_capacity_resources_project_name_unique`); `resource_workloads`
//! carries the composite-key unique index
//! (`idx_resource_workloads_resource_week_unique`) and a foreign key to its
//! resource with `ON DELETE CASCADE`.

diesel::table! {
    /// Resource snapshot records with derived utilization fields.
    capacity_resources (id) {
        /// Resource identifier.
        id -> Uuid,
        /// Owning project identifier.
        project_id -> Uuid,
        /// Display name, unique within the project.
        #[max_length = 255]
        name -> Varchar,
        /// Role enumeration value.
        #[max_length = 50]
        role -> Varchar,
        /// Custom role label, present only when the role is `other`.
        #[max_length = 255]
        custom_role_name -> Nullable<Varchar>,
        /// Skill tags as a JSON array.
        skills -> Jsonb,
        /// Current weekly availability in hours.
        weekly_availability -> Float8,
        /// Current weekly workload in hours.
        weekly_workload -> Float8,
        /// Derived load percentage.
        load_percentage -> Float8,
        /// Derived RAG status.
        #[max_length = 20]
        rag_status -> Varchar,
        /// Free-text notes.
        notes -> Nullable<Text>,
        /// Archived flag.
        is_archived -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-resource, per-week workload history rows.
    resource_workloads (id) {
        /// Row identifier.
        id -> Uuid,
        /// Owning resource identifier.
        resource_id -> Uuid,
        /// First day of the week window; composite key with `resource_id`.
        week_start -> Date,
        /// Last day of the week window, always `week_start + 6`.
        week_end -> Date,
        /// Available hours for the week.
        availability -> Float8,
        /// Planned workload hours for the week.
        workload -> Float8,
        /// Derived load percentage.
        load_percentage -> Float8,
        /// Derived RAG status.
        #[max_length = 20]
        rag_status -> Varchar,
        /// Free-text notes for the week.
        notes -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last revision timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(resource_workloads -> capacity_resources (resource_id));
diesel::allow_tables_to_appear_in_same_query!(capacity_resources, resource_workloads);
