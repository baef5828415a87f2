//! Diesel schema for task and activity log persistence.

diesel::table! {
    /// Task records with assignment, lifecycle, and scheduling state.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional briefing description.
        description -> Nullable<Text>,
        /// Category reference.
        category -> Uuid,
        /// Assigned actor identifiers, in assignment order.
        assigned_to -> Array<Uuid>,
        /// Assigned team identifiers.
        assigned_teams -> Array<Uuid>,
        /// Urgency classification.
        #[max_length = 20]
        priority -> Varchar,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Optional scheduled start.
        start_date -> Nullable<Timestamptz>,
        /// Acknowledgement instant.
        acknowledged_at -> Nullable<Timestamptz>,
        /// Completion instant.
        completed_at -> Nullable<Timestamptz>,
        /// Archival instant.
        archived_at -> Nullable<Timestamptz>,
        /// Actor who archived the task.
        archived_by -> Nullable<Uuid>,
        /// Advisory parent task link.
        parent_task_id -> Nullable<Uuid>,
        /// Prerequisite task identifiers.
        dependencies -> Array<Uuid>,
        /// Presentation board column.
        #[max_length = 100]
        board_column -> Nullable<Varchar>,
        /// Presentation board ordering key.
        sort_order -> Nullable<Int4>,
        /// Attached file references (JSON array).
        attachments -> Jsonb,
        /// Tracked work intervals (JSON array).
        time_logs -> Jsonb,
        /// Effort estimate in minutes.
        estimated_minutes -> Nullable<Int4>,
        /// Deploying actor.
        created_by -> Uuid,
        /// Creation instant.
        created_at -> Timestamptz,
        /// Last-update instant.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only audit trail of accepted task mutations.
    activity_logs (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Acting actor.
        actor -> Uuid,
        /// Mutation kind tag.
        #[max_length = 50]
        action -> Varchar,
        /// Audited entity kind.
        #[max_length = 20]
        entity -> Varchar,
        /// Mutated entity identifier.
        entity_id -> Uuid,
        /// Optional structured metadata.
        metadata -> Nullable<Jsonb>,
        /// Creation instant.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(tasks, activity_logs);
