//! Diesel schema for progression records.

diesel::table! {
    /// One personal level record per employee.
    employee_levels (id) {
        /// Record identifier.
        id -> Uuid,
        /// Owning employee; unique.
        employee_id -> Uuid,
        /// Current level.
        level -> Int4,
        /// XP earned since the last level-up.
        xp -> Int8,
        /// Personal XP multiplier.
        xp_multiplier -> Float8,
        /// When the current level was reached.
        level_start_date -> Timestamptz,
        /// Optional deadline for the current level.
        level_end_date -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Per-employee, per-skill progression; unique on the pair.
    employee_skills (id) {
        /// Record identifier.
        id -> Uuid,
        /// Owning employee.
        employee_id -> Uuid,
        /// Skill being progressed.
        skill_id -> Uuid,
        /// XP earned since the last level-up.
        xp -> Int8,
        /// Current skill level.
        level -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(employee_levels, employee_skills);
