//! Diesel schema for task templates.

diesel::table! {
    /// Task templates owned by the organizational directory.
    available_tasks (id) {
        /// Template identifier.
        id -> Uuid,
        /// Template title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        #[max_length = 500]
        description -> Nullable<Varchar>,
        /// Whether tasks built from the template need approval.
        requires_approval -> Bool,
        /// XP reserved for the department.
        department_xp -> Int8,
        /// XP granted to the skill record.
        skill_xp -> Int8,
        /// XP reserved for the company.
        company_xp -> Int8,
        /// XP granted to the employee.
        person_xp -> Int8,
        /// Whether the template is offered.
        is_active -> Bool,
        /// Owning department.
        department_id -> Uuid,
        /// Skill exercised by the task.
        skill_id -> Uuid,
        /// Owning company.
        company_id -> Uuid,
    }
}
