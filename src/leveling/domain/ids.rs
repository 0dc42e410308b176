//! Identifier types for progression records.

uuid_id! {
    /// Unique identifier for an employee's personal level record.
    EmployeeLevelId
}

uuid_id! {
    /// Unique identifier for an employee's progression in one skill.
    EmployeeSkillId
}
