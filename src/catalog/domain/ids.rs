//! Identifier types for directory-owned reference data.

uuid_id! {
    /// Unique identifier for a task template.
    TaskDefinitionId
}

uuid_id! {
    /// Unique identifier for a skill in the directory's skill catalog.
    SkillId
}

uuid_id! {
    /// Unique identifier for a department.
    DepartmentId
}

uuid_id! {
    /// Unique identifier for a company.
    CompanyId
}
