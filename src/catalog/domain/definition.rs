//! Task template definitions.

use super::{CatalogDomainError, CompanyId, DepartmentId, SkillId, TaskDefinitionId};
use serde::{Deserialize, Serialize};

/// XP granted at each progression scope when a task built from the template
/// is completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpRewards {
    /// XP granted to the employee.
    pub person: u64,
    /// XP granted to the employee's skill record.
    pub skill: u64,
    /// XP reserved for the owning department.
    pub department: u64,
    /// XP reserved for the owning company.
    pub company: u64,
}

/// Parameter object for building a [`TaskDefinition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinitionData {
    /// Template identifier.
    pub id: TaskDefinitionId,
    /// Template title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Whether tasks built from the template need an approver.
    pub requires_approval: bool,
    /// Owning department.
    pub department_id: DepartmentId,
    /// Skill exercised by the task.
    pub skill_id: SkillId,
    /// Owning company.
    pub company_id: CompanyId,
    /// XP rewards on completion.
    pub rewards: XpRewards,
    /// Whether the template is currently offered.
    pub is_active: bool,
}

/// A task template curated by the organizational directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    id: TaskDefinitionId,
    title: String,
    description: Option<String>,
    requires_approval: bool,
    department_id: DepartmentId,
    skill_id: SkillId,
    company_id: CompanyId,
    rewards: XpRewards,
    is_active: bool,
}

impl TryFrom<TaskDefinitionData> for TaskDefinition {
    type Error = CatalogDomainError;

    fn try_from(data: TaskDefinitionData) -> Result<Self, Self::Error> {
        let title = data.title.trim();
        if title.is_empty() {
            return Err(CatalogDomainError::EmptyTitle);
        }

        Ok(Self {
            id: data.id,
            title: title.to_owned(),
            description: data.description,
            requires_approval: data.requires_approval,
            department_id: data.department_id,
            skill_id: data.skill_id,
            company_id: data.company_id,
            rewards: data.rewards,
            is_active: data.is_active,
        })
    }
}

impl TaskDefinition {
    /// Returns the template identifier.
    #[must_use]
    pub const fn id(&self) -> TaskDefinitionId {
        self.id
    }

    /// Returns the template title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the template description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether tasks built from this template need approval.
    #[must_use]
    pub const fn requires_approval(&self) -> bool {
        self.requires_approval
    }

    /// Returns the owning department.
    #[must_use]
    pub const fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    /// Returns the skill exercised by the task.
    #[must_use]
    pub const fn skill_id(&self) -> SkillId {
        self.skill_id
    }

    /// Returns the owning company.
    #[must_use]
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the XP rewards.
    #[must_use]
    pub const fn rewards(&self) -> XpRewards {
        self.rewards
    }

    /// Returns whether the template is currently offered.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }
}
