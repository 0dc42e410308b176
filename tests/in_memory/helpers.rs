//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskquest::catalog::{
    adapters::memory::InMemoryTaskCatalog,
    domain::{
        CompanyId, DepartmentId, SkillId, TaskDefinition, TaskDefinitionData, TaskDefinitionId,
        XpRewards,
    },
};
use taskquest::leveling::{
    adapters::memory::InMemoryLevelingRepository, domain::LevelingConfig, services::LevelingService,
};
use taskquest::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};

/// Task service wired to in-memory storage.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Leveling service wired to in-memory storage.
pub type TestLevelingService =
    LevelingService<InMemoryLevelingRepository, InMemoryTaskCatalog, DefaultClock>;

/// Both services over shared in-memory adapters.
pub struct Backend {
    pub catalog: Arc<InMemoryTaskCatalog>,
    pub tasks: TestTaskService,
    pub leveling: TestLevelingService,
}

/// Provides a fresh backend with production XP tables.
#[fixture]
pub fn backend() -> Backend {
    let catalog = Arc::new(InMemoryTaskCatalog::new());
    let clock = Arc::new(DefaultClock);
    Backend {
        tasks: TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&clock),
        ),
        leveling: LevelingService::new(
            Arc::new(InMemoryLevelingRepository::new()),
            Arc::clone(&catalog),
            clock,
            LevelingConfig::default(),
        ),
        catalog,
    }
}

/// Builds a template owned by `company_id`.
///
/// # Errors
///
/// Returns an error if the title is blank.
pub fn template(
    title: &str,
    is_active: bool,
    company_id: CompanyId,
    skill_id: SkillId,
    rewards: XpRewards,
) -> eyre::Result<TaskDefinition> {
    Ok(TaskDefinition::try_from(TaskDefinitionData {
        id: TaskDefinitionId::new(),
        title: title.to_owned(),
        description: Some(format!("{title} for the quarter")),
        requires_approval: true,
        department_id: DepartmentId::new(),
        skill_id,
        company_id,
        rewards,
        is_active,
    })?)
}

/// Seeds an active template into the backend's catalog.
///
/// # Errors
///
/// Returns an error if the template is invalid or the catalog rejects it.
pub fn seed_template(
    backend: &Backend,
    skill_id: SkillId,
    person_xp: u64,
    skill_xp: u64,
) -> eyre::Result<TaskDefinition> {
    let definition = template(
        "Run a security drill",
        true,
        CompanyId::new(),
        skill_id,
        XpRewards {
            person: person_xp,
            skill: skill_xp,
            department: 50,
            company: 10,
        },
    )?;
    backend.catalog.insert(definition.clone())?;
    Ok(definition)
}
