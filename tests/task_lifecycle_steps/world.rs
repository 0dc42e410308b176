//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskquest::catalog::{adapters::memory::InMemoryTaskCatalog, domain::TaskDefinition};
use taskquest::identity::EmployeeId;
use taskquest::leveling::{
    adapters::memory::InMemoryLevelingRepository, domain::LevelingConfig, services::LevelingService,
};
use taskquest::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskEvent, TaskId},
    services::TaskLifecycleService,
};

/// Task service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Leveling service type used by the BDD world.
pub type TestLevelingService =
    LevelingService<InMemoryLevelingRepository, InMemoryTaskCatalog, DefaultClock>;

/// Scenario world for lifecycle behaviour tests.
pub struct LifecycleWorld {
    pub catalog: Arc<InMemoryTaskCatalog>,
    pub tasks: TestTaskService,
    pub leveling: TestLevelingService,
    pub employee: Option<EmployeeId>,
    pub template: Option<TaskDefinition>,
    pub task_id: Option<TaskId>,
    pub last_event: Option<Option<TaskEvent>>,
}

impl LifecycleWorld {
    /// Creates a world with production XP tables and empty scenario state.
    #[must_use]
    pub fn new() -> Self {
        let catalog = Arc::new(InMemoryTaskCatalog::new());
        let clock = Arc::new(DefaultClock);
        let tasks = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&clock),
        );
        let leveling = LevelingService::new(
            Arc::new(InMemoryLevelingRepository::new()),
            Arc::clone(&catalog),
            clock,
            LevelingConfig::default(),
        );

        Self {
            catalog,
            tasks,
            leveling,
            employee: None,
            template: None,
            task_id: None,
            last_event: None,
        }
    }

    /// Returns the scenario's employee.
    ///
    /// # Errors
    ///
    /// Returns an error if no employee has been registered yet.
    pub fn employee(&self) -> Result<EmployeeId, eyre::Report> {
        self.employee
            .ok_or_else(|| eyre::eyre!("missing registered employee in scenario world"))
    }

    /// Returns the scenario's task.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been assigned yet.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task_id
            .ok_or_else(|| eyre::eyre!("missing assigned task in scenario world"))
    }

    /// Records a handled command's outcome and forwards completions to the
    /// leveling service.
    ///
    /// # Errors
    ///
    /// Returns an error if the XP award fails.
    pub fn record(&mut self, event: Option<TaskEvent>) -> Result<(), eyre::Report> {
        if let Some(completed) = event.as_ref().filter(|event| event.is_completion()) {
            run_async(self.leveling.handle_event(completed))?;
        }
        self.last_event = Some(event);
        Ok(())
    }
}

impl Default for LifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
