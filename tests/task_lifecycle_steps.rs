//! Behaviour tests for the task lifecycle and XP awards.

#[path = "task_lifecycle_steps/mod.rs"]
mod task_lifecycle_steps_defs;

use rstest_bdd_macros::scenario;
use task_lifecycle_steps_defs::world::{LifecycleWorld, world};

#[scenario(
    path = "tests/features/task_lifecycle.feature",
    name = "Self-approved task completes on submission"
)]
#[tokio::test(flavor = "multi_thread")]
async fn self_approved_task_completes(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_lifecycle.feature",
    name = "Approval-gated task levels up the employee once approved"
)]
#[tokio::test(flavor = "multi_thread")]
async fn approval_gated_task_levels_up(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_lifecycle.feature",
    name = "Approving a task that was never submitted is ignored"
)]
#[tokio::test(flavor = "multi_thread")]
async fn premature_approval_is_ignored(world: LifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_lifecycle.feature",
    name = "A completed task can still be canceled"
)]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_can_be_canceled(world: LifecycleWorld) {
    let _ = world;
}
