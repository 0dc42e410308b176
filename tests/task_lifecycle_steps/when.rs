//! When steps for task lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskquest::identity::{EmployeeId, Principal};
use taskquest::task::domain::{ApproveTask, CancelTask, SubmitTask, TaskCommand};

fn handle(world: &mut LifecycleWorld, command: TaskCommand) -> Result<(), eyre::Report> {
    let event = run_async(world.tasks.handle_command(command)).wrap_err("handle task command")?;
    world.record(event)
}

#[when("the employee submits the task")]
fn employee_submits(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let aggregate_id = world.task_id()?;
    handle(world, SubmitTask { aggregate_id }.into())
}

#[when("the approver approves the task")]
fn approver_approves(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let aggregate_id = world.task_id()?;
    let approver = Principal::superuser(EmployeeId::new());
    handle(world, ApproveTask::by_principal(aggregate_id, approver).into())
}

#[when(r#"the task is canceled because "{reason}""#)]
fn task_canceled(world: &mut LifecycleWorld, reason: String) -> Result<(), eyre::Report> {
    let aggregate_id = world.task_id()?;
    handle(world, CancelTask { aggregate_id, reason }.into())
}
