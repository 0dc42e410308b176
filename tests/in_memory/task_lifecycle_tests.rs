//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Backend, backend};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use taskquest::catalog::domain::TaskDefinitionId;
use taskquest::identity::{EmployeeId, Principal};
use taskquest::task::{
    domain::{
        ApproveTask, AssignTask, CancelTask, RejectTask, SubmitTask, TaskCommand, TaskEventType,
        TaskStatus, replay,
    },
    services::TaskLifecycleError,
};

fn assign(assignee: EmployeeId, requires_approval: bool) -> AssignTask {
    AssignTask::new(
        assignee,
        TaskDefinitionId::new(),
        "Update the runbook",
        requires_approval,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn commands_round_trip_through_json(backend: Backend) -> eyre::Result<()> {
    let task_id = backend
        .tasks
        .create_task(assign(EmployeeId::new(), true))
        .await?;
    let wire = serde_json::json!({ "type": "submit", "aggregate_id": task_id });

    let command: TaskCommand = serde_json::from_value(wire)?;
    let event = backend
        .tasks
        .handle_command(command)
        .await?
        .ok_or_eyre("submit applies to an assigned task")?;

    ensure!(event.event_type() == TaskEventType::Submitted);
    let stored = serde_json::to_value(&event)?;
    ensure!(stored["event_type"] == "TaskSubmittedEvent");
    ensure!(stored["version"] == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_task_can_be_canceled_but_not_resubmitted(backend: Backend) -> eyre::Result<()> {
    let approver = Principal::superuser(EmployeeId::new());
    let task_id = backend
        .tasks
        .create_task(assign(EmployeeId::new(), true))
        .await?;
    backend
        .tasks
        .handle_command(SubmitTask { aggregate_id: task_id }.into())
        .await?;
    backend
        .tasks
        .handle_command(RejectTask::by_principal(task_id, approver, "wrong template").into())
        .await?;

    let resubmit = backend
        .tasks
        .handle_command(SubmitTask { aggregate_id: task_id }.into())
        .await?;
    ensure!(resubmit.is_none());

    backend
        .tasks
        .handle_command(
            CancelTask {
                aggregate_id: task_id,
                reason: "superseded".to_owned(),
            }
            .into(),
        )
        .await?;
    let task = backend.tasks.find_task(task_id).await?;
    ensure!(task.status() == TaskStatus::Canceled);
    ensure!(task.approved_by() == Some(approver.user_id()));
    ensure!(task.reason() == Some("superseded"));
    ensure!(task.version() == 4);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_replays_to_the_stored_projection(backend: Backend) -> eyre::Result<()> {
    let task_id = backend
        .tasks
        .create_task(assign(EmployeeId::new(), true).with_description("Cover failover"))
        .await?;
    backend
        .tasks
        .handle_command(SubmitTask { aggregate_id: task_id }.into())
        .await?;
    backend
        .tasks
        .handle_command(
            ApproveTask::by_principal(task_id, Principal::employee(EmployeeId::new())).into(),
        )
        .await?;

    let history = backend.tasks.task_events(task_id).await?;
    let rebuilt = replay(&history)?.ok_or_eyre("history is not empty")?;

    ensure!(rebuilt == backend.tasks.find_task(task_id).await?);
    ensure!(rebuilt.description() == Some("Cover failover"));
    ensure!(
        history
            .windows(2)
            .all(|pair| matches!(pair, [first, next] if first.timestamp <= next.timestamp))
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_listing_is_ordered_by_creation(backend: Backend) -> eyre::Result<()> {
    let assignee = EmployeeId::new();
    let mut created = Vec::new();
    for _ in 0..3 {
        created.push(backend.tasks.create_task(assign(assignee, false)).await?);
    }

    let listed = backend.tasks.tasks_for_assignee(assignee).await?;

    let listed_ids: Vec<_> = listed.iter().map(|task| task.id()).collect();
    ensure!(listed.len() == 3);
    ensure!(
        listed
            .windows(2)
            .all(|pair| matches!(pair, [first, next] if first.created_at() <= next.created_at()))
    );
    ensure!(created.iter().all(|id| listed_ids.contains(id)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_history_is_not_found(backend: Backend) -> eyre::Result<()> {
    let missing = taskquest::task::domain::TaskId::new();
    let result = backend.tasks.task_events(missing).await;
    ensure!(matches!(result, Err(TaskLifecycleError::NotFound(id)) if id == missing));
    Ok(())
}
