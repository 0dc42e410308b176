//! End-to-end tests: completing tasks and awarding XP.

use std::sync::Arc;

use super::helpers::{Backend, backend, seed_template};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use taskquest::catalog::domain::SkillId;
use taskquest::identity::{EmployeeId, Principal};
use taskquest::leveling::domain::XpMultiplier;
use taskquest::task::domain::{ApproveTask, AssignTask, SubmitTask, TaskId};
use tokio::task::JoinSet;

async fn assign_from_template(
    backend: &Backend,
    assignee: EmployeeId,
    skill_id: SkillId,
    person_xp: u64,
    skill_xp: u64,
) -> eyre::Result<TaskId> {
    let definition = seed_template(backend, skill_id, person_xp, skill_xp)?;
    let command = AssignTask::new(
        assignee,
        definition.id(),
        definition.title(),
        definition.requires_approval(),
    );
    Ok(backend.tasks.create_task(command).await?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approved_completion_levels_up_the_assignee(backend: Backend) -> eyre::Result<()> {
    let assignee = EmployeeId::new();
    let approver = Principal::superuser(EmployeeId::new());
    let skill_id = SkillId::new();
    backend
        .leveling
        .register_employee(assignee, XpMultiplier::ONE)
        .await?;

    let warm_up = assign_from_template(&backend, assignee, skill_id, 400, 120).await?;
    let main = assign_from_template(&backend, assignee, skill_id, 150, 80).await?;

    for task_id in [warm_up, main] {
        backend
            .tasks
            .handle_command(SubmitTask { aggregate_id: task_id }.into())
            .await?;
        let event = backend
            .tasks
            .handle_command(ApproveTask::by_principal(task_id, approver).into())
            .await?
            .ok_or_eyre("approval completes a waiting task")?;
        ensure!(event.is_completion());
        backend
            .leveling
            .handle_event(&event)
            .await?
            .ok_or_eyre("completion awards xp")?;
    }

    let summary = backend.leveling.experience(assignee).await?;
    ensure!(summary.level == 1, "400 + 150 crosses the 500 threshold");
    ensure!(summary.current_xp == 0);
    ensure!(summary.missing_xp == Some(1_500));

    let skills = backend.leveling.skills(assignee).await?;
    let skill = skills.first().ok_or_eyre("skill record was created")?;
    ensure!(skills.len() == 1);
    ensure!(skill.skill_id() == skill_id);
    ensure!(skill.xp() == 200);
    ensure!(skill.level() == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submission_waiting_for_approval_awards_nothing(backend: Backend) -> eyre::Result<()> {
    let assignee = EmployeeId::new();
    backend
        .leveling
        .register_employee(assignee, XpMultiplier::ONE)
        .await?;
    let task_id = assign_from_template(&backend, assignee, SkillId::new(), 50, 50).await?;

    let event = backend
        .tasks
        .handle_command(SubmitTask { aggregate_id: task_id }.into())
        .await?
        .ok_or_eyre("submit applies")?;

    ensure!(backend.leveling.handle_event(&event).await?.is_none());
    ensure!(backend.leveling.experience(assignee).await?.current_xp == 0);
    ensure!(backend.leveling.skills(assignee).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_completions_for_one_employee_are_not_lost(
    backend: Backend,
) -> eyre::Result<()> {
    let assignee = EmployeeId::new();
    let skill_id = SkillId::new();
    backend
        .leveling
        .register_employee(assignee, XpMultiplier::ONE)
        .await?;
    let definition = seed_template(&backend, skill_id, 10, 3)?;
    let leveling = Arc::new(backend.leveling);

    let mut awards = JoinSet::new();
    for _ in 0..20 {
        let service = Arc::clone(&leveling);
        let definition_id = definition.id();
        awards.spawn(async move { service.task_completed(definition_id, assignee).await });
    }
    while let Some(joined) = awards.join_next().await {
        joined??;
    }

    let summary = leveling.experience(assignee).await?;
    ensure!(summary.current_xp == 200);
    let skills = leveling.skills(assignee).await?;
    ensure!(skills.len() == 1);
    ensure!(skills.iter().map(|skill| skill.xp()).sum::<u64>() == 60);
    Ok(())
}
