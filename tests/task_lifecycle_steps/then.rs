//! Then steps for task lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use rstest_bdd_macros::then;
use taskquest::task::domain::TaskStatus;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &LifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = run_async(world.tasks.find_task(world.task_id()?))?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then("no event is produced")]
fn no_event_is_produced(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    match &world.last_event {
        Some(None) => Ok(()),
        Some(Some(event)) => Err(eyre::eyre!("expected no event, got {}", event.event_type())),
        None => Err(eyre::eyre!("no command was handled in this scenario")),
    }
}

#[then("the task history has {count:usize} events")]
fn task_history_has(world: &LifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    let events = run_async(world.tasks.task_events(world.task_id()?))?;
    eyre::ensure!(
        events.len() == count,
        "expected {count} events, found {}",
        events.len()
    );
    Ok(())
}

#[then("the employee has {xp:u64} XP at level {level:u32}")]
fn employee_has_xp(world: &LifecycleWorld, xp: u64, level: u32) -> Result<(), eyre::Report> {
    let summary = run_async(world.leveling.experience(world.employee()?))?;
    eyre::ensure!(
        summary.current_xp == xp && summary.level == level,
        "expected {xp} XP at level {level}, found {} XP at level {}",
        summary.current_xp,
        summary.level
    );
    Ok(())
}

#[then("the employee has {xp:u64} XP in the template skill")]
fn employee_has_skill_xp(world: &LifecycleWorld, xp: u64) -> Result<(), eyre::Report> {
    let template = world
        .template
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task template in scenario world"))?;
    let skills = run_async(world.leveling.skills(world.employee()?))?;
    let skill = skills
        .iter()
        .find(|skill| skill.skill_id() == template.skill_id())
        .ok_or_else(|| eyre::eyre!("no skill record for the template skill"))?;
    eyre::ensure!(skill.xp() == xp, "expected {xp} skill XP, found {}", skill.xp());
    Ok(())
}
