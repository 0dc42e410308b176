//! Given steps for task lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskquest::catalog::domain::{
    CompanyId, DepartmentId, SkillId, TaskDefinition, TaskDefinitionData, TaskDefinitionId,
    XpRewards,
};
use taskquest::identity::EmployeeId;
use taskquest::leveling::domain::XpMultiplier;
use taskquest::task::domain::AssignTask;

#[given("a registered employee")]
fn registered_employee(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let employee = EmployeeId::new();
    run_async(world.leveling.register_employee(employee, XpMultiplier::ONE))
        .wrap_err("register employee for leveling")?;
    world.employee = Some(employee);
    Ok(())
}

#[given("a task template worth {person_xp:u64} person XP and {skill_xp:u64} skill XP")]
fn task_template(
    world: &mut LifecycleWorld,
    person_xp: u64,
    skill_xp: u64,
) -> Result<(), eyre::Report> {
    let definition = TaskDefinition::try_from(TaskDefinitionData {
        id: TaskDefinitionId::new(),
        title: "Triage the support queue".to_owned(),
        description: None,
        requires_approval: false,
        department_id: DepartmentId::new(),
        skill_id: SkillId::new(),
        company_id: CompanyId::new(),
        rewards: XpRewards {
            person: person_xp,
            skill: skill_xp,
            department: 0,
            company: 0,
        },
        is_active: true,
    })?;
    world.catalog.insert(definition.clone())?;
    world.template = Some(definition);
    Ok(())
}

fn assign_template(
    world: &mut LifecycleWorld,
    requires_approval: bool,
) -> Result<(), eyre::Report> {
    let employee = world.employee()?;
    let template = world
        .template
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task template in scenario world"))?;
    let command = AssignTask::new(employee, template.id(), template.title(), requires_approval);
    let task_id = run_async(world.tasks.create_task(command)).wrap_err("assign task")?;
    world.task_id = Some(task_id);
    Ok(())
}

#[given("the template is assigned to the employee without approval")]
fn assigned_without_approval(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    assign_template(world, false)
}

#[given("the template is assigned to the employee with approval")]
fn assigned_with_approval(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    assign_template(world, true)
}
