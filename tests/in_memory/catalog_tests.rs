//! In-memory integration tests for available task listing.

use std::sync::Arc;

use super::helpers::template;
use eyre::ensure;
use rstest::{fixture, rstest};
use taskquest::catalog::{
    adapters::memory::InMemoryTaskCatalog,
    domain::{CompanyId, SkillId, XpRewards},
    services::CatalogService,
};
use taskquest::identity::{EmployeeId, Principal};

/// Catalog listing seen from one company.
struct Listing {
    service: CatalogService<InMemoryTaskCatalog>,
    company: CompanyId,
    employee: Principal,
}

#[fixture]
fn seeded() -> eyre::Result<Listing> {
    let company = CompanyId::new();
    let catalog = InMemoryTaskCatalog::new();
    for (title, active) in [
        ("Write release notes", true),
        ("Audit access logs", true),
        ("Archive old tickets", false),
        ("Calibrate sensors", true),
    ] {
        catalog.insert(template(title, active, company, SkillId::new(), XpRewards::default())?)?;
    }
    catalog.insert(template(
        "Restock the lab",
        true,
        CompanyId::new(),
        SkillId::new(),
        XpRewards::default(),
    )?)?;
    Ok(Listing {
        service: CatalogService::new(Arc::new(catalog)),
        company,
        employee: Principal::employee(EmployeeId::new()),
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_templates_are_paged_by_title(seeded: eyre::Result<Listing>) -> eyre::Result<()> {
    let Listing {
        service,
        company,
        employee,
    } = seeded?;

    let first = service.list_available(employee, company, true, 0, 2).await?;
    let second = service.list_available(employee, company, true, 2, 2).await?;

    let titles: Vec<_> = first
        .items
        .iter()
        .chain(&second.items)
        .map(|definition| definition.title().to_owned())
        .collect();
    ensure!(first.total == 3 && second.total == 3);
    ensure!(titles == ["Audit access logs", "Calibrate sensors", "Write release notes"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inactive_filter_and_limit_clamping(seeded: eyre::Result<Listing>) -> eyre::Result<()> {
    let Listing {
        service,
        company,
        employee,
    } = seeded?;

    let inactive = service.list_available(employee, company, false, 0, 0).await?;
    ensure!(inactive.total == 1);
    ensure!(inactive.items.len() == 1, "a zero limit is raised to one");

    let everything = service.list_available(employee, company, true, 0, 10_000).await?;
    ensure!(everything.items.len() == 3);

    let past_end = service.list_available(employee, company, true, 50, 10).await?;
    ensure!(past_end.items.is_empty() && past_end.total == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn company_scope_depends_on_superuser_rights(
    seeded: eyre::Result<Listing>,
) -> eyre::Result<()> {
    let Listing {
        service,
        company,
        employee,
    } = seeded?;
    let admin = Principal::superuser(EmployeeId::new());

    let own = service.list_available(employee, company, true, 0, 100).await?;
    let all = service.list_available(admin, company, true, 0, 100).await?;

    ensure!(own.items.iter().all(|definition| definition.company_id() == company));
    ensure!(own.total == 3);
    ensure!(all.total == 4);
    ensure!(all.items.iter().any(|definition| definition.title() == "Restock the lab"));
    Ok(())
}
