//! Domain model for task templates and catalog queries.

mod definition;
mod error;
mod ids;
mod query;

pub use definition::{TaskDefinition, TaskDefinitionData, XpRewards};
pub use error::CatalogDomainError;
pub use ids::{CompanyId, DepartmentId, SkillId, TaskDefinitionId};
pub use query::{CatalogPage, CatalogQuery};
