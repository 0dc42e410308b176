//! Pagination and filtering for catalog listings.

use super::{CompanyId, TaskDefinition};
use serde::{Deserialize, Serialize};

/// Filter and page window for listing task templates.
///
/// A query is unscoped by default and lists every company's templates;
/// [`CatalogQuery::within_company`] narrows it to one company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    only_active: bool,
    offset: u32,
    limit: u32,
    company_id: Option<CompanyId>,
}

impl CatalogQuery {
    /// Largest page the catalog returns.
    pub const MAX_LIMIT: u32 = 100;

    /// Creates a query, clamping `limit` into `1..=MAX_LIMIT`.
    #[must_use]
    pub fn clamped(only_active: bool, offset: u32, limit: u32) -> Self {
        Self {
            only_active,
            offset,
            limit: limit.clamp(1, Self::MAX_LIMIT),
            company_id: None,
        }
    }

    /// Restricts the query to one company's templates.
    #[must_use]
    pub const fn within_company(self, company_id: CompanyId) -> Self {
        Self {
            company_id: Some(company_id),
            ..self
        }
    }

    /// Returns the company the listing is restricted to, if any.
    #[must_use]
    pub const fn company_id(self) -> Option<CompanyId> {
        self.company_id
    }

    /// Returns whether only active templates are listed; inactive-only
    /// otherwise.
    #[must_use]
    pub const fn only_active(self) -> bool {
        self.only_active
    }

    /// Returns the number of matching templates skipped.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// Returns the maximum page size.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            only_active: true,
            offset: 0,
            limit: Self::MAX_LIMIT,
            company_id: None,
        }
    }
}

/// One page of task templates plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Templates in this page.
    pub items: Vec<TaskDefinition>,
    /// Count of all templates matching the filter, across pages.
    pub total: u64,
}
