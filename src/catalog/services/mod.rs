//! Query services over the task template catalog.

mod listing;

pub use listing::CatalogService;
