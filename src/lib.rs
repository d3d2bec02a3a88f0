pub mod adapters;
pub mod config;
pub mod core;
pub mod dom;
pub mod domain;
pub mod template;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{
    memory::{MemoryFilters, MemoryList},
    page::PageBuilder,
    storage::LocalStorage,
};
pub use core::{
    catalog::{fetch_catalog, HttpCatalogSource},
    populator::{derive_categories, CatalogPopulator},
    registry::{HookRegistry, InitHook, CMS_FILTER},
};
pub use utils::error::{PopulateError, Result};
