pub mod catalog;
pub mod populator;
pub mod registry;

pub use crate::domain::model::{Anchor, AnchorPolicy, PopulateReport, Product};
pub use crate::domain::ports::{
    CatalogSource, ConfigProvider, FiltersInstance, ListInstance, Storage,
};
pub use crate::utils::error::Result;
