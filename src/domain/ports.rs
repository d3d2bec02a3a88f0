use crate::dom::{Document, NodeId};
use crate::domain::model::{AnchorPolicy, Product};
use crate::template::{MarkerConfig, ProductFormat};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn product_format(&self) -> ProductFormat;
    fn markers(&self) -> MarkerConfig;
    fn anchor_policy(&self) -> AnchorPolicy;
    fn output_path(&self) -> Option<&str>;
}

/// Remote product collection.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>>;
}

/// The host library's live item collection.
#[async_trait]
pub trait ListInstance: Send {
    /// Root elements of the items currently held, in list order.
    fn items(&self) -> Vec<NodeId>;

    fn clear_items(&mut self, doc: &mut Document);

    async fn add_items(&mut self, doc: &mut Document, items: Vec<NodeId>) -> Result<()>;
}

/// One filtering instance handed over by the host's ready hook.
pub trait FiltersInstance: Send {
    type List: ListInstance;

    fn list_instance(&mut self) -> &mut Self::List;

    fn form(&self) -> NodeId;

    /// Rebuilds the host's index of available filters from the form.
    fn store_filters_data(&mut self, doc: &Document);
}
