use crate::domain::model::{CatalogPayload, Product};
use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://dummyjson.com/products";

/// Product catalog served over HTTP as JSON.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpCatalogSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.api_endpoint()).with_timeout(config.request_timeout())
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        let mut request = self.client.get(&self.endpoint);

        // 設定超時
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = request.send().await?.error_for_status()?;
        tracing::debug!("API response status: {}", response.status());

        let body = response.text().await?;
        let payload: CatalogPayload = serde_json::from_str(&body)?;
        Ok(payload.into_products())
    }
}

/// Fetches the catalog, degrading every failure to an empty list.
pub async fn fetch_catalog<S: CatalogSource + ?Sized>(source: &S) -> Vec<Product> {
    match source.fetch_products().await {
        Ok(products) => {
            tracing::debug!("Fetched {} products", products.len());
            products
        }
        Err(e) => {
            tracing::warn!("⚠️ Catalog fetch failed, continuing with no products: {}", e);
            Vec::new()
        }
    }
}
