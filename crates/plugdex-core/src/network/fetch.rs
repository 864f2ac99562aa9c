//! Catalog fetching and merging.
//!
//! The plugin data and the category map live behind separate endpoints. Both
//! requests are issued concurrently and must succeed before the merge step
//! runs; a failure of either fails the whole fetch and leaves recovery to the
//! loader.

use crate::config::CatalogConfig;
use crate::error::{PlugdexError, Result};
use crate::model::{decode_plugin_payload, merge_categories, CategoryMap, PluginRecord};
use crate::network::client::HttpClient;
use async_trait::async_trait;
use tracing::info;

/// Endpoint pair for the plugin directory API.
#[derive(Debug, Clone)]
pub struct CatalogEndpoints {
    pub plugin_data_url: String,
    pub category_map_url: String,
}

impl Default for CatalogEndpoints {
    fn default() -> Self {
        Self {
            plugin_data_url: CatalogConfig::PLUGIN_DATA_URL.to_string(),
            category_map_url: CatalogConfig::CATEGORY_MAP_URL.to_string(),
        }
    }
}

/// Source of merged plugin records.
///
/// Seam between the loader and the network so loader behavior is testable
/// without a live endpoint.
#[async_trait]
pub trait FetchCatalog: Send + Sync {
    async fn fetch(&self) -> Result<Vec<PluginRecord>>;
}

/// Fetches both endpoints and attaches resolved categories to each record.
pub struct HttpCatalogFetcher {
    http: HttpClient,
    endpoints: CatalogEndpoints,
}

impl HttpCatalogFetcher {
    /// Create a fetcher against the default endpoints.
    pub fn new() -> Result<Self> {
        Self::with_endpoints(CatalogEndpoints::default())
    }

    /// Create a fetcher against custom endpoints.
    pub fn with_endpoints(endpoints: CatalogEndpoints) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new()?,
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &CatalogEndpoints {
        &self.endpoints
    }

    async fn fetch_plugins(&self) -> Result<Vec<PluginRecord>> {
        let response = self.http.get(&self.endpoints.plugin_data_url).await?;
        let raw = response.text().await.map_err(|e| PlugdexError::Network {
            message: format!("Failed to read plugin data: {}", e),
            source: Some(e),
        })?;
        decode_plugin_payload(&raw)
    }

    async fn fetch_category_map(&self) -> Result<CategoryMap> {
        let response = self.http.get(&self.endpoints.category_map_url).await?;
        response.json().await.map_err(|e| PlugdexError::Json {
            message: format!("Failed to parse category map: {}", e),
            source: None,
        })
    }
}

#[async_trait]
impl FetchCatalog for HttpCatalogFetcher {
    async fn fetch(&self) -> Result<Vec<PluginRecord>> {
        let (mut plugins, map) =
            tokio::try_join!(self.fetch_plugins(), self.fetch_category_map())?;

        merge_categories(&mut plugins, &map);
        info!(
            "Fetched {} plugins across {} categories",
            plugins.len(),
            map.len()
        );
        Ok(plugins)
    }
}
