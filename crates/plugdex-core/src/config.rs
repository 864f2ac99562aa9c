//! Centralized configuration for plugdex.
//!
//! Constants for the directory endpoints, cache behavior, network timeouts,
//! and view dimensions.

use std::time::Duration;

/// Catalog endpoints and cache behavior.
pub struct CatalogConfig;

impl CatalogConfig {
    pub const PLUGIN_DATA_URL: &'static str =
        "https://rhcp.hazardcreative.com/v1/plugin/data.json";
    pub const CATEGORY_MAP_URL: &'static str =
        "https://rhcp.hazardcreative.com/v1/plugin/categories.json";

    /// How long a catalog snapshot stays fresh.
    pub const CACHE_TTL: Duration = Duration::from_secs(300);
    pub const SNAPSHOT_FILENAME: &'static str = "catalog.json";
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
    pub const USER_AGENT: &'static str = concat!("plugdex/", env!("CARGO_PKG_VERSION"));
}

/// View dimensions and timing.
pub struct ViewConfig;

impl ViewConfig {
    /// How many plugins the homepage strip features.
    pub const HOMEPAGE_COUNT: usize = 6;
    /// Items revealed per directory page.
    pub const PAGE_SIZE: usize = 12;
    /// Distance from the document bottom that triggers the next page.
    pub const SCROLL_THRESHOLD_PX: f64 = 200.0;
    /// Window for coalescing rapid search input into one render.
    pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(200);
}
