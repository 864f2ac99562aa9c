//! Plugdex core — catalog client and page renderers for the RHCP plugin
//! directory.
//!
//! The directory is a static documentation site: plugin records and a
//! category map live behind two JSON endpoints. This crate fetches them,
//! merges categories onto records, caches the merged list with a TTL (stale
//! snapshots double as an offline fallback), and renders the homepage strip
//! and the filterable directory page as HTML fragments for the hosting pages.
//!
//! # Example
//!
//! ```rust,ignore
//! use plugdex_core::{CatalogLoader, DiskStore, HomepageView, HttpCatalogFetcher};
//!
//! #[tokio::main]
//! async fn main() -> plugdex_core::Result<()> {
//!     let loader = CatalogLoader::new(
//!         Box::new(DiskStore::new(".plugdex-cache")),
//!         Box::new(HttpCatalogFetcher::new()?),
//!     );
//!
//!     // Never fails: a fetch failure falls back to the cached snapshot.
//!     let plugins = loader.load(None, false).await;
//!     let fragment = HomepageView::new().render(&plugins);
//!     println!("{}", fragment);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod network;
pub mod query;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use cache::{CatalogSnapshot, DiskStore, SnapshotStore};
pub use error::{PlugdexError, Result};
pub use loader::{CacheState, CatalogLoader};
pub use model::{
    invert_category_map, merge_categories, CategoryMap, PluginManifest, PluginRecord,
    PluginRelease,
};
pub use network::{CatalogEndpoints, FetchCatalog, HttpCatalogFetcher, HttpClient};
pub use query::{
    category_options, CategoryFilter, CategoryOptions, FilterSpec, SortMode,
    UNCATEGORIZED_VALUE,
};
pub use session::SessionState;
pub use view::{
    apply_card_action, resolve_card_click, CardAction, ClickTarget, DirectoryView,
    HomepageView, RenderOutcome, ScrollMetrics, Slot,
};
