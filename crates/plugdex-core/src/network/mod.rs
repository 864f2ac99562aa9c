//! Network access to the plugin directory endpoints.

pub mod client;
pub mod fetch;

pub use client::HttpClient;
pub use fetch::{CatalogEndpoints, FetchCatalog, HttpCatalogFetcher};
