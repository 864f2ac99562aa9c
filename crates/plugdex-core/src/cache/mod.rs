//! Persisted catalog cache.
//!
//! One snapshot of the merged plugin list plus its capture timestamp, stored
//! as a JSON file with a time-to-live.

pub mod disk;
pub mod traits;

pub use disk::DiskStore;
pub use traits::{CatalogSnapshot, SnapshotStore};
