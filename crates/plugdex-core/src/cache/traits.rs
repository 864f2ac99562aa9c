//! Snapshot store trait and types.

use crate::error::Result;
use crate::model::PluginRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The merged plugin list with its capture timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// When the catalog was fetched.
    pub fetched_at: DateTime<Utc>,
    pub plugins: Vec<PluginRecord>,
}

impl CatalogSnapshot {
    /// Capture a snapshot timestamped now.
    pub fn now(plugins: Vec<PluginRecord>) -> Self {
        Self {
            fetched_at: Utc::now(),
            plugins,
        }
    }

    /// Age of the snapshot. A timestamp in the future counts as zero age.
    pub fn age(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.fetched_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Valid while age < ttl.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}

/// Persisted storage for the merged catalog.
pub trait SnapshotStore: Send + Sync {
    /// Load the stored snapshot.
    ///
    /// A missing, unreadable, or corrupt entry is a miss (`None`), never an
    /// error.
    fn load(&self) -> Option<CatalogSnapshot>;

    /// Persist a snapshot, overwriting any previous one.
    fn save(&self, snapshot: &CatalogSnapshot) -> Result<()>;

    /// Remove the stored snapshot, if any.
    fn clear(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_freshness_window() {
        let snapshot = CatalogSnapshot::now(Vec::new());
        assert!(snapshot.is_fresh(Duration::from_secs(300)));

        let expired = CatalogSnapshot {
            fetched_at: Utc::now() - TimeDelta::seconds(600),
            plugins: Vec::new(),
        };
        assert!(!expired.is_fresh(Duration::from_secs(300)));
        assert!(expired.age() >= Duration::from_secs(599));
    }

    #[test]
    fn test_future_timestamp_has_zero_age() {
        let snapshot = CatalogSnapshot {
            fetched_at: Utc::now() + TimeDelta::seconds(60),
            plugins: Vec::new(),
        };
        assert_eq!(snapshot.age(), Duration::ZERO);
    }
}
