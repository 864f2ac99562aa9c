//! Plugin catalog data model.
//!
//! Records arrive from two endpoints: plugin data keyed by identifier, and a
//! category map from category name to the repositories belonging to it. The
//! map is inverted at load time and merged onto each record as its resolved
//! `categories`.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Plugin-declared metadata block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_uri: Option<String>,
    /// Categories the plugin declares for itself. Authoritative assignment
    /// comes from the category map, not this field.
    #[serde(default)]
    pub category: Vec<String>,
}

/// A published release. The endpoint serves them newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginRelease {
    pub published_at: String,
}

/// One entry of the plugin catalog, identified by its repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginRecord {
    /// "owner/name", matched case-insensitively against the category map.
    pub repository: String,
    pub manifest: PluginManifest,
    #[serde(default)]
    pub releases: Vec<PluginRelease>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Resolved from the category map at merge time; empty when none matched.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl PluginRecord {
    /// Timestamp of the most recent release.
    ///
    /// Missing or unparsable timestamps yield `None`; such plugins are
    /// excluded from homepage ranking and sorted last under `latest`.
    pub fn latest_release_at(&self) -> Option<DateTime<Utc>> {
        let raw = &self.releases.first()?.published_at;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Case-folded repository identifier used for category matching.
    pub fn repo_key(&self) -> String {
        self.repository.to_lowercase()
    }

    pub fn repo_url(&self) -> String {
        format!("https://github.com/{}", self.repository)
    }
}

/// Category name -> repositories belonging to it, as served by the API.
pub type CategoryMap = BTreeMap<String, Vec<String>>;

/// Invert the category map into lowercased repository -> sorted categories.
pub fn invert_category_map(map: &CategoryMap) -> BTreeMap<String, Vec<String>> {
    let mut inverted: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (category, repos) in map {
        for repo in repos {
            inverted
                .entry(repo.to_lowercase())
                .or_default()
                .push(category.clone());
        }
    }
    for categories in inverted.values_mut() {
        categories.sort();
        categories.dedup();
    }
    inverted
}

/// Attach resolved categories to each plugin.
///
/// A plugin absent from the map gets an empty list, which the views render
/// with the synthetic "Uncategorized" badge.
pub fn merge_categories(plugins: &mut [PluginRecord], map: &CategoryMap) {
    let inverted = invert_category_map(map);
    for plugin in plugins.iter_mut() {
        plugin.categories = inverted
            .get(&plugin.repo_key())
            .cloned()
            .unwrap_or_default();
    }
}

/// Decode the plugin endpoint payload (an object keyed by identifier) into a
/// flat record list.
pub fn decode_plugin_payload(raw: &str) -> Result<Vec<PluginRecord>> {
    let keyed: BTreeMap<String, PluginRecord> = serde_json::from_str(raw)?;
    Ok(keyed.into_values().collect())
}

/// Minimal record for use across the crate's unit tests.
#[cfg(test)]
pub(crate) fn sample_record(repository: &str) -> PluginRecord {
    PluginRecord {
        repository: repository.to_string(),
        manifest: PluginManifest {
            name: repository.rsplit('/').next().unwrap_or(repository).to_string(),
            version: "1.0.0".to_string(),
            description: String::new(),
            author: String::new(),
            author_uri: None,
            category: Vec::new(),
        },
        releases: Vec::new(),
        stargazers_count: 0,
        forks_count: 0,
        last_updated: None,
        categories: Vec::new(),
    }
}
