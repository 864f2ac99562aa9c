//! Filtering, sorting, and pagination over the merged plugin list.

use crate::model::PluginRecord;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Dropdown sentinel for plugins with no resolved categories.
pub const UNCATEGORIZED_VALUE: &str = "__uncategorized__";

/// Category side of the directory filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
    Uncategorized,
}

impl CategoryFilter {
    /// Parse a dropdown value. The empty string selects all categories.
    pub fn from_value(value: &str) -> Self {
        match value {
            "" => CategoryFilter::All,
            UNCATEGORIZED_VALUE => CategoryFilter::Uncategorized,
            name => CategoryFilter::Named(name.to_string()),
        }
    }

    pub fn as_value(&self) -> &str {
        match self {
            CategoryFilter::All => "",
            CategoryFilter::Named(name) => name,
            CategoryFilter::Uncategorized => UNCATEGORIZED_VALUE,
        }
    }

    pub fn matches(&self, plugin: &PluginRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Uncategorized => plugin.categories.is_empty(),
            CategoryFilter::Named(name) => plugin.categories.iter().any(|c| c == name),
        }
    }
}

/// Active sort mode; exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Latest,
    Name,
    Stars,
    Forks,
}

impl SortMode {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "latest" => Some(SortMode::Latest),
            "name" => Some(SortMode::Name),
            "stars" => Some(SortMode::Stars),
            "forks" => Some(SortMode::Forks),
            _ => None,
        }
    }

    pub fn as_value(&self) -> &'static str {
        match self {
            SortMode::Latest => "latest",
            SortMode::Name => "name",
            SortMode::Stars => "stars",
            SortMode::Forks => "forks",
        }
    }
}

/// The directory's combined filter: category AND free-text search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSpec {
    pub category: CategoryFilter,
    pub search: String,
}

impl FilterSpec {
    /// True when no filter is active and the summary shows a plain total.
    pub fn is_empty(&self) -> bool {
        self.category == CategoryFilter::All && self.search.is_empty()
    }

    /// Category match AND case-insensitive substring match of the search text
    /// against name, description, or author.
    pub fn matches(&self, plugin: &PluginRecord) -> bool {
        if !self.category.matches(plugin) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        let manifest = &plugin.manifest;
        manifest.name.to_lowercase().contains(&needle)
            || manifest.description.to_lowercase().contains(&needle)
            || manifest.author.to_lowercase().contains(&needle)
    }
}

pub fn filter_plugins<'a>(
    plugins: &'a [PluginRecord],
    filter: &FilterSpec,
) -> Vec<&'a PluginRecord> {
    plugins.iter().filter(|p| filter.matches(p)).collect()
}

fn release_or_epoch(plugin: &PluginRecord) -> DateTime<Utc> {
    plugin.latest_release_at().unwrap_or(DateTime::UNIX_EPOCH)
}

/// Sort in place. `Latest` puts missing release dates last; `Stars` and
/// `Forks` treat missing counts as zero.
pub fn sort_plugins(plugins: &mut [&PluginRecord], mode: SortMode) {
    match mode {
        SortMode::Latest => plugins.sort_by_key(|p| Reverse(release_or_epoch(p))),
        SortMode::Name => plugins.sort_by(|a, b| a.manifest.name.cmp(&b.manifest.name)),
        SortMode::Stars => plugins.sort_by_key(|p| Reverse(p.stargazers_count)),
        SortMode::Forks => plugins.sort_by_key(|p| Reverse(p.forks_count)),
    }
}

/// Number of revealed items for a 1-based page.
pub fn visible_len(filtered: usize, page: usize, page_size: usize) -> usize {
    filtered.min(page.saturating_mul(page_size))
}

/// Entries for the category dropdown, derived from the loaded plugin set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOptions {
    /// Unique resolved categories, sorted.
    pub names: Vec<String>,
    /// Whether the synthetic "Uncategorized" option is needed.
    pub has_uncategorized: bool,
}

pub fn category_options(plugins: &[PluginRecord]) -> CategoryOptions {
    let mut names = BTreeSet::new();
    let mut has_uncategorized = false;
    for plugin in plugins {
        if plugin.categories.is_empty() {
            has_uncategorized = true;
        } else {
            names.extend(plugin.categories.iter().cloned());
        }
    }
    CategoryOptions {
        names: names.into_iter().collect(),
        has_uncategorized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{sample_record, PluginRecord, PluginRelease};

    fn with_release(repository: &str, published_at: &str) -> PluginRecord {
        let mut plugin = sample_record(repository);
        plugin.releases = vec![PluginRelease {
            published_at: published_at.to_string(),
        }];
        plugin
    }

    #[test]
    fn test_category_filter_matching() {
        let mut categorized = sample_record("org/a");
        categorized.categories = vec!["SEO".to_string()];
        let uncategorized = sample_record("org/b");

        assert!(CategoryFilter::All.matches(&categorized));
        assert!(CategoryFilter::All.matches(&uncategorized));
        assert!(CategoryFilter::Named("SEO".to_string()).matches(&categorized));
        assert!(!CategoryFilter::Named("SEO".to_string()).matches(&uncategorized));
        assert!(CategoryFilter::Uncategorized.matches(&uncategorized));
        assert!(!CategoryFilter::Uncategorized.matches(&categorized));
    }

    #[test]
    fn test_category_filter_value_round_trip() {
        for filter in [
            CategoryFilter::All,
            CategoryFilter::Named("SEO".to_string()),
            CategoryFilter::Uncategorized,
        ] {
            assert_eq!(CategoryFilter::from_value(filter.as_value()), filter);
        }
    }

    #[test]
    fn test_search_matches_name_description_author() {
        let mut plugin = sample_record("org/a");
        plugin.manifest.name = "Breadcrumbs".to_string();
        plugin.manifest.description = "Adds navigation trails".to_string();
        plugin.manifest.author = "Jane Doe".to_string();

        for needle in ["bread", "TRAILS", "jane"] {
            let spec = FilterSpec {
                search: needle.to_string(),
                ..Default::default()
            };
            assert!(spec.matches(&plugin), "search {:?} should match", needle);
        }

        let spec = FilterSpec {
            search: "unrelated".to_string(),
            ..Default::default()
        };
        assert!(!spec.matches(&plugin));
    }

    #[test]
    fn test_sort_latest_puts_missing_dates_last() {
        let a = with_release("org/a", "2024-01-01T00:00:00Z");
        let b = with_release("org/b", "2025-01-01T00:00:00Z");
        let undated = sample_record("org/undated");

        let mut refs: Vec<&PluginRecord> = vec![&a, &undated, &b];
        sort_plugins(&mut refs, SortMode::Latest);

        let order: Vec<&str> = refs.iter().map(|p| p.repository.as_str()).collect();
        assert_eq!(order, vec!["org/b", "org/a", "org/undated"]);
    }

    #[test]
    fn test_sort_name_is_non_decreasing() {
        let mut a = sample_record("org/a");
        a.manifest.name = "Zebra".to_string();
        let mut b = sample_record("org/b");
        b.manifest.name = "Anchor".to_string();

        let mut refs: Vec<&PluginRecord> = vec![&a, &b];
        sort_plugins(&mut refs, SortMode::Name);

        let names: Vec<&str> = refs.iter().map(|p| p.manifest.name.as_str()).collect();
        assert_eq!(names, vec!["Anchor", "Zebra"]);
    }

    #[test]
    fn test_sort_stars_and_forks_descending() {
        let mut a = sample_record("org/a");
        a.stargazers_count = 5;
        a.forks_count = 1;
        let mut b = sample_record("org/b");
        b.stargazers_count = 50;
        b.forks_count = 0;

        let mut refs: Vec<&PluginRecord> = vec![&a, &b];
        sort_plugins(&mut refs, SortMode::Stars);
        assert_eq!(refs[0].repository, "org/b");

        sort_plugins(&mut refs, SortMode::Forks);
        assert_eq!(refs[0].repository, "org/a");
    }

    #[test]
    fn test_visible_len_pagination() {
        assert_eq!(visible_len(30, 1, 12), 12);
        assert_eq!(visible_len(30, 2, 12), 24);
        assert_eq!(visible_len(30, 3, 12), 30);
        assert_eq!(visible_len(30, 9, 12), 30);
        assert_eq!(visible_len(5, 1, 12), 5);
        assert_eq!(visible_len(0, 1, 12), 0);
    }

    #[test]
    fn test_category_options_derivation() {
        let mut a = sample_record("org/a");
        a.categories = vec!["SEO".to_string(), "Layout".to_string()];
        let mut b = sample_record("org/b");
        b.categories = vec!["SEO".to_string()];
        let c = sample_record("org/c");

        let options = category_options(&[a, b, c]);
        assert_eq!(options.names, vec!["Layout".to_string(), "SEO".to_string()]);
        assert!(options.has_uncategorized);

        let options = category_options(&[]);
        assert!(options.names.is_empty());
        assert!(!options.has_uncategorized);
    }

    #[test]
    fn test_sort_mode_parsing() {
        assert_eq!(SortMode::from_value("latest"), Some(SortMode::Latest));
        assert_eq!(SortMode::from_value("name"), Some(SortMode::Name));
        assert_eq!(SortMode::from_value("stars"), Some(SortMode::Stars));
        assert_eq!(SortMode::from_value("forks"), Some(SortMode::Forks));
        assert_eq!(SortMode::from_value("velocity"), None);
    }
}
