//! Homepage "latest plugins" strip.
//!
//! Shows the most recently released plugins as summary cards. Plugins without
//! a parseable release timestamp are excluded from the ranking.

use crate::config::ViewConfig;
use crate::model::PluginRecord;
use crate::view::html;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;

/// Renders the homepage strip.
pub struct HomepageView {
    count: usize,
}

impl Default for HomepageView {
    fn default() -> Self {
        Self::new()
    }
}

impl HomepageView {
    pub fn new() -> Self {
        Self::with_count(ViewConfig::HOMEPAGE_COUNT)
    }

    pub fn with_count(count: usize) -> Self {
        Self { count }
    }

    /// Skeleton cards shown while the catalog is loading.
    pub fn render_loading(&self) -> String {
        let card = concat!(
            r#"<div class="skeleton-card">"#,
            r#"<div class="skeleton skeleton-title"></div>"#,
            r#"<div class="skeleton skeleton-text"></div>"#,
            r#"<div class="skeleton skeleton-text-short"></div>"#,
            r#"<div class="skeleton skeleton-badge"></div>"#,
            "</div>"
        );
        card.repeat(self.count)
    }

    /// Pick the plugins to feature: newest release first, capped at the
    /// configured count.
    pub fn latest<'a>(&self, plugins: &'a [PluginRecord]) -> Vec<&'a PluginRecord> {
        let mut dated: Vec<(&PluginRecord, DateTime<Utc>)> = plugins
            .iter()
            .filter_map(|p| p.latest_release_at().map(|t| (p, t)))
            .collect();
        dated.sort_by_key(|(_, t)| Reverse(*t));
        dated.into_iter().take(self.count).map(|(p, _)| p).collect()
    }

    /// Render the strip, or the inline error paragraph when the catalog came
    /// back empty.
    pub fn render(&self, plugins: &[PluginRecord]) -> String {
        if plugins.is_empty() {
            return "<p>❌ Could not load latest plugins</p>".to_string();
        }
        self.latest(plugins)
            .iter()
            .map(|plugin| self.render_card(plugin))
            .collect()
    }

    /// Text for the optional plugin-count badge.
    pub fn count_badge(&self, total: usize) -> String {
        format!("{} Plugins Available", total)
    }

    fn render_card(&self, plugin: &PluginRecord) -> String {
        let manifest = &plugin.manifest;
        let release_date = plugin
            .latest_release_at()
            .map(format_release_date)
            .unwrap_or_else(|| "Unknown".to_string());

        format!(
            concat!(
                r#"<div class="plugin-card" role="button" tabindex="0" data-repo-url="{repo_url}">"#,
                r#"<div class="plugin-card-header">"#,
                "<h2>{name}</h2>",
                r#"<span class="version-badge">v{version}</span>"#,
                "</div>",
                r#"<div class="plugin-card-content">"#,
                r#"<p class="plugin-description">{description}</p>"#,
                r#"<div class="plugin-metadata">"#,
                r#"<div class="plugin-metadata-item"><strong>📅</strong> {release_date}</div>"#,
                r#"<div class="plugin-metadata-item"><strong>👤</strong> {author}</div>"#,
                "</div>",
                r#"<div class="plugin-footer">{badges}</div>"#,
                "</div>",
                "</div>"
            ),
            repo_url = html::escape(&plugin.repo_url()),
            name = html::escape(&manifest.name),
            version = html::escape(&manifest.version),
            description = html::escape(&manifest.description),
            release_date = release_date,
            author = html::author_html(manifest),
            badges = html::category_badges(plugin, true),
        )
    }
}

/// Medium date style, e.g. "Jan 1, 2025".
fn format_release_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}
