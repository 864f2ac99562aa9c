//! Shared HTML building blocks for plugin cards.

use crate::model::{PluginManifest, PluginRecord};
use crate::query::UNCATEGORIZED_VALUE;

/// Escape text for HTML element and attribute context.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Author name, linked when an author URI is present.
pub fn author_html(manifest: &PluginManifest) -> String {
    match &manifest.author_uri {
        Some(uri) => format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            escape(uri),
            escape(&manifest.author)
        ),
        None => escape(&manifest.author),
    }
}

/// Category badges, with the synthetic "Uncategorized" badge when none
/// resolved. `clickable` marks badges as directory-filter handoffs.
pub fn category_badges(plugin: &PluginRecord, clickable: bool) -> String {
    let class_suffix = if clickable { " clickable-category" } else { "" };

    if plugin.categories.is_empty() {
        return format!(
            r#"<span class="badge badge-uncategorized{}" data-category="{}">Uncategorized</span>"#,
            class_suffix, UNCATEGORIZED_VALUE
        );
    }

    plugin
        .categories
        .iter()
        .map(|category| {
            format!(
                r#"<span class="badge badge-category{}" data-category="{}">{}</span>"#,
                class_suffix,
                escape(category),
                escape(category)
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Star and fork badges; zero counts render nothing.
pub fn stat_badges(plugin: &PluginRecord) -> String {
    let mut out = String::new();
    if plugin.stargazers_count > 0 {
        out.push_str(&format!(
            r#"<span class="badge badge-stars" title="{} stars">⭐ {}</span>"#,
            plugin.stargazers_count, plugin.stargazers_count
        ));
    }
    if plugin.forks_count > 0 {
        out.push_str(&format!(
            r#"<span class="badge badge-forks" title="{} forks">🍴 {}</span>"#,
            plugin.forks_count, plugin.forks_count
        ));
    }
    out
}
