//! Directory page: search, category filter, sorting, lazy pagination.
//!
//! `DirectoryView` owns all the state the browser version kept in globals:
//! the current page, the active filter and sort, and the key of the last
//! render so unchanged input skips the rebuild. Events after `unmount` are
//! no-ops.

use crate::config::ViewConfig;
use crate::model::PluginRecord;
use crate::query::{
    category_options, filter_plugins, sort_plugins, visible_len, CategoryFilter, CategoryOptions,
    FilterSpec, SortMode, UNCATEGORIZED_VALUE,
};
use crate::session::SessionState;
use crate::view::html;
use std::time::{Duration, Instant};

/// Coalesces rapid input into a single deferred render.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Note an input event; the render is deferred until the window elapses
    /// without another event.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// True once the armed window has elapsed; clears the armed state.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Dimensions of the hosting viewport at scroll time.
#[derive(Debug, Clone, Copy)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    /// True when scrolled within the threshold of the document bottom.
    fn near_bottom(&self, threshold: f64) -> bool {
        self.scroll_y + self.viewport_height >= self.document_height - threshold
    }
}

/// Derived key of the inputs a render depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderKey {
    category: String,
    sort: &'static str,
    search: String,
    page: usize,
}

/// Result of a render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(String),
    /// Nothing changed since the last render.
    Skipped,
    /// The view is not mounted.
    Unmounted,
}

/// Stateful renderer for the directory page.
pub struct DirectoryView {
    plugins: Vec<PluginRecord>,
    page: usize,
    page_size: usize,
    sort: SortMode,
    filter: FilterSpec,
    debounce: Debouncer,
    last_key: Option<RenderKey>,
    mounted: bool,
}

impl Default for DirectoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryView {
    pub fn new() -> Self {
        Self::with_page_size(ViewConfig::PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            plugins: Vec::new(),
            page: 1,
            page_size,
            sort: SortMode::default(),
            filter: FilterSpec::default(),
            debounce: Debouncer::new(ViewConfig::SEARCH_DEBOUNCE),
            last_key: None,
            mounted: false,
        }
    }

    /// Activate the view: adopt any category handed over from the homepage
    /// and start accepting input and scroll events.
    pub fn mount(&mut self, plugins: Vec<PluginRecord>, session: &mut SessionState) {
        if let Some(category) = session.take_filter_category() {
            self.filter.category = CategoryFilter::from_value(&category);
        }
        self.plugins = plugins;
        self.page = 1;
        self.last_key = None;
        self.mounted = true;
    }

    /// Release the view; subsequent events are no-ops. The browser version
    /// did this when a mutation observer saw the container disappear.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.debounce.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Replace the plugin set (the loader's update callback path).
    pub fn set_plugins(&mut self, plugins: Vec<PluginRecord>) {
        self.plugins = plugins;
        self.last_key = None;
    }

    pub fn set_category(&mut self, value: &str) {
        if !self.mounted {
            return;
        }
        self.filter.category = CategoryFilter::from_value(value);
        self.page = 1;
    }

    /// Set the sort mode from a dropdown value; unknown values are ignored.
    pub fn set_sort(&mut self, value: &str) {
        if !self.mounted {
            return;
        }
        if let Some(mode) = SortMode::from_value(value) {
            self.sort = mode;
            self.page = 1;
        }
    }

    /// Search input. The render itself is deferred through the debouncer so
    /// rapid typing coalesces into one rebuild.
    pub fn set_search(&mut self, text: &str, now: Instant) {
        if !self.mounted {
            return;
        }
        self.filter.search = text.to_string();
        self.page = 1;
        self.debounce.arm(now);
    }

    pub fn clear_search(&mut self, now: Instant) {
        self.set_search("", now);
    }

    /// True when a debounced search render has become due.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        self.mounted && self.debounce.fire_due(now)
    }

    /// Advance the page when scrolled near the bottom. Growth is monotonic;
    /// scrolling back up never rolls a page back.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        if !self.mounted {
            return false;
        }
        if metrics.near_bottom(ViewConfig::SCROLL_THRESHOLD_PX) {
            self.page += 1;
            return true;
        }
        false
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Render the card grid, skipping when nothing changed since the last
    /// render.
    pub fn render(&mut self) -> RenderOutcome {
        if !self.mounted {
            return RenderOutcome::Unmounted;
        }
        let key = self.key();
        if self.last_key.as_ref() == Some(&key) {
            return RenderOutcome::Skipped;
        }
        self.last_key = Some(key);
        RenderOutcome::Rendered(self.render_cards())
    }

    /// Results summary: plain total when unfiltered, qualified otherwise.
    pub fn results_summary(&self) -> String {
        let total = self.filtered().len();
        if self.filter.is_empty() {
            return format!("{} plugins", total);
        }

        let mut qualifiers = Vec::new();
        match &self.filter.category {
            CategoryFilter::Named(name) => qualifiers.push(format!("in {}", name)),
            CategoryFilter::Uncategorized => qualifiers.push("without a category".to_string()),
            CategoryFilter::All => {}
        }
        if !self.filter.search.is_empty() {
            qualifiers.push(format!("matching \"{}\"", self.filter.search));
        }
        format!("{} plugins {}", total, qualifiers.join(" "))
    }

    /// Entries for the category dropdown.
    pub fn options(&self) -> CategoryOptions {
        category_options(&self.plugins)
    }

    /// Dropdown markup with the current selection marked.
    pub fn render_dropdown(&self) -> String {
        let options = self.options();
        let selected = self.filter.category.as_value();

        let mut out = String::from(r#"<option value="">All Categories</option>"#);
        for name in &options.names {
            out.push_str(&format!(
                r#"<option value="{0}"{1}>{0}</option>"#,
                html::escape(name),
                selected_attr(selected == name.as_str())
            ));
        }
        if options.has_uncategorized {
            out.push_str(&format!(
                r#"<option value="{}"{}>Uncategorized</option>"#,
                UNCATEGORIZED_VALUE,
                selected_attr(selected == UNCATEGORIZED_VALUE)
            ));
        }
        out
    }

    fn key(&self) -> RenderKey {
        RenderKey {
            category: self.filter.category.as_value().to_string(),
            sort: self.sort.as_value(),
            search: self.filter.search.clone(),
            page: self.page,
        }
    }

    fn filtered(&self) -> Vec<&PluginRecord> {
        let mut filtered = filter_plugins(&self.plugins, &self.filter);
        sort_plugins(&mut filtered, self.sort);
        filtered
    }

    fn render_cards(&self) -> String {
        let filtered = self.filtered();
        let visible = visible_len(filtered.len(), self.page, self.page_size);
        if visible == 0 {
            return "<p>No plugins found for this filter.</p>".to_string();
        }

        filtered[..visible]
            .iter()
            .map(|plugin| render_card(plugin))
            .collect()
    }
}

fn selected_attr(selected: bool) -> &'static str {
    if selected {
        " selected"
    } else {
        ""
    }
}

fn render_card(plugin: &PluginRecord) -> String {
    let manifest = &plugin.manifest;
    format!(
        concat!(
            r#"<div class="plugin-card" role="button" tabindex="0" data-repo-url="{repo_url}">"#,
            r#"<span class="version-badge">{version}</span>"#,
            "<h2>{name}</h2>",
            r#"<p class="plugin-description">{description}</p>"#,
            "<p><strong>Author:</strong> {author}</p>",
            r#"<div class="plugin-footer">"#,
            r#"<div class="footer-left">{category_badges}</div>"#,
            r#"<div class="footer-right">{stat_badges}</div>"#,
            "</div>",
            "</div>"
        ),
        repo_url = html::escape(&plugin.repo_url()),
        version = html::escape(&manifest.version),
        name = html::escape(&manifest.name),
        description = html::escape(&manifest.description),
        author = html::author_html(manifest),
        category_badges = html::category_badges(plugin, false),
        stat_badges = html::stat_badges(plugin),
    )
}
