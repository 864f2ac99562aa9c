//! Plugdex CLI - renders the plugin directory pages from the catalog.
//!
//! Loads the merged plugin list (cache first, network on expiry, stale
//! fallback on failure) and writes the homepage and directory pages into an
//! output directory.

mod templates;

use anyhow::{Context, Result};
use clap::Parser;
use plugdex_core::view::page::{ids, DIRECTORY_REQUIRED_IDS, HOMEPAGE_REQUIRED_IDS};
use plugdex_core::{
    CatalogEndpoints, CatalogLoader, DirectoryView, DiskStore, HomepageView, HttpCatalogFetcher,
    RenderOutcome, ScrollMetrics, SessionState, Slot,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "plugdex")]
#[command(about = "Render the plugin directory pages from the catalog endpoints")]
struct Args {
    /// Directory for the catalog snapshot cache
    #[arg(long, default_value = ".plugdex-cache")]
    cache_dir: PathBuf,

    /// Directory the rendered pages are written to
    #[arg(short, long, default_value = "site")]
    out_dir: PathBuf,

    /// Bypass both cache tiers and refetch
    #[arg(short, long)]
    force_refresh: bool,

    /// Category to filter the directory page by
    #[arg(long)]
    category: Option<String>,

    /// Sort mode: latest, name, stars, or forks
    #[arg(long, default_value = "latest")]
    sort: String,

    /// Free-text search over name, description, and author
    #[arg(long)]
    search: Option<String>,

    /// Reveal pages up to this number, as the lazy loader would
    #[arg(long, default_value = "1")]
    page: usize,

    /// Override the plugin data endpoint
    #[arg(long)]
    plugin_data_url: Option<String>,

    /// Override the category map endpoint
    #[arg(long)]
    category_map_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    let mut endpoints = CatalogEndpoints::default();
    if let Some(url) = args.plugin_data_url.clone() {
        endpoints.plugin_data_url = url;
    }
    if let Some(url) = args.category_map_url.clone() {
        endpoints.category_map_url = url;
    }

    let loader = CatalogLoader::new(
        Box::new(DiskStore::new(&args.cache_dir)),
        Box::new(HttpCatalogFetcher::with_endpoints(endpoints)?),
    );

    let plugins = loader.load(None, args.force_refresh).await;
    if plugins.is_empty() {
        warn!("No plugin data available; rendering error pages");
    } else {
        info!("Loaded {} plugins", plugins.len());
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let homepage = render_homepage(&plugins);
    write_page(&args.out_dir.join("index.html"), &homepage)?;

    let directory = render_directory(&args, plugins);
    write_page(&args.out_dir.join("database.html"), &directory)?;

    Ok(())
}

fn render_homepage(plugins: &[plugdex_core::PluginRecord]) -> String {
    let view = HomepageView::new();
    let page = templates::HOMEPAGE;

    // Missing required ids would make this a no-op, like the browser scripts.
    if !Slot::has_all(page, HOMEPAGE_REQUIRED_IDS) {
        return page.to_string();
    }

    let page = Slot::inject(page, ids::PLUGIN_CONTAINER, &view.render(plugins));
    Slot::inject(&page, ids::PLUGIN_COUNT, &view.count_badge(plugins.len()))
}

fn render_directory(args: &Args, plugins: Vec<plugdex_core::PluginRecord>) -> String {
    let page = templates::DIRECTORY;
    if !Slot::has_all(page, DIRECTORY_REQUIRED_IDS) {
        return page.to_string();
    }

    let mut session = SessionState::new();
    if let Some(category) = &args.category {
        session.set_filter_category(category.clone());
    }

    let mut view = DirectoryView::new();
    view.mount(plugins, &mut session);
    view.set_sort(&args.sort);
    if let Some(search) = &args.search {
        view.set_search(search, Instant::now());
    }

    // Reveal pages the way the scroll-driven lazy loader would.
    for _ in 1..args.page {
        view.on_scroll(ScrollMetrics {
            scroll_y: 0.0,
            viewport_height: 0.0,
            document_height: 0.0,
        });
    }

    let cards = match view.render() {
        RenderOutcome::Rendered(html) => html,
        RenderOutcome::Skipped | RenderOutcome::Unmounted => String::new(),
    };

    let page = Slot::inject(page, ids::PLUGIN_CONTAINER, &cards);
    let page = Slot::inject(&page, ids::CATEGORY, &view.render_dropdown());
    Slot::inject(&page, ids::RESULTS_INFO, &view.results_summary())
}

fn write_page(path: &std::path::Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}
