//! HTML views over the merged plugin list.
//!
//! Views are explicit state machines: the host mounts them, feeds them input
//! and scroll events, and splices their rendered fragments into the hosting
//! page by element id.

pub mod directory;
pub mod homepage;
pub mod html;
pub mod page;

pub use directory::{DirectoryView, RenderOutcome, ScrollMetrics};
pub use homepage::HomepageView;
pub use page::Slot;

use crate::model::PluginRecord;
use crate::session::SessionState;

/// What was under the pointer when a plugin card was activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// An embedded link (author URI, repository link).
    Link,
    /// A category badge, carrying its dropdown value.
    CategoryBadge(String),
    /// The card surface itself.
    Card,
}

/// The navigation the host should perform for a card click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    /// Open the plugin's source repository.
    OpenRepository(String),
    /// Hand the category to the directory view and navigate there.
    FilterInDirectory(String),
    /// Let the embedded link handle the click itself.
    None,
}

/// Path of the directory page, the target of a category-badge click.
pub const DIRECTORY_PATH: &str = "/database/";

/// Resolve a click on a plugin card.
///
/// Embedded links and category badges take precedence over the card-level
/// repository navigation.
pub fn resolve_card_click(plugin: &PluginRecord, target: ClickTarget) -> CardAction {
    match target {
        ClickTarget::Link => CardAction::None,
        ClickTarget::CategoryBadge(category) => CardAction::FilterInDirectory(category),
        ClickTarget::Card => CardAction::OpenRepository(plugin.repo_url()),
    }
}

/// Apply a resolved card action, returning the URL or path to navigate to.
///
/// Badge selections are parked in the session for the directory view to
/// consume on mount.
pub fn apply_card_action(action: &CardAction, session: &mut SessionState) -> Option<String> {
    match action {
        CardAction::OpenRepository(url) => Some(url.clone()),
        CardAction::FilterInDirectory(category) => {
            session.set_filter_category(category.clone());
            Some(DIRECTORY_PATH.to_string())
        }
        CardAction::None => None,
    }
}
