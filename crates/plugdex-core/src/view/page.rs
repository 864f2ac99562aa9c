//! Host-page slot injection.
//!
//! The views render fragments; the hosting page supplies elements with known
//! ids. Splicing into a page that lacks the element is a no-op, matching the
//! browser scripts that skip absent elements instead of failing.

use regex::Regex;

/// Element ids the views expect on the hosting page.
pub mod ids {
    pub const PLUGIN_CONTAINER: &str = "plugin-container";
    pub const CATEGORY: &str = "category";
    pub const SORT: &str = "sort";
    pub const SEARCH: &str = "search";
    pub const CLEAR_SEARCH: &str = "clear-search";
    pub const RESULTS_INFO: &str = "results-info";
    pub const PLUGIN_COUNT: &str = "plugin-count";
}

/// Ids the directory page must provide for the view to activate at all.
pub const DIRECTORY_REQUIRED_IDS: &[&str] = &[
    ids::PLUGIN_CONTAINER,
    ids::CATEGORY,
    ids::SORT,
    ids::SEARCH,
];

/// Ids the homepage must provide.
pub const HOMEPAGE_REQUIRED_IDS: &[&str] = &[ids::PLUGIN_CONTAINER];

/// Slot operations on a host page.
pub struct Slot;

impl Slot {
    /// Whether the page contains an element with the given id.
    pub fn has(page: &str, id: &str) -> bool {
        opening_tag(id)
            .map(|re| re.is_match(page))
            .unwrap_or(false)
    }

    /// Whether the page contains all of the given ids.
    pub fn has_all(page: &str, required: &[&str]) -> bool {
        required.iter().all(|id| Slot::has(page, id))
    }

    /// Replace the inner content of the element with the given id.
    ///
    /// Returns the page unchanged when the id is absent or the markup is
    /// unbalanced.
    pub fn inject(page: &str, id: &str, content: &str) -> String {
        let Some(re) = opening_tag(id) else {
            return page.to_string();
        };
        let Some(captures) = re.captures(page) else {
            return page.to_string();
        };

        let (Some(open), Some(tag)) = (captures.get(0), captures.get(1)) else {
            return page.to_string();
        };
        let tag = tag.as_str();
        let body_start = open.end();

        match find_closing_tag(page, tag, body_start) {
            Some(close_start) => {
                let mut out = String::with_capacity(page.len() + content.len());
                out.push_str(&page[..body_start]);
                out.push_str(content);
                out.push_str(&page[close_start..]);
                out
            }
            None => page.to_string(),
        }
    }
}

fn opening_tag(id: &str) -> Option<Regex> {
    let pattern = format!(
        r#"<([a-zA-Z][a-zA-Z0-9-]*)\b[^>]*\bid\s*=\s*"{}"[^>]*>"#,
        regex::escape(id)
    );
    Regex::new(&pattern).ok()
}

/// Byte offset of the `</tag>` matching the element whose body starts at
/// `from`, accounting for nested elements of the same name.
fn find_closing_tag(page: &str, tag: &str, from: usize) -> Option<usize> {
    let open_marker = format!("<{}", tag);
    let close_marker = format!("</{}>", tag);
    let mut depth = 1usize;
    let mut cursor = from;

    while depth > 0 {
        let next_open = find_tag_open(page, &open_marker, cursor);
        let next_close = page[cursor..].find(&close_marker).map(|i| i + cursor);

        match (next_open, next_close) {
            (Some(open), Some(close)) if open < close => {
                depth += 1;
                cursor = open + open_marker.len();
            }
            (_, Some(close)) => {
                depth -= 1;
                if depth == 0 {
                    return Some(close);
                }
                cursor = close + close_marker.len();
            }
            _ => return None,
        }
    }
    None
}

/// Find `<tag` followed by a non-name character, so `<div` does not match
/// `<dive`.
fn find_tag_open(page: &str, marker: &str, from: usize) -> Option<usize> {
    let mut cursor = from;
    while let Some(found) = page[cursor..].find(marker).map(|i| i + cursor) {
        let boundary = page[found + marker.len()..]
            .chars()
            .next()
            .map(|c| !c.is_ascii_alphanumeric() && c != '-')
            .unwrap_or(true);
        if boundary {
            return Some(found);
        }
        cursor = found + marker.len();
    }
    None
}
