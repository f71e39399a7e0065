//! URL handling module for rym-scraper
//!
//! This module builds the site's chart and search URLs and resolves the
//! relative links found in rendered pages.

mod chart;
mod search;

pub use chart::ChartQuery;
pub use search::artist_search_url;

use url::Url;

/// Resolves a link href against the site root
///
/// Returns None for empty hrefs, fragment-only anchors, `javascript:` links and
/// anything that does not resolve to an http(s) URL.
///
/// # Examples
///
/// ```
/// use rym_scraper::url::absolutize;
/// use url::Url;
///
/// let base = Url::parse("https://rateyourmusic.com").unwrap();
/// assert_eq!(
///     absolutize(&base, "/artist/pinback").as_deref(),
///     Some("https://rateyourmusic.com/artist/pinback")
/// );
/// ```
pub fn absolutize(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }

    match base.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}

/// Turns a facet value into the site's path form: trimmed, lowercased,
/// inner whitespace runs replaced by `-`
pub fn slug(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
