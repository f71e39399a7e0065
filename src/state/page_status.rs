//! Classification of a freshly rendered page
//!
//! The checks run in a fixed order: the ban title is looked at first, so a
//! banned page never enters the rate-limit restart path.

use crate::config::SessionMarkers;
use scraper::{Html, Selector};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageStatus {
    /// The page can be handed to an extractor
    Usable,

    /// The site served its verification form; the browser session must be replaced
    RateLimited,

    /// The site refuses this network address outright
    Banned,
}

impl PageStatus {
    /// Classifies a parsed page
    pub fn classify(document: &Html, markers: &SessionMarkers) -> Self {
        if is_banned(document, &markers.ban_title) {
            Self::Banned
        } else if is_rate_limited(document, &markers.rate_limit_form) {
            Self::RateLimited
        } else {
            Self::Usable
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Usable)
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Usable => "usable",
            Self::RateLimited => "rate-limited",
            Self::Banned => "banned",
        };
        f.write_str(label)
    }
}

fn is_banned(document: &Html, ban_title: &str) -> bool {
    let Ok(selector) = Selector::parse("title") else {
        return false;
    };
    document
        .select(&selector)
        .next()
        .map(|title| title.text().collect::<String>().trim() == ban_title)
        .unwrap_or(false)
}

fn is_rate_limited(document: &Html, form_id: &str) -> bool {
    match Selector::parse(&format!("form#{}", form_id)) {
        Ok(selector) => document.select(&selector).next().is_some(),
        Err(_) => false,
    }
}
