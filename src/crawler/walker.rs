//! Pagination Walker
//!
//! Drives navigate and extract cycles over a multi-page listing:
//!
//! ```text
//! Fetching --rows appended--> CheckNext --next control, under cap--> Fetching
//!    |                            |
//!    +--no container / no rows--> Done <--no next control / cap reached
//! ```
//!
//! A page-level failure ends the walk with the records gathered so far. Only an
//! IP ban propagates as an error.

use crate::config::{ChartMarkers, TimelineMarkers};
use crate::extract::dom::class_selector;
use crate::extract::{
    chart_rows, extract_chart_row, extract_timeline_entry, has_next_page, is_advertisement,
    timeline_lines, Record,
};
use crate::session::{Launcher, Session};
use crate::state::WalkState;
use crate::url::ChartQuery;
use crate::Result;
use scraper::{ElementRef, Html, Selector};

/// A position in a paginated listing
pub trait PageCursor {
    /// 1-based index of the current page
    fn page(&self) -> u32;

    /// Short name used in logs and page dump file names
    fn label(&self) -> String;

    /// Brings the current page into the session
    fn fetch<L: Launcher>(&mut self, session: &mut Session<L>) -> Result<()>;

    /// Records of the current page, advertisements excluded; None when the
    /// results container is absent
    fn rows(&self, document: &Html) -> Option<Vec<Record>>;

    fn has_next(&self, document: &Html) -> bool;

    /// Moves to the following page
    fn advance<L: Launcher>(&mut self, session: &mut Session<L>) -> Result<()>;
}

/// Walks `cursor` until the listing ends or `max_page` has been read
///
/// Records keep page order, and document order within a page. A `max_page`
/// of 0 means no cap.
pub fn walk<L, C>(session: &mut Session<L>, cursor: &mut C, max_page: Option<u32>) -> Result<Vec<Record>>
where
    L: Launcher,
    C: PageCursor,
{
    let max_page = max_page.filter(|&max| max > 0);
    let mut records = Vec::new();
    let mut state = WalkState::Fetching;
    let mut document: Option<Html> = None;

    while !state.is_terminal() {
        state = match state {
            WalkState::Fetching => match fetch_page(session, cursor, &mut records) {
                Ok(Some(page)) => {
                    document = Some(page);
                    WalkState::CheckNext
                }
                Ok(None) => WalkState::Done,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::error!("{} page {} failed: {}", cursor.label(), cursor.page(), e);
                    WalkState::Done
                }
            },
            WalkState::CheckNext => {
                let has_next = document.take().is_some_and(|page| cursor.has_next(&page));
                if max_page.is_some_and(|max| cursor.page() >= max) {
                    tracing::debug!("Page cap reached at page {}", cursor.page());
                    WalkState::Done
                } else if !has_next {
                    tracing::debug!("No next page after page {}", cursor.page());
                    WalkState::Done
                } else {
                    match cursor.advance(session) {
                        Ok(()) => WalkState::Fetching,
                        Err(e) if e.is_fatal() => return Err(e),
                        Err(e) => {
                            tracing::error!("Could not move past page {}: {}", cursor.page(), e);
                            WalkState::Done
                        }
                    }
                }
            }
            WalkState::Done => WalkState::Done,
        };
    }

    tracing::info!("{}: {} records over {} pages", cursor.label(), records.len(), cursor.page());
    Ok(records)
}

/// Fetches and extracts one page; Ok(None) means the listing is exhausted
fn fetch_page<L, C>(
    session: &mut Session<L>,
    cursor: &mut C,
    records: &mut Vec<Record>,
) -> Result<Option<Html>>
where
    L: Launcher,
    C: PageCursor,
{
    cursor.fetch(session)?;
    let document = session.current_document()?;

    match cursor.rows(&document) {
        None => {
            tracing::warn!(
                "Results container not found on {} page {}",
                cursor.label(),
                cursor.page()
            );
            dump_page(session, cursor);
            Ok(None)
        }
        Some(rows) if rows.is_empty() => {
            tracing::debug!("No rows on page {}. Exiting", cursor.page());
            Ok(None)
        }
        Some(rows) => {
            tracing::info!("Page {}: {} rows", cursor.page(), rows.len());
            records.extend(rows);
            Ok(Some(document))
        }
    }
}

fn dump_page<L: Launcher, C: PageCursor>(session: &Session<L>, cursor: &C) {
    let Some(dir) = session.dump_dir() else {
        return;
    };
    let path = dir.join(format!("{}_page{}.html", cursor.label(), cursor.page()));
    if let Err(e) = session.dump_source(&path) {
        tracing::warn!("Could not dump page source to {}: {}", path.display(), e);
    }
}

fn non_ad_rows<'a, F>(rows: Vec<ElementRef<'a>>, extract: F) -> Vec<Record>
where
    F: FnMut(ElementRef<'a>) -> Record,
{
    rows.into_iter()
        .filter(|row| !is_advertisement(*row))
        .map(extract)
        .collect()
}

/// Chart listing: each page is its own URL, built from the query
pub struct ChartCursor<'q> {
    query: &'q mut ChartQuery,
    markers: ChartMarkers,
}

impl<'q> ChartCursor<'q> {
    pub fn new(query: &'q mut ChartQuery, markers: ChartMarkers) -> Self {
        Self { query, markers }
    }
}

impl PageCursor for ChartCursor<'_> {
    fn page(&self) -> u32 {
        self.query.page()
    }

    fn label(&self) -> String {
        format!("chart_{}", self.query.label())
    }

    fn fetch<L: Launcher>(&mut self, session: &mut Session<L>) -> Result<()> {
        let url = self.query.to_string();
        tracing::debug!("Extracting chart rows for url {}", url);
        session.navigate(&url)
    }

    fn rows(&self, document: &Html) -> Option<Vec<Record>> {
        let rows = chart_rows(document, &self.markers)?;
        Some(non_ad_rows(rows, |row| extract_chart_row(row, &self.markers)))
    }

    fn has_next(&self, document: &Html) -> bool {
        has_next_page(document, &self.markers)
    }

    fn advance<L: Launcher>(&mut self, _session: &mut Session<L>) -> Result<()> {
        self.query.advance();
        Ok(())
    }
}

/// Album rating timeline: one URL, later pages reached by clicking "next"
pub struct TimelineCursor {
    url: String,
    markers: TimelineMarkers,
    next_control: String,
    page: u32,
    loaded: bool,
}

impl TimelineCursor {
    pub fn new(url: impl Into<String>, markers: TimelineMarkers) -> Self {
        let next_control = format!(
            "{} {}",
            class_selector("", &markers.section),
            class_selector("", &markers.next_page)
        );
        Self {
            url: url.into(),
            markers,
            next_control,
            page: 1,
            loaded: false,
        }
    }
}

impl PageCursor for TimelineCursor {
    fn page(&self) -> u32 {
        self.page
    }

    fn label(&self) -> String {
        "timeline".to_string()
    }

    fn fetch<L: Launcher>(&mut self, session: &mut Session<L>) -> Result<()> {
        if !self.loaded {
            session.navigate(&self.url)?;
            self.loaded = true;
        }
        Ok(())
    }

    fn rows(&self, document: &Html) -> Option<Vec<Record>> {
        let lines = timeline_lines(document, &self.markers)?;
        Some(non_ad_rows(lines, |line| {
            extract_timeline_entry(line, &self.markers)
        }))
    }

    fn has_next(&self, document: &Html) -> bool {
        Selector::parse(&self.next_control)
            .map(|selector| document.select(&selector).next().is_some())
            .unwrap_or(false)
    }

    fn advance<L: Launcher>(&mut self, session: &mut Session<L>) -> Result<()> {
        session.click(&self.next_control)?;
        self.page += 1;
        Ok(())
    }
}
