//! Coordinator: the one entry point per page type
//!
//! Each operation accepts a [`Target`] (a direct URL or a human name resolved
//! first), drives the session and returns records. Batch variants process
//! their inputs one at a time, in order. A failed input is logged and
//! skipped; only an IP ban aborts the batch.

use crate::config::Config;
use crate::crawler::walker::{walk, ChartCursor, TimelineCursor};
use crate::extract::{
    extract_album, extract_artist, extract_discography, extract_release_details, Record,
};
use crate::resolve::{resolve_album, resolve_artist};
use crate::session::{Launcher, Session};
use crate::url::ChartQuery;
use crate::{Result, RymError};
use std::fmt;
use url::Url;

/// What to look up: a page URL, or a name to resolve through site search
///
/// Album names use the `Artist - Album` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Url(String),
    Name(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::Name(name) => write!(f, "'{}'", name),
        }
    }
}

/// Owns the browser session for its whole lifetime
pub struct Coordinator<L: Launcher> {
    session: Session<L>,
    config: Config,
    base: Url,
}

impl<L: Launcher> Coordinator<L> {
    /// Launches the browser and prepares the coordinator
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Browser running, ready for operations
    /// * `Err(RymError)` - The base URL is invalid or the browser failed to launch
    pub fn new(launcher: L, config: Config) -> Result<Self> {
        let base = config.site.base_url()?;
        let session = Session::start(launcher, &config)?;
        Ok(Self {
            session,
            config,
            base,
        })
    }

    pub fn session(&self) -> &Session<L> {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Album page fields
    pub fn album_info(&mut self, target: &Target) -> Result<Record> {
        let url = self.album_url(target)?;
        tracing::info!("Extracting album informations for {}", url);
        self.session.navigate(&url)?;
        let document = self.session.current_document()?;
        Ok(extract_album(&document, &self.config.markers.album))
    }

    pub fn albums_info(&mut self, targets: &[Target]) -> Result<Vec<Record>> {
        self.each(targets, |this, target| this.album_info(target))
    }

    /// Date and user of every rating in an album's timeline
    pub fn album_timeline(&mut self, target: &Target, max_page: Option<u32>) -> Result<Vec<Record>> {
        let url = self.album_url(target)?;
        tracing::info!("Extracting album timeline for {}", url);
        let mut cursor = TimelineCursor::new(url, self.config.markers.timeline.clone());
        walk(&mut self.session, &mut cursor, max_page)
    }

    /// One timeline per album, in input order
    pub fn albums_timeline(
        &mut self,
        targets: &[Target],
        max_page: Option<u32>,
    ) -> Result<Vec<Vec<Record>>> {
        self.each(targets, |this, target| this.album_timeline(target, max_page))
    }

    /// Artist page fields
    pub fn artist_info(&mut self, target: &Target) -> Result<Record> {
        let url = self.artist_url(target)?;
        tracing::info!("Extracting artist informations for {}", url);
        self.session.navigate(&url)?;
        let document = self.session.current_document()?;
        Ok(extract_artist(&document, &self.config.markers.artist))
    }

    pub fn artists_info(&mut self, targets: &[Target]) -> Result<Vec<Record>> {
        self.each(targets, |this, target| this.artist_info(target))
    }

    /// Rows of a chart, from the query's current page up to `max_page`
    ///
    /// The query's page counter is left on the last page read.
    pub fn chart(&mut self, query: &mut ChartQuery, max_page: Option<u32>) -> Result<Vec<Record>> {
        tracing::info!("Extracting chart informations for {}", query);
        let mut cursor = ChartCursor::new(query, self.config.markers.chart.clone());
        walk(&mut self.session, &mut cursor, max_page)
    }

    /// Rows of a chart given by a URL copied from the site
    pub fn chart_from_url(&mut self, url: &str, max_page: Option<u32>) -> Result<Vec<Record>> {
        let mut query = ChartQuery::from_url(url)?;
        self.chart(&mut query, max_page)
    }

    /// Every release of an artist's discography
    ///
    /// With `complementary`, each release page is also loaded and its info
    /// table merged into the entry: one extra page load per release.
    pub fn discography(&mut self, target: &Target, complementary: bool) -> Result<Vec<Record>> {
        let url = self.artist_url(target)?;
        tracing::info!("Extracting discography for {}", url);
        self.session.navigate(&url)?;
        let document = self.session.current_document()?;

        let mut entries =
            match extract_discography(&document, &self.config.markers.discography, &self.base) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::error!("Discography not found at {}: {}", url, e);
                    return Ok(Vec::new());
                }
            };

        if complementary {
            tracing::info!(
                "Fetching complementary infos: {} additional page loads",
                entries.len()
            );
            for entry in &mut entries {
                self.enrich(entry)?;
            }
        }
        Ok(entries)
    }

    /// Discographies of several artists, flattened into one sequence
    pub fn discographies(&mut self, targets: &[Target], complementary: bool) -> Result<Vec<Record>> {
        let all = self.each(targets, |this, target| this.discography(target, complementary))?;
        Ok(all.into_iter().flatten().collect())
    }

    /// Closes the browser
    pub fn shutdown(mut self) {
        self.session.quit();
    }

    /// Merges a release page's details into a discography entry; failures
    /// other than a ban leave the entry as it was
    fn enrich(&mut self, entry: &mut Record) -> Result<()> {
        let Some(url) = entry.text("URL").filter(|u| !u.is_empty()).map(str::to_string) else {
            return Ok(());
        };
        if let Err(e) = self.session.navigate(&url) {
            if e.is_fatal() {
                return Err(e);
            }
            tracing::error!("Complementary infos for {} not fetched: {}", url, e);
            return Ok(());
        }

        let document = match self.session.current_document() {
            Ok(document) => document,
            Err(e) => {
                tracing::error!("Complementary infos for {} not read: {}", url, e);
                return Ok(());
            }
        };
        let year = entry.text("Year").map(str::to_string);
        match extract_release_details(&document, &self.config.markers.album, year.as_deref()) {
            Ok(details) => entry.merge(details),
            Err(e) => tracing::error!("Complementary infos for {} not found: {}", url, e),
        }
        Ok(())
    }

    fn album_url(&mut self, target: &Target) -> Result<String> {
        match target {
            Target::Url(url) => Ok(url.clone()),
            Target::Name(name) => resolve_album(&mut self.session, &self.config, name)?
                .ok_or_else(|| RymError::NotFound {
                    what: "album",
                    name: name.clone(),
                }),
        }
    }

    fn artist_url(&mut self, target: &Target) -> Result<String> {
        match target {
            Target::Url(url) => Ok(url.clone()),
            Target::Name(name) => resolve_artist(&mut self.session, &self.config, name)?
                .into_iter()
                .next()
                .ok_or_else(|| RymError::NotFound {
                    what: "artist",
                    name: name.clone(),
                }),
        }
    }

    /// Runs `operation` on every target in order, skipping failed ones
    fn each<R, F>(&mut self, targets: &[Target], mut operation: F) -> Result<Vec<R>>
    where
        F: FnMut(&mut Self, &Target) -> Result<R>,
    {
        if targets.is_empty() {
            return Err(RymError::NoTargets);
        }

        let mut results = Vec::with_capacity(targets.len());
        for target in targets {
            match operation(self, target) {
                Ok(result) => results.push(result),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => tracing::error!("Skipping {}: {}", target, e),
            }
        }
        Ok(results)
    }
}
