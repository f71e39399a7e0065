//! Session controller
//!
//! Guarantees that a navigation ends on a usable page. After every load the
//! page is classified:
//!
//! | Condition | Action |
//! |-----------|--------|
//! | title equals the ban marker | quit the browser, return `RymError::IpBanned` |
//! | verification form present | relaunch the browser, load the same URL again |
//! | otherwise | return |
//!
//! Rate-limit restarts are unbounded unless `max-restarts` is configured.

use crate::config::{Config, SessionMarkers};
use crate::extract::dom::class_selector;
use crate::session::renderer::{Launcher, PageRenderer, RenderError};
use crate::state::PageStatus;
use crate::RymError;
use scraper::Html;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// One browser session and its lifecycle
pub struct Session<L: Launcher> {
    launcher: L,
    renderer: Option<L::Renderer>,
    markers: SessionMarkers,
    expand_pause: Duration,
    next_page_pause: Duration,
    max_restarts: Option<u32>,
    dump_dir: Option<PathBuf>,
    restarts: u32,
}

impl<L: Launcher> Session<L> {
    /// Launches the first renderer
    ///
    /// # Arguments
    ///
    /// * `launcher` - Creates renderers, now and on every restart
    /// * `config` - Pauses, restart cap, dump directory and session markers are read from here
    pub fn start(launcher: L, config: &Config) -> Result<Self, RymError> {
        let renderer = launcher.launch()?;
        Ok(Self {
            launcher,
            renderer: Some(renderer),
            markers: config.markers.session.clone(),
            expand_pause: config.browser.expand_pause(),
            next_page_pause: config.browser.next_page_pause(),
            max_restarts: config.browser.max_restarts,
            dump_dir: config.browser.dump_dir.as_ref().map(PathBuf::from),
            restarts: 0,
        })
    }

    /// Loads `url` and returns once the rendered page is usable
    ///
    /// Consent dialogs and "show all" links are handled on a best-effort basis;
    /// failing to find or click them never fails the navigation.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The page is loaded and neither banned nor rate-limited
    /// * `Err(RymError::IpBanned)` - The address is blocked; the browser has been shut down
    /// * `Err(RymError::RateLimited)` - Only when a restart cap is configured and was exhausted
    /// * `Err(RymError::Render)` - The browser itself failed
    pub fn navigate(&mut self, url: &str) -> Result<(), RymError> {
        tracing::debug!("Navigating to {}", url);
        let mut restarts_here = 0;

        loop {
            self.renderer_mut()?.load(url)?;
            self.dismiss_overlays();
            self.expand_sections();

            match PageStatus::classify(&self.current_document()?, &self.markers) {
                PageStatus::Usable => return Ok(()),
                PageStatus::Banned => {
                    tracing::error!(
                        "IP banned from the site while loading {}. No further requests are possible.",
                        url
                    );
                    self.quit();
                    return Err(RymError::IpBanned {
                        url: url.to_string(),
                    });
                }
                PageStatus::RateLimited => {
                    if let Some(max) = self.max_restarts {
                        if restarts_here >= max {
                            tracing::error!(
                                "Rate-limit persists at {} after {} restarts. Giving up.",
                                url,
                                restarts_here
                            );
                            return Err(RymError::RateLimited {
                                url: url.to_string(),
                                restarts: restarts_here,
                            });
                        }
                    }
                    tracing::error!("Rate-limit detected at {}. Restarting browser.", url);
                    self.restart()?;
                    restarts_here += 1;
                }
            }
        }
    }

    /// Parses the current rendered markup
    ///
    /// The page mutates in place, so call this again after every navigation or click.
    pub fn current_document(&self) -> Result<Html, RymError> {
        let source = self.renderer()?.page_source()?;
        Ok(Html::parse_document(&source))
    }

    /// Number of elements currently matching `selector` in the live page
    pub fn count(&self, selector: &str) -> Result<usize, RymError> {
        Ok(self.renderer()?.count(selector)?)
    }

    /// Evaluates `script` in the current page and returns its result as JSON
    pub fn execute_script(&self, script: &str) -> Result<serde_json::Value, RymError> {
        Ok(self.renderer()?.execute_script(script)?)
    }

    /// Scrolls to and clicks the first element matching `selector`, then waits
    /// for the page to re-render
    pub fn click(&mut self, selector: &str) -> Result<(), RymError> {
        let renderer = self.renderer()?;
        renderer.scroll_into_view(selector, 0)?;
        renderer.click(selector, 0)?;
        thread::sleep(self.next_page_pause);
        Ok(())
    }

    /// Replaces the browser with a freshly launched one
    pub fn restart(&mut self) -> Result<(), RymError> {
        self.quit();
        self.renderer = Some(self.launcher.launch()?);
        self.restarts += 1;
        tracing::debug!("Browser restarted ({} restarts so far)", self.restarts);
        Ok(())
    }

    /// Shuts the browser down. Safe to call more than once.
    pub fn quit(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.quit();
        }
    }

    pub fn is_open(&self) -> bool {
        self.renderer.is_some()
    }

    /// Total restarts over the session's lifetime
    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// Directory receiving page dumps, if configured
    pub fn dump_dir(&self) -> Option<&Path> {
        self.dump_dir.as_deref()
    }

    /// Writes the current rendered markup to `path`
    pub fn dump_source(&self, path: &Path) -> Result<(), RymError> {
        let source = self.renderer()?.page_source()?;
        std::fs::write(path, source)?;
        tracing::debug!("Page source written to {}", path.display());
        Ok(())
    }

    fn renderer(&self) -> Result<&L::Renderer, RenderError> {
        self.renderer.as_ref().ok_or(RenderError::Closed)
    }

    fn renderer_mut(&mut self) -> Result<&mut L::Renderer, RenderError> {
        self.renderer.as_mut().ok_or(RenderError::Closed)
    }

    fn dismiss_overlays(&self) {
        let Ok(renderer) = self.renderer() else {
            return;
        };
        for class in &self.markers.consent_buttons {
            let selector = class_selector("", class);
            match renderer.count(&selector) {
                Ok(0) => {}
                Ok(_) => match renderer.click(&selector, 0) {
                    Ok(()) => tracing::debug!("Consent dialog '{}' found. Clicking on ok.", class),
                    Err(e) => tracing::debug!("Could not dismiss '{}': {}", class, e),
                },
                Err(e) => tracing::debug!("Could not look for '{}': {}", class, e),
            }
        }
    }

    fn expand_sections(&self) {
        let Ok(renderer) = self.renderer() else {
            return;
        };
        let selector = class_selector("", &self.markers.expand_link);
        let links = match renderer.count(&selector) {
            Ok(n) => n,
            Err(e) => {
                tracing::debug!("No \"Show all\" links found: {}", e);
                return;
            }
        };

        // Last to first: an expanded link may leave the DOM and shift the ones after it
        for index in (0..links).rev() {
            let clicked = renderer
                .scroll_into_view(&selector, index)
                .and_then(|_| renderer.click(&selector, index));
            if let Err(e) = clicked {
                tracing::debug!("\"Show all\" link {} not expanded: {}", index, e);
                continue;
            }
            thread::sleep(self.expand_pause);
        }
    }
}

impl<L: Launcher> Drop for Session<L> {
    fn drop(&mut self) {
        self.quit();
    }
}
