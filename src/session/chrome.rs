//! Headless Chrome renderer
//!
//! Drives a local Chrome/Chromium over the DevTools protocol. All calls block
//! the calling thread until the browser answers.

use crate::config::BrowserConfig;
use crate::session::renderer::{Launcher, PageRenderer, RenderError};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;

/// Launches Chrome with a fixed headless setting
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    headless: bool,
}

impl ChromeLauncher {
    pub fn new(headless: bool) -> Self {
        Self { headless }
    }

    pub fn from_config(config: &BrowserConfig) -> Self {
        Self::new(config.headless)
    }
}

impl Launcher for ChromeLauncher {
    type Renderer = ChromeRenderer;

    fn launch(&self) -> Result<ChromeRenderer, RenderError> {
        tracing::debug!("Starting browser: headless = {}", self.headless);

        let browser = Browser::new(LaunchOptions {
            headless: self.headless,
            ..Default::default()
        })
        .map_err(|e| RenderError::Launch(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| RenderError::Launch(format!("Failed to create tab: {}", e)))?;

        Ok(ChromeRenderer {
            browser: Some(browser),
            tab,
        })
    }
}

/// One browser process with a single tab
pub struct ChromeRenderer {
    browser: Option<Browser>,
    tab: Arc<Tab>,
}

impl ChromeRenderer {
    fn tab(&self) -> Result<&Arc<Tab>, RenderError> {
        match self.browser {
            Some(_) => Ok(&self.tab),
            None => Err(RenderError::Closed),
        }
    }

    fn element_error(selector: &str, error: impl std::fmt::Display) -> RenderError {
        RenderError::Element {
            selector: selector.to_string(),
            message: error.to_string(),
        }
    }
}

impl PageRenderer for ChromeRenderer {
    fn load(&mut self, url: &str) -> Result<(), RenderError> {
        let navigation_error = |e: anyhow::Error| RenderError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        };

        let tab = self.tab()?;
        tab.navigate_to(url).map_err(navigation_error)?;
        tab.wait_until_navigated().map_err(navigation_error)?;
        Ok(())
    }

    fn page_source(&self) -> Result<String, RenderError> {
        self.tab()?
            .get_content()
            .map_err(|e| RenderError::Script(format!("Failed to read page source: {}", e)))
    }

    fn count(&self, selector: &str) -> Result<usize, RenderError> {
        // querySelectorAll instead of find_elements: the latter errors on zero matches
        let literal = serde_json::to_string(selector)
            .map_err(|e| Self::element_error(selector, e))?;
        let value = self.execute_script(&format!("document.querySelectorAll({}).length", literal))?;
        Ok(value.as_u64().unwrap_or(0) as usize)
    }

    fn click(&self, selector: &str, index: usize) -> Result<(), RenderError> {
        let elements = self
            .tab()?
            .find_elements(selector)
            .map_err(|e| Self::element_error(selector, e))?;
        let element = elements
            .get(index)
            .ok_or_else(|| Self::element_error(selector, format!("no match at index {}", index)))?;
        element
            .click()
            .map_err(|e| Self::element_error(selector, e))?;
        Ok(())
    }

    fn scroll_into_view(&self, selector: &str, index: usize) -> Result<(), RenderError> {
        let elements = self
            .tab()?
            .find_elements(selector)
            .map_err(|e| Self::element_error(selector, e))?;
        let element = elements
            .get(index)
            .ok_or_else(|| Self::element_error(selector, format!("no match at index {}", index)))?;
        element
            .scroll_into_view()
            .map_err(|e| Self::element_error(selector, e))?;
        Ok(())
    }

    fn execute_script(&self, script: &str) -> Result<serde_json::Value, RenderError> {
        let result = self
            .tab()?
            .evaluate(script, false)
            .map_err(|e| RenderError::Script(e.to_string()))?;
        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }

    fn quit(&mut self) {
        if self.browser.take().is_some() {
            tracing::debug!("Browser closed");
        }
    }
}
