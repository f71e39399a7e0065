//! Renderer capability traits
//!
//! The session controller holds a renderer rather than being one, so the
//! browser can be swapped for a scripted fake in tests.

use thiserror::Error;

/// Errors raised by a page renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Element '{selector}' unavailable: {message}")]
    Element { selector: String, message: String },

    #[error("Script failed: {0}")]
    Script(String),

    #[error("Browser session is closed")]
    Closed,
}

/// A loaded browser context able to render pages and drive their UI
///
/// Elements are addressed by CSS selector plus the index of the match in
/// document order.
pub trait PageRenderer {
    /// Navigates to `url` and blocks until the DOM has settled
    fn load(&mut self, url: &str) -> Result<(), RenderError>;

    /// Returns the current rendered markup
    fn page_source(&self) -> Result<String, RenderError>;

    /// Number of elements matching `selector`
    fn count(&self, selector: &str) -> Result<usize, RenderError>;

    /// Clicks the `index`-th element matching `selector`
    fn click(&self, selector: &str, index: usize) -> Result<(), RenderError>;

    /// Scrolls the `index`-th element matching `selector` into the viewport
    fn scroll_into_view(&self, selector: &str, index: usize) -> Result<(), RenderError>;

    /// Evaluates a script in the page and returns its JSON-converted result
    fn execute_script(&self, script: &str) -> Result<serde_json::Value, RenderError>;

    /// Tears the browser down. Further calls fail with `RenderError::Closed`.
    fn quit(&mut self);
}

/// Creates renderers with a fixed configuration
///
/// Called once when a session starts and again on every restart.
pub trait Launcher {
    type Renderer: PageRenderer;

    fn launch(&self) -> Result<Self::Renderer, RenderError>;
}
