//! rym-scraper: a browser-driven scraper for rateyourmusic.com
//!
//! This crate drives a headless browser through the site's artist, album, chart and
//! discography pages, extracts structured fields from the rendered markup and returns
//! them as ordered records ready for tabular export.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod resolve;
pub mod session;
pub mod state;
pub mod url;

use thiserror::Error;

pub use session::RenderError;

/// Main error type for rym-scraper operations
#[derive(Debug, Error)]
pub enum RymError {
    #[error("IP banned by the site while loading {url}")]
    IpBanned { url: String },

    #[error("Still rate-limited at {url} after {restarts} browser restarts")]
    RateLimited { url: String, restarts: u32 },

    #[error("Renderer error: {0}")]
    Render(#[from] RenderError),

    #[error("No {what} found for '{name}'")]
    NotFound { what: &'static str, name: String },

    #[error("Invalid name '{0}': expected the \"Artist - Album\" format")]
    InvalidName(String),

    #[error("No urls or names given")]
    NoTargets,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a chart URL: {0}")]
    InvalidChartUrl(String),
}

impl RymError {
    /// Returns true if the error must abort the whole job
    ///
    /// Only the IP ban is fatal: nothing else can be done from this network
    /// address, so batch operations stop instead of moving on to the next input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::IpBanned { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for rym-scraper operations
pub type Result<T> = std::result::Result<T, RymError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, Target};
pub use extract::{FieldValue, Record, NOT_AVAILABLE};
pub use session::{ChromeLauncher, Launcher, PageRenderer, Session};
pub use state::{PageStatus, WalkState};
pub use url::ChartQuery;
