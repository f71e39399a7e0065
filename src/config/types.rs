use crate::config::markers::Markers;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Default site root
pub const DEFAULT_BASE_URL: &str = "https://rateyourmusic.com";

/// Main configuration structure for rym-scraper
///
/// Every section and key has a default, so an empty file (or no file at all)
/// yields a working configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: BrowserConfig,
    pub site: SiteConfig,
    pub output: OutputConfig,
    pub markers: Markers,
}

/// Browser session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run the browser without a visible window
    pub headless: bool,

    /// Pause after each "show all" disclosure click (milliseconds)
    #[serde(rename = "expand-pause-ms")]
    pub expand_pause_ms: u64,

    /// Pause after clicking an in-page "next" control (milliseconds)
    #[serde(rename = "next-page-pause-ms")]
    pub next_page_pause_ms: u64,

    /// Optional cap on rate-limit restarts for a single navigation.
    /// Unset means restart until the page is usable.
    #[serde(rename = "max-restarts")]
    pub max_restarts: Option<u32>,

    /// Directory receiving page source dumps when a page cannot be parsed
    #[serde(rename = "dump-dir")]
    pub dump_dir: Option<String>,
}

impl BrowserConfig {
    pub fn expand_pause(&self) -> Duration {
        Duration::from_millis(self.expand_pause_ms)
    }

    pub fn next_page_pause(&self) -> Duration {
        Duration::from_millis(self.next_page_pause_ms)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            expand_pause_ms: 200,
            next_page_pause_ms: 2000,
            max_restarts: None,
            dump_dir: None,
        }
    }
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root URL every relative link and search URL is built from
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl SiteConfig {
    /// Parses the configured root URL
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Export format for the command-line tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Tab-separated values with a header row
    #[default]
    Tsv,
    /// Pretty-printed JSON array of objects
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory export files are written to
    pub directory: String,

    /// Export file format
    pub format: ExportFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "Exports".to_string(),
            format: ExportFormat::Tsv,
        }
    }
}
