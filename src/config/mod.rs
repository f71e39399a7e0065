//! Configuration module for rym-scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; `Config::default()` matches the site as it is today.
//!
//! # Example
//!
//! ```no_run
//! use rym_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("rym.toml")).unwrap();
//! println!("Headless browser: {}", config.browser.headless);
//! ```

pub mod markers;
mod parser;
mod types;
mod validation;

// Re-export types
pub use markers::{
    AlbumMarkers, ArtistMarkers, ChartMarkers, DiscographyMarkers, Markers, SearchMarkers,
    SessionMarkers, TimelineMarkers,
};
pub use types::{BrowserConfig, Config, ExportFormat, OutputConfig, SiteConfig, DEFAULT_BASE_URL};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, read_config, LoadedConfig};
pub use validation::validate;
