use crate::config::types::{BrowserConfig, Config, OutputConfig, SiteConfig};
use crate::config::Markers;
use crate::ConfigError;

/// Longest pause accepted for any of the browser pauses
const MAX_PAUSE_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_browser_config(&config.browser)?;
    validate_site_config(&config.site)?;
    validate_output_config(&config.output)?;
    validate_markers(&config.markers)?;
    Ok(())
}

fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("expand-pause-ms", config.expand_pause_ms),
        ("next-page-pause-ms", config.next_page_pause_ms),
    ] {
        if value > MAX_PAUSE_MS {
            return Err(ConfigError::Validation(format!(
                "{} must be <= {}ms, got {}ms",
                name, MAX_PAUSE_MS, value
            )));
        }
    }

    if config.max_restarts == Some(0) {
        return Err(ConfigError::Validation(
            "max-restarts must be >= 1 when set".to_string(),
        ));
    }

    if let Some(dir) = &config.dump_dir {
        if dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "dump-dir cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = config
        .base_url()
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            config.base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url has no host: '{}'",
            config.base_url
        )));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Every marker is spliced into a CSS selector, so none may be blank
fn validate_markers(markers: &Markers) -> Result<(), ConfigError> {
    for (label, value) in markers.labelled() {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "marker {} cannot be empty",
                label
            )));
        }
    }

    if markers
        .session
        .consent_buttons
        .iter()
        .any(|class| class.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "marker session.consent-buttons cannot contain empty entries".to_string(),
        ));
    }

    Ok(())
}
