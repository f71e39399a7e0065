use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;
use toml::{Table, Value};

/// A configuration file as read from disk
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// Hex-encoded SHA-256 of the file content
    pub hash: String,
    /// Every marker the file sets, as `table.key` (`chart.row`)
    pub marker_overrides: Vec<String>,
}

/// Loads and parses a configuration file from the given path
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    Ok(read_config(path)?.config)
}

/// Loads a configuration together with its hash and marker overrides
///
/// The hash is logged at startup so an export can be tied back to the marker
/// set it was produced with. Marker keys the scraper does not know are
/// reported as warnings; they would otherwise be dropped silently.
pub fn read_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Computes a SHA-256 hash of the configuration file content
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

fn parse_config(content: &str) -> Result<LoadedConfig, ConfigError> {
    let raw: Table = content.parse()?;
    let marker_overrides = marker_overrides(&raw);
    let config: Config = Value::Table(raw).try_into()?;
    validate(&config)?;

    for key in unknown_markers(&config, &marker_overrides) {
        tracing::warn!("Unknown marker '{}' in configuration, ignored", key);
    }

    Ok(LoadedConfig {
        config,
        hash: hash_content(content),
        marker_overrides,
    })
}

fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

fn marker_overrides(raw: &Table) -> Vec<String> {
    let Some(Value::Table(tables)) = raw.get("markers") else {
        return Vec::new();
    };
    let mut overrides: Vec<String> = tables
        .iter()
        .flat_map(|(table, value)| match value {
            Value::Table(keys) => keys.keys().map(|key| format!("{}.{}", table, key)).collect(),
            _ => vec![table.clone()],
        })
        .collect();
    overrides.sort();
    overrides
}

fn unknown_markers<'a>(config: &Config, overrides: &'a [String]) -> Vec<&'a str> {
    let known = config.markers.labelled();
    overrides
        .iter()
        .map(String::as_str)
        .filter(|key| *key != "session.consent-buttons")
        .filter(|key| !known.iter().any(|(label, _)| label == key))
        .collect()
}
