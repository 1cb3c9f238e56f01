//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file if one is present (via `dotenvy`)
//! 2. Attempts to load from environment variables
//! 3. If `NAMECAST_DB_PATH` is unset, falls back to loading from file
//! 4. Probes multiple paths for config files (JSON or TOML)
//! 5. With no file anywhere, uses built-in defaults
//!
//! `NAMECAST_ADMIN_TOKEN` is applied on top of whichever source won, so the
//! token can stay out of config files.
//!
//! ## Environment Variables
//! - `NAMECAST_DB_PATH`: Database file path (required for env loading)
//! - `NAMECAST_DB_POOL_SIZE`: Connection pool size
//! - `NAMECAST_BIND_ADDR`: HTTP listen address
//! - `NAMECAST_ADMIN_TOKEN`: Bearer token for administrative endpoints
//! - `NAMECAST_PAGE_SIZE`: Users per batch page
//! - `NAMECAST_REQUEST_TIMEOUT_SECS`: Per-page client timeout
//! - `NAMECAST_BATCH_ENDPOINT`: Base URL the batch client talks to
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./namecast.json` or `./namecast.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use namecast_domain::{Config, NamecastError, Result};

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `NamecastError::Configuration` if a source is present but
/// malformed.
pub fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let mut config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path))?,
                None => {
                    tracing::warn!("No configuration found; using defaults");
                    Config::default()
                }
            }
        }
    };

    if let Ok(token) = std::env::var("NAMECAST_ADMIN_TOKEN") {
        config.server.admin_token = Some(token);
    }

    Ok(config)
}

/// Load configuration from environment variables
///
/// `NAMECAST_DB_PATH` must be set; everything else falls back to defaults.
///
/// # Errors
/// Returns `NamecastError::Configuration` if the database path is missing
/// or a numeric variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.database.path = env_var("NAMECAST_DB_PATH")?;
    if let Some(pool_size) = env_parse::<u32>("NAMECAST_DB_POOL_SIZE", "pool size")? {
        config.database.pool_size = pool_size;
    }

    if let Ok(bind_addr) = std::env::var("NAMECAST_BIND_ADDR") {
        config.server.bind_addr = bind_addr;
    }
    config.server.admin_token = std::env::var("NAMECAST_ADMIN_TOKEN").ok();

    if let Some(page_size) = env_parse::<u32>("NAMECAST_PAGE_SIZE", "page size")? {
        config.batch.page_size = page_size;
    }
    if let Some(timeout) =
        env_parse::<u64>("NAMECAST_REQUEST_TIMEOUT_SECS", "request timeout")?
    {
        config.batch.request_timeout_secs = timeout;
    }
    if let Ok(endpoint) = std::env::var("NAMECAST_BATCH_ENDPOINT") {
        config.batch.endpoint = endpoint;
    }

    validate(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `NamecastError::Configuration` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(NamecastError::Configuration(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            NamecastError::Configuration(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| NamecastError::Configuration(format!("Failed to read config file: {e}")))?;

    validate(parse_config(&contents, &config_path)?)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| NamecastError::Configuration(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| NamecastError::Configuration(format!("Invalid JSON format: {e}"))),
        _ => Err(NamecastError::Configuration(format!(
            "Unsupported config format: {extension}"
        ))),
    }
}

fn validate(config: Config) -> Result<Config> {
    if config.batch.page_size == 0 {
        return Err(NamecastError::Configuration("page size must be positive".into()));
    }
    if config.database.path.trim().is_empty() {
        return Err(NamecastError::Configuration("database path must not be empty".into()));
    }
    Ok(config)
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("namecast.json"),
        dir.join("namecast.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        NamecastError::Configuration(format!("Missing required environment variable: {key}"))
    })
}

/// Parse an optional numeric environment variable.
fn env_parse<T>(key: &str, label: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| NamecastError::Configuration(format!("Invalid {label}: {e}"))),
        Err(_) => Ok(None),
    }
}
