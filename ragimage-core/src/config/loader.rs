use super::AppConfig;
use super::error::ConfigError;
use crate::constants::{CONFIG_PATH, ENV_ENDPOINT, ENV_OUTPUT_DIR, ENV_PATH, MAX_NUM_IMAGES};
use dotenvy::from_filename;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::debug;
use url::Url;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct RawConfig {
    pub endpoint: Option<String>,
    pub default_prompt: Option<String>,
    pub num_images: Option<u32>,
    pub output_dir: Option<String>,
    pub connect_timeout_secs: Option<u64>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load and validate configuration from a file path.
///
/// An explicit path must exist. When no path is given the default location
/// is tried and built-in defaults are used if it is absent.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    load_config_with_env(path, |key| env::var(key).ok())
}

/// Same as [`load_config`] with the environment supplied by `lookup`.
pub fn load_config_with_env<F>(path: Option<&Path>, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match path {
        Some(path) => read_config(path)?,
        None => match read_config(Path::new(CONFIG_PATH)) {
            Err(ConfigError::NotFound { path }) => {
                debug!(path = %path.display(), "No configuration file, using defaults");
                RawConfig::default()
            }
            other => other?,
        },
    };
    build(apply_env_overrides(raw, lookup))
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str, path: &Path) -> Result<AppConfig, ConfigError> {
    let raw = parse_raw(content, path)?;
    build(raw)
}

/// Check values that may have been changed after loading, e.g. by CLI flags
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.endpoint).map_err(|source| ConfigError::InvalidEndpoint {
        endpoint: config.endpoint.clone(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            endpoint: config.endpoint.clone(),
        });
    }
    if config.num_images == 0 || config.num_images > MAX_NUM_IMAGES {
        return Err(ConfigError::InvalidNumImages {
            value: config.num_images,
            max: MAX_NUM_IMAGES,
        });
    }
    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::InvalidConnectTimeout);
    }
    Ok(())
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(raw: &str) -> PathBuf {
    let expanded = shellexpand::full(raw)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    PathBuf::from(expanded)
}

fn read_config(path: &Path) -> Result<RawConfig, ConfigError> {
    debug!(path = %path.display(), "Reading client configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_raw(&content, path)
}

fn parse_raw(content: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_env_overrides<F>(mut raw: RawConfig, lookup: F) -> RawConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
        debug!(endpoint = endpoint.as_str(), "Endpoint overridden from environment");
        raw.endpoint = Some(endpoint);
    }
    if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.trim().is_empty()) {
        debug!(output_dir = dir.as_str(), "Output directory overridden from environment");
        raw.output_dir = Some(dir);
    }
    raw
}

fn build(raw: RawConfig) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();
    let config = AppConfig {
        endpoint: raw
            .endpoint
            .map(|e| e.trim().to_string())
            .unwrap_or(defaults.endpoint),
        default_prompt: raw.default_prompt.unwrap_or(defaults.default_prompt),
        num_images: raw.num_images.unwrap_or(defaults.num_images),
        output_dir: raw.output_dir.as_deref().map(expand_path),
        connect_timeout_secs: raw
            .connect_timeout_secs
            .unwrap_or(defaults.connect_timeout_secs),
    };
    validate(&config)?;
    Ok(config)
}
