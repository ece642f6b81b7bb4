use super::error::ConfigError;
use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_ENDPOINT, DEFAULT_NUM_IMAGES, DEFAULT_PROMPT,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration loaded from client.toml
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the generation server
    pub endpoint: String,
    /// Prompt pre-filled in the form
    pub default_prompt: String,
    /// Image count pre-filled in the form
    pub num_images: u32,
    /// Where successful results are downloaded; nothing is saved when unset
    pub output_dir: Option<PathBuf>,
    pub connect_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_prompt: DEFAULT_PROMPT.to_string(),
            num_images: DEFAULT_NUM_IMAGES,
            output_dir: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn with_num_images(mut self, num_images: u32) -> Self {
        self.num_images = num_images;
        self
    }
}
