//! Application constants
//!
//! Single source of truth for paths, wire names and user-facing strings.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/client.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Generation server used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

/// Prompt offered when the user has not typed one yet
pub const DEFAULT_PROMPT: &str = "A car in the mountains at sunset";

pub const DEFAULT_NUM_IMAGES: u32 = 3;
pub const MAX_NUM_IMAGES: u32 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Streaming endpoint path
pub const GENERATE_PATH: &str = "generate";

/// Event names emitted by the server
pub const EVENT_LOG: &str = "log";
pub const EVENT_COMPLETE: &str = "complete";

/// Environment overrides
pub const ENV_ENDPOINT: &str = "RAGIMAGE_ENDPOINT";
pub const ENV_OUTPUT_DIR: &str = "RAGIMAGE_OUTPUT_DIR";

pub const STATUS_READY: &str = "Ready";
pub const STATUS_GENERATING: &str = "Generating image...";
pub const STATUS_COMPLETE: &str = "Image generation complete!";
pub const STATUS_CONNECTION_ERROR: &str = "Connection error. Please try again.";

pub const IMAGE_ALT: &str = "Generated image";
pub const ERROR_TITLE: &str = "Error";
pub const ERROR_HINT: &str = "Please try a different prompt or adjust the number of images.";

/// File name used when an image URL has no usable last segment
pub const FALLBACK_IMAGE_NAME: &str = "generated.jpeg";
