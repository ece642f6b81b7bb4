//! Client side of the ragimage generation server.
//!
//! A prompt is submitted to `/generate`, progress arrives as `log` server-sent
//! events, and a single `complete` event ends the request. The
//! [`GenerationSession`] state machine turns those events into the status,
//! log and result views that the front ends render.

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use application::session::{
    Flow, GenerationSession, Phase, ResultView, SessionEvent, StatusTone,
};
pub use config::{AppConfig, ConfigError};
pub use domain::events::{DecodeError, GenerationOutcome, StreamEvent};
pub use domain::request::{GenerateRequest, RequestError};
pub use infrastructure::stream::{ClientError, GenerateClient};
