//! Wire payloads of the `/generate` event stream

use crate::constants::{EVENT_COMPLETE, EVENT_LOG};
use serde::Deserialize;
use thiserror::Error;

/// Payload of a `log` event
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LogPayload {
    pub message: String,
}

/// Payload of a `complete` event as sent by the server
#[derive(Debug, Clone, Deserialize)]
struct CompletePayload {
    success: bool,
    #[serde(default)]
    image_path: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Terminal result of one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success { image_path: String },
    Failure { error: String },
}

/// A decoded event the controller cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Log(String),
    Complete(GenerationOutcome),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid '{event}' payload: {source}")]
    InvalidJson {
        event: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("successful completion is missing 'image_path'")]
    MissingImagePath,
}

impl DecodeError {
    /// Name of the event whose payload failed to decode
    pub fn event(&self) -> &str {
        match self {
            DecodeError::InvalidJson { event, .. } => event,
            DecodeError::MissingImagePath => EVENT_COMPLETE,
        }
    }
}

impl StreamEvent {
    /// Decode one named event. Event names other than `log` and `complete`
    /// yield `Ok(None)`.
    pub fn decode(event: &str, data: &str) -> Result<Option<Self>, DecodeError> {
        match event {
            EVENT_LOG => {
                let payload: LogPayload = parse(event, data)?;
                Ok(Some(StreamEvent::Log(payload.message)))
            }
            EVENT_COMPLETE => {
                let payload: CompletePayload = parse(event, data)?;
                Ok(Some(StreamEvent::Complete(payload.into_outcome()?)))
            }
            _ => Ok(None),
        }
    }
}

impl CompletePayload {
    fn into_outcome(self) -> Result<GenerationOutcome, DecodeError> {
        if self.success {
            let image_path = self
                .image_path
                .filter(|p| !p.trim().is_empty())
                .ok_or(DecodeError::MissingImagePath)?;
            Ok(GenerationOutcome::Success { image_path })
        } else {
            Ok(GenerationOutcome::Failure {
                error: self.error.unwrap_or_else(|| "unknown error".to_string()),
            })
        }
    }
}

fn parse<T: for<'de> Deserialize<'de>>(event: &str, data: &str) -> Result<T, DecodeError> {
    serde_json::from_str(data).map_err(|source| DecodeError::InvalidJson {
        event: event.to_string(),
        source,
    })
}
