//! Client error types

use reqwest::StatusCode;
use reqwest_eventsource::Error as EventSourceError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid image path '{path}': {source}")]
    InvalidImagePath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to write image to {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ClientError {
    pub fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.into(),
            source,
        }
    }

    /// Short message suitable for a status line
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http { url, source } => describe_http_error(url, source),
            other => other.to_string(),
        }
    }
}

/// Human-readable reason for a failed event stream
pub fn describe_stream_error(endpoint: &str, err: &EventSourceError) -> String {
    match err {
        EventSourceError::Transport(source) => describe_http_error(endpoint, source),
        EventSourceError::InvalidStatusCode(status, _) => describe_status(endpoint, *status),
        EventSourceError::InvalidContentType(content_type, _) => format!(
            "server at {endpoint} did not return an event stream (content type {:?})",
            content_type
        ),
        EventSourceError::StreamEnded => "stream closed before the result arrived".to_string(),
        other => format!("event stream error: {other}"),
    }
}

fn describe_http_error(endpoint: &str, source: &reqwest::Error) -> String {
    if source.is_connect() {
        format!("unable to connect to {endpoint}")
    } else if source.is_timeout() {
        format!("request to {endpoint} timed out")
    } else if let Some(status) = source.status() {
        describe_status(endpoint, status)
    } else {
        format!("network error talking to {endpoint}: {source}")
    }
}

fn describe_status(endpoint: &str, status: StatusCode) -> String {
    match status {
        StatusCode::NOT_FOUND => format!("{endpoint} was not found (HTTP 404)"),
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
            format!("server at {endpoint} is unavailable (HTTP {})", status.as_u16())
        }
        _ => format!("server at {endpoint} returned HTTP {}", status.as_u16()),
    }
}
