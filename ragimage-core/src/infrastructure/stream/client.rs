//! SSE client for the `/generate` endpoint

use super::error::{ClientError, describe_stream_error};
use crate::application::session::SessionEvent;
use crate::config::AppConfig;
use crate::constants::{EVENT_LOG, FALLBACK_IMAGE_NAME, GENERATE_PATH};
use crate::domain::events::{GenerationOutcome, StreamEvent};
use crate::domain::request::GenerateRequest;
use futures::StreamExt;
use reqwest::Client;
use reqwest_eventsource::retry::Never;
use reqwest_eventsource::{Event, EventSource};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

const USER_AGENT: &str = concat!("ragimage/", env!("CARGO_PKG_VERSION"));

/// Client for one generation server
#[derive(Clone)]
pub struct GenerateClient {
    endpoint: String,
    http: Client,
}

impl GenerateClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_http(endpoint, Client::new())
    }

    /// Creates client from application config.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(ClientError::Build)?;
        Self::with_http(config.endpoint.clone(), http)
    }

    fn with_http(endpoint: impl Into<String>, http: Client) -> Result<Self, ClientError> {
        let endpoint = endpoint.into();
        Url::parse(&endpoint).map_err(|source| ClientError::InvalidEndpoint {
            endpoint: endpoint.clone(),
            source,
        })?;
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build URL from endpoint and path
    fn build_url(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}"))
    }

    /// `<endpoint>/generate?prompt=...&num_images=...`
    pub fn generate_url(&self, request: &GenerateRequest) -> Result<Url, ClientError> {
        let mut url = self
            .build_url(GENERATE_PATH)
            .map_err(|source| ClientError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                source,
            })?;
        url.query_pairs_mut()
            .append_pair("prompt", &request.prompt)
            .append_pair("num_images", &request.num_images.to_string());
        Ok(url)
    }

    /// Resolve the `image_path` of a successful result against the endpoint.
    /// Absolute URLs are returned unchanged.
    pub fn resolve_image_url(&self, image_path: &str) -> Result<Url, ClientError> {
        let invalid = |source| ClientError::InvalidImagePath {
            path: image_path.to_string(),
            source,
        };
        if image_path.starts_with("http://") || image_path.starts_with("https://") {
            return Url::parse(image_path).map_err(invalid);
        }
        self.build_url(image_path).map_err(invalid)
    }

    /// Run one request to completion, forwarding events to `tx`.
    ///
    /// Exactly one terminal event (`Complete` or `ConnectionLost`) is sent
    /// unless the receiver goes away first. The source is closed afterwards
    /// and never reconnects.
    pub async fn stream(&self, request: GenerateRequest, tx: mpsc::Sender<SessionEvent>) {
        let url = match self.generate_url(&request) {
            Ok(url) => url,
            Err(err) => {
                let _ = tx.send(SessionEvent::ConnectionLost(err.user_message())).await;
                return;
            }
        };

        info!(endpoint = self.endpoint.as_str(), num_images = request.num_images, "Opening event stream");
        let mut source = match EventSource::new(self.http.get(url)) {
            Ok(source) => source,
            Err(err) => {
                let _ = tx.send(SessionEvent::ConnectionLost(err.to_string())).await;
                return;
            }
        };
        source.set_retry_policy(Box::new(Never));

        while let Some(item) = source.next().await {
            let event = match item {
                Ok(Event::Open) => {
                    debug!("Event stream opened");
                    continue;
                }
                Ok(Event::Message(message)) => {
                    match StreamEvent::decode(&message.event, &message.data) {
                        Ok(Some(event)) => SessionEvent::from(event),
                        Ok(None) => {
                            debug!(event = message.event.as_str(), "Ignoring unhandled event");
                            continue;
                        }
                        Err(err) if err.event() == EVENT_LOG => {
                            warn!(error = %err, "Skipping malformed log event");
                            continue;
                        }
                        Err(err) => SessionEvent::Complete(GenerationOutcome::Failure {
                            error: err.to_string(),
                        }),
                    }
                }
                Err(err) => {
                    source.close();
                    let reason = describe_stream_error(&self.endpoint, &err);
                    warn!(error = %err, "Event stream failed");
                    let _ = tx.send(SessionEvent::ConnectionLost(reason)).await;
                    return;
                }
            };

            let terminal = !matches!(event, SessionEvent::Log(_));
            if tx.send(event).await.is_err() {
                debug!("Receiver dropped, closing event stream");
                source.close();
                return;
            }
            if terminal {
                debug!("Terminal event received, closing event stream");
                source.close();
                return;
            }
        }

        let _ = tx
            .send(SessionEvent::ConnectionLost(
                "stream closed before the result arrived".to_string(),
            ))
            .await;
    }

    /// Download a result image into `output_dir`, returning the written path.
    pub async fn download_image(
        &self,
        image_path: &str,
        output_dir: &Path,
    ) -> Result<PathBuf, ClientError> {
        let url = self.resolve_image_url(image_path)?;
        let target = output_dir.join(file_name_for(&url));

        debug!(url = %url, "Downloading generated image");
        let bytes = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ClientError::http(url.as_str(), e))?
            .error_for_status()
            .map_err(|e| ClientError::http(url.as_str(), e))?
            .bytes()
            .await
            .map_err(|e| ClientError::http(url.as_str(), e))?;

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| ClientError::Io {
                path: output_dir.to_path_buf(),
                source,
            })?;
        tokio::fs::write(&target, &bytes)
            .await
            .map_err(|source| ClientError::Io {
                path: target.clone(),
                source,
            })?;

        info!(path = %target.display(), bytes = bytes.len(), "Saved generated image");
        Ok(target)
    }
}

fn file_name_for(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_IMAGE_NAME.to_string())
}
