//! Request/stream controller state
//!
//! `GenerationSession` holds everything a front end shows for one
//! submission: the status line and its tone, the log buffer, the result area
//! and whether the submit control is enabled. It is fed `SessionEvent`s in
//! arrival order and has no I/O of its own.

use crate::constants::{
    ERROR_HINT, ERROR_TITLE, IMAGE_ALT, STATUS_COMPLETE, STATUS_CONNECTION_ERROR,
    STATUS_GENERATING, STATUS_READY,
};
use crate::domain::events::{GenerationOutcome, StreamEvent};
use crate::domain::request::GenerateRequest;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Input to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Progress line from a `log` event
    Log(String),
    /// Terminal result from a `complete` event
    Complete(GenerationOutcome),
    /// The stream failed or ended before a result arrived
    ConnectionLost(String),
}

impl From<StreamEvent> for SessionEvent {
    fn from(event: StreamEvent) -> Self {
        match event {
            StreamEvent::Log(message) => SessionEvent::Log(message),
            StreamEvent::Complete(outcome) => SessionEvent::Complete(outcome),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Generating,
    Succeeded,
    Failed,
}

/// Colour family of the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Success,
    Error,
}

/// Content of the result area once it is revealed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Image {
        src: String,
        alt: String,
    },
    Error {
        title: String,
        message: String,
        hint: String,
    },
}

/// Whether the stream should keep being read after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Finished,
}

#[derive(Debug, Clone)]
pub struct GenerationSession {
    phase: Phase,
    status_text: String,
    tone: StatusTone,
    log: String,
    result: Option<ResultView>,
    request: Option<GenerateRequest>,
    request_id: Option<Uuid>,
    connection_error: Option<String>,
}

impl Default for GenerationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            status_text: STATUS_READY.to_string(),
            tone: StatusTone::Neutral,
            log: String::new(),
            result: None,
            request: None,
            request_id: None,
            connection_error: None,
        }
    }

    /// Start a submission: disable submit, clear previous output and hide the
    /// result area.
    pub fn begin(&mut self, request: &GenerateRequest) -> Uuid {
        let request_id = Uuid::new_v4();
        info!(
            request_id = %request_id,
            num_images = request.num_images,
            prompt_len = request.prompt.len(),
            "Starting generation request"
        );
        self.phase = Phase::Generating;
        self.status_text = STATUS_GENERATING.to_string();
        self.tone = StatusTone::Neutral;
        self.log.clear();
        self.result = None;
        self.request = Some(request.clone());
        self.request_id = Some(request_id);
        self.connection_error = None;
        request_id
    }

    /// Feed one event. Events that arrive while nothing is in flight are
    /// dropped.
    pub fn apply(&mut self, event: SessionEvent) -> Flow {
        if !self.is_in_flight() {
            debug!(?event, phase = ?self.phase, "Ignoring event outside of a request");
            return Flow::Finished;
        }
        match event {
            SessionEvent::Log(message) => {
                self.append_log(&message);
                Flow::Continue
            }
            SessionEvent::Complete(outcome) => {
                self.complete(outcome);
                Flow::Finished
            }
            SessionEvent::ConnectionLost(reason) => {
                self.connection_lost(reason);
                Flow::Finished
            }
        }
    }

    /// Append one progress message followed by a line break.
    pub fn append_log(&mut self, message: &str) {
        self.log.push_str(message);
        self.log.push('\n');
    }

    pub fn complete(&mut self, outcome: GenerationOutcome) {
        match outcome {
            GenerationOutcome::Success { image_path } => {
                info!(
                    request_id = ?self.request_id,
                    image_path = image_path.as_str(),
                    "Generation completed"
                );
                self.phase = Phase::Succeeded;
                self.status_text = STATUS_COMPLETE.to_string();
                self.tone = StatusTone::Success;
                self.result = Some(ResultView::Image {
                    src: image_path,
                    alt: IMAGE_ALT.to_string(),
                });
            }
            GenerationOutcome::Failure { error } => {
                warn!(request_id = ?self.request_id, error = error.as_str(), "Generation failed");
                self.phase = Phase::Failed;
                self.status_text = format!("Error: {error}");
                self.tone = StatusTone::Error;
                self.result = Some(ResultView::Error {
                    title: ERROR_TITLE.to_string(),
                    message: error,
                    hint: ERROR_HINT.to_string(),
                });
            }
        }
    }

    /// Transport failure: generic status, result area stays hidden.
    pub fn connection_lost(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(request_id = ?self.request_id, reason = reason.as_str(), "Connection lost");
        self.phase = Phase::Failed;
        self.status_text = STATUS_CONNECTION_ERROR.to_string();
        self.tone = StatusTone::Error;
        self.connection_error = Some(reason);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == Phase::Generating
    }

    pub fn submit_enabled(&self) -> bool {
        !self.is_in_flight()
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn tone(&self) -> StatusTone {
        self.tone
    }

    /// Raw display buffer, one `\n`-terminated line per log event
    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn log_lines(&self) -> impl Iterator<Item = &str> {
        self.log.lines()
    }

    pub fn log_line_count(&self) -> usize {
        self.log.lines().count()
    }

    pub fn result(&self) -> Option<&ResultView> {
        self.result.as_ref()
    }

    pub fn result_visible(&self) -> bool {
        self.result.is_some()
    }

    /// Image location of a successful result
    pub fn image_path(&self) -> Option<&str> {
        match &self.result {
            Some(ResultView::Image { src, .. }) => Some(src),
            _ => None,
        }
    }

    pub fn request(&self) -> Option<&GenerateRequest> {
        self.request.as_ref()
    }

    pub fn request_id(&self) -> Option<Uuid> {
        self.request_id
    }

    pub fn connection_error(&self) -> Option<&str> {
        self.connection_error.as_deref()
    }
}
