//! Generation screen runner - main event loop coordinator

use super::input::{InputAction, handle_input};
use super::state::GenerateState;
use super::ui::GenerateUI;
use crate::tui::terminal::{Tui, init_terminal, restore_terminal};
use crossterm::event;
use ragimage_core::{AppConfig, Flow, GenerateClient, SessionEvent};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

const EVENT_BUFFER: usize = 64;

/// Result of a screen session
pub enum GenerateResult {
    Exit,
    Error(String),
}

/// Outcome of a background image download
enum DownloadEvent {
    Saved(PathBuf),
    Failed(String),
}

/// Run the generation screen
pub async fn run_generate(
    client: Arc<GenerateClient>,
    config: &AppConfig,
) -> Result<GenerateResult, Box<dyn Error>> {
    let mut terminal = init_terminal()?;
    let mut state = GenerateState::new(config);

    let result = run_loop(&mut terminal, &mut state, client, config.output_dir.clone()).await;

    restore_terminal()?;
    result
}

async fn run_loop(
    terminal: &mut Tui,
    state: &mut GenerateState,
    client: Arc<GenerateClient>,
    output_dir: Option<PathBuf>,
) -> Result<GenerateResult, Box<dyn Error>> {
    let (download_tx, mut download_rx) = mpsc::channel::<DownloadEvent>(4);
    let mut events: Option<mpsc::Receiver<SessionEvent>> = None;

    loop {
        terminal.draw(|frame| GenerateUI::render(frame, state, client.endpoint()))?;

        let mut finished = false;
        if let Some(rx) = events.as_mut() {
            while let Ok(event) = rx.try_recv() {
                let is_log = matches!(event, SessionEvent::Log(_));
                if is_log {
                    state.scroll_to_bottom();
                }
                if state.session.apply(event) == Flow::Finished {
                    finished = true;
                    break;
                }
            }
        }
        if finished {
            events = None;
            on_finished(state, &client, output_dir.as_ref(), &download_tx);
        }

        while let Ok(download) = download_rx.try_recv() {
            match download {
                DownloadEvent::Saved(path) => state.saved_image = Some(path),
                DownloadEvent::Failed(message) => {
                    state.notice = Some(format!("Could not save image: {message}"))
                }
            }
        }

        let timeout = if state.is_loading() {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(50)
        };

        if event::poll(timeout)? {
            match handle_input(state, event::read()?) {
                InputAction::Exit => return Ok(GenerateResult::Exit),
                InputAction::Submit => {
                    if let Ok(request) = state.submit() {
                        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
                        events = Some(rx);
                        let stream_client = client.clone();
                        tokio::spawn(async move {
                            stream_client.stream(request, tx).await;
                        });
                    }
                }
                InputAction::ScrollUp => state.scroll_up(),
                InputAction::ScrollDown => state.scroll_down(),
                InputAction::ScrollBottom => state.scroll_to_bottom(),
                InputAction::None => {}
            }
        } else if state.is_loading() {
            state.tick_loading();
        }

        // Stream task gone without a terminal event
        if state.is_loading() && events.as_ref().is_some_and(|rx| rx.is_closed() && rx.is_empty()) {
            state.session.connection_lost("stream ended without a result");
            events = None;
        }
    }
}

/// Resolve the image location and start a download when configured.
fn on_finished(
    state: &mut GenerateState,
    client: &Arc<GenerateClient>,
    output_dir: Option<&PathBuf>,
    download_tx: &mpsc::Sender<DownloadEvent>,
) {
    let Some(image_path) = state.session.image_path().map(str::to_string) else {
        return;
    };
    state.image_url = client
        .resolve_image_url(&image_path)
        .ok()
        .map(|url| url.to_string());

    let Some(dir) = output_dir.cloned() else {
        return;
    };
    info!(dir = %dir.display(), "Downloading generated image");
    let client = client.clone();
    let tx = download_tx.clone();
    tokio::spawn(async move {
        let event = match client.download_image(&image_path, &dir).await {
            Ok(path) => DownloadEvent::Saved(path),
            Err(err) => {
                warn!(error = %err, "Image download failed");
                DownloadEvent::Failed(err.user_message())
            }
        };
        let _ = tx.send(event).await;
    });
}
