//! Line-oriented front end: progress goes to stdout as it arrives.

use ragimage_core::{
    GenerateClient, GenerateRequest, GenerationSession, Phase, ResultView, SessionEvent,
};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{self, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

const EVENT_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum LineError {
    #[error("stdout I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("generation failed: {0}")]
    GenerationFailed(String),

    #[error("connection lost: {0}")]
    ConnectionLost(String),
}

pub async fn run(
    client: Arc<GenerateClient>,
    request: GenerateRequest,
    output_dir: Option<PathBuf>,
) -> Result<(), LineError> {
    let mut stdout = io::stdout();
    let mut session = GenerationSession::new();
    session.begin(&request);
    write_line(
        &mut stdout,
        &format!(
            "{} (prompt: \"{}\", images: {})",
            session.status_text(),
            request.prompt,
            request.num_images
        ),
    )
    .await?;

    let (tx, mut rx) = mpsc::channel(EVENT_BUFFER);
    let stream_client = client.clone();
    let handle = tokio::spawn(async move { stream_client.stream(request, tx).await });

    drive(&mut session, &mut rx, &mut stdout).await?;
    drop(rx);
    if let Err(err) = handle.await {
        debug!(error = %err, "Stream task did not finish cleanly");
    }

    print_outcome(&mut stdout, &session, &client, output_dir).await
}

/// Feed events into the session until a terminal one arrives, echoing log
/// lines. A channel that closes early counts as a lost connection.
async fn drive<W>(
    session: &mut GenerationSession,
    rx: &mut mpsc::Receiver<SessionEvent>,
    out: &mut W,
) -> Result<(), LineError>
where
    W: AsyncWriteExt + Unpin,
{
    while let Some(event) = rx.recv().await {
        if let SessionEvent::Log(message) = &event {
            write_line(out, message.trim_end_matches('\n')).await?;
        }
        if session.apply(event) == ragimage_core::Flow::Finished {
            return Ok(());
        }
    }
    if session.is_in_flight() {
        session.connection_lost("stream ended without a result");
    }
    Ok(())
}

/// Print the final status and result. Failures and lost connections come
/// back as errors so the process exits non-zero.
async fn print_outcome<W>(
    stdout: &mut W,
    session: &GenerationSession,
    client: &GenerateClient,
    output_dir: Option<PathBuf>,
) -> Result<(), LineError>
where
    W: AsyncWriteExt + Unpin,
{
    write_line(stdout, "").await?;
    write_line(stdout, session.status_text()).await?;

    match (session.phase(), session.result()) {
        (Phase::Succeeded, Some(ResultView::Image { src, .. })) => {
            let location = client
                .resolve_image_url(src)
                .map(|url| url.to_string())
                .unwrap_or_else(|_| src.clone());
            write_line(stdout, &format!("Image: {location}")).await?;

            if let Some(dir) = output_dir {
                match client.download_image(src, &dir).await {
                    Ok(path) => {
                        write_line(stdout, &format!("Saved to {}", path.display())).await?
                    }
                    Err(err) => {
                        warn!(error = %err, "Failed to save generated image");
                        write_line(
                            stdout,
                            &format!("Could not save image: {}", err.user_message()),
                        )
                        .await?;
                    }
                }
            }
            stdout.flush().await?;
            Ok(())
        }
        (_, Some(ResultView::Error { title, message, hint })) => {
            write_line(stdout, &format!("--- {title} ---")).await?;
            write_line(stdout, message).await?;
            write_line(stdout, hint).await?;
            stdout.flush().await?;
            Err(LineError::GenerationFailed(message.clone()))
        }
        _ => {
            let reason = session
                .connection_error()
                .unwrap_or("no result received")
                .to_string();
            write_line(stdout, &format!("Reason: {reason}")).await?;
            stdout.flush().await?;
            Err(LineError::ConnectionLost(reason))
        }
    }
}

async fn write_line<W>(out: &mut W, text: &str) -> io::Result<()>
where
    W: AsyncWriteExt + Unpin,
{
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await
}
