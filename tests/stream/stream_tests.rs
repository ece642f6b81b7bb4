//! GenerateClient::stream against a scripted SSE server

#[path = "../support/mod.rs"]
mod support;

use axum::http::StatusCode;
use ragimage_core::{
    GenerateClient, GenerateRequest, GenerationOutcome, GenerationSession, Phase, ResultView,
    SessionEvent,
};
use serde_json::json;
use support::{Fixture, Scripted, closed_endpoint};
use tokio::sync::mpsc;

async fn collect(endpoint: &str, request: GenerateRequest) -> Vec<SessionEvent> {
    let client = GenerateClient::new(endpoint).expect("client");
    let (tx, mut rx) = mpsc::channel(4);
    let task = tokio::spawn(async move { client.stream(request, tx).await });

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    task.await.expect("stream task");
    events
}

fn request(prompt: &str, num_images: u32) -> GenerateRequest {
    GenerateRequest::new(prompt, num_images).expect("valid request")
}

fn terminal_count(events: &[SessionEvent]) -> usize {
    events
        .iter()
        .filter(|e| !matches!(e, SessionEvent::Log(_)))
        .count()
}

#[tokio::test]
async fn forwards_logs_in_order_then_success() {
    let fixture = Fixture::spawn(vec![
        Scripted::Log("Starting Retrieval for User Prompt"),
        Scripted::Log("Retrieved 3 images, downloading..."),
        Scripted::Log("Generated image saved"),
        Scripted::Complete(json!({
            "success": true,
            "image_path": "/images/lion_under_a_tree_1f2e3d4c/generated_image_0.jpeg"
        })),
    ])
    .await;

    let events = collect(&fixture.endpoint, request("lion under a tree", 3)).await;

    assert_eq!(
        events,
        vec![
            SessionEvent::Log("Starting Retrieval for User Prompt".into()),
            SessionEvent::Log("Retrieved 3 images, downloading...".into()),
            SessionEvent::Log("Generated image saved".into()),
            SessionEvent::Complete(GenerationOutcome::Success {
                image_path: "/images/lion_under_a_tree_1f2e3d4c/generated_image_0.jpeg".into()
            }),
        ]
    );
}

#[tokio::test]
async fn drives_session_to_image_result() {
    let fixture = Fixture::spawn(vec![
        Scripted::Log("one"),
        Scripted::Log("two"),
        Scripted::Complete(json!({ "success": true, "image_path": "/images/a/generated_image_0.jpeg" })),
    ])
    .await;

    let req = request("a cat", 1);
    let mut session = GenerationSession::new();
    session.begin(&req);
    assert!(!session.submit_enabled());

    for event in collect(&fixture.endpoint, req).await {
        session.apply(event);
    }

    assert!(session.submit_enabled());
    assert_eq!(session.log(), "one\ntwo\n");
    assert_eq!(
        session.result(),
        Some(&ResultView::Image {
            src: "/images/a/generated_image_0.jpeg".into(),
            alt: "Generated image".into()
        })
    );
}

#[tokio::test]
async fn forwards_application_failure() {
    let fixture = Fixture::spawn(vec![
        Scripted::Log("No images were successfully downloaded. Please try a different prompt."),
        Scripted::Complete(json!({
            "success": false,
            "error": "No images were successfully downloaded"
        })),
    ])
    .await;

    let events = collect(&fixture.endpoint, request("zzzz", 2)).await;

    assert_eq!(events.len(), 2);
    assert_eq!(
        events[1],
        SessionEvent::Complete(GenerationOutcome::Failure {
            error: "No images were successfully downloaded".into()
        })
    );
}

#[tokio::test]
async fn sends_prompt_and_count_as_query() {
    let fixture = Fixture::spawn(vec![Scripted::Complete(
        json!({ "success": false, "error": "stop" }),
    )])
    .await;

    collect(&fixture.endpoint, request("a cat & a dog, 50% off", 4)).await;

    let queries = fixture.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0]["prompt"], "a cat & a dog, 50% off");
    assert_eq!(queries[0]["num_images"], "4");
}

#[tokio::test]
async fn ignores_unknown_events_and_malformed_logs() {
    let fixture = Fixture::spawn(vec![
        Scripted::Log("before"),
        Scripted::Named {
            event: "heartbeat",
            data: "{}",
        },
        Scripted::Named {
            event: "log",
            data: "not json",
        },
        Scripted::Log("after"),
        Scripted::Complete(json!({ "success": true, "image_path": "/images/x/y.jpeg" })),
    ])
    .await;

    let events = collect(&fixture.endpoint, request("cat", 1)).await;

    assert_eq!(
        events,
        vec![
            SessionEvent::Log("before".into()),
            SessionEvent::Log("after".into()),
            SessionEvent::Complete(GenerationOutcome::Success {
                image_path: "/images/x/y.jpeg".into()
            }),
        ]
    );
}

#[tokio::test]
async fn malformed_completion_is_a_terminal_failure() {
    let fixture = Fixture::spawn(vec![
        Scripted::Complete(json!({ "success": true })),
        Scripted::Log("never delivered"),
    ])
    .await;

    let events = collect(&fixture.endpoint, request("cat", 1)).await;

    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        SessionEvent::Complete(GenerationOutcome::Failure { error }) if error.contains("image_path")
    ));
}

#[tokio::test]
async fn stops_reading_after_completion() {
    let fixture = Fixture::spawn(vec![
        Scripted::Log("working"),
        Scripted::Complete(json!({ "success": false, "error": "done" })),
        Scripted::Log("late line"),
    ])
    .await;

    let events = collect(&fixture.endpoint, request("cat", 1)).await;

    assert_eq!(events.len(), 2);
    assert_eq!(terminal_count(&events), 1);
}

#[tokio::test]
async fn stream_ending_early_is_a_connection_loss() {
    let fixture = Fixture::spawn(vec![Scripted::Log("partial progress")]).await;

    let events = collect(&fixture.endpoint, request("cat", 1)).await;

    assert_eq!(events[0], SessionEvent::Log("partial progress".into()));
    assert_eq!(terminal_count(&events), 1);
    assert!(matches!(events.last(), Some(SessionEvent::ConnectionLost(_))));
}

#[tokio::test]
async fn error_status_is_a_connection_loss() {
    let fixture = Fixture::failing(StatusCode::INTERNAL_SERVER_ERROR).await;

    let events = collect(&fixture.endpoint, request("cat", 1)).await;

    assert_eq!(events.len(), 1);
    match &events[0] {
        SessionEvent::ConnectionLost(reason) => assert!(reason.contains("HTTP 500"), "{reason}"),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn refused_connection_matches_application_failure_outcome() {
    let endpoint = closed_endpoint().await;
    let req = request("cat", 1);

    let mut session = GenerationSession::new();
    session.begin(&req);
    let events = collect(&endpoint, req).await;

    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], SessionEvent::ConnectionLost(reason) if reason.contains("unable to connect")));

    for event in events {
        session.apply(event);
    }
    assert_eq!(session.phase(), Phase::Failed);
    assert!(session.submit_enabled());
    assert_eq!(session.status_text(), "Connection error. Please try again.");
}
