//! Result image download

#[path = "../support/mod.rs"]
mod support;

use ragimage_core::{ClientError, GenerateClient};
use support::{Fixture, IMAGE_BYTES};
use tempfile::tempdir;

#[tokio::test]
async fn saves_image_under_output_dir() {
    let fixture = Fixture::spawn(Vec::new()).await;
    let client = GenerateClient::new(&fixture.endpoint).unwrap();
    let dir = tempdir().unwrap();
    let output = dir.path().join("results");

    let saved = client
        .download_image("/images/cat_88446692/generated_image_3.jpeg", &output)
        .await
        .unwrap();

    assert_eq!(saved, output.join("generated_image_3.jpeg"));
    assert_eq!(std::fs::read(&saved).unwrap(), IMAGE_BYTES);
}

#[tokio::test]
async fn missing_image_reports_http_error() {
    let fixture = Fixture::spawn(Vec::new()).await;
    let client = GenerateClient::new(&fixture.endpoint).unwrap();
    let dir = tempdir().unwrap();

    let err = client
        .download_image("/images/missing/generated_image_0.jpeg", dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Http { .. }));
    assert!(err.user_message().contains("HTTP 404"), "{}", err.user_message());
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}
