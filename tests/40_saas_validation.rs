mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

const BOUNDARY: &str = "organizer-test-boundary";

fn multipart_request(parts: &[(&str, &str, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        if filename.is_empty() {
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            );
        } else {
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: audio/wav\r\n\r\n",
                    name, filename
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/speech/transcriptions")
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", common::bearer_token()),
        )
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .expect("failed to build multipart request")
}

#[tokio::test]
async fn summary_rejects_empty_content() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::POST,
            "/summary",
            json!({ "content": "" }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("missing content"));
    Ok(())
}

#[tokio::test]
async fn transcription_requires_an_audio_file() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(multipart_request(&[("language_code", "", b"en-US")]))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("upload an audio file"));
    Ok(())
}

#[tokio::test]
async fn transcription_rejects_an_empty_audio_file() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(multipart_request(&[
            ("audio_file", "silence.wav", b""),
            ("language_code", "", b"en-US"),
        ]))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
