mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

// Requests that must be rejected by validation before any store access.

#[tokio::test]
async fn create_user_requires_user_payload() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::POST,
            "/storage/users",
            json!({ "users_metadata": null }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("missing user data"));
    Ok(())
}

#[tokio::test]
async fn create_user_rejects_blank_uid() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::POST,
            "/storage/users",
            json!({ "user": { "uid": "   " } }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn update_user_rejects_blank_uid() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::PUT,
            "/storage/users",
            json!({ "uid": " " }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn remove_user_requires_user_payload() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::DELETE,
            "/storage/users",
            json!({}),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn metadata_flag_requires_uid() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::POST,
            "/storage/users/metadata-flag",
            json!({ "uid": "" }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn metadata_snapshot_requires_uid() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::POST,
            "/storage/users/metadata",
            json!({}),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn create_note_requires_content() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::POST,
            "/storage/notes",
            json!({
                "user_uid": "uid-1",
                "title": "shopping",
                "preview_text": "milk",
                "created_at": "2024-05-17T10:30:42Z"
            }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn update_note_with_content_requires_body_reference() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::PUT,
            "/storage/notes",
            json!({
                "user_uid": "uid-1",
                "title": "shopping",
                "content": "milk, eggs",
                "created_at": "2024-05-17T10:30:42Z"
            }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn note_body_requires_reference() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::POST,
            "/storage/notes/body",
            json!({
                "user_uid": "uid-1",
                "title": "shopping",
                "created_at": "2024-05-17T10:30:42Z"
            }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn login_event_requires_device_info() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::POST,
            "/storage/account-logins",
            json!({
                "user_uid": "uid-1",
                "event": {
                    "location": { "latitude": 50.45, "longitude": 30.52 },
                    "date": "2024-05-17T10:30:42Z"
                }
            }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn logout_event_requires_event_payload() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::POST,
            "/storage/account-logouts",
            json!({
                "user_uid": "uid-1",
                "device_info": {
                    "name": "Pixel 7",
                    "model": "GVU6C",
                    "manufacturer": "Google",
                    "platform": "Android",
                    "idiom": "Phone",
                    "device_type": "Physical"
                }
            }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn password_change_requires_change_payload() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::POST,
            "/storage/password-changes",
            json!({
                "uid": "uid-1",
                "device_info": {
                    "name": "Pixel 7",
                    "model": "GVU6C",
                    "manufacturer": "Google",
                    "platform": "Android",
                    "idiom": "Phone",
                    "device_type": "Physical"
                }
            }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
