mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn create_plan_rejects_non_positive_price() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::POST,
            "/billing/plans",
            json!({
                "product_name": "Organizer Pro",
                "description": "Monthly subscription",
                "price": 0.0
            }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("price"));
    Ok(())
}

#[tokio::test]
async fn create_plan_rejects_blank_product_name() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::POST,
            "/billing/plans",
            json!({
                "product_name": "   ",
                "description": "Monthly subscription",
                "price": 4.99
            }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn create_subscription_requires_plan_id() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::POST,
            "/billing/subscriptions",
            json!({ "plan_id": "" }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn transactions_require_date_range() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::GET,
            "/billing/subscriptions/I-SUB123/transactions",
            json!({}),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("date"));
    Ok(())
}

#[tokio::test]
async fn transactions_reject_partial_date_range() -> Result<()> {
    let app = common::app();

    let response = app
        .oneshot(common::json_request(
            Method::GET,
            "/billing/subscriptions/I-SUB123/transactions?start_date=2024-01-01T00:00:00Z",
            json!({}),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
