use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::Router;
use std::sync::Once;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

static INIT: Once = Once::new();

/// Build the router with test-friendly environment in place. The env setup
/// must win the race against the config singleton, so it runs inside a Once
/// that every test goes through.
pub fn app() -> Router {
    INIT.call_once(|| {
        std::env::set_var("IDENTITY_JWT_SECRET", TEST_JWT_SECRET);
        // No store behind these tests; validation paths must fail before any
        // pool is touched.
        std::env::remove_var("DATABASE_URL");
    });
    organizer_api::routes::app()
}

/// Mint a token the way the identity provider would.
#[allow(dead_code)]
pub fn bearer_token() -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp();
    let claims = organizer_api::auth::Claims {
        sub: "test-user".to_string(),
        email: Some("test@example.com".to_string()),
        exp: now + 3600,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("failed to sign test token")
}

#[allow(dead_code)]
pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", bearer_token()))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}
