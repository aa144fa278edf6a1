use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::handlers;
use crate::middleware::bearer_auth_middleware;
use crate::store::StoreManager;

pub fn app() -> Router {
    let protected = Router::new()
        .merge(storage_routes())
        .merge(speech_routes())
        .merge(summary_routes())
        .merge(billing_routes())
        // Bearer-token validation for everything except / and /health
        .layer(from_fn(bearer_auth_middleware));

    let mut app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(protected)
        .layer(TraceLayer::new_for_http());

    if config::config().server.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    app
}

fn storage_routes() -> Router {
    use handlers::storage::{events, notes, users};

    Router::new()
        // Users and their metadata bookkeeping
        .route(
            "/storage/users",
            post(users::create_user)
                .put(users::update_user)
                .delete(users::remove_user),
        )
        .route("/storage/users/:uid", get(users::get_user))
        .route("/storage/users/metadata", post(users::user_metadata))
        .route(
            "/storage/users/metadata-flag",
            post(users::metadata_flag).put(users::set_metadata_flag),
        )
        // Notes (header/body split)
        .route(
            "/storage/notes",
            post(notes::create_note)
                .put(notes::update_note)
                .delete(notes::remove_note),
        )
        .route("/storage/notes/headers/:uid", get(notes::note_headers))
        .route("/storage/notes/body", post(notes::note_body))
        // Account event records
        .route("/storage/account-logins", post(events::record_login))
        .route("/storage/account-logouts", post(events::record_logout))
        .route(
            "/storage/password-changes",
            post(events::record_password_change),
        )
}

fn speech_routes() -> Router {
    Router::new().route(
        "/speech/transcriptions",
        post(handlers::speech::transcribe)
            .layer(DefaultBodyLimit::max(config::config().server.max_upload_bytes)),
    )
}

fn summary_routes() -> Router {
    Router::new().route("/summary", post(handlers::summary::summarize))
}

fn billing_routes() -> Router {
    use handlers::billing;

    Router::new()
        .route("/billing/plans", post(billing::create_plan))
        .route("/billing/plans/:plan_id", get(billing::plan_details))
        .route("/billing/plans/:plan_id/activate", post(billing::activate_plan))
        .route("/billing/plans/:plan_id/deactivate", post(billing::deactivate_plan))
        .route("/billing/subscriptions", post(billing::create_subscription))
        .route(
            "/billing/subscriptions/:subscription_id",
            get(billing::subscription_details),
        )
        .route(
            "/billing/subscriptions/:subscription_id/suspend",
            post(billing::suspend_subscription),
        )
        .route(
            "/billing/subscriptions/:subscription_id/cancel",
            post(billing::cancel_subscription),
        )
        .route(
            "/billing/subscriptions/:subscription_id/activate",
            post(billing::activate_subscription),
        )
        .route(
            "/billing/subscriptions/:subscription_id/capture",
            post(billing::capture_payment),
        )
        .route(
            "/billing/subscriptions/:subscription_id/transactions",
            get(billing::list_transactions),
        )
        .route("/billing/client-token/:plan_id", get(billing::client_token))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Organizer API",
            "version": version,
            "description": "Backend API gateway for the Data Organizer app",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "storage": "/storage/* (protected - users, notes, account events)",
                "speech": "/speech/transcriptions (protected - audio transcription)",
                "summary": "/summary (protected - text summarization)",
                "billing": "/billing/* (protected - plans and subscriptions)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match StoreManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "document store unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "store_error": e.to_string()
                }
            })),
        ),
    }
}
