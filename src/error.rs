// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 502 Bad Gateway (external service issues)
    BadGateway(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
            ApiError::BadGateway(_) => 502,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::BadGateway(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::BadGateway(_) => "BAD_GATEWAY",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        ApiError::BadGateway(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<crate::store::manager::StoreError> for ApiError {
    fn from(err: crate::store::manager::StoreError) -> Self {
        match err {
            crate::store::manager::StoreError::NotFound(msg) => ApiError::not_found(msg),
            crate::store::manager::StoreError::ConfigMissing(_)
            | crate::store::manager::StoreError::InvalidDatabaseUrl => {
                ApiError::service_unavailable("Document store is not configured")
            }
            crate::store::manager::StoreError::QueryError(msg) => {
                // Don't expose internal store errors to clients
                tracing::error!("Store query error: {}", msg);
                ApiError::internal_server_error("An internal server error occurred. Please try again later.")
            }
            crate::store::manager::StoreError::Sqlx(sqlx_err) => {
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("An internal server error occurred. Please try again later.")
            }
        }
    }
}

impl From<crate::clients::ClientError> for ApiError {
    fn from(err: crate::clients::ClientError) -> Self {
        match err {
            crate::clients::ClientError::Upstream { status, body } => {
                tracing::error!("Upstream service error {}: {}", status, body);
                ApiError::bad_gateway("Error connecting to the upstream service. Please try again later.")
            }
            crate::clients::ClientError::Transport(e) => {
                tracing::error!("Upstream transport error: {}", e);
                ApiError::bad_gateway("Error connecting to the upstream service. Please try again later.")
            }
            crate::clients::ClientError::MalformedResponse(msg) => {
                tracing::error!("Malformed upstream response: {}", msg);
                ApiError::internal_server_error("The upstream service did not return the expected result.")
            }
            crate::clients::ClientError::MissingCredentials(what) => {
                tracing::error!("Missing upstream credentials: {}", what);
                ApiError::internal_server_error(format!("{} is not configured", what))
            }
        }
    }
}

impl From<crate::services::crypto::CryptoError> for ApiError {
    fn from(err: crate::services::crypto::CryptoError) -> Self {
        tracing::error!("Crypto error: {}", err);
        ApiError::internal_server_error("An internal server error occurred. Please try again later.")
    }
}

impl From<crate::services::organizer::OrganizerError> for ApiError {
    fn from(err: crate::services::organizer::OrganizerError) -> Self {
        match err {
            crate::services::organizer::OrganizerError::Validation(msg) => ApiError::bad_request(msg),
            crate::services::organizer::OrganizerError::Store(e) => e.into(),
            crate::services::organizer::OrganizerError::Crypto(e) => e.into(),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_variants() {
        assert_eq!(ApiError::bad_request("x").status_code(), 400);
        assert_eq!(ApiError::unauthorized("x").status_code(), 401);
        assert_eq!(ApiError::not_found("x").status_code(), 404);
        assert_eq!(ApiError::internal_server_error("x").status_code(), 500);
        assert_eq!(ApiError::bad_gateway("x").status_code(), 502);
        assert_eq!(ApiError::service_unavailable("x").status_code(), 503);
    }

    #[test]
    fn json_body_carries_code_and_message() {
        let body = ApiError::not_found("User Document with UID 'abc' was not found.").to_json();
        assert_eq!(body["error"], true);
        assert_eq!(body["code"], "NOT_FOUND");
        assert!(body["message"].as_str().unwrap().contains("abc"));
    }
}
