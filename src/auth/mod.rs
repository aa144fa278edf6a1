use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

/// Claims we read out of the identity provider's bearer token. Issuance is
/// the provider's job; this service only verifies.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

/// Validate an identity token and extract its claims.
pub fn validate_identity_token(token: &str) -> Result<Claims, String> {
    let identity = &config::config().identity;

    if identity.jwt_secret.is_empty() {
        return Err("Identity provider secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(identity.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    if let Some(issuer) = &identity.issuer {
        validation.set_issuer(&[issuer]);
    }
    if let Some(audience) = &identity.audience {
        validation.set_audience(&[audience]);
    }

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Invalid identity token: {}", e))?;

    Ok(token_data.claims)
}
