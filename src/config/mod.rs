use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub identity: IdentityConfig,
    pub speech: SpeechConfig,
    pub summary: SummaryConfig,
    pub paypal: PayPalConfig,
    pub crypto: CryptoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Hard cap for multipart audio uploads, in bytes.
    pub max_upload_bytes: usize,
    pub enable_cors: bool,
}

/// Bearer-token validation is delegated to the external identity provider;
/// we only hold the shared verification material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub api_key: String,
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayPalConfig {
    pub client_id: String,
    pub secret_key: String,
    pub base_url: String,
}

/// Symmetric key material for encrypting stored old-password values.
/// Both values are base64; the nonce is fixed so ciphertexts stay stable
/// across processes and restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoConfig {
    pub key_base64: String,
    pub nonce_base64: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("MAX_UPLOAD_BYTES") {
            self.server.max_upload_bytes = v.parse().unwrap_or(self.server.max_upload_bytes);
        }
        if let Ok(v) = env::var("ENABLE_CORS") {
            self.server.enable_cors = v.parse().unwrap_or(self.server.enable_cors);
        }

        if let Ok(v) = env::var("IDENTITY_JWT_SECRET") {
            self.identity.jwt_secret = v;
        }
        if let Ok(v) = env::var("IDENTITY_ISSUER") {
            self.identity.issuer = Some(v);
        }
        if let Ok(v) = env::var("IDENTITY_AUDIENCE") {
            self.identity.audience = Some(v);
        }

        if let Ok(v) = env::var("SPEECH_API_KEY") {
            self.speech.api_key = v;
        }
        if let Ok(v) = env::var("SPEECH_API_REGION") {
            self.speech.region = v;
        }

        if let Ok(v) = env::var("SUMMARY_API_KEY") {
            self.summary.api_key = v;
        }
        if let Ok(v) = env::var("SUMMARY_API_ENDPOINT") {
            self.summary.endpoint = v;
        }
        if let Ok(v) = env::var("SUMMARY_MODEL") {
            self.summary.model = v;
        }

        if let Ok(v) = env::var("PAYPAL_CLIENT_ID") {
            self.paypal.client_id = v;
        }
        if let Ok(v) = env::var("PAYPAL_SECRET_KEY") {
            self.paypal.secret_key = v;
        }
        if let Ok(v) = env::var("PAYPAL_BASE_URL") {
            self.paypal.base_url = v;
        }

        if let Ok(v) = env::var("ENCRYPTION_KEY") {
            self.crypto.key_base64 = v;
        }
        if let Ok(v) = env::var("ENCRYPTION_NONCE") {
            self.crypto.nonce_base64 = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                max_upload_bytes: 100 * 1024 * 1024, // 100MB
                enable_cors: true,
            },
            identity: IdentityConfig {
                jwt_secret: String::new(),
                issuer: None,
                audience: None,
            },
            speech: SpeechConfig {
                api_key: String::new(),
                region: "westeurope".to_string(),
            },
            summary: SummaryConfig {
                api_key: String::new(),
                endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
                model: "gpt-4o-mini".to_string(),
            },
            paypal: PayPalConfig {
                client_id: String::new(),
                secret_key: String::new(),
                base_url: "https://api-m.sandbox.paypal.com".to_string(),
            },
            crypto: CryptoConfig {
                key_base64: String::new(),
                nonce_base64: String::new(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                max_upload_bytes: 100 * 1024 * 1024,
                enable_cors: true,
            },
            identity: IdentityConfig {
                jwt_secret: String::new(),
                issuer: None,
                audience: None,
            },
            speech: SpeechConfig {
                api_key: String::new(),
                region: String::new(),
            },
            summary: SummaryConfig {
                api_key: String::new(),
                endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
                model: "gpt-4o-mini".to_string(),
            },
            paypal: PayPalConfig {
                client_id: String::new(),
                secret_key: String::new(),
                base_url: "https://api-m.paypal.com".to_string(),
            },
            crypto: CryptoConfig {
                key_base64: String::new(),
                nonce_base64: String::new(),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.max_upload_bytes, 100 * 1024 * 1024);
        assert!(config.paypal.base_url.contains("sandbox"));
    }

    #[test]
    fn production_uses_live_paypal() {
        let config = AppConfig::production();
        assert!(!config.paypal.base_url.contains("sandbox"));
        assert_eq!(config.summary.model, "gpt-4o-mini");
    }
}
