pub mod paypal;
pub mod speech;
pub mod summary;

pub use paypal::PayPalClient;
pub use speech::{SpeechClient, Transcriber};
pub use summary::SummaryClient;

use thiserror::Error;

/// Errors shared by the external SaaS clients. Upstream/transport failures
/// surface as 502, the rest as 500.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("upstream service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    MissingCredentials(&'static str),
}
