use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::clients::ClientError;
use crate::config;

/// Seam for the speech-to-text proxy so handlers can be exercised without
/// the vendor API.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        content_type: &str,
        language: &str,
    ) -> Result<String, ClientError>;
}

/// Thin wrapper over the vendor's short-audio recognition REST endpoint.
pub struct SpeechClient {
    http: reqwest::Client,
}

impl Default for SpeechClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(region: &str) -> String {
        format!(
            "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1",
            region
        )
    }
}

#[derive(Debug, Deserialize)]
struct RecognitionResponse {
    #[serde(rename = "RecognitionStatus")]
    recognition_status: String,
    #[serde(rename = "DisplayText", default)]
    display_text: String,
}

#[async_trait]
impl Transcriber for SpeechClient {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        content_type: &str,
        language: &str,
    ) -> Result<String, ClientError> {
        let speech = &config::config().speech;
        if speech.api_key.trim().is_empty() || speech.region.trim().is_empty() {
            return Err(ClientError::MissingCredentials(
                "Speech API subscription key or region",
            ));
        }

        let response = self
            .http
            .post(Self::endpoint(&speech.region))
            .query(&[("language", language), ("format", "simple")])
            .header("Ocp-Apim-Subscription-Key", &speech.api_key)
            .header(CONTENT_TYPE, content_type)
            .header("Accept", "application/json")
            .body(audio)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Upstream { status, body });
        }

        let result: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

        match result.recognition_status.as_str() {
            "Success" => Ok(result.display_text),
            "NoMatch" => Err(ClientError::MalformedResponse(
                "speech could not be recognized".to_string(),
            )),
            other => Err(ClientError::MalformedResponse(format!(
                "recognition error: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_embeds_region() {
        let url = SpeechClient::endpoint("westeurope");
        assert!(url.starts_with("https://westeurope.stt.speech.microsoft.com/"));
    }

    #[test]
    fn recognition_response_parses_vendor_casing() {
        let raw = r#"{"RecognitionStatus":"Success","DisplayText":"hello world","Offset":0,"Duration":100}"#;
        let parsed: RecognitionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.recognition_status, "Success");
        assert_eq!(parsed.display_text, "hello world");
    }

    #[test]
    fn no_match_omits_display_text() {
        let raw = r#"{"RecognitionStatus":"NoMatch"}"#;
        let parsed: RecognitionResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.display_text.is_empty());
    }
}
