use axum::extract::Multipart;
use tracing::{error, info};

use crate::clients::{SpeechClient, Transcriber};
use crate::config;
use crate::dto::TranscriptionResponse;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

const DEFAULT_LANGUAGE: &str = "uk-UA";

/// POST /speech/transcriptions - multipart audio upload, size-limited
///
/// Expects an `audio_file` part and an optional `language_code` part.
pub async fn transcribe(mut multipart: Multipart) -> ApiResult<TranscriptionResponse> {
    let mut audio: Option<(Vec<u8>, String)> = None;
    let mut language: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Multipart error: {}", e)))?
    {
        match field.name() {
            Some("audio_file") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("audio/wav")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Multipart error: {}", e)))?;
                audio = Some((bytes.to_vec(), content_type));
            }
            Some("language_code") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Multipart error: {}", e)))?;
                if !text.trim().is_empty() {
                    language = Some(text);
                }
            }
            _ => {}
        }
    }

    let Some((bytes, content_type)) = audio else {
        error!("Transcription request without an audio file");
        return Err(ApiError::bad_request("Please upload an audio file"));
    };
    if bytes.is_empty() {
        error!("Transcription request with an empty audio file");
        return Err(ApiError::bad_request("Please upload an audio file"));
    }

    let max_bytes = config::config().server.max_upload_bytes;
    if bytes.len() > max_bytes {
        let message = format!("File size exceeds {}MB limit", max_bytes / 1024 / 1024);
        error!("{}", message);
        return Err(ApiError::bad_request(message));
    }

    let language = language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    let transcription = SpeechClient::new()
        .transcribe(bytes, &content_type, &language)
        .await?;

    info!("Audio transcription successful ({} chars)", transcription.len());
    Ok(ApiResponse::success(TranscriptionResponse { transcription }))
}
