use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::clients::ClientError;
use crate::config;

const SYSTEM_PROMPT: &str = "You are an assistant that produces short key points for a text. \
The output language is the code given after \"Output language: \" in the request; \
for example \"Output language: uk-UA\" means Ukrainian and \"Output language: en-US\" \
means English. When no code is given, the output language is Ukrainian.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Proxy to the LLM chat-completions API.
///
/// Keeps a running conversation transcript on the client instance: the
/// system prompt is seeded once, and every call appends the user content and
/// the assistant reply. The process-wide instance therefore accumulates
/// context across requests and users for as long as it lives.
pub struct SummaryClient {
    http: reqwest::Client,
    transcript: Mutex<Vec<ChatMessage>>,
}

impl Default for SummaryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            transcript: Mutex::new(Vec::new()),
        }
    }

    pub fn instance() -> &'static SummaryClient {
        use std::sync::OnceLock;
        static INSTANCE: OnceLock<SummaryClient> = OnceLock::new();
        INSTANCE.get_or_init(SummaryClient::new)
    }

    pub async fn summarize(&self, content: &str) -> Result<String, ClientError> {
        let summary = &config::config().summary;
        if summary.api_key.trim().is_empty() {
            return Err(ClientError::MissingCredentials("Summary API key"));
        }

        let messages = self.push_user_message(content);
        let request = ChatRequest {
            model: &summary.model,
            messages,
        };

        let response = self
            .http
            .post(&summary.endpoint)
            .bearer_auth(&summary.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Upstream { status, body });
        }

        let data: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

        let reply = data
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| ClientError::MalformedResponse("no choices returned".to_string()))?;

        let text = reply.content.trim().to_string();
        if text.is_empty() {
            return Err(ClientError::MalformedResponse(
                "assistant message is empty".to_string(),
            ));
        }

        self.push_assistant_message(reply);
        Ok(text)
    }

    /// Append the user message (seeding the system prompt on first use) and
    /// return a snapshot of the transcript to send.
    fn push_user_message(&self, content: &str) -> Vec<ChatMessage> {
        let mut transcript = self.transcript.lock().unwrap_or_else(|e| e.into_inner());
        if transcript.is_empty() {
            transcript.push(ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            });
        }
        transcript.push(ChatMessage {
            role: "user".to_string(),
            content: content.to_string(),
        });
        transcript.clone()
    }

    fn push_assistant_message(&self, message: ChatMessage) {
        let mut transcript = self.transcript.lock().unwrap_or_else(|e| e.into_inner());
        transcript.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_seeds_system_prompt() {
        let client = SummaryClient::new();
        let messages = client.push_user_message("summarize this");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "summarize this");
    }

    #[test]
    fn transcript_accumulates_across_calls() {
        let client = SummaryClient::new();
        client.push_user_message("first");
        client.push_assistant_message(ChatMessage {
            role: "assistant".to_string(),
            content: "- first point".to_string(),
        });
        let messages = client.push_user_message("second");

        // system + first user + assistant + second user
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].role, "assistant");
        assert_eq!(messages[3].content, "second");
    }

    #[test]
    fn chat_request_serializes_to_wire_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "hi".to_string(),
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "user");
    }
}
