// src/generate/openai.rs
//! Chat-completions client for the generation upstream.

use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{Result, SwotError};

use super::NOTE_GENERATION_PROMPT;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const MODEL: &str = "gpt-4o";
const MAX_TOKENS: u32 = 4000;

/// One uploaded image, passed upstream as a base64 data URL.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read the key from `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| SwotError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Override the API base URL (tests, compatible gateways).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Generate raw revision-notes markdown from pasted study text.
    pub async fn generate_from_text(&self, text: &str) -> Result<String> {
        let user_content = Value::String(format!(
            "Convert the following study material into exam-focused revision notes:\n\n{}",
            text
        ));
        self.chat(user_content).await
    }

    /// Generate raw revision-notes markdown from photographed material.
    pub async fn generate_from_images(&self, images: &[ImagePayload]) -> Result<String> {
        let mut parts = vec![json!({
            "type": "text",
            "text": "Extract text from these textbook/study material images and convert into exam-focused revision notes:",
        })];
        for image in images {
            parts.push(json!({
                "type": "image_url",
                "image_url": { "url": image.to_data_url() },
            }));
        }
        self.chat(Value::Array(parts)).await
    }

    async fn chat(&self, user_content: Value) -> Result<String> {
        let body = json!({
            "model": MODEL,
            "messages": [
                { "role": "system", "content": NOTE_GENERATION_PROMPT },
                { "role": "user", "content": user_content },
            ],
            "max_tokens": MAX_TOKENS,
        });

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SwotError::Generation(format!(
                "upstream returned {}: {}",
                status, detail
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| SwotError::Generation(format!("unparseable response: {}", e)))?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_payload_data_url() {
        let payload = ImagePayload {
            mime_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        };
        assert_eq!(payload.to_data_url(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = OpenAiClient::new("sk-secret");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
