//! OpenAI chat-completions classifier
//!
//! Sends one chat request per batch and returns the first choice's message
//! text. Calls are never retried; a failed call drops its batch.

use crate::config::BlockgenConfig;
use crate::provider::{ClassifyRequest, Classifier};
use blockgen_core::{BlockgenError, Result};
use serde::Deserialize;

const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Classifier backed by an OpenAI-compatible chat-completions endpoint
pub struct OpenAiClassifier {
    api_key: String,
    api_url: String,
    agent: ureq::Agent,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClassifier {
    /// Create a new OpenAiClassifier from config
    pub fn from_config(config: &BlockgenConfig) -> Result<Self> {
        let api_key = config
            .api_key("openai")
            .ok_or_else(|| {
                BlockgenError::MissingCredential(
                    "OpenAI API key not configured. Set OPENAI_API_KEY or add it to .blockgen/config.toml"
                        .to_string(),
                )
            })?
            .to_string();

        let api_url = config
            .api_url("openai")
            .unwrap_or(DEFAULT_OPENAI_URL)
            .to_string();

        Ok(Self {
            api_key,
            api_url,
            agent: ureq::Agent::new_with_defaults(),
        })
    }

    fn payload(request: &ClassifyRequest) -> serde_json::Value {
        serde_json::json!({
            "model": request.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.prompt}
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens
        })
    }
}

impl Classifier for OpenAiClassifier {
    fn name(&self) -> &str {
        "openai"
    }

    fn classify(&self, request: &ClassifyRequest) -> Result<String> {
        let payload = Self::payload(request);

        let mut response = self
            .agent
            .post(&self.api_url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(|e| {
                BlockgenError::ClassificationCallError(format!("OpenAI request failed: {}", e))
            })?;

        let body = response.body_mut().read_to_string().map_err(|e| {
            BlockgenError::ClassificationCallError(format!("Failed to read OpenAI response: {}", e))
        })?;

        parse_chat_response(&body)
    }
}

/// Extract the first choice's message text from a chat-completions body
pub fn parse_chat_response(json: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(json).map_err(|e| {
        BlockgenError::ClassificationCallError(format!("Unexpected OpenAI response: {}", e))
    })?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| {
            BlockgenError::ClassificationCallError("OpenAI response has no message content".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;

    #[test]
    fn test_parse_chat_response() {
        let json = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "  ```json\n{}\n```  "},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;

        assert_eq!(parse_chat_response(json).unwrap(), "```json\n{}\n```");
    }

    #[test]
    fn test_parse_chat_response_without_choices() {
        let err = parse_chat_response(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, BlockgenError::ClassificationCallError(_)));

        let err = parse_chat_response(r#"{"error": {"message": "rate limited"}}"#).unwrap_err();
        assert!(matches!(err, BlockgenError::ClassificationCallError(_)));
    }

    #[test]
    fn test_missing_credential() {
        let config = BlockgenConfig::default();
        let err = OpenAiClassifier::from_config(&config).err().unwrap();
        assert!(matches!(err, BlockgenError::MissingCredential(_)));
    }

    #[test]
    fn test_payload_shape() {
        let mut config = BlockgenConfig::default();
        config.providers.insert(
            "openai".to_string(),
            ProviderConfig {
                api_key: Some("sk-test".to_string()),
                api_url: None,
                enabled: true,
            },
        );
        let classifier = OpenAiClassifier::from_config(&config).unwrap();
        assert_eq!(classifier.api_url, DEFAULT_OPENAI_URL);

        let request = ClassifyRequest {
            model: "gpt-4o-mini".to_string(),
            system: "sys".to_string(),
            prompt: "files: a.png".to_string(),
            temperature: 0.1,
            max_tokens: 2000,
            filenames: vec!["a.png".to_string()],
        };
        let payload = OpenAiClassifier::payload(&request);
        assert_eq!(payload["model"], "gpt-4o-mini");
        assert_eq!(payload["messages"][0]["role"], "system");
        assert_eq!(payload["messages"][1]["content"], "files: a.png");
        assert_eq!(payload["max_tokens"], 2000);
    }
}
