use std::time::Duration;

use futures::future::BoxFuture;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::TextGenerator;
use crate::config::LlmConfig;
use crate::error::GenerationError;

/// Client for an OpenAI-compatible `/chat/completions` endpoint (Ollama by default)
pub struct ChatCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionClient {
    pub fn new(config: &LlmConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let endpoint = completions_endpoint(&config.base_url);
        info!("Using completion endpoint {} (model: {})", endpoint, config.model);

        Ok(ChatCompletionClient {
            http,
            endpoint,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    async fn send(&self, system_instruction: &str, user_content: &str) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            stream: false,
        };

        debug!("Sending completion request ({} prompt bytes)", user_content.len());

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerationError::EmptyCompletion)
    }
}

impl TextGenerator for ChatCompletionClient {
    fn complete<'a>(
        &'a self,
        system_instruction: &'a str,
        user_content: &'a str,
    ) -> BoxFuture<'a, Result<String, GenerationError>> {
        Box::pin(self.send(system_instruction, user_content))
    }
}

fn completions_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_endpoint() {
        assert_eq!(
            completions_endpoint("http://localhost:11434/v1"),
            "http://localhost:11434/v1/chat/completions"
        );
        assert_eq!(
            completions_endpoint("http://localhost:11434/v1/"),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_client_construction() {
        let client = ChatCompletionClient::new(&LlmConfig::default()).unwrap();
        assert_eq!(client.model_name(), "phi3:mini");
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "phi3:mini",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "be brief",
                },
                ChatMessage {
                    role: "user",
                    content: "hi",
                },
            ],
            stream: false,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "phi3:mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"id":"chatcmpl-1","choices":[{"index":0,"message":{"role":"assistant","content":"{\"category\":\"Invoice\"}"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some(r#"{"category":"Invoice"}"#)
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let config = LlmConfig {
            base_url: "http://127.0.0.1:9/v1".to_string(),
            timeout_secs: 2,
            ..LlmConfig::default()
        };
        let client = ChatCompletionClient::new(&config).unwrap();

        let result = client.complete("system", "user").await;
        assert!(matches!(result, Err(GenerationError::Request(_))));
    }
}
