//! OpenAI chat-completions client

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{ChatClient, CompletionRequest};
use crate::agents::error::{LlmError, LlmResult};
use crate::config::LlmSettings;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for `POST {base_url}/chat/completions`
pub struct OpenAiChatClient {
    client: reqwest::Client,
    base_url: String,
    default_temperature: Option<f32>,
    default_max_tokens: Option<u32>,
}

impl OpenAiChatClient {
    /// Create a client against the public OpenAI endpoint
    pub fn new() -> LlmResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against any OpenAI-compatible endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> LlmResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("crewdeploy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LlmError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_temperature: None,
            default_max_tokens: None,
        })
    }

    /// Create a client from the `[llm]` settings section
    pub fn from_settings(settings: &LlmSettings) -> LlmResult<Self> {
        let mut client = Self::with_base_url(settings.base_url.clone())?;
        client.default_temperature = settings.temperature;
        client.default_max_tokens = settings.max_tokens;
        Ok(client)
    }

    fn build_request_body(&self, request: &CompletionRequest<'_>) -> Value {
        let mut body = json!({
            "model": request.model,
            "messages": request.messages,
        });

        if let Some(temp) = self.default_temperature {
            body["temperature"] = json!(temp);
        }

        if let Some(max_tokens) = self.default_max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        body
    }

    fn parse_response(response: OpenAiResponse) -> LlmResult<String> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyCompletion)?;

        choice.message.content.ok_or(LlmError::EmptyCompletion)
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> LlmResult<String> {
        let api_key = request.credential.expose_secret();
        if api_key.trim().is_empty() {
            return Err(LlmError::Authentication("API key is empty".to_string()));
        }

        let body = self.build_request_body(&request);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Authentication(format!(
                "{} - {}",
                status.as_u16(),
                error_text
            )));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let openai_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(format!("Failed to parse response: {}", e)))?;

        Self::parse_response(openai_response)
    }
}

// OpenAI API response types

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use secrecy::SecretString;

    fn key(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[tokio::test]
    async fn test_complete_sends_system_and_user_messages() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body_includes(
                    json!({
                        "model": "gpt-4o-mini",
                        "messages": [
                            {"role": "system", "content": "You are A"},
                            {"role": "user", "content": "hello"}
                        ]
                    })
                    .to_string(),
                );
            then.status(200).json_body(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "hi from A"}, "finish_reason": "stop"},
                    {"message": {"role": "assistant", "content": "second"}, "finish_reason": "stop"}
                ]
            }));
        });

        let client = OpenAiChatClient::with_base_url(server.url("/v1")).unwrap();
        let credential = key("test-key");
        let text = client
            .complete(CompletionRequest::new("gpt-4o-mini", "You are A", "hello", &credential))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(text, "hi from A");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_authentication() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401).body("invalid api key");
        });

        let client = OpenAiChatClient::with_base_url(server.url("/v1")).unwrap();
        let credential = key("bad");
        let err = client
            .complete(CompletionRequest::new("m", "s", "p", &credential))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Authentication(ref msg) if msg.contains("invalid api key")));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_api() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(503).body("overloaded");
        });

        let client = OpenAiChatClient::with_base_url(server.url("/v1")).unwrap();
        let credential = key("k");
        let err = client
            .complete(CompletionRequest::new("m", "s", "p", &credential))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_empty_choices() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({ "choices": [] }));
        });

        let client = OpenAiChatClient::with_base_url(server.url("/v1")).unwrap();
        let credential = key("k");
        let err = client
            .complete(CompletionRequest::new("m", "s", "p", &credential))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyCompletion));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).body("<html>not json</html>");
        });

        let client = OpenAiChatClient::with_base_url(server.url("/v1")).unwrap();
        let credential = key("k");
        let err = client
            .complete(CompletionRequest::new("m", "s", "p", &credential))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[tokio::test]
    async fn test_empty_credential_is_rejected_locally() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({ "choices": [] }));
        });

        let client = OpenAiChatClient::with_base_url(server.url("/v1")).unwrap();
        let credential = key("");
        let err = client
            .complete(CompletionRequest::new("m", "s", "p", &credential))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Authentication(_)));
        mock.assert_hits(0);
    }

    #[test]
    fn test_request_body_applies_defaults() {
        let settings = LlmSettings {
            temperature: Some(0.2),
            max_tokens: Some(256),
            ..LlmSettings::default()
        };
        let client = OpenAiChatClient::from_settings(&settings).unwrap();
        let credential = key("k");
        let body = client.build_request_body(&CompletionRequest::new("m", "s", "p", &credential));
        assert_eq!(body["model"], "m");
        assert_eq!(body["max_tokens"], 256);
        assert!(body["temperature"].is_number());
        assert_eq!(body["messages"][1]["role"], "user");
    }
}
