use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::{
    config::ProviderConfig,
    error::{Result, TripError},
};

use super::provider::{build_http_client, post_json_with_retry, TextProvider};

const SYSTEM_PROMPT: &str = "You are a travel planning expert. Follow the requested output format exactly and respond with the itinerary only.";

/// Client for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    config: ProviderConfig,
    http: Client,
}

impl ChatCompletionsClient {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http = build_http_client(config.timeout)?;
        Ok(Self { config, http })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
            .map_err(|_| TripError::Config("API key is not a valid header value".into()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("X-Title", HeaderValue::from_static("trip-itinerary-rs"));
        Ok(headers)
    }
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
        });

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        body
    }
}

pub(crate) fn message_content(response: &Value) -> String {
    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl TextProvider for ChatCompletionsClient {
    fn name(&self) -> &'static str {
        "chat"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = ChatCompletionRequest::new(
            self.config.model.clone(),
            vec![
                json!({ "role": "system", "content": SYSTEM_PROMPT }),
                json!({ "role": "user", "content": prompt }),
            ],
        )
        .with_max_tokens(Some(self.config.max_output_tokens))
        .with_temperature(self.config.temperature)
        .into_value();

        info!("Sending chat completion request with model {}", self.config.model);
        let response = post_json_with_retry(
            &self.http,
            &build_chat_url(&self.config.base_url),
            self.headers()?,
            &body,
            self.config.max_retries,
        )
        .await?;

        let text = message_content(&response);
        debug!("Generated text length: {}", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;

    #[test]
    fn test_build_chat_url() {
        assert_eq!(
            build_chat_url("https://openrouter.ai/api/v1/"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
        assert_eq!(
            build_chat_url("http://localhost/v1/chat/completions"),
            "http://localhost/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body() {
        let body = ChatCompletionRequest::new("m", vec![json!({"role": "user", "content": "x"})])
            .with_max_tokens(Some(100))
            .into_value();

        assert_eq!(body["model"], "m");
        assert_eq!(body["max_tokens"], 100);
        assert!(body.get("temperature").is_none());
    }

    #[tokio::test]
    async fn test_generate_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(mockito::Matcher::PartialJson(json!({ "model": "test-model" })))
            .with_status(200)
            .with_body(
                json!({
                    "choices": [{ "message": { "role": "assistant", "content": "Trip Highlights:\n- Tapas" } }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let config = ProviderConfig::new(ProviderKind::ChatCompletions, "sk-test")
            .with_base_url(format!("{}/v1", server.url()))
            .with_model("test-model");
        let client = ChatCompletionsClient::new(config).unwrap();
        let text = client.generate("plan it").await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Trip Highlights:\n- Tapas");
    }

    #[test]
    fn test_missing_content_is_empty() {
        assert_eq!(message_content(&json!({ "choices": [] })), "");
    }
}
