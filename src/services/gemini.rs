use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client,
};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::{
    config::ProviderConfig,
    error::{Result, TripError},
};

use super::provider::{build_http_client, post_json_with_retry, TextProvider};

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: ProviderConfig,
    http: Client,
}

impl GeminiClient {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http = build_http_client(config.timeout)?;
        Ok(Self { config, http })
    }

    fn endpoint(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if base.ends_with(":generateContent") {
            base.to_string()
        } else {
            format!("{}/models/{}:generateContent", base, self.config.model)
        }
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_output_tokens
            }
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let key = HeaderValue::from_str(&self.config.api_key)
            .map_err(|_| TripError::Config("Gemini API key is not a valid header value".into()))?;
        headers.insert("x-goog-api-key", key);
        Ok(headers)
    }
}

/// Text of the first candidate, all parts concatenated. Empty when the
/// response carries no candidate text.
pub(crate) fn candidate_text(response: &Value) -> String {
    response
        .get("candidates")
        .and_then(|candidates| candidates.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|text| text.as_str()))
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[async_trait]
impl TextProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        info!("Sending request to Gemini model {}", self.config.model);
        let response = post_json_with_retry(
            &self.http,
            &self.endpoint(),
            self.headers()?,
            &self.request_body(prompt),
            self.config.max_retries,
        )
        .await?;

        let text = candidate_text(&response);
        debug!("Generated text length: {}", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;

    #[test]
    fn test_candidate_text_joins_parts() {
        let response = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Trip Highlights:\n" }, { "text": "- Sun" }] }
            }]
        });
        assert_eq!(candidate_text(&response), "Trip Highlights:\n- Sun");
        assert_eq!(candidate_text(&json!({ "candidates": [] })), "");
    }

    #[tokio::test]
    async fn test_generate_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .match_header("x-goog-api-key", "g-key")
            .match_body(mockito::Matcher::PartialJson(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "plan it" }] }],
                "generationConfig": { "maxOutputTokens": 8192 }
            })))
            .with_status(200)
            .with_body(
                json!({
                    "candidates": [{ "content": { "parts": [{ "text": "Day 1\nMorning: x" }] } }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let config = ProviderConfig::new(ProviderKind::Gemini, "g-key")
            .with_base_url(server.url())
            .with_model("gemini-test");
        let client = GeminiClient::new(config).unwrap();
        let text = client.generate("plan it").await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Day 1\nMorning: x");
    }
}
