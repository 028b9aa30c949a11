use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client, StatusCode};
use serde_json::Value;
use tracing::warn;

use crate::{
    config::{ProviderConfig, ProviderKind},
    error::{Result, TripError},
};

use super::{chat_completions::ChatCompletionsClient, gemini::GeminiClient};

const INITIAL_BACKOFF: Duration = Duration::from_millis(250);

/// A service that turns a prompt into free-form text.
#[async_trait]
pub trait TextProvider: Send + Sync + fmt::Debug {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Generate text for `prompt`. An `Ok` empty string means the provider
    /// answered but produced nothing.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Build the provider client described by `config`.
pub fn provider_from_config(config: ProviderConfig) -> Result<Box<dyn TextProvider>> {
    match config.kind {
        ProviderKind::Gemini => Ok(Box::new(GeminiClient::new(config)?)),
        ProviderKind::ChatCompletions => Ok(Box::new(ChatCompletionsClient::new(config)?)),
    }
}

pub(crate) fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| TripError::Config(format!("Failed to build HTTP client: {err}")))
}

/// POST `body` as JSON and return the decoded JSON response.
///
/// 429 responses honour `Retry-After`; 5xx responses and timeouts back off
/// exponentially. Either is retried at most `max_retries` times.
pub(crate) async fn post_json_with_retry(
    client: &Client,
    url: &str,
    headers: HeaderMap,
    body: &Value,
    max_retries: usize,
) -> Result<Value> {
    let mut attempt = 0;
    let mut backoff = INITIAL_BACKOFF;

    loop {
        let sent = client
            .post(url)
            .headers(headers.clone())
            .json(body)
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                if attempt < max_retries {
                    warn!("Provider request timed out, retrying in {:?}", backoff);
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                    backoff *= 2;
                    continue;
                }
                return Err(TripError::Timeout(format!(
                    "provider did not answer after {} attempt(s)",
                    attempt + 1
                )));
            }
            Err(err) => return Err(TripError::Http(err)),
        };

        let status = response.status();
        let response_headers = response.headers().clone();
        let response_text = response.text().await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response_headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(backoff);

            if attempt < max_retries {
                warn!("Provider rate limited the request, retrying in {:?}", retry_after);
                tokio::time::sleep(retry_after).await;
                attempt += 1;
                backoff *= 2;
                continue;
            }

            return Err(TripError::RateLimit {
                retry_after: retry_after.as_secs().max(1),
            });
        }

        if status.is_server_error() && attempt < max_retries {
            warn!("Provider returned {}, retrying in {:?}", status, backoff);
            tokio::time::sleep(backoff).await;
            attempt += 1;
            backoff *= 2;
            continue;
        }

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|json| {
                    json.get("error")
                        .and_then(|error| error.get("message"))
                        .and_then(|value| value.as_str())
                        .map(|s| s.to_string())
                })
                .unwrap_or(response_text);

            return Err(TripError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let response_json: Value = serde_json::from_str(&response_text)?;

        if let Some(error) = response_json.get("error") {
            let message = error
                .get("message")
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(TripError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        return Ok(response_json);
    }
}
