use std::{fmt, str::FromStr, time::Duration};

use crate::error::{Result, TripError};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro-latest";
pub const DEFAULT_CHAT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_CHAT_MODEL: &str = "openai/gpt-4.1-mini";

/// Which provider API the planner talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    /// Any OpenAI-compatible `/chat/completions` endpoint (OpenAI, OpenRouter, ...)
    ChatCompletions,
}

impl ProviderKind {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => DEFAULT_GEMINI_BASE_URL,
            ProviderKind::ChatCompletions => DEFAULT_CHAT_BASE_URL,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => DEFAULT_GEMINI_MODEL,
            ProviderKind::ChatCompletions => DEFAULT_CHAT_MODEL,
        }
    }

    fn api_key_var(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::ChatCompletions => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gemini => f.write_str("gemini"),
            ProviderKind::ChatCompletions => f.write_str("chat"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = TripError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "chat" | "openai" | "openrouter" => Ok(ProviderKind::ChatCompletions),
            other => Err(TripError::Config(format!(
                "unknown provider `{}` (expected gemini or chat)",
                other
            ))),
        }
    }
}

/// Everything needed to reach a generative provider.
///
/// Built explicitly or from the environment; the parser itself never reads it.
#[derive(Clone, PartialEq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    /// Extra attempts after the first failed one (429 or 5xx)
    pub max_retries: usize,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            kind,
            api_key: api_key.into(),
            base_url: kind.default_base_url().to_string(),
            model: kind.default_model().to_string(),
            timeout: Duration::from_secs(120),
            max_retries: 1,
            temperature: 0.7,
            max_output_tokens: 8192,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Read configuration from process environment variables.
    ///
    /// `ITINERARY_PROVIDER` picks the provider (default `gemini`); the key
    /// comes from `GEMINI_API_KEY` or `OPENAI_API_KEY` accordingly.
    /// `ITINERARY_MODEL`, `OPENAI_BASE_URL` / `OPENROUTER_BASE_URL` and
    /// `ITINERARY_TIMEOUT_SECS` override the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ProviderConfig::from_env`] with the provider already chosen,
    /// so `ITINERARY_PROVIDER` is not consulted.
    pub fn from_env_for(kind: ProviderKind) -> Result<Self> {
        Self::from_lookup_for(kind, |name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = match lookup("ITINERARY_PROVIDER") {
            Some(value) => value.parse()?,
            None => ProviderKind::default(),
        };

        Self::from_lookup_for(kind, lookup)
    }

    pub(crate) fn from_lookup_for<F>(kind: ProviderKind, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(kind.api_key_var()).ok_or_else(|| {
            TripError::Config(format!(
                "{} environment variable must be set to use the {} provider",
                kind.api_key_var(),
                kind
            ))
        })?;

        let mut config = Self::new(kind, api_key);

        if let Some(model) = lookup("ITINERARY_MODEL") {
            config.model = model;
        }

        if kind == ProviderKind::ChatCompletions {
            if let Some(base_url) =
                lookup("OPENAI_BASE_URL").or_else(|| lookup("OPENROUTER_BASE_URL"))
            {
                config.base_url = base_url;
            }
        }

        if let Some(timeout) = lookup("ITINERARY_TIMEOUT_SECS") {
            let secs = timeout.trim().parse::<u64>().map_err(|err| {
                TripError::Config(format!("invalid ITINERARY_TIMEOUT_SECS `{}`: {}", timeout, err))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
