pub mod chat_completions;
pub mod gemini;
pub mod provider;

pub use chat_completions::ChatCompletionsClient;
pub use gemini::GeminiClient;
pub use provider::{provider_from_config, TextProvider};
