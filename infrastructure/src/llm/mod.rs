//! LLM gateway adapters.

mod chat_completions;

pub use chat_completions::ChatCompletionsGateway;
