//! Infrastructure layer for gridwatch
//!
//! Adapters for the ports defined in the application layer: layered
//! configuration loading, the chat-completions LLM gateway, capability
//! adapters for the sensor store and manual search, and the JSONL
//! transcript logger.

pub mod config;
pub mod llm;
pub mod logging;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLlmConfig, FileLoggingConfig,
    FileOutputConfig, FileReviewConfig, FileToolConfig, FileToolsConfig, FileWorkflowConfig,
    ToolAdapterKind,
};
pub use llm::ChatCompletionsGateway;
pub use logging::JsonlConversationLogger;
pub use tools::{CommandCapability, HttpCapability, build_capability};
