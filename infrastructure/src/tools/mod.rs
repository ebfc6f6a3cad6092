//! Tool capability adapters.
//!
//! [`build_capability`] turns a `[tools.<name>]` section into an adapter;
//! a missing section yields [`UnconfiguredCapability`].

mod command;
mod http;

pub use command::CommandCapability;
pub use http::HttpCapability;

use crate::config::{FileToolConfig, ToolAdapterKind};
use gridwatch_application::ports::tool_capability::{
    ToolCapability, ToolError, UnconfiguredCapability,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Build the capability described by one tool section.
pub fn build_capability(
    name: &str,
    config: Option<&FileToolConfig>,
) -> Result<Arc<dyn ToolCapability>, ToolError> {
    let Some(config) = config else {
        info!("No [tools.{}] section; {} steps will report an error", name, name);
        return Ok(Arc::new(UnconfiguredCapability));
    };
    let timeout = Duration::from_secs(config.timeout_seconds);

    match config.kind {
        ToolAdapterKind::Http => {
            let url = config
                .url
                .as_deref()
                .ok_or_else(|| ToolError::Failed(format!("tools.{}: url is required", name)))?;
            info!("{} capability: HTTP {}", name, url);
            Ok(Arc::new(HttpCapability::new(url, timeout)?))
        }
        ToolAdapterKind::Command => {
            let program = config.program.as_deref().ok_or_else(|| {
                ToolError::Failed(format!("tools.{}: program is required", name))
            })?;
            info!("{} capability: command {}", name, program);
            Ok(Arc::new(CommandCapability::new(
                program,
                config.args.clone(),
                timeout,
            )))
        }
    }
}
