//! Tool adapter configuration from TOML (`[tools.scada]`, `[tools.manual]`)
//!
//! ```toml
//! [tools.scada]
//! kind = "http"
//! url = "http://localhost:8001/query"
//!
//! [tools.manual]
//! kind = "command"
//! program = "python3"
//! args = ["manual/search.py"]
//! timeout_seconds = 20
//! ```
//!
//! A tool without a section stays unconfigured; its steps produce an error
//! result instead of data.

use serde::{Deserialize, Serialize};

/// How a capability is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolAdapterKind {
    #[default]
    Http,
    Command,
}

/// One capability adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolConfig {
    pub kind: ToolAdapterKind,
    /// Endpoint for `http` adapters
    pub url: Option<String>,
    /// Executable for `command` adapters
    pub program: Option<String>,
    /// Arguments placed before the query
    pub args: Vec<String>,
    pub timeout_seconds: u64,
}

impl Default for FileToolConfig {
    fn default() -> Self {
        Self {
            kind: ToolAdapterKind::Http,
            url: None,
            program: None,
            args: Vec::new(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    pub scada: Option<FileToolConfig>,
    pub manual: Option<FileToolConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tools() {
        let toml_str = r#"
[scada]
url = "http://localhost:8001/query"

[manual]
kind = "command"
program = "python3"
args = ["search.py"]
"#;
        let config: FileToolsConfig = toml::from_str(toml_str).unwrap();
        let scada = config.scada.unwrap();
        assert_eq!(scada.kind, ToolAdapterKind::Http);
        assert_eq!(scada.timeout_seconds, 30);
        let manual = config.manual.unwrap();
        assert_eq!(manual.kind, ToolAdapterKind::Command);
        assert_eq!(manual.args, vec!["search.py"]);
    }
}
