//! CLI command definitions

use clap::Parser;
use gridwatch_domain::{OutputFormat, ReviewMode};
use std::path::PathBuf;

/// CLI arguments for gridwatch
#[derive(Parser, Debug)]
#[command(name = "gridwatch")]
#[command(author, version, about = "Human-in-the-loop diagnostics for industrial equipment")]
#[command(long_about = r#"
gridwatch answers equipment questions by planning a short list of data
lookups, running them one at a time, and pausing for your review between
steps.

Each query runs through:
1. Planning:   tagged steps (SCADA: sensor data, MANUAL: procedures)
2. Execution:  one step per iteration, at most --max-iterations
3. Replanning: continue, synthesize now, or answer directly
4. Review:     continue / edit / synthesize / quit (times out to continue)
5. Synthesis:  a structured diagnostic answer

Configuration files are loaded from (in priority order):
1. GRIDWATCH_* environment variables
2. --config <path>       Explicit config file
3. ./gridwatch.toml      Project-level config
4. ~/.config/gridwatch/config.toml   Global config

Example:
  gridwatch "Why is pump 3 running hot?"
  gridwatch --review-mode auto-synthesize --output json "Pressure trend for line 2?"
  gridwatch --chat
"#)]
pub struct Cli {
    /// The diagnostic question (not required in chat mode)
    pub query: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Review mode: interactive, auto-continue or auto-synthesize
    #[arg(long, value_name = "MODE")]
    pub review_mode: Option<ReviewMode>,

    /// Seconds to wait for a review decision before continuing
    #[arg(long, value_name = "SECONDS")]
    pub review_timeout: Option<u64>,

    /// Model name sent to the chat-completions endpoint
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Maximum executed steps per query
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<usize>,

    /// Output format: text or json
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
