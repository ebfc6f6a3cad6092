//! CLI entrypoint for gridwatch
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use gridwatch_application::{
    AutoContinueReviewer, AutoSynthesizeReviewer, ConversationLogger, DispatchStepUseCase,
    HumanReviewPort, LlmDiagnosticOracle, NoWorkflowProgress, ProseSettings, RunWorkflowUseCase,
};
use gridwatch_domain::ReviewMode;
use gridwatch_infrastructure::{
    ChatCompletionsGateway, ConfigLoader, FileConfig, JsonlConversationLogger, build_capability,
};
use gridwatch_presentation::{
    ChatRepl, Cli, ConsoleFormatter, InteractiveReviewer, LineReader, ProgressReporter,
};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_overrides(&cli, &mut config);

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_tracing(cli.verbose, config.logging.file.as_deref())?;
    info!("Starting gridwatch");

    let errors = config.validate();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("config error: {}", error);
        }
        bail!("Invalid configuration ({} problem(s))", errors.len());
    }

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let gateway = Arc::new(
        ChatCompletionsGateway::from_config(&config.llm)
            .context("Failed to create LLM gateway")?,
    );
    info!("LLM: {} ({})", gateway.model(), config.llm.base_url);

    let oracles = LlmDiagnosticOracle::new(gateway)
        .with_prose_settings(ProseSettings {
            temperature: config.llm.temperature,
            synthesis_max_tokens: config.llm.max_tokens,
            ..ProseSettings::default()
        })
        .into_workflow_oracles();

    let dispatcher = DispatchStepUseCase::new(
        build_capability("scada", config.tools.scada.as_ref())?,
        build_capability("manual", config.tools.manual.as_ref())?,
    );

    let input = Arc::new(LineReader::stdin());
    let reviewer: Arc<dyn HumanReviewPort> = match config.review.mode {
        ReviewMode::Interactive => Arc::new(InteractiveReviewer::new(Arc::clone(&input))),
        ReviewMode::AutoContinue => Arc::new(AutoContinueReviewer),
        ReviewMode::AutoSynthesize => Arc::new(AutoSynthesizeReviewer),
    };
    info!("Review mode: {}", config.review.mode);

    let cancellation = CancellationToken::new();
    install_ctrl_c(cancellation.clone());

    let mut use_case =
        RunWorkflowUseCase::new(oracles, dispatcher, reviewer, config.workflow_params())
            .with_cancellation(cancellation.clone());
    if let Some(path) = &config.logging.conversation_log {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Writing workflow transcript to {}", logger.path().display());
                let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
                use_case = use_case.with_logger(logger);
            }
            None => warn!("Continuing without a workflow transcript"),
        }
    }

    let format = config.output.format;
    let show_progress = !cli.quiet;

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(use_case, input)
            .with_format(format)
            .with_progress(show_progress, cli.verbose > 0)
            .with_cancellation(cancellation);
        repl.run().await;
        return Ok(());
    }

    // Single query mode - query is required
    let Some(query) = cli.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        bail!("A query is required. Use --chat for interactive mode.");
    };

    let result = if show_progress {
        let progress = if cli.verbose > 0 {
            ProgressReporter::verbose()
        } else {
            ProgressReporter::new()
        };
        use_case.run_with_progress(query, &progress).await
    } else {
        use_case.run_with_progress(query, &NoWorkflowProgress).await
    };

    match result {
        Ok(output) => {
            println!("{}", ConsoleFormatter::render(&output, format));
            Ok(())
        }
        Err(e) if e.is_cancelled() => {
            eprintln!("Cancelled.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// CLI flags take precedence over every configuration source.
fn apply_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(mode) = cli.review_mode {
        config.review.mode = mode;
    }
    if let Some(timeout) = cli.review_timeout {
        config.review.timeout_seconds = timeout;
    }
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if let Some(max) = cli.max_iterations {
        config.workflow.max_iterations = max;
    }
    if let Some(format) = cli.output {
        config.output.format = format;
    }
}

/// Install the tracing subscriber: stderr always, plus a file when configured.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// First Ctrl+C cancels the running workflow; a second one exits at once.
fn install_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        info!("Received Ctrl+C, cancelling");
        eprintln!("\nCancelling... press Ctrl+C again to exit immediately.");
        token.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
}
