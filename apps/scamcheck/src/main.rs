mod config;
mod output;
mod repl;
mod terminal;

use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    spawn_logged, HttpClassificationClient, InputController, Presenter, RequestOrchestrator,
    SessionEvent, SessionState, SAMPLE_MESSAGES,
};
use shared::protocol::DEFAULT_HISTORY_LIMIT;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::{config::Settings, output::OutputFormat, terminal::stdout_surface};

#[derive(Parser, Debug)]
#[command(name = "scamcheck", about = "Check messages against the scam classification service")]
struct Cli {
    /// Config file; defaults to ./scamcheck.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    service_url: Option<String>,
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Expand the technical details section in text output.
    #[arg(long, global = true)]
    details: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check one message and exit.
    Check {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Read messages and commands from stdin.
    Interactive,
    /// List the built-in sample messages.
    Samples,
    /// Probe the service health endpoint.
    Health,
    /// List the detector's patterns by category.
    Patterns,
    /// Show recently stored checks, newest first.
    History {
        /// Clamped to 1..=100 before sending.
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u32,
    },
    /// Show aggregate check statistics.
    Analytics,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    debug!(service_url = %settings.service_url, "settings loaded");

    let options = OutputOptions {
        format: cli.format,
        details: cli.details,
    };
    match cli.command.unwrap_or(Command::Interactive) {
        Command::Check { text } => run_check(&settings, &options, text.join(" ")).await,
        Command::Interactive => run_interactive(&settings, &options).await,
        Command::Samples => {
            println!("{}", repl::sample_listing(SAMPLE_MESSAGES));
            Ok(ExitCode::SUCCESS)
        }
        Command::Health => run_health(&settings).await,
        Command::Patterns => {
            let body = service_client(&settings)?.patterns().await?;
            print_view(output::service_view(options.format, &body, output::patterns_text)?)
        }
        Command::History { limit } => {
            let body = service_client(&settings)?.history(limit).await?;
            print_view(output::service_view(options.format, &body, output::history_text)?)
        }
        Command::Analytics => {
            let body = service_client(&settings)?.analytics().await?;
            print_view(output::service_view(options.format, &body, output::analytics_text)?)
        }
    }
}

struct OutputOptions {
    format: OutputFormat,
    details: bool,
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = config::load_settings(cli.config.as_deref())?;
    if let Some(url) = &cli.service_url {
        settings.service_url = url.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        settings.request_timeout_secs = secs;
    }
    settings.validate()?;
    Ok(settings)
}

fn service_client(settings: &Settings) -> Result<HttpClassificationClient> {
    HttpClassificationClient::new(&settings.service_url, settings.request_timeout())
}

fn print_view(view: String) -> Result<ExitCode> {
    println!("{view}");
    Ok(ExitCode::SUCCESS)
}

fn presenter(options: &OutputOptions, interactive: bool) -> Presenter {
    Presenter::new(
        output::backend(options.format, options.details),
        output::glyphs(options.format),
        Box::new(stdout_surface(interactive)),
    )
}

async fn run_check(settings: &Settings, options: &OutputOptions, text: String) -> Result<ExitCode> {
    let client = service_client(settings)?;
    let orchestrator = RequestOrchestrator::new(client, settings.orchestrator_config());
    let mut presenter = presenter(options, false);

    let mut session = SessionState::new();
    session.apply(SessionEvent::InputChanged(text.clone()));
    match orchestrator.submit(&mut session, &text, &mut presenter).await {
        Ok(report) => {
            info!(
                severity = ?report.banner.severity,
                confidence = report.confidence.percent,
                "check complete"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            debug!(kind = ?err.kind(), %err, "check failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_interactive(settings: &Settings, options: &OutputOptions) -> Result<ExitCode> {
    let client = service_client(settings)?;

    let probe = client.clone();
    spawn_logged("health-probe", async move {
        let health = probe.health().await?;
        if health.is_healthy() {
            debug!(status = %health.status, "classification service healthy");
        } else {
            warn!(status = %health.status, "classification service reports degraded health");
        }
        Ok(())
    });

    let (actions_tx, actions_rx) = mpsc::unbounded_channel();
    let orchestrator = RequestOrchestrator::new(client, settings.orchestrator_config());
    debug!(
        timeout = ?orchestrator.config().request_timeout,
        max_chars = orchestrator.config().max_input_chars,
        "orchestrator ready"
    );
    let controller = InputController::new(
        orchestrator,
        presenter(options, true),
        settings.sample_delay(),
        actions_tx.clone(),
    );

    println!("{}", repl::HELP);
    repl::spawn_stdin_reader(actions_tx, controller.samples())?;

    match tokio::spawn(controller.run(actions_rx)).await {
        Ok(session) => {
            info!(phase = session.phase().as_str(), "session ended");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("controller task failed: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_health(settings: &Settings) -> Result<ExitCode> {
    let client = service_client(settings)?;
    let health = client.health().await?;
    println!(
        "status={} service={} database={}",
        health.status,
        health.service.as_deref().unwrap_or("-"),
        health.database.as_deref().unwrap_or("-")
    );
    Ok(if health.is_healthy() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
