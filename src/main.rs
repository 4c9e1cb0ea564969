//! hindi-imagen - Hindi/English prompt to image CLI.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod display;
mod error;
mod output;
mod params;
mod pipeline;
mod ports;
mod terminal;

use std::path::Path;
use std::process;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::context::{RecordingSession, ServiceContext};
use crate::display::ImageHandle;
use crate::error::AppError;
use crate::output::{resolve_output_path, save_image};
use crate::params::OutputFormat;
use crate::pipeline::{accept_prompt, Orchestrator, SubmitOutcome};
use crate::terminal::TerminalPresenter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "hindi_imagen=debug" } else { "hindi_imagen=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(AppError::Config)?;

    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(config.defaults.format.as_str())
        .parse()
        .map_err(AppError::InvalidArgument)?;

    let prompt = if cli.interactive { None } else { Some(cli.resolve_prompt()?) };
    if let Some(ref prompt) = prompt {
        // An empty prompt is rejected before any credential or cassette is needed.
        if !accept_prompt(&TerminalPresenter, prompt) {
            return Err(AppError::InvalidArgument("empty prompt".into()));
        }
    }

    let (ctx, recording_session) = build_context(&config)?;
    let orchestrator =
        Orchestrator::new(ctx.translator, ctx.generator, Box::new(TerminalPresenter));

    let result = match prompt {
        Some(prompt) => run_once(&orchestrator, &prompt, cli.output.as_deref(), format).await,
        None => run_interactive(&orchestrator, format).await,
    };

    // Adapters hold the recorder; release them before writing the cassette.
    drop(orchestrator);
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    result
}

/// Pick live, recording or replaying adapters from the environment.
fn build_context(config: &Config) -> Result<(ServiceContext, Option<RecordingSession>), AppError> {
    let replay_path = std::env::var("HINDI_IMAGEN_REPLAY").ok();
    let is_recording = std::env::var("HINDI_IMAGEN_REC").is_ok_and(|v| v == "true" || v == "1");

    if let Some(ref cassette_path) = replay_path {
        tracing::info!(cassette = %cassette_path, "replaying");
        Ok((ServiceContext::replaying(Path::new(cassette_path))?, None))
    } else if is_recording {
        tracing::info!("recording");
        let (ctx, session) = ServiceContext::recording(config)?;
        Ok((ctx, Some(session)))
    } else {
        Ok((ServiceContext::live(config)?, None))
    }
}

async fn run_once(
    orchestrator: &Orchestrator,
    prompt: &str,
    output: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    match orchestrator.submit(prompt).await {
        SubmitOutcome::Succeeded { image, prompt } => {
            save_displayed(orchestrator, &image, &prompt, output, format)
        }
        SubmitOutcome::Rejected => Err(AppError::InvalidArgument("empty prompt".into())),
        SubmitOutcome::Failed(reason) => Err(AppError::Generation(reason)),
        SubmitOutcome::Superseded => Ok(()),
    }
}

async fn run_interactive(orchestrator: &Orchestrator, format: OutputFormat) -> Result<(), AppError> {
    eprintln!("Enter a prompt (Hindi or English) per line; Ctrl-D to quit.");
    let mut lines = BufReader::new(tokio::io::stdin()).split(b'\n');

    while let Some(bytes) = lines.next_segment().await? {
        let Some(line) = decode_line(bytes) else {
            eprintln!("Skipped a line that is not valid UTF-8");
            continue;
        };
        if let SubmitOutcome::Succeeded { image, prompt } = orchestrator.submit(&line).await {
            if let Err(e) = save_displayed(orchestrator, &image, &prompt, None, format) {
                eprintln!("Error: {e}");
            }
        }
    }
    Ok(())
}

/// Decode one stdin line, dropping a trailing `\r`.
fn decode_line(mut bytes: Vec<u8>) -> Option<String> {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    String::from_utf8(bytes).ok()
}

fn save_displayed(
    orchestrator: &Orchestrator,
    handle: &ImageHandle,
    prompt: &str,
    output: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let image = orchestrator
        .image(handle)
        .ok_or_else(|| AppError::Generation(format!("{handle} was released before saving")))?;

    let path = resolve_output_path(output, prompt, format);
    save_image(&image.data, &image.mime_type, format, &path)?;
    eprintln!("Saved: {}", path.display());
    Ok(())
}
