//! clipman2 - Wayland clipboard persistence
//!
//! Entry point for the binary. Intended usage:
//!
//! ```text
//! wl-paste -t "text/plain;charset=utf-8" --watch clipman2
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clipman2::config::Config;
use clipman2::error::{ClipmanError, EXIT_FAILURE};

/// Command-line arguments for clipman2.
///
/// Only diagnostics are configurable; run without arguments, clipman2
/// behaves the same as with them.
#[derive(Parser, Debug)]
#[command(name = "clipman2")]
#[command(version, about = "Persist Wayland clipboard text after its owner exits", long_about = None)]
pub struct Args {
    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "compact")]
    pub log_format: String,

    /// Write logs to file (in addition to stderr)
    #[arg(long, env = "CLIPMAN2_LOG_FILE")]
    pub log_file: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _guard = match init_logging(&args) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("clipman2: failed to initialise logging: {:#}", e);
            None
        }
    };

    debug!(
        "clipman2 v{} ({} {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_DATE")
    );

    match clipman2::invocation::run(&Config::default()).context("clipboard capture failed") {
        Ok(report) => {
            debug!("Done: {:?}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprint!("{}", clipman2::utils::format_user_error(&e));
            let code = e
                .downcast_ref::<ClipmanError>()
                .map_or(EXIT_FAILURE, ClipmanError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn init_logging(args: &Args) -> Result<Option<WorkerGuard>> {
    use std::fs::OpenOptions;

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("clipman2={level},warn", level = log_level))
    });

    // stdout is owned by wl-paste; logs always go to stderr
    if let Some(log_file_path) = &args.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file_path)
            .with_context(|| format!("Failed to open log file: {}", log_file_path))?;
        let (file_writer, guard) = tracing_appender::non_blocking(file);

        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(file_writer)
                            .with_ansi(false),
                    )
                    .init();
            }
            "pretty" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file_writer)
                            .with_ansi(false),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(file_writer)
                            .with_ansi(false),
                    )
                    .init();
            }
        }

        return Ok(Some(guard));
    }

    match args.log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(None)
}
