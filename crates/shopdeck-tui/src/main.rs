//! `shopdeck-tui` — Terminal dashboard for a commerce microservice stack.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `shopdeck-core`'s [`ResourceWatch`](shopdeck_core::ResourceWatch).
//! Screens are navigable via number keys (1-4): Dashboard, Orders,
//! Catalog, and Search. All data flows through a single API gateway;
//! state refreshes by polling and user action only.
//!
//! Logs are written to a file (default `/tmp/shopdeck-tui.log`) to avoid
//! corrupting the terminal UI. A background data bridge task streams
//! resource updates from the gateway into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use shopdeck_core::{Gateway, GatewayConfig};

use crate::app::App;

/// Terminal dashboard for the shopdeck order / catalog / search stack.
#[derive(Parser, Debug)]
#[command(name = "shopdeck-tui", version, about)]
struct Cli {
    /// API gateway URL (e.g., http://localhost:8080)
    #[arg(short = 'u', long, env = "SHOPDECK_URL")]
    url: Option<String>,

    /// Background poll period in seconds (0 disables polling)
    #[arg(long, default_value_t = 5, env = "SHOPDECK_POLL_INTERVAL")]
    poll_interval: u64,

    /// Accept invalid TLS certificates (self-signed dev gateways)
    #[arg(long, default_value_t = false)]
    insecure: bool,

    /// Log file path (defaults to /tmp/shopdeck-tui.log)
    #[arg(long, default_value = "/tmp/shopdeck-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "shopdeck_tui={log_level},shopdeck_core={log_level},shopdeck_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("shopdeck-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Build a [`Gateway`] from CLI args, if a URL was provided.
fn build_gateway(cli: &Cli) -> Result<Option<Gateway>> {
    let Some(url_str) = cli.url.as_deref() else {
        return Ok(None);
    };
    let url = url_str
        .parse()
        .map_err(|e| color_eyre::eyre::eyre!("invalid gateway URL {url_str:?}: {e}"))?;

    let mut config = GatewayConfig::new(url);
    config.poll_interval_secs = cli.poll_interval;
    config.danger_accept_invalid_certs = cli.insecure;

    Ok(Some(Gateway::new(config)?))
}

/// Try loading a gateway from the shared config file (default profile).
fn build_gateway_from_config() -> Option<Gateway> {
    let cfg = shopdeck_config::load_config().ok()?;
    let gateway_config = shopdeck_config::default_gateway_config(&cfg).ok()?;
    Gateway::new(gateway_config).ok()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!(
        url = cli.url.as_deref().unwrap_or("(not set)"),
        poll_interval = cli.poll_interval,
        "starting shopdeck-tui"
    );

    // Priority: CLI flags > config file
    let gateway = build_gateway(&cli)?.or_else(build_gateway_from_config);
    let mut app = App::new(gateway);
    app.run().await?;

    Ok(())
}
