mod address;
mod chart;
mod cli;
mod clock;
mod config;
mod display;
mod error;
mod fetcher;
mod format;
mod history;
mod logging;
mod monitor;
mod positions;

use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use hyperliquid::{Hyperliquid, HyperliquidConfig};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::address::{check_address, confirm, prompt_line, AddressCheck};
use crate::chart::TextChartRenderer;
use crate::config::MonitorConfig;
use crate::display::TerminalDashboard;
use crate::error::MonitorError;
use crate::fetcher::AccountStateFetcher;
use crate::logging::LogGate;
use crate::monitor::MonitorLoop;

/// Environment variable consulted when no address is given on the command line.
const ADDRESS_ENV: &str = "HL_ACCOUNT_ADDRESS";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _ = dotenvy::dotenv(); // load .env if present

    let cli = cli::Cli::parse();

    let stderr_gate = match logging::init(&cli.log_level, cli.log_file.as_deref()) {
        Ok(gate) => gate,
        Err(e) => {
            eprintln!("Error: cannot open log file: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli, stderr_gate).await {
        error!(error = %e, "monitor not started");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: cli::Cli, stderr_gate: Option<LogGate>) -> Result<(), MonitorError> {
    let address = resolve_address(cli.address.clone())?;

    if let AddressCheck::Suspicious(reason) = check_address(&address) {
        println!("Warning: address {address} {reason}; expected 0x followed by 40 hex digits.");
        if !cli.yes {
            let proceed = confirm(&mut io::stdin().lock(), &mut io::stdout(), "Continue anyway?")
                .map_err(|e| MonitorError::Config(format!("cannot read confirmation: {e}")))?;
            if !proceed {
                return Err(MonitorError::Config("address not confirmed".into()));
            }
        }
    }

    let client = Hyperliquid::new(HyperliquidConfig {
        info_url: cli.api_url.clone(),
        timeout: Duration::from_secs(cli.timeout),
    })?;

    println!("Testing connection to {}...", cli.api_url);
    client.fetch(&address).await?;
    println!("Connection successful. Starting monitor (Ctrl+C to stop).");

    let config = MonitorConfig {
        poll_interval_ms: cli.poll_interval.saturating_mul(1000),
        chart_interval_ms: cli.chart_interval.saturating_mul(1000),
        ..Default::default()
    };

    let cancel = setup_signal_handlers();
    // Let the handlers register before the dashboard takes over the screen.
    tokio::task::yield_now().await;
    let dashboard = TerminalDashboard::new()?;
    // The status panel carries loop events while the dashboard is up.
    if let Some(gate) = &stderr_gate {
        gate.close();
    }
    let renderer = TextChartRenderer::new(&cli.chart_dir);

    let mut monitor = MonitorLoop::new(config, address, client, dashboard, renderer);
    let report = monitor.run(cancel).await;
    let retained = monitor.history().len();
    // Leaves the alternate screen.
    drop(monitor);
    if let Some(gate) = &stderr_gate {
        gate.open();
    }

    println!(
        "Monitor stopped. {} ticks ({} failed), {} chart(s) written, {} samples retained.",
        report.ticks, report.failed_ticks, report.charts_written, retained
    );
    let _ = io::stdout().flush();
    Ok(())
}

/// Command line first, then the environment, then an interactive prompt.
fn resolve_address(from_cli: Option<String>) -> Result<String, MonitorError> {
    let candidate = match from_cli.or_else(|| std::env::var(ADDRESS_ENV).ok()) {
        Some(a) => Some(a),
        None => prompt_line(
            &mut io::stdin().lock(),
            &mut io::stdout(),
            "Enter Hyperliquid account address: ",
        )
        .map_err(|e| MonitorError::Config(format!("cannot read address: {e}")))?,
    };

    match candidate.map(|a| a.trim().to_string()) {
        Some(a) if !a.is_empty() => Ok(a),
        _ => Err(MonitorError::Config("no account address provided".into())),
    }
}

/// Register SIGINT and SIGTERM handlers that trigger the returned token.
fn setup_signal_handlers() -> CancellationToken {
    let cancel = CancellationToken::new();

    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("received SIGINT, stopping monitor");
        cancel_clone.cancel();
    });

    #[cfg(unix)]
    {
        let cancel_clone = cancel.clone();
        tokio::spawn(async move {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                    info!("received SIGTERM, stopping monitor");
                    cancel_clone.cancel();
                }
                Err(e) => error!(error = %e, "failed to register SIGTERM handler"),
            }
        });
    }

    cancel
}
