use std::path::PathBuf;

use clap::Parser;

/// hlmon: live console monitor for a Hyperliquid perpetuals account.
#[derive(Parser, Debug)]
#[command(name = "hlmon", version)]
pub struct Cli {
    /// Account address (0x + 40 hex). Falls back to HL_ACCOUNT_ADDRESS, then a prompt
    pub address: Option<String>,

    /// Seconds between account polls (at most one day)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..=86_400))]
    pub poll_interval: u64,

    /// Seconds between equity chart snapshots (at most seven days)
    #[arg(long, default_value = "300", value_parser = clap::value_parser!(u64).range(1..=604_800))]
    pub chart_interval: u64,

    /// Directory chart files are written to
    #[arg(long, default_value = ".")]
    pub chart_dir: PathBuf,

    /// Info endpoint URL
    #[arg(long, default_value = hyperliquid::config::MAINNET_INFO_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..=3_600))]
    pub timeout: u64,

    /// Skip the confirmation for addresses that do not look like 0x + 40 hex
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
