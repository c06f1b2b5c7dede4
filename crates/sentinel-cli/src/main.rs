//! # sentinel CLI
//!
//! Scans a minted token for derivatives and records the result in `status.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sentinel_config::logging::{init_logging, LogLevel};
use sentinel_config::path::resolve_status_path;
use sentinel_config::{log_cli_debug, log_cli_warn, Config};
use sentinel_scan::{scan, ScanError, SentinelMatcher, StatusWriter, TokenId};

mod config;

/// Token sentinel - derivative scan stub with a single status record
#[derive(Parser)]
#[command(name = "sentinel")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Status file path (default: status.json beside the executable)
    #[arg(short, long, global = true, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a token and overwrite the status file (default command)
    Scan {
        /// Token to scan (default: [scan].token_id from config)
        #[arg(value_name = "TOKEN_ID", allow_negative_numbers = true)]
        token_id: Option<TokenId>,

        /// Token id the sentinel matcher reports as a match
        #[arg(long, value_name = "TOKEN_ID", allow_negative_numbers = true)]
        target: Option<TokenId>,
    },

    /// Print the current status record
    Status,

    /// Configuration management
    Config(config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config.log.level.parse().unwrap_or(LogLevel::Info)
    };
    init_logging(level);
    if !cli.verbose && config.log.level.parse::<LogLevel>().is_err() {
        log_cli_warn!(
            "Unknown log level in config, using info",
            level = config.log.level.as_str()
        );
    }

    let command = cli.command.unwrap_or(Commands::Scan {
        token_id: None,
        target: None,
    });

    match command {
        Commands::Scan { token_id, target } => {
            let token_id = token_id.unwrap_or(config.scan.token_id);
            let target = target.unwrap_or(config.scan.target_id);
            cmd_scan(&config, cli.output.as_deref(), token_id, target)
        }
        Commands::Status => cmd_status(&config, cli.output.as_deref()),
        Commands::Config(args) => config::run(args, &config),
    }
}

fn cmd_scan(
    config: &Config,
    output: Option<&Path>,
    token_id: TokenId,
    target: TokenId,
) -> Result<()> {
    // Progress is logged before the status path is resolved.
    let found = scan(&SentinelMatcher::new(target), token_id);

    let status_path = resolve_status_path(output, config)
        .with_context(|| format!("Failed to record scan of token {}", token_id))?;
    log_cli_debug!(
        "Resolved status path",
        path = tracing::field::display(status_path.display())
    );

    StatusWriter::new(&status_path)
        .write(token_id, found)
        .with_context(|| format!("Failed to record scan of token {}", token_id))?;

    println!("status.json updated at: {}", status_path.display());
    Ok(())
}

fn cmd_status(config: &Config, output: Option<&Path>) -> Result<()> {
    let status_path = resolve_status_path(output, config)?;
    let writer = StatusWriter::new(&status_path);

    let status = match writer.read() {
        Ok(status) => status,
        Err(ScanError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            anyhow::bail!(
                "No status record at {} (run `sentinel scan` first)",
                status_path.display()
            );
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read status record: {}", status_path.display()))
        }
    };

    if let Some(at) = status.scanned_at() {
        log_cli_debug!("Last scanned", at = at.to_rfc3339().as_str());
    }
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
