//! `sentinel config` subcommands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use sentinel_config::{Config, PROJECT_CONFIG_PATH};
use std::fs;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the config file locations
    Path,

    /// Write a default project config to .sentinel/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs, config: &Config) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let rendered = config.to_toml().context("Failed to render configuration")?;
            print!("{}", rendered);
            Ok(())
        }
        ConfigCommands::Path => {
            match Config::global_config_path() {
                Some(path) => println!("Global:  {}", path.display()),
                None => println!("Global:  (no home directory)"),
            }
            println!("Project: {}", PROJECT_CONFIG_PATH);
            Ok(())
        }
        ConfigCommands::Init { force } => init(Path::new(PROJECT_CONFIG_PATH), force),
    }
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let contents = Config::default_toml().context("Failed to render default configuration")?;
    fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
