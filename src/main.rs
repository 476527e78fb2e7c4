//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ipscope` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Exit codes
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use ipscope::config::{Command, Opt};
use ipscope::{init_logger_with, run_command, Config};

fn load_dotenv() {
    // Current directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Must run before parsing so IPSCOPE_API_KEY from .env is visible to clap
    load_dotenv();

    let opt = Opt::parse();
    let config = Config::from(&opt);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let command = opt.command.unwrap_or(Command::Shell);
    if let Err(e) = run_command(config, command).await {
        eprintln!("ipscope error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
