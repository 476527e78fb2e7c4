//! ipscope library: IP geolocation lookups with a local, filterable history.
//!
//! This library looks up IP addresses through the RapidAPI IP geolocation
//! service, keeps the results in a small ip-unique history persisted to a
//! storage slot, and renders the history as a table plus a map panel.
//!
//! # Example
//!
//! ```no_run
//! use ipscope::{App, Config, GeoClient, init_client, init_storage};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     api_key: Some("my-rapidapi-key".to_string()),
//!     ..Default::default()
//! };
//! let client = GeoClient::new(init_client(&config)?, &config.api_url);
//! let mut app = App::new(client, init_storage(&config), config.storage_key.clone());
//!
//! app.lookup("8.8.8.8").await?;
//! println!("{}", app.render());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime for lookups.

#![warn(missing_docs)]

pub mod api;
pub mod app;
pub mod config;
mod error_handling;
pub mod history;
pub mod initialization;
pub mod storage;
pub mod view;

// Re-export public API
pub use api::GeoClient;
pub use app::{App, LookupOutcome};
pub use config::{Command, Config, ConfigValidationError, LogFormat, LogLevel, Opt};
pub use error_handling::{InitializationError, LookupError, LookupErrorKind, StorageError};
pub use history::{History, Record};
pub use initialization::{init_client, init_logger_with, init_storage};
pub use run::run_command;

// Internal run module (dispatches one CLI command)
mod run {
    use anyhow::{bail, Context, Result};
    use log::warn;
    use tokio::io::BufReader;

    use crate::api::GeoClient;
    use crate::app::{run_shell, App, LookupOutcome, Message};
    use crate::config::{Command, Config, API_KEY_ENV};
    use crate::initialization::{init_client, init_storage};
    use crate::view::{render_history, render_map};

    /// Runs one command against the configured API and history.
    ///
    /// `Command::Shell` starts an interactive session on stdin/stdout; the
    /// other commands perform a single action and print the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the HTTP client
    /// cannot be built, a one-shot lookup fails, or a record id is unknown.
    /// Storage failures are logged and never returned.
    pub async fn run_command(config: Config, command: Command) -> Result<()> {
        config.validate().context("Invalid configuration")?;

        if config.api_key.is_none() {
            warn!(
                "No API key configured (set {} or pass --api-key); the API will likely reject requests",
                API_KEY_ENV
            );
        }

        let http = init_client(&config).context("Failed to initialize HTTP client")?;
        let client = GeoClient::new(http, &config.api_url);
        let mut app = App::new(client, init_storage(&config), config.storage_key.clone());

        match command {
            Command::Lookup { ip } => match app.lookup(&ip).await {
                Ok(LookupOutcome::Added(_)) => print!("{}", app.render()),
                Ok(LookupOutcome::Duplicate(ip)) => {
                    println!("{}", Message::Duplicate(ip.clone()).text());
                    let existing = app
                        .state()
                        .history
                        .records()
                        .iter()
                        .find(|r| r.ip == ip)
                        .map(|r| r.id);
                    if let Some(id) = existing {
                        app.select(id);
                        print!("{}", render_map(&app.state().map));
                    }
                }
                Err(e) => {
                    let message = e.user_message();
                    return Err(anyhow::Error::new(e).context(message));
                }
            },
            Command::List { filter } => {
                app.set_filter(filter.as_deref().unwrap_or_default());
                let state = app.state();
                print!(
                    "{}",
                    render_history(
                        &state.visible(),
                        state.history.len(),
                        &state.filter,
                        state.selected
                    )
                );
            }
            Command::Show { id } => {
                if app.select(id).is_none() {
                    bail!("No record with id {}", id);
                }
                print!("{}", app.render());
            }
            Command::Delete { id } => {
                let Some(removed) = app.delete(id) else {
                    bail!("No record with id {}", id);
                };
                println!("Deleted {} (id {})", removed.ip, removed.id);
            }
            Command::Shell => {
                let stdin = BufReader::new(tokio::io::stdin());
                run_shell(&mut app, stdin, std::io::stdout()).await?;
            }
        }

        Ok(())
    }
}
