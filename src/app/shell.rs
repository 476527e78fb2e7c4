//! Interactive session loop.
//!
//! Reads one command per line, applies it to the `App`, and re-renders.
//! Lookups are awaited inline, so the next line is only read once the
//! current request has finished.

use std::io::Write;

use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::{render, App, LookupOutcome, ShellCommand, ShellKeyword};
use crate::storage::Storage;
use crate::view::render_map;

const PROMPT: &str = "ipscope> ";

fn help() -> String {
    let mut out = String::from("Commands:\n");
    for keyword in ShellKeyword::iter() {
        out.push_str("  ");
        out.push_str(keyword.usage());
        out.push('\n');
    }
    out
}

/// Runs the interactive session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails; lookup
/// and storage failures are shown to the user and the session continues.
pub async fn run_shell<S, R, W>(app: &mut App<S>, input: R, mut output: W) -> Result<()>
where
    S: Storage,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    write!(output, "{}{}", render(app.state()), PROMPT).context("Failed to write output")?;
    output.flush().context("Failed to flush output")?;

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let command = ShellCommand::parse(&line);
        debug!("Shell command: {:?}", command);

        let screen = match command {
            ShellCommand::Quit => break,
            ShellCommand::Empty => String::new(),
            ShellCommand::Help => help(),
            ShellCommand::Invalid(reason) => format!("{}\n", reason.yellow()),
            ShellCommand::Lookup(ip) => {
                // Failures are recorded in the state and rendered with it
                if let Ok(LookupOutcome::Added(record)) = app.lookup(&ip).await {
                    debug!("Added record {}", record.id);
                }
                app.render()
            }
            ShellCommand::List => app.render(),
            ShellCommand::Filter(text) => {
                app.set_filter(&text);
                app.render()
            }
            ShellCommand::Select(id) => match app.select(id) {
                Some(_) => app.render(),
                None => format!("{}\n", format!("No record with id {}", id).yellow()),
            },
            ShellCommand::Delete(id) => match app.delete(id) {
                Some(_) => app.render(),
                None => format!("{}\n", format!("No record with id {}", id).yellow()),
            },
            ShellCommand::Map => render_map(&app.state().map),
            ShellCommand::Dismiss => {
                app.dismiss_message();
                app.render()
            }
        };

        write!(output, "{}{}", screen, PROMPT).context("Failed to write output")?;
        output.flush().context("Failed to flush output")?;
    }

    writeln!(output).context("Failed to write output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GeoClient;
    use crate::storage::MemoryStorage;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    async fn run_lines(app: &mut App<MemoryStorage>, script: &str) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        run_shell(app, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    fn app_for(server: &Server) -> App<MemoryStorage> {
        let client = GeoClient::new(reqwest::Client::new(), &server.url_str("/"));
        App::new(client, MemoryStorage::default(), "slot")
    }

    #[tokio::test]
    async fn test_session_lookup_filter_delete() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ip/check")).respond_with(
                json_encoded(serde_json::json!({
                    "status": "success",
                    "ip": "9.9.9.9",
                    "country": {"name": "Switzerland"},
                    "city": {"name": "Zurich"},
                    "asn": {"organisation": "Quad9"},
                    "time": {"timezone": "Europe/Zurich"},
                    "location": {"latitude": 47.3769, "longitude": 8.5417}
                })),
            ),
        );
        let mut app = app_for(&server);

        let out = run_lines(&mut app, "9.9.9.9\nlookup 9.9.9.9\nfilter zurich\n").await;
        assert!(out.contains("Quad9"));
        assert!(out.contains("IP address 9.9.9.9 has already been looked up."));
        assert!(out.contains("1 of 1 records"));
        assert_eq!(app.state().history.len(), 1);

        let id = app.state().history.records()[0].id;
        let out = run_lines(&mut app, &format!("delete {}\nlist\n", id)).await;
        assert!(out.contains("No lookups yet."));
        assert!(app.state().history.is_empty());
    }

    #[tokio::test]
    async fn test_session_reports_empty_lookup_and_unknown_ids() {
        let server = Server::run();
        let mut app = app_for(&server);

        let out = run_lines(&mut app, "lookup\nselect 5\nbogus words here\nquit\nlist\n").await;
        assert!(out.contains("Please enter an IP address."));
        assert!(out.contains("No record with id 5"));
        assert!(out.contains("unknown command 'bogus'"));
    }

    #[tokio::test]
    async fn test_help_lists_every_command() {
        let server = Server::run();
        let mut app = app_for(&server);
        let out = run_lines(&mut app, "help\n").await;
        for keyword in ShellKeyword::iter() {
            assert!(out.contains(keyword.usage()));
        }
    }
}
