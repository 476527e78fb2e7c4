//! Application core: state plus the operations the user can trigger.
//!
//! The state is explicit and owned by `App`; views render from `AppState`.
//! Every mutation of the history is persisted to the storage slot right
//! away. Storage failures are logged and the session carries on in memory.

mod command;
mod shell;
mod state;

pub use command::{ShellCommand, ShellKeyword};
pub use shell::run_shell;
pub use state::{AppState, Message};

use std::fmt::Write as _;

use colored::Colorize;
use log::{debug, error, info, warn};

use crate::api::GeoClient;
use crate::config::MAP_FOCUS_ZOOM;
use crate::error_handling::{LookupError, LookupErrorKind};
use crate::history::{History, Record};
use crate::storage::Storage;
use crate::view::{render_history, render_map};

/// Result of a lookup that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// A new record was added at the front of the history
    Added(Record),
    /// The ip was already in the history; nothing changed
    Duplicate(String),
}

/// Lookup application bound to an API client and a storage backend.
pub struct App<S: Storage> {
    state: AppState,
    client: GeoClient,
    storage: S,
    storage_key: String,
    persistent: bool,
}

fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}

impl<S: Storage> App<S> {
    /// Creates the application, loading the history from `storage_key`.
    ///
    /// Unreadable rows are skipped. If the slot content cannot be preserved
    /// (see [`History::restore`]), the session keeps its history in memory
    /// and never writes the slot.
    pub fn new(client: GeoClient, storage: S, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let restored = History::restore(&storage, &storage_key);
        Self {
            state: AppState::with_history(restored.history),
            client,
            storage,
            storage_key,
            persistent: restored.writable,
        }
    }

    /// Current state, for rendering.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Looks up `input` and adds the result to the history.
    ///
    /// The input is trimmed. Empty input and ips already in the history are
    /// handled without any network call. On success the new record is
    /// prepended, persisted, and selected. `&mut self` keeps a second lookup
    /// from starting while one is in flight.
    ///
    /// # Errors
    ///
    /// Returns the `LookupError` that ended the action. The history is left
    /// untouched and the error's user message is stored in the state.
    pub async fn lookup(&mut self, input: &str) -> Result<LookupOutcome, LookupError> {
        let ip = input.trim();
        if ip.is_empty() {
            return Err(self.fail(LookupError::EmptyInput));
        }

        if self.state.history.contains_ip(ip) {
            info!("{} is already in the history", ip);
            self.state.message = Some(Message::Duplicate(ip.to_string()));
            return Ok(LookupOutcome::Duplicate(ip.to_string()));
        }

        self.state.message = None;
        info!("Looking up {}", ip);

        let response = match self.client.fetch(ip).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(e)),
        };
        let id = self.state.history.next_id(now_millis());
        let record = match response.into_record(id, ip) {
            Ok(record) => record,
            Err(e) => return Err(self.fail(e)),
        };

        // The API may normalize the address into one we already have
        if self.state.history.contains_ip(&record.ip) {
            info!("{} resolved to {}, already in the history", ip, record.ip);
            self.state.message = Some(Message::Duplicate(record.ip.clone()));
            return Ok(LookupOutcome::Duplicate(record.ip));
        }

        info!("{} located in {}", record.ip, record.place());
        self.state.history.insert_front(record.clone());
        self.persist();
        self.focus(&record);
        Ok(LookupOutcome::Added(record))
    }

    /// Deletes one record and persists the change.
    ///
    /// If the record was selected, the selection and map marker are cleared.
    pub fn delete(&mut self, id: u64) -> Option<Record> {
        let removed = self.state.history.remove(id)?;
        info!("Deleted {} (id {})", removed.ip, removed.id);
        self.persist();
        if self.state.selected == Some(id) {
            self.state.selected = None;
            self.state.map.reset();
        }
        Some(removed)
    }

    /// Marks a record as active and moves the map to it.
    pub fn select(&mut self, id: u64) -> Option<Record> {
        let record = self.state.history.find(id)?.clone();
        self.focus(&record);
        Some(record)
    }

    /// Sets the filter text; the table shows matching records only.
    pub fn set_filter(&mut self, text: &str) {
        self.state.filter = text.trim().to_string();
    }

    /// Records passing the current filter.
    pub fn visible(&self) -> Vec<&Record> {
        self.state.visible()
    }

    /// Clears the inline error or duplicate notice.
    pub fn dismiss_message(&mut self) {
        self.state.message = None;
    }

    /// Renders message, table, and map panel.
    pub fn render(&self) -> String {
        render(&self.state)
    }

    fn focus(&mut self, record: &Record) {
        self.state.selected = Some(record.id);
        self.state.map.place_marker(record);
        self.state
            .map
            .fly_to(record.latitude, record.longitude, MAP_FOCUS_ZOOM);
    }

    fn fail(&mut self, e: LookupError) -> LookupError {
        match e.kind() {
            LookupErrorKind::EmptyInput => {}
            LookupErrorKind::InvalidOrNotFound => warn!("Lookup rejected: {}", e),
            LookupErrorKind::ApiUnavailable => error!("Lookup failed: {}", e),
        }
        self.state.message = Some(Message::Error(e.user_message().to_string()));
        e
    }

    fn persist(&self) {
        if !self.persistent {
            debug!("Slot '{}' is protected, history kept in memory", self.storage_key);
            return;
        }
        if let Err(e) = self.state.history.save(&self.storage, &self.storage_key) {
            warn!("Could not save history, keeping it in memory: {}", e);
        }
    }
}

/// Renders the whole screen for a state.
pub fn render(state: &AppState) -> String {
    let mut out = String::new();
    if let Some(message) = &state.message {
        let text = message.text();
        let _ = match message {
            Message::Error(_) => writeln!(out, "{}", text.red()),
            Message::Duplicate(_) => writeln!(out, "{}", text.yellow()),
        };
    }
    let visible = state.visible();
    out.push_str(&render_history(
        &visible,
        state.history.len(),
        &state.filter,
        state.selected,
    ));
    out.push('\n');
    out.push_str(&render_map(&state.map));
    out
}
