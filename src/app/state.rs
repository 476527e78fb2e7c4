//! Application state.

use crate::history::{History, Record};
use crate::view::MapView;

/// Transient message shown above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Inline error from the last action
    Error(String),
    /// The ip had already been looked up
    Duplicate(String),
}

impl Message {
    /// Text shown to the user.
    pub fn text(&self) -> String {
        match self {
            Message::Error(msg) => msg.clone(),
            Message::Duplicate(ip) => format!("IP address {} has already been looked up.", ip),
        }
    }
}

/// Everything the views render from.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Lookup history, newest first
    pub history: History,
    /// Current filter text (empty shows everything)
    pub filter: String,
    /// Id of the active row
    pub selected: Option<u64>,
    /// Map viewport and marker
    pub map: MapView,
    /// Inline error or duplicate notice
    pub message: Option<Message>,
}

impl AppState {
    /// Fresh state around an already loaded history.
    pub fn with_history(history: History) -> Self {
        Self {
            history,
            ..Default::default()
        }
    }

    /// Records passing the current filter.
    pub fn visible(&self) -> Vec<&Record> {
        self.history.filter(&self.filter)
    }

    /// The selected record, if it still exists.
    pub fn selected_record(&self) -> Option<&Record> {
        self.selected.and_then(|id| self.history.find(id))
    }
}
