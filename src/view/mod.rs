//! Terminal rendering.
//!
//! Views are pure functions of application state: they take the data to show
//! and return the text to print. Nothing here mutates state or does I/O.

mod map;
mod table;

pub use map::{render_map, MapView, Marker};
pub use table::{render_history, render_table, EMPTY_FILTER, EMPTY_HISTORY};
