//! Lookup history: the ordered, ip-unique list of records.
//!
//! The list is small and kept newest first. Duplicate detection and filtering
//! are linear scans; the whole list is serialized to one storage slot on every
//! mutation.

mod record;

pub use record::Record;

#[cfg(test)]
pub(crate) use record::sample;

use log::{debug, warn};

use crate::error_handling::StorageError;
use crate::storage::Storage;

/// Ordered collection of lookup records, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    records: Vec<Record>,
}

impl History {
    /// Creates a history from records already in newest-first order.
    ///
    /// Later occurrences of an ip already seen are dropped and records whose
    /// id is already taken get a fresh one, so both uniqueness invariants hold
    /// even for hand-edited slot files.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut history = Self::default();
        for mut record in records {
            if history.contains_ip(&record.ip) {
                warn!("Dropping duplicate record for {} (id {})", record.ip, record.id);
                continue;
            }
            if history.find(record.id).is_some() {
                let id = history.next_id(record.id);
                warn!("Renumbering record for {} (id {} -> {})", record.ip, record.id, id);
                record.id = id;
            }
            history.records.push(record);
        }
        history
    }

    /// Loads the history from a storage slot.
    ///
    /// Same as [`History::restore`], discarding whether the slot may be
    /// overwritten.
    pub fn load<S: Storage + ?Sized>(storage: &S, key: &str) -> Self {
        Self::restore(storage, key).history
    }

    /// Loads the history from a storage slot, protecting unreadable content.
    ///
    /// A missing slot yields an empty history. Rows that do not parse are
    /// skipped one by one; if the slot is not a JSON array at all, nothing is
    /// loaded. Whenever content was skipped, the raw slot is first copied to
    /// the backup slot `<key>.bak`. If the slot cannot be read, or the backup
    /// cannot be written, `Restored::writable` is false and the slot must not
    /// be overwritten during this session.
    pub fn restore<S: Storage + ?Sized>(storage: &S, key: &str) -> Restored {
        let raw = match storage.load(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Storage slot '{}' is empty", key);
                return Restored::complete(Self::default());
            }
            Err(e) => {
                warn!("Could not read history from storage, keeping it in memory: {}", e);
                return Restored {
                    history: Self::default(),
                    writable: false,
                };
            }
        };

        let (records, skipped) = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(rows) => parse_rows(rows),
            Err(e) => {
                warn!("Could not parse history from storage: {}", e);
                (Vec::new(), 1)
            }
        };
        debug!("Loaded {} records from slot '{}'", records.len(), key);
        let history = Self::from_records(records);

        if skipped == 0 {
            return Restored::complete(history);
        }

        let backup = backup_key(key);
        match storage.save(&backup, &raw) {
            Ok(()) => {
                warn!(
                    "Slot '{}' had unreadable content; the original was copied to '{}'",
                    key, backup
                );
                Restored::complete(history)
            }
            Err(e) => {
                warn!(
                    "Could not back up slot '{}', keeping the history in memory: {}",
                    key, e
                );
                Restored {
                    history,
                    writable: false,
                }
            }
        }
    }

    /// Serializes the whole list into a storage slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the slot write fails.
    pub fn save<S: Storage + ?Sized>(&self, storage: &S, key: &str) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.records)?;
        storage.save(key, &raw)
    }

    /// All records, newest first.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true if a record with exactly this ip exists.
    pub fn contains_ip(&self, ip: &str) -> bool {
        self.records.iter().any(|r| r.ip == ip)
    }

    /// Finds a record by id.
    pub fn find(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Prepends a record.
    ///
    /// Returns false, leaving the list unchanged, if its ip is already present.
    pub fn insert_front(&mut self, record: Record) -> bool {
        if self.contains_ip(&record.ip) {
            return false;
        }
        self.records.insert(0, record);
        true
    }

    /// Removes the record with this id.
    pub fn remove(&mut self, id: u64) -> Option<Record> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(pos))
    }

    /// Records whose ip, country, city, ISP or timezone contains `text`.
    ///
    /// Matching is case-insensitive on the trimmed text. Empty text returns
    /// every record. Collection order is preserved.
    pub fn filter(&self, text: &str) -> Vec<&Record> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }
        self.records.iter().filter(|r| r.matches(&needle)).collect()
    }

    /// Id for a record created at `now_millis`.
    ///
    /// Ids are creation timestamps, bumped past the current maximum when the
    /// clock has not advanced so every id stays unique.
    pub fn next_id(&self, now_millis: u64) -> u64 {
        match self.records.iter().map(|r| r.id).max() {
            Some(max) if now_millis <= max => max
                .checked_add(1)
                .unwrap_or_else(|| self.lowest_free_id()),
            _ => now_millis,
        }
    }

    fn lowest_free_id(&self) -> u64 {
        (0..=u64::MAX)
            .find(|id| self.find(*id).is_none())
            .unwrap_or_default()
    }
}

/// A history read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    /// The records that could be read
    pub history: History,
    /// False if saving over the slot would lose content that was not loaded
    pub writable: bool,
}

impl Restored {
    fn complete(history: History) -> Self {
        Self {
            history,
            writable: true,
        }
    }
}

/// Slot holding the raw content of `key` when it could not be fully read.
pub fn backup_key(key: &str) -> String {
    format!("{}.bak", key)
}

fn parse_rows(rows: Vec<serde_json::Value>) -> (Vec<Record>, usize) {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    for (index, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<Record>(row) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Skipping unreadable history row {}: {}", index, e);
                skipped += 1;
            }
        }
    }
    (records, skipped)
}
