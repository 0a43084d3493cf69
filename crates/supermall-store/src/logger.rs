// ABOUTME: Side-effect logger that writes through tracing and appends to the stored log list.
// ABOUTME: The log collection is append-only and unbounded; there is no rotation.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde_json::Value;
use supermall_core::{Collection, LogEntry, LogLevel};

use crate::local::LocalStorage;

/// Writes every message both to the process log (tracing) and to the
/// `logs` collection entry in storage. Appends go straight to storage with
/// no artificial latency; the log is a side channel, not a backend call.
///
/// The entry list is held in memory behind a lock shared by all clones, so
/// concurrent appends cannot lose entries. An unreadable stored entry
/// starts the list fresh rather than failing construction.
///
/// A failure to persist a log entry never fails the operation being logged;
/// it is reported through tracing and dropped.
#[derive(Clone)]
pub struct Logger {
    storage: LocalStorage,
    entries: Arc<Mutex<Vec<LogEntry>>>,
    user: String,
}

impl Logger {
    pub fn new(storage: LocalStorage) -> Self {
        let entries = storage
            .get_item(&Collection::Logs.storage_key())
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        Self {
            storage,
            entries: Arc::new(Mutex::new(entries)),
            user: "mock-user".to_string(),
        }
    }

    pub fn info(&self, message: &str, data: Value) {
        tracing::info!(target: "supermall", %message, %data);
        self.append(LogLevel::Info, message, data);
    }

    pub fn warn(&self, message: &str, data: Value) {
        tracing::warn!(target: "supermall", %message, %data);
        self.append(LogLevel::Warn, message, data);
    }

    pub fn error(&self, message: &str, data: Value) {
        tracing::error!(target: "supermall", %message, %data);
        self.append(LogLevel::Error, message, data);
    }

    /// Every entry so far, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clone()
    }

    fn append(&self, level: LogLevel, message: &str, data: Value) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.push(LogEntry {
            level,
            message: message.to_string(),
            data,
            timestamp: Utc::now(),
            user: self.user.clone(),
        });

        // The lock is held across the persist; appends never interleave.
        let serialized = match serde_json::to_string(&*entries) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("failed to serialize log entries: {}", e);
                return;
            }
        };
        if let Err(e) = self
            .storage
            .set_item(&Collection::Logs.storage_key(), &serialized)
        {
            tracing::warn!("failed to persist log entry: {}", e);
        }
    }
}
