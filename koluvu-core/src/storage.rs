//! Preference storage boundary
//!
//! UI preferences go through an explicit key-value boundary so the behavior
//! is testable without a real browser environment. The embedding shell
//! provides the real store; `MemoryStore` backs tests and headless use.

use crate::error::SetupError;
use crate::state::InterviewMode;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Storage key for the setup flow's persisted preferences
pub const PREFERENCES_KEY: &str = "koluvu.setup.preferences";

/// Key-value persistence boundary for UI preferences
pub trait PreferenceStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>, SetupError>;
    /// Write a value
    fn set(&self, key: &str, value: &str) -> Result<(), SetupError>;
    /// Delete a value; a no-op when the key is absent
    fn remove(&self, key: &str) -> Result<(), SetupError>;
}

/// In-memory store for tests and headless embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SetupError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SetupError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SetupError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// UI preferences the setup flow persists across visits.
///
/// Only display-level preferences live here; the draft itself is never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupPreferences {
    /// Answer mode preselected on the next visit
    pub preferred_mode: Option<InterviewMode>,
    /// Dark mode flag
    pub dark_mode: bool,
}

impl SetupPreferences {
    /// Load preferences from the store; defaults when absent or unreadable
    /// JSON (a corrupt entry should not break the flow).
    pub fn load(store: &dyn PreferenceStore) -> Result<Self, SetupError> {
        match store.get(PREFERENCES_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw).unwrap_or_default()),
            None => Ok(Self::default()),
        }
    }

    /// Persist preferences to the store
    pub fn save(&self, store: &dyn PreferenceStore) -> Result<(), SetupError> {
        let raw = serde_json::to_string(self).map_err(|e| SetupError::Storage {
            reason: format!("Failed to encode preferences: {}", e),
        })?;
        store.set(PREFERENCES_KEY, &raw)
    }
}
