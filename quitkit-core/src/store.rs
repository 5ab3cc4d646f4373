//! Key-value settings store: the single source of truth for program state.
//!
//! Values are flat strings keyed by identity. Anything structured (numbers,
//! times, timestamps) is parsed at read time and degrades to a default when
//! absent or malformed; the store itself never validates.

use std::collections::HashMap;

use anyhow::Result;

/// Canonical setting keys.
pub mod keys {
    pub const START_DATE: &str = "startDate";
    pub const CIGARETTES_PER_DAY: &str = "cigarettesPerDay";
    pub const PRICE_PER_PACK: &str = "pricePerPack";
    pub const ALARMS_ENABLED: &str = "alarmsEnabled";
    pub const WAKE_TIME: &str = "wakeTime";
    pub const SLEEP_TIME: &str = "sleepTime";
}

/// Injected persistence capability. Storage (file, sqlite, platform KV) is a
/// later layer; the core only needs get/set by identity key.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
