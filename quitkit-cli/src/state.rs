use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use quitkit_core::KvStore;

pub fn quitkit_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".quitkit"))
}

pub fn ensure_quitkit_home() -> Result<PathBuf> {
    let dir = quitkit_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(ensure_quitkit_home()?.join("settings.json"))
}

/// File-backed settings store: a flat JSON string map, rewritten on every
/// set (write-through, no batching).
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: PathBuf) -> Result<Self> {
        let entries = if path.exists() {
            let s = fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&s)
                .with_context(|| format!("parse {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(settings_path()?)
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quitkit_core::keys;

    fn temp_store_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "quitkit-test-{}-{}.json",
            tag,
            std::process::id()
        ))
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let path = temp_store_path("reopen");
        let _ = fs::remove_file(&path);

        let mut store = FileStore::open(path.clone()).unwrap();
        assert_eq!(store.get(keys::WAKE_TIME), None);
        store.set(keys::WAKE_TIME, "07:00").unwrap();
        store.set(keys::ALARMS_ENABLED, "true").unwrap();

        let reopened = FileStore::open(path.clone()).unwrap();
        assert_eq!(reopened.get(keys::WAKE_TIME), Some("07:00".to_string()));
        assert_eq!(reopened.get(keys::ALARMS_ENABLED), Some("true".to_string()));

        let _ = fs::remove_file(&path);
    }
}
