//! Persisted resume download counter.

use anyhow::Result;
use tracing::warn;

use crate::services::KeyValueStore;

/// Storage key holding the counter as a decimal string.
pub const RESUME_DOWNLOADS_KEY: &str = "resume_downloads";

/// Download counter mirrored in memory and in a key-value store.
///
/// The in-memory value only ever changes to a value that has just been
/// written to the store, so the two never diverge after an increment.
pub struct DownloadCounter {
    store: Box<dyn KeyValueStore>,
    value: u64,
}

impl DownloadCounter {
    /// Loads the counter once from `store`.
    ///
    /// Missing, unreadable or unparsable values start the counter at zero.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let value = match read_persisted(store.as_ref()) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to read download counter, starting at 0");
                0
            }
        };

        Self { store, value }
    }

    /// Current in-memory value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Reads the persisted value, adds one, writes it back and updates the mirror.
    ///
    /// Another process writing between the read and the write loses its update
    /// (last writer wins).
    pub fn increment(&mut self) -> Result<u64> {
        let next = read_persisted(self.store.as_ref())?.saturating_add(1);
        self.store.set(RESUME_DOWNLOADS_KEY, &next.to_string())?;
        self.value = next;
        Ok(next)
    }
}

fn read_persisted(store: &dyn KeyValueStore) -> Result<u64> {
    match store.get(RESUME_DOWNLOADS_KEY)? {
        None => Ok(0),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(value) => Ok(value),
            Err(_) => {
                warn!(value = %raw, "Ignoring unparsable download counter");
                Ok(0)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;

    #[test]
    fn test_load_missing_key_starts_at_zero() {
        let counter = DownloadCounter::load(Box::new(MemoryStore::new()));
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn test_load_existing_value() {
        let store = MemoryStore::with_entry(RESUME_DOWNLOADS_KEY, "5");
        let counter = DownloadCounter::load(Box::new(store));
        assert_eq!(counter.value(), 5);
    }

    #[test]
    fn test_garbage_value_reads_as_zero() {
        let store = MemoryStore::with_entry(RESUME_DOWNLOADS_KEY, "lots");
        let counter = DownloadCounter::load(Box::new(store));
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn test_increment_writes_through() {
        let store = MemoryStore::with_entry(RESUME_DOWNLOADS_KEY, "5");
        let mut counter = DownloadCounter::load(Box::new(store.clone()));

        assert_eq!(counter.increment().unwrap(), 6);
        assert_eq!(counter.value(), 6);
        assert_eq!(store.get(RESUME_DOWNLOADS_KEY).unwrap().as_deref(), Some("6"));
    }

    #[test]
    fn test_increment_builds_on_external_writes() {
        let store = MemoryStore::with_entry(RESUME_DOWNLOADS_KEY, "1");
        let mut counter = DownloadCounter::load(Box::new(store.clone()));

        // Another instance bumped the stored value meanwhile
        store.set(RESUME_DOWNLOADS_KEY, "9").unwrap();

        assert_eq!(counter.increment().unwrap(), 10);
        assert_eq!(counter.value(), 10);
    }
}
