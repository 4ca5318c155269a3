//! Time-boxed in-process cache, one region per hierarchy level.

use emlak_core::AddressComponent;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

struct CacheEntry {
    data: Vec<AddressComponent>,
    expires_at: Instant,
}

/// In-memory key→entry cache for one hierarchy level.
///
/// Entries are created by `put`, read while unexpired, and lazily evicted
/// on access once `now >= expires_at` — there is no background sweeper.
/// State is local to the process and lost on restart; this is a
/// memoization layer, not a system of record. Thread-safe via RwLock;
/// concurrent misses may race and the last writer wins.
pub struct CacheRegion {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl CacheRegion {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return cached data while unexpired; stale entries behave as absent
    /// and are removed.
    pub fn get(&self, key: &str) -> Option<Vec<AddressComponent>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().ok()?;
            match entries.get(key) {
                Some(entry) if now < entry.expires_at => return Some(entry.data.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Stale entry: evict it, re-checking under the write lock in case
        // a concurrent put already refreshed it.
        if let Ok(mut entries) = self.entries.write() {
            if let Some(entry) = entries.get(key) {
                if now >= entry.expires_at {
                    entries.remove(key);
                }
            }
        }
        None
    }

    /// Unconditionally (over)write the entry with `expires_at = now + ttl`.
    pub fn put(&self, key: impl Into<String>, data: Vec<AddressComponent>) {
        let expires_at = Instant::now() + self.ttl;
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), CacheEntry { data, expires_at });
        }
    }

    /// Remove one entry, or all entries when `key` is `None`.
    /// Administrative operation, not on the request hot path.
    pub fn clear(&self, key: Option<&str>) {
        if let Ok(mut entries) = self.entries.write() {
            match key {
                Some(key) => {
                    entries.remove(key);
                }
                None => entries.clear(),
            }
        }
    }

    /// Number of entries currently held, including not-yet-evicted stale ones.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for CacheRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRegion")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}
