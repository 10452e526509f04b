// Per-instance response cache for read calls.
//
// An explicit object owned by the client, never ambient state. Entries
// are keyed by (url, serialized request body) and live either for the
// client's lifetime (no TTL) or until their TTL lapses. Mutation calls
// never go through the cache.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;

struct Entry {
    inserted: Instant,
    value: Value,
}

/// In-memory cache of parsed read responses.
///
/// Interior mutability via a `Mutex` held only for map access, never
/// across an await point. A poisoned lock degrades to cache misses.
pub struct ResponseCache {
    ttl: Option<Duration>,
    entries: Mutex<HashMap<String, Entry>>,
}

impl ResponseCache {
    /// Create a cache. `None` means entries live for the client's lifetime.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Build the canonical key for a request.
    pub fn key(url: &str, body: &str) -> String {
        format!("{url}\n{body}")
    }

    /// Look up a fresh entry, evicting it if its TTL has lapsed.
    pub fn get(&self, key: &str) -> Option<Value> {
        let Ok(mut entries) = self.entries.lock() else {
            return None;
        };

        if let Some(entry) = entries.get(key) {
            if let Some(ttl) = self.ttl {
                if entry.inserted.elapsed() >= ttl {
                    entries.remove(key);
                    return None;
                }
            }
            return Some(entry.value.clone());
        }
        None
    }

    /// Store a parsed response.
    pub fn insert(&self, key: String, value: Value) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        entries.insert(
            key,
            Entry {
                inserted: Instant::now(),
                value,
            },
        );
    }

    /// Drop every entry.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
