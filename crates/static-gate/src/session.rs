//! In-memory session store.
//!
//! Sessions live for the whole process and are never evicted. Restarting the
//! server invalidates every session.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Thread-safe set of valid session identifiers.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, bool>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` as a valid session. Inserting an existing id is a no-op.
    pub fn create(&self, id: impl Into<String>) {
        self.sessions.write().insert(id.into(), true);
    }

    /// Check whether `id` was ever recorded.
    pub fn is_valid(&self, id: &str) -> bool {
        self.sessions.read().get(id).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_store_is_empty() {
        let store = SessionStore::new();
        assert!(store.is_empty());
        assert!(!store.is_valid(""));
        assert!(!store.is_valid("abcdEFGH12345678"));
    }

    #[test]
    fn test_create_and_validate() {
        let store = SessionStore::new();
        store.create("abcdEFGH12345678");

        assert!(store.is_valid("abcdEFGH12345678"));
        assert!(!store.is_valid("abcdEFGH1234567"));
        assert!(!store.is_valid("ABCDEFGH12345678"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_create_overwrites() {
        let store = SessionStore::new();
        store.create("session-a");
        store.create("session-a");

        assert!(store.is_valid("session-a"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_create_and_validate() {
        let store = Arc::new(SessionStore::new());
        let writers = 8;
        let per_writer = 500;

        let handles: Vec<_> = (0..writers)
            .map(|w| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..per_writer {
                        let id = format!("w{w}-s{i}");
                        store.create(id.clone());
                        assert!(store.is_valid(&id));
                        // Readers racing on ids other writers may not have created yet.
                        let _ = store.is_valid(&format!("w{}-s{i}", (w + 1) % writers));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("writer thread panicked");
        }

        assert_eq!(store.len(), writers * per_writer);
        for w in 0..writers {
            for i in 0..per_writer {
                assert!(store.is_valid(&format!("w{w}-s{i}")));
            }
        }
        assert!(!store.is_valid("never-created"));
    }
}
