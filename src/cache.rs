use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::error::{Result, TerminologyError};
use crate::types::{CacheStats, ValidationOutcome};

#[derive(Debug, Clone)]
struct CachedOutcome {
    outcome: ValidationOutcome,
    stored_at: Instant,
}

/// Bounded LRU cache of server answers with a fixed time-to-live.
///
/// Every operation takes a synchronous lock for the duration of a single map
/// access, so lookups never suspend the calling task. Expired entries are
/// dropped lazily when they are next looked up.
pub struct OutcomeCache {
    entries: Mutex<LruCache<String, CachedOutcome>>,
    ttl: Duration,
}

impl OutcomeCache {
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| TerminologyError::configuration_error("Cache size cannot be zero"))?;

        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        })
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, CachedOutcome>> {
        // A poisoned lock still guards a consistent map
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the live outcome for `key`, marking it most recently used.
    pub fn get(&self, key: &str) -> Option<ValidationOutcome> {
        let mut entries = self.lock();

        match entries.get(key) {
            Some(cached) if cached.stored_at.elapsed() < self.ttl => {
                return Some(cached.outcome.clone());
            }
            Some(_) => {}
            None => return None,
        }

        entries.pop(key);
        None
    }

    /// Stores a server answer. Fallback outcomes are rejected and `false` is returned.
    pub fn insert(&self, key: impl Into<String>, outcome: ValidationOutcome) -> bool {
        if !outcome.was_validated() {
            return false;
        }

        self.lock().put(
            key.into(),
            CachedOutcome {
                outcome,
                stored_at: Instant::now(),
            },
        );
        true
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.lock();
        CacheStats {
            size: entries.len(),
            capacity: entries.cap().get(),
        }
    }
}

impl std::fmt::Debug for OutcomeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutcomeCache")
            .field("ttl", &self.ttl)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
