use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime};

use dashmap::DashMap;

/// How long a looked-up modification time may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Stat the file on every lookup.
    Disabled,
    /// Reuse an entry until it is older than the given duration.
    Ttl(Duration),
}

impl CachePolicy {
    pub fn from_secs(secs: u64) -> Self {
        if secs == 0 {
            Self::Disabled
        } else {
            Self::Ttl(Duration::from_secs(secs))
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    modified: Option<SystemTime>,
    checked_at: Instant,
}

/// Modification times keyed by normalized asset path.
///
/// `None` records a file that was missing when last checked; it expires under
/// the same policy as a hit. Expired entries are swept on insert at most once
/// per TTL period, so paths that are never asked for again do not accumulate.
#[derive(Debug)]
pub struct MtimeCache {
    policy: CachePolicy,
    entries: DashMap<String, Entry>,
    last_sweep: Mutex<Instant>,
}

impl MtimeCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: DashMap::new(),
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Returns the cached lookup for `path` if it is still fresh.
    pub fn get(&self, path: &str) -> Option<Option<SystemTime>> {
        let CachePolicy::Ttl(ttl) = self.policy else {
            return None;
        };

        let entry = *self.entries.get(path)?;
        if entry.checked_at.elapsed() < ttl {
            return Some(entry.modified);
        }

        self.entries
            .remove_if(path, |_, e| e.checked_at == entry.checked_at);
        None
    }

    pub fn insert(&self, path: &str, modified: Option<SystemTime>) {
        let CachePolicy::Ttl(ttl) = self.policy else {
            return;
        };
        self.entries.insert(
            path.to_owned(),
            Entry {
                modified,
                checked_at: Instant::now(),
            },
        );
        self.sweep_if_due(ttl);
    }

    fn sweep_if_due(&self, ttl: Duration) {
        // A concurrent sweep already covers this period.
        let Ok(mut last) = self.last_sweep.try_lock() else {
            return;
        };
        if last.elapsed() < ttl {
            return;
        }
        *last = Instant::now();
        self.entries.retain(|_, e| e.checked_at.elapsed() < ttl);
    }

    pub fn invalidate(&self, path: &str) {
        self.entries.remove(path);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
