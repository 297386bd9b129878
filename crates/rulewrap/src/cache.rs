//! Identity cache for `get_user_or_group` lookups.
//!
//! Entries share one reset timestamp. Once the TTL has elapsed since the last
//! reset, the next lookup drops every entry and starts a new window.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use rulewrap_types::UserOrGroup;
use tracing::debug;

/// Storage for resolved accounts, keyed by numeric account id.
pub trait IdentityCache: Send + Sync {
    fn get(&self, uid: &str) -> Option<UserOrGroup>;

    fn set(&self, uid: &str, value: UserOrGroup);

    /// Drop every entry and restart the TTL window.
    fn clear(&self);

    fn is_expired(&self) -> bool;
}

struct CacheState {
    entries: HashMap<String, UserOrGroup>,
    reset_at: Instant,
}

/// Default [`IdentityCache`] with a single time-to-live for all entries.
pub struct TtlCache {
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                reset_at: Instant::now(),
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn expired(&self, state: &CacheState) -> bool {
        state.reset_at.elapsed() >= self.ttl
    }
}

impl IdentityCache for TtlCache {
    fn get(&self, uid: &str) -> Option<UserOrGroup> {
        let mut state = self.state();
        if self.expired(&state) {
            debug!(entries = state.entries.len(), "identity cache expired, resetting");
            state.entries.clear();
            state.reset_at = Instant::now();
            return None;
        }
        let hit = state.entries.get(uid).cloned();
        debug!(uid, hit = hit.is_some(), "identity cache lookup");
        hit
    }

    fn set(&self, uid: &str, value: UserOrGroup) {
        self.state().entries.insert(uid.to_string(), value);
    }

    fn clear(&self) {
        let mut state = self.state();
        state.entries.clear();
        state.reset_at = Instant::now();
        debug!("identity cache cleared");
    }

    fn is_expired(&self) -> bool {
        let state = self.state();
        self.expired(&state)
    }
}
