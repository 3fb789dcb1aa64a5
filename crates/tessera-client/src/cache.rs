//! Bounded cache of recently resolved addresses.
//!
//! Keys are addresses; values are either chunk contents or pointer
//! targets. Eviction is oldest-insertion-first once the capacity bound is
//! reached. Local writes invalidate their address before the write
//! returns, so a client never serves itself stale data for an address it
//! just wrote. Chunk content for a given address is immutable, but the
//! entry is still invalidated rather than special-cased.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use tessera_types::Address;

/// A cached resolution result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CachedValue {
    /// Chunk content bytes.
    Chunk(Vec<u8>),
    /// Current pointer target.
    Target(Address),
}

/// Hit/miss counters for cache introspection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
struct CacheInner {
    map: HashMap<Address, CachedValue>,
    order: VecDeque<Address>,
    stats: CacheStats,
}

/// Bounded address cache with explicit invalidation.
#[derive(Debug)]
pub struct ResolveCache {
    capacity: usize,
    inner: RwLock<CacheInner>,
}

impl ResolveCache {
    /// Create a cache holding at most `capacity` entries. Capacity 0
    /// disables caching entirely.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: RwLock::new(CacheInner::default()),
        }
    }

    /// Look up an address, counting the hit or miss.
    pub fn get(&self, address: &Address) -> Option<CachedValue> {
        let mut inner = self.inner.write().expect("lock poisoned");
        match inner.map.get(address).cloned() {
            Some(value) => {
                inner.stats.hits += 1;
                Some(value)
            }
            None => {
                inner.stats.misses += 1;
                None
            }
        }
    }

    /// Insert a resolution result, evicting the oldest entry if full.
    pub fn insert(&self, address: Address, value: CachedValue) {
        if self.capacity == 0 {
            return;
        }
        let mut inner = self.inner.write().expect("lock poisoned");
        if inner.map.insert(address, value).is_none() {
            inner.order.push_back(address);
            while inner.map.len() > self.capacity {
                if let Some(oldest) = inner.order.pop_front() {
                    inner.map.remove(&oldest);
                }
            }
        }
    }

    /// Drop any cached value for an address. Called on every local write.
    pub fn invalidate(&self, address: &Address) {
        let mut inner = self.inner.write().expect("lock poisoned");
        if inner.map.remove(address).is_some() {
            inner.order.retain(|a| a != address);
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").map.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.read().expect("lock poisoned").stats
    }
}
