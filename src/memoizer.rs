//! Cache engine behind every memoized wrapper.
//!
//! A `Memoizer` is an unbounded map from key to computed value guarded by a
//! single mutex. The whole "look up, else compute and insert" sequence runs
//! under that mutex, so two callers never compute the same key twice, and
//! callers with different keys are serialized as well.
//!
//! The mutex is not re-entrant: a computation must not call back into the
//! memoizer that is computing it.

use cached::{Cached, UnboundCache};
use log::{debug, trace};
use std::fmt;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct CacheStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} entries, {} hits, {} misses",
            self.size, self.hits, self.misses
        )
    }
}

/// Type-erased view on a cache, used by wrappers that do not know the key type.
pub trait MemoStats: Send + Sync {
    fn stats(&self) -> CacheStats;
}

pub struct Memoizer<K, V> {
    cache: Mutex<UnboundCache<K, V>>,
}

impl<K, V> Memoizer<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        debug!("creating memoization cache");
        Self {
            cache: Mutex::new(UnboundCache::new()),
        }
    }

    // A panicking computation never inserts, so a poisoned cache is still consistent.
    fn lock(&self) -> MutexGuard<'_, UnboundCache<K, V>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached value for `key`, computing and storing it first on a miss.
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        let mut cache = self.lock();
        let mut missed = false;
        let value = cache
            .cache_get_or_set_with(key, || {
                missed = true;
                compute()
            })
            .clone();
        trace!("cache {}", if missed { "miss" } else { "hit" });
        value
    }

    /// Like [`get_or_compute`](Self::get_or_compute) for fallible computations.
    /// A failure is returned to the caller and nothing is stored, so the next
    /// call with the same key computes again.
    pub fn try_get_or_compute<F, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let mut cache = self.lock();
        let mut missed = false;
        let result = cache
            .cache_try_get_or_set_with(key, || {
                missed = true;
                compute()
            })
            .map(|value| value.clone());
        match (&result, missed) {
            (Err(_), _) => trace!("cache miss, computation failed"),
            (Ok(_), true) => trace!("cache miss"),
            (Ok(_), false) => trace!("cache hit"),
        }
        result
    }

    pub fn len(&self) -> usize {
        self.lock().cache_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().cache_clear();
    }

    pub fn stats(&self) -> CacheStats {
        let cache = self.lock();
        CacheStats {
            size: cache.cache_size(),
            hits: cache.cache_hits().unwrap_or(0),
            misses: cache.cache_misses().unwrap_or(0),
        }
    }
}

impl<K, V> Default for Memoizer<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoStats for Memoizer<K, V>
where
    K: Eq + Hash + Send,
    V: Clone + Send,
{
    fn stats(&self) -> CacheStats {
        Memoizer::stats(self)
    }
}
