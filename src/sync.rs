//! A [`DrhMap`] behind one read-write lock.
//!
//! Lookups share the read side; `set` and `remove` take the write side for
//! the whole call, so a split is never observed half-done.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{Config, DrhMap, Result};

/// Thread-safe wrapper around [`DrhMap`] using a single coarse lock.
pub struct SyncDrhMap<V> {
    inner: RwLock<DrhMap<V>>,
}

impl<V> SyncDrhMap<V> {
    /// Create an empty map with [`Config::default`].
    pub fn new() -> Self {
        Self::from_map(DrhMap::new())
    }

    /// Create an empty map; see [`DrhMap::try_new`].
    pub fn try_new(root_size: usize, degree: usize) -> Result<Self> {
        DrhMap::try_new(root_size, degree).map(Self::from_map)
    }

    /// Create an empty map from `config`.
    pub fn with_config(config: Config) -> Result<Self> {
        DrhMap::with_config(config).map(Self::from_map)
    }

    /// Wrap an existing map.
    pub fn from_map(map: DrhMap<V>) -> Self {
        Self {
            inner: RwLock::new(map),
        }
    }

    /// Insert or overwrite `key`, returning the previous value.
    pub fn set(&self, key: i64, value: V) -> Option<V> {
        self.inner.write().set(key, value)
    }

    /// Clone out the value for `key`.
    pub fn get(&self, key: i64) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().get(key).cloned()
    }

    /// Check whether `key` is present.
    pub fn contains_key(&self, key: i64) -> bool {
        self.inner.read().contains_key(key)
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&self, key: i64) -> Option<V> {
        self.inner.write().remove(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Hold the read lock for several lookups.
    pub fn read(&self) -> RwLockReadGuard<'_, DrhMap<V>> {
        self.inner.read()
    }

    /// Hold the write lock for a batch of updates.
    pub fn write(&self) -> RwLockWriteGuard<'_, DrhMap<V>> {
        self.inner.write()
    }

    /// Unwrap the inner map.
    pub fn into_inner(self) -> DrhMap<V> {
        self.inner.into_inner()
    }
}

impl<V> Default for SyncDrhMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<DrhMap<V>> for SyncDrhMap<V> {
    fn from(map: DrhMap<V>) -> Self {
        Self::from_map(map)
    }
}
