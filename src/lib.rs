//! # drh-map
//!
//! An integer-keyed map that handles bucket overflow with a *deep re-hash*
//! (DRH): instead of chaining or probing, a bucket that fills up is replaced
//! by a deeper table with a larger, odd number of slots.
//!
//! ## Structure
//!
//! - The root table has `root_size` slots, addressed by `key mod root_size`
//!   (floor-mod, so negative keys work).
//! - Each slot is empty, a *leaf* holding a small sorted array of items, or
//!   an *internal* partition pointing at a child table.
//! - When an insert brings a leaf to `degree` items, the leaf is split: its
//!   items are regrouped under the first odd modulus above the parent's that
//!   leaves every group below `degree`, and that grouping becomes the child
//!   table.
//!
//! Lookups descend one table per level and finish with a binary search in a
//! leaf of fewer than `degree` items. Tables are never freed once created.
//!
//! ## Example
//!
//! ```rust
//! use drh_map::DrhMap;
//!
//! let mut map: DrhMap<&str> = DrhMap::try_new(4, 2)?;
//! map.set(1, "a");
//! map.set(5, "b"); // same root slot as 1: the slot is split
//!
//! assert_eq!(map.get(1), Some(&"a"));
//! assert_eq!(map.get(5), Some(&"b"));
//! assert_eq!(map.remove(1), Some("a"));
//! assert_eq!(map.get(1), None);
//! # Ok::<(), drh_map::ConfigError>(())
//! ```
//!
//! `DrhMap` does no internal locking; [`SyncDrhMap`] wraps one behind a
//! read-write lock for shared use.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod debug;
mod error;
mod iter;
mod partition;
mod split;
pub mod sync;
mod table;
mod tracing_helpers;

pub use debug::{TableShape, TreeDisplay, TreeStats};
pub use error::{ConfigError, Result};
pub use iter::Iter;
pub use sync::SyncDrhMap;

use table::Table;

/// Shape parameters of a [`DrhMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of slots in the root table. At least 1.
    pub root_size: usize,
    /// Item count at which a leaf is split. At least 2.
    pub degree: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_size: 64,
            degree: 16,
        }
    }
}

impl Config {
    /// Checks that the parameters can build a working map.
    pub fn validate(&self) -> Result<()> {
        if self.root_size < 1 {
            return Err(ConfigError::ZeroRootSize);
        }
        if self.degree < 2 {
            return Err(ConfigError::DegreeTooSmall {
                degree: self.degree,
            });
        }
        Ok(())
    }
}

/// A map from `i64` keys to `V` built on deep re-hashing.
#[derive(Clone)]
pub struct DrhMap<V> {
    config: Config,
    root: Table<V>,
    len: usize,
}

impl<V> DrhMap<V> {
    /// Create an empty map with [`Config::default`].
    pub fn new() -> Self {
        let config = Config::default();
        debug_assert!(config.validate().is_ok());
        Self::from_valid(config)
    }

    /// Create an empty map with `root_size` root slots that splits leaves at
    /// `degree` items.
    ///
    /// Fails when `root_size < 1` or `degree < 2`.
    pub fn try_new(root_size: usize, degree: usize) -> Result<Self> {
        Self::with_config(Config { root_size, degree })
    }

    /// Create an empty map from `config`, validating it first.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: Config) -> Self {
        Self {
            config,
            root: Table::root(config.root_size),
            len: 0,
        }
    }

    /// The parameters this map was built with.
    #[inline]
    pub fn config(&self) -> Config {
        self.config
    }

    /// Number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert or overwrite `key`.
    ///
    /// Returns the previous value if the key was present. An insert that
    /// fills a leaf splits it before returning.
    pub fn set(&mut self, key: i64, value: V) -> Option<V> {
        let old = self.root.set(key, value, self.config.degree);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    /// Get a reference to the value for `key`.
    pub fn get(&self, key: i64) -> Option<&V> {
        self.root.locate(key)?.get(key)
    }

    /// Get a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        self.root.locate_mut(key)?.get_mut(key)
    }

    /// Check whether `key` is present.
    pub fn contains_key(&self, key: i64) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: i64) -> Option<V> {
        let old = self.root.remove(key);
        if old.is_some() {
            self.len -= 1;
        }
        old
    }

    /// Iterate over all entries.
    ///
    /// Entries come out in table order: by slot, depth-first into child
    /// tables, and ascending by key inside each leaf. This is not global key
    /// order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.root, self.len)
    }
}

impl<V> Default for DrhMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for DrhMap<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> Extend<(i64, V)> for DrhMap<V> {
    fn extend<I: IntoIterator<Item = (i64, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, V> IntoIterator for &'a DrhMap<V> {
    type Item = (i64, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(test)]
mod proptests;
