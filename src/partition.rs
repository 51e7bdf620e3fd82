//! Buckets: sorted leaves and internal redirections.

use crate::table::Table;

/// A stored key/value pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Item<V> {
    pub(crate) key: i64,
    pub(crate) value: V,
}

impl<V> Item<V> {
    #[inline]
    pub(crate) fn new(key: i64, value: V) -> Self {
        Self { key, value }
    }
}

/// Result of a binary search inside a leaf.
///
/// A miss still reports the last index compared so the caller can insert
/// without searching again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Probe {
    /// The leaf holds no items.
    Empty,
    /// The key sits at this index.
    Found(usize),
    /// The key is smaller than the item at this index.
    Before(usize),
    /// The key is larger than the item at this index.
    After(usize),
}

/// A table slot's contents.
#[derive(Clone, Debug)]
pub(crate) enum Partition<V> {
    Leaf(Leaf<V>),
    Internal(Box<Table<V>>),
}

/// Items ordered strictly ascending by key.
#[derive(Clone, Debug)]
pub(crate) struct Leaf<V> {
    items: Vec<Item<V>>,
}

impl<V> Leaf<V> {
    pub(crate) fn with_item(item: Item<V>) -> Self {
        Self { items: vec![item] }
    }

    /// Wraps items the caller already holds in ascending key order.
    pub(crate) fn from_sorted(items: Vec<Item<V>>) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0].key < w[1].key));
        Self { items }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub(crate) fn items(&self) -> &[Item<V>] {
        &self.items
    }

    pub(crate) fn search(&self, key: i64) -> Probe {
        if self.items.is_empty() {
            return Probe::Empty;
        }

        let mut lo = 0usize;
        let mut hi = self.items.len();
        let mut mid = 0usize;
        let mut probe = Probe::Empty;
        while lo < hi {
            mid = lo + (hi - lo) / 2;
            let here = self.items[mid].key;
            if key < here {
                hi = mid;
                probe = Probe::Before(mid);
            } else if key > here {
                lo = mid + 1;
                probe = Probe::After(mid);
            } else {
                return Probe::Found(mid);
            }
        }
        debug_assert!(matches!(probe, Probe::Before(i) | Probe::After(i) if i == mid));
        probe
    }

    pub(crate) fn get(&self, key: i64) -> Option<&V> {
        match self.search(key) {
            Probe::Found(i) => Some(&self.items[i].value),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        match self.search(key) {
            Probe::Found(i) => Some(&mut self.items[i].value),
            _ => None,
        }
    }

    /// Stores `item` at the position described by `probe`.
    ///
    /// Returns the replaced value when `probe` is an exact match.
    pub(crate) fn insert(&mut self, probe: Probe, item: Item<V>) -> Option<V> {
        let pos = match probe {
            Probe::Found(i) => {
                debug_assert_eq!(self.items[i].key, item.key);
                return Some(std::mem::replace(&mut self.items[i].value, item.value));
            }
            Probe::Empty => 0,
            Probe::Before(i) => i,
            Probe::After(i) => (i + 1).min(self.items.len()),
        };
        self.items.insert(pos, item);
        None
    }

    pub(crate) fn remove(&mut self, index: usize) -> Item<V> {
        self.items.remove(index)
    }

    /// Moves every item out, leaving the leaf empty.
    pub(crate) fn take_items(&mut self) -> Vec<Item<V>> {
        std::mem::take(&mut self.items)
    }
}
