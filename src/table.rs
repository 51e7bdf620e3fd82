//! Slot arrays and recursive descent.

use crate::partition::{Item, Leaf, Partition, Probe};
use crate::split;

/// Floor-mod placement of `key` in a table of `modulus` slots.
///
/// `modulus` is a slot-vector length, so it never exceeds `isize::MAX` and
/// the conversion to `i64` is lossless on 64-bit targets.
#[inline]
pub(crate) fn slot_index(key: i64, modulus: usize) -> usize {
    debug_assert!(modulus > 0);
    key.rem_euclid(modulus as i64) as usize
}

/// One level of the tree: `modulus` slots addressed by `key mod modulus`.
#[derive(Clone, Debug)]
pub(crate) struct Table<V> {
    modulus: usize,
    depth: usize,
    /// Slot in the parent table whose leaf was split to create this table.
    /// Diagnostic only.
    origin: Option<usize>,
    slots: Vec<Option<Partition<V>>>,
}

impl<V> Table<V> {
    pub(crate) fn root(modulus: usize) -> Self {
        Self::with_slots(modulus, 0, None)
    }

    pub(crate) fn child(modulus: usize, depth: usize, origin: usize) -> Self {
        debug_assert!(modulus % 2 == 1, "non-root tables must be odd");
        Self::with_slots(modulus, depth, Some(origin))
    }

    fn with_slots(modulus: usize, depth: usize, origin: Option<usize>) -> Self {
        let mut slots = Vec::with_capacity(modulus);
        slots.resize_with(modulus, || None);
        Self {
            modulus,
            depth,
            origin,
            slots,
        }
    }

    #[inline]
    pub(crate) fn modulus(&self) -> usize {
        self.modulus
    }

    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub(crate) fn origin(&self) -> Option<usize> {
        self.origin
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Option<Partition<V>>] {
        &self.slots
    }

    /// Installs a leaf built by a split.
    pub(crate) fn install_leaf(&mut self, index: usize, leaf: Leaf<V>) {
        debug_assert!(self.slots[index].is_none());
        self.slots[index] = Some(Partition::Leaf(leaf));
    }

    /// Finds the leaf that would hold `key`, or `None` if its slot is empty.
    pub(crate) fn locate(&self, key: i64) -> Option<&Leaf<V>> {
        let mut table = self;
        loop {
            match table.slots[slot_index(key, table.modulus)].as_ref()? {
                Partition::Leaf(leaf) => return Some(leaf),
                Partition::Internal(child) => table = child,
            }
        }
    }

    pub(crate) fn locate_mut(&mut self, key: i64) -> Option<&mut Leaf<V>> {
        let index = slot_index(key, self.modulus);
        match self.slots[index].as_mut()? {
            Partition::Leaf(leaf) => Some(leaf),
            Partition::Internal(child) => child.locate_mut(key),
        }
    }

    /// Inserts or overwrites `key`, returning the previous value.
    ///
    /// A leaf that reaches `degree` items is split before this returns.
    pub(crate) fn set(&mut self, key: i64, value: V, degree: usize) -> Option<V> {
        let index = slot_index(key, self.modulus);
        let slot = &mut self.slots[index];
        let leaf = match slot {
            None => {
                *slot = Some(Partition::Leaf(Leaf::with_item(Item::new(key, value))));
                return None;
            }
            Some(Partition::Internal(child)) => return child.set(key, value, degree),
            Some(Partition::Leaf(leaf)) => leaf,
        };

        let probe = leaf.search(key);
        if let Probe::Found(_) = probe {
            return leaf.insert(probe, Item::new(key, value));
        }
        leaf.insert(probe, Item::new(key, value));
        if leaf.len() < degree {
            return None;
        }

        let items = leaf.take_items();
        let child = split::deep_rehash(items, self.modulus, self.depth, index, degree);
        self.slots[index] = Some(Partition::Internal(Box::new(child)));
        None
    }

    /// Removes `key`, clearing its slot if the leaf empties.
    ///
    /// Tables are never removed, only leaves.
    pub(crate) fn remove(&mut self, key: i64) -> Option<V> {
        let index = slot_index(key, self.modulus);
        let slot = &mut self.slots[index];
        let leaf = match slot {
            None => return None,
            Some(Partition::Internal(child)) => return child.remove(key),
            Some(Partition::Leaf(leaf)) => leaf,
        };

        let Probe::Found(at) = leaf.search(key) else {
            return None;
        };
        let item = leaf.remove(at);
        if leaf.is_empty() {
            *slot = None;
        }
        Some(item.value)
    }
}
