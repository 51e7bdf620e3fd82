use crate::partition::{Item, Partition};
use crate::table::Table;

/// Iterator over the entries of a [`DrhMap`](crate::DrhMap), in table order.
pub struct Iter<'a, V> {
    /// Slot cursors from the root down to the table being walked.
    tables: Vec<std::slice::Iter<'a, Option<Partition<V>>>>,
    items: std::slice::Iter<'a, Item<V>>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(root: &'a Table<V>, len: usize) -> Self {
        Self {
            tables: vec![root.slots().iter()],
            items: <&[Item<V>]>::default().iter(),
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.items.next() {
                self.remaining -= 1;
                return Some((item.key, &item.value));
            }

            let slots = self.tables.last_mut()?;
            match slots.next() {
                None => {
                    self.tables.pop();
                }
                Some(None) => {}
                Some(Some(Partition::Leaf(leaf))) => self.items = leaf.items().iter(),
                Some(Some(Partition::Internal(child))) => self.tables.push(child.slots().iter()),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> std::iter::FusedIterator for Iter<'_, V> {}
