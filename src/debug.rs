//! Tree inspection: statistics, shape, integrity checks and rendering.

use std::fmt;

use crate::partition::Partition;
use crate::table::{slot_index, Table};
use crate::DrhMap;

/// Node counts of a map's tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Tables, including the root.
    pub tables: usize,
    /// Non-empty leaves.
    pub leaves: usize,
    /// Items reachable from the root.
    pub items: usize,
    /// Depth of the deepest table (root = 0).
    pub max_depth: usize,
}

/// Position and size of one table, as reported by [`DrhMap::shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableShape {
    /// Distance from the root.
    pub depth: usize,
    /// Slot count.
    pub modulus: usize,
    /// Parent slot this table was split from; `None` for the root.
    pub origin: Option<usize>,
}

impl<V> DrhMap<V> {
    /// Count tables, leaves and items.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        walk(&self.root, &mut |table| {
            stats.tables += 1;
            stats.max_depth = stats.max_depth.max(table.depth());
            for slot in table.slots() {
                if let Some(Partition::Leaf(leaf)) = slot {
                    stats.leaves += 1;
                    stats.items += leaf.len();
                }
            }
        });
        stats
    }

    /// Every table in pre-order, by slot.
    ///
    /// Two maps built with the same config and the same operations always
    /// have the same shape.
    pub fn shape(&self) -> Vec<TableShape> {
        let mut out = Vec::new();
        walk(&self.root, &mut |table| {
            out.push(TableShape {
                depth: table.depth(),
                modulus: table.modulus(),
                origin: table.origin(),
            })
        });
        out
    }

    /// Verify tree integrity - returns list of issues found.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut path = Vec::new();
        let items = self.verify_table(&self.root, None, &mut path, &mut issues);
        if items != self.len {
            issues.push(format!("{} reachable items but len()={}", items, self.len));
        }
        issues
    }

    /// `path` holds `(modulus, slot)` for every ancestor table.
    fn verify_table(
        &self,
        table: &Table<V>,
        parent: Option<(&Table<V>, usize)>,
        path: &mut Vec<(usize, usize)>,
        issues: &mut Vec<String>,
    ) -> usize {
        let degree = self.config.degree;
        if table.slots().len() != table.modulus() {
            issues.push(format!(
                "table at depth {} has {} slots for modulus {}",
                table.depth(),
                table.slots().len(),
                table.modulus()
            ));
        }
        match parent {
            None => {
                if table.depth() != 0 || table.origin().is_some() {
                    issues.push("root table has depth or origin set".to_string());
                }
            }
            Some((parent, slot)) => {
                if table.modulus() % 2 == 0 {
                    issues.push(format!("child table modulus {} is even", table.modulus()));
                }
                if table.modulus() <= parent.modulus() {
                    issues.push(format!(
                        "child modulus {} not above parent modulus {}",
                        table.modulus(),
                        parent.modulus()
                    ));
                }
                if table.depth() != parent.depth() + 1 {
                    issues.push(format!(
                        "child depth {} under parent depth {}",
                        table.depth(),
                        parent.depth()
                    ));
                }
                if table.origin() != Some(slot) {
                    issues.push(format!("child origin {:?} but hangs off slot {}", table.origin(), slot));
                }
            }
        }

        let mut items = 0usize;
        for (index, slot) in table.slots().iter().enumerate() {
            path.push((table.modulus(), index));
            match slot {
                None => {}
                Some(Partition::Internal(child)) => {
                    items += self.verify_table(child, Some((table, index)), path, issues);
                }
                Some(Partition::Leaf(leaf)) => {
                    items += leaf.len();
                    if leaf.is_empty() {
                        issues.push(format!("empty leaf left at {:?}", path));
                    }
                    if leaf.len() >= degree {
                        issues.push(format!(
                            "leaf at {:?} holds {} items (degree {})",
                            path,
                            leaf.len(),
                            degree
                        ));
                    }
                    if !leaf.items().windows(2).all(|w| w[0].key < w[1].key) {
                        issues.push(format!("leaf at {:?} is not strictly ascending", path));
                    }
                    for item in leaf.items() {
                        for &(modulus, expected) in path.iter() {
                            if slot_index(item.key, modulus) != expected {
                                issues.push(format!(
                                    "key {} misplaced: {} mod {} != {}",
                                    item.key, item.key, modulus, expected
                                ));
                            }
                        }
                    }
                }
            }
            path.pop();
        }
        items
    }

    /// Render the tree as indented text.
    pub fn render_tree(&self) -> TreeDisplay<'_, V> {
        TreeDisplay { map: self }
    }
}

/// Pre-order walk over every table.
fn walk<V>(table: &Table<V>, visit: &mut impl FnMut(&Table<V>)) {
    visit(table);
    for slot in table.slots() {
        if let Some(Partition::Internal(child)) = slot {
            walk(child, visit);
        }
    }
}

/// [`fmt::Display`] adapter returned by [`DrhMap::render_tree`].
///
/// ```text
/// table modulus=4 depth=0
///   [1] table modulus=5 depth=1
///     [0] leaf [5]
///     [1] leaf [1]
/// ```
pub struct TreeDisplay<'a, V> {
    map: &'a DrhMap<V>,
}

impl<V> TreeDisplay<'_, V> {
    fn table(f: &mut fmt::Formatter<'_>, table: &Table<V>, indent: usize) -> fmt::Result {
        writeln!(f, "table modulus={} depth={}", table.modulus(), table.depth())?;
        let pad = "  ".repeat(indent + 1);
        for (index, slot) in table.slots().iter().enumerate() {
            match slot {
                None => {}
                Some(Partition::Leaf(leaf)) => {
                    let keys: Vec<i64> = leaf.items().iter().map(|it| it.key).collect();
                    writeln!(f, "{}[{}] leaf {:?}", pad, index, keys)?;
                }
                Some(Partition::Internal(child)) => {
                    write!(f, "{}[{}] ", pad, index)?;
                    Self::table(f, child, indent + 1)?;
                }
            }
        }
        Ok(())
    }
}

impl<V> fmt::Display for TreeDisplay<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::table(f, &self.map.root, 0)
    }
}
