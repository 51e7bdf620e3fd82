//! Deep re-hash: replacing a full leaf with a deeper, odd-sized table.
//!
//! A full leaf holds exactly `degree` items. Its items are regrouped under
//! increasing odd moduli until no group would hold `degree` of them, and the
//! winning grouping becomes a child table. The split always completes inside
//! the insert that filled the leaf, so the new child never needs a second
//! split during the same call.

use smallvec::SmallVec;

use crate::partition::{Item, Leaf};
use crate::table::{slot_index, Table};
use crate::tracing_helpers::{debug_log, trace_log};

/// Upper bound on candidate moduli tried for one split.
///
/// A grouping only fails when every key shares a residue, which means the
/// candidate divides the gcd of the pairwise key differences, a non-zero
/// integer below 2^64. The lcm of 40 consecutive odd integers already
/// exceeds 2^100, so no run of 128 failing candidates exists for distinct
/// keys.
pub(crate) const MAX_SPLIT_ATTEMPTS: usize = 128;

/// First candidate modulus for a child of a table with `parent` slots.
#[inline]
pub(crate) fn first_candidate(parent: usize) -> usize {
    let candidate = parent + 1;
    if candidate % 2 == 0 {
        candidate + 1
    } else {
        candidate
    }
}

/// Size of the largest group `keys` form under `modulus`.
fn largest_group(keys: &[i64], modulus: usize) -> usize {
    let mut residues: SmallVec<[usize; 32]> =
        keys.iter().map(|&k| slot_index(k, modulus)).collect();
    residues.sort_unstable();

    let mut largest = 0usize;
    let mut run = 0usize;
    let mut prev = None;
    for r in residues {
        if prev == Some(r) {
            run += 1;
        } else {
            run = 1;
            prev = Some(r);
        }
        largest = largest.max(run);
    }
    largest
}

/// Picks the child modulus for a leaf under a table of `parent_modulus` slots.
///
/// Returns the modulus and the number of candidates tried, or `None` if
/// [`MAX_SPLIT_ATTEMPTS`] candidates all failed.
pub(crate) fn choose_modulus(
    keys: &[i64],
    parent_modulus: usize,
    degree: usize,
) -> Option<(usize, usize)> {
    let mut candidate = first_candidate(parent_modulus);
    for attempt in 1..=MAX_SPLIT_ATTEMPTS {
        if largest_group(keys, candidate) < degree {
            return Some((candidate, attempt));
        }
        trace_log!(candidate, attempt, "split candidate rejected");
        candidate += 2;
    }
    None
}

/// Moves the items of a full leaf into a new child table.
///
/// `items` is sorted ascending; pushing them in order keeps every child
/// leaf sorted.
pub(crate) fn deep_rehash<V>(
    items: Vec<Item<V>>,
    parent_modulus: usize,
    parent_depth: usize,
    origin: usize,
    degree: usize,
) -> Table<V> {
    debug_assert_eq!(items.len(), degree);
    let keys: SmallVec<[i64; 32]> = items.iter().map(|it| it.key).collect();

    let (modulus, _attempts) = choose_modulus(&keys, parent_modulus, degree)
        .expect("distinct keys separate within MAX_SPLIT_ATTEMPTS candidates");
    debug_log!(
        parent_modulus,
        modulus,
        attempts = _attempts,
        depth = parent_depth + 1,
        origin,
        "deep rehash"
    );

    let mut buckets: Vec<Vec<Item<V>>> = (0..modulus).map(|_| Vec::new()).collect();
    for item in items {
        buckets[slot_index(item.key, modulus)].push(item);
    }

    let mut table = Table::child(modulus, parent_depth + 1, origin);
    for (index, bucket) in buckets.into_iter().enumerate() {
        if !bucket.is_empty() {
            table.install_leaf(index, Leaf::from_sorted(bucket));
        }
    }
    trace_log!(modulus, depth = parent_depth + 1, "child table installed");
    table
}
