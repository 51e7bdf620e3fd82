use super::*;

use crate::partition::Partition;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_map<V>(m: &DrhMap<V>) {
    let issues = m.verify_integrity();
    assert!(issues.is_empty(), "integrity issues: {:#?}", issues);

    let mut stack: Vec<&Table<V>> = vec![&m.root];
    while let Some(table) = stack.pop() {
        for slot in table.slots() {
            match slot {
                None => {}
                Some(Partition::Internal(child)) => stack.push(child),
                Some(Partition::Leaf(leaf)) => {
                    assert!(
                        leaf.len() < m.config().degree,
                        "leaf must split before reaching degree"
                    );
                }
            }
        }
    }
    assert_eq!(m.stats().items, m.len(), "reachable items must match len");
}

#[derive(Clone, Debug)]
enum Op<V> {
    Set(i64, V),
    Remove(i64),
    Get(i64),
}

fn key_strategy() -> impl Strategy<Value = i64> + Clone {
    // Mostly a narrow window so keys collide and leaves split; occasionally
    // multiples of a highly composite step, and the extremes.
    prop_oneof![
        8 => -300i64..300,
        2 => (0i64..64).prop_map(|i| i * 45_045),
        1 => any::<i64>(),
        1 => Just(i64::MIN),
        1 => Just(i64::MAX),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op<u64>>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Set(k, v)),
        25 => key.clone().prop_map(Op::Remove),
        25 => key.prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=1500)
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (1usize..=12, 2usize..=6).prop_map(|(root_size, degree)| Config { root_size, degree })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 20_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(config in config_strategy(), ops in ops_strategy()) {
        let mut d: DrhMap<u64> = DrhMap::with_config(config).unwrap();
        let mut m: BTreeMap<i64, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Set(key, value) => {
                    prop_assert_eq!(d.set(key, value), m.insert(key, value));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(d.remove(key), m.remove(&key));
                }
                Op::Get(key) => {
                    prop_assert_eq!(d.get(key), m.get(&key));
                }
            }

            prop_assert_eq!(d.len(), m.len());
        }

        validate_map(&d);
        let mut got: Vec<(i64, u64)> = d.iter().map(|(k, v)| (k, *v)).collect();
        got.sort_unstable();
        let expected: Vec<(i64, u64)> = m.into_iter().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_same_ops_same_shape(config in config_strategy(), ops in ops_strategy()) {
        let mut a: DrhMap<u64> = DrhMap::with_config(config).unwrap();
        let mut b: DrhMap<u64> = DrhMap::with_config(config).unwrap();
        for op in ops {
            match op {
                Op::Set(key, value) => {
                    a.set(key, value);
                    b.set(key, value);
                }
                Op::Remove(key) => {
                    a.remove(key);
                    b.remove(key);
                }
                Op::Get(_) => {}
            }
        }
        prop_assert_eq!(a.shape(), b.shape());
    }

    #[test]
    fn prop_reset_is_idempotent(config in config_strategy(), keys in prop::collection::vec(key_strategy(), 1..200)) {
        let mut d: DrhMap<i64> = DrhMap::with_config(config).unwrap();
        for &k in &keys {
            d.set(k, k);
        }
        let len = d.len();
        for &k in &keys {
            prop_assert_eq!(d.set(k, k), Some(k));
        }
        prop_assert_eq!(d.len(), len);
        for &k in &keys {
            prop_assert_eq!(d.get(k), Some(&k));
        }
        validate_map(&d);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

// Every key shares root slot 1 and several collide again under 5, 7 and 9.
const COLLIDING: [i64; 6] = [1, 5, 9, 21, 105, 141];

#[test]
fn exhaustive_insert_order_small_set() {
    for_each_permutation(&COLLIDING, |perm| {
        let mut d: DrhMap<u64> = DrhMap::try_new(4, 2).unwrap();
        let mut m: BTreeMap<i64, u64> = BTreeMap::new();

        for (i, k) in perm.into_iter().enumerate() {
            let v = i as u64;
            assert_eq!(d.set(k, v), m.insert(k, v));
        }

        validate_map(&d);
        for (k, v) in &m {
            assert_eq!(d.get(*k), Some(v));
        }
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let mut base: DrhMap<u64> = DrhMap::try_new(4, 2).unwrap();
    for (i, &k) in COLLIDING.iter().enumerate() {
        base.set(k, i as u64);
    }
    let base_shape = base.shape();

    for_each_permutation(&COLLIDING, |perm| {
        let mut d = base.clone();
        let mut left: BTreeMap<i64, u64> =
            COLLIDING.iter().enumerate().map(|(i, &k)| (k, i as u64)).collect();

        for k in perm {
            assert_eq!(d.remove(k), left.remove(&k));
            assert_eq!(d.len(), left.len());
            validate_map(&d);
            for (k, v) in &left {
                assert_eq!(d.get(*k), Some(v));
            }
        }
        assert!(d.is_empty());
        // Removal never frees tables.
        assert_eq!(d.shape(), base_shape);
    });
}
