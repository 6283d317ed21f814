use super::*;
use crate::node::Node;

use proptest::prelude::*;
use std::collections::BTreeMap;

/// Walks the tree and checks it against the expected contents, rebuilding
/// every stored key from the prefixes and dispatch bytes along its path.
fn validate_tree<V: PartialEq + std::fmt::Debug>(t: &RadixTree<V>, expected: &BTreeMap<Vec<u8>, V>) {
    assert!(t.is_well_formed(), "structural invariants violated");
    assert_eq!(t.len(), expected.len());

    let mut found: BTreeMap<Vec<u8>, &V> = BTreeMap::new();
    let mut stack: Vec<(Vec<u8>, &Node<V>)> = Vec::new();
    if let Some(root) = t.root.as_deref() {
        stack.push((Vec::new(), root));
    }
    while let Some((mut path, node)) = stack.pop() {
        path.extend_from_slice(&node.prefix);
        if let Some(value) = node.value.as_ref() {
            assert!(
                found.insert(path.clone(), value).is_none(),
                "key {path:?} reachable twice"
            );
        }
        for (byte, child) in node.children.iter() {
            let mut child_path = path.clone();
            child_path.push(byte);
            stack.push((child_path, child));
        }
    }

    let expected: BTreeMap<Vec<u8>, &V> = expected.iter().map(|(k, v)| (k.clone(), v)).collect();
    assert_eq!(found, expected);
}

#[derive(Clone, Debug)]
enum Op {
    Insert(Vec<u8>, u64),
    Remove(Vec<u8>),
    Get(Vec<u8>),
    Clear,
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A tiny alphabet forces shared prefixes, splits and prefix-of-key cases;
    // the wide one covers arbitrary bytes.
    prop_oneof![
        3 => prop::collection::vec(0u8..3, 0..=12),
        1 => prop::collection::vec(any::<u8>(), 0..=40),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        25 => key.clone().prop_map(Op::Remove),
        24 => key.clone().prop_map(Op::Get),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=1000)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut t: RadixTree<u64> = RadixTree::new();
        let mut m: BTreeMap<Vec<u8>, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let old_t = t.insert(&key, value);
                    let old_m = m.insert(key, value);
                    prop_assert_eq!(old_t, Ok(old_m));
                }
                Op::Remove(key) => {
                    let old_t = t.remove(&key);
                    let old_m = m.remove(key.as_slice());
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Get(key) => {
                    let got_t = t.get(&key).copied();
                    let got_m = m.get(key.as_slice()).copied();
                    prop_assert_eq!(got_t, got_m);
                }
                Op::Clear => {
                    t.clear();
                    m.clear();
                }
            }

            prop_assert_eq!(t.len(), m.len());
            prop_assert!(t.is_well_formed());
        }

        validate_tree(&t, &m);
    }

    #[test]
    fn prop_rejected_inserts_change_nothing(
        ops in ops_strategy(),
        max_nodes in 1usize..24,
    ) {
        let config = Config::default().with_max_nodes(max_nodes);
        let mut t: RadixTree<u64> = RadixTree::with_config(config);
        let mut m: BTreeMap<Vec<u8>, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let before = t.stats();
                    match t.insert(&key, value) {
                        Ok(old_t) => {
                            prop_assert_eq!(old_t, m.insert(key, value));
                        }
                        Err(err) => {
                            prop_assert_eq!(err, Error::NodeLimit { limit: max_nodes });
                            prop_assert_eq!(t.stats(), before);
                            prop_assert!(!m.contains_key(key.as_slice()));
                        }
                    }
                }
                Op::Remove(key) => {
                    prop_assert_eq!(t.remove(&key), m.remove(key.as_slice()));
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.get(&key).copied(), m.get(key.as_slice()).copied());
                }
                Op::Clear => {
                    t.clear();
                    m.clear();
                }
            }
            prop_assert!(t.stats().nodes <= max_nodes);
        }

        validate_tree(&t, &m);
    }

    #[test]
    fn prop_removal_order_does_not_matter(
        keys in prop::collection::btree_set(key_strategy(), 1..40),
        seed in any::<u64>(),
    ) {
        use rand::rngs::StdRng;
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        let keys: Vec<Vec<u8>> = keys.into_iter().collect();
        let mut t: RadixTree<u64> = RadixTree::new();
        for (i, k) in keys.iter().enumerate() {
            t.insert(k, i as u64).unwrap();
        }

        // Remove half the keys forwards in one copy and backwards in the other.
        let mut doomed = keys.clone();
        doomed.shuffle(&mut StdRng::seed_from_u64(seed));
        doomed.truncate(keys.len() / 2);

        let mut forward = t.clone();
        let mut backward = t.clone();
        for k in &doomed {
            prop_assert!(forward.remove(k).is_some());
        }
        for k in doomed.iter().rev() {
            prop_assert!(backward.remove(k).is_some());
        }

        for (i, k) in keys.iter().enumerate() {
            let expected = (!doomed.contains(k)).then_some(i as u64);
            prop_assert_eq!(forward.get(k).copied(), expected);
            prop_assert_eq!(backward.get(k).copied(), expected);
        }
        // Same key set, same shape; spilled capacities may differ.
        let shape = |t: &RadixTree<u64>| TreeStats { heap_bytes: 0, ..t.stats() };
        prop_assert_eq!(shape(&forward), shape(&backward));
        prop_assert!(forward.is_well_formed());
        prop_assert!(backward.is_well_formed());
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

fn small_key_set() -> Vec<Vec<u8>> {
    vec![
        b"".to_vec(),
        b"a".to_vec(),
        b"b".to_vec(),
        b"aa".to_vec(),
        b"ab".to_vec(),
        b"aab".to_vec(),
        b"ba".to_vec(),
    ]
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = small_key_set();

    let mut reference: Option<TreeStats> = None;
    for_each_permutation(&keys, |perm| {
        let mut t: RadixTree<u64> = RadixTree::new();
        let mut m: BTreeMap<Vec<u8>, u64> = BTreeMap::new();

        for k in perm {
            let v = k.len() as u64 * 100 + k.first().copied().unwrap_or(0) as u64;
            assert_eq!(t.insert(&k, v), Ok(m.insert(k, v)));
        }

        validate_tree(&t, &m);
        // The minimal shape does not depend on insertion order.
        let stats = t.stats();
        match &reference {
            Some(expected) => assert_eq!(&stats, expected),
            None => reference = Some(stats),
        }
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys = small_key_set();

    // Insert in a fixed order, then remove in all permutations.
    let mut base_tree: RadixTree<u64> = RadixTree::new();
    let mut base_map: BTreeMap<Vec<u8>, u64> = BTreeMap::new();
    for (i, k) in keys.iter().enumerate() {
        let v = i as u64;
        assert_eq!(base_tree.insert(k, v), Ok(base_map.insert(k.clone(), v)));
    }

    for_each_permutation(&keys, |perm| {
        let mut t = base_tree.clone();
        let mut m = base_map.clone();

        for k in perm {
            assert_eq!(t.remove(&k), m.remove(k.as_slice()));
            validate_tree(&t, &m);
        }
        assert_eq!(t.len(), 0);
        assert!(t.root.is_none());
        assert_eq!(t.alloc.live(), 0);
    });
}
