use std::collections::BTreeSet;

use avl_trace::AvlTree;
use proptest::prelude::*;

fn shape(tree: &AvlTree<i32>) -> Vec<i32> {
    tree.pre_order().into_iter().copied().collect()
}

fn height_bound(n: usize) -> usize {
    (1.44 * ((n + 2) as f64).log2()).floor() as usize
}

proptest! {
    #[test]
    fn invariants_hold_after_every_insert(keys in prop::collection::vec(-500i32..500, 0..200)) {
        let mut tree = AvlTree::new();
        for key in keys {
            tree.insert(key);
            prop_assert_eq!(tree.validate(), Ok(()));
        }
    }

    #[test]
    fn in_order_matches_key_set(keys in prop::collection::vec(any::<i32>(), 0..200)) {
        let tree: AvlTree<i32> = keys.iter().copied().collect();
        let unique: BTreeSet<i32> = keys.iter().copied().collect();
        let expected: Vec<i32> = unique.into_iter().collect();
        let walked: Vec<i32> = tree.in_order().copied().collect();

        prop_assert!(walked.windows(2).all(|w| w[0] < w[1]), "keys must be strictly ascending");
        prop_assert_eq!(walked, expected);
    }

    #[test]
    fn insert_then_delete_restores_key_set(
        keys in prop::collection::hash_set(-1000i32..1000, 0..100),
        extra in 1000i32..2000,
    ) {
        let mut tree: AvlTree<i32> = keys.iter().copied().collect();
        let before: Vec<i32> = tree.in_order().copied().collect();

        prop_assert!(tree.insert(extra));
        prop_assert!(tree.delete(&extra));

        prop_assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), before);
        prop_assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn duplicate_insert_leaves_shape_unchanged(
        keys in prop::collection::vec(-100i32..100, 1..100),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tree: AvlTree<i32> = keys.iter().copied().collect();
        let before = shape(&tree);
        let existing = keys[pick.index(keys.len())];

        prop_assert!(!tree.insert(existing));
        prop_assert_eq!(shape(&tree), before);
    }

    #[test]
    fn missing_delete_leaves_shape_unchanged(
        keys in prop::collection::vec(-100i32..100, 0..100),
        missing in 100i32..200,
    ) {
        let mut tree: AvlTree<i32> = keys.iter().copied().collect();
        let before = shape(&tree);
        let len = tree.len();

        prop_assert!(!tree.delete(&missing));
        prop_assert_eq!(shape(&tree), before);
        prop_assert_eq!(tree.len(), len);
    }

    #[test]
    fn height_is_logarithmic(keys in prop::collection::vec(any::<i32>(), 0..500)) {
        let tree: AvlTree<i32> = keys.into_iter().collect();
        prop_assert!(tree.height() <= height_bound(tree.len()));
    }

    #[test]
    fn mixed_operations_agree_with_btreeset(
        ops in prop::collection::vec((any::<bool>(), -50i32..50), 0..300),
    ) {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();
        for (is_insert, key) in ops {
            if is_insert {
                prop_assert_eq!(tree.insert(key), model.insert(key));
            } else {
                prop_assert_eq!(tree.delete(&key), model.remove(&key));
            }
            prop_assert_eq!(tree.validate(), Ok(()));
            prop_assert_eq!(tree.len(), model.len());
        }
        prop_assert!(tree.in_order().eq(model.iter()));
        prop_assert_eq!(tree.min(), model.first());
        prop_assert_eq!(tree.max(), model.last());
    }

    #[test]
    fn search_path_descends_by_comparison(
        keys in prop::collection::hash_set(-200i32..200, 1..100),
        target in -250i32..250,
    ) {
        let tree: AvlTree<i32> = keys.iter().copied().collect();
        let path = tree.search_path(&target);

        prop_assert_eq!(path.found().is_some(), keys.contains(&target));
        prop_assert!(path.len() <= tree.height());
        prop_assert_eq!(path.visited().first().map(|n| *n.key()), tree.root().map(|r| *r.key()));
        for pair in path.visited().windows(2) {
            let (parent, child) = (pair[0], pair[1]);
            let expected = if target < *parent.key() { parent.left() } else { parent.right() };
            prop_assert_eq!(expected.map(|n| *n.key()), Some(*child.key()));
        }
    }
}
