use bst_doc::{Style, Tree};

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of values in both.
fn do_ops<T>(ops: &[Op<T>], mut bst: Tree<T>, set: &mut BTreeSet<T>) -> Tree<T>
where
    T: Ord + Clone + std::fmt::Debug + serde::Serialize + serde::de::DeserializeOwned,
{
    for op in ops {
        match op {
            Op::Insert(v) => {
                assert_eq!(bst.insert(v.clone()), set.insert(v.clone()));
            }
            Op::Delete(v) => {
                assert_eq!(bst.delete(v), set.remove(v));
            }
            Op::Iter => {
                assert!(bst.iter().eq(set.iter()));
            }
            Op::Reload => {
                let text = bst.to_text(Style::Compact).unwrap();
                let reloaded: Tree<T> = Tree::from_text(&text).unwrap();
                assert_eq!(reloaded, bst);
                bst = reloaded;
            }
        }
        assert_eq!(bst.size(), set.len());
    }

    bst
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut set = BTreeSet::new();
    let tree = do_ops(&ops, Tree::new(), &mut set);

    tree.is_search_tree()
        && set.iter().all(|value| tree.contains(value))
        && tree.min() == set.first()
        && tree.max() == set.last()
}

#[quickcheck]
fn inorder_is_sorted(xs: Vec<i32>) -> bool {
    let tree: Tree<i32> = xs.iter().copied().collect();

    let inorder = tree.inorder();
    inorder.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn size_counts_distinct_values(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let distinct: HashSet<_> = xs.into_iter().collect();

    tree.size() == distinct.len()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.search(x).map(|node| node.value()) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    tree.is_search_tree()
        && deletes.iter().all(|x| tree.search(x).is_none())
        && still_present.iter().all(|x| tree.search(x).is_some())
}

#[quickcheck]
fn traversals_visit_every_node_once(xs: Vec<i16>) -> bool {
    let tree: Tree<i16> = xs.into_iter().collect();
    let sorted = |mut values: Vec<i16>| {
        values.sort_unstable();
        values
    };

    let inorder = tree.inorder();
    sorted(tree.preorder()) == inorder
        && sorted(tree.postorder()) == inorder
        && sorted(tree.levelorder()) == inorder
}

#[quickcheck]
fn preorder_rebuilds_the_same_tree(xs: Vec<i16>) -> bool {
    // Inserting a tree's preorder into an empty tree reproduces its shape.
    let tree: Tree<i16> = xs.into_iter().collect();
    let rebuilt: Tree<i16> = tree.preorder().into_iter().collect();

    rebuilt == tree
}

#[quickcheck]
fn height_is_bounded_by_size(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.into_iter().collect();

    match tree.height() {
        None => tree.is_empty(),
        Some(height) => {
            // A tree of height h holds between h + 1 and 2^(h + 1) - 1 nodes.
            let capacity = 1usize.checked_shl(height as u32 + 1);
            height < tree.size() && capacity.map_or(true, |capacity| capacity > tree.size())
        }
    }
}
