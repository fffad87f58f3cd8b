//! The tree itself. Every operation walks the tree with a cursor or an
//! explicit stack, so a tree that degenerated into a chain (for example by
//! inserting values in sorted order) is handled without recursion.
//!
//! # Examples
//!
//! ```
//! use bst_doc::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.search(&1).is_none());
//!
//! assert!(tree.insert(1));
//! assert!(tree.search(&1).is_some());
//!
//! // Inserting the same value again changes nothing.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.size(), 1);
//!
//! // Deleting reports whether anything was removed.
//! assert!(tree.delete(&1));
//! assert!(!tree.delete(&1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use log::trace;
use serde::Serialize;

use crate::node::{Blueprint, Node, Side};

/// A Binary Search Tree of unique values. This can be used for inserting,
/// searching and deleting values, walking them in several orders, and
/// saving/loading the exact shape of the tree (see the document methods).
///
/// The tree does not rebalance itself.
#[derive(Serialize)]
#[serde(transparent)]
pub struct Tree<T> {
    root: Option<Box<Node<T>>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        // Dismantle the nodes one at a time. Letting the boxes drop on their own
        // would recurse once per level.
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut blueprint = Blueprint::new();
        let mut stack: Vec<(&Node<T>, Option<(usize, Side)>)> =
            self.root().map(|root| (root, None)).into_iter().collect();

        while let Some((node, parent)) = stack.pop() {
            let position = blueprint.push(node.value.clone());
            if let Some((parent, side)) = parent {
                blueprint.link(parent, side, position);
            }
            if let Some(right) = node.right() {
                stack.push((right, Some((position, Side::Right))));
            }
            if let Some(left) = node.left() {
                stack.push((left, Some((position, Side::Left))));
            }
        }

        Self::from_root(blueprint.assemble())
    }
}

/// Two trees are equal when they have the same shape and hold equal values
/// at every position. Trees holding the same values in different shapes are
/// not equal.
impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self.root(), other.root())];
        while let Some(pair) = stack.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    if a.value != b.value {
                        return false;
                    }
                    stack.push((a.left(), b.left()));
                    stack.push((a.right(), b.right()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

/// Lists the nodes in preorder, each with the values of its children, which
/// is enough to read off the shape.
impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nodes = f.debug_list();
        let mut stack: Vec<&Node<T>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            nodes.entry(node);
            stack.extend(node.right());
            stack.extend(node.left());
        }
        nodes.finish()
    }
}

/// Draws the tree on its side: the root sits in the first column, each level
/// is indented four more spaces and larger values are printed above smaller
/// ones.
///
/// ```
/// use bst_doc::Tree;
///
/// let tree: Tree<i32> = [50, 30, 70, 60].into_iter().collect();
/// assert_eq!(tree.to_string(), "    70\n        60\n50\n    30\n");
/// ```
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A reversed in-order walk, right subtree first.
        let mut stack: Vec<(&Node<T>, usize)> = Vec::new();
        let mut current = self.root().map(|root| (root, 0));
        loop {
            while let Some((node, depth)) = current {
                stack.push((node, depth));
                current = node.right().map(|right| (right, depth + 1));
            }
            let Some((node, depth)) = stack.pop() else {
                return Ok(());
            };
            writeln!(f, "{:indent$}{}", "", node.value, indent = depth * 4)?;
            current = node.left().map(|left| (left, depth + 1));
        }
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    /// Inserts every value in iteration order. Duplicates are skipped.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    pub(crate) fn from_root(root: Option<Box<Node<T>>>) -> Self {
        Self { root }
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts `value` into the tree. Returns `false` and leaves the tree
    /// untouched when an equal value is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_doc::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert!(tree.insert(2));
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(2));
    ///
    /// assert_eq!(tree.inorder(), vec![1, 2]);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            match value.cmp(&node.value) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Equal => {
                    trace!("insert: value already present, ignoring");
                    return false;
                }
                Ordering::Greater => slot = &mut node.right,
            }
        }

        *slot = Some(Node::new_boxed(value));
        true
    }

    /// Finds the node holding `value`. If no node holds it, `None` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_doc::Tree;
    ///
    /// let tree: Tree<i32> = [2, 1, 3].into_iter().collect();
    ///
    /// let node = tree.search(&1).unwrap();
    /// assert_eq!(node.value(), &1);
    /// assert!(node.is_leaf());
    ///
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            match value.cmp(&node.value) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => current = node.right(),
            }
        }
        None
    }

    /// Whether a node holds `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.search(value).is_some()
    }

    /// Removes the node holding `value` and returns whether there was one.
    ///
    /// A node with a single child is replaced by that child. A node with two
    /// children takes the value of its in-order successor (the smallest
    /// value of its right subtree) and the successor's node is removed
    /// instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_doc::Tree;
    ///
    /// let mut tree: Tree<i32> = [50, 30, 70, 20, 40, 60, 80].into_iter().collect();
    ///
    /// assert!(tree.delete(&30));
    /// assert_eq!(tree.inorder(), vec![20, 40, 50, 60, 70, 80]);
    /// assert_eq!(tree.preorder(), vec![50, 40, 20, 70, 60, 80]);
    ///
    /// assert!(!tree.delete(&999));
    /// ```
    pub fn delete(&mut self, value: &T) -> bool
    where
        T: Ord,
    {
        // Walk to the slot owning the target. The slot plays the part of the
        // parent's link (or the root link).
        let mut slot = &mut self.root;
        loop {
            let ordering = match slot {
                Some(node) => value.cmp(&node.value),
                None => return false,
            };
            if ordering == Ordering::Equal {
                break;
            }
            if let Some(node) = slot {
                slot = match ordering {
                    Ordering::Less => &mut node.left,
                    _ => &mut node.right,
                };
            }
        }

        let Some(mut target) = slot.take() else {
            return false;
        };
        *slot = match (target.left.take(), target.right.take()) {
            (None, None) => {
                trace!("delete: removing leaf");
                None
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("delete: splicing single child into place");
                Some(child)
            }
            (Some(left), Some(right)) => {
                trace!("delete: promoting in-order successor");
                let mut right = Some(right);
                if let Some(successor) = take_min(&mut right) {
                    target.value = successor;
                }
                target.left = Some(left);
                target.right = right;
                Some(target)
            }
        };
        true
    }

    /// The smallest value in the tree.
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(&node.value)
    }

    /// The largest value in the tree.
    pub fn max(&self) -> Option<&T> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(&node.value)
    }

    /// Number of edges on the longest path from the root to a leaf. A tree
    /// with only a root has height `Some(0)`; an empty tree has no height.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_doc::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), None);
    ///
    /// tree.insert(50);
    /// assert_eq!(tree.height(), Some(0));
    ///
    /// tree.extend([30, 70, 20, 10]);
    /// assert_eq!(tree.height(), Some(3));
    /// ```
    pub fn height(&self) -> Option<usize> {
        let mut deepest = None;
        let mut stack: Vec<(&Node<T>, usize)> =
            self.root().map(|root| (root, 0)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(Some(depth));
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }
        deepest
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Whether every node's left subtree holds only smaller values and its
    /// right subtree only larger ones. Trees built with [`insert`][Self::insert]
    /// always are; a tree loaded from a document is not checked on load.
    pub fn is_search_tree(&self) -> bool
    where
        T: Ord,
    {
        let mut values = self.iter();
        let Some(mut previous) = values.next() else {
            return true;
        };
        for value in values {
            if previous >= value {
                return false;
            }
            previous = value;
        }
        true
    }

    /// Borrows the values in ascending (in-order) order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root())
    }

    /// Values visiting the left subtree, then the node, then the right subtree.
    /// For a search tree this is ascending order.
    pub fn inorder(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Values visiting the node, then the left subtree, then the right subtree.
    pub fn preorder(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut values = Vec::new();
        let mut stack: Vec<&Node<T>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            values.push(node.value.clone());
            stack.extend(node.right());
            stack.extend(node.left());
        }
        values
    }

    /// Values visiting the left subtree, then the right subtree, then the node.
    pub fn postorder(&self) -> Vec<T>
    where
        T: Clone,
    {
        // Node, right, left reversed is left, right, node.
        let mut values = Vec::new();
        let mut stack: Vec<&Node<T>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            values.push(node.value.clone());
            stack.extend(node.left());
            stack.extend(node.right());
        }
        values.reverse();
        values
    }

    /// Values level by level from the root down, left to right within a level.
    pub fn levelorder(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut values = Vec::new();
        let mut queue: VecDeque<&Node<T>> = self.root().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            values.push(node.value.clone());
            queue.extend(node.left());
            queue.extend(node.right());
        }
        values
    }
}

/// Unlinks the leftmost node of the subtree in `slot`, splicing its right
/// child into its place, and returns its value.
fn take_min<T>(slot: &mut Option<Box<Node<T>>>) -> Option<T> {
    let mut slot = slot;
    while slot.as_ref().is_some_and(|node| node.left.is_some()) {
        if let Some(node) = slot {
            slot = &mut node.left;
        }
    }

    let mut min = slot.take()?;
    *slot = min.right.take();
    Some(min.value)
}

/// An in-order iterator over the values of a [`Tree`].
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(&node.value)
    }
}
