use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Space that must be left on the stack before serializing another level.
const RED_ZONE: usize = 64 * 1024;

/// Size of each extra stack segment allocated once the red zone is reached.
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// A `Node` holds a value and owns up to two children. A missing child is
/// `None`; no child is ever shared with another `Node` and nothing points
/// back at a parent.
///
/// `Node`s are only created by [`Tree`][crate::Tree] so the ordering
/// invariant is never exposed to outside mutation. A `Node` is neither
/// `Clone` nor `PartialEq`; copy or compare whole [`Tree`][crate::Tree]s.
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Option<Box<Node<T>>>,
    pub(crate) right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub(crate) fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self::new(value))
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The root of the left subtree, if there is one.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, if there is one.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Shows the value and the values of the children, not whole subtrees.
impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left().map(Node::value))
            .field("right", &self.right().map(Node::value))
            .finish()
    }
}

/// Writes `{"value": .., "left": .., "right": ..}`. Nested records are written
/// on a freshly allocated stack segment whenever the current one runs low,
/// so chains of any depth can be serialized.
impl<T> Serialize for Node<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, move || {
            let mut record = serializer.serialize_struct("Node", 3)?;
            record.serialize_field("value", &self.value)?;
            record.serialize_field("left", &self.left)?;
            record.serialize_field("right", &self.right)?;
            record.end()
        })
    }
}

/// Which child slot of a parent a node hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn key(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Nodes recorded in preorder along with the positions of their children.
///
/// Building a tree from a `Blueprint` happens back to front: every child is
/// recorded after its parent, so by the time a parent is assembled both of
/// its children already are. No step recurses.
pub(crate) struct Blueprint<T> {
    entries: Vec<Entry<T>>,
}

struct Entry<T> {
    value: T,
    left: Option<usize>,
    right: Option<usize>,
}

impl<T> Blueprint<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Records a node and returns its position. Callers must push a parent
    /// before any of its children.
    pub(crate) fn push(&mut self, value: T) -> usize {
        self.entries.push(Entry {
            value,
            left: None,
            right: None,
        });
        self.entries.len() - 1
    }

    pub(crate) fn link(&mut self, parent: usize, side: Side, child: usize) {
        debug_assert!(parent < child, "children must be recorded after parents");
        let entry = &mut self.entries[parent];
        match side {
            Side::Left => entry.left = Some(child),
            Side::Right => entry.right = Some(child),
        }
    }

    /// Assembles the recorded nodes, returning the root (the first node pushed).
    pub(crate) fn assemble(self) -> Option<Box<Node<T>>> {
        let mut built: Vec<Option<Box<Node<T>>>> = Vec::new();
        built.resize_with(self.entries.len(), || None);

        for (position, entry) in self.entries.into_iter().enumerate().rev() {
            let mut node = Node::new_boxed(entry.value);
            node.left = entry.left.and_then(|child| built[child].take());
            node.right = entry.right.and_then(|child| built[child].take());
            built[position] = Some(node);
        }

        built.into_iter().next().flatten()
    }
}
