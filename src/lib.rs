//! This crate exposes a Binary Search Tree (BST) that can be written out to,
//! and read back from, a structured JSON document without losing its shape.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is the
//! longest path from the root `Node` to a leaf `Node`). This tree does not
//! rebalance itself, so inserting values in sorted order produces a chain
//! whose height equals its size. Every walk over the tree is done with an
//! explicit stack or cursor so such chains never exhaust the call stack.
//!
//! ## Documents
//!
//! A tree is serialized as nested records mirroring its shape:
//!
//! ```text
//! node   := { "value": <scalar>, "left": node|null, "right": node|null }
//! tree   := node|null
//! ```
//!
//! Two trees holding the same values in different shapes produce different
//! documents, and loading a document rebuilds exactly the shape it describes.
//!
//! # Examples
//!
//! ```
//! use bst_doc::{Style, Tree};
//!
//! let tree: Tree<i32> = [50, 30, 70].into_iter().collect();
//! let text = tree.to_text(Style::Compact).unwrap();
//! assert_eq!(
//!     text,
//!     r#"{"value":50,"left":{"value":30,"left":null,"right":null},"right":{"value":70,"left":null,"right":null}}"#
//! );
//!
//! let loaded: Tree<i32> = Tree::from_text(&text).unwrap();
//! assert_eq!(loaded, tree);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod document;
mod error;
mod node;
mod tree;

pub use document::Style;
pub use error::{Error, FormatError, FormatErrorKind, Result};
pub use node::Node;
pub use tree::{Iter, Tree};
