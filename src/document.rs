//! Saving and loading trees as JSON documents.
//!
//! Every node becomes a record with `value`, `left` and `right` keys, in that
//! order. A missing child (or an empty tree) is written as `null` rather than
//! left out, so the document pins down the exact shape of the tree:
//!
//! ```
//! use bst_doc::{Style, Tree};
//! use serde_json::json;
//!
//! let tree: Tree<i32> = [2, 1].into_iter().collect();
//! assert_eq!(
//!     tree.to_document().unwrap(),
//!     json!({
//!         "value": 2,
//!         "left": { "value": 1, "left": null, "right": null },
//!         "right": null
//!     })
//! );
//!
//! let empty: Tree<i32> = Tree::new();
//! assert_eq!(empty.to_text(Style::Compact).unwrap(), "null");
//! ```

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, FormatError, FormatErrorKind, Result};
use crate::node::{Blueprint, Side};
use crate::tree::Tree;

/// How text documents are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Style {
    /// Indented, one key per line.
    #[default]
    Pretty,
    /// Everything on one line with no whitespace.
    Compact,
}

impl<T> Tree<T> {
    /// Converts the tree into its document form.
    ///
    /// `serde_json` drops a [`Value`] recursively, so the document of a tree
    /// thousands of levels deep is better written straight to text with
    /// [`to_text`][Self::to_text] or [`to_writer`][Self::to_writer].
    pub fn to_document(&self) -> Result<Value>
    where
        T: Serialize,
    {
        serde_json::to_value(self).map_err(Error::Encode)
    }

    /// Rebuilds a tree from its document form, keeping the exact shape the
    /// document describes. Missing `left`/`right` keys are read as `null`
    /// and unknown keys are ignored. The ordering of the values is not
    /// checked; see [`Tree::is_search_tree`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_doc::{Error, FormatErrorKind, Tree};
    /// use serde_json::json;
    ///
    /// let tree: Tree<i32> = Tree::from_document(&json!({ "value": 1, "right": null })).unwrap();
    /// assert_eq!(tree.inorder(), vec![1]);
    ///
    /// let err = Tree::<i32>::from_document(&json!({ "value": 1, "left": { "right": null } }))
    ///     .unwrap_err();
    /// match err {
    ///     Error::Format(err) => {
    ///         assert_eq!(err.path(), "$.left.value");
    ///         assert_eq!(err.kind(), &FormatErrorKind::MissingValue);
    ///     }
    ///     other => panic!("unexpected error {other}"),
    /// }
    /// ```
    pub fn from_document(doc: &Value) -> Result<Self>
    where
        T: DeserializeOwned,
    {
        let mut blueprint = Blueprint::new();
        // The slot each recorded node was found in, kept so error paths can
        // be rebuilt without formatting a path for every node.
        let mut found_in: Vec<Option<(usize, Side)>> = Vec::new();
        let mut pending: Vec<(&Value, Option<(usize, Side)>)> = vec![(doc, None)];

        while let Some((slot, parent)) = pending.pop() {
            let record = match slot {
                Value::Null => continue,
                Value::Object(record) => record,
                _ => {
                    let path = field_path(&found_in, parent, None);
                    return Err(FormatError::new(path, FormatErrorKind::NotANode).into());
                }
            };

            let value = record.get("value").ok_or_else(|| {
                let path = field_path(&found_in, parent, Some("value"));
                FormatError::new(path, FormatErrorKind::MissingValue)
            })?;
            let value = T::deserialize(value).map_err(|err| {
                let path = field_path(&found_in, parent, Some("value"));
                FormatError::new(path, FormatErrorKind::InvalidValue(err.to_string()))
            })?;

            let position = blueprint.push(value);
            found_in.push(parent);
            if let Some((parent, side)) = parent {
                blueprint.link(parent, side, position);
            }
            for side in [Side::Right, Side::Left] {
                if let Some(child) = record.get(side.key()) {
                    pending.push((child, Some((position, side))));
                }
            }
        }

        Ok(Self::from_root(blueprint.assemble()))
    }

    /// Writes the tree as a JSON text.
    pub fn to_text(&self, style: Style) -> Result<String>
    where
        T: Serialize,
    {
        match style {
            Style::Pretty => serde_json::to_string_pretty(self),
            Style::Compact => serde_json::to_string(self),
        }
        .map_err(Error::Encode)
    }

    /// Reads a tree from a JSON text.
    pub fn from_text(text: &str) -> Result<Self>
    where
        T: DeserializeOwned,
    {
        let doc = parse(serde_json::Deserializer::from_str(text))?;
        let tree = Self::from_document(&doc);
        dismantle(doc);
        tree
    }

    /// Writes the tree as a JSON text to `writer`.
    pub fn to_writer<W>(&self, writer: W, style: Style) -> Result<()>
    where
        T: Serialize,
        W: io::Write,
    {
        match style {
            Style::Pretty => serde_json::to_writer_pretty(writer, self),
            Style::Compact => serde_json::to_writer(writer, self),
        }
        .map_err(encode_error)
    }

    /// Reads a tree from the JSON text in `reader`. The whole reader must
    /// hold exactly one document. Wrap unbuffered readers in a
    /// [`BufReader`].
    pub fn from_reader<R>(reader: R) -> Result<Self>
    where
        T: DeserializeOwned,
        R: io::Read,
    {
        let doc = parse(serde_json::Deserializer::from_reader(reader))?;
        let tree = Self::from_document(&doc);
        dismantle(doc);
        tree
    }

    /// Saves the tree to the file at `path`, replacing anything already there.
    pub fn save<P>(&self, path: P, style: Style) -> Result<()>
    where
        T: Serialize,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer, style)
            .and_then(|()| writer.flush().map_err(Error::Stream))
            .map_err(|err| err.at_path(path))?;

        debug!("saved tree of {} nodes to {}", self.size(), path.display());
        Ok(())
    }

    /// Loads a tree from the file at `path`.
    ///
    /// Failing to open or read the file is an [`Error::Io`]; a file whose
    /// contents are not a tree document is an [`Error::Syntax`] or
    /// [`Error::Format`].
    pub fn load<P>(path: P) -> Result<Self>
    where
        T: DeserializeOwned,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let tree = Self::from_reader(BufReader::new(file)).map_err(|err| err.at_path(path))?;

        debug!("loaded tree of {} nodes from {}", tree.size(), path.display());
        Ok(tree)
    }
}

/// Renders the path of the slot hanging off `parent` (the root when `None`),
/// optionally followed by a field of the record in it, e.g. `$.left.value`.
fn field_path(
    found_in: &[Option<(usize, Side)>],
    mut parent: Option<(usize, Side)>,
    field: Option<&str>,
) -> String {
    let mut keys: Vec<&str> = field.into_iter().collect();
    while let Some((position, side)) = parent {
        keys.push(side.key());
        parent = found_in[position];
    }

    let mut path = String::from("$");
    for key in keys.iter().rev() {
        path.push('.');
        path.push_str(key);
    }
    path
}

/// Parses a single JSON document. Trees built from sorted input nest one
/// level per node, so the parser's nesting limit is lifted and nested values
/// are parsed on stack segments allocated as the current one runs low.
fn parse<'de, R>(mut de: serde_json::Deserializer<R>) -> Result<Value>
where
    R: serde_json::de::Read<'de>,
{
    de.disable_recursion_limit();
    let doc = Value::deserialize(serde_stacker::Deserializer::new(&mut de))
        .map_err(decode_error)?;
    de.end().map_err(decode_error)?;
    Ok(doc)
}

/// Drops a document one value at a time. Dropping a deeply nested `Value`
/// directly recurses once per level.
fn dismantle(doc: Value) {
    let mut stack = vec![doc];
    while let Some(value) = stack.pop() {
        match value {
            Value::Object(record) => stack.extend(record.into_iter().map(|(_, child)| child)),
            Value::Array(items) => stack.extend(items),
            _ => {}
        }
    }
}

fn encode_error(err: serde_json::Error) -> Error {
    if err.is_io() {
        Error::Stream(err.into())
    } else {
        Error::Encode(err)
    }
}

fn decode_error(err: serde_json::Error) -> Error {
    if err.is_io() {
        Error::Stream(err.into())
    } else {
        Error::Syntax(err)
    }
}
