use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while saving or loading a tree. Searching, inserting and
/// deleting never fail.
#[derive(Error, Debug)]
pub enum Error {
    /// A file could not be opened, read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file being saved or loaded.
        path: PathBuf,
        /// The underlying failure.
        source: io::Error,
    },

    /// A reader or writer failed part way through a document.
    #[error("I/O error while streaming document: {0}")]
    Stream(#[source] io::Error),

    /// The text is not a JSON document at all.
    #[error("document is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The document is JSON but does not describe a tree.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A value in the tree could not be represented in a document.
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Error {
    /// Attaches the file being worked on to a stream failure.
    pub(crate) fn at_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Stream(source) => Self::Io {
                path: path.into(),
                source,
            },
            other => other,
        }
    }
}

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A document that does not match the node record shape. The path names the
/// offending field, starting from `$` for the document root, e.g.
/// `$.left.right.value`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid document at `{path}`: {kind}")]
pub struct FormatError {
    path: String,
    kind: FormatErrorKind,
}

impl FormatError {
    pub(crate) fn new(path: impl Into<String>, kind: FormatErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Where in the document the problem is.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// What is wrong there.
    pub fn kind(&self) -> &FormatErrorKind {
        &self.kind
    }
}

/// The ways a document can fail to describe a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// Expected a node record or `null`.
    NotANode,
    /// A node record has no `value`.
    MissingValue,
    /// A `value` has the wrong type for the tree.
    InvalidValue(String),
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANode => f.write_str("expected a node record or null"),
            Self::MissingValue => f.write_str("node record has no `value`"),
            Self::InvalidValue(reason) => write!(f, "unusable value: {reason}"),
        }
    }
}
