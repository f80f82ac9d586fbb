//! Error type shared by the interpreter, the Markdown adapter and the command line front end.

use crate::tree::NodeId;
use std::io;
use std::path::PathBuf;

/// Everything that can abort generation of a Go source file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A tree link pointed outside the document arena while flattening leaf text.
    #[error("structural traversal failed at node {node}: link does not resolve inside the document")]
    StructuralTraversal {
        /// The dangling node reference.
        node: NodeId,
    },

    /// The Markdown parser produced no tree for the input.
    #[error("failed to parse markdown document {name:?}")]
    Parse {
        /// Identifier of the document that failed to parse.
        name: String,
    },

    /// The input bytes are not valid UTF-8.
    #[error("document {name:?} is not valid UTF-8")]
    InvalidUtf8 {
        /// Identifier of the offending document.
        name: String,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File that could not be read or written.
        path: PathBuf,
        /// Underlying operating system error.
        source: io::Error,
    },

    /// The configuration file exists but could not be parsed.
    #[error("invalid configuration in {}: {reason}", path.display())]
    Config {
        /// Configuration file path.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
