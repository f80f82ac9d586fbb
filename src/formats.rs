//! Document formats godown can read.
//!
//! A `Format` hides the external parser behind one call that produces a [`DocumentTree`], so the
//! interpreter never sees parser-specific node types. Markdown, parsed with tree-sitter-md, is the
//! only format shipped.

use crate::error::Result;
use crate::tree::DocumentTree;

pub mod markdown;

/// A parser front end producing the document arena.
pub trait Format {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &'static str;

    /// Extension of source documents, without the leading dot.
    fn file_extension(&self) -> &'static str;

    /// Parse `source` into a document tree. `name` identifies the document in errors.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Parse`] if the parser produces no tree.
    fn parse(&self, name: &str, source: &str) -> Result<DocumentTree>;
}
