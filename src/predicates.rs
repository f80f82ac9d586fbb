//! Recognition of the document shapes that carry Go declarations.
//!
//! ```text
//! # main.go                 <- file section heading, gates the code blocks below it
//! ## func `Add`             <- function heading, its leaf text is the signature
//! - parameters              <- named group item
//!   - `a int` : addend      <- entry, its first code span is the entry text
//! - returns
//!   - `int`
//! ```
//!
//! Every predicate returns `None`/`false` for nodes that do not match; a miss is never an error.

use crate::error::Result;
use crate::leaves::{concatenate_leaves, first_leaf, first_leaf_text};
use crate::navigate::Direction;
use crate::tree::{DocumentTree, NodeId, NodeKind};
use std::fmt;

/// Suffix the first token of a file section heading must end with.
pub const FILE_SUFFIX: &str = ".go";

/// First token of a function heading: the keyword and exactly one space.
pub const FUNCTION_INTRODUCER: &str = "func ";

/// Label of a list item that introduces signature entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Group {
    /// `- parameters`
    Parameters,
    /// `- returns`
    Returns,
}

impl Group {
    /// Exact text the list item must start with.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Parameters => "parameters",
            Self::Returns => "returns",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A code block together with the heading that owns it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopedBlock {
    /// File name or function signature taken from the heading.
    pub heading: String,
    /// Literal content of the code block.
    pub body: String,
}

fn heading_first_token(tree: &DocumentTree, node: NodeId) -> Option<&str> {
    if tree.kind(node) != Some(NodeKind::Heading) {
        return None;
    }
    first_leaf_text(tree, node)
}

/// File name of a heading like `# main.go`.
#[must_use]
pub fn is_file_section_heading(tree: &DocumentTree, node: NodeId) -> Option<String> {
    let token = heading_first_token(tree, node)?;
    if token.ends_with(FILE_SUFFIX) {
        tracing::debug!(%node, file = token, "file section heading");
        Some(token.to_string())
    } else {
        None
    }
}

/// Signature of a heading like ``## func `main` ``: the text of the whole heading.
///
/// # Errors
///
/// Propagates a structural traversal failure from flattening the heading.
pub fn is_function_heading(tree: &DocumentTree, node: NodeId) -> Result<Option<String>> {
    if heading_first_token(tree, node) != Some(FUNCTION_INTRODUCER) {
        return Ok(None);
    }
    let signature = concatenate_leaves(tree, node)?;
    tracing::debug!(%node, signature = %signature, "function heading");
    Ok(Some(signature))
}

/// Whether a list item is the `parameters` or `returns` label.
#[must_use]
pub fn is_named_group_item(tree: &DocumentTree, node: NodeId, group: Group) -> bool {
    if tree.kind(node) != Some(NodeKind::ListItem) {
        return false;
    }
    let matched = tree
        .first_child(node)
        .and_then(|child| first_leaf(tree, child))
        .and_then(|leaf| tree.literal(leaf))
        .is_some_and(|text| text == group.label());
    if matched {
        tracing::trace!(%node, %group, "named group item");
    }
    matched
}

/// Entry text of a list item nested under the given group label.
///
/// The item's nearest enclosing list item must be the group label; the entry text is the leaf
/// text of the first code span inside the item.
///
/// # Errors
///
/// Propagates a structural traversal failure from flattening the code span.
pub fn is_entry_under_group(
    tree: &DocumentTree,
    node: NodeId,
    group: Group,
) -> Result<Option<String>> {
    if tree.kind(node) != Some(NodeKind::ListItem) {
        return Ok(None);
    }
    let under_group = tree
        .find_ancestor_of_kind(node, NodeKind::ListItem)
        .is_some_and(|ancestor| is_named_group_item(tree, ancestor, group));
    if !under_group {
        return Ok(None);
    }
    let Some(code) = tree.find_descendant_of_kind(node, NodeKind::CodeSpan) else {
        tracing::debug!(%node, %group, "entry without a code span");
        return Ok(None);
    };
    let entry = concatenate_leaves(tree, code)?;
    tracing::debug!(%node, %group, entry = %entry, "signature entry");
    Ok(Some(entry))
}

fn owning_heading(tree: &DocumentTree, node: NodeId) -> Option<NodeId> {
    if tree.kind(node) != Some(NodeKind::CodeBlock) {
        return None;
    }
    tree.find_sibling_of_kind(node, Direction::Backward, NodeKind::Heading)
}

fn code_body(tree: &DocumentTree, node: NodeId) -> String {
    tree.literal(node).unwrap_or_default().to_string()
}

/// Code block whose nearest preceding heading is a function heading.
///
/// # Errors
///
/// Propagates a structural traversal failure from flattening the heading.
pub fn is_code_block_in_function_scope(
    tree: &DocumentTree,
    node: NodeId,
) -> Result<Option<ScopedBlock>> {
    let Some(heading) = owning_heading(tree, node) else {
        return Ok(None);
    };
    Ok(is_function_heading(tree, heading)?.map(|heading| ScopedBlock {
        heading,
        body: code_body(tree, node),
    }))
}

/// Code block whose nearest preceding heading is a file section heading.
#[must_use]
pub fn is_code_block_in_file_scope(tree: &DocumentTree, node: NodeId) -> Option<ScopedBlock> {
    let heading = owning_heading(tree, node)?;
    is_file_section_heading(tree, heading).map(|heading| ScopedBlock {
        heading,
        body: code_body(tree, node),
    })
}

#[cfg(test)]
#[path = "tests/predicates.rs"]
mod tests;
