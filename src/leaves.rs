//! Flattening of subtrees into their leaf text.
//!
//! Headings, list entries and group labels are reconstructed from the text of their leaves, which
//! drops decorative markup such as emphasis delimiters and backticks.

use crate::error::Result;
use crate::tree::{DocumentTree, NodeId, Phase};

/// Concatenate the literals of every leaf below (and including) `node`, in document order.
///
/// # Errors
///
/// Returns [`crate::Error::StructuralTraversal`] if the subtree contains a link that does not
/// resolve inside the arena.
pub fn concatenate_leaves(tree: &DocumentTree, node: NodeId) -> Result<String> {
    let mut text = String::new();
    for event in tree.walk(node) {
        let (id, phase) = event?;
        if phase != Phase::Enter {
            continue;
        }
        if let Some(leaf) = tree.get(id).filter(|n| n.kind.is_leaf()) {
            text.push_str(leaf.literal().unwrap_or_default());
        }
    }
    tracing::trace!(%node, text = %text, "concatenated leaves");
    Ok(text)
}

/// First leaf reached by repeatedly descending into first children, starting below `node`.
///
/// `node` itself is never returned, even when it is a leaf.
#[must_use]
pub fn first_leaf(tree: &DocumentTree, node: NodeId) -> Option<NodeId> {
    let mut current = tree.first_child(node);
    while let Some(id) = current {
        if tree.kind(id).is_some_and(|kind| kind.is_leaf()) {
            return Some(id);
        }
        current = tree.first_child(id);
    }
    None
}

/// Literal of [`first_leaf`], the token that heading and group recognition look at.
#[must_use]
pub fn first_leaf_text(tree: &DocumentTree, node: NodeId) -> Option<&str> {
    first_leaf(tree, node).and_then(|leaf| tree.literal(leaf))
}

#[cfg(test)]
#[path = "tests/leaves.rs"]
mod tests;
