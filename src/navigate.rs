//! Bounded searches over the document tree.
//!
//! Every search is read-only and terminates because the arena is finite and acyclic. Not finding
//! a node is an ordinary outcome reported as `None`; only the literal-filtered sibling search can
//! fail, and only because it flattens leaf text.

use crate::error::Result;
use crate::leaves::concatenate_leaves;
use crate::tree::{DocumentTree, NodeId, NodeKind};

/// Which way to walk a sibling chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards later siblings.
    Forward,
    /// Towards earlier siblings.
    Backward,
}

impl DocumentTree {
    fn step(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        match direction {
            Direction::Forward => self.next(id),
            Direction::Backward => self.prev(id),
        }
    }

    /// Nearest ancestor of the given kind, up to and including the root.
    #[must_use]
    pub fn find_ancestor_of_kind(&self, node: NodeId, kind: NodeKind) -> Option<NodeId> {
        let found = std::iter::successors(self.parent(node), |&id| self.parent(id))
            .find(|&id| self.kind(id) == Some(kind));
        tracing::trace!(%node, ?kind, found = ?found, "ancestor search");
        found
    }

    /// Nearest sibling of the given kind, ignoring everything in between.
    #[must_use]
    pub fn find_sibling_of_kind(
        &self,
        node: NodeId,
        direction: Direction,
        kind: NodeKind,
    ) -> Option<NodeId> {
        let found =
            std::iter::successors(self.step(node, direction), |&id| self.step(id, direction))
                .find(|&id| self.kind(id) == Some(kind));
        tracing::trace!(%node, ?direction, ?kind, found = ?found, "sibling search");
        found
    }

    /// Nearest sibling of kind `kind` that lies before the first sibling of kind `boundary`.
    ///
    /// With a `literal` filter a sibling of the right kind only matches when its leaf text is
    /// exactly the filter; non-matching candidates are skipped and the search goes on.
    ///
    /// # Errors
    ///
    /// Propagates a structural traversal failure from flattening a candidate's leaf text.
    pub fn find_sibling_before_boundary(
        &self,
        node: NodeId,
        kind: NodeKind,
        direction: Direction,
        boundary: NodeKind,
        literal: Option<&str>,
    ) -> Result<Option<NodeId>> {
        let mut current = self.step(node, direction);
        while let Some(id) = current {
            let sibling_kind = self.kind(id);
            if sibling_kind == Some(boundary) {
                tracing::trace!(%node, ?kind, ?boundary, stopped_at = %id, "hit scope boundary");
                return Ok(None);
            }
            if sibling_kind == Some(kind) {
                let matches = match literal {
                    Some(expected) => concatenate_leaves(self, id)? == expected,
                    None => true,
                };
                if matches {
                    tracing::trace!(%node, ?kind, ?boundary, found = %id, "sibling in scope");
                    return Ok(Some(id));
                }
            }
            current = self.step(id, direction);
        }
        tracing::trace!(%node, ?kind, ?boundary, "no sibling in scope");
        Ok(None)
    }

    /// First node of the given kind found by descending through first children, moving on to the
    /// next sibling whenever a node has no children.
    #[must_use]
    pub fn find_descendant_of_kind(&self, node: NodeId, kind: NodeKind) -> Option<NodeId> {
        let mut current = self.first_child(node);
        while let Some(id) = current {
            if self.kind(id) == Some(kind) {
                tracing::trace!(%node, ?kind, found = %id, "descendant search");
                return Some(id);
            }
            current = self.first_child(id).or_else(|| self.next(id));
        }
        tracing::trace!(%node, ?kind, "descendant search found nothing");
        None
    }
}

#[cfg(test)]
#[path = "tests/navigate.rs"]
mod tests;
