//! Read-only document arena consumed by the structural interpreter.
//!
//! The Markdown parser's output is copied into a flat vector of [`Node`]s. Parent, child and
//! sibling relationships are stored as [`NodeId`] indices, so upward and backward links never own
//! anything and the whole tree is dropped in one go once generation finishes.
//!
//! Trees are assembled with a [`TreeBuilder`], either by the Markdown adapter or directly by tests.

use crate::error::{Error, Result};
use std::fmt;

/// Index of a node inside a [`DocumentTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Closed set of node kinds the interpreter distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of every tree.
    Document,
    /// ATX or setext heading; the level lives on the [`Node`].
    Heading,
    /// Block of inline content.
    Paragraph,
    /// Fenced or indented code block.
    CodeBlock,
    /// Ordered or bullet list.
    List,
    /// Single entry of a list.
    ListItem,
    /// Inline code between backticks.
    CodeSpan,
    /// Plain inline text.
    Text,
    /// `*emphasis*`
    Emphasis,
    /// `**strong**`
    Strong,
    /// Inline link; its children hold the link text.
    Link,
    /// `>` quoted block.
    BlockQuote,
    /// Horizontal rule.
    ThematicBreak,
    /// Raw HTML block.
    HtmlBlock,
    /// Hard line break inside inline content.
    LineBreak,
    /// Any other parser construct, kept as raw text.
    Other,
}

impl NodeKind {
    /// Leaves carry text and never have children.
    #[must_use]
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::CodeSpan
                | Self::CodeBlock
                | Self::HtmlBlock
                | Self::LineBreak
                | Self::ThematicBreak
                | Self::Other
        )
    }
}

/// One element of the document.
#[derive(Clone, Debug)]
pub struct Node {
    /// What this node is.
    pub kind: NodeKind,
    /// Heading level 1 to 6, zero for every other kind.
    pub level: u8,
    pub(crate) literal: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) prev: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, literal: Option<String>, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            level: 0,
            literal,
            parent,
            first_child: None,
            last_child: None,
            next: None,
            prev: None,
        }
    }

    /// Raw text of a leaf, `None` for containers.
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }
}

/// Which side of a node a traversal is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Before any of the node's children.
    Enter,
    /// After all of the node's children.
    Exit,
}

/// Arena holding a parsed document.
#[derive(Clone, Debug)]
pub struct DocumentTree {
    pub(crate) nodes: Vec<Node>,
}

impl DocumentTree {
    /// The `Document` node every tree starts with.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds nothing but its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Look a node up, `None` if the id does not belong to this arena.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|node| node.kind)
    }

    /// Raw text of a leaf node.
    #[must_use]
    pub fn literal(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Node::literal)
    }

    /// Enclosing node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// First child in document order.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.first_child)
    }

    /// Following sibling.
    #[must_use]
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.next)
    }

    /// Preceding sibling.
    #[must_use]
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.prev)
    }

    /// Direct children in document order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.first_child(id), move |&child| self.next(child))
    }

    /// Number of parent hops between the node and the root.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        std::iter::successors(self.parent(id), |&parent| self.parent(parent)).count()
    }

    /// Pre-order traversal of the subtree rooted at `start`, reporting every node twice.
    ///
    /// The walk stops with [`Error::StructuralTraversal`] if it reaches an id that does not
    /// resolve inside the arena.
    #[must_use]
    pub fn walk(&self, start: NodeId) -> Walk<'_> {
        Walk {
            tree: self,
            start,
            pending: Some((start, Phase::Enter)),
        }
    }
}

/// Iterator returned by [`DocumentTree::walk`].
pub struct Walk<'t> {
    tree: &'t DocumentTree,
    start: NodeId,
    pending: Option<(NodeId, Phase)>,
}

impl Iterator for Walk<'_> {
    type Item = Result<(NodeId, Phase)>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, phase) = self.pending.take()?;
        let Some(node) = self.tree.get(id) else {
            return Some(Err(Error::StructuralTraversal { node: id }));
        };
        self.pending = match phase {
            Phase::Enter => Some(
                node.first_child
                    .map_or((id, Phase::Exit), |child| (child, Phase::Enter)),
            ),
            Phase::Exit if id == self.start => None,
            Phase::Exit => node
                .next
                .map(|sibling| (sibling, Phase::Enter))
                .or_else(|| node.parent.map(|parent| (parent, Phase::Exit))),
        };
        Some(Ok((id, phase)))
    }
}

/// Incrementally appends nodes to a [`DocumentTree`], keeping all links consistent.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Start a tree holding only its `Document` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document, None, None)],
        }
    }

    /// The `Document` root.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a container as the last child of `parent`.
    pub fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        self.attach(parent, Node::new(kind, None, Some(parent)))
    }

    /// Append a heading of the given level as the last child of `parent`.
    pub fn push_heading(&mut self, parent: NodeId, level: u8) -> NodeId {
        let mut node = Node::new(NodeKind::Heading, None, Some(parent));
        node.level = level;
        self.attach(parent, node)
    }

    /// Append a leaf carrying `literal` as the last child of `parent`.
    pub fn push_leaf(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        literal: impl Into<String>,
    ) -> NodeId {
        self.attach(parent, Node::new(kind, Some(literal.into()), Some(parent)))
    }

    /// Freeze the arena.
    #[must_use]
    pub fn finish(self) -> DocumentTree {
        DocumentTree { nodes: self.nodes }
    }

    fn attach(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        let previous = self.nodes.get(parent.0).and_then(|p| p.last_child);
        node.prev = previous;
        self.nodes.push(node);

        if let Some(previous) = previous {
            self.nodes[previous.0].next = Some(id);
        }
        if let Some(parent_node) = self.nodes.get_mut(parent.0) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = Some(id);
            }
            parent_node.last_child = Some(id);
        }
        id
    }
}

#[cfg(test)]
#[path = "tests/tree.rs"]
mod tests;
