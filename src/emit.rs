//! The single pass that turns a document tree into Go text.
//!
//! The walker keeps no memory between nodes other than the output buffer and the list of
//! signatures seen so far. Every decision is recomputed at each visit from the predicates in
//! [`crate::predicates`] and the scoped searches in [`crate::navigate`], where the scope of a
//! heading ends at the next heading of any level.
//!
//! Parameter and return groups are deliberately over-parenthesised, for instance
//! `func Add( a int, b int) ( int )  {`. Running `gofmt` on the result normalises it.

use crate::error::Result;
use crate::navigate::Direction;
use crate::predicates::{
    is_code_block_in_file_scope, is_code_block_in_function_scope, is_entry_under_group,
    is_function_heading, is_named_group_item, Group,
};
use crate::tree::{DocumentTree, NodeId, NodeKind, Phase};

/// Text produced by one walk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Emission {
    /// Generated Go source, without the provenance footer.
    pub source: String,
    /// Function signatures in document order.
    pub signatures: Vec<String>,
}

/// Depth-first emitter owning the output buffer for the duration of one walk.
pub struct Emitter<'t> {
    tree: &'t DocumentTree,
    out: Emission,
}

impl<'t> Emitter<'t> {
    /// Prepare an emitter over `tree`.
    #[must_use]
    pub fn new(tree: &'t DocumentTree) -> Self {
        Self {
            tree,
            out: Emission::default(),
        }
    }

    /// Walk the whole tree once and return what was emitted.
    ///
    /// # Errors
    ///
    /// Aborts on the first structural traversal failure; nothing emitted so far is returned.
    pub fn run(mut self) -> Result<Emission> {
        for event in self.tree.walk(self.tree.root()) {
            let (node, phase) = event?;
            tracing::trace!(%node, depth = self.tree.depth(node), ?phase, "visit");
            match phase {
                Phase::Enter => self.enter(node)?,
                Phase::Exit => self.exit(node),
            }
        }
        Ok(self.out)
    }

    fn emit(&mut self, text: &str) {
        self.out.source.push_str(text);
    }

    fn enter(&mut self, node: NodeId) -> Result<()> {
        match self.tree.kind(node) {
            Some(NodeKind::CodeBlock) => self.enter_code_block(node),
            Some(NodeKind::Heading) => self.enter_heading(node),
            Some(NodeKind::ListItem) => self.enter_list_item(node),
            _ => Ok(()),
        }
    }

    fn exit(&mut self, node: NodeId) {
        if self.tree.kind(node) != Some(NodeKind::ListItem) {
            return;
        }
        if is_named_group_item(self.tree, node, Group::Parameters)
            || is_named_group_item(self.tree, node, Group::Returns)
        {
            self.emit(") ");
        }
    }

    fn enter_heading(&mut self, node: NodeId) -> Result<()> {
        if let Some(signature) = is_function_heading(self.tree, node)? {
            self.emit(&signature);
            self.out.signatures.push(signature);
        }
        Ok(())
    }

    fn enter_code_block(&mut self, node: NodeId) -> Result<()> {
        if let Some(prologue) = is_code_block_in_file_scope(self.tree, node) {
            tracing::debug!(%node, file = %prologue.heading, "file scope code");
            self.emit(&prologue.body);
            self.emit("\n\n");
        }

        let Some(block) = is_code_block_in_function_scope(self.tree, node)? else {
            return Ok(());
        };
        tracing::debug!(%node, signature = %block.heading, "function body chunk");

        let first_chunk = self
            .tree
            .find_sibling_before_boundary(
                node,
                NodeKind::CodeBlock,
                Direction::Backward,
                NodeKind::Heading,
                None,
            )?
            .is_none();
        if first_chunk {
            if !self.has_group_list_in_scope(node, Group::Parameters)?
                && !self.has_group_list_in_scope(node, Group::Returns)?
            {
                tracing::debug!(%node, "no parameters or returns, emitting empty list");
                self.emit("()");
            }
            self.emit(" {\n");
        }

        self.emit(&block.body);

        let last_chunk = self
            .tree
            .find_sibling_before_boundary(
                node,
                NodeKind::CodeBlock,
                Direction::Forward,
                NodeKind::Heading,
                None,
            )?
            .is_none();
        if last_chunk {
            self.emit("}\n\n");
        }
        Ok(())
    }

    fn enter_list_item(&mut self, node: NodeId) -> Result<()> {
        if is_named_group_item(self.tree, node, Group::Parameters) {
            self.emit("( ");
        }

        if let Some(entry) = is_entry_under_group(self.tree, node, Group::Parameters)? {
            if self.follows_entry(node, Group::Parameters)? {
                self.emit(", ");
            }
            self.emit(&entry);
        }

        if is_named_group_item(self.tree, node, Group::Returns) {
            let after_item = self
                .tree
                .find_sibling_before_boundary(
                    node,
                    NodeKind::ListItem,
                    Direction::Backward,
                    NodeKind::Heading,
                    None,
                )?
                .is_some();
            if !after_item {
                self.emit("() ");
            }
            self.emit("( ");
        }

        if let Some(entry) = is_entry_under_group(self.tree, node, Group::Returns)? {
            if self.follows_entry(node, Group::Returns)? {
                self.emit(", ");
            }
            self.emit(&entry);
            self.emit(" ");
        }
        Ok(())
    }

    /// Whether the nearest list before `node` in the heading's scope opens with `group`.
    fn has_group_list_in_scope(&self, node: NodeId, group: Group) -> Result<bool> {
        let list = self.tree.find_sibling_before_boundary(
            node,
            NodeKind::List,
            Direction::Backward,
            NodeKind::Heading,
            None,
        )?;
        Ok(list
            .and_then(|list| self.tree.first_child(list))
            .is_some_and(|item| is_named_group_item(self.tree, item, group)))
    }

    /// Whether the list item right before `node` is itself an entry of `group`.
    fn follows_entry(&self, node: NodeId, group: Group) -> Result<bool> {
        let previous = self.tree.find_sibling_before_boundary(
            node,
            NodeKind::ListItem,
            Direction::Backward,
            NodeKind::Heading,
            None,
        )?;
        match previous {
            Some(item) => Ok(is_entry_under_group(self.tree, item, group)?.is_some()),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
#[path = "tests/emit.rs"]
mod tests;
