//! Markdown format implementation using tree-sitter-md.
//!
//! tree-sitter-md parses in two layers: a block tree (sections, headings, lists, code blocks) and
//! one inline tree per `inline` block node (code spans, emphasis, links). This module merges both
//! into a single [`DocumentTree`]:
//!
//! - `section` nodes are flattened away so that a heading and the content under it are siblings,
//!   which is what scoped sibling searches rely on;
//! - list markers, block continuations and emphasis or code span delimiters are dropped;
//! - plain text, which the inline grammar leaves between its nodes, becomes `Text` leaves;
//! - inline content is trimmed of surrounding whitespace.

use crate::error::{Error, Result};
use crate::formats::Format;
use crate::tree::{DocumentTree, NodeId, NodeKind, TreeBuilder};
use std::ops::Range;
use tree_sitter::Node;
use tree_sitter_md::{MarkdownParser, MarkdownTree};

/// Markdown documents such as `main.go.md`.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn file_extension(&self) -> &'static str {
        "md"
    }

    fn parse(&self, name: &str, source: &str) -> Result<DocumentTree> {
        let mut parser = MarkdownParser::default();
        let parsed = parser
            .parse(source.as_bytes(), None)
            .ok_or_else(|| Error::Parse {
                name: name.to_string(),
            })?;

        let mut adapter = Adapter {
            source,
            parsed: &parsed,
            builder: TreeBuilder::new(),
        };
        let root = adapter.builder.root();
        adapter.blocks(parsed.block_tree().root_node(), root);
        let tree = adapter.builder.finish();
        tracing::debug!(document = name, nodes = tree.len(), "markdown parsed");
        Ok(tree)
    }
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    named_children(node).into_iter().find(|child| child.kind() == kind)
}

fn is_block_marker(kind: &str) -> bool {
    kind.starts_with("list_marker")
        || kind.starts_with("task_list_marker")
        || kind.starts_with("atx_h")
        || kind.starts_with("setext_h")
        || matches!(
            kind,
            "block_continuation"
                | "block_quote_marker"
                | "fenced_code_block_delimiter"
                | "info_string"
                | "language"
        )
}

fn atx_level(node: Node<'_>) -> u8 {
    named_children(node)
        .iter()
        .find_map(|child| {
            child
                .kind()
                .strip_prefix("atx_h")
                .and_then(|rest| rest.chars().next())
                .and_then(|digit| digit.to_digit(10))
        })
        .and_then(|level| u8::try_from(level).ok())
        .unwrap_or(1)
}

fn with_trailing_newline(text: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}

/// Indented code loses its four-space indentation and any trailing blank lines.
fn dedent(text: &str) -> String {
    let mut lines: Vec<&str> = text
        .split_inclusive('\n')
        .map(|line| {
            let indent = line.bytes().take(4).take_while(|b| *b == b' ').count();
            &line[indent..]
        })
        .collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    with_trailing_newline(&lines.concat())
}

struct Adapter<'a> {
    source: &'a str,
    parsed: &'a MarkdownTree,
    builder: TreeBuilder,
}

impl<'a> Adapter<'a> {
    fn text(&self, range: Range<usize>) -> &'a str {
        self.source.get(range).unwrap_or_default()
    }

    fn trimmed(&self, range: Range<usize>) -> Range<usize> {
        let text = self.text(range.clone());
        let start = range.start + (text.len() - text.trim_start().len());
        let end = range.end - (text.len() - text.trim_end().len());
        start..end.max(start)
    }

    fn blocks(&mut self, node: Node<'a>, parent: NodeId) {
        for child in named_children(node) {
            self.block(child, parent);
        }
    }

    fn block(&mut self, node: Node<'a>, parent: NodeId) {
        match node.kind() {
            "section" => self.blocks(node, parent),
            "atx_heading" => {
                let heading = self.builder.push_heading(parent, atx_level(node));
                if let Some(inline) = child_of_kind(node, "inline") {
                    let span = self.without_closing_sequence(self.trimmed(inline.byte_range()));
                    self.inline_within(inline, span, heading);
                }
            }
            "setext_heading" => {
                let level = if child_of_kind(node, "setext_h1_underline").is_some() {
                    1
                } else {
                    2
                };
                let heading = self.builder.push_heading(parent, level);
                if let Some(inline) =
                    child_of_kind(node, "paragraph").and_then(|p| child_of_kind(p, "inline"))
                {
                    self.inline(inline, heading);
                }
            }
            "paragraph" => {
                let paragraph = self.builder.push(parent, NodeKind::Paragraph);
                for inline in named_children(node) {
                    if inline.kind() == "inline" {
                        self.inline(inline, paragraph);
                    }
                }
            }
            "fenced_code_block" => {
                let content = child_of_kind(node, "code_fence_content")
                    .map(|content| self.text(content.byte_range()))
                    .unwrap_or_default();
                self.builder
                    .push_leaf(parent, NodeKind::CodeBlock, with_trailing_newline(content));
            }
            "indented_code_block" => {
                let content = dedent(self.text(node.byte_range()));
                self.builder.push_leaf(parent, NodeKind::CodeBlock, content);
            }
            "list" => {
                let list = self.builder.push(parent, NodeKind::List);
                self.blocks(node, list);
            }
            "list_item" => {
                let item = self.builder.push(parent, NodeKind::ListItem);
                self.blocks(node, item);
            }
            "block_quote" => {
                let quote = self.builder.push(parent, NodeKind::BlockQuote);
                self.blocks(node, quote);
            }
            "thematic_break" => {
                self.builder.push(parent, NodeKind::ThematicBreak);
            }
            "html_block" => {
                let html = self.text(node.byte_range());
                self.builder.push_leaf(parent, NodeKind::HtmlBlock, html);
            }
            kind if is_block_marker(kind) => {}
            kind => {
                tracing::trace!(kind, "unmapped block kept as raw text");
                let raw = self.text(self.trimmed(node.byte_range()));
                self.builder.push_leaf(parent, NodeKind::Other, raw);
            }
        }
    }

    /// Drop an ATX closing sequence: a trailing run of `#` that is the whole span or follows
    /// a space.
    fn without_closing_sequence(&self, span: Range<usize>) -> Range<usize> {
        let text = self.text(span.clone());
        let open = text.trim_end_matches('#');
        if open.len() == text.len() {
            span
        } else if open.is_empty() {
            span.start..span.start
        } else if open.ends_with([' ', '\t']) {
            span.start..span.start + open.trim_end().len()
        } else {
            span
        }
    }

    /// Attach the content of a block-level `inline` node below `parent`.
    fn inline(&mut self, node: Node<'a>, parent: NodeId) {
        let span = self.trimmed(node.byte_range());
        self.inline_within(node, span, parent);
    }

    /// Attach the part of an `inline` node that falls inside `span`.
    fn inline_within(&mut self, node: Node<'a>, span: Range<usize>, parent: NodeId) {
        let parsed = self.parsed;
        match parsed.inline_tree(&node) {
            Some(inline_tree) => self.inline_children(inline_tree.root_node(), span, parent),
            None => self.push_text(span, parent),
        }
    }

    /// Walk the named children of an inline node, turning the gaps between them into text.
    fn inline_children(&mut self, node: Node<'a>, span: Range<usize>, parent: NodeId) {
        let mut at = span.start;
        for child in named_children(node) {
            let start = child.start_byte().max(span.start);
            let end = child.end_byte().min(span.end);
            if start >= end {
                continue;
            }
            if start > at {
                self.push_text(at..start, parent);
            }
            if !child.kind().ends_with("_delimiter") {
                self.inline_node(child, parent);
            }
            at = at.max(end);
        }
        if span.end > at {
            self.push_text(at..span.end, parent);
        }
    }

    fn inline_node(&mut self, node: Node<'a>, parent: NodeId) {
        match node.kind() {
            "code_span" => {
                let code = self.code_span_text(node);
                self.builder.push_leaf(parent, NodeKind::CodeSpan, code);
            }
            "emphasis" | "strikethrough" => {
                let emphasis = self.builder.push(parent, NodeKind::Emphasis);
                self.inline_children(node, node.byte_range(), emphasis);
            }
            "strong_emphasis" => {
                let strong = self.builder.push(parent, NodeKind::Strong);
                self.inline_children(node, node.byte_range(), strong);
            }
            "inline_link" | "full_reference_link" | "collapsed_reference_link"
            | "shortcut_link" | "image" => {
                let link = self.builder.push(parent, NodeKind::Link);
                let label = child_of_kind(node, "link_text")
                    .or_else(|| child_of_kind(node, "image_description"));
                if let Some(label) = label {
                    let span = self.trimmed(label.byte_range());
                    self.inline_children(label, span, link);
                }
            }
            "uri_autolink" | "email_autolink" => {
                let target = self
                    .text(node.byte_range())
                    .trim_start_matches('<')
                    .trim_end_matches('>');
                self.builder.push_leaf(parent, NodeKind::Text, target);
            }
            "backslash_escape" => {
                let escaped = self.text(node.byte_range()).get(1..).unwrap_or_default();
                self.builder.push_leaf(parent, NodeKind::Text, escaped);
            }
            "hard_line_break" => {
                self.builder.push_leaf(parent, NodeKind::LineBreak, "\n");
            }
            _ => {
                let raw = self.text(node.byte_range());
                self.builder.push_leaf(parent, NodeKind::Text, raw);
            }
        }
    }

    /// Text between the opening and closing backtick runs, with CommonMark's single space
    /// stripping applied.
    fn code_span_text(&self, node: Node<'a>) -> String {
        let delimiters: Vec<Node<'a>> = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "code_span_delimiter")
            .collect();
        let inner = match (delimiters.first(), delimiters.last()) {
            (Some(open), Some(close)) if open.end_byte() <= close.start_byte() => {
                self.text(open.end_byte()..close.start_byte())
            }
            _ => self.text(node.byte_range()).trim_matches('`'),
        };
        let stripped = inner
            .strip_prefix(' ')
            .and_then(|rest| rest.strip_suffix(' '))
            .filter(|rest| !rest.trim().is_empty());
        stripped.unwrap_or(inner).to_string()
    }

    fn push_text(&mut self, range: Range<usize>, parent: NodeId) {
        let text = self.text(range);
        if !text.is_empty() {
            self.builder.push_leaf(parent, NodeKind::Text, text);
        }
    }
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
