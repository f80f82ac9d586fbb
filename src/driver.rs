//! Entry point tying the Markdown adapter, the emitter and the provenance footer together.

use crate::emit::Emitter;
use crate::error::{Error, Result};
use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use crate::tree::DocumentTree;
use serde::Serialize;

/// Project reference written on the last line of every generated file.
pub const PROJECT_REFERENCE: &str = "https://github.com/hirokistring/godown";

/// Result of generating one Go file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Generated {
    /// Go source including the provenance footer.
    pub source: String,
    /// Function signatures in document order.
    pub signatures: Vec<String>,
}

impl Generated {
    /// Generated source as bytes, ready to be written out.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }
}

/// Two comment lines naming the input document and this project, preceded by a blank line.
#[must_use]
pub fn footer(input_name: &str) -> String {
    format!(
        "\n// This file is generated from {input_name:?} by {}.\n// {PROJECT_REFERENCE}\n",
        env!("CARGO_PKG_NAME")
    )
}

/// Generate Go source from a Markdown document.
///
/// `input_name` only appears in the footer and in error messages.
///
/// # Errors
///
/// Fails if the bytes are not UTF-8, if the parser yields no tree, or if the tree is
/// structurally inconsistent. No partial output is returned in any of these cases.
pub fn generate(input_name: &str, markdown: &[u8]) -> Result<Generated> {
    generate_with(&MarkdownFormat, input_name, markdown)
}

/// [`generate`] with an explicit document format.
///
/// # Errors
///
/// See [`generate`].
#[tracing::instrument(
    level = "debug",
    skip(format, markdown),
    fields(kind = format.name(), bytes = markdown.len())
)]
pub fn generate_with<F: Format>(
    format: &F,
    input_name: &str,
    markdown: &[u8],
) -> Result<Generated> {
    let text = std::str::from_utf8(markdown).map_err(|_| Error::InvalidUtf8 {
        name: input_name.to_string(),
    })?;
    let tree = format.parse(input_name, text)?;
    generate_from_tree(input_name, &tree)
}

/// Run the emitter over an already built tree and append the footer.
///
/// # Errors
///
/// Propagates a structural traversal failure.
pub fn generate_from_tree(input_name: &str, tree: &DocumentTree) -> Result<Generated> {
    let emission = Emitter::new(tree).run()?;
    tracing::debug!(
        input = input_name,
        functions = emission.signatures.len(),
        "document emitted"
    );
    let mut source = emission.source;
    source.push_str(&footer(input_name));
    Ok(Generated {
        source,
        signatures: emission.signatures,
    })
}

/// Per-document summary printed by `godown --signatures`.
#[derive(Clone, Debug, Serialize)]
pub struct SignatureReport {
    /// Input document.
    pub input: String,
    /// Where the generated file went, absent when printed to stdout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Function signatures in document order.
    pub signatures: Vec<String>,
}

#[cfg(test)]
#[path = "tests/driver.rs"]
mod tests;
