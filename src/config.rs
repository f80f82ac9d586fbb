//! If there is a godown.toml in the working directory we load settings from there.
//! This provides the document suffixes to scan for and where generated files go.

use crate::error::{Error, Result};
use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use facet::Facet;
use std::fs;
use std::io;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "godown.toml";

/// Go sources written as Markdown, `go.md` by default.
fn default_extensions() -> Vec<String> {
    vec![format!("go.{}", MarkdownFormat.file_extension())]
}

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from godown.toml or falling back to defaults.
pub struct Config {
    #[facet(default = default_extensions())]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = String::new())]
    /// Directory generated files are written to; empty means next to each input.
    pub output_dir: String,
    #[facet(default = false)]
    /// Print the recognised function signatures as JSON after generating.
    pub emit_signatures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_extensions: default_extensions(),
            output_dir: String::new(),
            emit_signatures: false,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from godown.toml if present.
    ///
    /// A missing file silently yields the defaults; an unreadable or invalid one is logged and
    /// also yields the defaults.
    pub fn load() -> Self {
        match Self::load_from(Path::new(CONFIG_FILE)) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(error) => {
                tracing::warn!(%error, "ignoring configuration file");
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit path, `None` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`] if it is not valid
    /// TOML for this structure.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = facet_toml::from_str::<Self>(&contents).map_err(|error| Error::Config {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(Some(config))
    }

    /// Output directory as a path, `None` when files go next to their inputs.
    #[must_use]
    pub fn output_dir(&self) -> Option<&Path> {
        (!self.output_dir.is_empty()).then(|| Path::new(self.output_dir.as_str()))
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
