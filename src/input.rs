//! Locating Markdown sources on disk and deciding where their Go output goes.

use crate::error::{Error, Result};
use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Whether the file name ends with `.<ext>` for one of `extensions`.
#[must_use]
pub fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    extensions.iter().any(|ext| {
        let ext = ext.trim_start_matches('.');
        name.len() > ext.len() + 1
            && name.ends_with(ext)
            && name[..name.len() - ext.len()].ends_with('.')
    })
}

/// Expand files and directories into the list of documents to convert.
///
/// Files named explicitly are always kept. Directories are walked recursively, honouring
/// `.gitignore`, and contribute files matching `extensions`. The result is sorted and free of
/// duplicates.
///
/// # Errors
///
/// Returns [`Error::Io`] if a named path does not exist.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for path in paths {
        let metadata = fs::metadata(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            documents.push(path);
            continue;
        }
        for entry in WalkBuilder::new(&path).follow_links(false).build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::warn!(%error, "skipping unreadable entry");
                    continue;
                }
            };
            let is_file = entry.file_type().is_some_and(|kind| kind.is_file());
            if is_file && matches_extension(entry.path(), extensions) {
                documents.push(entry.into_path());
            }
        }
    }
    documents.sort();
    documents.dedup();
    tracing::debug!(count = documents.len(), "documents found");
    Ok(documents)
}

/// Path of the Go file generated from `input`: the trailing `.md` is dropped
/// (`main.go.md` becomes `main.go`), and the file lands in `output_dir` when one is given.
#[must_use]
pub fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let markdown_suffix = format!(".{}", MarkdownFormat.file_extension());
    let stem = name.strip_suffix(markdown_suffix.as_str()).unwrap_or(&name);
    let stem = if stem.ends_with(".go") {
        stem.to_string()
    } else {
        format!("{stem}.go")
    };
    match output_dir {
        Some(dir) => dir.join(stem),
        None => input.with_file_name(stem),
    }
}

/// Read a whole document.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read.
pub fn read_document(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write generated source, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`Error::Io`] if the directory or file cannot be written.
pub fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, contents).map_err(io_error)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
