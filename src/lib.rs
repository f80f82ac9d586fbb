//! godown: literate programming for Go.
//!
//! A Markdown document describes a Go file with its structure:
//!
//! ````text
//! # main.go
//! ```
//! package main
//! ```
//!
//! ## func `Add`
//! - parameters
//!   - `a int` : first addend
//!   - `b int` : second addend
//! - returns
//!   - `int`
//!
//! ```
//! return a + b
//! ```
//! ````
//!
//! [`generate`] reads such a document and reconstructs the Go source. Narrative prose can be
//! mixed freely with the structural elements; anything that does not match a recognised shape is
//! skipped.
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod driver;
pub mod emit;
pub mod error;
pub mod formats;
pub mod input;
pub mod leaves;
pub mod navigate;
pub mod predicates;
pub mod tree;

pub use driver::{generate, Generated};
pub use error::{Error, Result};
pub use tree::{DocumentTree, NodeId, NodeKind};
