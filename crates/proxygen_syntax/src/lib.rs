//! Syntax frontend for proxygen: a generic syntax tree and the adapter that lowers Rust source into it.
//!
//! The tree ([`tree::SyntaxNode`]) is a kind tag, optional token text, and ordered children. Everything downstream
//! (extraction, synthesis, emission) works on that tree and never touches `syn` node types directly.
//!
//! ## Notes
//! - This crate is syntax-only: it does not resolve names or check types.
//! - Type, receiver, pattern, and import text is kept verbatim (see [`token_helpers::token_text`]).
//!
//! ## Examples
//! ```rust
//! use proxygen_syntax::parser;
//! use proxygen_syntax::tree::SyntaxKind;
//!
//! let unit = parser::parse("mod api { pub trait IPing { fn ping(&self); } }").unwrap();
//! assert!(unit.first_child(SyntaxKind::Namespace).is_some());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod diagnostics;
pub mod parser;
pub mod token_helpers;
pub mod tree;

pub use diagnostics::SyntaxError;
pub use tree::{SyntaxKind, SyntaxNode};
