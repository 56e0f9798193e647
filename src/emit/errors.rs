//! Define error types for tree → Rust emission.
//!
//! These errors represent *printing* failures (as opposed to recognition or naming). They mean either that verbatim
//! text carried by the tree is not valid Rust, or that the tree is not shaped like a generated unit.

use thiserror::Error;

/// Error during emission of a generated unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    /// Text stored in the tree (a type, import, pattern, or identifier) did not parse.
    #[error("syn parse error in `{text}`: {message}")]
    SynParse { text: String, message: String },
    /// The tree is missing a node the emitter requires, or has one it cannot render.
    #[error("malformed generated tree: {0}")]
    Malformed(String),
}

impl EmitError {
    pub(crate) fn syn(text: &str, err: syn::Error) -> Self {
        EmitError::SynParse {
            text: text.to_string(),
            message: err.to_string(),
        }
    }
}
