//! Syntax errors with source context.
//!
//! A [`SyntaxError`] is a `miette` diagnostic: when rendered through `miette`'s report handler it shows the offending
//! line with a label under the failing token.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Failure to parse a source unit.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(proxygen::syntax))]
pub struct SyntaxError {
    pub message: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
}

impl SyntaxError {
    /// Build a syntax error from a `syn` error, locating it in `source`.
    pub fn from_syn(name: &str, source: &str, err: &syn::Error) -> Self {
        let start = err.span().start();
        let end = err.span().end();
        let offset = byte_offset(source, start.line, start.column);
        let end_offset = byte_offset(source, end.line, end.column).max(offset);
        Self {
            message: err.to_string(),
            source_code: NamedSource::new(name, source.to_string()),
            span: SourceSpan::new(offset.into(), end_offset - offset),
        }
    }
}

/// Convert a 1-based line and 0-based character column into a byte offset.
///
/// Positions past the end of the source clamp to the source length.
pub fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (idx, text) in source.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let within: usize = text.chars().take(column).map(char::len_utf8).sum();
            return offset + within;
        }
        offset += text.len();
    }
    source.len()
}
