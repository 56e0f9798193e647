//! Compact, deterministic text for token streams.
//!
//! `TokenStream`'s own `Display` separates every token with a space (`crate :: models :: Order`). The tree stores
//! types, receivers, patterns, and imports as text, so this module renders them the way people write them
//! (`crate::models::Order`, `Result<Order, Error>`, `&mut self`).
//!
//! ## Notes
//! - The output is only ever re-parsed by `syn`, so the spacing rules cover readability of common type and `use`
//!   shapes, not every corner of Rust's grammar.

use proc_macro2::{Delimiter, Spacing, TokenStream, TokenTree};
use quote::ToTokens;

/// What the previously written token means for spacing of the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    Start,
    /// Identifier or literal.
    Word,
    /// Closing delimiter or generic `>`.
    Close,
    /// Token that sticks to whatever follows (`::`, `&`, `<`, `'`, `#`).
    Glue,
    /// Token that wants a space after it (`,`, `;`, `:`, `->`, `+`, `=`).
    Spaced,
}

struct Writer {
    out: String,
    last: Last,
}

impl Writer {
    fn space_if(&mut self, cond: bool) {
        if cond {
            self.out.push(' ');
        }
    }

    fn write_stream(&mut self, stream: TokenStream) {
        let mut iter = stream.into_iter().peekable();
        while let Some(tree) = iter.next() {
            match tree {
                TokenTree::Ident(ident) => {
                    self.space_if(matches!(self.last, Last::Word | Last::Close | Last::Spaced));
                    self.out.push_str(&ident.to_string());
                    self.last = Last::Word;
                }
                TokenTree::Literal(lit) => {
                    self.space_if(matches!(self.last, Last::Word | Last::Close | Last::Spaced));
                    self.out.push_str(&lit.to_string());
                    self.last = Last::Word;
                }
                TokenTree::Group(group) => {
                    let (open, close) = match group.delimiter() {
                        Delimiter::Parenthesis => ("(", ")"),
                        Delimiter::Bracket => ("[", "]"),
                        Delimiter::Brace => ("{", "}"),
                        Delimiter::None => ("", ""),
                    };
                    self.space_if(self.last == Last::Spaced);
                    self.out.push_str(open);
                    self.last = Last::Start;
                    self.write_stream(group.stream());
                    self.out.push_str(close);
                    self.last = Last::Close;
                }
                TokenTree::Punct(punct) => {
                    let ch = punct.as_char();
                    let joint = punct.spacing() == Spacing::Joint;
                    let next_char = match iter.peek() {
                        Some(TokenTree::Punct(next)) => Some(next.as_char()),
                        _ => None,
                    };
                    match ch {
                        ',' | ';' => {
                            self.out.push(ch);
                            self.last = Last::Spaced;
                        }
                        ':' if joint && next_char == Some(':') => {
                            iter.next();
                            self.space_if(self.last == Last::Spaced);
                            self.out.push_str("::");
                            self.last = Last::Glue;
                        }
                        ':' => {
                            self.out.push(':');
                            self.last = Last::Spaced;
                        }
                        '-' | '=' if joint && next_char == Some('>') => {
                            iter.next();
                            self.space_if(self.last != Last::Start);
                            self.out.push(ch);
                            self.out.push('>');
                            self.last = Last::Spaced;
                        }
                        '+' | '=' => {
                            self.space_if(self.last != Last::Start);
                            self.out.push(ch);
                            self.last = Last::Spaced;
                        }
                        '>' => {
                            self.out.push('>');
                            self.last = Last::Close;
                        }
                        '&' | '\'' => {
                            self.space_if(matches!(self.last, Last::Word | Last::Close | Last::Spaced));
                            self.out.push(ch);
                            self.last = Last::Glue;
                        }
                        _ => {
                            self.space_if(self.last == Last::Spaced);
                            self.out.push(ch);
                            self.last = Last::Glue;
                        }
                    }
                }
            }
        }
    }
}

/// Render a token stream as compact source text.
pub fn token_text(tokens: TokenStream) -> String {
    let mut writer = Writer {
        out: String::new(),
        last: Last::Start,
    };
    writer.write_stream(tokens);
    writer.out
}

/// Render any `syn` node as compact source text.
pub fn node_text<T: ToTokens>(node: &T) -> String {
    token_text(node.to_token_stream())
}
