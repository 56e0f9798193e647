#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! proxygen: resilience proxy generator
//!
//! Reads a Rust source file declaring a service trait and generates a proxy type that implements the same trait by
//! forwarding every call to a wrapped instance, with each call run through a timeout-and-retry policy.
//!
//! ## Pipeline
//!
//! 1. [`proxygen_syntax::parser`] lowers source text into a generic [`SyntaxNode`] tree.
//! 2. [`extract`] recognizes the interface declared in the tree.
//! 3. [`synth`] builds the proxy type as a new tree, using names from [`naming`].
//! 4. [`emit`] renders the tree as formatted Rust.
//!
//! [`pipeline::proxy_for_source`] chains all four; [`cli`] runs it over a directory.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The crate root denies
//!   `clippy::unwrap_used` and `clippy::expect_used` outside of test builds.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod emit;
pub mod extract;
pub mod model;
pub mod naming;
pub mod pipeline;
pub mod synth;
pub mod version;

pub use proxygen_syntax::{SyntaxKind, SyntaxNode};

pub use config::GeneratorConfig;
pub use emit::{EmitError, emit_unit};
pub use extract::extract;
pub use model::{DerivedNames, ExtractedInterface, GeneratedType, InterfaceDefinition, MethodSignature};
pub use naming::{NamingError, derive_names};
pub use pipeline::{GeneratedProxy, ProxyError, proxy_for_source};
pub use synth::Synthesizer;
