//! proxygen version information.
//!
//! The version is exposed as a single constant so the CLI and the generated-code header agree on the same value.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.

/// The proxygen version string (for example, `0.1.0`).
pub const PROXYGEN_VERSION: &str = env!("CARGO_PKG_VERSION");
