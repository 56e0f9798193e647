//! End-to-end generation for a single source unit: parse → extract → synthesize → emit.
//!
//! Each stage is a plain function; this module only chains them and unifies their errors.

use miette::Diagnostic;
use thiserror::Error;

use proxygen_syntax::SyntaxError;
use proxygen_syntax::parser::parse_named;

use crate::config::GeneratorConfig;
use crate::emit::{EmitError, emit_unit};
use crate::extract::extract;
use crate::naming::{NamingError, file_stem};
use crate::synth::Synthesizer;

/// Failure while generating a proxy for one source unit.
#[derive(Debug, Error, Diagnostic)]
pub enum ProxyError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Naming(#[from] NamingError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// A proxy rendered to Rust source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProxy {
    /// Interface the proxy wraps
    pub interface_name: String,
    /// Name of the generated type
    pub class_name: String,
    /// Formatted Rust source, including the generated-code header
    pub code: String,
}

impl GeneratedProxy {
    /// File name the proxy is written to, e.g. `order_service_proxy.rs`.
    pub fn file_name(&self) -> String {
        format!("{}.rs", file_stem(&self.class_name))
    }
}

/// Generate the proxy for `source`, or `None` if it does not declare an interface.
///
/// `name` identifies the source in diagnostics (usually its path).
///
/// ## Errors
/// Returns [`ProxyError`] if the source does not parse, the interface name is too short, or emission fails.
pub fn proxy_for_source(
    name: &str,
    source: &str,
    config: &GeneratorConfig,
) -> Result<Option<GeneratedProxy>, ProxyError> {
    let unit = parse_named(name, source)?;
    let Some(definition) = extract(&unit).into_definition() else {
        tracing::debug!(source_name = name, "no interface declared");
        return Ok(None);
    };

    let generated = Synthesizer::with_config(config.clone()).generate(&definition)?;
    let code = emit_unit(&generated)?;

    Ok(Some(GeneratedProxy {
        interface_name: definition.interface_name().to_string(),
        class_name: generated.name().to_string(),
        code,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_an_interface_is_none() {
        let result = proxy_for_source("plain.rs", "pub struct Foo;\n", &GeneratorConfig::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_file_name_follows_class_name() {
        let source = "mod api { pub trait IOrderService { fn ping(&self); } }\n";
        let proxy = proxy_for_source("a.rs", source, &GeneratorConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(proxy.interface_name, "IOrderService");
        assert_eq!(proxy.class_name, "OrderServiceProxy");
        assert_eq!(proxy.file_name(), "order_service_proxy.rs");
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = proxy_for_source("broken.rs", "mod api { pub trait {", &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, ProxyError::Syntax(_)));
    }

    #[test]
    fn test_short_name_is_reported() {
        let err = proxy_for_source("short.rs", "mod api { pub trait I {} }", &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, ProxyError::Naming(NamingError::NameTooShort { .. })));
    }
}
