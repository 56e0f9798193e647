//! Emit Rust source code from a generated tree.
//!
//! The emitter walks a [`SyntaxKind::SourceUnit`] produced by [`crate::synth::Synthesizer`], builds tokens with
//! `quote`, re-parses them with `syn`, and formats the result with `prettyplease`.
//!
//! ## Rendering
//! - Imports are emitted at file level; each namespace becomes `pub mod <ns> { use super::*; ... }` so the imports
//!   stay visible inside it.
//! - A class becomes a struct, an inherent `impl` holding the constructor (`new`), and an
//!   `#[async_trait] impl <Interface> for <Class>` holding the forwarding methods.
//! - The interface is named by the path stored under the class's base type (`crate::contracts::IOrderService`), since
//!   the module that declares it is not part of the generated file.
//! - Slots typed with the implemented interface (the field, the constructor parameter) are rendered as
//!   `Arc<dyn Interface + Send + Sync>`.
//! - Method generics and `where` clauses are copied from the interface.
//! - Arguments forwarded inside a thunk are cloned, since the policy may invoke the thunk more than once.
//!
//! ## See also
//! - `members`: class, member, and expression emission

mod errors;
mod members;

pub use errors::EmitError;

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::Parser;

use proxygen_syntax::{SyntaxKind, SyntaxNode};

use crate::model::GeneratedType;
use crate::version::PROXYGEN_VERSION;

/// Emit a generated proxy as formatted Rust source, prefixed with a generated-code header.
///
/// ## Errors
/// Returns [`EmitError`] if text in the tree is not valid Rust or the tree is not a generated unit.
#[tracing::instrument(skip_all, fields(name = generated.name()))]
pub fn emit_unit(generated: &GeneratedType) -> Result<String, EmitError> {
    let tokens = emit_unit_tokens(generated.tree())?;
    let file: syn::File = syn::parse2(tokens).map_err(|e| EmitError::syn(generated.name(), e))?;
    Ok(format!("{}{}", header(), prettyplease::unparse(&file)))
}

/// Header line placed at the top of every emitted file.
pub fn header() -> String {
    format!("// Generated by proxygen v{PROXYGEN_VERSION}. Do not edit.\n\n")
}

/// Emit a generated unit to tokens (without formatting).
pub fn emit_unit_tokens(unit: &SyntaxNode) -> Result<TokenStream, EmitError> {
    expect_kind(unit, SyntaxKind::SourceUnit)?;

    let imports = unit
        .children_of(SyntaxKind::Import)
        .map(emit_import)
        .collect::<Result<Vec<_>, _>>()?;
    let namespaces = unit
        .children_of(SyntaxKind::Namespace)
        .map(emit_namespace)
        .collect::<Result<Vec<_>, _>>()?;
    if namespaces.is_empty() {
        return Err(EmitError::Malformed("source unit has no namespace".to_string()));
    }

    Ok(quote! {
        #(#imports)*
        #(#namespaces)*
    })
}

fn emit_import(node: &SyntaxNode) -> Result<TokenStream, EmitError> {
    let text = required_text(node)?;
    let item: syn::ItemUse = syn::parse_str(text).map_err(|e| EmitError::syn(text, e))?;
    Ok(quote!(#item))
}

fn emit_namespace(node: &SyntaxNode) -> Result<TokenStream, EmitError> {
    let name = ident(required_text(node)?)?;
    let classes = node
        .children_of(SyntaxKind::Class)
        .map(members::emit_class)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(quote! {
        pub mod #name {
            #![allow(non_snake_case)]
            use super::*;

            #(#classes)*
        }
    })
}

fn expect_kind(node: &SyntaxNode, kind: SyntaxKind) -> Result<(), EmitError> {
    if node.is(kind) {
        Ok(())
    } else {
        Err(EmitError::Malformed(format!("expected {kind} node, found {}", node.kind())))
    }
}

fn required_text(node: &SyntaxNode) -> Result<&str, EmitError> {
    node.text()
        .ok_or_else(|| EmitError::Malformed(format!("{} node has no text", node.kind())))
}

/// Parse a plain identifier (keywords rejected, raw identifiers accepted).
fn ident(text: &str) -> Result<syn::Ident, EmitError> {
    syn::parse_str::<syn::Ident>(text).map_err(|e| EmitError::syn(text, e))
}

/// Parse an identifier that may be a keyword such as `self`.
fn any_ident(text: &str) -> Result<syn::Ident, EmitError> {
    syn::Ident::parse_any.parse_str(text).map_err(|e| EmitError::syn(text, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImportDirective, InterfaceDefinition, MethodSignature, Parameter, TypeRef};
    use crate::synth::Synthesizer;

    fn order_service() -> GeneratedType {
        let def = InterfaceDefinition::new(
            "IOrderService",
            vec![MethodSignature::new(
                "get_order",
                Some("&self".to_string()),
                vec![Parameter::new("id", TypeRef::new("i32"))],
                Some(TypeRef::new("Order")),
                true,
            )],
            vec![ImportDirective::new("use crate::models::Order;")],
        )
        .with_namespace("contracts");
        Synthesizer::new().generate(&def).unwrap()
    }

    #[test]
    fn test_emit_unit_starts_with_header() {
        let code = emit_unit(&order_service()).unwrap();
        assert!(code.starts_with("// Generated by proxygen v"));
    }

    #[test]
    fn test_emit_unit_is_valid_rust() {
        let code = emit_unit(&order_service()).unwrap();
        syn::parse_file(&code).expect("emitted code should parse");
    }

    #[test]
    fn test_emit_unit_contains_expected_items() {
        let code = emit_unit(&order_service()).unwrap();
        assert!(code.contains("use crate::models::Order;"));
        assert!(code.contains("use crate::wrappers::ServicePolicy;"));
        assert!(code.contains("pub mod proxy"));
        assert!(code.contains("pub struct OrderServiceProxy"));
        assert!(code.contains("_service: ::std::sync::Arc<dyn crate::contracts::IOrderService + Send + Sync>"));
        assert!(code.contains("pub fn new("));
        assert!(code.contains("orderService: ::std::sync::Arc<"));
        assert!(code.contains("impl crate::contracts::IOrderService for OrderServiceProxy"));
        assert!(code.contains("async fn get_order(&self, id: i32) -> Order"));
        assert!(code.contains("ServicePolicy::execute_with_timeout_and_retry"));
        assert!(code.contains(".await"));
    }

    #[test]
    fn test_emit_rejects_non_unit() {
        let err = emit_unit_tokens(&SyntaxNode::new(SyntaxKind::Class)).unwrap_err();
        assert!(matches!(err, EmitError::Malformed(_)));
    }

    #[test]
    fn test_emit_rejects_unit_without_namespace() {
        let err = emit_unit_tokens(&SyntaxNode::new(SyntaxKind::SourceUnit)).unwrap_err();
        assert_eq!(err, EmitError::Malformed("source unit has no namespace".to_string()));
    }

    #[test]
    fn test_emit_reports_bad_import_text() {
        let unit = SyntaxNode::new(SyntaxKind::SourceUnit)
            .child(SyntaxNode::with_text(SyntaxKind::Import, "use ;"))
            .child(SyntaxNode::with_text(SyntaxKind::Namespace, "proxy"));
        let err = emit_unit_tokens(&unit).unwrap_err();
        assert!(matches!(err, EmitError::SynParse { ref text, .. } if text == "use ;"));
    }

    #[test]
    fn test_any_ident_accepts_self() {
        assert!(any_ident("self").is_ok());
        assert!(ident("self").is_err());
        assert!(ident("r#type").is_ok());
    }
}
