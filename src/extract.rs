//! Recognize an interface declaration in a source unit.
//!
//! Only the first namespace of the unit and the first interface inside it are considered. Anything that does not
//! match that shape yields [`ExtractedInterface::NotAnInterface`]; the extractor never fails.
//!
//! ## Notes
//! - Imports are taken from the unit's top level only. Imports nested in the namespace are not collected.
//! - Non-method interface members (consts, associated types, macros) are skipped.

use proxygen_syntax::{SyntaxKind, SyntaxNode};

use crate::model::{ExtractedInterface, ImportDirective, InterfaceDefinition, MethodSignature, Parameter, TypeRef};

/// Extract the interface definition declared by `unit`, if any.
#[tracing::instrument(skip_all, fields(items = unit.children().len()))]
pub fn extract(unit: &SyntaxNode) -> ExtractedInterface {
    let Some(namespace) = unit.first_child(SyntaxKind::Namespace) else {
        return ExtractedInterface::NotAnInterface;
    };
    let Some(interface) = namespace.first_child(SyntaxKind::Interface) else {
        return ExtractedInterface::NotAnInterface;
    };
    let Some(interface_name) = interface.text().filter(|name| !name.is_empty()) else {
        return ExtractedInterface::NotAnInterface;
    };

    let imports = unit
        .children_of(SyntaxKind::Import)
        .map(|import| ImportDirective::new(import.text().unwrap_or_default()))
        .collect();

    let methods: Vec<MethodSignature> = interface
        .children_of(SyntaxKind::Method)
        .map(method_signature)
        .collect();

    tracing::debug!(
        interface = interface_name,
        namespace = namespace.text().unwrap_or_default(),
        methods = methods.len(),
        "recognized interface"
    );

    let mut definition = InterfaceDefinition::new(interface_name, methods, imports);
    if let Some(name) = namespace.text() {
        definition = definition.with_namespace(name);
    }
    ExtractedInterface::Interface(definition)
}

fn method_signature(method: &SyntaxNode) -> MethodSignature {
    let params = method.first_child(SyntaxKind::ParameterList);

    let receiver = params
        .and_then(|p| p.first_child(SyntaxKind::Receiver))
        .and_then(|r| r.text())
        .map(str::to_string);

    let parameters = params
        .map(|p| {
            p.children_of(SyntaxKind::Parameter)
                .map(|param| Parameter::new(param.text().unwrap_or_default(), type_of(param)))
                .collect()
        })
        .unwrap_or_default();

    let return_type = method.first_child(SyntaxKind::ReturnType).map(type_of);

    let text_of = |kind| method.first_child(kind).and_then(|n| n.text()).map(str::to_string);

    MethodSignature::new(
        method.text().unwrap_or_default(),
        receiver,
        parameters,
        return_type,
        method.has_modifier("async"),
    )
    .with_generics(text_of(SyntaxKind::Generics), text_of(SyntaxKind::WhereClause))
}

/// Type text of the first `Type` child of `node`.
fn type_of(node: &SyntaxNode) -> TypeRef {
    TypeRef::new(
        node.first_child(SyntaxKind::Type)
            .and_then(|t| t.text())
            .unwrap_or_default(),
    )
}
