//! Synthesize the proxy type for an interface definition.
//!
//! The output is a [`SyntaxKind::SourceUnit`] tree in the same representation the extractor reads:
//!
//! ```text
//! source-unit
//!   import ...                     (source imports, in order)
//!   import "<policy import>"
//!   namespace "<namespace>"
//!     class "<Name>Proxy"
//!       modifier "pub"
//!       base-type "<IName>"
//!         type "<module>::<ns>::<IName>"  (path the generated code names the interface by)
//!       field "_service"           (private, readonly, interface-typed)
//!       constructor "<Name>Proxy"  (one interface-typed parameter, assigns the field)
//!       method ...                 (one per interface method, in order)
//! ```
//!
//! Parameters that are not plain bindings (`_`, tuple patterns) are renamed `arg{index}` so they can be forwarded.
//!
//! Each method body is `return await(any-context) Policy.operation(() => self._service.method(p1, .., pN))`.
//!
//! ## Notes
//! - Generation is pure: the same definition always yields an equal tree.
//! - No error handling is added to generated bodies; faults reach the proxy's caller unchanged.

use proxygen_syntax::{SyntaxKind, SyntaxNode};

use crate::config::GeneratorConfig;
use crate::model::{DerivedNames, GeneratedType, InterfaceDefinition, MethodSignature};
use crate::naming::{NamingError, derive_names};

/// Visibility marker for public members.
pub const MOD_PUBLIC: &str = "pub";
/// Visibility marker for private members.
pub const MOD_PRIVATE: &str = "private";
/// Marker for fields assigned once, in the constructor.
pub const MOD_READONLY: &str = "readonly";
/// Marker for asynchronous methods.
pub const MOD_ASYNC: &str = "async";
/// Continuation policy of generated awaits: resume on whatever context completes the operation.
pub const AWAIT_ANY_CONTEXT: &str = "any-context";
/// Receiver identifier used for member access on the proxy itself.
pub const SELF_IDENT: &str = "self";

/// Builds proxy types from interface definitions.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    config: GeneratorConfig,
}

impl Synthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the proxy type for `definition`.
    ///
    /// ## Errors
    /// Returns [`NamingError`] if the interface name is too short to derive a class name from.
    #[tracing::instrument(skip_all, fields(interface = definition.interface_name(), methods = definition.methods().len()))]
    pub fn generate(&self, definition: &InterfaceDefinition) -> Result<GeneratedType, NamingError> {
        let names = derive_names(definition.interface_name())?;

        let interface_path = self
            .config
            .interface_path(definition.namespace(), &names.interface_name);
        let base_type = SyntaxNode::with_text(SyntaxKind::BaseType, names.interface_name.as_str())
            .child(SyntaxNode::with_text(SyntaxKind::Type, interface_path));

        let class = SyntaxNode::with_text(SyntaxKind::Class, names.class_name.as_str())
            .child(modifier(MOD_PUBLIC))
            .child(base_type)
            .child(field(&names))
            .child(constructor(&names))
            .children_from(
                definition
                    .methods()
                    .iter()
                    .map(|m| self.proxy_method(m, &names.field_name)),
            );

        let namespace = SyntaxNode::with_text(SyntaxKind::Namespace, self.config.namespace.as_str()).child(class);

        let unit = SyntaxNode::new(SyntaxKind::SourceUnit)
            .children_from(
                definition
                    .imports()
                    .iter()
                    .map(|import| SyntaxNode::with_text(SyntaxKind::Import, import.as_str())),
            )
            .child(SyntaxNode::with_text(SyntaxKind::Import, self.config.policy_import.as_str()))
            .child(namespace);

        tracing::debug!(class = %names.class_name, "synthesized proxy");
        Ok(GeneratedType::new(names.class_name, unit))
    }

    /// Build one forwarding method: same signature plus `async`, body wrapped in the policy call.
    fn proxy_method(&self, method: &MethodSignature, field_name: &str) -> SyntaxNode {
        if method.receiver().is_none() {
            tracing::warn!(
                method = method.name(),
                "method has no self receiver; the generated forwarding call will not compile"
            );
        }

        let names = forwarded_names(method);

        let mut params = SyntaxNode::new(SyntaxKind::ParameterList);
        if let Some(receiver) = method.receiver() {
            params.push(SyntaxNode::with_text(SyntaxKind::Receiver, receiver));
        }
        for (param, name) in method.parameters().iter().zip(&names) {
            params.push(
                SyntaxNode::with_text(SyntaxKind::Parameter, name.as_str())
                    .child(SyntaxNode::with_text(SyntaxKind::Type, param.ty().as_str())),
            );
        }

        // self.<field>.<method>(p1, .., pN)
        let forward = SyntaxNode::new(SyntaxKind::Invocation)
            .child(
                SyntaxNode::with_text(SyntaxKind::MemberAccess, method.name())
                    .child(member(field_name, identifier(SELF_IDENT))),
            )
            .child(
                SyntaxNode::new(SyntaxKind::ArgumentList)
                    .children_from(names.iter().map(|name| identifier(name))),
            );

        // <Policy>.<operation>(|| forward)
        let wrapped = SyntaxNode::new(SyntaxKind::Invocation)
            .child(member(&self.config.policy_method, identifier(&self.config.policy_type)))
            .child(SyntaxNode::new(SyntaxKind::ArgumentList).child(SyntaxNode::new(SyntaxKind::Lambda).child(forward)));

        let body = SyntaxNode::new(SyntaxKind::Block).child(
            SyntaxNode::new(SyntaxKind::Return)
                .child(SyntaxNode::with_text(SyntaxKind::Await, AWAIT_ANY_CONTEXT).child(wrapped)),
        );

        let mut node = SyntaxNode::with_text(SyntaxKind::Method, method.name())
            .child(modifier(MOD_PUBLIC))
            .child(modifier(MOD_ASYNC));
        if let Some(generics) = method.generics() {
            node.push(SyntaxNode::with_text(SyntaxKind::Generics, generics));
        }
        if let Some(where_clause) = method.where_clause() {
            node.push(SyntaxNode::with_text(SyntaxKind::WhereClause, where_clause));
        }
        node.push(params);
        if let Some(ret) = method.return_type() {
            node.push(SyntaxNode::new(SyntaxKind::ReturnType).child(SyntaxNode::with_text(SyntaxKind::Type, ret.as_str())));
        }
        node.child(body)
    }
}

/// Names each parameter is declared and forwarded under.
///
/// Plain bindings (`id`, `mut id`) keep their pattern. Patterns that bind no single name (`_`, tuples) get a
/// positional `arg{index}` name that does not collide with the other parameters.
fn forwarded_names(method: &MethodSignature) -> Vec<String> {
    let params = method.parameters();
    params
        .iter()
        .enumerate()
        .map(|(index, param)| {
            if is_plain_binding(param.name()) {
                return param.name().to_string();
            }
            let mut name = format!("arg{index}");
            while params.iter().any(|p| binding_name(p.name()) == name) {
                name.insert(0, '_');
            }
            name
        })
        .collect()
}

/// Identifier bound by `text`, ignoring a leading `mut`.
fn binding_name(text: &str) -> &str {
    text.strip_prefix("mut ").unwrap_or(text).trim()
}

fn is_plain_binding(text: &str) -> bool {
    let name = binding_name(text);
    let name = name.strip_prefix("r#").unwrap_or(name);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            name != "_" && chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}

fn modifier(text: &str) -> SyntaxNode {
    SyntaxNode::with_text(SyntaxKind::Modifier, text)
}

fn identifier(text: &str) -> SyntaxNode {
    SyntaxNode::with_text(SyntaxKind::Identifier, text)
}

fn member(name: &str, receiver: SyntaxNode) -> SyntaxNode {
    SyntaxNode::with_text(SyntaxKind::MemberAccess, name).child(receiver)
}

fn field(names: &DerivedNames) -> SyntaxNode {
    SyntaxNode::with_text(SyntaxKind::Field, names.field_name.as_str())
        .child(modifier(MOD_PRIVATE))
        .child(modifier(MOD_READONLY))
        .child(SyntaxNode::with_text(SyntaxKind::Type, names.interface_name.as_str()))
}

fn constructor(names: &DerivedNames) -> SyntaxNode {
    let param = SyntaxNode::with_text(SyntaxKind::Parameter, names.constructor_arg_name.as_str())
        .child(SyntaxNode::with_text(SyntaxKind::Type, names.interface_name.as_str()));
    let assign = SyntaxNode::new(SyntaxKind::Assign)
        .child(identifier(&names.field_name))
        .child(identifier(&names.constructor_arg_name));

    SyntaxNode::with_text(SyntaxKind::Constructor, names.class_name.as_str())
        .child(modifier(MOD_PUBLIC))
        .child(SyntaxNode::new(SyntaxKind::ParameterList).child(param))
        .child(SyntaxNode::new(SyntaxKind::Block).child(assign))
}
