//! Records passed between pipeline stages.
//!
//! Every record is an owned, immutable value: fields are private and exposed through accessors, so a stage can hand
//! its output to the next one without either side mutating it afterwards.

use std::fmt;

use proxygen_syntax::SyntaxNode;

/// Result of running the extractor over one source unit.
///
/// Callers must handle both cases; "not an interface" is an ordinary outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedInterface {
    /// The unit declares an interface inside a namespace.
    Interface(InterfaceDefinition),
    /// The unit is not a recognizable single-interface declaration.
    NotAnInterface,
}

impl ExtractedInterface {
    /// Return the definition, if one was extracted.
    pub fn into_definition(self) -> Option<InterfaceDefinition> {
        match self {
            ExtractedInterface::Interface(def) => Some(def),
            ExtractedInterface::NotAnInterface => None,
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, ExtractedInterface::Interface(_))
    }
}

/// An interface extracted from a source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDefinition {
    interface_name: String,
    namespace: Option<String>,
    methods: Vec<MethodSignature>,
    imports: Vec<ImportDirective>,
}

impl InterfaceDefinition {
    pub fn new(interface_name: impl Into<String>, methods: Vec<MethodSignature>, imports: Vec<ImportDirective>) -> Self {
        Self {
            interface_name: interface_name.into(),
            namespace: None,
            methods,
            imports,
        }
    }

    /// Record the module the interface is declared in.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn interface_name(&self) -> &str {
        &self.interface_name
    }

    /// Module the interface is declared in, if known.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> &[MethodSignature] {
        &self.methods
    }

    /// Top-level imports of the source unit, in source order (duplicates kept).
    pub fn imports(&self) -> &[ImportDirective] {
        &self.imports
    }
}

/// Signature of one interface method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    name: String,
    receiver: Option<String>,
    parameters: Vec<Parameter>,
    return_type: Option<TypeRef>,
    is_async: bool,
    generics: Option<String>,
    where_clause: Option<String>,
}

impl MethodSignature {
    pub fn new(
        name: impl Into<String>,
        receiver: Option<String>,
        parameters: Vec<Parameter>,
        return_type: Option<TypeRef>,
        is_async: bool,
    ) -> Self {
        Self {
            name: name.into(),
            receiver,
            parameters,
            return_type,
            is_async,
            generics: None,
            where_clause: None,
        }
    }

    /// Attach verbatim generic parameters (`<'a, T>`) and `where` clause.
    pub fn with_generics(mut self, generics: Option<String>, where_clause: Option<String>) -> Self {
        self.generics = generics;
        self.where_clause = where_clause;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Verbatim `self` receiver (`&self`, `&mut self`), if the method has one.
    pub fn receiver(&self) -> Option<&str> {
        self.receiver.as_deref()
    }

    /// Parameters in declared order. Forwarding is positional, so this order matters.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Declared return type; `None` when the source omits `->`.
    pub fn return_type(&self) -> Option<&TypeRef> {
        self.return_type.as_ref()
    }

    /// Whether the source signature was already `async`.
    pub fn is_async(&self) -> bool {
        self.is_async
    }

    pub fn generics(&self) -> Option<&str> {
        self.generics.as_deref()
    }

    pub fn where_clause(&self) -> Option<&str> {
        self.where_clause.as_deref()
    }
}

/// A named, typed method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self { name: name.into(), ty }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }
}

/// Verbatim type text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Verbatim text of one `use` item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportDirective(String);

impl ImportDirective {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImportDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Names derived from an interface name (see [`crate::naming::derive_names`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedNames {
    pub interface_name: String,
    pub class_name: String,
    pub field_name: String,
    pub constructor_arg_name: String,
}

/// A synthesized proxy: its type name and the generated source-unit tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedType {
    name: String,
    tree: SyntaxNode,
}

impl GeneratedType {
    pub fn new(name: impl Into<String>, tree: SyntaxNode) -> Self {
        Self { name: name.into(), tree }
    }

    /// Name of the generated type (also used to pick the output file name).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tree(&self) -> &SyntaxNode {
        &self.tree
    }

    pub fn into_tree(self) -> SyntaxNode {
        self.tree
    }
}
