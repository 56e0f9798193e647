//! Generic syntax tree shared by the extractor, the synthesizer, and the emitter.
//!
//! A node is a kind tag, an optional token text, and an ordered list of children. The tree deliberately knows nothing
//! about Rust's grammar: consumers only ask "which children have this kind" and "what is this node's text".
//!
//! ## Notes
//! - Input trees come from [`crate::parser::parse`]; output trees are built by the proxy synthesizer.
//! - Both directions use the same representation so generated trees can go through the same printer.

use std::fmt;

/// Kind tag of a [`SyntaxNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// Root of one parsed or generated file.
    SourceUnit,
    /// A `use` item; `text` is the verbatim item.
    Import,
    /// An inline module; `text` is the module name.
    Namespace,
    /// A trait declaration; `text` is the trait name.
    Interface,
    /// A function signature inside a trait (or a generated method); `text` is the method name.
    Method,
    /// A keyword-like marker such as `pub`, `async`, or `readonly`.
    Modifier,
    /// Generic parameters of a method; `text` is verbatim (`<'a, T: Clone>`).
    Generics,
    /// `where` clause of a method; `text` is verbatim.
    WhereClause,
    /// Ordered parameters of a method or constructor.
    ParameterList,
    /// The `self` receiver of a method; `text` is verbatim (`&self`, `&mut self`, ...).
    Receiver,
    /// A typed parameter; `text` is the binding pattern, the single child is its [`SyntaxKind::Type`].
    Parameter,
    /// A type reference; `text` is verbatim.
    Type,
    /// Wraps the declared return [`SyntaxKind::Type`] of a method.
    ReturnType,
    /// Any item or member the tree does not model; `text` names what it was.
    Other,
    /// A generated type; `text` is its name.
    Class,
    /// An interface implemented by a [`SyntaxKind::Class`]; `text` is the interface name.
    BaseType,
    /// A field of a generated type; `text` is the field name.
    Field,
    /// A constructor of a generated type; `text` is the type name.
    Constructor,
    /// A statement block.
    Block,
    /// Assignment of the second child into the first.
    Assign,
    /// A bare identifier reference.
    Identifier,
    /// A call: callee first, then an [`SyntaxKind::ArgumentList`].
    Invocation,
    /// `receiver.member`; `text` is the member, the single child is the receiver.
    MemberAccess,
    /// Ordered call arguments.
    ArgumentList,
    /// A zero-argument deferred call wrapping its single child.
    Lambda,
    /// Suspension on an asynchronous operation; `text` records the continuation policy.
    Await,
    /// Return of the single child.
    Return,
}

impl SyntaxKind {
    /// Human-readable name used in diagnostics and debug dumps.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyntaxKind::SourceUnit => "source-unit",
            SyntaxKind::Import => "import",
            SyntaxKind::Namespace => "namespace",
            SyntaxKind::Interface => "interface",
            SyntaxKind::Method => "method",
            SyntaxKind::Modifier => "modifier",
            SyntaxKind::Generics => "generics",
            SyntaxKind::WhereClause => "where-clause",
            SyntaxKind::ParameterList => "parameter-list",
            SyntaxKind::Receiver => "receiver",
            SyntaxKind::Parameter => "parameter",
            SyntaxKind::Type => "type",
            SyntaxKind::ReturnType => "return-type",
            SyntaxKind::Other => "other",
            SyntaxKind::Class => "class",
            SyntaxKind::BaseType => "base-type",
            SyntaxKind::Field => "field",
            SyntaxKind::Constructor => "constructor",
            SyntaxKind::Block => "block",
            SyntaxKind::Assign => "assign",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::Invocation => "invocation",
            SyntaxKind::MemberAccess => "member-access",
            SyntaxKind::ArgumentList => "argument-list",
            SyntaxKind::Lambda => "lambda",
            SyntaxKind::Await => "await",
            SyntaxKind::Return => "return",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the generic syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxNode {
    kind: SyntaxKind,
    text: Option<String>,
    children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Create a node without token text.
    pub fn new(kind: SyntaxKind) -> Self {
        Self {
            kind,
            text: None,
            children: Vec::new(),
        }
    }

    /// Create a node carrying token text.
    pub fn with_text(kind: SyntaxKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// Append a child (builder style).
    pub fn child(mut self, child: SyntaxNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children in order (builder style).
    pub fn children_from(mut self, children: impl IntoIterator<Item = SyntaxNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append a child in place.
    pub fn push(&mut self, child: SyntaxNode) {
        self.children.push(child);
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Return `true` if this node has the given kind.
    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind
    }

    /// Token text of this node, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Direct children in order.
    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    /// Direct children of one kind, in order.
    pub fn children_of(&self, kind: SyntaxKind) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// First direct child of one kind.
    pub fn first_child(&self, kind: SyntaxKind) -> Option<&SyntaxNode> {
        self.children_of(kind).next()
    }

    /// Return `true` if a direct [`SyntaxKind::Modifier`] child has the given text.
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.children_of(SyntaxKind::Modifier)
            .any(|m| m.text() == Some(modifier))
    }

    /// Render an indented outline of the tree, one node per line.
    ///
    /// Used by debug output and tests; the format is `kind` or `kind "text"`.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(self.kind.as_str());
        if let Some(text) = &self.text {
            out.push_str(" \"");
            out.push_str(text);
            out.push('"');
        }
        out.push('\n');
        for child in &self.children {
            child.write_outline(depth + 1, out);
        }
    }
}
