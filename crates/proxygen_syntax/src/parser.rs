//! Lower Rust source into the generic syntax tree.
//!
//! Parsing is delegated to `syn`; this module only maps the items the proxy pipeline cares about onto
//! [`SyntaxKind`]s:
//!
//! | Rust                          | node                                                  |
//! |-------------------------------|-------------------------------------------------------|
//! | `use ...;`                    | `Import` (verbatim item text)                         |
//! | `mod name { ... }`            | `Namespace` (items lowered recursively)               |
//! | `trait Name { ... }`          | `Interface`                                           |
//! | `fn name(...) -> T;` in trait | `Method` with `Modifier`, `Generics`, `WhereClause`, `ParameterList`, `ReturnType` |
//! | anything else                 | `Other` labelled with the item kind                   |
//!
//! ## Notes
//! - `mod name;` (no body) is not a namespace: there is nothing inside it to inspect.
//! - No name resolution happens here.

use syn::{FnArg, Item, ReturnType, TraitItem, TraitItemFn};

use crate::diagnostics::SyntaxError;
use crate::token_helpers::node_text;
use crate::tree::{SyntaxKind, SyntaxNode};

/// Name used for sources that do not come from a file.
pub const ANONYMOUS_SOURCE: &str = "<source>";

/// Parse a source unit into a [`SyntaxKind::SourceUnit`] tree.
///
/// ## Errors
/// Returns a [`SyntaxError`] if `source` is not valid Rust.
pub fn parse(source: &str) -> Result<SyntaxNode, SyntaxError> {
    parse_named(ANONYMOUS_SOURCE, source)
}

/// Parse a source unit, using `name` (usually the file path) in diagnostics.
#[tracing::instrument(skip_all, fields(source_name = name, source_len = source.len()))]
pub fn parse_named(name: &str, source: &str) -> Result<SyntaxNode, SyntaxError> {
    let file = syn::parse_file(source).map_err(|e| SyntaxError::from_syn(name, source, &e))?;
    Ok(lower_file(&file))
}

/// Lower an already parsed `syn` file.
pub fn lower_file(file: &syn::File) -> SyntaxNode {
    SyntaxNode::new(SyntaxKind::SourceUnit).children_from(file.items.iter().map(lower_item))
}

fn lower_item(item: &Item) -> SyntaxNode {
    match item {
        Item::Use(item_use) => SyntaxNode::with_text(SyntaxKind::Import, node_text(item_use)),
        Item::Mod(item_mod) => match &item_mod.content {
            Some((_, items)) => SyntaxNode::with_text(SyntaxKind::Namespace, item_mod.ident.to_string())
                .children_from(items.iter().map(lower_item)),
            None => SyntaxNode::with_text(SyntaxKind::Other, "mod"),
        },
        Item::Trait(item_trait) => SyntaxNode::with_text(SyntaxKind::Interface, item_trait.ident.to_string())
            .children_from(item_trait.items.iter().map(lower_trait_item)),
        other => SyntaxNode::with_text(SyntaxKind::Other, item_label(other)),
    }
}

fn lower_trait_item(item: &TraitItem) -> SyntaxNode {
    match item {
        TraitItem::Fn(method) => lower_method(method),
        TraitItem::Const(_) => SyntaxNode::with_text(SyntaxKind::Other, "const"),
        TraitItem::Type(_) => SyntaxNode::with_text(SyntaxKind::Other, "type"),
        TraitItem::Macro(_) => SyntaxNode::with_text(SyntaxKind::Other, "macro"),
        _ => SyntaxNode::with_text(SyntaxKind::Other, "verbatim"),
    }
}

fn lower_method(method: &TraitItemFn) -> SyntaxNode {
    let sig = &method.sig;
    let mut node = SyntaxNode::with_text(SyntaxKind::Method, sig.ident.to_string());
    if sig.asyncness.is_some() {
        node.push(SyntaxNode::with_text(SyntaxKind::Modifier, "async"));
    }
    if !sig.generics.params.is_empty() {
        node.push(SyntaxNode::with_text(SyntaxKind::Generics, node_text(&sig.generics)));
    }
    if let Some(where_clause) = &sig.generics.where_clause {
        node.push(SyntaxNode::with_text(SyntaxKind::WhereClause, node_text(where_clause)));
    }

    let mut params = SyntaxNode::new(SyntaxKind::ParameterList);
    for input in &sig.inputs {
        match input {
            FnArg::Receiver(receiver) => {
                params.push(SyntaxNode::with_text(SyntaxKind::Receiver, node_text(receiver)));
            }
            FnArg::Typed(pat_type) => {
                params.push(
                    SyntaxNode::with_text(SyntaxKind::Parameter, node_text(&*pat_type.pat))
                        .child(SyntaxNode::with_text(SyntaxKind::Type, node_text(&*pat_type.ty))),
                );
            }
        }
    }
    node.push(params);

    if let ReturnType::Type(_, ty) = &sig.output {
        let ret = SyntaxNode::with_text(SyntaxKind::Type, node_text(&**ty));
        node.push(SyntaxNode::new(SyntaxKind::ReturnType).child(ret));
    }
    node
}

fn item_label(item: &Item) -> &'static str {
    match item {
        Item::Const(_) => "const",
        Item::Enum(_) => "enum",
        Item::ExternCrate(_) => "extern-crate",
        Item::Fn(_) => "fn",
        Item::ForeignMod(_) => "extern",
        Item::Impl(_) => "impl",
        Item::Macro(_) => "macro",
        Item::Static(_) => "static",
        Item::Struct(_) => "struct",
        Item::TraitAlias(_) => "trait-alias",
        Item::Type(_) => "type",
        Item::Union(_) => "union",
        _ => "verbatim",
    }
}
