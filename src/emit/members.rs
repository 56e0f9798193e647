//! Class, member, and expression emission.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;

use proxygen_syntax::{SyntaxKind, SyntaxNode};

use super::{EmitError, any_ident, expect_kind, ident, required_text};
use crate::synth::{MOD_ASYNC, MOD_PUBLIC, SELF_IDENT};

/// Emit a class: struct definition, constructor impl, and method impl.
pub(super) fn emit_class(class: &SyntaxNode) -> Result<TokenStream, EmitError> {
    let name = ident(required_text(class)?)?;
    let vis = visibility(class);
    let base_type = class.first_child(SyntaxKind::BaseType);
    let ctx = ClassContext {
        interface: base_type.map(required_text).transpose()?,
        interface_path: base_type
            .map(|base| match base.first_child(SyntaxKind::Type) {
                Some(path) => required_text(path),
                None => required_text(base),
            })
            .transpose()?,
    };

    let fields = class
        .children_of(SyntaxKind::Field)
        .map(|f| ctx.field(f))
        .collect::<Result<Vec<_>, _>>()?;
    let constructors = class
        .children_of(SyntaxKind::Constructor)
        .map(|c| ctx.constructor(c))
        .collect::<Result<Vec<_>, _>>()?;
    let methods = class
        .children_of(SyntaxKind::Method)
        .map(|m| ctx.method(m))
        .collect::<Result<Vec<_>, _>>()?;

    let constructor_impl = if constructors.is_empty() {
        quote! {}
    } else {
        quote! {
            impl #name {
                #(#constructors)*
            }
        }
    };

    let method_impl = match ctx.interface_path {
        Some(interface) => {
            let path = type_path(interface)?;
            quote! {
                #[::async_trait::async_trait]
                impl #path for #name {
                    #(#methods)*
                }
            }
        }
        None if methods.is_empty() => quote! {},
        None => quote! {
            impl #name {
                #(#methods)*
            }
        },
    };

    Ok(quote! {
        #vis struct #name {
            #(#fields)*
        }

        #constructor_impl
        #method_impl
    })
}

fn visibility(node: &SyntaxNode) -> TokenStream {
    if node.has_modifier(MOD_PUBLIC) {
        quote!(pub)
    } else {
        quote!()
    }
}

fn type_path(text: &str) -> Result<syn::Path, EmitError> {
    syn::parse_str::<syn::Path>(text).map_err(|e| EmitError::syn(text, e))
}

/// Binding name of a parameter pattern. Only plain bindings (`x`, `mut x`) can be forwarded.
fn binding(text: &str) -> Result<syn::Ident, EmitError> {
    let pat = syn::Pat::parse_single.parse_str(text).map_err(|e| EmitError::syn(text, e))?;
    match pat {
        syn::Pat::Ident(pat_ident) => Ok(pat_ident.ident),
        _ => Err(EmitError::Malformed(format!("parameter pattern `{text}` is not a plain binding"))),
    }
}

/// Per-class state needed while emitting members.
struct ClassContext<'a> {
    /// Interface the class implements, if any
    interface: Option<&'a str>,
    /// Path the interface is named by in emitted code
    interface_path: Option<&'a str>,
}

impl ClassContext<'_> {
    /// Type of a field or parameter. The implemented interface becomes a shared trait object.
    fn slot_type(&self, slot: &SyntaxNode) -> Result<TokenStream, EmitError> {
        let ty = slot
            .first_child(SyntaxKind::Type)
            .ok_or_else(|| EmitError::Malformed(format!("{} `{}` has no type", slot.kind(), slot.text().unwrap_or_default())))?;
        let text = required_text(ty)?;

        if self.interface == Some(text) {
            let path = type_path(self.interface_path.unwrap_or(text))?;
            return Ok(quote!(::std::sync::Arc<dyn #path + Send + Sync>));
        }
        let parsed: syn::Type = syn::parse_str(text).map_err(|e| EmitError::syn(text, e))?;
        Ok(quote!(#parsed))
    }

    fn field(&self, field: &SyntaxNode) -> Result<TokenStream, EmitError> {
        let name = ident(required_text(field)?)?;
        let vis = visibility(field);
        let ty = self.slot_type(field)?;
        Ok(quote!(#vis #name: #ty,))
    }

    fn parameters(&self, owner: &SyntaxNode) -> Result<Vec<TokenStream>, EmitError> {
        let Some(list) = owner.first_child(SyntaxKind::ParameterList) else {
            return Ok(Vec::new());
        };
        list.children()
            .iter()
            .map(|param| match param.kind() {
                SyntaxKind::Receiver => {
                    let text = required_text(param)?;
                    let receiver: syn::FnArg = syn::parse_str(text).map_err(|e| EmitError::syn(text, e))?;
                    Ok(quote!(#receiver))
                }
                SyntaxKind::Parameter => {
                    let text = required_text(param)?;
                    let pat = syn::Pat::parse_single.parse_str(text).map_err(|e| EmitError::syn(text, e))?;
                    let ty = self.slot_type(param)?;
                    Ok(quote!(#pat: #ty))
                }
                other => Err(EmitError::Malformed(format!("unexpected {other} in parameter list"))),
            })
            .collect()
    }

    fn constructor(&self, ctor: &SyntaxNode) -> Result<TokenStream, EmitError> {
        let vis = visibility(ctor);
        let params = self.parameters(ctor)?;

        let mut inits = Vec::new();
        if let Some(block) = ctor.first_child(SyntaxKind::Block) {
            for assign in block.children() {
                expect_kind(assign, SyntaxKind::Assign)?;
                let [target, value] = assign.children() else {
                    return Err(EmitError::Malformed("assignment needs a target and a value".to_string()));
                };
                let target = ident(required_text(target)?)?;
                let value = ident(required_text(value)?)?;
                inits.push(quote!(#target: #value));
            }
        }

        Ok(quote! {
            #vis fn new(#(#params),*) -> Self {
                Self { #(#inits),* }
            }
        })
    }

    /// Emit a method. Trait methods inherit the trait's visibility, so `pub` is only kept for inherent methods.
    fn method(&self, method: &SyntaxNode) -> Result<TokenStream, EmitError> {
        let name = ident(required_text(method)?)?;
        let vis = if self.interface.is_some() {
            quote!()
        } else {
            visibility(method)
        };
        let asyncness = if method.has_modifier(MOD_ASYNC) {
            quote!(async)
        } else {
            quote!()
        };
        let mut generics: syn::Generics = match method.first_child(SyntaxKind::Generics) {
            Some(node) => {
                let text = required_text(node)?;
                syn::parse_str(text).map_err(|e| EmitError::syn(text, e))?
            }
            None => syn::Generics::default(),
        };
        if let Some(node) = method.first_child(SyntaxKind::WhereClause) {
            let text = required_text(node)?;
            generics.where_clause = Some(syn::parse_str(text).map_err(|e| EmitError::syn(text, e))?);
        }
        let where_clause = &generics.where_clause;

        let params = self.parameters(method)?;
        let output = match method.first_child(SyntaxKind::ReturnType) {
            Some(ret) => {
                let ty = self.slot_type(ret)?;
                quote!(-> #ty)
            }
            None => quote!(),
        };

        let stmts = match method.first_child(SyntaxKind::Block) {
            Some(block) => block_statements(block)?,
            None => Vec::new(),
        };

        Ok(quote! {
            #vis #asyncness fn #name #generics(#(#params),*) #output #where_clause {
                #(#stmts)*
            }
        })
    }
}

fn block_statements(block: &SyntaxNode) -> Result<Vec<TokenStream>, EmitError> {
    let last = block.children().len().saturating_sub(1);
    block
        .children()
        .iter()
        .enumerate()
        .map(|(i, stmt)| match stmt.kind() {
            SyntaxKind::Return => {
                let value = match stmt.children() {
                    [] => quote!(),
                    [value] => expr(value, false)?,
                    _ => return Err(EmitError::Malformed("return takes at most one value".to_string())),
                };
                // Trailing return is rendered as the tail expression
                Ok(if i == last {
                    value
                } else {
                    quote!(return #value;)
                })
            }
            SyntaxKind::Assign => {
                let [target, value] = stmt.children() else {
                    return Err(EmitError::Malformed("assignment needs a target and a value".to_string()));
                };
                let target = expr(target, false)?;
                let value = expr(value, false)?;
                Ok(quote!(#target = #value;))
            }
            _ => {
                let value = expr(stmt, false)?;
                Ok(quote!(#value;))
            }
        })
        .collect()
}

/// Emit an expression node. `in_thunk` is set inside a lambda, where forwarded arguments are cloned.
fn expr(node: &SyntaxNode, in_thunk: bool) -> Result<TokenStream, EmitError> {
    match node.kind() {
        SyntaxKind::Identifier => {
            let text = required_text(node)?;
            let name = if text == SELF_IDENT {
                any_ident(text)?
            } else {
                binding(text)?
            };
            Ok(quote!(#name))
        }
        SyntaxKind::MemberAccess => {
            let member = ident(required_text(node)?)?;
            let target = node
                .children()
                .first()
                .ok_or_else(|| EmitError::Malformed(format!("member access `{member}` has no target")))?;
            match target.text() {
                // Non-self identifiers name a type: `Type::member`
                Some(text) if target.is(SyntaxKind::Identifier) && text != SELF_IDENT => {
                    let path = type_path(text)?;
                    Ok(quote!(#path::#member))
                }
                _ => {
                    let target = expr(target, in_thunk)?;
                    Ok(quote!(#target.#member))
                }
            }
        }
        SyntaxKind::Invocation => {
            let [callee, args] = node.children() else {
                return Err(EmitError::Malformed("invocation needs a callee and an argument list".to_string()));
            };
            expect_kind(args, SyntaxKind::ArgumentList)?;
            let callee = expr(callee, in_thunk)?;
            let args = args
                .children()
                .iter()
                .map(|arg| {
                    let value = expr(arg, in_thunk)?;
                    Ok(if in_thunk && arg.is(SyntaxKind::Identifier) {
                        quote!(::core::clone::Clone::clone(&#value))
                    } else {
                        value
                    })
                })
                .collect::<Result<Vec<_>, EmitError>>()?;
            Ok(quote!(#callee(#(#args),*)))
        }
        SyntaxKind::Lambda => {
            let [body] = node.children() else {
                return Err(EmitError::Malformed("lambda needs exactly one body expression".to_string()));
            };
            let body = expr(body, true)?;
            Ok(quote!(move || #body))
        }
        SyntaxKind::Await => {
            let [inner] = node.children() else {
                return Err(EmitError::Malformed("await needs exactly one operand".to_string()));
            };
            let inner = expr(inner, in_thunk)?;
            Ok(quote!(#inner.await))
        }
        other => Err(EmitError::Malformed(format!("cannot emit {other} as an expression"))),
    }
}
