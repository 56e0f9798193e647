//! End-to-end tests for the generation pipeline
//!
//! Each test starts from Rust source text, runs parse → extract → synthesize → emit, and checks the result either on
//! the generated tree or on the emitted code (re-parsed with `syn`).

use proxygen::naming::derive_names;
use proxygen::synth::{AWAIT_ANY_CONTEXT, MOD_ASYNC};
use proxygen::{
    ExtractedInterface, GeneratedType, GeneratorConfig, SyntaxKind, SyntaxNode, Synthesizer, emit_unit, extract,
    proxy_for_source,
};
use proxygen_syntax::parser::parse;

const ORDER_SERVICE: &str = r#"
use crate::models::Order;

pub mod contracts {
    use super::*;

    pub trait IOrderService {
        async fn get_order(&self, id: i32) -> Order;
    }
}
"#;

/// Generate the proxy tree for `source`, panicking if it is not an interface.
fn generate(source: &str) -> GeneratedType {
    let unit = parse(source).expect("source should parse");
    let definition = extract(&unit).into_definition().expect("source should declare an interface");
    Synthesizer::new().generate(&definition).expect("generation should succeed")
}

fn class_of(generated: &GeneratedType) -> &SyntaxNode {
    generated
        .tree()
        .first_child(SyntaxKind::Namespace)
        .and_then(|ns| ns.first_child(SyntaxKind::Class))
        .expect("generated unit should contain a class")
}

/// Names of the arguments forwarded to the wrapped service by `method`.
fn forwarded(method: &SyntaxNode) -> Vec<String> {
    let lambda = method
        .first_child(SyntaxKind::Block)
        .and_then(|b| b.first_child(SyntaxKind::Return))
        .and_then(|r| r.first_child(SyntaxKind::Await))
        .and_then(|a| a.first_child(SyntaxKind::Invocation))
        .and_then(|c| c.first_child(SyntaxKind::ArgumentList))
        .and_then(|args| args.first_child(SyntaxKind::Lambda))
        .expect("method body should wrap a thunk");
    lambda
        .first_child(SyntaxKind::Invocation)
        .and_then(|c| c.first_child(SyntaxKind::ArgumentList))
        .expect("thunk should invoke the wrapped service")
        .children()
        .iter()
        .filter_map(|a| a.text())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Recognition
// ============================================================================

#[test]
fn test_file_without_namespace_is_not_an_interface() {
    let unit = parse("use std::fmt;\npub trait IFoo { fn x(&self); }\n").unwrap();
    assert_eq!(extract(&unit), ExtractedInterface::NotAnInterface);
}

#[test]
fn test_namespace_without_interface_is_not_an_interface() {
    let unit = parse("mod models { pub struct Order { pub id: i32 } }\n").unwrap();
    assert!(!extract(&unit).is_interface());
}

#[test]
fn test_methods_and_imports_preserved_in_order() {
    let source = r#"
use a::One;
use b::Two;
use a::One;

mod api {
    pub trait IRepo {
        fn third(&self);
        fn first(&self);
        fn second(&self);
    }
}
"#;
    let definition = extract(&parse(source).unwrap()).into_definition().unwrap();
    let names: Vec<&str> = definition.methods().iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["third", "first", "second"]);
    let imports: Vec<&str> = definition.imports().iter().map(|i| i.as_str()).collect();
    assert_eq!(imports, vec!["use a::One;", "use b::Two;", "use a::One;"]);
}

// ============================================================================
// Synthesis
// ============================================================================

#[test]
fn test_order_service_round_trip() {
    let generated = generate(ORDER_SERVICE);
    assert_eq!(generated.name(), "OrderServiceProxy");

    let class = class_of(&generated);
    let field = class.first_child(SyntaxKind::Field).unwrap();
    assert_eq!(field.text(), Some("_service"));
    assert_eq!(field.first_child(SyntaxKind::Type).and_then(|t| t.text()), Some("IOrderService"));

    let ctor_param = class
        .first_child(SyntaxKind::Constructor)
        .and_then(|c| c.first_child(SyntaxKind::ParameterList))
        .and_then(|p| p.first_child(SyntaxKind::Parameter))
        .unwrap();
    assert_eq!(ctor_param.text(), Some("orderService"));

    let method = class.first_child(SyntaxKind::Method).unwrap();
    assert_eq!(method.text(), Some("get_order"));
    assert!(method.has_modifier(MOD_ASYNC));
    let await_node = method
        .first_child(SyntaxKind::Block)
        .and_then(|b| b.first_child(SyntaxKind::Return))
        .and_then(|r| r.first_child(SyntaxKind::Await))
        .unwrap();
    assert_eq!(await_node.text(), Some(AWAIT_ANY_CONTEXT));
    assert_eq!(forwarded(method), vec!["id"]);
}

#[test]
fn test_forwarding_arity_zero_one_three() {
    let source = r#"
mod api {
    pub trait ICalc {
        fn zero(&self) -> u8;
        fn one(&self, a: i64) -> i64;
        fn three(&self, a: i64, b: String, c: Vec<u8>) -> bool;
    }
}
"#;
    let generated = generate(source);
    let args: Vec<Vec<String>> = class_of(&generated)
        .children_of(SyntaxKind::Method)
        .map(forwarded)
        .collect();
    assert_eq!(args[0], Vec::<String>::new());
    assert_eq!(args[1], vec!["a"]);
    assert_eq!(args[2], vec!["a", "b", "c"]);
}

#[test]
fn test_empty_interface_gets_field_and_constructor() {
    let generated = generate("mod api { pub trait IEmpty {} }\n");
    let class = class_of(&generated);
    assert_eq!(class.children_of(SyntaxKind::Field).count(), 1);
    assert_eq!(class.children_of(SyntaxKind::Constructor).count(), 1);
    assert_eq!(class.children_of(SyntaxKind::Method).count(), 0);
}

#[test]
fn test_generation_is_idempotent() {
    assert_eq!(generate(ORDER_SERVICE), generate(ORDER_SERVICE));
}

#[test]
fn test_class_name_matches_naming_policy() {
    let generated = generate("mod api { pub trait IFooBar { fn go(&self); } }\n");
    assert_eq!(generated.name(), derive_names("IFooBar").unwrap().class_name);
}

// ============================================================================
// Emission
// ============================================================================

#[test]
fn test_emitted_code_parses_and_has_expected_items() {
    let code = emit_unit(&generate(ORDER_SERVICE)).unwrap();
    let file = syn::parse_file(&code).expect("emitted code should be valid Rust");

    let uses = file.items.iter().filter(|i| matches!(i, syn::Item::Use(_))).count();
    assert_eq!(uses, 2);

    let module = file
        .items
        .iter()
        .find_map(|i| match i {
            syn::Item::Mod(m) => Some(m),
            _ => None,
        })
        .expect("emitted code should contain a module");
    assert_eq!(module.ident, "proxy");

    let (_, items) = module.content.as_ref().unwrap();
    let strukt = items
        .iter()
        .find_map(|i| match i {
            syn::Item::Struct(s) => Some(s),
            _ => None,
        })
        .unwrap();
    assert_eq!(strukt.ident, "OrderServiceProxy");

    let trait_impl = items
        .iter()
        .find_map(|i| match i {
            syn::Item::Impl(imp) if imp.trait_.is_some() => Some(imp),
            _ => None,
        })
        .expect("emitted code should implement the interface");
    let (_, trait_path, _) = trait_impl.trait_.as_ref().unwrap();
    let segments: Vec<String> = trait_path.segments.iter().map(|s| s.ident.to_string()).collect();
    // `contracts` is the module the source file declares the trait in
    assert_eq!(segments, vec!["crate", "contracts", "IOrderService"]);
    let method_names: Vec<String> = trait_impl
        .items
        .iter()
        .filter_map(|i| match i {
            syn::ImplItem::Fn(f) => Some(f.sig.ident.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(method_names, vec!["get_order"]);
}

#[test]
fn test_emitted_thunk_clones_every_argument() {
    let source = "mod api { pub trait IStore { fn put(&self, key: String, value: Vec<u8>) -> bool; } }\n";
    let code = emit_unit(&generate(source)).unwrap();
    assert!(code.contains("::core::clone::Clone::clone(&key)"));
    assert!(code.contains("::core::clone::Clone::clone(&value)"));
    assert!(code.contains("move ||"));
}

#[test]
fn test_configured_policy_and_namespace_are_emitted() {
    let config = GeneratorConfig::new()
        .with_namespace("resilient")
        .with_policy_import("use crate::policy::Guard;")
        .with_policy("Guard", "run");
    let proxy = proxy_for_source("clock.rs", "mod api { pub trait IClock { fn now(&self) -> u64; } }\n", &config)
        .unwrap()
        .unwrap();
    assert!(proxy.code.contains("pub mod resilient"));
    assert!(proxy.code.contains("use crate::policy::Guard;"));
    assert!(proxy.code.contains("Guard::run("));
}

#[test]
fn test_emission_is_deterministic() {
    let config = GeneratorConfig::default();
    let first = proxy_for_source("a.rs", ORDER_SERVICE, &config).unwrap();
    let second = proxy_for_source("a.rs", ORDER_SERVICE, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_interface_is_named_by_a_path_that_resolves() {
    let code = emit_unit(&generate(ORDER_SERVICE)).unwrap();
    assert!(code.contains("impl crate::contracts::IOrderService for OrderServiceProxy"));
    assert!(code.contains("dyn crate::contracts::IOrderService + Send + Sync"));
    assert!(!code.contains("dyn IOrderService"));
}

#[test]
fn test_interface_module_prefix_is_configurable() {
    let config = GeneratorConfig::new().with_interface_module("crate::services::orders");
    let proxy = proxy_for_source("orders.rs", ORDER_SERVICE, &config).unwrap().unwrap();
    assert!(proxy
        .code
        .contains("impl crate::services::orders::contracts::IOrderService for OrderServiceProxy"));
}

#[test]
fn test_wildcard_parameter_is_named_and_forwarded() {
    let source = "mod api { pub trait IStore { fn put(&self, _: u32) -> bool; } }";
    let proxy = proxy_for_source("a.rs", source, &GeneratorConfig::default())
        .unwrap()
        .unwrap();
    assert!(proxy.code.contains("arg0: u32"));
    assert!(proxy.code.contains("::core::clone::Clone::clone(&arg0)"));
    syn::parse_file(&proxy.code).expect("emitted code should be valid Rust");
}

#[test]
fn test_method_lifetimes_are_declared_on_the_proxy_method() {
    let source = "mod api { pub trait ICache { fn get<'a>(&'a self, k: &'a str) -> &'a str; } }";
    let proxy = proxy_for_source("cache.rs", source, &GeneratorConfig::default())
        .unwrap()
        .unwrap();
    assert!(proxy.code.contains("async fn get<'a>("));
    syn::parse_file(&proxy.code).expect("emitted code should be valid Rust");
}
