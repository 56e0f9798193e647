//! Derive the names of a generated proxy from its interface name.
//!
//! This is the only place names are computed; the synthesizer, the emitter, and the CLI all go through
//! [`derive_names`].

use heck::ToSnakeCase;
use thiserror::Error;

use crate::model::DerivedNames;

/// Name of the private field holding the wrapped service. Identical for every generated type.
pub const FIELD_NAME: &str = "_service";

/// Suffix appended to the stripped interface name.
pub const CLASS_SUFFIX: &str = "Proxy";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// The name needs a marker character plus at least one identifier character.
    #[error("interface name `{name}` is too short to derive a proxy name (need at least 2 characters)")]
    NameTooShort { name: String },
}

/// Derive class, field, and constructor-argument names for `interface_name`.
///
/// The first character is treated as the interface marker (`I` by convention) and dropped:
///
/// ```rust
/// use proxygen::naming::derive_names;
///
/// let names = derive_names("IFooBar").unwrap();
/// assert_eq!(names.class_name, "FooBarProxy");
/// assert_eq!(names.constructor_arg_name, "fooBar");
/// assert_eq!(names.field_name, "_service");
/// ```
///
/// ## Errors
/// Returns [`NamingError::NameTooShort`] for names with fewer than two characters.
pub fn derive_names(interface_name: &str) -> Result<DerivedNames, NamingError> {
    let mut chars = interface_name.chars();
    let stripped = match (chars.next(), chars.as_str()) {
        (Some(_), rest) if !rest.is_empty() => rest,
        _ => {
            return Err(NamingError::NameTooShort {
                name: interface_name.to_string(),
            });
        }
    };

    Ok(DerivedNames {
        interface_name: interface_name.to_string(),
        class_name: format!("{stripped}{CLASS_SUFFIX}"),
        field_name: FIELD_NAME.to_string(),
        constructor_arg_name: lower_first(stripped),
    })
}

/// Lowercase the first character, leaving the rest untouched.
fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// File stem for a generated type, e.g. `OrderServiceProxy` → `order_service_proxy`.
///
/// Acronyms stay together: `HTTPClientProxy` → `http_client_proxy`.
pub fn file_stem(class_name: &str) -> String {
    class_name.to_snake_case()
}
