//! Generator configuration.
//!
//! Holds the names the generated code refers to but the interface does not provide: the namespace proxies live in and
//! the resilience policy that wraps every forwarded call.

/// Module the generated proxies are placed in.
pub const DEFAULT_NAMESPACE: &str = "proxy";

/// Module path the source file's modules are reachable from in the consuming crate.
pub const DEFAULT_INTERFACE_MODULE: &str = "crate";

/// Import that brings the resilience policy into scope.
pub const DEFAULT_POLICY_IMPORT: &str = "use crate::wrappers::ServicePolicy;";

/// Type exposing the resilience operation.
pub const DEFAULT_POLICY_TYPE: &str = "ServicePolicy";

/// Resilience operation applied to every forwarded call.
pub const DEFAULT_POLICY_METHOD: &str = "execute_with_timeout_and_retry";

/// Configuration for [`crate::synth::Synthesizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Module that wraps the generated type
    pub namespace: String,
    /// Path prefix under which the interface's own module resolves (`crate` → `crate::contracts::IFoo`)
    pub interface_module: String,
    /// `use` item added after the interface's own imports
    pub policy_import: String,
    /// Type that owns the resilience operation
    pub policy_type: String,
    /// Name of the resilience operation
    pub policy_method: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            interface_module: DEFAULT_INTERFACE_MODULE.to_string(),
            policy_import: DEFAULT_POLICY_IMPORT.to_string(),
            policy_type: DEFAULT_POLICY_TYPE.to_string(),
            policy_method: DEFAULT_POLICY_METHOD.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace generated proxies are placed in
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the path prefix the interface's module resolves under
    pub fn with_interface_module(mut self, module: impl Into<String>) -> Self {
        self.interface_module = module.into();
        self
    }

    /// Path the generated code uses to name `interface_name`, declared in module `namespace`.
    pub fn interface_path(&self, namespace: Option<&str>, interface_name: &str) -> String {
        [self.interface_module.as_str(), namespace.unwrap_or_default(), interface_name]
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("::")
    }

    /// Set the import that resolves the policy type
    pub fn with_policy_import(mut self, import: impl Into<String>) -> Self {
        self.policy_import = import.into();
        self
    }

    /// Set the policy type and operation names
    pub fn with_policy(mut self, policy_type: impl Into<String>, policy_method: impl Into<String>) -> Self {
        self.policy_type = policy_type.into();
        self.policy_method = policy_method.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.namespace, "proxy");
        assert_eq!(config.interface_module, "crate");
        assert_eq!(config.policy_import, "use crate::wrappers::ServicePolicy;");
        assert_eq!(config.policy_type, "ServicePolicy");
        assert_eq!(config.policy_method, "execute_with_timeout_and_retry");
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(GeneratorConfig::new(), GeneratorConfig::default());
    }

    #[test]
    fn test_builder_chain() {
        let config = GeneratorConfig::new()
            .with_namespace("resilient")
            .with_policy_import("use policies::Retry;")
            .with_policy("Retry", "run");
        assert_eq!(config.namespace, "resilient");
        assert_eq!(config.policy_import, "use policies::Retry;");
        assert_eq!(config.policy_type, "Retry");
        assert_eq!(config.policy_method, "run");
    }

    #[test]
    fn test_interface_path() {
        let config = GeneratorConfig::default();
        assert_eq!(config.interface_path(Some("contracts"), "IFoo"), "crate::contracts::IFoo");
        assert_eq!(config.interface_path(None, "IFoo"), "crate::IFoo");

        let config = GeneratorConfig::new().with_interface_module("crate::services::orders");
        assert_eq!(
            config.interface_path(Some("contracts"), "IFoo"),
            "crate::services::orders::contracts::IFoo"
        );

        let config = GeneratorConfig::new().with_interface_module("");
        assert_eq!(config.interface_path(Some("contracts"), "IFoo"), "contracts::IFoo");
    }

    #[test]
    fn test_builder_override() {
        let config = GeneratorConfig::new().with_namespace("a").with_namespace("b");
        assert_eq!(config.namespace, "b"); // Last value wins
    }
}
