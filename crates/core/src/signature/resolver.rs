use serde::Serialize;
use tracing::debug;

use super::table::SignatureTable;

/// One statically known parameter of an intercepted method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureParam {
    pub name: String,
    pub default: Option<String>,
}

/// Outcome of a signature lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum ParameterSpec {
    /// The method/class pair is not in the table
    NoEntry,
    /// The pair is known but its argument names are not
    Variadic,
    /// The pair is known with these parameters, in declaration order
    Explicit(Vec<SignatureParam>),
}

/// Source of method signatures for parameter inference
pub trait SignatureLookup {
    fn resolve(&self, method_name: &str, class_name: &str) -> ParameterSpec;
}

/// Looks up method signatures in a loaded table
#[derive(Debug, Clone)]
pub struct SignatureResolver {
    table: SignatureTable,
}

impl SignatureResolver {
    pub fn new(table: SignatureTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SignatureTable {
        &self.table
    }
}

impl SignatureLookup for SignatureResolver {
    fn resolve(&self, method_name: &str, class_name: &str) -> ParameterSpec {
        let Some(params) = self.table.get(method_name, class_name) else {
            debug!("No signature for {}::{}", class_name, method_name);
            return ParameterSpec::NoEntry;
        };

        if params.is_empty() {
            debug!("Variadic signature for {}::{}", class_name, method_name);
            return ParameterSpec::Variadic;
        }

        debug!(
            "Found {} parameters for {}::{}",
            params.len(),
            class_name,
            method_name
        );
        ParameterSpec::Explicit(
            params
                .iter()
                .map(|(name, default)| SignatureParam {
                    name: name.clone(),
                    default: (!default.is_empty()).then(|| default.clone()),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> SignatureResolver {
        let table = SignatureTable::from_json(
            r#"{
                "getName": {"Magento\\Catalog\\Model\\Product": {"sku": ""}},
                "getPrice": {"Magento\\Catalog\\Model\\Product": []},
                "get": {"Vendor\\Repo": {"sku": "", "editMode": "false", "storeId": "null"}}
            }"#,
        )
        .unwrap();
        SignatureResolver::new(table)
    }

    #[test]
    fn test_missing_method_or_class_is_no_entry() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve("getSku", "Magento\\Catalog\\Model\\Product"),
            ParameterSpec::NoEntry
        );
        assert_eq!(
            resolver.resolve("getName", "Magento\\Catalog\\Model\\Category"),
            ParameterSpec::NoEntry
        );
    }

    #[test]
    fn test_empty_mapping_is_variadic() {
        assert_eq!(
            resolver().resolve("getPrice", "Magento\\Catalog\\Model\\Product"),
            ParameterSpec::Variadic
        );
    }

    #[test]
    fn test_explicit_parameters_keep_order_and_defaults() {
        let spec = resolver().resolve("get", "Vendor\\Repo");
        let ParameterSpec::Explicit(params) = spec else {
            panic!("expected explicit parameters");
        };
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["sku", "editMode", "storeId"]);
        assert_eq!(params[0].default, None);
        assert_eq!(params[1].default.as_deref(), Some("false"));
        assert_eq!(params[2].default.as_deref(), Some("null"));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let resolver = resolver();
        let first = resolver.resolve("get", "Vendor\\Repo");
        let second = resolver.resolve("get", "Vendor\\Repo");
        assert_eq!(first, second);
    }
}
