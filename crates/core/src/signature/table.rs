//! Static lookup table of known method signatures
//!
//! The table maps a method name to the classes declaring it, and each class to
//! its ordered parameters with their default-value expressions. An empty
//! default means the parameter has none. A class mapped to no parameters at all
//! takes arguments whose names are not known statically.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

const BUNDLED_TABLE: &str = include_str!("../../resources/method_signatures.json");

/// Parameter name to default-value expression, in declaration order
pub type ParameterMap = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureTable {
    methods: IndexMap<String, IndexMap<String, ParameterMap>>,
}

/// Entries may be written either as an object of defaults or as a list
#[derive(Deserialize)]
#[serde(untagged)]
enum RawParameters {
    Named(IndexMap<String, Value>),
    Listed(Vec<String>),
}

impl RawParameters {
    fn into_parameter_map(self) -> ParameterMap {
        match self {
            RawParameters::Named(map) => map
                .into_iter()
                .map(|(name, default)| (name, default_expression(default)))
                .collect(),
            RawParameters::Listed(names) => {
                names.into_iter().map(|name| (name, String::new())).collect()
            }
        }
    }
}

fn default_expression(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl SignatureTable {
    /// Parse the table shipped with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_TABLE)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        debug!("Loading signature table from {:?}", path);
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::SignatureTableError(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let raw: IndexMap<String, IndexMap<String, RawParameters>> =
            serde_json::from_str(contents).map_err(|e| {
                Error::SignatureTableError(format!("Failed to parse signature table: {e}"))
            })?;

        let methods: IndexMap<_, _> = raw
            .into_iter()
            .map(|(method, classes)| {
                let classes = classes
                    .into_iter()
                    .map(|(class, params)| (class, params.into_parameter_map()))
                    .collect();
                (method, classes)
            })
            .collect();

        debug!("Loaded signatures for {} methods", methods.len());
        Ok(Self { methods })
    }

    /// Parameters recorded for `method` on `class`, if the pair is present
    pub fn get(&self, method: &str, class: &str) -> Option<&ParameterMap> {
        self.methods.get(method)?.get(class)
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn classes_for(&self, method: &str) -> impl Iterator<Item = &str> {
        self.methods
            .get(method)
            .into_iter()
            .flat_map(|classes| classes.keys().map(String::as_str))
    }
}
