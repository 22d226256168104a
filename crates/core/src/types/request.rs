use regex::Regex;
use serde::{Deserialize, Serialize};

use super::plugin::{PluginScope, PluginType};
use crate::error::{Error, Result};

/// PHP namespace separator
pub const NAMESPACE_SEPARATOR: char = '\\';

pub const DEFAULT_SORT_ORDER: u32 = 10;

/// A single interception to generate. Fully determines the generated output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptionRequest {
    pub class_name: String,
    pub method_name: String,
    pub plugin_type: PluginType,
    pub scope: PluginScope,
    pub sort_order: u32,
    pub disabled: bool,
}

impl InterceptionRequest {
    pub fn new(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            plugin_type: PluginType::default(),
            scope: PluginScope::default(),
            sort_order: DEFAULT_SORT_ORDER,
            disabled: false,
        }
    }

    pub fn with_plugin_type(mut self, plugin_type: PluginType) -> Self {
        self.plugin_type = plugin_type;
        self
    }

    pub fn with_scope(mut self, scope: PluginScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_sort_order(mut self, sort_order: u32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// True when the target class lives in a namespace rather than the global scope
    pub fn is_namespaced(&self) -> bool {
        self.class_name.contains(NAMESPACE_SEPARATOR)
    }

    /// Target class with a leading separator, as used in type hints
    pub fn qualified_class_name(&self) -> String {
        format!("{NAMESPACE_SEPARATOR}{}", self.class_name)
    }
}

/// Choices applied to requests that leave them open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RequestDefaults {
    pub plugin_type: PluginType,
    pub scope: PluginScope,
    pub sort_order: u32,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            plugin_type: PluginType::default(),
            scope: PluginScope::default(),
            sort_order: DEFAULT_SORT_ORDER,
        }
    }
}

/// Unvalidated request fields as they arrive from a form or the command line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRequest {
    pub class_name: String,
    pub method_name: String,
    pub plugin_type: Option<String>,
    pub scope: Option<String>,
    pub sort_order: Option<String>,
    pub disabled: bool,
}

impl RawRequest {
    /// Check every field against the accepted input rules and build the
    /// request. Fields left open take their value from `defaults`.
    pub fn validate(&self, defaults: &RequestDefaults) -> Result<InterceptionRequest> {
        let class_name = self.class_name.trim().trim_start_matches(NAMESPACE_SEPARATOR);
        let method_name = self.method_name.trim();

        if !pattern(r"^[\w\\]+$")?.is_match(class_name) {
            return Err(Error::InvalidRequest(format!(
                "class name '{}': only alphanumeric, underscore and backslash characters are allowed",
                self.class_name
            )));
        }

        if !pattern(r"^\w+$")?.is_match(method_name) {
            return Err(Error::InvalidRequest(format!(
                "method name '{}': only alphanumeric and underscore characters are allowed",
                self.method_name
            )));
        }

        let plugin_type = match self.plugin_type.as_deref() {
            Some(value) => value.parse::<PluginType>().map_err(Error::InvalidRequest)?,
            None => defaults.plugin_type,
        };

        let scope = match self.scope.as_deref() {
            Some(value) => value.parse::<PluginScope>().map_err(Error::InvalidRequest)?,
            None => defaults.scope,
        };

        let sort_order = match self.sort_order.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => {
                if !pattern(r"^\d*$")?.is_match(value) {
                    return Err(Error::InvalidRequest(format!(
                        "sort order '{value}': must be numeric"
                    )));
                }
                value.parse::<u32>().map_err(|_| {
                    Error::InvalidRequest(format!(
                        "sort order '{value}': must not exceed {}",
                        u32::MAX
                    ))
                })?
            }
            _ => defaults.sort_order,
        };

        Ok(InterceptionRequest {
            class_name: class_name.to_string(),
            method_name: method_name.to_string(),
            plugin_type,
            scope,
            sort_order,
            disabled: self.disabled,
        })
    }
}

fn pattern(expr: &str) -> Result<Regex> {
    Regex::new(expr).map_err(|e| Error::InvalidRequest(format!("bad pattern {expr}: {e}")))
}
