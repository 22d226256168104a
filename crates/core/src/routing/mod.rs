//! Maps a plugin scope to its configuration files and class folder

use serde::Serialize;

use crate::types::{NAMESPACE_SEPARATOR, PluginScope};

/// Root namespace segment for every generated plugin class
pub const PLUGIN_ROOT: &str = "Plugin";

/// Where the wiring for one scope is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScopeRoute {
    pub primary: &'static str,
    /// REST and SOAP read separate files, so web API wiring is written twice
    pub secondary: Option<&'static str>,
    /// Folder inserted under `Plugin` for the generated class
    pub folder: Option<&'static str>,
}

pub const fn route(scope: PluginScope) -> ScopeRoute {
    match scope {
        PluginScope::All => ScopeRoute {
            primary: "etc/di.xml",
            secondary: None,
            folder: None,
        },
        PluginScope::Frontend => ScopeRoute {
            primary: "etc/frontend/di.xml",
            secondary: None,
            folder: Some("frontend"),
        },
        PluginScope::Backend => ScopeRoute {
            primary: "etc/adminhtml/di.xml",
            secondary: None,
            folder: Some("backend"),
        },
        PluginScope::WebApi => ScopeRoute {
            primary: "etc/webapi_rest/di.xml",
            secondary: Some("etc/webapi_soap/di.xml"),
            folder: Some("webapi"),
        },
        PluginScope::GraphQl => ScopeRoute {
            primary: "etc/graphql/di.xml",
            secondary: None,
            folder: Some("graphql"),
        },
    }
}

impl ScopeRoute {
    /// Primary path followed by the secondary one, if any
    pub fn paths(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.primary).chain(self.secondary)
    }

    /// Namespace path of the plugin class, relative to the module namespace
    pub fn plugin_namespace(&self, class_name: &str) -> String {
        let mut segments = vec![PLUGIN_ROOT];
        segments.extend(self.folder);
        segments.push(class_name);
        segments.join(&NAMESPACE_SEPARATOR.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scope_has_one_primary_path() {
        for scope in PluginScope::ALL {
            let route = route(scope);
            assert!(route.primary.starts_with("etc/"));
            assert!(route.primary.ends_with("/di.xml"));
            assert_eq!(route.secondary.is_some(), scope == PluginScope::WebApi);
        }
    }

    #[test]
    fn test_paths_per_scope() {
        assert_eq!(route(PluginScope::All).primary, "etc/di.xml");
        assert_eq!(route(PluginScope::Frontend).primary, "etc/frontend/di.xml");
        assert_eq!(route(PluginScope::Backend).primary, "etc/adminhtml/di.xml");
        assert_eq!(route(PluginScope::GraphQl).primary, "etc/graphql/di.xml");

        let webapi: Vec<&str> = route(PluginScope::WebApi).paths().collect();
        assert_eq!(webapi, vec!["etc/webapi_rest/di.xml", "etc/webapi_soap/di.xml"]);
    }

    #[test]
    fn test_plugin_namespace() {
        let class = "Magento\\Catalog\\Model\\Product";
        assert_eq!(
            route(PluginScope::All).plugin_namespace(class),
            "Plugin\\Magento\\Catalog\\Model\\Product"
        );
        assert_eq!(
            route(PluginScope::Frontend).plugin_namespace(class),
            "Plugin\\frontend\\Magento\\Catalog\\Model\\Product"
        );
        assert_eq!(
            route(PluginScope::Backend).plugin_namespace("SomeGlobalClass"),
            "Plugin\\backend\\SomeGlobalClass"
        );
    }
}
