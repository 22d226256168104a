//! Builds the configuration fragments that wire a plugin into the target class

use serde::Serialize;

use crate::module::xml::{MODULE_SCHEMA, OBJECT_MANAGER_SCHEMA};
use crate::module::{ConfigNode, MODULE_XML_PATH};
use crate::routing::route;
use crate::types::{InterceptionRequest, NAMESPACE_SEPARATOR};

/// Joins namespace segments into identifiers safe for module and plugin names
pub const MODULE_JOINER: &str = "_";

/// A fragment paired with the file it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedFragment {
    pub path: &'static str,
    pub node: ConfigNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledConfig {
    pub primary: PlacedFragment,
    pub secondary: Option<PlacedFragment>,
    pub module_dependency: Option<PlacedFragment>,
}

impl AssembledConfig {
    /// Every fragment in registration order: the secondary copy, the module
    /// dependency, then the primary wiring
    pub fn fragments(&self) -> impl Iterator<Item = &PlacedFragment> {
        self.secondary
            .iter()
            .chain(self.module_dependency.iter())
            .chain(std::iter::once(&self.primary))
    }
}

/// Module that owns `class_name`, as `Vendor_Module`. Global classes have none.
pub fn owning_module(class_name: &str) -> Option<String> {
    let mut segments = class_name.split(NAMESPACE_SEPARATOR);
    let vendor = segments.next()?;
    let module = segments.next()?;
    Some(format!("{vendor}{MODULE_JOINER}{module}"))
}

/// `type` wiring for the plugin class `plugin_class` (fully qualified)
pub fn type_fragment(request: &InterceptionRequest, plugin_class: &str) -> ConfigNode {
    ConfigNode::config_root(OBJECT_MANAGER_SCHEMA).child(
        ConfigNode::new("type")
            .attr("name", request.class_name.as_str())
            .child(
                ConfigNode::new("plugin")
                    .attr(
                        "name",
                        plugin_class.replace(NAMESPACE_SEPARATOR, MODULE_JOINER),
                    )
                    .attr("type", plugin_class)
                    .attr("sortOrder", request.sort_order.to_string())
                    .attr("disabled", if request.disabled { "true" } else { "false" }),
            ),
    )
}

/// Load-order dependency of `module_name` on the module owning the target class
pub fn module_dependency_fragment(
    request: &InterceptionRequest,
    module_name: &str,
) -> Option<ConfigNode> {
    if !request.is_namespaced() {
        return None;
    }
    let dependency = owning_module(&request.class_name)?;

    Some(
        ConfigNode::config_root(MODULE_SCHEMA).child(
            ConfigNode::new("module").attr("name", module_name).child(
                ConfigNode::new("sequence")
                    .child(ConfigNode::new("module").attr("name", dependency)),
            ),
        ),
    )
}

pub fn assemble(
    request: &InterceptionRequest,
    plugin_class: &str,
    module_name: &str,
) -> AssembledConfig {
    let route = route(request.scope);
    let wiring = type_fragment(request, plugin_class);

    AssembledConfig {
        secondary: route.secondary.map(|path| PlacedFragment {
            path,
            node: wiring.clone(),
        }),
        primary: PlacedFragment {
            path: route.primary,
            node: wiring,
        },
        module_dependency: module_dependency_fragment(request, module_name).map(|node| {
            PlacedFragment {
                path: MODULE_XML_PATH,
                node,
            }
        }),
    }
}
