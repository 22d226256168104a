//! Builds the interceptor method: name, parameter list and body

pub mod body;
pub mod parameter;

pub use parameter::Parameter;

use serde::Serialize;
use tracing::debug;

use crate::module::{PhpClass, PhpMethod};
use crate::routing::route;
use crate::signature::{ParameterSpec, SignatureLookup};
use crate::types::{InterceptionRequest, PluginType};

/// Where the inferred parameters came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterSource {
    /// Target class is in the global namespace; no lookup was made
    Unqualified,
    Lookup(ParameterSpec),
}

impl ParameterSource {
    /// Consults `lookup` only for namespaced target classes
    pub fn infer<L>(request: &InterceptionRequest, lookup: &L) -> Self
    where
        L: SignatureLookup + ?Sized,
    {
        if !request.is_namespaced() {
            debug!("{} is not namespaced, skipping lookup", request.class_name);
            return ParameterSource::Unqualified;
        }
        ParameterSource::Lookup(lookup.resolve(&request.method_name, &request.class_name))
    }

    fn parameters(&self) -> Vec<Parameter> {
        match self {
            ParameterSource::Unqualified => vec![Parameter::Placeholder],
            ParameterSource::Lookup(ParameterSpec::NoEntry) => Vec::new(),
            ParameterSource::Lookup(ParameterSpec::Variadic) => vec![Parameter::Variadic],
            ParameterSource::Lookup(ParameterSpec::Explicit(params)) => params
                .iter()
                .map(|param| Parameter::Named {
                    name: param.name.clone(),
                    default: param.default.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedInterceptor {
    /// Class path relative to the module namespace
    pub namespace_path: String,
    pub method_name: String,
    pub parameters: Vec<Parameter>,
    /// Arguments passed on to the original method
    pub forwarded: Vec<String>,
    pub body: String,
}

impl GeneratedInterceptor {
    pub fn rendered_parameters(&self) -> Vec<String> {
        self.parameters.iter().map(ToString::to_string).collect()
    }

    pub fn to_php_class(&self) -> PhpClass {
        let mut class = PhpClass::new(self.namespace_path.clone());
        class.add_method(PhpMethod::new(
            self.method_name.clone(),
            self.rendered_parameters(),
            self.body.clone(),
        ));
        class
    }
}

/// `after` + `getName` gives `afterGetName`
pub fn plugin_method_name(plugin_type: PluginType, method_name: &str) -> String {
    let mut chars = method_name.chars();
    match chars.next() {
        Some(first) => format!(
            "{}{}{}",
            plugin_type.as_str(),
            first.to_uppercase(),
            chars.as_str()
        ),
        None => plugin_type.as_str().to_string(),
    }
}

fn mode_parameter(plugin_type: PluginType) -> Option<Parameter> {
    match plugin_type {
        PluginType::Before => None,
        PluginType::After => Some(Parameter::Result),
        PluginType::Around => Some(Parameter::Proceed),
    }
}

/// Infers parameters through `lookup` and synthesizes the interceptor
pub fn synthesize<L>(request: &InterceptionRequest, lookup: &L) -> GeneratedInterceptor
where
    L: SignatureLookup + ?Sized,
{
    synthesize_from(request, &ParameterSource::infer(request, lookup))
}

pub fn synthesize_from(
    request: &InterceptionRequest,
    source: &ParameterSource,
) -> GeneratedInterceptor {
    let inferred = source.parameters();
    let forwarded: Vec<String> = inferred.iter().filter_map(Parameter::forwarded).collect();

    let mut parameters = vec![Parameter::Subject {
        class_name: request.qualified_class_name(),
    }];
    parameters.extend(mode_parameter(request.plugin_type));
    parameters.extend(inferred);

    let interceptor = GeneratedInterceptor {
        namespace_path: route(request.scope).plugin_namespace(&request.class_name),
        method_name: plugin_method_name(request.plugin_type, &request.method_name),
        body: body::render(request.plugin_type, &forwarded),
        parameters,
        forwarded,
    };

    debug!(
        "Synthesized {} with {} parameters",
        interceptor.method_name,
        interceptor.parameters.len()
    );
    interceptor
}
