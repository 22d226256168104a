//! Orchestrates one plugin generation: resolve, synthesize, route, assemble, register

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    assemble::{AssembledConfig, assemble},
    config::Config,
    error::Result,
    interceptor::{GeneratedInterceptor, synthesize},
    module::ModuleCollector,
    signature::{SignatureResolver, SignatureTable},
    types::InterceptionRequest,
};

/// Readme section generated plugins are listed under
pub const README_SECTION: &str = "Plugin";

/// Everything produced for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPlugin {
    pub interceptor: GeneratedInterceptor,
    /// Fully qualified plugin class name
    pub plugin_class: String,
    pub config: AssembledConfig,
    pub readme_line: String,
}

pub struct PluginGenerator {
    resolver: SignatureResolver,
}

impl PluginGenerator {
    pub fn new(table: SignatureTable) -> Self {
        Self {
            resolver: SignatureResolver::new(table),
        }
    }

    /// Uses the signature table shipped with the crate
    pub fn with_bundled_table() -> Result<Self> {
        Ok(Self::new(SignatureTable::bundled()?))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.load_signature_table()?))
    }

    pub fn resolver(&self) -> &SignatureResolver {
        &self.resolver
    }

    /// Generates the plugin for `request` and hands its class, configuration
    /// fragments and readme line to `collector`
    pub fn add<C>(&self, request: &InterceptionRequest, collector: &mut C) -> GeneratedPlugin
    where
        C: ModuleCollector + ?Sized,
    {
        debug!(
            "Generating {} plugin for {}::{} ({})",
            request.plugin_type, request.class_name, request.method_name, request.scope
        );

        let interceptor = synthesize(request, &self.resolver);
        let plugin_class = collector.add_class(interceptor.to_php_class());

        let config = assemble(request, &plugin_class, &collector.module_name());
        for fragment in config.fragments() {
            collector.add_config(fragment.path, fragment.node.clone());
        }

        let readme_line = format!(
            "{} - {} > {}",
            interceptor.method_name, request.class_name, plugin_class
        );
        collector.add_readme_line(README_SECTION, readme_line.clone());

        info!("Generated {} in {}", interceptor.method_name, plugin_class);
        GeneratedPlugin {
            interceptor,
            plugin_class,
            config,
            readme_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleProject;
    use crate::types::{PluginScope, PluginType};

    fn generator() -> PluginGenerator {
        PluginGenerator::new(
            SignatureTable::from_json(
                r#"{"getName": {"Magento\\Catalog\\Model\\ResourceModel\\Product": {"sku": ""}}}"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_add_registers_all_artifacts() {
        let mut project = ModuleProject::new("Acme", "Catalog");
        let request = InterceptionRequest::new("Magento\\Catalog\\Model\\Product", "getName");
        let plugin = generator().add(&request, &mut project);

        assert_eq!(
            plugin.plugin_class,
            "Acme\\Catalog\\Plugin\\Magento\\Catalog\\Model\\Product"
        );
        assert_eq!(project.config_fragments("etc/di.xml").len(), 1);
        assert_eq!(project.config_fragments("etc/module.xml").len(), 2);
        assert_eq!(
            project.readme_lines(README_SECTION).to_vec(),
            vec![format!(
                "afterGetName - Magento\\Catalog\\Model\\Product > {}",
                plugin.plugin_class
            )]
        );
    }

    #[test]
    fn test_add_is_repeatable() {
        let request = InterceptionRequest::new("Magento\\Catalog\\Model\\Product", "getName")
            .with_plugin_type(PluginType::Around)
            .with_scope(PluginScope::WebApi);
        let generator = generator();

        let mut first = ModuleProject::new("Acme", "Catalog");
        let mut second = ModuleProject::new("Acme", "Catalog");
        assert_eq!(
            generator.add(&request, &mut first),
            generator.add(&request, &mut second)
        );
        assert_eq!(first.rendered_files().unwrap(), second.rendered_files().unwrap());
    }

    #[test]
    fn test_bundled_generator_loads() {
        let generator = PluginGenerator::with_bundled_table().unwrap();
        assert!(generator.resolver().table().method_count() > 0);
    }
}
