//! Module project model: the collector that generated artifacts are handed to

pub mod php;
pub mod project;
pub mod xml;

pub use php::{PhpClass, PhpMethod};
pub use project::{MODULE_XML_PATH, ModuleProject};
pub use xml::ConfigNode;

/// Receives the artifacts produced for one module
pub trait ModuleCollector {
    /// Module name in `Vendor_Module` form
    fn module_name(&self) -> String;

    /// PHP namespace prefix, `Vendor\Module`
    fn namespace(&self) -> String;

    /// Registers a class and returns its fully qualified name
    fn add_class(&mut self, class: PhpClass) -> String;

    fn add_config(&mut self, path: &str, fragment: ConfigNode);

    fn add_readme_line(&mut self, section: &str, line: String);
}
