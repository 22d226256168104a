use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use super::ModuleCollector;
use super::php::PhpClass;
use super::xml::{ConfigNode, MODULE_SCHEMA};
use crate::error::{Error, Result};
use crate::types::NAMESPACE_SEPARATOR;

pub const MODULE_XML_PATH: &str = "etc/module.xml";

/// In-memory module being generated. Collects classes, configuration
/// fragments and readme lines, and renders them into module files.
#[derive(Debug, Clone)]
pub struct ModuleProject {
    vendor: String,
    name: String,
    classes: IndexMap<String, PhpClass>,
    configs: IndexMap<String, Vec<ConfigNode>>,
    readme: IndexMap<String, Vec<String>>,
}

impl ModuleProject {
    pub fn new(vendor: impl Into<String>, name: impl Into<String>) -> Self {
        let mut project = Self {
            vendor: vendor.into(),
            name: name.into(),
            classes: IndexMap::new(),
            configs: IndexMap::new(),
            readme: IndexMap::new(),
        };

        let module_xml = ConfigNode::config_root(MODULE_SCHEMA)
            .child(ConfigNode::new("module").attr("name", project.module_name()));
        project.add_config(MODULE_XML_PATH, module_xml);
        project
    }

    /// Parses a `Vendor_Module` name
    pub fn from_module_name(module_name: &str) -> Result<Self> {
        match module_name.split_once('_') {
            Some((vendor, name)) if !vendor.is_empty() && !name.is_empty() => {
                Ok(Self::new(vendor, name))
            }
            _ => Err(Error::ConfigError(format!(
                "Module name '{module_name}' must look like Vendor_Module"
            ))),
        }
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classes(&self) -> impl Iterator<Item = &PhpClass> {
        self.classes.values()
    }

    /// Fragments registered for `path`, in registration order
    pub fn config_fragments(&self, path: &str) -> &[ConfigNode] {
        self.configs.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn readme_lines(&self, section: &str) -> &[String] {
        self.readme.get(section).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All fragments for `path` merged into one document tree
    pub fn merged_config(&self, path: &str) -> Option<ConfigNode> {
        let mut fragments = self.configs.get(path)?.iter().cloned();
        let mut merged = fragments.next()?;
        for fragment in fragments {
            merged.merge(fragment);
        }
        Some(merged)
    }

    /// Loads what an earlier run already wrote under `root/Vendor/Module`.
    /// Every `etc/**/*.xml` document becomes the first fragment of its path
    /// and readme lines are restored, so the next write keeps them. Call
    /// before registering new content.
    pub fn load_existing(&mut self, root: &Path) -> Result<()> {
        let module_dir = root.join(&self.vendor).join(&self.name);
        let etc_dir = module_dir.join("etc");
        if etc_dir.is_dir() {
            for entry in WalkDir::new(&etc_dir).sort_by_file_name() {
                let entry = entry.map_err(std::io::Error::from)?;
                let path = entry.path();
                if !entry.file_type().is_file()
                    || path.extension().and_then(|ext| ext.to_str()) != Some("xml")
                {
                    continue;
                }

                let relative = relative_path(&module_dir, path);
                let node = ConfigNode::from_xml_document(&fs::read_to_string(path)?).map_err(
                    |e| Error::ConfigError(format!("Failed to read {}: {e}", path.display())),
                )?;
                debug!("Loaded existing config {}", relative);
                self.configs.entry(relative).or_default().insert(0, node);
            }
        }

        let readme = module_dir.join("README.md");
        if readme.is_file() {
            let mut section = None;
            for line in fs::read_to_string(&readme)?.lines() {
                if let Some(name) = line.strip_prefix(" - ") {
                    section = Some(name.trim().to_string());
                } else if let (Some(name), Some(entry)) = (&section, line.strip_prefix("\t- ")) {
                    self.add_readme_line(name, entry.trim_end().to_string());
                }
            }
        }

        info!("Loaded existing files of module {}", self.module_name());
        Ok(())
    }

    /// Every module file keyed by its path relative to the module root
    pub fn rendered_files(&self) -> Result<BTreeMap<String, String>> {
        let mut files = BTreeMap::new();
        files.insert("registration.php".to_string(), self.render_registration());

        for class in self.classes.values() {
            files.insert(class.file_path(), class.render(&self.namespace()));
        }

        for path in self.configs.keys() {
            if let Some(merged) = self.merged_config(path) {
                files.insert(path.clone(), merged.to_xml_document()?);
            }
        }

        files.insert("README.md".to_string(), self.render_readme());
        Ok(files)
    }

    /// Writes the module under `root/Vendor/Module` and returns the written
    /// paths. Class files that already exist only receive the methods they
    /// do not declare yet.
    pub fn write_to(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let module_dir = root.join(&self.vendor).join(&self.name);
        let mut written = Vec::new();

        for (relative, contents) in self.rendered_files()? {
            let path = module_dir.join(&relative);
            let contents = match self.class_at(&relative) {
                Some(class) if path.is_file() => {
                    match class.merge_into_source(&fs::read_to_string(&path)?) {
                        Some(merged) => merged,
                        None => {
                            debug!("{} already declares every method", path.display());
                            continue;
                        }
                    }
                }
                _ => contents,
            };
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, contents)?;
            debug!("Wrote {}", path.display());
            written.push(path);
        }

        info!(
            "Wrote {} files for module {}",
            written.len(),
            self.module_name()
        );
        Ok(written)
    }

    fn class_at(&self, relative: &str) -> Option<&PhpClass> {
        self.classes.values().find(|class| class.file_path() == relative)
    }

    fn render_registration(&self) -> String {
        format!(
            "<?php\ndeclare(strict_types=1);\n\nuse Magento\\Framework\\Component\\ComponentRegistrar;\n\n\
             ComponentRegistrar::register(ComponentRegistrar::MODULE, '{}', __DIR__);\n",
            self.module_name()
        )
    }

    fn render_readme(&self) -> String {
        let mut out = format!(
            "# Mage2 Module {} {}\n\n    ``{}/module-{}``\n\n## Specifications\n",
            self.vendor,
            self.name,
            self.vendor.to_lowercase(),
            self.name.to_lowercase()
        );
        for (section, lines) in &self.readme {
            out.push_str(&format!("\n - {section}\n"));
            for line in lines {
                out.push_str(&format!("\t- {line}\n"));
            }
        }
        out
    }
}

fn relative_path(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

impl ModuleCollector for ModuleProject {
    fn module_name(&self) -> String {
        format!("{}_{}", self.vendor, self.name)
    }

    fn namespace(&self) -> String {
        format!("{}{NAMESPACE_SEPARATOR}{}", self.vendor, self.name)
    }

    fn add_class(&mut self, class: PhpClass) -> String {
        let qualified = format!(
            "{}{NAMESPACE_SEPARATOR}{}",
            self.namespace(),
            class.namespace_path
        );
        match self.classes.get_mut(&class.namespace_path) {
            Some(existing) => existing.merge(class),
            None => {
                self.classes.insert(class.namespace_path.clone(), class);
            }
        }
        debug!("Registered class {}", qualified);
        qualified
    }

    fn add_config(&mut self, path: &str, fragment: ConfigNode) {
        debug!("Registered config fragment for {}", path);
        self.configs.entry(path.to_string()).or_default().push(fragment);
    }

    fn add_readme_line(&mut self, section: &str, line: String) {
        let lines = self.readme.entry(section.to_string()).or_default();
        if !lines.contains(&line) {
            lines.push(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::php::PhpMethod;
    use tempfile::TempDir;

    #[test]
    fn test_module_name_parsing() {
        let project = ModuleProject::from_module_name("Acme_Catalog").unwrap();
        assert_eq!(project.module_name(), "Acme_Catalog");
        assert_eq!(project.namespace(), "Acme\\Catalog");
        assert!(ModuleProject::from_module_name("Acme").is_err());
        assert!(ModuleProject::from_module_name("_Catalog").is_err());
    }

    #[test]
    fn test_add_class_returns_qualified_name() {
        let mut project = ModuleProject::new("Acme", "Catalog");
        let qualified = project.add_class(PhpClass::new("Plugin\\Magento\\Catalog\\Model\\Product"));
        assert_eq!(qualified, "Acme\\Catalog\\Plugin\\Magento\\Catalog\\Model\\Product");
    }

    #[test]
    fn test_classes_on_same_path_are_merged() {
        let mut project = ModuleProject::new("Acme", "Catalog");
        let mut first = PhpClass::new("Plugin\\Product");
        first.add_method(PhpMethod::new("afterGetName", vec![], "return $result;"));
        let mut second = PhpClass::new("Plugin\\Product");
        second.add_method(PhpMethod::new("beforeSave", vec![], "return [];"));

        project.add_class(first);
        project.add_class(second);

        let classes: Vec<&PhpClass> = project.classes().collect();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].methods.len(), 2);
    }

    #[test]
    fn test_config_fragments_keep_registration_order() {
        let mut project = ModuleProject::new("Acme", "Catalog");
        project.add_config("etc/di.xml", ConfigNode::new("config").attr("n", "1"));
        project.add_config("etc/di.xml", ConfigNode::new("config").attr("n", "2"));

        let fragments = project.config_fragments("etc/di.xml");
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].get_attr("n"), Some("1"));
        assert_eq!(fragments[1].get_attr("n"), Some("2"));
        assert!(project.config_fragments("etc/frontend/di.xml").is_empty());
    }

    #[test]
    fn test_new_project_has_base_module_xml() {
        let project = ModuleProject::new("Acme", "Catalog");
        let module_xml = project.merged_config(MODULE_XML_PATH).unwrap();
        assert_eq!(
            module_xml.find("module").and_then(|m| m.get_attr("name")),
            Some("Acme_Catalog")
        );
    }

    #[test]
    fn test_write_to_creates_module_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut project = ModuleProject::new("Acme", "Catalog");
        project.add_class(PhpClass::new("Plugin\\Product"));
        project.add_readme_line("Plugin", "afterGetName - Product > Acme\\Catalog\\Plugin\\Product".to_string());

        let written = project.write_to(temp_dir.path()).unwrap();
        let module_dir = temp_dir.path().join("Acme").join("Catalog");

        assert!(written.contains(&module_dir.join("registration.php")));
        assert!(module_dir.join("Plugin/Product.php").exists());
        assert!(module_dir.join("etc/module.xml").exists());

        let readme = fs::read_to_string(module_dir.join("README.md")).unwrap();
        assert!(readme.contains(" - Plugin\n\t- afterGetName - Product > Acme\\Catalog\\Plugin\\Product"));
    }

    fn di_fragment(class: &str, plugin: &str) -> ConfigNode {
        ConfigNode::config_root(crate::module::xml::OBJECT_MANAGER_SCHEMA).child(
            ConfigNode::new("type")
                .attr("name", class)
                .child(ConfigNode::new("plugin").attr("name", plugin)),
        )
    }

    #[test]
    fn test_load_existing_keeps_earlier_output() {
        let temp_dir = TempDir::new().unwrap();

        let mut first = ModuleProject::new("Acme", "Catalog");
        first.add_config("etc/di.xml", di_fragment("Magento\\Catalog\\Model\\Product", "first"));
        first.add_config(
            MODULE_XML_PATH,
            ConfigNode::config_root(MODULE_SCHEMA).child(
                ConfigNode::new("module")
                    .attr("name", "Acme_Catalog")
                    .child(ConfigNode::new("sequence").child(ConfigNode::new("module").attr("name", "Magento_Catalog"))),
            ),
        );
        first.add_readme_line("Plugin", "afterGetName - Product".to_string());
        first.write_to(temp_dir.path()).unwrap();

        let mut second = ModuleProject::new("Acme", "Catalog");
        second.load_existing(temp_dir.path()).unwrap();
        second.add_config("etc/di.xml", di_fragment("Magento\\Sales\\Model\\Order", "second"));
        second.add_readme_line("Plugin", "afterGetName - Product".to_string());
        second.add_readme_line("Plugin", "afterPlace - Order".to_string());
        second.write_to(temp_dir.path()).unwrap();

        let module_dir = temp_dir.path().join("Acme").join("Catalog");
        let di = fs::read_to_string(module_dir.join("etc/di.xml")).unwrap();
        assert!(di.contains("<type name=\"Magento\\Catalog\\Model\\Product\">"));
        assert!(di.contains("<type name=\"Magento\\Sales\\Model\\Order\">"));

        let module_xml = fs::read_to_string(module_dir.join(MODULE_XML_PATH)).unwrap();
        assert!(module_xml.contains("<module name=\"Magento_Catalog\"/>"));
        assert_eq!(module_xml.matches("<module name=\"Acme_Catalog\"").count(), 1);

        assert_eq!(
            second.readme_lines("Plugin").to_vec(),
            vec!["afterGetName - Product".to_string(), "afterPlace - Order".to_string()]
        );
    }

    #[test]
    fn test_write_to_keeps_edited_class() {
        let temp_dir = TempDir::new().unwrap();
        let class_file = temp_dir.path().join("Acme/Catalog/Plugin/Product.php");

        let mut first = ModuleProject::new("Acme", "Catalog");
        let mut class = PhpClass::new("Plugin\\Product");
        class.add_method(PhpMethod::new("afterGetName", vec!["$result".to_string()], "return $result;"));
        first.add_class(class);
        first.write_to(temp_dir.path()).unwrap();

        let edited = fs::read_to_string(&class_file)
            .unwrap()
            .replace("return $result;", "return ucfirst($result);");
        fs::write(&class_file, &edited).unwrap();

        let mut second = ModuleProject::new("Acme", "Catalog");
        let mut class = PhpClass::new("Plugin\\Product");
        class.add_method(PhpMethod::new("afterGetName", vec!["$result".to_string()], "return $result;"));
        second.add_class(class.clone());
        second.write_to(temp_dir.path()).unwrap();
        assert_eq!(fs::read_to_string(&class_file).unwrap(), edited);

        class.add_method(PhpMethod::new("beforeSave", vec![], "return [];"));
        second.add_class(class);
        second.write_to(temp_dir.path()).unwrap();
        let merged = fs::read_to_string(&class_file).unwrap();
        assert!(merged.contains("return ucfirst($result);"));
        assert!(merged.contains("public function beforeSave()"));
    }

    #[test]
    fn test_load_existing_without_module_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut project = ModuleProject::new("Acme", "Catalog");
        project.load_existing(temp_dir.path()).unwrap();
        assert_eq!(project.config_fragments(MODULE_XML_PATH).len(), 1);
    }
}
