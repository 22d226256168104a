use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{
    error::{Error, Result},
    module::ModuleProject,
    signature::SignatureTable,
    types::RequestDefaults,
};

pub const CONFIG_FILE_NAMES: [&str; 2] = [".interceptor-gen.json", "interceptor-gen.json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Replaces the bundled signature table. Relative paths resolve against
    /// the directory holding the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_table: Option<PathBuf>,

    #[serde(default)]
    pub defaults: RequestDefaults,

    // Where this config was loaded from (internal, not exposed in JSON)
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        config.source = Some(path.to_path_buf());
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Loads the nearest config above `start_path`, or the defaults if none exists
    pub fn discover(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => Self::load_from_file(&path),
            None => {
                debug!("No config found from {:?}, using defaults", start_path);
                Ok(Self::default())
            }
        }
    }

    pub fn signature_table_path(&self) -> Option<PathBuf> {
        let table = self.signature_table.as_ref()?;
        if table.is_absolute() {
            return Some(table.clone());
        }
        let base = self
            .source
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new("."));
        Some(base.join(table))
    }

    pub fn load_signature_table(&self) -> Result<SignatureTable> {
        match self.signature_table_path() {
            Some(path) => SignatureTable::load_from_file(&path),
            None => SignatureTable::bundled(),
        }
    }

    pub fn module_project(&self) -> Result<ModuleProject> {
        match (self.vendor.as_deref(), self.module.as_deref()) {
            (Some(vendor), Some(module)) if !vendor.is_empty() && !module.is_empty() => {
                Ok(ModuleProject::new(vendor, module))
            }
            _ => Err(Error::ConfigError(
                "Both 'vendor' and 'module' must be configured".to_string(),
            )),
        }
    }
}
