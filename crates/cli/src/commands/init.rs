use anyhow::{Context, Result};
use interceptor_gen_core::{Config, ModuleProject, config::CONFIG_FILE_NAMES};
use std::path::Path;
use tracing::info;

use crate::utils::resolve_cwd;

pub fn init_command(cwd: Option<&Path>, module: Option<&str>, force: bool) -> Result<()> {
    let project_root = resolve_cwd(cwd)?;
    let config_path = project_root.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    let mut config = Config::default();
    if let Some(module) = module {
        let project = ModuleProject::from_module_name(module)?;
        config.vendor = Some(project.vendor().to_string());
        config.module = Some(project.name().to_string());
    }

    config
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    info!("Created config: {}", config_path.display());

    println!("✅ Created config: {}", config_path.display());
    if module.is_none() {
        println!("\n📌 Set 'vendor' and 'module' to the module plugins are generated into");
    }

    Ok(())
}
