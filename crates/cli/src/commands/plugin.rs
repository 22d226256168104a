use anyhow::{Context, Result};
use interceptor_gen_core::{
    Config, ModuleCollector, ModuleProject, PluginGenerator, RawRequest,
};
use std::path::Path;
use tracing::{debug, info};

use crate::cli::PluginArgs;
use crate::display::print_plugin_summary;
use crate::utils::{describe_file, resolve_cwd};

pub fn plugin_command(args: &PluginArgs) -> Result<()> {
    let cwd = resolve_cwd(args.cwd.as_deref())?;
    let mut config = Config::discover(&cwd).context("Failed to load configuration")?;
    if let Some(table) = &args.table {
        config.signature_table = Some(cwd.join(table));
    }

    let raw = RawRequest {
        class_name: args.class_name.clone(),
        method_name: args.method_name.clone(),
        plugin_type: args.plugin_type.clone(),
        scope: args.scope.clone(),
        sort_order: args.sort_order.clone(),
        disabled: args.disabled,
    };
    let request = raw.validate(&config.defaults)?;
    debug!("Validated request: {:?}", request);

    let mut project = match &args.module {
        Some(module) => ModuleProject::from_module_name(module)?,
        None => config
            .module_project()
            .context("No module given; pass --module Vendor_Module or run init")?,
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| cwd.join("app").join("code"));
    project
        .load_existing(&output)
        .with_context(|| format!("Failed to read existing module under {}", output.display()))?;

    let generator =
        PluginGenerator::from_config(&config).context("Failed to load signature table")?;
    let plugin = generator.add(&request, &mut project);
    print_plugin_summary(&plugin);

    if args.dry_run {
        for (path, contents) in project.rendered_files()? {
            println!("\n===== {} ({}) =====", path, describe_file(Path::new(&path)));
            print!("{contents}");
        }
        return Ok(());
    }

    let written = project
        .write_to(&output)
        .with_context(|| format!("Failed to write module to {}", output.display()))?;

    println!("\n✅ Wrote {} files for {}:", written.len(), project.module_name());
    for path in &written {
        println!("   • {} {}", describe_file(path), path.display());
    }
    info!("Generation finished for {}", project.module_name());

    Ok(())
}
