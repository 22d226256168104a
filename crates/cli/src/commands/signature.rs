use anyhow::{Context, Result};
use interceptor_gen_core::{Config, SignatureLookup, SignatureResolver};
use std::path::Path;
use tracing::debug;

use crate::display::print_parameter_spec;
use crate::utils::resolve_cwd;

pub fn signature_command(method: &str, class: &str, table: Option<&Path>, json: bool) -> Result<()> {
    let cwd = resolve_cwd(None)?;
    let mut config = Config::discover(&cwd).context("Failed to load configuration")?;
    if let Some(table) = table {
        config.signature_table = Some(cwd.join(table));
    }

    let class = class.trim_start_matches('\\');
    debug!("Resolving {}::{}", class, method);

    let resolver = SignatureResolver::new(
        config
            .load_signature_table()
            .context("Failed to load signature table")?,
    );
    let spec = resolver.resolve(method, class);

    if json {
        println!("{}", serde_json::to_string_pretty(&spec)?);
    } else {
        print_parameter_spec(method, class, &spec);
    }

    Ok(())
}
