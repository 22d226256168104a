use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Determine the kind of a generated module file for display purposes
pub fn describe_file(path: &Path) -> String {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

    match file_name {
        "registration.php" => "🧩 registration.php".to_string(),
        "module.xml" => "📦 module declaration".to_string(),
        "di.xml" => {
            let area = path
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
                .filter(|n| *n != "etc")
                .unwrap_or("global");
            format!("🔌 plugin wiring ({area})")
        }
        "README.md" => "📝 readme".to_string(),
        _ if file_name.ends_with(".php") => "🐘 plugin class".to_string(),
        _ => "📄 file".to_string(),
    }
}

/// The given working directory, or the process one
pub fn resolve_cwd(cwd: Option<&Path>) -> Result<PathBuf> {
    match cwd {
        Some(cwd) => Ok(cwd.to_path_buf()),
        None => env::current_dir().context("Failed to get current directory"),
    }
}
