use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{init_command, plugin_command, signature_command};

#[derive(Parser, Debug)]
#[command(name = "interceptor-gen")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a plugin intercepting a class method
    #[command(visible_alias = "p")]
    Plugin(PluginArgs),
    /// Show the parameters known for a method of a class
    #[command(visible_alias = "s")]
    Signature {
        /// Method name (e.g., getName)
        method: String,

        /// Fully qualified class name (e.g., Magento\Catalog\Model\Product)
        class: String,

        /// Signature table to use instead of the bundled one
        #[arg(long)]
        table: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write an interceptor-gen configuration file
    Init {
        /// Specify the current working directory
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Module in Vendor_Module form
        #[arg(short, long)]
        module: Option<String>,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PluginArgs {
    /// Class to intercept (e.g., Magento\Catalog\Model\Product)
    #[arg(short = 'c', long = "class")]
    pub class_name: String,

    /// Method to intercept (e.g., getName)
    #[arg(short = 'm', long = "method")]
    pub method_name: String,

    /// Plugin type: before, after or around
    #[arg(short = 't', long = "type")]
    pub plugin_type: Option<String>,

    /// Scope: all, frontend, backend, webapi or graphql
    #[arg(short, long)]
    pub scope: Option<String>,

    /// Plugin sort order
    #[arg(long)]
    pub sort_order: Option<String>,

    /// Register the plugin as disabled
    #[arg(long)]
    pub disabled: bool,

    /// Module to generate into, in Vendor_Module form
    #[arg(long)]
    pub module: Option<String>,

    /// Directory the module is written under (defaults to app/code)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Signature table to use instead of the bundled one
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Print the generated files without writing them
    #[arg(short, long)]
    pub dry_run: bool,

    /// Specify the current working directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Plugin(args) => plugin_command(&args),
            Commands::Signature {
                method,
                class,
                table,
                json,
            } => signature_command(&method, &class, table.as_deref(), json),
            Commands::Init { cwd, module, force } => {
                init_command(cwd.as_deref(), module.as_deref(), force)
            }
        }
    }
}
