//! interceptor-gen - Generate Magento 2 interceptor plugins
//!
//! This crate provides functionality to:
//! - Infer the parameters of an interceptor from a static table of method signatures
//! - Synthesize before, after and around plugin methods
//! - Route plugins to the configuration files of their scope and build the wiring
//! - Collect and render the resulting module files
pub mod assemble;
pub mod config;
pub mod error;
pub mod generator;
pub mod interceptor;
pub mod module;
pub mod routing;
pub mod signature;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use config::Config;
pub use generator::{GeneratedPlugin, PluginGenerator};
pub use interceptor::{GeneratedInterceptor, Parameter};
pub use module::{ConfigNode, ModuleCollector, ModuleProject};
pub use signature::{ParameterSpec, SignatureLookup, SignatureResolver, SignatureTable};
