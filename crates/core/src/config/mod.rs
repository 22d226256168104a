//! Configuration management for interceptor-gen

mod settings;

pub use settings::{CONFIG_FILE_NAMES, Config};
pub use crate::types::RequestDefaults;
