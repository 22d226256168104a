pub mod file;

pub use file::{describe_file, resolve_cwd};
