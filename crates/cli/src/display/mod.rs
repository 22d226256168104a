pub mod summary;

pub use summary::{print_parameter_spec, print_plugin_summary};
