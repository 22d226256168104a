pub mod plugin;
pub mod request;

pub use plugin::{PluginScope, PluginType};
pub use request::{InterceptionRequest, NAMESPACE_SEPARATOR, RawRequest, RequestDefaults};
