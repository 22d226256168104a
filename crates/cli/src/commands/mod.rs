pub mod init;
pub mod plugin;
pub mod signature;

pub use init::init_command;
pub use plugin::plugin_command;
pub use signature::signature_command;
