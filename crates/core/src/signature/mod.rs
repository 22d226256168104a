//! Signature lookup for intercepted methods

pub mod resolver;
pub mod table;

pub use resolver::{ParameterSpec, SignatureLookup, SignatureParam, SignatureResolver};
pub use table::{ParameterMap, SignatureTable};
