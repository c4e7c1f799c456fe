//! Core primitives for fieldform.

pub mod node;
pub mod registry;
pub mod validate;

pub use node::{ChildArray, ConfigNode};
pub use registry::{
    DesignerConfig, FieldDescriptor, RegistryError, TypeDefinition, TypeMeta, TypeRegistry,
    WrapperDefinition,
};
pub use validate::is_non_blank;

/// Returns the crate version at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
