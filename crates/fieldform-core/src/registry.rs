//! Type and wrapper registries driving the dynamic edit surface.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::validate::is_non_blank;

/// Descriptor of one editable sub-field contributed by a node type.
///
/// Descriptors are opaque to the synchronization engine; the rendering
/// surface interprets them. `name` is the attribute of the edited node the
/// field reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub default: Value,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            default: Value::Null,
        }
    }

    pub fn labeled(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new(name)
        }
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = value;
        self
    }
}

/// Per-type metadata looked up alongside the field list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeMeta {
    pub is_container: bool,
}

/// The capability the editor engine depends on: a pure lookup from a type
/// identifier to that type's editable sub-fields and metadata.
pub trait TypeRegistry {
    /// Ordered editable sub-fields for `type_id`. Unknown types yield an
    /// empty list.
    fn type_fields(&self, type_id: &str) -> Vec<FieldDescriptor>;

    /// Metadata for `type_id`. Unknown types are plain non-containers.
    fn type_meta(&self, type_id: &str) -> TypeMeta;
}

/// A registered node type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeDefinition {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
    pub container: bool,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            container: false,
        }
    }

    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// Marks instances of this type as able to hold child nodes.
    pub fn container(mut self) -> Self {
        self.container = true;
        self
    }
}

/// A registered presentational wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapperDefinition {
    pub name: String,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("type identifier must contain a non-whitespace character")]
    BlankTypeId,
    #[error("wrapper identifier must contain a non-whitespace character")]
    BlankWrapperId,
}

/// In-memory [`TypeRegistry`]: registration order is presentation order.
#[derive(Debug, Clone, Default)]
pub struct DesignerConfig {
    types: IndexMap<String, TypeDefinition>,
    wrappers: IndexMap<String, WrapperDefinition>,
}

impl DesignerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type definition; a later registration under the same name
    /// replaces the earlier one.
    pub fn with_type(mut self, definition: TypeDefinition) -> Result<Self, RegistryError> {
        if !is_non_blank(&definition.name) {
            return Err(RegistryError::BlankTypeId);
        }
        self.types.insert(definition.name.clone(), definition);
        Ok(self)
    }

    pub fn with_wrapper(mut self, name: impl Into<String>) -> Result<Self, RegistryError> {
        let name = name.into();
        if !is_non_blank(&name) {
            return Err(RegistryError::BlankWrapperId);
        }
        self.wrappers
            .insert(name.clone(), WrapperDefinition { name });
        Ok(self)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Choices offered by the wrapper-selection control, in registration
    /// order.
    pub fn wrapper_names(&self) -> impl Iterator<Item = &str> {
        self.wrappers.keys().map(String::as_str)
    }
}

impl TypeRegistry for DesignerConfig {
    fn type_fields(&self, type_id: &str) -> Vec<FieldDescriptor> {
        self.types
            .get(type_id)
            .map(|definition| definition.fields.clone())
            .unwrap_or_default()
    }

    fn type_meta(&self, type_id: &str) -> TypeMeta {
        TypeMeta {
            is_container: self
                .types
                .get(type_id)
                .is_some_and(|definition| definition.container),
        }
    }
}
