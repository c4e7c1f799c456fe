//! The recursive field-configuration tree model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One node of the field-configuration tree.
///
/// The identity fields mirror the designer wire shape (`key`, `className`,
/// `type`, `wrappers`, `childArray`). Everything else a node carries is a
/// type-specific attribute, kept opaque in [`extra`](Self::extra): the
/// editor never interprets those values, it only stores and re-emits them.
///
/// `Clone` produces a structurally independent deep copy; every value the
/// editor hands across a boundary (emissions, previews, wrapper clones) goes
/// through it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigNode {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(rename = "type", default)]
    pub type_id: String,
    #[serde(default)]
    pub wrappers: Vec<String>,
    /// Present only for container-like nodes; never fabricated and never
    /// serialized while absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_array: Option<ChildArray>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The nested child collection of a container-like node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildArray {
    #[serde(default)]
    pub children: Vec<ConfigNode>,
}

impl ConfigNode {
    /// Tolerant conversion from an externally pushed value.
    ///
    /// Non-object input degrades to the empty node; non-string identity
    /// fields degrade to `""`; non-string wrapper entries are dropped;
    /// children convert recursively. Unrecognized attributes land in
    /// [`extra`](Self::extra) untouched.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        let mut node = Self {
            key: string_or_empty(map.get("key")),
            class_name: string_or_empty(map.get("className")),
            type_id: string_or_empty(map.get("type")),
            wrappers: map
                .get("wrappers")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
            child_array: map.get("childArray").and_then(ChildArray::from_value),
            extra: Map::new(),
        };
        for (name, attr) in map {
            if !matches!(
                name.as_str(),
                "key" | "className" | "type" | "wrappers" | "childArray"
            ) {
                node.extra.insert(name.clone(), attr.clone());
            }
        }
        node
    }

    /// Serializes the node into the wire shape described by the docs on
    /// [`ConfigNode`]: camelCase identity fields, flattened extras, absent
    /// `childArray` omitted.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// The node's children, or an empty slice while no child collection
    /// exists.
    pub fn children(&self) -> &[ConfigNode] {
        self.child_array
            .as_ref()
            .map(|array| array.children.as_slice())
            .unwrap_or(&[])
    }

    /// Mutable access to the child collection, synthesizing the empty
    /// structure on first use.
    pub fn ensure_children(&mut self) -> &mut Vec<ConfigNode> {
        &mut self.child_array.get_or_insert_with(ChildArray::default).children
    }

    /// Shape copy after a type change: identity fields, wrappers and children
    /// survive, type-specific values do not.
    pub fn reset_for_type(&self) -> Self {
        Self {
            key: self.key.clone(),
            class_name: self.class_name.clone(),
            type_id: self.type_id.clone(),
            wrappers: self.wrappers.clone(),
            child_array: self.child_array.clone(),
            extra: Map::new(),
        }
    }
}

impl ChildArray {
    fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let children = map
            .get("children")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(ConfigNode::from_value).collect())
            .unwrap_or_default();
        Some(Self { children })
    }
}

fn string_or_empty(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}
