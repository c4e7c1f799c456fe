//! The static outer and type-driven dynamic edit surfaces.

use fieldform_core::{is_non_blank, ConfigNode, FieldDescriptor};

/// The fixed controls present for every node: `key`, `className` and `type`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OuterSurface {
    pub key: String,
    pub class_name: String,
    pub type_id: String,
    disabled: bool,
}

impl OuterSurface {
    /// Required-field validity of the surface: `key` and `type` must contain
    /// a non-whitespace character. Never blocks data flow.
    pub fn invalid(&self) -> bool {
        !is_non_blank(&self.key) || !is_non_blank(&self.type_id)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Copies the surface values into `node`'s identity fields.
    pub(crate) fn apply_to(&self, node: &mut ConfigNode) {
        node.key = self.key.clone();
        node.class_name = self.class_name.clone();
        node.type_id = self.type_id.clone();
    }
}

/// The type-driven surface: an ordered descriptor list the rendering surface
/// interprets. Rebuilt wholesale on every type change, never patched. Field
/// values live in the working node, which is the single source of truth the
/// renderer binds against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicSurface {
    fields: Vec<FieldDescriptor>,
}

impl DynamicSurface {
    pub(crate) fn rebuild(&mut self, fields: Vec<FieldDescriptor>) {
        self.fields = fields;
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Presentation toggles for the hosting surface; no data-consistency role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    pub show_type: bool,
    pub show_wrappers: bool,
    pub show_children: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            show_type: true,
            show_wrappers: true,
            show_children: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_and_type_are_both_required() {
        let mut outer = OuterSurface::default();
        assert!(outer.invalid());
        outer.key = "name".into();
        assert!(outer.invalid());
        outer.type_id = "input".into();
        assert!(!outer.invalid());
        outer.key = "   ".into();
        assert!(outer.invalid());
    }

    #[test]
    fn class_name_is_optional() {
        let outer = OuterSurface {
            key: "name".into(),
            type_id: "input".into(),
            ..OuterSurface::default()
        };
        assert!(!outer.invalid());
    }
}
