//! Scoped editing of a single wrapper entry.
//!
//! A [`WrapperEditor`] never touches the owning node: it clones it, appends
//! the candidate wrapper, and lets a nested [`NodeEditor`] edit the clone
//! behind a confirm/cancel boundary. Only a confirmed value travels back to
//! the owner, and routing it there is the host's job
//! ([`NodeEditor::apply_wrapper_edit`]).

use std::sync::{Arc, Mutex};

use fieldform_core::{is_non_blank, ConfigNode, TypeRegistry};

use crate::node_editor::NodeEditor;

struct WrapperSession {
    editor: NodeEditor,
    /// Last value the nested editor emitted; the empty node until the first
    /// nested edit, which is exactly what an unedited confirm hands back.
    candidate: Arc<Mutex<ConfigNode>>,
    wrapper: String,
}

/// Editor for one wrapper slot of an owning node.
///
/// State machine: `Closed -> Open` on [`open`](Self::open), back to `Closed`
/// on [`apply`](Self::apply) or [`cancel`](Self::cancel). Reopening always
/// re-clones from the then-current owning node.
pub struct WrapperEditor {
    registry: Arc<dyn TypeRegistry + Send + Sync>,
    owner: ConfigNode,
    wrapper_index: usize,
    selection: String,
    session: Option<WrapperSession>,
}

impl WrapperEditor {
    pub fn new(
        registry: Arc<dyn TypeRegistry + Send + Sync>,
        owner: ConfigNode,
        wrapper_index: usize,
    ) -> Self {
        Self {
            registry,
            owner,
            wrapper_index,
            selection: String::new(),
            session: None,
        }
    }

    /// Replaces the owning node. An open session keeps the clone it was
    /// opened with; the next [`open`](Self::open) starts from this value.
    pub fn set_owner(&mut self, owner: ConfigNode) {
        self.owner = owner;
    }

    pub fn owner(&self) -> &ConfigNode {
        &self.owner
    }

    /// The wrapper slot this editor produces a value for.
    pub fn wrapper_index(&self) -> usize {
        self.wrapper_index
    }

    /// The wrapper-choice control.
    pub fn select_wrapper(&mut self, name: impl Into<String>) {
        self.selection = name.into();
    }

    pub fn selection(&self) -> &str {
        &self.selection
    }

    /// Required/non-blank validity of the wrapper choice, gating
    /// [`open`](Self::open).
    pub fn selection_invalid(&self) -> bool {
        !is_non_blank(&self.selection)
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The candidate wrapper of the open session, if any.
    pub fn wrapper(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.wrapper.as_str())
    }

    /// Opens the sub-editor on a fresh deep copy of the owning node with the
    /// selected wrapper appended to its `wrappers`. Returns `false` without
    /// opening while the selection is blank.
    pub fn open(&mut self) -> bool {
        if self.selection_invalid() {
            return false;
        }
        let mut source = self.owner.clone();
        source.wrappers.push(self.selection.clone());

        let candidate = Arc::new(Mutex::new(ConfigNode::default()));
        let sink = Arc::clone(&candidate);
        let mut editor = NodeEditor::new(Arc::clone(&self.registry));
        editor.on_change(move |node| {
            *sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = node;
        });
        editor.set_node(source);

        self.session = Some(WrapperSession {
            editor,
            candidate,
            wrapper: self.selection.clone(),
        });
        true
    }

    /// The nested editor driving the open session.
    pub fn editor(&self) -> Option<&NodeEditor> {
        self.session.as_ref().map(|session| &session.editor)
    }

    pub fn editor_mut(&mut self) -> Option<&mut NodeEditor> {
        self.session.as_mut().map(|session| &mut session.editor)
    }

    /// Drains the nested editor's scheduled update, if a session is open.
    pub fn tick(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.editor.tick();
        }
    }

    /// Validity of the nested editor, gating confirm. `true` while closed.
    pub fn invalid(&self) -> bool {
        self.session
            .as_ref()
            .map(|session| session.editor.invalid())
            .unwrap_or(true)
    }

    /// Confirms the open session: returns the edited value for the wrapper
    /// slot and closes. The gate on [`invalid`](Self::invalid) belongs to the
    /// presenting host, as does routing the value into the owner.
    pub fn apply(&mut self) -> Option<ConfigNode> {
        let session = self.session.take()?;
        let value = session
            .candidate
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        Some(value)
    }

    /// Closes the session, discarding the clone and everything edited on it.
    pub fn cancel(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldform_core::{DesignerConfig, TypeDefinition};
    use serde_json::json;

    fn registry() -> Arc<dyn TypeRegistry + Send + Sync> {
        Arc::new(
            DesignerConfig::new()
                .with_type(TypeDefinition::new("input"))
                .unwrap()
                .with_wrapper("card")
                .unwrap()
                .with_wrapper("panel")
                .unwrap(),
        )
    }

    fn owner() -> ConfigNode {
        ConfigNode::from_value(&json!({
            "key": "name",
            "type": "input",
            "wrappers": ["card"],
        }))
    }

    #[test]
    fn blank_selection_cannot_open() {
        let mut editor = WrapperEditor::new(registry(), owner(), 1);
        assert!(editor.selection_invalid());
        assert!(!editor.open());
        editor.select_wrapper("   ");
        assert!(!editor.open());
        assert!(!editor.is_open());
    }

    #[test]
    fn open_clones_owner_and_appends_candidate() {
        let mut editor = WrapperEditor::new(registry(), owner(), 1);
        editor.select_wrapper("panel");
        assert!(editor.open());
        let nested = editor.editor().expect("session open");
        assert_eq!(
            nested.value().wrappers,
            vec!["card".to_owned(), "panel".to_owned()]
        );
        assert_eq!(editor.wrapper(), Some("panel"));
        // The owner is untouched by opening.
        assert_eq!(editor.owner().wrappers, vec!["card".to_owned()]);
    }

    #[test]
    fn cancel_discards_the_session() {
        let mut editor = WrapperEditor::new(registry(), owner(), 1);
        editor.select_wrapper("panel");
        editor.open();
        editor
            .editor_mut()
            .expect("session open")
            .edit_key("edited");
        editor.tick();
        editor.cancel();
        assert!(!editor.is_open());
        assert_eq!(editor.owner(), &owner());
        assert_eq!(editor.apply(), None);
    }

    #[test]
    fn unedited_session_confirms_the_empty_node() {
        let mut editor = WrapperEditor::new(registry(), owner(), 1);
        editor.select_wrapper("panel");
        editor.open();
        let value = editor.apply().expect("session was open");
        assert_eq!(value, ConfigNode::default());
        assert!(!editor.is_open());
    }

    #[test]
    fn reopening_starts_from_the_current_owner() {
        let mut editor = WrapperEditor::new(registry(), owner(), 1);
        editor.select_wrapper("panel");
        editor.open();
        editor.cancel();

        let mut updated = owner();
        updated.key = "renamed".into();
        editor.set_owner(updated);
        editor.open();
        let nested = editor.editor().expect("session open");
        assert_eq!(nested.value().key, "renamed");
    }
}
