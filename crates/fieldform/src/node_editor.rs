//! The editable-node synchronization engine.
//!
//! A [`NodeEditor`] reconciles four inputs into one consistent
//! [`ConfigNode`]: externally pushed values, edits on the static outer
//! surface (key/className/type), edits on the type-driven dynamic surface,
//! and structural mutations (child append, wrapper acceptance). Every
//! mutation, however it originated, funnels through a single-slot pending
//! update drained by [`tick`](NodeEditor::tick), so one scheduling turn
//! produces at most one outward emission.

use std::collections::BTreeMap;
use std::sync::Arc;

use fieldform_core::{ConfigNode, TypeRegistry};
use serde_json::Value;

use crate::control::{ChangeListener, ListenerId, TouchedListener, ValueControl};
use crate::surface::{DynamicSurface, EditorOptions, OuterSurface};

/// Listener attachment state.
///
/// `Suppressed` holds while surfaces are being overwritten from a value that
/// did not originate with the user; surface writes made in that window never
/// schedule an update, which is what keeps pushed values from being echoed
/// back out as edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncState {
    Suppressed,
    Active,
}

/// The synchronization engine for one configuration node.
pub struct NodeEditor {
    registry: Arc<dyn TypeRegistry + Send + Sync>,
    options: EditorOptions,
    outer: OuterSurface,
    dynamic: DynamicSurface,
    node: ConfigNode,
    child_preview: Vec<ConfigNode>,
    container: bool,
    state: SyncState,
    pending: bool,
    next_change_id: ListenerId,
    change_listeners: BTreeMap<ListenerId, ChangeListener>,
    next_touched_id: ListenerId,
    touched_listeners: BTreeMap<ListenerId, TouchedListener>,
}

impl NodeEditor {
    pub fn new(registry: Arc<dyn TypeRegistry + Send + Sync>) -> Self {
        Self::with_options(registry, EditorOptions::default())
    }

    pub fn with_options(
        registry: Arc<dyn TypeRegistry + Send + Sync>,
        options: EditorOptions,
    ) -> Self {
        let mut editor = Self {
            registry,
            options,
            outer: OuterSurface::default(),
            dynamic: DynamicSurface::default(),
            node: ConfigNode::default(),
            child_preview: Vec::new(),
            container: false,
            state: SyncState::Suppressed,
            pending: false,
            next_change_id: 1,
            change_listeners: BTreeMap::new(),
            next_touched_id: 1,
            touched_listeners: BTreeMap::new(),
        };
        editor.resync(ConfigNode::default());
        editor.state = SyncState::Active;
        editor
    }

    /// Overwrites every surface from an externally pushed value.
    ///
    /// Runs suppressed: any update still pending from the current turn is
    /// discarded, nothing scheduled during the overwrite survives, and no
    /// outward change is emitted for this path.
    pub fn set_value(&mut self, value: Value) {
        self.set_node(ConfigNode::from_value(&value));
    }

    /// [`set_value`](Self::set_value) for an already-typed node.
    pub fn set_node(&mut self, node: ConfigNode) {
        self.state = SyncState::Suppressed;
        self.pending = false;
        self.resync(node);
        self.state = SyncState::Active;
    }

    /// Registers a change listener; the returned id unregisters it through
    /// [`off_change`](Self::off_change).
    pub fn on_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(ConfigNode) + Send + Sync + 'static,
    {
        self.insert_change_listener(Box::new(listener))
    }

    pub fn off_change(&mut self, listener_id: ListenerId) -> bool {
        self.change_listeners.remove(&listener_id).is_some()
    }

    pub fn on_touched<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut() + Send + Sync + 'static,
    {
        self.insert_touched_listener(Box::new(listener))
    }

    pub fn off_touched(&mut self, listener_id: ListenerId) -> bool {
        self.touched_listeners.remove(&listener_id).is_some()
    }

    /// Marks the editor as touched by the user.
    pub fn notify_touched(&mut self) {
        for listener in self.touched_listeners.values_mut() {
            listener();
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.outer.set_disabled(disabled);
    }

    /// Key edit on the outer surface. Ignored while disabled.
    pub fn edit_key(&mut self, key: impl Into<String>) {
        if self.outer.is_disabled() {
            return;
        }
        self.outer.key = key.into();
        self.schedule();
    }

    /// className edit on the outer surface. Ignored while disabled.
    pub fn edit_class_name(&mut self, class_name: impl Into<String>) {
        if self.outer.is_disabled() {
            return;
        }
        self.outer.class_name = class_name.into();
        self.schedule();
    }

    /// Value edit on the dynamic surface; writes straight into the working
    /// node's type-specific attributes. Ignored while disabled.
    pub fn edit_field(&mut self, name: impl Into<String>, value: Value) {
        if self.outer.is_disabled() {
            return;
        }
        self.node.extra.insert(name.into(), value);
        self.schedule();
    }

    /// User-initiated type change.
    ///
    /// Swaps the dynamic surface and the container flag from the registry and
    /// resets the working node's type-specific values (they are not portable
    /// across types), then arms the pipeline: the next [`tick`](Self::tick)
    /// emits once with the new type. Ignored while disabled.
    pub fn edit_type(&mut self, type_id: impl Into<String>) {
        if self.outer.is_disabled() {
            return;
        }
        self.state = SyncState::Suppressed;
        self.pending = false;
        self.outer.type_id = type_id.into();
        self.dynamic
            .rebuild(self.registry.type_fields(&self.outer.type_id));
        self.container = self.registry.type_meta(&self.outer.type_id).is_container;
        self.node = self.node.reset_for_type();
        self.state = SyncState::Active;
        self.schedule();
    }

    /// Appends a picker-selected child node, synthesizing the child
    /// collection on first use, and routes the result through a full
    /// resynchronization; the append surfaces as one ordinary coalesced
    /// update rather than a targeted patch.
    pub fn add_child(&mut self, child: ConfigNode) {
        self.node.ensure_children().push(child);
        self.child_preview = self.node.children().to_vec();
        let node = self.node.clone();
        self.resync(node);
    }

    /// Accepts the wrapper sub-editor's confirmed value as the full node and
    /// routes it through the same full resynchronization as
    /// [`add_child`](Self::add_child).
    pub fn apply_wrapper_edit(&mut self, node: ConfigNode) {
        self.resync(node);
    }

    /// Drains the update scheduled within the current turn, if any.
    ///
    /// Everything scheduled since the previous tick collapses into a single
    /// outward emission: the outer-surface identity fields are copied into
    /// the working node and every change listener receives its own deep copy.
    /// With no change listeners registered the drain does nothing.
    pub fn tick(&mut self) {
        if !self.pending {
            return;
        }
        self.pending = false;
        self.update_value();
    }

    /// Deep copy of the working node as it currently stands.
    pub fn value(&self) -> ConfigNode {
        self.node.clone()
    }

    /// Required-field validity of the outer surface, computed on read.
    pub fn invalid(&self) -> bool {
        self.outer.invalid()
    }

    /// Whether the current type's registry entry marks it container-like.
    pub fn is_container(&self) -> bool {
        self.container
    }

    pub fn outer(&self) -> &OuterSurface {
        &self.outer
    }

    pub fn dynamic(&self) -> &DynamicSurface {
        &self.dynamic
    }

    /// Deep copy of the children preview snapshot taken at the last node
    /// update. Display-only: mutating it never reaches the working node.
    pub fn child_preview(&self) -> Vec<ConfigNode> {
        self.child_preview.clone()
    }

    pub fn options(&self) -> EditorOptions {
        self.options
    }

    pub fn is_disabled(&self) -> bool {
        self.outer.is_disabled()
    }

    /// Whether an update is armed for the next [`tick`](Self::tick).
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Overwrites all surfaces from `node`.
    ///
    /// While `Active` the outer-surface write schedules the coalesced update,
    /// which is how structural mutations fold into the ordinary notification
    /// path; under `Suppressed` the same writes are silent.
    fn resync(&mut self, node: ConfigNode) {
        self.outer.key = node.key.clone();
        self.outer.class_name = node.class_name.clone();
        self.outer.type_id = node.type_id.clone();
        self.schedule();
        self.dynamic.rebuild(self.registry.type_fields(&node.type_id));
        self.container = self.registry.type_meta(&node.type_id).is_container;
        self.child_preview = node.children().to_vec();
        self.node = node;
    }

    /// Arms the single-slot pending update; a no-op while suppressed.
    fn schedule(&mut self) {
        if self.state == SyncState::Active {
            self.pending = true;
        }
    }

    fn update_value(&mut self) {
        if self.change_listeners.is_empty() {
            return;
        }
        self.outer.apply_to(&mut self.node);
        for listener in self.change_listeners.values_mut() {
            listener(self.node.clone());
        }
    }

    fn insert_change_listener(&mut self, listener: ChangeListener) -> ListenerId {
        let id = self.next_change_id;
        self.next_change_id = self.next_change_id.saturating_add(1);
        self.change_listeners.insert(id, listener);
        id
    }

    fn insert_touched_listener(&mut self, listener: TouchedListener) -> ListenerId {
        let id = self.next_touched_id;
        self.next_touched_id = self.next_touched_id.saturating_add(1);
        self.touched_listeners.insert(id, listener);
        id
    }
}

impl ValueControl for NodeEditor {
    fn set_value(&mut self, value: Value) {
        NodeEditor::set_value(self, value);
    }

    fn register_on_change(&mut self, listener: ChangeListener) -> ListenerId {
        self.insert_change_listener(listener)
    }

    fn register_on_touched(&mut self, listener: TouchedListener) -> ListenerId {
        self.insert_touched_listener(listener)
    }

    fn set_disabled(&mut self, disabled: bool) {
        NodeEditor::set_disabled(self, disabled);
    }
}
