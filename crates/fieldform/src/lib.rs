//! fieldform: an embeddable editor engine for recursive field-configuration
//! trees.
//!
//! Two cooperating components built from one pattern:
//! - [`NodeEditor`] edits a single configuration node in place: its identity
//!   fields, the type-driven dynamic sub-fields, and (for container types)
//!   a live preview of its children.
//! - [`WrapperEditor`] edits one wrapper entry against a deep copy of the
//!   owning node, behind a confirm/cancel boundary, and hands the result back
//!   through the same coalesced update path.
//!
//! Hosts embed either through the [`ValueControl`] contract: push values in
//! with `set_value`, observe user-driven updates through registered change
//! callbacks. Externally pushed values are never echoed back out.

pub mod control;
pub mod node_editor;
pub mod surface;
pub mod wrapper_editor;

pub use control::{ChangeListener, ListenerId, TouchedListener, ValueControl};
pub use node_editor::NodeEditor;
pub use surface::{DynamicSurface, EditorOptions, OuterSurface};
pub use wrapper_editor::WrapperEditor;
