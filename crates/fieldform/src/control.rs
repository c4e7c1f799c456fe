//! The embeddable control contract.

use fieldform_core::ConfigNode;
use serde_json::Value;

/// Identifier handed back by listener registration; pass it to the matching
/// `off_*` method to unregister.
pub type ListenerId = u64;

/// Callback invoked with the coalesced node after each user-driven update.
pub type ChangeListener = Box<dyn FnMut(ConfigNode) + Send + Sync>;

/// Callback invoked when the user touches the editor.
pub type TouchedListener = Box<dyn FnMut() + Send + Sync>;

/// The contract a host form expects from an embeddable editor control.
///
/// The host pushes values in with [`set_value`](Self::set_value) and observes
/// user-driven updates through registered callbacks. A pushed value is never
/// echoed back as a change.
pub trait ValueControl {
    /// Overwrites the control from an externally pushed value. Malformed
    /// input degrades to the empty node rather than erroring.
    fn set_value(&mut self, value: Value);

    fn register_on_change(&mut self, listener: ChangeListener) -> ListenerId;

    fn register_on_touched(&mut self, listener: TouchedListener) -> ListenerId;

    fn set_disabled(&mut self, disabled: bool);
}
