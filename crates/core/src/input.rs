//! Device input classification.
//!
//! UI state transitions (entering or leaving edit mode, pointer activity) are
//! tagged with the physical trigger that caused them.

use serde::{Deserialize, Serialize};

/// The kind of input that triggered a UI transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceInputEventType {
    #[default]
    Keyboard,
    PointerDown,
    PointerUp,
    PointerMove,
    Dblclick,
}

/// Keys that carry meaning for edit-mode transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCode {
    Enter,
    Esc,
    Tab,
    F2,
    Other(u32),
}

impl KeyCode {
    /// Whether leaving edit mode with this key commits the edit.
    pub fn is_confirm(&self) -> bool {
        !matches!(self, KeyCode::Esc)
    }
}
