//! Raw occurrences emitted by the external services.
//!
//! These are the service-side shapes. The facade layer maps them into the
//! public event parameter records, adding workbook/worksheet context.

use cellbridge_core::{CellPos, DeviceInputEventType, KeyCode, ScrollState, SheetId, UnitId};

use crate::signal::Cancellation;

/// A pointer interaction landing on a cell (click, down, up, move, hover).
///
/// Pointer signals carry `Option<CellPointerOccurrence>`: `None` means the
/// pointer is over no cell (headers, scrollbars, outside the grid).
#[derive(Debug, Clone, PartialEq)]
pub struct CellPointerOccurrence {
    pub unit_id: UnitId,
    pub sheet_id: SheetId,
    pub row: usize,
    pub col: usize,
}

impl CellPointerOccurrence {
    pub fn new(unit_id: impl Into<UnitId>, sheet_id: impl Into<SheetId>, row: usize, col: usize) -> Self {
        Self {
            unit_id: unit_id.into(),
            sheet_id: sheet_id.into(),
            row,
            col,
        }
    }

    pub fn pos(&self) -> CellPos {
        CellPos::new(self.row, self.col)
    }
}

/// Drag-over / drop on a cell. `data` is the dragged text payload, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct DragOccurrence {
    pub unit_id: UnitId,
    pub sheet_id: SheetId,
    pub row: usize,
    pub col: usize,
    pub data: Option<String>,
}

/// Edit mode is about to open / has opened.
#[derive(Debug, Clone, PartialEq)]
pub struct EditStartOccurrence {
    pub unit_id: UnitId,
    pub sheet_id: SheetId,
    pub row: usize,
    pub col: usize,
    pub event_type: DeviceInputEventType,
    pub key_code: Option<KeyCode>,
    pub is_zen_editor: bool,
    /// Only honoured on the "before" signal.
    pub cancel: Cancellation,
}

/// The editor's content changed while in edit mode.
#[derive(Debug, Clone, PartialEq)]
pub struct EditChangingOccurrence {
    pub unit_id: UnitId,
    pub sheet_id: SheetId,
    pub row: usize,
    pub col: usize,
    pub value: String,
    pub is_zen_editor: bool,
}

/// Edit mode is about to close / has closed.
#[derive(Debug, Clone, PartialEq)]
pub struct EditEndOccurrence {
    pub unit_id: UnitId,
    pub sheet_id: SheetId,
    pub row: usize,
    pub col: usize,
    /// Editor content at close; `None` when the edit was cancelled.
    pub value: Option<String>,
    pub event_type: DeviceInputEventType,
    pub key_code: Option<KeyCode>,
    pub is_zen_editor: bool,
    pub is_confirm: bool,
    /// Only honoured on the "before" signal.
    pub cancel: Cancellation,
}

/// Clipboard copy/paste with both plain text and HTML payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardOccurrence {
    pub unit_id: UnitId,
    pub sheet_id: SheetId,
    pub text: String,
    pub html: String,
    /// Only honoured on the "before" signals.
    pub cancel: Cancellation,
}

/// A sheet viewport scrolled.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollOccurrence {
    pub unit_id: UnitId,
    pub sheet_id: SheetId,
    pub state: ScrollState,
}
