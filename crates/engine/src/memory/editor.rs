use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use cellbridge_core::{CellPos, DeviceInputEventType, KeyCode, SheetId, UnitId};

use crate::occurrence::{EditChangingOccurrence, EditEndOccurrence, EditStartOccurrence};
use crate::services::EditorService;
use crate::signal::{Cancellation, Signal};

#[derive(Debug, Clone)]
struct EditSession {
    sheet_id: SheetId,
    pos: CellPos,
    value: String,
}

/// Cell editor with one session per unit.
///
/// The editor opens on the unit's active cell (see [`MemoryEditor::set_active_cell`]).
/// With `set_defer_close(true)` close requests are accepted but the session
/// stays open, the way an editor behaves while it finalizes asynchronously.
pub struct MemoryEditor {
    sessions: Mutex<HashMap<UnitId, EditSession>>,
    active_cells: Mutex<HashMap<UnitId, (SheetId, CellPos)>>,
    defer_close: AtomicBool,
    before_start: Signal<EditStartOccurrence>,
    started: Signal<EditStartOccurrence>,
    changing: Signal<EditChangingOccurrence>,
    before_end: Signal<EditEndOccurrence>,
    ended: Signal<EditEndOccurrence>,
}

impl Default for MemoryEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEditor {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            active_cells: Mutex::new(HashMap::new()),
            defer_close: AtomicBool::new(false),
            before_start: Signal::new(),
            started: Signal::new(),
            changing: Signal::new(),
            before_end: Signal::new(),
            ended: Signal::new(),
        }
    }

    pub fn set_active_cell(&self, unit_id: &UnitId, sheet_id: &SheetId, pos: CellPos) {
        self.active_cells
            .lock()
            .insert(unit_id.clone(), (sheet_id.clone(), pos));
    }

    pub fn set_defer_close(&self, defer: bool) {
        self.defer_close.store(defer, Ordering::SeqCst);
    }

    /// Current editor content, if a session is open.
    pub fn value(&self, unit_id: &UnitId) -> Option<String> {
        self.sessions.lock().get(unit_id).map(|s| s.value.clone())
    }

    /// Open edit mode on the active cell. Returns false if there is no active
    /// cell or a `before_start` listener vetoed.
    pub fn open(&self, unit_id: &UnitId, event_type: DeviceInputEventType, key_code: Option<KeyCode>) -> bool {
        if self.is_editing(unit_id) {
            return true;
        }
        let Some((sheet_id, pos)) = self.active_cells.lock().get(unit_id).cloned() else {
            return false;
        };

        let occurrence = EditStartOccurrence {
            unit_id: unit_id.clone(),
            sheet_id: sheet_id.clone(),
            row: pos.row,
            col: pos.col,
            event_type,
            key_code,
            is_zen_editor: false,
            cancel: Cancellation::new(),
        };
        self.before_start.emit(&occurrence);
        if occurrence.cancel.is_cancelled() {
            return false;
        }

        self.sessions.lock().insert(
            unit_id.clone(),
            EditSession {
                sheet_id,
                pos,
                value: String::new(),
            },
        );
        self.started.emit(&occurrence);
        true
    }

    /// Replace the editor content.
    pub fn type_text(&self, unit_id: &UnitId, value: &str) -> bool {
        let session = {
            let mut sessions = self.sessions.lock();
            let Some(session) = sessions.get_mut(unit_id) else {
                return false;
            };
            session.value = value.to_string();
            session.clone()
        };

        self.changing.emit(&EditChangingOccurrence {
            unit_id: unit_id.clone(),
            sheet_id: session.sheet_id,
            row: session.pos.row,
            col: session.pos.col,
            value: session.value,
            is_zen_editor: false,
        });
        true
    }

    /// Close edit mode. `Esc` cancels; any other key (or none) confirms.
    pub fn close(&self, unit_id: &UnitId, event_type: DeviceInputEventType, key_code: Option<KeyCode>) -> bool {
        let Some(session) = self.sessions.lock().get(unit_id).cloned() else {
            return true;
        };
        if self.defer_close.load(Ordering::SeqCst) {
            return true;
        }

        let is_confirm = key_code.map_or(true, |k| k.is_confirm());
        let occurrence = EditEndOccurrence {
            unit_id: unit_id.clone(),
            sheet_id: session.sheet_id,
            row: session.pos.row,
            col: session.pos.col,
            value: is_confirm.then_some(session.value),
            event_type,
            key_code,
            is_zen_editor: false,
            is_confirm,
            cancel: Cancellation::new(),
        };
        self.before_end.emit(&occurrence);
        if occurrence.cancel.is_cancelled() {
            return false;
        }

        self.sessions.lock().remove(unit_id);
        self.ended.emit(&occurrence);
        true
    }
}

impl EditorService for MemoryEditor {
    fn is_editing(&self, unit_id: &UnitId) -> bool {
        self.sessions.lock().contains_key(unit_id)
    }

    fn before_start(&self) -> &Signal<EditStartOccurrence> {
        &self.before_start
    }

    fn started(&self) -> &Signal<EditStartOccurrence> {
        &self.started
    }

    fn changing(&self) -> &Signal<EditChangingOccurrence> {
        &self.changing
    }

    fn before_end(&self) -> &Signal<EditEndOccurrence> {
        &self.before_end
    }

    fn ended(&self) -> &Signal<EditEndOccurrence> {
        &self.ended
    }
}
