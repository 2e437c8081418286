//! Interfaces of the external services the facades forward to.
//!
//! Implementations live with the host application (renderer, editor, comment
//! store, ...). [`crate::memory`] provides in-process versions for tests and
//! the replay tool.

use std::sync::Arc;

use smol::future::Boxed;

use cellbridge_core::{CellPos, CellRect, CommentId, CommentRecord, RangeRef, ScrollState, SheetId, ThreadId, UnitId};

use crate::command::SheetCommand;
use crate::occurrence::{
    CellPointerOccurrence, ClipboardOccurrence, DragOccurrence, EditChangingOccurrence, EditEndOccurrence,
    EditStartOccurrence, ScrollOccurrence,
};
use crate::signal::Signal;

/// A rendered workbook canvas.
pub trait RenderSurface: Send + Sync {
    /// Recompute layout for the sheet and repaint.
    fn refresh(&self, sheet_id: &SheetId);

    /// Cells currently inside the viewport. `None` if the sheet is not laid out.
    fn visible_range(&self, sheet_id: &SheetId) -> Option<RangeRef>;

    /// Canvas rectangle of a cell, relative to the viewport origin.
    fn cell_rect(&self, sheet_id: &SheetId, pos: CellPos) -> Option<CellRect>;
}

/// Resolves the render surface of a unit. Units that are not mounted on a
/// canvas (headless, not yet rendered) have none.
pub trait RenderManager: Send + Sync {
    fn get_render(&self, unit_id: &UnitId) -> Option<Arc<dyn RenderSurface>>;
}

pub trait ScrollManager: Send + Sync {
    fn scroll_state(&self, unit_id: &UnitId, sheet_id: &SheetId) -> Option<ScrollState>;

    fn scrolled(&self) -> &Signal<ScrollOccurrence>;
}

/// Enables/disables and shows/hides the selection layer of a unit.
///
/// Every toggle reports whether it was applied.
pub trait SelectionService: Send + Sync {
    fn set_enabled(&self, unit_id: &UnitId, enabled: bool) -> bool;

    /// Transparent selection is still interactive but not painted.
    fn set_visible(&self, unit_id: &UnitId, visible: bool) -> bool;

    fn is_enabled(&self, unit_id: &UnitId) -> bool;

    fn is_visible(&self, unit_id: &UnitId) -> bool;
}

/// Pointer and hover streams. `None` = pointer over no cell.
pub trait PointerManager: Send + Sync {
    fn clicked_cell(&self) -> &Signal<Option<CellPointerOccurrence>>;

    fn pointer_down(&self) -> &Signal<Option<CellPointerOccurrence>>;

    fn pointer_up(&self) -> &Signal<Option<CellPointerOccurrence>>;

    fn pointer_move(&self) -> &Signal<Option<CellPointerOccurrence>>;

    fn hover_cell(&self) -> &Signal<Option<CellPointerOccurrence>>;
}

pub trait DragManager: Send + Sync {
    fn drag_over(&self) -> &Signal<Option<DragOccurrence>>;

    fn drop_cell(&self) -> &Signal<Option<DragOccurrence>>;
}

/// Cell editor lifecycle.
///
/// `before_*` listeners may veto through the occurrence's `cancel` flag.
pub trait EditorService: Send + Sync {
    fn is_editing(&self, unit_id: &UnitId) -> bool;

    fn before_start(&self) -> &Signal<EditStartOccurrence>;

    fn started(&self) -> &Signal<EditStartOccurrence>;

    fn changing(&self) -> &Signal<EditChangingOccurrence>;

    fn before_end(&self) -> &Signal<EditEndOccurrence>;

    fn ended(&self) -> &Signal<EditEndOccurrence>;
}

/// Clipboard lifecycle. `before_*` listeners may veto.
pub trait ClipboardService: Send + Sync {
    fn before_change(&self) -> &Signal<ClipboardOccurrence>;

    fn changed(&self) -> &Signal<ClipboardOccurrence>;

    fn before_paste(&self) -> &Signal<ClipboardOccurrence>;

    fn pasted(&self) -> &Signal<ClipboardOccurrence>;
}

/// Comment storage lookups.
pub trait CommentModel: Send + Sync {
    /// Root comment anchored at a cell, if any.
    fn comment_id_at(&self, unit_id: &UnitId, sheet_id: &SheetId, row: usize, col: usize) -> Option<CommentId>;

    fn get_comment(&self, unit_id: &UnitId, sheet_id: &SheetId, comment_id: &CommentId) -> Option<CommentRecord>;

    /// All comments of a thread, root first, then replies in insertion order.
    fn thread(&self, unit_id: &UnitId, sheet_id: &SheetId, thread_id: &ThreadId) -> Vec<CommentRecord>;
}

/// Executes commands. Some commands complete synchronously, others
/// asynchronously; both report success as a `bool`.
pub trait CommandService: Send + Sync {
    fn sync_execute(&self, command: &SheetCommand) -> bool;

    fn execute(&self, command: SheetCommand) -> Boxed<bool>;
}
