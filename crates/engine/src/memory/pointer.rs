use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use cellbridge_core::{ScrollState, SheetId, UnitId};

use crate::occurrence::{CellPointerOccurrence, DragOccurrence, ScrollOccurrence};
use crate::services::{DragManager, PointerManager, ScrollManager, SelectionService};
use crate::signal::Signal;

/// Pointer streams driven by hand.
#[derive(Default)]
pub struct MemoryPointerManager {
    clicked: Signal<Option<CellPointerOccurrence>>,
    down: Signal<Option<CellPointerOccurrence>>,
    up: Signal<Option<CellPointerOccurrence>>,
    moved: Signal<Option<CellPointerOccurrence>>,
    hover: Signal<Option<CellPointerOccurrence>>,
}

impl MemoryPointerManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn click(&self, occurrence: Option<CellPointerOccurrence>) {
        self.clicked.emit(&occurrence);
    }

    pub fn press(&self, occurrence: Option<CellPointerOccurrence>) {
        self.down.emit(&occurrence);
    }

    pub fn release(&self, occurrence: Option<CellPointerOccurrence>) {
        self.up.emit(&occurrence);
    }

    pub fn move_to(&self, occurrence: Option<CellPointerOccurrence>) {
        self.moved.emit(&occurrence);
    }

    pub fn hover(&self, occurrence: Option<CellPointerOccurrence>) {
        self.hover.emit(&occurrence);
    }
}

impl PointerManager for MemoryPointerManager {
    fn clicked_cell(&self) -> &Signal<Option<CellPointerOccurrence>> {
        &self.clicked
    }

    fn pointer_down(&self) -> &Signal<Option<CellPointerOccurrence>> {
        &self.down
    }

    fn pointer_up(&self) -> &Signal<Option<CellPointerOccurrence>> {
        &self.up
    }

    fn pointer_move(&self) -> &Signal<Option<CellPointerOccurrence>> {
        &self.moved
    }

    fn hover_cell(&self) -> &Signal<Option<CellPointerOccurrence>> {
        &self.hover
    }
}

#[derive(Default)]
pub struct MemoryDragManager {
    over: Signal<Option<DragOccurrence>>,
    dropped: Signal<Option<DragOccurrence>>,
}

impl MemoryDragManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_over_cell(&self, occurrence: Option<DragOccurrence>) {
        self.over.emit(&occurrence);
    }

    pub fn drop_on_cell(&self, occurrence: Option<DragOccurrence>) {
        self.dropped.emit(&occurrence);
    }
}

impl DragManager for MemoryDragManager {
    fn drag_over(&self) -> &Signal<Option<DragOccurrence>> {
        &self.over
    }

    fn drop_cell(&self) -> &Signal<Option<DragOccurrence>> {
        &self.dropped
    }
}

/// Scroll positions per (unit, sheet). Unset sheets report `None`.
#[derive(Default)]
pub struct MemoryScrollManager {
    states: RwLock<HashMap<(UnitId, SheetId), ScrollState>>,
    scrolled: Signal<ScrollOccurrence>,
}

impl MemoryScrollManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scroll_state(&self, unit_id: &UnitId, sheet_id: &SheetId, state: ScrollState) {
        self.states
            .write()
            .insert((unit_id.clone(), sheet_id.clone()), state);
        self.scrolled.emit(&ScrollOccurrence {
            unit_id: unit_id.clone(),
            sheet_id: sheet_id.clone(),
            state,
        });
    }

    /// Bring a cell to the top-left corner of the viewport.
    pub fn scroll_to_cell(&self, unit_id: &UnitId, sheet_id: &SheetId, row: usize, col: usize) {
        self.set_scroll_state(
            unit_id,
            sheet_id,
            ScrollState {
                offset_x: 0.0,
                offset_y: 0.0,
                sheet_view_start_row: row,
                sheet_view_start_column: col,
            },
        );
    }
}

impl ScrollManager for MemoryScrollManager {
    fn scroll_state(&self, unit_id: &UnitId, sheet_id: &SheetId) -> Option<ScrollState> {
        self.states
            .read()
            .get(&(unit_id.clone(), sheet_id.clone()))
            .copied()
    }

    fn scrolled(&self) -> &Signal<ScrollOccurrence> {
        &self.scrolled
    }
}

#[derive(Debug, Clone, Copy)]
struct SelectionState {
    enabled: bool,
    visible: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self { enabled: true, visible: true }
    }
}

/// Selection toggles. `set_available(false)` makes every toggle fail.
pub struct MemorySelectionService {
    states: RwLock<HashMap<UnitId, SelectionState>>,
    available: AtomicBool,
}

impl Default for MemorySelectionService {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySelectionService {
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn update(&self, unit_id: &UnitId, apply: impl FnOnce(&mut SelectionState)) -> bool {
        if !self.available.load(Ordering::SeqCst) {
            return false;
        }
        let mut states = self.states.write();
        apply(states.entry(unit_id.clone()).or_default());
        true
    }
}

impl SelectionService for MemorySelectionService {
    fn set_enabled(&self, unit_id: &UnitId, enabled: bool) -> bool {
        self.update(unit_id, |s| s.enabled = enabled)
    }

    fn set_visible(&self, unit_id: &UnitId, visible: bool) -> bool {
        self.update(unit_id, |s| s.visible = visible)
    }

    fn is_enabled(&self, unit_id: &UnitId) -> bool {
        self.states.read().get(unit_id).copied().unwrap_or_default().enabled
    }

    fn is_visible(&self, unit_id: &UnitId) -> bool {
        self.states.read().get(unit_id).copied().unwrap_or_default().visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use parking_lot::Mutex;

    #[test]
    fn test_scroll_state_emits_and_stores() {
        let scroll = MemoryScrollManager::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = scroll.scrolled().subscribe(move |o: &ScrollOccurrence| {
            sink.lock().push(o.state.sheet_view_start_row)
        });

        let unit = UnitId::new("book");
        let sheet = SheetId::new("s1");
        assert_eq!(scroll.scroll_state(&unit, &sheet), None);
        scroll.scroll_to_cell(&unit, &sheet, 12, 3);

        assert_eq!(scroll.scroll_state(&unit, &sheet).unwrap().sheet_view_start_column, 3);
        assert_eq!(*seen.lock(), vec![12]);
    }

    #[test]
    fn test_selection_toggles() {
        let selection = MemorySelectionService::new();
        let unit = UnitId::new("book");
        assert!(selection.is_enabled(&unit));
        assert!(selection.set_enabled(&unit, false));
        assert!(!selection.is_enabled(&unit));
        assert!(selection.is_visible(&unit));

        selection.set_available(false);
        assert!(!selection.set_visible(&unit, false));
        assert!(selection.is_visible(&unit));
    }
}
