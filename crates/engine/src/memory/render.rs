use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use cellbridge_core::{CellPos, CellRect, RangeRef, SheetId, UnitId};

use crate::model::UnitRegistry;
use crate::services::{RenderManager, RenderSurface, ScrollManager};

use super::pointer::MemoryScrollManager;

/// Uniform grid geometry, in pixels at zoom 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub row_height: f64,
    pub col_width: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            row_height: 24.0,
            col_width: 80.0,
            viewport_width: 800.0,
            viewport_height: 480.0,
        }
    }
}

/// Canvas with uniform row heights and column widths.
pub struct MemoryRenderSurface {
    unit_id: UnitId,
    units: Arc<UnitRegistry>,
    scroll: Arc<MemoryScrollManager>,
    geometry: RwLock<Geometry>,
    refreshes: Mutex<Vec<SheetId>>,
}

impl MemoryRenderSurface {
    pub fn set_geometry(&self, geometry: Geometry) {
        *self.geometry.write() = geometry;
    }

    /// Sheets refreshed so far, in order.
    pub fn refreshes(&self) -> Vec<SheetId> {
        self.refreshes.lock().clone()
    }

    fn zoom(&self, sheet_id: &SheetId) -> Option<f64> {
        let workbook = self.units.get(&self.unit_id)?;
        workbook.sheet(sheet_id).map(|s| s.zoom_ratio)
    }
}

impl RenderSurface for MemoryRenderSurface {
    fn refresh(&self, sheet_id: &SheetId) {
        self.refreshes.lock().push(sheet_id.clone());
    }

    fn visible_range(&self, sheet_id: &SheetId) -> Option<RangeRef> {
        let zoom = self.zoom(sheet_id)?;
        let geometry = *self.geometry.read();
        let state = self.scroll.scroll_state(&self.unit_id, sheet_id).unwrap_or_default();

        let rows = (geometry.viewport_height / (geometry.row_height * zoom)).ceil().max(1.0) as usize;
        let cols = (geometry.viewport_width / (geometry.col_width * zoom)).ceil().max(1.0) as usize;
        let start_row = state.sheet_view_start_row;
        let start_col = state.sheet_view_start_column;
        Some(RangeRef::new(
            start_row,
            start_col,
            start_row.saturating_add(rows - 1),
            start_col.saturating_add(cols - 1),
        ))
    }

    fn cell_rect(&self, sheet_id: &SheetId, pos: CellPos) -> Option<CellRect> {
        let zoom = self.zoom(sheet_id)?;
        let geometry = *self.geometry.read();
        let state = self.scroll.scroll_state(&self.unit_id, sheet_id).unwrap_or_default();

        let width = geometry.col_width * zoom;
        let height = geometry.row_height * zoom;
        Some(CellRect {
            x: (pos.col as f64 - state.sheet_view_start_column as f64) * width - state.offset_x,
            y: (pos.row as f64 - state.sheet_view_start_row as f64) * height - state.offset_y,
            width,
            height,
        })
    }
}

pub struct MemoryRenderManager {
    units: Arc<UnitRegistry>,
    scroll: Arc<MemoryScrollManager>,
    surfaces: RwLock<HashMap<UnitId, Arc<MemoryRenderSurface>>>,
}

impl MemoryRenderManager {
    pub fn new(units: Arc<UnitRegistry>, scroll: Arc<MemoryScrollManager>) -> Self {
        Self {
            units,
            scroll,
            surfaces: RwLock::new(HashMap::new()),
        }
    }

    /// Create (or return the existing) surface for a unit.
    pub fn mount(&self, unit_id: &UnitId) -> Arc<MemoryRenderSurface> {
        let mut surfaces = self.surfaces.write();
        let surface = surfaces.entry(unit_id.clone()).or_insert_with(|| {
            Arc::new(MemoryRenderSurface {
                unit_id: unit_id.clone(),
                units: Arc::clone(&self.units),
                scroll: Arc::clone(&self.scroll),
                geometry: RwLock::new(Geometry::default()),
                refreshes: Mutex::new(Vec::new()),
            })
        });
        Arc::clone(surface)
    }

    pub fn unmount(&self, unit_id: &UnitId) -> bool {
        self.surfaces.write().remove(unit_id).is_some()
    }

    pub fn surface(&self, unit_id: &UnitId) -> Option<Arc<MemoryRenderSurface>> {
        self.surfaces.read().get(unit_id).cloned()
    }
}

impl RenderManager for MemoryRenderManager {
    fn get_render(&self, unit_id: &UnitId) -> Option<Arc<dyn RenderSurface>> {
        self.surface(unit_id).map(|s| s as Arc<dyn RenderSurface>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SheetModel, WorkbookModel};
    use cellbridge_core::ScrollState;

    fn setup() -> (Arc<UnitRegistry>, Arc<MemoryScrollManager>, MemoryRenderManager) {
        let units = Arc::new(UnitRegistry::new());
        units.add(Arc::new(WorkbookModel::new("book", "Book", vec![SheetModel::new("s1", "Sheet1")])));
        let scroll = Arc::new(MemoryScrollManager::new());
        let manager = MemoryRenderManager::new(Arc::clone(&units), Arc::clone(&scroll));
        (units, scroll, manager)
    }

    #[test]
    fn test_visible_range_follows_zoom_and_scroll() {
        let (units, scroll, manager) = setup();
        let unit = UnitId::new("book");
        let sheet = SheetId::new("s1");
        let surface = manager.mount(&unit);

        // 480 / 24 = 20 rows, 800 / 80 = 10 cols
        assert_eq!(surface.visible_range(&sheet), Some(RangeRef::new(0, 0, 19, 9)));

        units.get(&unit).unwrap().set_zoom_ratio(&sheet, 2.0);
        assert_eq!(surface.visible_range(&sheet), Some(RangeRef::new(0, 0, 9, 4)));

        scroll.set_scroll_state(
            &unit,
            &sheet,
            ScrollState {
                sheet_view_start_row: 100,
                sheet_view_start_column: 3,
                ..ScrollState::default()
            },
        );
        assert_eq!(surface.visible_range(&sheet), Some(RangeRef::new(100, 3, 109, 7)));
        assert_eq!(surface.visible_range(&SheetId::new("nope")), None);
    }

    #[test]
    fn test_visible_range_clamps_at_sheet_edge() {
        let (_units, scroll, manager) = setup();
        let unit = UnitId::new("book");
        let sheet = SheetId::new("s1");
        let surface = manager.mount(&unit);

        scroll.set_scroll_state(
            &unit,
            &sheet,
            ScrollState {
                sheet_view_start_row: usize::MAX - 5,
                sheet_view_start_column: usize::MAX,
                ..ScrollState::default()
            },
        );
        assert_eq!(
            surface.visible_range(&sheet),
            Some(RangeRef::new(usize::MAX - 5, usize::MAX, usize::MAX, usize::MAX))
        );
    }

    #[test]
    fn test_cell_rect() {
        let (_units, _scroll, manager) = setup();
        let surface = manager.mount(&UnitId::new("book"));
        let rect = surface.cell_rect(&SheetId::new("s1"), CellPos::new(2, 1)).unwrap();
        assert_eq!(rect, CellRect { x: 80.0, y: 48.0, width: 80.0, height: 24.0 });
    }

    #[test]
    fn test_unmounted_unit_has_no_render() {
        let (_units, _scroll, manager) = setup();
        let unit = UnitId::new("book");
        assert!(manager.get_render(&unit).is_none());
        manager.mount(&unit);
        assert!(manager.get_render(&unit).is_some());
        assert!(manager.unmount(&unit));
        assert!(manager.get_render(&unit).is_none());
    }
}
