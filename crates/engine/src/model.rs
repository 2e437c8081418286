//! Workbook models the facades read from.
//!
//! The model is the single owner of sheet order, names and per-sheet view
//! state (zoom). Facades read it freely but only the command service writes.

use std::sync::Arc;

use parking_lot::RwLock;

use cellbridge_core::{SheetId, UnitId};

/// Per-sheet state visible to facades.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetModel {
    pub id: SheetId,
    pub name: String,
    pub zoom_ratio: f64,
}

impl SheetModel {
    pub fn new(id: impl Into<SheetId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            zoom_ratio: 1.0,
        }
    }
}

#[derive(Debug)]
pub struct WorkbookModel {
    unit_id: UnitId,
    name: String,
    sheets: RwLock<Vec<SheetModel>>,
    active_sheet_index: RwLock<usize>,
}

impl WorkbookModel {
    /// Create a workbook with the given sheets; the first one is active.
    pub fn new(unit_id: impl Into<UnitId>, name: impl Into<String>, sheets: Vec<SheetModel>) -> Self {
        Self {
            unit_id: unit_id.into(),
            name: name.into(),
            sheets: RwLock::new(sheets),
            active_sheet_index: RwLock::new(0),
        }
    }

    pub fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.read().len()
    }

    pub fn sheets(&self) -> Vec<SheetModel> {
        self.sheets.read().clone()
    }

    pub fn sheet(&self, id: &SheetId) -> Option<SheetModel> {
        self.sheets.read().iter().find(|s| &s.id == id).cloned()
    }

    pub fn sheet_by_name(&self, name: &str) -> Option<SheetModel> {
        self.sheets.read().iter().find(|s| s.name == name).cloned()
    }

    /// Active sheet, or `None` for a workbook with no sheets.
    pub fn active_sheet(&self) -> Option<SheetModel> {
        let idx = *self.active_sheet_index.read();
        self.sheets.read().get(idx).cloned()
    }

    pub fn set_active_sheet(&self, id: &SheetId) -> bool {
        let idx = self.sheets.read().iter().position(|s| &s.id == id);
        match idx {
            Some(idx) => {
                *self.active_sheet_index.write() = idx;
                true
            }
            None => false,
        }
    }

    /// Append a sheet. Fails if the id is taken.
    pub fn add_sheet(&self, sheet: SheetModel) -> bool {
        let mut sheets = self.sheets.write();
        if sheets.iter().any(|s| s.id == sheet.id) {
            return false;
        }
        sheets.push(sheet);
        true
    }

    pub fn set_zoom_ratio(&self, id: &SheetId, zoom_ratio: f64) -> bool {
        match self.sheets.write().iter_mut().find(|s| &s.id == id) {
            Some(sheet) => {
                sheet.zoom_ratio = zoom_ratio;
                true
            }
            None => false,
        }
    }
}

/// All open workbooks, keyed by unit id.
#[derive(Debug, Default)]
pub struct UnitRegistry {
    units: RwLock<Vec<Arc<WorkbookModel>>>,
    focused: RwLock<Option<UnitId>>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a workbook. The first registered workbook becomes focused.
    pub fn add(&self, workbook: Arc<WorkbookModel>) {
        let mut focused = self.focused.write();
        if focused.is_none() {
            *focused = Some(workbook.unit_id().clone());
        }
        self.units.write().push(workbook);
    }

    pub fn get(&self, unit_id: &UnitId) -> Option<Arc<WorkbookModel>> {
        self.units.read().iter().find(|w| w.unit_id() == unit_id).cloned()
    }

    pub fn focused(&self) -> Option<Arc<WorkbookModel>> {
        let focused = self.focused.read().clone()?;
        self.get(&focused)
    }

    pub fn set_focused(&self, unit_id: &UnitId) -> bool {
        if self.get(unit_id).is_none() {
            return false;
        }
        *self.focused.write() = Some(unit_id.clone());
        true
    }

    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.units.read().iter().map(|w| w.unit_id().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> WorkbookModel {
        WorkbookModel::new(
            "book",
            "Budget",
            vec![SheetModel::new("s1", "Sheet1"), SheetModel::new("s2", "Sheet2")],
        )
    }

    #[test]
    fn test_active_sheet_defaults_to_first() {
        let wb = book();
        assert_eq!(wb.active_sheet().unwrap().name, "Sheet1");
        assert!(wb.set_active_sheet(&SheetId::new("s2")));
        assert_eq!(wb.active_sheet().unwrap().name, "Sheet2");
        assert!(!wb.set_active_sheet(&SheetId::new("missing")));
    }

    #[test]
    fn test_add_sheet_rejects_duplicate_id() {
        let wb = book();
        assert!(!wb.add_sheet(SheetModel::new("s1", "Other")));
        assert!(wb.add_sheet(SheetModel::new("s3", "Sheet3")));
        assert_eq!(wb.sheet_count(), 3);
    }

    #[test]
    fn test_zoom_ratio() {
        let wb = book();
        assert!(wb.set_zoom_ratio(&SheetId::new("s2"), 1.5));
        assert_eq!(wb.sheet(&SheetId::new("s2")).unwrap().zoom_ratio, 1.5);
        assert_eq!(wb.sheet_by_name("Sheet1").unwrap().zoom_ratio, 1.0);
    }

    #[test]
    fn test_registry_focus() {
        let registry = UnitRegistry::new();
        assert!(registry.focused().is_none());
        registry.add(Arc::new(book()));
        registry.add(Arc::new(WorkbookModel::new("other", "Other", vec![])));
        assert_eq!(registry.focused().unwrap().unit_id().as_str(), "book");
        assert!(registry.set_focused(&UnitId::new("other")));
        assert_eq!(registry.focused().unwrap().name(), "Other");
        assert!(!registry.set_focused(&UnitId::new("nope")));
    }
}
