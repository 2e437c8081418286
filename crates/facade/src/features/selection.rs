use crate::extension::{Extension, FacadeKind};
use crate::workbook::Workbook;

/// Selection layer toggles.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionExtension;

impl Extension for SelectionExtension {
    fn name(&self) -> &'static str {
        "selection"
    }

    fn members(&self) -> Vec<(FacadeKind, Vec<&'static str>)> {
        vec![(
            FacadeKind::Workbook,
            vec!["disable_selection", "enable_selection", "transparent_selection", "show_selection"],
        )]
    }
}

/// Each toggle returns whether the selection service applied it.
pub trait WorkbookSelectionExt {
    fn disable_selection(&self) -> bool;

    fn enable_selection(&self) -> bool;

    /// Keep selection interactive but stop painting it.
    fn transparent_selection(&self) -> bool;

    fn show_selection(&self) -> bool;
}

impl WorkbookSelectionExt for Workbook {
    fn disable_selection(&self) -> bool {
        self.injector().selection().set_enabled(self.unit_id(), false)
    }

    fn enable_selection(&self) -> bool {
        self.injector().selection().set_enabled(self.unit_id(), true)
    }

    fn transparent_selection(&self) -> bool {
        self.injector().selection().set_visible(self.unit_id(), false)
    }

    fn show_selection(&self) -> bool {
        self.injector().selection().set_visible(self.unit_id(), true)
    }
}
