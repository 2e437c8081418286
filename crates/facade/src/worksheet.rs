use std::fmt;

use cellbridge_core::{CellPos, RangeRef, SheetId};
use cellbridge_engine::model::SheetModel;

use crate::error::FacadeError;
use crate::extension::FacadeKind;
use crate::range::Range;
use crate::workbook::Workbook;

/// Facade over one sheet of a workbook.
#[derive(Clone)]
pub struct Worksheet {
    workbook: Workbook,
    sheet_id: SheetId,
}

impl fmt::Debug for Worksheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worksheet")
            .field("unit_id", self.workbook.unit_id())
            .field("sheet_id", &self.sheet_id)
            .finish()
    }
}

impl PartialEq for Worksheet {
    fn eq(&self, other: &Self) -> bool {
        self.workbook == other.workbook && self.sheet_id == other.sheet_id
    }
}

impl Worksheet {
    pub(crate) fn new(workbook: Workbook, sheet_id: SheetId) -> Self {
        Self { workbook, sheet_id }
    }

    pub fn sheet_id(&self) -> &SheetId {
        &self.sheet_id
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    /// Current sheet model, `None` once the sheet is gone.
    pub fn model(&self) -> Option<SheetModel> {
        self.workbook.model().sheet(&self.sheet_id)
    }

    pub fn name(&self) -> String {
        self.model().map(|s| s.name).unwrap_or_default()
    }

    pub fn get_range(&self, start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Range {
        Range::new(self.clone(), RangeRef::new(start_row, start_col, end_row, end_col))
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Range {
        Range::new(self.clone(), RangeRef::cell(row, col))
    }

    /// Range from an A1 reference ("B2" or "B2:D5").
    pub fn get_range_a1(&self, reference: &str) -> Result<Range, FacadeError> {
        let invalid = || FacadeError::InvalidArgument(format!("not an A1 reference: {reference}"));
        let (start, end) = match reference.split_once(':') {
            Some((start, end)) => (start, end),
            None => (reference, reference),
        };
        let start = CellPos::from_a1(start).ok_or_else(invalid)?;
        let end = CellPos::from_a1(end).ok_or_else(invalid)?;
        Ok(Range::new(
            self.clone(),
            RangeRef::new(start.row, start.col, end.row, end.col),
        ))
    }

    pub fn supports(&self, member: &str) -> bool {
        self.workbook.host().extensions.supports(FacadeKind::Worksheet, member)
    }
}
