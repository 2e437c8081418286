use cellbridge_core::RangeRef;

use crate::extension::FacadeKind;
use crate::workbook::Workbook;
use crate::worksheet::Worksheet;

/// Facade over a rectangular block of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    worksheet: Worksheet,
    range: RangeRef,
}

impl Range {
    pub(crate) fn new(worksheet: Worksheet, range: RangeRef) -> Self {
        Self { worksheet, range }
    }

    pub fn worksheet(&self) -> &Worksheet {
        &self.worksheet
    }

    pub fn workbook(&self) -> &Workbook {
        self.worksheet.workbook()
    }

    pub fn range_ref(&self) -> RangeRef {
        self.range
    }

    pub fn get_row(&self) -> usize {
        self.range.start_row
    }

    pub fn get_column(&self) -> usize {
        self.range.start_col
    }

    pub fn a1(&self) -> String {
        self.range.to_a1()
    }

    pub fn supports(&self, member: &str) -> bool {
        self.workbook().host().extensions.supports(FacadeKind::Range, member)
    }
}
