//! Replay script format.
//!
//! A script is a JSON document describing one workbook, the events to listen
//! to, and a list of steps that drive the in-memory services:
//!
//! ```json
//! {
//!   "workbook": { "id": "book", "name": "Budget", "sheets": ["Sheet1", "Sheet2"] },
//!   "subscribe": ["CellClicked", "SheetEditEnded"],
//!   "steps": [
//!     { "op": "click", "sheet": "Sheet1", "cell": "F4" },
//!     { "op": "start_editing", "sheet": "Sheet1", "cell": "B2" },
//!     { "op": "type_text", "text": "42" },
//!     { "op": "end_editing" }
//!   ]
//! }
//! ```
//!
//! An empty `subscribe` list listens to every event the host supports.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::replay::ReplayError;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub workbook: WorkbookSpec,
    #[serde(default)]
    pub subscribe: Vec<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkbookSpec {
    #[serde(default = "default_unit_id")]
    pub id: String,
    #[serde(default = "default_workbook_name")]
    pub name: String,
    #[serde(default = "default_sheets")]
    pub sheets: Vec<String>,
    /// Register the workbook without a canvas.
    #[serde(default)]
    pub headless: bool,
}

impl Default for WorkbookSpec {
    fn default() -> Self {
        Self {
            id: default_unit_id(),
            name: default_workbook_name(),
            sheets: default_sheets(),
            headless: false,
        }
    }
}

fn default_unit_id() -> String {
    "book".to_string()
}

fn default_workbook_name() -> String {
    "Workbook".to_string()
}

fn default_sheets() -> Vec<String> {
    vec!["Sheet1".to_string()]
}

fn default_true() -> bool {
    true
}

/// One replay step. Pointer steps without a `cell` model a pointer outside
/// the grid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Click { sheet: String, cell: Option<String> },
    Hover { sheet: String, cell: Option<String> },
    PointerDown { sheet: String, cell: Option<String> },
    PointerUp { sheet: String, cell: Option<String> },
    PointerMove { sheet: String, cell: Option<String> },
    DragOver {
        sheet: String,
        cell: Option<String>,
        #[serde(default)]
        data: Option<String>,
    },
    Drop {
        sheet: String,
        cell: Option<String>,
        #[serde(default)]
        data: Option<String>,
    },
    StartEditing { sheet: String, cell: String },
    TypeText { text: String },
    EndEditing {
        #[serde(default = "default_true")]
        save: bool,
    },
    Copy {
        sheet: String,
        text: String,
        #[serde(default)]
        html: String,
    },
    Paste { sheet: String },
    AddComment { sheet: String, cell: String, text: String },
    ClearComments { sheet: String, range: String },
    Zoom { sheet: String, ratio: f64 },
    Scroll { sheet: String, cell: String },
    /// Dispose the subscription for one event name.
    Dispose { event: String },
}

impl Step {
    pub fn op(&self) -> &'static str {
        match self {
            Step::Click { .. } => "click",
            Step::Hover { .. } => "hover",
            Step::PointerDown { .. } => "pointer_down",
            Step::PointerUp { .. } => "pointer_up",
            Step::PointerMove { .. } => "pointer_move",
            Step::DragOver { .. } => "drag_over",
            Step::Drop { .. } => "drop",
            Step::StartEditing { .. } => "start_editing",
            Step::TypeText { .. } => "type_text",
            Step::EndEditing { .. } => "end_editing",
            Step::Copy { .. } => "copy",
            Step::Paste { .. } => "paste",
            Step::AddComment { .. } => "add_comment",
            Step::ClearComments { .. } => "clear_comments",
            Step::Zoom { .. } => "zoom",
            Step::Scroll { .. } => "scroll",
            Step::Dispose { .. } => "dispose",
        }
    }
}

impl Script {
    pub fn parse(contents: &str) -> Result<Self, ReplayError> {
        let script: Script = serde_json::from_str(contents).map_err(|e| ReplayError::Script(e.to_string()))?;
        if script.workbook.sheets.is_empty() {
            return Err(ReplayError::Script("workbook needs at least one sheet".to_string()));
        }
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ReplayError::Script(format!("{}: {}", path.display(), e)))?;
        Self::parse(&contents)
    }
}
