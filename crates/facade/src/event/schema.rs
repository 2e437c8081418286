//! Event parameter records and the name -> record mapping.
//!
//! The runtime half is [`ParamKind`]: every registered name carries one, and
//! dispatched records are checked against it. The compile-time half is
//! [`EventSpec`]: one marker type per built-in event, so typed subscriptions
//! receive the concrete record instead of [`EventParams`].

use std::fmt;

use cellbridge_core::{DeviceInputEventType, KeyCode, ScrollState};
use cellbridge_engine::Cancellation;

use crate::error::FacadeError;
use crate::event::name::EventName;
use crate::workbook::Workbook;
use crate::worksheet::Worksheet;

/// Shape of the record an event delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Cell,
    Drag,
    EditStart,
    EditChanging,
    EditEnd,
    Clipboard,
    Scroll,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Cell => "cell",
            ParamKind::Drag => "drag",
            ParamKind::EditStart => "edit-start",
            ParamKind::EditChanging => "edit-changing",
            ParamKind::EditEnd => "edit-end",
            ParamKind::Clipboard => "clipboard",
            ParamKind::Scroll => "scroll",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pointer activity on a cell (click, down, up, move, hover).
#[derive(Debug, Clone, PartialEq)]
pub struct CellEventParams {
    pub workbook: Workbook,
    pub worksheet: Worksheet,
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragEventParams {
    pub workbook: Workbook,
    pub worksheet: Worksheet,
    pub row: usize,
    pub column: usize,
    /// Dragged text payload, when the source provides one.
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditStartParams {
    pub workbook: Workbook,
    pub worksheet: Worksheet,
    pub row: usize,
    pub column: usize,
    pub event_type: DeviceInputEventType,
    pub key_code: Option<KeyCode>,
    pub is_zen_editor: bool,
    cancel: Cancellation,
}

impl EditStartParams {
    /// Veto the pending edit. Only meaningful on `BeforeSheetEditStart`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditChangingParams {
    pub workbook: Workbook,
    pub worksheet: Worksheet,
    pub row: usize,
    pub column: usize,
    pub value: String,
    pub is_zen_editor: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditEndParams {
    pub workbook: Workbook,
    pub worksheet: Worksheet,
    pub row: usize,
    pub column: usize,
    /// `None` when the edit was abandoned.
    pub value: Option<String>,
    pub event_type: DeviceInputEventType,
    pub key_code: Option<KeyCode>,
    pub is_zen_editor: bool,
    pub is_confirm: bool,
    cancel: Cancellation,
}

impl EditEndParams {
    /// Keep the editor open. Only meaningful on `BeforeSheetEditEnd`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardEventParams {
    pub workbook: Workbook,
    pub worksheet: Worksheet,
    pub text: String,
    pub html: String,
    cancel: Cancellation,
}

impl ClipboardEventParams {
    /// Veto the copy or paste. Only meaningful on the `Before*` events.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollEventParams {
    pub workbook: Workbook,
    pub worksheet: Worksheet,
    pub state: ScrollState,
}

// The cancellation flag is shared with the source occurrence, so a veto
// reaches the source.
impl EditStartParams {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        workbook: Workbook,
        worksheet: Worksheet,
        row: usize,
        column: usize,
        event_type: DeviceInputEventType,
        key_code: Option<KeyCode>,
        is_zen_editor: bool,
        cancel: Cancellation,
    ) -> Self {
        Self {
            workbook,
            worksheet,
            row,
            column,
            event_type,
            key_code,
            is_zen_editor,
            cancel,
        }
    }
}

impl EditEndParams {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        workbook: Workbook,
        worksheet: Worksheet,
        row: usize,
        column: usize,
        value: Option<String>,
        event_type: DeviceInputEventType,
        key_code: Option<KeyCode>,
        is_zen_editor: bool,
        is_confirm: bool,
        cancel: Cancellation,
    ) -> Self {
        Self {
            workbook,
            worksheet,
            row,
            column,
            value,
            event_type,
            key_code,
            is_zen_editor,
            is_confirm,
            cancel,
        }
    }
}

impl ClipboardEventParams {
    pub fn new(workbook: Workbook, worksheet: Worksheet, text: String, html: String, cancel: Cancellation) -> Self {
        Self {
            workbook,
            worksheet,
            text,
            html,
            cancel,
        }
    }
}

/// Any event parameter record.
#[derive(Debug, Clone, PartialEq)]
pub enum EventParams {
    Cell(CellEventParams),
    Drag(DragEventParams),
    EditStart(EditStartParams),
    EditChanging(EditChangingParams),
    EditEnd(EditEndParams),
    Clipboard(ClipboardEventParams),
    Scroll(ScrollEventParams),
}

impl EventParams {
    pub fn kind(&self) -> ParamKind {
        match self {
            EventParams::Cell(_) => ParamKind::Cell,
            EventParams::Drag(_) => ParamKind::Drag,
            EventParams::EditStart(_) => ParamKind::EditStart,
            EventParams::EditChanging(_) => ParamKind::EditChanging,
            EventParams::EditEnd(_) => ParamKind::EditEnd,
            EventParams::Clipboard(_) => ParamKind::Clipboard,
            EventParams::Scroll(_) => ParamKind::Scroll,
        }
    }

    pub fn workbook(&self) -> &Workbook {
        match self {
            EventParams::Cell(p) => &p.workbook,
            EventParams::Drag(p) => &p.workbook,
            EventParams::EditStart(p) => &p.workbook,
            EventParams::EditChanging(p) => &p.workbook,
            EventParams::EditEnd(p) => &p.workbook,
            EventParams::Clipboard(p) => &p.workbook,
            EventParams::Scroll(p) => &p.workbook,
        }
    }

    pub fn worksheet(&self) -> &Worksheet {
        match self {
            EventParams::Cell(p) => &p.worksheet,
            EventParams::Drag(p) => &p.worksheet,
            EventParams::EditStart(p) => &p.worksheet,
            EventParams::EditChanging(p) => &p.worksheet,
            EventParams::EditEnd(p) => &p.worksheet,
            EventParams::Clipboard(p) => &p.worksheet,
            EventParams::Scroll(p) => &p.worksheet,
        }
    }

    /// Cell coordinates, for records that have them.
    pub fn cell(&self) -> Option<(usize, usize)> {
        match self {
            EventParams::Cell(p) => Some((p.row, p.column)),
            EventParams::Drag(p) => Some((p.row, p.column)),
            EventParams::EditStart(p) => Some((p.row, p.column)),
            EventParams::EditChanging(p) => Some((p.row, p.column)),
            EventParams::EditEnd(p) => Some((p.row, p.column)),
            EventParams::Clipboard(_) | EventParams::Scroll(_) => None,
        }
    }
}

/// Check a record against the kind declared for `name`.
pub fn validate(name: EventName, expected: ParamKind, params: &EventParams) -> Result<(), FacadeError> {
    let found = params.kind();
    if found == expected {
        Ok(())
    } else {
        Err(FacadeError::SchemaMismatch {
            event: name.to_string(),
            expected,
            found,
        })
    }
}

/// Compile-time description of an event: its name and record type.
pub trait EventSpec {
    const NAME: &'static str;
    const KIND: ParamKind;
    type Params: Send + Sync + 'static;

    /// Borrow the concrete record out of a dynamic one.
    fn extract(params: &EventParams) -> Option<&Self::Params>;
}

macro_rules! event_spec {
    ($(#[$meta:meta])* $marker:ident, $kind:ident, $params:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $marker;

        impl EventSpec for $marker {
            const NAME: &'static str = stringify!($marker);
            const KIND: ParamKind = ParamKind::$kind;
            type Params = $params;

            fn extract(params: &EventParams) -> Option<&Self::Params> {
                match params {
                    EventParams::$kind(p) => Some(p),
                    _ => None,
                }
            }
        }
    };
}

event_spec!(BeforeClipboardChange, Clipboard, ClipboardEventParams);
event_spec!(ClipboardChanged, Clipboard, ClipboardEventParams);
event_spec!(BeforeClipboardPaste, Clipboard, ClipboardEventParams);
event_spec!(ClipboardPasted, Clipboard, ClipboardEventParams);
event_spec!(BeforeSheetEditStart, EditStart, EditStartParams);
event_spec!(SheetEditStarted, EditStart, EditStartParams);
event_spec!(SheetEditChanging, EditChanging, EditChangingParams);
event_spec!(BeforeSheetEditEnd, EditEnd, EditEndParams);
event_spec!(SheetEditEnded, EditEnd, EditEndParams);
event_spec!(CellClicked, Cell, CellEventParams);
event_spec!(CellPointerDown, Cell, CellEventParams);
event_spec!(CellPointerUp, Cell, CellEventParams);
event_spec!(CellPointerMove, Cell, CellEventParams);
event_spec!(CellHover, Cell, CellEventParams);
event_spec!(DragOver, Drag, DragEventParams);
event_spec!(Drop, Drag, DragEventParams);
event_spec!(
    /// Viewport scroll of a worksheet.
    Scroll,
    Scroll,
    ScrollEventParams
);
