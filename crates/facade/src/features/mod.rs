//! Built-in feature extensions.
//!
//! Each module pairs an [`Extension`](crate::extension::Extension) (member
//! declarations plus event bindings) with the extension traits that put its
//! methods on the facades. Bring a trait into scope to call its methods.

mod canvas;
mod cell_events;
mod clipboard;
mod comments;
mod editing;
mod selection;

pub use canvas::{CanvasExtension, RangeCanvasExt, WorksheetCanvasExt};
pub use cell_events::{CellEventsExtension, WorkbookCellEventsExt};
pub use clipboard::{ClipboardExtension, WorkbookClipboardExt};
pub use comments::{CommentDraft, CommentsExtension, RangeCommentExt};
pub use editing::{EditingExtension, WorkbookEditingExt};
pub use selection::{SelectionExtension, WorkbookSelectionExt};
