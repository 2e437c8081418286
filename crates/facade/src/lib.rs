//! Facade layer for spreadsheet UI extensions.
//!
//! A [`FacadeHost`] is built once from an [`Injector`](cellbridge_engine::Injector)
//! and a list of [`Extension`]s. It hands out [`Workbook`] facades; from
//! there, [`Worksheet`], [`Range`] and [`ThreadComment`] facades.
//!
//! Event subscriptions go through the name registry and the dispatch mediator
//! (see [`event`]). Feature methods live on extension traits in [`features`];
//! import [`prelude`] to get all of them.
//!
//! ```ignore
//! use cellbridge_facade::prelude::*;
//!
//! let host = FacadeHost::with_default_extensions(injector)?;
//! let workbook = host.get_active_workbook().unwrap();
//! let handle = workbook.on_cell_click(|p| println!("{} {}", p.row, p.column))?;
//! handle.dispose();
//! ```

pub mod comment;
pub mod error;
pub mod event;
pub mod extension;
pub mod features;
pub mod host;
pub mod range;
pub mod workbook;
pub mod worksheet;

pub use comment::ThreadComment;
pub use error::FacadeError;
pub use event::{EventName, EventNameRegistry, EventParams, EventSpec, ParamKind};
pub use extension::{Extension, ExtensionDescriptor, ExtensionRegistry, FacadeKind, InstallContext};
pub use host::{FacadeHost, FacadeHostBuilder};
pub use range::Range;
pub use workbook::Workbook;
pub use worksheet::Worksheet;

pub mod prelude {
    pub use crate::features::{
        RangeCanvasExt, RangeCommentExt, WorkbookCellEventsExt, WorkbookClipboardExt, WorkbookEditingExt,
        WorkbookSelectionExt, WorksheetCanvasExt,
    };
    pub use crate::{FacadeError, FacadeHost, Range, ThreadComment, Workbook, Worksheet};
    pub use cellbridge_engine::Disposable;
}
