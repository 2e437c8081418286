//! Shared value types for the cellbridge facade layer.
//!
//! Everything here is plain data: identifiers, cell coordinates, ranges,
//! input classification and the records exchanged with external services.

pub mod cell;
pub mod comment;
pub mod ids;
pub mod input;
pub mod viewport;

pub use cell::{col_to_letters, CellPos, RangeRef};
pub use comment::CommentRecord;
pub use ids::{CommentId, SheetId, ThreadId, UnitId};
pub use input::{DeviceInputEventType, KeyCode};
pub use viewport::{CellRect, ScrollState};
