//! Command vocabulary understood by the command service.
//!
//! Facades never mutate models directly; every change is submitted as a
//! `SheetCommand` and the command service reports success as a `bool`.

use serde::Serialize;

use cellbridge_core::{CommentId, CommentRecord, DeviceInputEventType, KeyCode, SheetId, UnitId};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "id", content = "params")]
pub enum SheetCommand {
    /// Open or close the cell editor.
    #[serde(rename = "sheet.operation.set-cell-edit-visible")]
    SetCellEditVisible {
        unit_id: UnitId,
        visible: bool,
        event_type: DeviceInputEventType,
        key_code: Option<KeyCode>,
    },
    #[serde(rename = "sheet.operation.set-zoom-ratio")]
    SetZoomRatio {
        unit_id: UnitId,
        sheet_id: SheetId,
        zoom_ratio: f64,
    },
    #[serde(rename = "sheet.command.scroll-to-cell")]
    ScrollToCell {
        unit_id: UnitId,
        sheet_id: SheetId,
        row: usize,
        col: usize,
    },
    #[serde(rename = "thread-comment.command.add-comment")]
    AddComment {
        unit_id: UnitId,
        sheet_id: SheetId,
        comment: CommentRecord,
    },
    #[serde(rename = "thread-comment.command.update-comment")]
    UpdateComment {
        unit_id: UnitId,
        sheet_id: SheetId,
        comment_id: CommentId,
        text: String,
    },
    #[serde(rename = "thread-comment.command.delete-comment")]
    DeleteComment {
        unit_id: UnitId,
        sheet_id: SheetId,
        comment_id: CommentId,
    },
}

impl SheetCommand {
    /// Stable command id, as used in logs and the command registry.
    pub fn id(&self) -> &'static str {
        match self {
            Self::SetCellEditVisible { .. } => "sheet.operation.set-cell-edit-visible",
            Self::SetZoomRatio { .. } => "sheet.operation.set-zoom-ratio",
            Self::ScrollToCell { .. } => "sheet.command.scroll-to-cell",
            Self::AddComment { .. } => "thread-comment.command.add-comment",
            Self::UpdateComment { .. } => "thread-comment.command.update-comment",
            Self::DeleteComment { .. } => "thread-comment.command.delete-comment",
        }
    }

    pub fn unit_id(&self) -> &UnitId {
        match self {
            Self::SetCellEditVisible { unit_id, .. }
            | Self::SetZoomRatio { unit_id, .. }
            | Self::ScrollToCell { unit_id, .. }
            | Self::AddComment { unit_id, .. }
            | Self::UpdateComment { unit_id, .. }
            | Self::DeleteComment { unit_id, .. } => unit_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_tag_matches_id() {
        let cmd = SheetCommand::ScrollToCell {
            unit_id: UnitId::new("book"),
            sheet_id: SheetId::new("s1"),
            row: 4,
            col: 2,
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["id"], cmd.id());
        assert_eq!(json["params"]["row"], 4);
        assert_eq!(cmd.unit_id().as_str(), "book");
    }
}
