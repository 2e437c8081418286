use std::fmt;

use smol::future::{Boxed, FutureExt};

use cellbridge_core::{CellPos, CommentId, CommentRecord, SheetId, ThreadId};
use cellbridge_engine::SheetCommand;

use crate::extension::FacadeKind;
use crate::range::Range;
use crate::workbook::Workbook;

/// Facade over one stored comment (a thread root or a reply).
///
/// Holds a snapshot of the record taken when the handle was created;
/// `update` and `delete` go through the command service and do not change the
/// snapshot.
#[derive(Clone)]
pub struct ThreadComment {
    workbook: Workbook,
    record: CommentRecord,
}

impl fmt::Debug for ThreadComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadComment")
            .field("id", &self.record.id)
            .field("thread_id", &self.record.thread_id)
            .field("anchor", &self.record.anchor)
            .finish()
    }
}

impl PartialEq for ThreadComment {
    fn eq(&self, other: &Self) -> bool {
        self.workbook == other.workbook && self.record == other.record
    }
}

impl ThreadComment {
    pub(crate) fn new(workbook: Workbook, record: CommentRecord) -> Self {
        Self { workbook, record }
    }

    pub fn id(&self) -> &CommentId {
        &self.record.id
    }

    pub fn thread_id(&self) -> &ThreadId {
        &self.record.thread_id
    }

    pub fn parent_id(&self) -> Option<&CommentId> {
        self.record.parent_id.as_ref()
    }

    pub fn sheet_id(&self) -> &SheetId {
        &self.record.sheet_id
    }

    /// Anchor cell in A1 notation.
    pub fn anchor(&self) -> &str {
        &self.record.anchor
    }

    pub fn content(&self) -> &str {
        &self.record.text
    }

    pub fn author(&self) -> &str {
        &self.record.author
    }

    pub fn created_at(&self) -> &str {
        &self.record.created_at
    }

    pub fn is_root(&self) -> bool {
        self.record.is_root()
    }

    pub fn record(&self) -> &CommentRecord {
        &self.record
    }

    /// The anchor cell, if its sheet still exists.
    pub fn get_range(&self) -> Option<Range> {
        let pos = CellPos::from_a1(&self.record.anchor)?;
        let worksheet = self.workbook.get_sheet_by_id(&self.record.sheet_id)?;
        Some(worksheet.get_cell(pos.row, pos.col))
    }

    /// Replies of a thread root, in insertion order. Empty for replies.
    pub fn replies(&self) -> Vec<ThreadComment> {
        if !self.is_root() {
            return Vec::new();
        }
        self.workbook
            .injector()
            .comments()
            .thread(&self.record.unit_id, &self.record.sheet_id, &self.record.thread_id)
            .into_iter()
            .filter(|c| !c.is_root())
            .map(|c| ThreadComment::new(self.workbook.clone(), c))
            .collect()
    }

    /// Delete this comment; deleting a root removes the whole thread.
    pub fn delete(&self) -> Boxed<bool> {
        self.workbook.injector().commands().execute(SheetCommand::DeleteComment {
            unit_id: self.record.unit_id.clone(),
            sheet_id: self.record.sheet_id.clone(),
            comment_id: self.record.id.clone(),
        })
    }

    pub fn update(&self, content: &str) -> Boxed<bool> {
        if content.is_empty() {
            log::debug!("refusing to blank comment {}", self.record.id);
            return async { false }.boxed();
        }
        self.workbook.injector().commands().execute(SheetCommand::UpdateComment {
            unit_id: self.record.unit_id.clone(),
            sheet_id: self.record.sheet_id.clone(),
            comment_id: self.record.id.clone(),
            text: content.to_string(),
        })
    }

    pub fn supports(&self, member: &str) -> bool {
        self.workbook.host().extensions.supports(FacadeKind::ThreadComment, member)
    }
}
