use smol::future::{Boxed, FutureExt};

use cellbridge_core::{CommentId, CommentRecord, ThreadId};
use cellbridge_engine::SheetCommand;

use crate::comment::ThreadComment;
use crate::extension::{Extension, FacadeKind};
use crate::range::Range;

/// Threaded cell comments on ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentsExtension;

impl Extension for CommentsExtension {
    fn name(&self) -> &'static str {
        "comments"
    }

    fn members(&self) -> Vec<(FacadeKind, Vec<&'static str>)> {
        vec![
            (
                FacadeKind::Range,
                vec![
                    "get_comment",
                    "get_comments",
                    "add_comment",
                    "add_comment_record",
                    "clear_comment",
                    "clear_comments",
                ],
            ),
            (FacadeKind::ThreadComment, vec!["get_range", "replies", "delete", "update"]),
        ]
    }
}

/// A comment to add. Missing fields are filled in by
/// [`RangeCommentExt::add_comment_record`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentDraft {
    pub id: Option<CommentId>,
    /// Thread to reply to. When unset, the comment joins the thread already
    /// anchored at the cell, or starts a new one.
    pub thread_id: Option<ThreadId>,
    pub text: String,
    pub author: Option<String>,
}

impl CommentDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

pub trait RangeCommentExt {
    /// First comment in the range, scanning row by row.
    fn get_comment(&self) -> Option<ThreadComment>;

    /// Every thread root in the range, row by row.
    fn get_comments(&self) -> Vec<ThreadComment>;

    /// Comment the range's top-left cell. An existing thread at that cell is
    /// continued, with its root as parent.
    fn add_comment(&self, content: &str) -> Boxed<bool>;

    fn add_comment_record(&self, draft: CommentDraft) -> Boxed<bool>;

    /// Delete the first comment. Resolves `true` when there is none.
    fn clear_comment(&self) -> Boxed<bool>;

    /// Delete every comment; `true` only if every delete succeeded.
    fn clear_comments(&self) -> Boxed<bool>;
}

fn comments_in(range: &Range) -> impl Iterator<Item = CommentRecord> + '_ {
    let unit_id = range.workbook().unit_id();
    let sheet_id = range.worksheet().sheet_id();
    let model = range.workbook().injector().comments();
    let cells: Vec<_> = range.range_ref().cells().collect();
    cells.into_iter().filter_map(move |pos| {
        let id = model.comment_id_at(unit_id, sheet_id, pos.row, pos.col)?;
        model.get_comment(unit_id, sheet_id, &id)
    })
}

fn delete_command(record: &CommentRecord) -> SheetCommand {
    SheetCommand::DeleteComment {
        unit_id: record.unit_id.clone(),
        sheet_id: record.sheet_id.clone(),
        comment_id: record.id.clone(),
    }
}

impl RangeCommentExt for Range {
    fn get_comment(&self) -> Option<ThreadComment> {
        comments_in(self)
            .next()
            .map(|record| ThreadComment::new(self.workbook().clone(), record))
    }

    fn get_comments(&self) -> Vec<ThreadComment> {
        comments_in(self)
            .map(|record| ThreadComment::new(self.workbook().clone(), record))
            .collect()
    }

    fn add_comment(&self, content: &str) -> Boxed<bool> {
        self.add_comment_record(CommentDraft::new(content))
    }

    fn add_comment_record(&self, draft: CommentDraft) -> Boxed<bool> {
        let workbook = self.workbook();
        let unit_id = workbook.unit_id().clone();
        let sheet_id = self.worksheet().sheet_id().clone();
        let anchor = self.range_ref().top_left();
        let model = workbook.injector().comments();

        let existing = model
            .comment_id_at(&unit_id, &sheet_id, anchor.row, anchor.col)
            .and_then(|id| model.get_comment(&unit_id, &sheet_id, &id));
        let (thread_id, parent_id) = match (draft.thread_id, existing) {
            (Some(thread_id), Some(root)) if root.thread_id == thread_id => (thread_id, Some(root.id)),
            (Some(thread_id), _) => (thread_id, None),
            (None, Some(root)) => (root.thread_id, Some(root.id)),
            (None, None) => (ThreadId::generate(), None),
        };

        let author = draft
            .author
            .unwrap_or_else(|| workbook.injector().settings().default_author.clone());
        let comment = CommentRecord {
            id: draft.id.unwrap_or_else(CommentId::generate),
            thread_id,
            parent_id,
            unit_id: unit_id.clone(),
            sheet_id: sheet_id.clone(),
            anchor: anchor.to_a1(),
            text: draft.text,
            author,
            created_at: CommentRecord::now_timestamp(),
            resolved: false,
        };
        log::debug!("adding comment {} at {}", comment.id, comment.anchor);
        workbook.injector().commands().execute(SheetCommand::AddComment {
            unit_id,
            sheet_id,
            comment,
        })
    }

    fn clear_comment(&self) -> Boxed<bool> {
        match comments_in(self).next() {
            Some(record) => self.workbook().injector().commands().execute(delete_command(&record)),
            None => async { true }.boxed(),
        }
    }

    fn clear_comments(&self) -> Boxed<bool> {
        let commands = self.workbook().injector().commands();
        let pending: Vec<Boxed<bool>> = comments_in(self)
            .map(|record| commands.execute(delete_command(&record)))
            .collect();
        async move {
            let mut all_deleted = true;
            for delete in pending {
                all_deleted &= delete.await;
            }
            all_deleted
        }
        .boxed()
    }
}
