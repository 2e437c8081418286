use parking_lot::RwLock;

use cellbridge_core::{CellPos, CommentId, CommentRecord, SheetId, ThreadId, UnitId};

use crate::services::CommentModel;

/// Comment store in insertion order.
#[derive(Default)]
pub struct MemoryCommentModel {
    comments: RwLock<Vec<CommentRecord>>,
}

impl MemoryCommentModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.comments.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.read().is_empty()
    }

    /// Store a comment. Fails on a duplicate id or an anchor that is not A1.
    pub fn insert(&self, record: CommentRecord) -> bool {
        if CellPos::from_a1(&record.anchor).is_none() {
            return false;
        }
        let mut comments = self.comments.write();
        if comments.iter().any(|c| c.id == record.id) {
            return false;
        }
        comments.push(record);
        true
    }

    pub fn update_text(&self, unit_id: &UnitId, sheet_id: &SheetId, comment_id: &CommentId, text: &str) -> bool {
        let mut comments = self.comments.write();
        match comments
            .iter_mut()
            .find(|c| &c.unit_id == unit_id && &c.sheet_id == sheet_id && &c.id == comment_id)
        {
            Some(comment) => {
                comment.text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a comment. Removing a root removes its whole thread.
    pub fn remove(&self, unit_id: &UnitId, sheet_id: &SheetId, comment_id: &CommentId) -> bool {
        let mut comments = self.comments.write();
        let Some(target) = comments
            .iter()
            .find(|c| &c.unit_id == unit_id && &c.sheet_id == sheet_id && &c.id == comment_id)
            .cloned()
        else {
            return false;
        };

        if target.is_root() {
            comments.retain(|c| !(c.unit_id == target.unit_id && c.sheet_id == target.sheet_id && c.thread_id == target.thread_id));
        } else {
            comments.retain(|c| c.id != target.id);
        }
        true
    }
}

impl CommentModel for MemoryCommentModel {
    fn comment_id_at(&self, unit_id: &UnitId, sheet_id: &SheetId, row: usize, col: usize) -> Option<CommentId> {
        let anchor = CellPos::new(row, col);
        self.comments
            .read()
            .iter()
            .find(|c| {
                &c.unit_id == unit_id
                    && &c.sheet_id == sheet_id
                    && c.is_root()
                    && CellPos::from_a1(&c.anchor) == Some(anchor)
            })
            .map(|c| c.id.clone())
    }

    fn get_comment(&self, unit_id: &UnitId, sheet_id: &SheetId, comment_id: &CommentId) -> Option<CommentRecord> {
        self.comments
            .read()
            .iter()
            .find(|c| &c.unit_id == unit_id && &c.sheet_id == sheet_id && &c.id == comment_id)
            .cloned()
    }

    fn thread(&self, unit_id: &UnitId, sheet_id: &SheetId, thread_id: &ThreadId) -> Vec<CommentRecord> {
        let comments = self.comments.read();
        let in_thread = |c: &&CommentRecord| &c.unit_id == unit_id && &c.sheet_id == sheet_id && &c.thread_id == thread_id;
        comments
            .iter()
            .filter(in_thread)
            .filter(|c| c.is_root())
            .chain(comments.iter().filter(in_thread).filter(|c| !c.is_root()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, thread: &str, parent: Option<&str>, anchor: &str) -> CommentRecord {
        CommentRecord {
            id: CommentId::new(id),
            thread_id: ThreadId::new(thread),
            parent_id: parent.map(CommentId::new),
            unit_id: UnitId::new("book"),
            sheet_id: SheetId::new("s1"),
            anchor: anchor.to_string(),
            text: format!("text of {id}"),
            author: String::new(),
            created_at: String::new(),
            resolved: false,
        }
    }

    #[test]
    fn test_lookup_by_cell_finds_root() {
        let model = MemoryCommentModel::new();
        assert!(model.insert(record("c1", "t1", None, "B2")));
        assert!(model.insert(record("c2", "t1", Some("c1"), "B2")));

        let unit = UnitId::new("book");
        let sheet = SheetId::new("s1");
        assert_eq!(model.comment_id_at(&unit, &sheet, 1, 1), Some(CommentId::new("c1")));
        assert_eq!(model.comment_id_at(&unit, &sheet, 0, 0), None);
    }

    #[test]
    fn test_thread_lists_root_first() {
        let model = MemoryCommentModel::new();
        model.insert(record("reply", "t1", Some("root"), "A1"));
        model.insert(record("root", "t1", None, "A1"));
        let ids: Vec<_> = model
            .thread(&UnitId::new("book"), &SheetId::new("s1"), &ThreadId::new("t1"))
            .into_iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, vec!["root", "reply"]);
    }

    #[test]
    fn test_removing_root_removes_thread() {
        let model = MemoryCommentModel::new();
        model.insert(record("c1", "t1", None, "A1"));
        model.insert(record("c2", "t1", Some("c1"), "A1"));
        model.insert(record("c3", "t2", None, "C3"));

        assert!(model.remove(&UnitId::new("book"), &SheetId::new("s1"), &CommentId::new("c1")));
        assert_eq!(model.len(), 1);
        assert!(!model.remove(&UnitId::new("book"), &SheetId::new("s1"), &CommentId::new("c1")));
    }

    #[test]
    fn test_rejects_duplicate_and_bad_anchor() {
        let model = MemoryCommentModel::new();
        assert!(model.insert(record("c1", "t1", None, "A1")));
        assert!(!model.insert(record("c1", "t9", None, "B1")));
        assert!(!model.insert(record("c2", "t2", None, "not-a-cell")));
    }
}
