mod common;

use cellbridge_config::Settings;
use cellbridge_core::CommentId;
use cellbridge_facade::features::CommentDraft;
use cellbridge_facade::prelude::*;

use common::{fixture, fixture_with};

const ADD: &str = "thread-comment.command.add-comment";
const DELETE: &str = "thread-comment.command.delete-comment";

fn sheet1(fx: &common::Fixture) -> Worksheet {
    fx.workbook.get_sheet_by_name("Sheet1").unwrap()
}

#[test]
fn test_add_then_get_returns_same_text() {
    let fx = fixture();
    let cell = sheet1(&fx).get_cell(1, 1);

    assert!(smol::block_on(cell.add_comment("check this total")));
    let comment = cell.get_comment().unwrap();
    assert_eq!(comment.content(), "check this total");
    assert_eq!(comment.anchor(), "B2");
    assert!(comment.is_root());
    assert_eq!(comment.parent_id(), None);
}

#[test]
fn test_second_comment_joins_thread_as_reply() {
    let fx = fixture();
    let cell = sheet1(&fx).get_cell(0, 0);

    smol::block_on(cell.add_comment("first"));
    smol::block_on(cell.add_comment("second"));

    let root = cell.get_comment().unwrap();
    let replies = root.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].content(), "second");
    assert_eq!(replies[0].thread_id(), root.thread_id());
    assert_eq!(replies[0].parent_id(), Some(root.id()));
    assert!(replies[0].replies().is_empty());
}

#[test]
fn test_get_comments_scans_row_major() {
    let fx = fixture();
    let sheet = sheet1(&fx);
    smol::block_on(sheet.get_cell(2, 0).add_comment("A3"));
    smol::block_on(sheet.get_cell(0, 2).add_comment("C1"));
    smol::block_on(sheet.get_cell(1, 1).add_comment("B2"));

    let range = sheet.get_range_a1("A1:C3").unwrap();
    let texts: Vec<_> = range.get_comments().iter().map(|c| c.content().to_string()).collect();
    assert_eq!(texts, vec!["C1", "B2", "A3"]);
    assert_eq!(range.get_comment().unwrap().content(), "C1");
}

#[test]
fn test_clear_comments_on_empty_range_issues_nothing() {
    let fx = fixture();
    let range = sheet1(&fx).get_range(0, 0, 9, 9);

    assert!(smol::block_on(range.clear_comments()));
    assert!(smol::block_on(range.clear_comment()));
    assert_eq!(fx.services.commands.count(DELETE), 0);
}

#[test]
fn test_clear_comments_deletes_every_thread() {
    let fx = fixture();
    let sheet = sheet1(&fx);
    smol::block_on(sheet.get_cell(0, 0).add_comment("a"));
    smol::block_on(sheet.get_cell(0, 0).add_comment("a reply"));
    smol::block_on(sheet.get_cell(3, 3).add_comment("b"));
    smol::block_on(sheet.get_cell(8, 8).add_comment("outside"));

    let range = sheet.get_range(0, 0, 4, 4);
    assert!(smol::block_on(range.clear_comments()));
    assert_eq!(fx.services.commands.count(DELETE), 2);
    assert!(range.get_comments().is_empty());
    assert_eq!(fx.services.comments.len(), 1);
}

#[test]
fn test_clear_comments_reports_failed_delete() {
    let fx = fixture();
    let sheet = sheet1(&fx);
    smol::block_on(sheet.get_cell(0, 0).add_comment("stays"));
    fx.services.commands.fail_command(DELETE);

    assert!(!smol::block_on(sheet.get_cell(0, 0).clear_comments()));
    assert!(sheet.get_cell(0, 0).get_comment().is_some());
}

#[test]
fn test_clear_comment_removes_only_first() {
    let fx = fixture();
    let sheet = sheet1(&fx);
    smol::block_on(sheet.get_cell(0, 1).add_comment("first"));
    smol::block_on(sheet.get_cell(1, 0).add_comment("second"));

    let range = sheet.get_range(0, 0, 1, 1);
    assert!(smol::block_on(range.clear_comment()));
    let left: Vec<_> = range.get_comments().iter().map(|c| c.content().to_string()).collect();
    assert_eq!(left, vec!["second"]);
}

#[test]
fn test_failed_add_resolves_false() {
    let fx = fixture();
    fx.services.commands.fail_command(ADD);
    let cell = sheet1(&fx).get_cell(0, 0);
    assert!(!smol::block_on(cell.add_comment("lost")));
    assert!(cell.get_comment().is_none());
}

#[test]
fn test_update_and_delete_through_handle() {
    let fx = fixture();
    let cell = sheet1(&fx).get_cell(5, 5);
    smol::block_on(cell.add_comment("draft"));

    let comment = cell.get_comment().unwrap();
    assert!(smol::block_on(comment.update("final")));
    assert!(!smol::block_on(comment.update("")));
    assert_eq!(cell.get_comment().unwrap().content(), "final");

    assert!(smol::block_on(comment.delete()));
    assert!(cell.get_comment().is_none());
    assert_eq!(comment.get_range().unwrap().a1(), "F6");
}

#[test]
fn test_author_defaults_from_settings() {
    let fx = fixture_with(Settings {
        default_author: "reviewer".to_string(),
        ..Settings::default()
    });
    let cell = fx.workbook.get_sheet_by_name("Sheet2").unwrap().get_cell(0, 0);
    smol::block_on(cell.add_comment("note"));
    assert_eq!(cell.get_comment().unwrap().author(), "reviewer");
}

#[test]
fn test_add_record_keeps_caller_fields() {
    let fx = fixture();
    let cell = sheet1(&fx).get_cell(0, 0);
    let draft = CommentDraft {
        id: Some(CommentId::new("c-42")),
        author: Some("ops".to_string()),
        ..CommentDraft::new("pinned")
    };

    assert!(smol::block_on(cell.add_comment_record(draft)));
    let comment = cell.get_comment().unwrap();
    assert_eq!(comment.id(), &CommentId::new("c-42"));
    assert_eq!(comment.author(), "ops");
    assert!(!comment.created_at().is_empty());
}

#[test]
fn test_comments_are_per_sheet() {
    let fx = fixture();
    smol::block_on(sheet1(&fx).get_cell(0, 0).add_comment("sheet one"));
    let other = fx.workbook.get_sheet_by_name("Sheet2").unwrap();
    assert!(other.get_cell(0, 0).get_comment().is_none());
}
