mod common;

use std::sync::Arc;

use cellbridge_config::{DuplicatePolicy, Settings};
use cellbridge_engine::memory::MemoryServices;
use cellbridge_engine::occurrence::CellPointerOccurrence;
use cellbridge_engine::Injector;
use cellbridge_facade::event::dispatch::{signal_binder, DispatchContext};
use cellbridge_facade::event::CellEventParams;
use cellbridge_facade::extension::{Extension, FacadeKind, InstallContext};
use cellbridge_facade::features::{CanvasExtension, CommentsExtension, SelectionExtension};
use cellbridge_facade::prelude::*;
use cellbridge_facade::{EventNameRegistry, EventParams, ParamKind};

use common::{budget, fixture, log};

fn injector(settings: Settings) -> (MemoryServices, Injector) {
    let services = MemoryServices::new();
    services.add_workbook(budget());
    let injector = services.injector(settings).unwrap();
    (services, injector)
}

/// Adds a second `get_comment` to ranges.
struct NotesExtension;

impl Extension for NotesExtension {
    fn name(&self) -> &'static str {
        "notes"
    }

    fn members(&self) -> Vec<(FacadeKind, Vec<&'static str>)> {
        vec![(FacadeKind::Range, vec!["get_note", "get_comment"])]
    }
}

/// Claims a member every workbook facade already has.
struct ShadowAddEvent;

impl Extension for ShadowAddEvent {
    fn name(&self) -> &'static str {
        "shadow"
    }

    fn members(&self) -> Vec<(FacadeKind, Vec<&'static str>)> {
        vec![(FacadeKind::Workbook, vec!["add_event"])]
    }
}

/// Registers a new event name at install time.
struct RowHeaderExtension;

impl Extension for RowHeaderExtension {
    fn name(&self) -> &'static str {
        "row-header"
    }

    fn members(&self) -> Vec<(FacadeKind, Vec<&'static str>)> {
        vec![(FacadeKind::Worksheet, vec!["on_row_header_click"])]
    }

    fn install(&self, ctx: &mut InstallContext<'_>) -> Result<(), FacadeError> {
        ctx.provide(
            "RowHeaderClicked",
            ParamKind::Cell,
            signal_binder(
                |inj: &Injector| inj.pointer().clicked_cell().clone(),
                |ctx: &DispatchContext, o: &Option<CellPointerOccurrence>| {
                    let o = o.as_ref().filter(|o| o.col == 0)?;
                    let (workbook, worksheet) = ctx.resolve(&o.unit_id, &o.sheet_id)?;
                    Some(EventParams::Cell(CellEventParams {
                        workbook,
                        worksheet,
                        row: o.row,
                        column: o.col,
                    }))
                },
            ),
        )?;
        Ok(())
    }
}

#[test]
fn test_default_extensions_install_in_order() {
    let fx = fixture();
    assert_eq!(
        fx.host.extensions(),
        vec!["editing", "clipboard", "canvas", "selection", "cell-events", "comments"]
    );
    assert_eq!(fx.host.supported_events().len(), 17);
    assert!(fx.host.extension_table().is_sealed());
}

#[test]
fn test_capability_queries() {
    let fx = fixture();
    let sheet = fx.workbook.get_active_sheet().unwrap();
    let range = sheet.get_cell(0, 0);

    assert!(fx.workbook.supports("start_editing"));
    assert!(fx.workbook.supports("on_cell_click"));
    assert!(sheet.supports("zoom"));
    assert!(range.supports("add_comment"));
    assert!(range.supports("get_cell_rect"));
    assert!(!range.supports("freeze_rows"));
    assert_eq!(
        fx.host.extension_table().provider(FacadeKind::Range, "clear_comments"),
        Some("comments")
    );
}

#[test]
fn test_partial_host_only_knows_installed_members() {
    let (_services, injector) = injector(Settings::default());
    let host = FacadeHost::builder(injector)
        .extension(SelectionExtension)
        .build()
        .unwrap();
    let workbook = host.get_active_workbook().unwrap();
    let sheet = workbook.get_active_sheet().unwrap();

    assert!(workbook.supports("disable_selection"));
    assert!(!sheet.supports("zoom"));
    assert_eq!(
        workbook.add_event("Scroll", |_| {}).unwrap_err(),
        FacadeError::UnsupportedEvent("Scroll".to_string())
    );
    assert!(host.supported_events().is_empty());
}

#[test]
fn test_duplicate_member_fails_build() {
    let (_services, injector) = injector(Settings::default());
    let err = FacadeHost::builder(injector)
        .extension(CommentsExtension)
        .extension(NotesExtension)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        FacadeError::DuplicateMember {
            facade: FacadeKind::Range,
            member: "get_comment".to_string(),
            existing: "comments",
        }
    );
}

#[test]
fn test_duplicate_member_replaced_under_last_writer_wins() {
    let (_services, injector) = injector(Settings {
        duplicate_policy: DuplicatePolicy::LastWriterWins,
        ..Settings::default()
    });
    let host = FacadeHost::builder(injector)
        .extension(CommentsExtension)
        .extension(NotesExtension)
        .build()
        .unwrap();
    let table = host.extension_table();
    assert_eq!(table.provider(FacadeKind::Range, "get_comment"), Some("notes"));
    assert_eq!(table.provider(FacadeKind::Range, "get_comments"), Some("comments"));
}

#[test]
fn test_base_member_not_replaced_under_last_writer_wins() {
    let (_services, injector) = injector(Settings {
        duplicate_policy: DuplicatePolicy::LastWriterWins,
        ..Settings::default()
    });
    let err = FacadeHost::builder(injector)
        .extension(ShadowAddEvent)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        FacadeError::DuplicateMember {
            facade: FacadeKind::Workbook,
            member: "add_event".to_string(),
            existing: "base",
        }
    );
}

#[test]
fn test_same_extension_twice_is_rejected() {
    let (_services, injector) = injector(Settings::default());
    let err = FacadeHost::builder(injector)
        .extension(CanvasExtension)
        .extension(CanvasExtension)
        .build()
        .unwrap_err();
    assert_eq!(err, FacadeError::DuplicateExtension("canvas"));
}

#[test]
fn test_extension_registers_new_event() {
    let (services, injector) = injector(Settings::default());
    let host = FacadeHost::builder(injector)
        .default_extensions()
        .extension(RowHeaderExtension)
        .build()
        .unwrap();
    let workbook = host.get_active_workbook().unwrap();
    assert!(workbook.get_active_sheet().unwrap().supports("on_row_header_click"));

    let seen = log();

    let sink = Arc::clone(&seen);
    let _handle = workbook
        .add_event("RowHeaderClicked", move |p: &EventParams| sink.lock().push(p.cell()))
        .unwrap();
    services.pointer.click(Some(CellPointerOccurrence::new("book", "s1", 4, 3)));
    services.pointer.click(Some(CellPointerOccurrence::new("book", "s1", 6, 0)));

    assert_eq!(*seen.lock(), vec![Some((6, 0))]);
    assert_eq!(host.registry().kind_of(host.registry().resolve("RowHeaderClicked").unwrap()), Some(ParamKind::Cell));
}

#[test]
fn test_hosts_can_share_the_global_registry() {
    let (_a, first) = injector(Settings::default());
    let (_b, second) = injector(Settings::default());

    let host_a = FacadeHost::builder(first)
        .registry(EventNameRegistry::global())
        .extension(RowHeaderExtension)
        .build()
        .unwrap();
    let host_b = FacadeHost::builder(second)
        .registry(EventNameRegistry::global())
        .build()
        .unwrap();

    assert!(Arc::ptr_eq(host_a.registry(), host_b.registry()));
    assert!(host_b.registry().contains("RowHeaderClicked"));
    // Known everywhere, but only host_a has a source for it.
    let workbook = host_b.get_active_workbook().unwrap();
    assert_eq!(
        workbook.add_event("RowHeaderClicked", |_| {}).unwrap_err(),
        FacadeError::UnsupportedEvent("RowHeaderClicked".to_string())
    );
}
