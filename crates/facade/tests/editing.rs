mod common;

use std::sync::Arc;

use cellbridge_config::Settings;
use cellbridge_core::{CellPos, DeviceInputEventType, KeyCode, SheetId, UnitId};
use cellbridge_engine::SheetCommand;
use cellbridge_facade::event::schema::{BeforeSheetEditEnd, BeforeSheetEditStart, SheetEditEnded, SheetEditStarted};
use cellbridge_facade::prelude::*;
use cellbridge_facade::EventParams;

use common::{fixture, fixture_with, log, Fixture};

fn with_active_cell(fx: &Fixture, row: usize, col: usize) {
    fx.services
        .editor
        .set_active_cell(&UnitId::new("book"), &SheetId::new("s1"), CellPos::new(row, col));
}

#[test]
fn test_start_then_end_resolves_true_even_if_editor_stays_open() {
    let fx = fixture();
    with_active_cell(&fx, 0, 0);
    fx.services.editor.set_defer_close(true);

    assert!(fx.workbook.start_editing());
    assert!(smol::block_on(fx.workbook.end_editing(true)));
    assert!(fx.workbook.is_editing());
}

#[test]
fn test_end_editing_confirmed_reports_actual_outcome() {
    let fx = fixture();
    with_active_cell(&fx, 0, 0);

    fx.services.editor.set_defer_close(true);
    fx.workbook.start_editing();
    assert!(!smol::block_on(fx.workbook.end_editing_confirmed(true)));

    fx.services.editor.set_defer_close(false);
    assert!(smol::block_on(fx.workbook.end_editing_confirmed(true)));
    assert!(!fx.workbook.is_editing());
}

#[test]
fn test_start_editing_without_active_cell_fails() {
    let fx = fixture();
    assert!(!fx.workbook.start_editing());
    // Ending when nothing is open is still reported as done.
    assert!(smol::block_on(fx.workbook.end_editing(false)));
}

#[test]
fn test_edit_commands_carry_input_classification() {
    let fx = fixture();
    with_active_cell(&fx, 2, 2);
    fx.workbook.start_editing();
    smol::block_on(fx.workbook.end_editing(false));

    let unit_id = UnitId::new("book");
    assert_eq!(
        fx.services.commands.executed(),
        vec![
            SheetCommand::SetCellEditVisible {
                unit_id: unit_id.clone(),
                visible: true,
                event_type: DeviceInputEventType::Dblclick,
                key_code: None,
            },
            SheetCommand::SetCellEditVisible {
                unit_id,
                visible: false,
                event_type: DeviceInputEventType::Keyboard,
                key_code: Some(KeyCode::Esc),
            },
        ]
    );
}

#[test]
fn test_lifecycle_events_in_order() {
    let fx = fixture();
    with_active_cell(&fx, 4, 1);
    let seen = log();
    let sink = Arc::clone(&seen);

    let mut handles = Vec::new();
    for name in [
        "BeforeSheetEditStart",
        "SheetEditStarted",
        "SheetEditChanging",
        "BeforeSheetEditEnd",
        "SheetEditEnded",
    ] {
        let sink = Arc::clone(&sink);
        handles.push(
            fx.workbook
                .add_event(name, move |params: &EventParams| {
                    sink.lock().push((name, params.cell()));
                })
                .unwrap(),
        );
    }

    fx.workbook.start_editing();
    fx.services.editor.type_text(&UnitId::new("book"), "=SUM(A1:A3)");
    smol::block_on(fx.workbook.end_editing(true));

    let names: Vec<_> = seen.lock().iter().map(|(n, _)| *n).collect();
    assert_eq!(
        names,
        vec![
            "BeforeSheetEditStart",
            "SheetEditStarted",
            "SheetEditChanging",
            "BeforeSheetEditEnd",
            "SheetEditEnded",
        ]
    );
    assert!(seen.lock().iter().all(|(_, cell)| *cell == Some((4, 1))));
}

#[test]
fn test_before_start_veto_blocks_editing() {
    let fx = fixture();
    with_active_cell(&fx, 0, 0);
    let veto = fx.workbook.on::<BeforeSheetEditStart>(|p| p.cancel()).unwrap();

    assert!(!fx.workbook.start_editing());
    assert!(!fx.workbook.is_editing());

    veto.dispose();
    assert!(fx.workbook.start_editing());
}

#[test]
fn test_before_end_veto_keeps_editor_open() {
    let fx = fixture();
    with_active_cell(&fx, 0, 0);
    let _veto = fx.workbook.on::<BeforeSheetEditEnd>(|p| p.cancel()).unwrap();

    fx.workbook.start_editing();
    assert!(smol::block_on(fx.workbook.end_editing(true)));
    assert!(!smol::block_on(fx.workbook.end_editing_confirmed(true)));
    assert!(fx.workbook.is_editing());
}

#[test]
fn test_ended_carries_value_and_confirmation() {
    let fx = fixture();
    with_active_cell(&fx, 1, 1);
    let seen = log();
    let sink = Arc::clone(&seen);
    let _ended = fx
        .workbook
        .on::<SheetEditEnded>(move |p| sink.lock().push((p.value.clone(), p.is_confirm, p.key_code)))
        .unwrap();

    let unit = UnitId::new("book");
    fx.workbook.start_editing();
    fx.services.editor.type_text(&unit, "kept");
    smol::block_on(fx.workbook.end_editing(true));

    fx.workbook.start_editing();
    fx.services.editor.type_text(&unit, "thrown away");
    smol::block_on(fx.workbook.end_editing(false));

    assert_eq!(
        *seen.lock(),
        vec![
            (Some("kept".to_string()), true, Some(KeyCode::Enter)),
            (None, false, Some(KeyCode::Esc)),
        ]
    );
}

#[test]
fn test_started_reports_double_click() {
    let fx = fixture();
    with_active_cell(&fx, 0, 3);
    let seen = log();
    let sink = Arc::clone(&seen);
    let _started = fx
        .workbook
        .on::<SheetEditStarted>(move |p| sink.lock().push((p.event_type, p.worksheet.name())))
        .unwrap();

    fx.workbook.start_editing();
    assert_eq!(*seen.lock(), vec![(DeviceInputEventType::Dblclick, "Sheet1".to_string())]);
}

#[test]
fn test_configured_tick_count_still_resolves() {
    let fx = fixture_with(Settings {
        end_edit_ticks: 5,
        ..Settings::default()
    });
    with_active_cell(&fx, 0, 0);
    fx.workbook.start_editing();
    assert!(smol::block_on(fx.workbook.end_editing_confirmed(true)));
}
