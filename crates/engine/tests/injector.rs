use std::sync::Arc;

use cellbridge_config::Settings;
use cellbridge_core::{CellPos, SheetId, UnitId};
use cellbridge_engine::memory::{MemoryEditor, MemoryServices};
use cellbridge_engine::{Injector, InjectorError, SheetCommand, SheetModel, WorkbookModel};

fn workbook() -> WorkbookModel {
    WorkbookModel::new("book", "Budget", vec![SheetModel::new("s1", "Sheet1")])
}

#[test]
fn test_builder_reports_first_missing_service() {
    let err = Injector::builder()
        .editor(Arc::new(MemoryEditor::new()))
        .build()
        .unwrap_err();
    assert_eq!(err, InjectorError::MissingService("render"));
}

#[test]
fn test_memory_services_share_one_registry() {
    let services = MemoryServices::new();
    services.add_workbook(workbook());
    let injector = services.injector(Settings::default()).unwrap();

    let unit = UnitId::new("book");
    assert!(injector.units().get(&unit).is_some());
    assert!(injector.render().get_render(&unit).is_some());
    assert_eq!(injector.settings().max_zoom, 4.0);
}

#[test]
fn test_headless_workbook_has_no_render() {
    let services = MemoryServices::new();
    services.add_headless_workbook(workbook());
    let injector = services.injector(Settings::default()).unwrap();
    assert!(injector.render().get_render(&UnitId::new("book")).is_none());
}

#[test]
fn test_edit_commands_drive_the_editor() {
    let services = MemoryServices::new();
    services.add_workbook(workbook());
    let unit = UnitId::new("book");
    services.editor.set_active_cell(&unit, &SheetId::new("s1"), CellPos::new(0, 0));
    let injector = services.injector(Settings::default()).unwrap();

    let open = SheetCommand::SetCellEditVisible {
        unit_id: unit.clone(),
        visible: true,
        event_type: Default::default(),
        key_code: None,
    };
    assert!(injector.commands().sync_execute(&open));
    assert!(injector.editor().is_editing(&unit));
}
