#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;

use cellbridge_config::Settings;
use cellbridge_core::UnitId;
use cellbridge_engine::memory::MemoryServices;
use cellbridge_engine::{SheetModel, WorkbookModel};
use cellbridge_facade::{FacadeHost, Workbook};

pub struct Fixture {
    pub services: MemoryServices,
    pub host: FacadeHost,
    pub workbook: Workbook,
}

pub fn budget() -> WorkbookModel {
    WorkbookModel::new(
        "book",
        "Budget",
        vec![SheetModel::new("s1", "Sheet1"), SheetModel::new("s2", "Sheet2")],
    )
}

pub fn fixture() -> Fixture {
    fixture_with(Settings::default())
}

pub fn fixture_with(settings: Settings) -> Fixture {
    let services = MemoryServices::new();
    services.add_workbook(budget());
    let host = FacadeHost::with_default_extensions(services.injector(settings).unwrap()).unwrap();
    let workbook = host.get_workbook(&UnitId::new("book")).unwrap();
    Fixture {
        services,
        host,
        workbook,
    }
}

/// Shared record of what callbacks saw.
pub fn log<T: Send + 'static>() -> Arc<Mutex<Vec<T>>> {
    Arc::new(Mutex::new(Vec::new()))
}
