use std::fmt;
use std::sync::Arc;

use cellbridge_core::{SheetId, UnitId};
use cellbridge_engine::{Disposable, Injector, WorkbookModel};

use crate::error::FacadeError;
use crate::event::dispatch::DispatchContext;
use crate::event::schema::{EventParams, EventSpec};
use crate::extension::FacadeKind;
use crate::host::HostShared;
use crate::worksheet::Worksheet;

/// Facade over one workbook unit.
///
/// Cheap to clone; every clone refers to the same workbook. Feature methods
/// come from the extension traits in [`crate::features`].
#[derive(Clone)]
pub struct Workbook {
    host: Arc<HostShared>,
    model: Arc<WorkbookModel>,
}

impl fmt::Debug for Workbook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workbook")
            .field("unit_id", self.unit_id())
            .field("name", &self.name())
            .finish()
    }
}

impl PartialEq for Workbook {
    fn eq(&self, other: &Self) -> bool {
        self.unit_id() == other.unit_id()
    }
}

impl Workbook {
    pub(crate) fn new(host: Arc<HostShared>, model: Arc<WorkbookModel>) -> Self {
        Self { host, model }
    }

    pub fn unit_id(&self) -> &UnitId {
        self.model.unit_id()
    }

    pub fn name(&self) -> &str {
        self.model.name()
    }

    pub fn injector(&self) -> &Injector {
        &self.host.injector
    }

    pub fn model(&self) -> &Arc<WorkbookModel> {
        &self.model
    }

    pub fn get_sheets(&self) -> Vec<Worksheet> {
        self.model
            .sheets()
            .into_iter()
            .map(|sheet| Worksheet::new(self.clone(), sheet.id))
            .collect()
    }

    pub fn get_active_sheet(&self) -> Option<Worksheet> {
        let sheet = self.model.active_sheet()?;
        Some(Worksheet::new(self.clone(), sheet.id))
    }

    pub fn get_sheet_by_id(&self, sheet_id: &SheetId) -> Option<Worksheet> {
        let sheet = self.model.sheet(sheet_id)?;
        Some(Worksheet::new(self.clone(), sheet.id))
    }

    pub fn get_sheet_by_name(&self, name: &str) -> Option<Worksheet> {
        let sheet = self.model.sheet_by_name(name)?;
        Some(Worksheet::new(self.clone(), sheet.id))
    }

    /// Subscribe to an event by name.
    ///
    /// Fails with `UnknownEvent` for names never registered and with
    /// `UnsupportedEvent` for names no installed extension provides.
    pub fn add_event<F>(&self, name: &str, callback: F) -> Result<Disposable, FacadeError>
    where
        F: Fn(&EventParams) + Send + Sync + 'static,
    {
        let ctx = DispatchContext::new(self.clone());
        self.host.mediator.subscribe(name, &ctx, Arc::new(callback))
    }

    /// Subscribe with the event's concrete parameter record.
    pub fn on<E: EventSpec + 'static>(
        &self,
        callback: impl Fn(&E::Params) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError> {
        let registry = self.host.mediator.registry();
        let name = registry.resolve(E::NAME)?;
        if let Some(found) = registry.kind_of(name) {
            if found != E::KIND {
                return Err(FacadeError::SchemaMismatch {
                    event: name.to_string(),
                    expected: E::KIND,
                    found,
                });
            }
        }
        self.add_event(E::NAME, move |params: &EventParams| {
            if let Some(params) = E::extract(params) {
                callback(params);
            }
        })
    }

    pub fn supports(&self, member: &str) -> bool {
        self.host.extensions.supports(FacadeKind::Workbook, member)
    }

    pub(crate) fn host(&self) -> &Arc<HostShared> {
        &self.host
    }
}
