//! Facade host: owns the injector, the dispatch mediator and the sealed
//! extension table, and hands out workbook facades.

use std::fmt;
use std::sync::Arc;

use cellbridge_core::UnitId;
use cellbridge_engine::Injector;

use crate::error::FacadeError;
use crate::event::dispatch::Mediator;
use crate::event::name::{EventName, EventNameRegistry};
use crate::event::schema::ParamKind;
use crate::extension::{Extension, ExtensionRegistry, InstallContext};
use crate::features;
use crate::workbook::Workbook;

/// State shared by every facade a host hands out.
pub(crate) struct HostShared {
    pub(crate) injector: Injector,
    pub(crate) mediator: Mediator,
    pub(crate) extensions: ExtensionRegistry,
}

#[derive(Clone)]
pub struct FacadeHost {
    shared: Arc<HostShared>,
}

impl fmt::Debug for FacadeHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacadeHost")
            .field("extensions", &self.extensions())
            .field("mediator", &self.shared.mediator)
            .finish()
    }
}

impl FacadeHost {
    pub fn builder(injector: Injector) -> FacadeHostBuilder {
        FacadeHostBuilder {
            injector,
            registry: None,
            extensions: Vec::new(),
        }
    }

    /// Host with every built-in feature installed.
    pub fn with_default_extensions(injector: Injector) -> Result<Self, FacadeError> {
        Self::builder(injector).default_extensions().build()
    }

    pub fn injector(&self) -> &Injector {
        &self.shared.injector
    }

    pub fn registry(&self) -> &Arc<EventNameRegistry> {
        self.shared.mediator.registry()
    }

    pub fn extension_table(&self) -> &ExtensionRegistry {
        &self.shared.extensions
    }

    /// Installed extensions, in install order.
    pub fn extensions(&self) -> Vec<&'static str> {
        self.shared.extensions.extensions().to_vec()
    }

    /// Names with a signal source, and what they deliver.
    pub fn supported_events(&self) -> Vec<(EventName, ParamKind)> {
        let registry = self.registry();
        self.shared
            .mediator
            .bound_names()
            .into_iter()
            .filter_map(|name| registry.kind_of(name).map(|kind| (name, kind)))
            .collect()
    }

    pub fn get_workbook(&self, unit_id: &UnitId) -> Option<Workbook> {
        let model = self.shared.injector.units().get(unit_id)?;
        Some(Workbook::new(Arc::clone(&self.shared), model))
    }

    /// The focused workbook.
    pub fn get_active_workbook(&self) -> Option<Workbook> {
        let model = self.shared.injector.units().focused()?;
        Some(Workbook::new(Arc::clone(&self.shared), model))
    }

    pub fn workbooks(&self) -> Vec<Workbook> {
        self.shared
            .injector
            .units()
            .unit_ids()
            .iter()
            .filter_map(|id| self.get_workbook(id))
            .collect()
    }
}

pub struct FacadeHostBuilder {
    injector: Injector,
    registry: Option<Arc<EventNameRegistry>>,
    extensions: Vec<Box<dyn Extension>>,
}

impl FacadeHostBuilder {
    /// Use a specific name registry (e.g. [`EventNameRegistry::global`]).
    /// By default each host gets its own registry with the built-in names.
    pub fn registry(mut self, registry: Arc<EventNameRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn extension<E: Extension + 'static>(mut self, extension: E) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    pub fn default_extensions(self) -> Self {
        self.extension(features::EditingExtension)
            .extension(features::ClipboardExtension)
            .extension(features::CanvasExtension)
            .extension(features::SelectionExtension)
            .extension(features::CellEventsExtension)
            .extension(features::CommentsExtension)
    }

    /// Install every queued extension in order, then seal the table.
    pub fn build(self) -> Result<FacadeHost, FacadeError> {
        let settings = self.injector.settings().clone();
        let registry = self.registry.unwrap_or_else(|| {
            Arc::new(EventNameRegistry::with_builtins().with_policy(settings.duplicate_policy))
        });

        let mut mediator = Mediator::new(Arc::clone(&registry), &settings);
        let mut table = ExtensionRegistry::new(settings.duplicate_policy);

        for extension in &self.extensions {
            let name = extension.name();
            table.add(name, extension.members())?;
            let mut ctx = InstallContext::new(name, &registry, &mut mediator);
            extension.install(&mut ctx)?;
            log::info!("installed extension '{}'", name);
        }
        table.seal();

        log::info!(
            "facade host ready: {} extensions, {} events bound",
            table.extensions().len(),
            mediator.bound_names().len()
        );
        Ok(FacadeHost {
            shared: Arc::new(HostShared {
                injector: self.injector,
                mediator,
                extensions: table,
            }),
        })
    }
}
