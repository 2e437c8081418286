//! Dispatch mediator: routes subscriptions by name to the service signals.
//!
//! Each registered name may have one [`Binder`]. Subscribing looks the binder
//! up, hands it an [`EventSink`] wrapping the caller's callback, and returns
//! the binder's [`Disposable`]. Binders are installed by extensions while the
//! host is built; after that the binder table is read-only.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use cellbridge_config::{DuplicatePolicy, Settings};
use cellbridge_core::{SheetId, UnitId};
use cellbridge_engine::{Disposable, Injector, Signal};

use crate::error::FacadeError;
use crate::event::name::{EventName, EventNameRegistry};
use crate::event::schema::{self, EventParams, ParamKind};
use crate::workbook::Workbook;
use crate::worksheet::Worksheet;

pub type EventCallback = Arc<dyn Fn(&EventParams) + Send + Sync>;

/// Attaches a sink to a signal source for one subscribing workbook.
pub type Binder = Arc<dyn Fn(&DispatchContext, EventSink) -> Disposable + Send + Sync>;

/// The workbook a subscription was made on.
#[derive(Clone, Debug)]
pub struct DispatchContext {
    workbook: Workbook,
}

impl DispatchContext {
    pub fn new(workbook: Workbook) -> Self {
        Self { workbook }
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn injector(&self) -> &Injector {
        self.workbook.injector()
    }

    /// Facades for an occurrence. `None` if it belongs to another unit or
    /// names a sheet this workbook does not have.
    pub fn resolve(&self, unit_id: &UnitId, sheet_id: &SheetId) -> Option<(Workbook, Worksheet)> {
        if unit_id != self.workbook.unit_id() {
            return None;
        }
        match self.workbook.get_sheet_by_id(sheet_id) {
            Some(worksheet) => Some((self.workbook.clone(), worksheet)),
            None => {
                log::warn!("dropping occurrence for unknown sheet {} in {}", sheet_id, unit_id);
                None
            }
        }
    }
}

/// Delivery end of a subscription.
#[derive(Clone)]
pub struct EventSink {
    name: EventName,
    kind: ParamKind,
    callback: EventCallback,
    validate: bool,
}

impl fmt::Debug for EventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSink")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("validate", &self.validate)
            .finish()
    }
}

impl EventSink {
    pub fn name(&self) -> EventName {
        self.name
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Invoke the callback. With validation on, a record of the wrong kind is
    /// dropped.
    pub fn deliver(&self, params: EventParams) {
        if self.validate {
            if let Err(err) = schema::validate(self.name, self.kind, &params) {
                log::warn!("dropping event: {}", err);
                return;
            }
        }
        (self.callback)(&params);
    }
}

/// Binder over one service signal.
///
/// `select` picks the signal out of the injector; `map` turns a raw
/// occurrence into a record, or `None` to drop it.
pub fn signal_binder<T, S, M>(select: S, map: M) -> Binder
where
    T: 'static,
    S: Fn(&Injector) -> Signal<T> + Send + Sync + 'static,
    M: Fn(&DispatchContext, &T) -> Option<EventParams> + Send + Sync + 'static,
{
    let map = Arc::new(map);
    Arc::new(move |ctx: &DispatchContext, sink: EventSink| {
        let signal = select(ctx.injector());
        let ctx = ctx.clone();
        let map = Arc::clone(&map);
        signal.subscribe(move |raw: &T| {
            if let Some(params) = map(&ctx, raw) {
                sink.deliver(params);
            }
        })
    })
}

pub struct Mediator {
    registry: Arc<EventNameRegistry>,
    binders: HashMap<EventName, Binder>,
    policy: DuplicatePolicy,
    validate: bool,
}

impl fmt::Debug for Mediator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mediator")
            .field("bound", &self.bound_names())
            .field("policy", &self.policy)
            .field("validate", &self.validate)
            .finish()
    }
}

impl Mediator {
    pub fn new(registry: Arc<EventNameRegistry>, settings: &Settings) -> Self {
        Self {
            registry,
            binders: HashMap::new(),
            policy: settings.duplicate_policy,
            validate: cfg!(debug_assertions) || settings.strict_schema,
        }
    }

    pub fn registry(&self) -> &Arc<EventNameRegistry> {
        &self.registry
    }

    /// Whether dispatched records are checked against their declared kind.
    pub fn validates(&self) -> bool {
        self.validate
    }

    /// Install the signal source for a registered name.
    pub fn bind(&mut self, name: EventName, binder: Binder) -> Result<(), FacadeError> {
        if self.registry.kind_of(name).is_none() {
            return Err(FacadeError::UnknownEvent(name.to_string()));
        }
        if self.binders.contains_key(&name) {
            match self.policy {
                DuplicatePolicy::Reject => return Err(FacadeError::DuplicateEvent(name.to_string())),
                DuplicatePolicy::LastWriterWins => {
                    log::warn!("event '{}' rebound; the previous source is replaced", name);
                }
            }
        }
        self.binders.insert(name, binder);
        Ok(())
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.registry
            .resolve(name)
            .map(|n| self.binders.contains_key(&n))
            .unwrap_or(false)
    }

    /// Bound names, in registration order.
    pub fn bound_names(&self) -> Vec<EventName> {
        self.registry
            .names()
            .into_iter()
            .filter(|n| self.binders.contains_key(n))
            .collect()
    }

    pub fn subscribe(&self, name: &str, ctx: &DispatchContext, callback: EventCallback) -> Result<Disposable, FacadeError> {
        let name = self.registry.resolve(name)?;
        let kind = self
            .registry
            .kind_of(name)
            .ok_or_else(|| FacadeError::UnknownEvent(name.to_string()))?;
        let binder = self
            .binders
            .get(&name)
            .ok_or_else(|| FacadeError::UnsupportedEvent(name.to_string()))?;

        let sink = EventSink {
            name,
            kind,
            callback,
            validate: self.validate,
        };
        let handle = binder(ctx, sink);
        let unit_id = ctx.workbook().unit_id().clone();
        log::debug!("subscribed to '{}' on {}", name, unit_id);

        Ok(Disposable::from_fn(move || {
            handle.dispose();
            log::debug!("unsubscribed from '{}' on {}", name, unit_id);
        }))
    }
}
