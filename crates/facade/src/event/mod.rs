//! Event names, parameter records and dispatch.
//!
//! A subscription goes through three pieces:
//!
//! 1. [`name::EventNameRegistry`] turns a string into a registered
//!    [`EventName`] (or fails with `UnknownEvent`).
//! 2. [`schema`] declares which parameter record each name delivers.
//! 3. [`dispatch::Mediator`] finds the binder installed for the name, attaches
//!    it to the underlying service signal and returns a [`Disposable`].
//!
//! [`Disposable`]: cellbridge_engine::Disposable

pub mod dispatch;
pub mod name;
pub mod schema;

pub use dispatch::{Binder, DispatchContext, EventCallback, EventSink, Mediator};
pub use name::{names, EventName, EventNameRegistry};
pub use schema::{
    CellEventParams, ClipboardEventParams, DragEventParams, EditChangingParams, EditEndParams, EditStartParams,
    EventParams, EventSpec, ParamKind, ScrollEventParams,
};
