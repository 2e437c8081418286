//! Service seam between the facades and the host application.
//!
//! Defines the signal channel every service speaks, the service interfaces,
//! the command vocabulary, the workbook model and the injector that bundles
//! them. `memory` holds in-process implementations.

pub mod command;
pub mod injector;
pub mod memory;
pub mod model;
pub mod occurrence;
pub mod services;
pub mod signal;

pub use command::SheetCommand;
pub use injector::{Injector, InjectorBuilder, InjectorError};
pub use model::{SheetModel, UnitRegistry, WorkbookModel};
pub use signal::{Cancellation, Disposable, Signal};
