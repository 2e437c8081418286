//! Library side of `cbridge`: the replay script format and runner.

pub mod exit_codes;
pub mod replay;
pub mod script;

pub use replay::{run, DeliveredEvent, ReplayError, ReplayReport, StepOutcome};
pub use script::{Script, Step, WorkbookSpec};
