use std::fmt;

use crate::event::schema::ParamKind;
use crate::extension::FacadeKind;

#[derive(Debug, Clone, PartialEq)]
pub enum FacadeError {
    /// Event name was never registered.
    UnknownEvent(String),
    /// Event name is registered but no installed extension feeds it.
    UnsupportedEvent(String),
    /// Event name already registered (or bound) with a different meaning.
    DuplicateEvent(String),
    /// Two extensions declare the same member on one facade type.
    DuplicateMember {
        facade: FacadeKind,
        member: String,
        existing: &'static str,
    },
    /// Extension installed twice.
    DuplicateExtension(&'static str),
    /// Event parameter record does not match the event's declared shape.
    SchemaMismatch {
        event: String,
        expected: ParamKind,
        found: ParamKind,
    },
    /// A required dependency (render surface, sheet, ...) is absent.
    NotFound(String),
    /// The extension table is sealed; no further extensions can be added.
    Sealed,
    InvalidArgument(String),
}

impl fmt::Display for FacadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEvent(name) => write!(f, "unknown event: {name}"),
            Self::UnsupportedEvent(name) => write!(f, "event '{name}' has no signal source installed"),
            Self::DuplicateEvent(name) => write!(f, "event '{name}' is already registered with a different meaning"),
            Self::DuplicateMember { facade, member, existing } => {
                write!(f, "{facade}.{member} is already provided by extension '{existing}'")
            }
            Self::DuplicateExtension(name) => write!(f, "extension '{name}' is already installed"),
            Self::SchemaMismatch { event, expected, found } => {
                write!(f, "event '{event}' expects {expected} parameters, got {found}")
            }
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::Sealed => write!(f, "extension table is sealed"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for FacadeError {}
