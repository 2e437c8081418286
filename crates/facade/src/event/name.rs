//! Event name registry.
//!
//! Names are plain strings to subscribers but are interned into an
//! [`EventName`] once registered. A name keeps its [`ParamKind`] for the life
//! of the registry; re-registering it with another kind is rejected unless
//! the registry runs under [`DuplicatePolicy::LastWriterWins`].

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use cellbridge_config::DuplicatePolicy;

use crate::error::FacadeError;
use crate::event::schema::ParamKind;

/// Interned event name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventName(&'static str);

impl EventName {
    pub const fn from_static(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Built-in event names.
pub mod names {
    use super::EventName;

    pub const BEFORE_CLIPBOARD_CHANGE: EventName = EventName::from_static("BeforeClipboardChange");
    pub const CLIPBOARD_CHANGED: EventName = EventName::from_static("ClipboardChanged");
    pub const BEFORE_CLIPBOARD_PASTE: EventName = EventName::from_static("BeforeClipboardPaste");
    pub const CLIPBOARD_PASTED: EventName = EventName::from_static("ClipboardPasted");
    pub const BEFORE_SHEET_EDIT_START: EventName = EventName::from_static("BeforeSheetEditStart");
    pub const SHEET_EDIT_STARTED: EventName = EventName::from_static("SheetEditStarted");
    pub const SHEET_EDIT_CHANGING: EventName = EventName::from_static("SheetEditChanging");
    pub const BEFORE_SHEET_EDIT_END: EventName = EventName::from_static("BeforeSheetEditEnd");
    pub const SHEET_EDIT_ENDED: EventName = EventName::from_static("SheetEditEnded");
    pub const CELL_CLICKED: EventName = EventName::from_static("CellClicked");
    pub const CELL_POINTER_DOWN: EventName = EventName::from_static("CellPointerDown");
    pub const CELL_POINTER_UP: EventName = EventName::from_static("CellPointerUp");
    pub const CELL_POINTER_MOVE: EventName = EventName::from_static("CellPointerMove");
    pub const CELL_HOVER: EventName = EventName::from_static("CellHover");
    pub const DRAG_OVER: EventName = EventName::from_static("DragOver");
    pub const DROP: EventName = EventName::from_static("Drop");
    pub const SCROLL: EventName = EventName::from_static("Scroll");
}

const BUILTINS: &[(EventName, ParamKind)] = &[
    (names::BEFORE_CLIPBOARD_CHANGE, ParamKind::Clipboard),
    (names::CLIPBOARD_CHANGED, ParamKind::Clipboard),
    (names::BEFORE_CLIPBOARD_PASTE, ParamKind::Clipboard),
    (names::CLIPBOARD_PASTED, ParamKind::Clipboard),
    (names::BEFORE_SHEET_EDIT_START, ParamKind::EditStart),
    (names::SHEET_EDIT_STARTED, ParamKind::EditStart),
    (names::SHEET_EDIT_CHANGING, ParamKind::EditChanging),
    (names::BEFORE_SHEET_EDIT_END, ParamKind::EditEnd),
    (names::SHEET_EDIT_ENDED, ParamKind::EditEnd),
    (names::CELL_CLICKED, ParamKind::Cell),
    (names::CELL_POINTER_DOWN, ParamKind::Cell),
    (names::CELL_POINTER_UP, ParamKind::Cell),
    (names::CELL_POINTER_MOVE, ParamKind::Cell),
    (names::CELL_HOVER, ParamKind::Cell),
    (names::DRAG_OVER, ParamKind::Drag),
    (names::DROP, ParamKind::Drag),
    (names::SCROLL, ParamKind::Scroll),
];

static GLOBAL: Lazy<Arc<EventNameRegistry>> = Lazy::new(|| Arc::new(EventNameRegistry::with_builtins()));

/// Registered event names and their parameter kinds, in registration order.
pub struct EventNameRegistry {
    entries: RwLock<Vec<(EventName, ParamKind)>>,
    policy: DuplicatePolicy,
}

impl fmt::Debug for EventNameRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventNameRegistry")
            .field("names", &self.entries.read().len())
            .field("policy", &self.policy)
            .finish()
    }
}

impl Default for EventNameRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl EventNameRegistry {
    /// Registry with no names at all.
    pub fn empty() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            policy: DuplicatePolicy::Reject,
        }
    }

    pub fn with_builtins() -> Self {
        Self {
            entries: RwLock::new(BUILTINS.to_vec()),
            policy: DuplicatePolicy::Reject,
        }
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> Arc<EventNameRegistry> {
        Arc::clone(&GLOBAL)
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register a name. Registering an existing name with the same kind
    /// returns the existing handle.
    pub fn register(&self, name: &str, kind: ParamKind) -> Result<EventName, FacadeError> {
        if name.is_empty() {
            return Err(FacadeError::InvalidArgument("event name must not be empty".to_string()));
        }

        let mut entries = self.entries.write();
        if let Some(entry) = entries.iter_mut().find(|(n, _)| n.as_str() == name) {
            if entry.1 == kind {
                return Ok(entry.0);
            }
            return match self.policy {
                DuplicatePolicy::Reject => Err(FacadeError::DuplicateEvent(name.to_string())),
                DuplicatePolicy::LastWriterWins => {
                    log::warn!("event '{}' re-registered: {} replaces {}", name, kind, entry.1);
                    entry.1 = kind;
                    Ok(entry.0)
                }
            };
        }

        // Registered names live as long as the process.
        let interned = EventName(Box::leak(name.to_string().into_boxed_str()));
        entries.push((interned, kind));
        log::debug!("registered event '{}' ({})", interned, kind);
        Ok(interned)
    }

    pub fn resolve(&self, name: &str) -> Result<EventName, FacadeError> {
        self.entries
            .read()
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(n, _)| *n)
            .ok_or_else(|| FacadeError::UnknownEvent(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    pub fn kind_of(&self, name: EventName) -> Option<ParamKind> {
        self.entries
            .read()
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, k)| *k)
    }

    pub fn names(&self) -> Vec<EventName> {
        self.entries.read().iter().map(|(n, _)| *n).collect()
    }

    pub fn entries(&self) -> Vec<(EventName, ParamKind)> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
