//! Facade augmentation table.
//!
//! Feature modules add methods to the facades through extension traits; this
//! table is the runtime record of which extension contributed which member to
//! which facade type. It is filled once while the host is built, then sealed.

use std::collections::HashMap;
use std::fmt;

use cellbridge_config::DuplicatePolicy;

use crate::error::FacadeError;
use crate::event::dispatch::{Binder, Mediator};
use crate::event::name::{EventName, EventNameRegistry};
use crate::event::schema::ParamKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacadeKind {
    Workbook,
    Worksheet,
    Range,
    ThreadComment,
}

impl fmt::Display for FacadeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FacadeKind::Workbook => "Workbook",
            FacadeKind::Worksheet => "Worksheet",
            FacadeKind::Range => "Range",
            FacadeKind::ThreadComment => "ThreadComment",
        };
        f.write_str(name)
    }
}

/// Members one extension contributes to one facade type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDescriptor {
    pub extension: &'static str,
    pub members: Vec<&'static str>,
}

/// A feature module.
pub trait Extension: Send + Sync {
    fn name(&self) -> &'static str;

    /// Members added per facade type.
    fn members(&self) -> Vec<(FacadeKind, Vec<&'static str>)>;

    /// Register event names and bind their signal sources.
    fn install(&self, _ctx: &mut InstallContext<'_>) -> Result<(), FacadeError> {
        Ok(())
    }
}

/// What an extension may touch while it is installed.
pub struct InstallContext<'a> {
    extension: &'static str,
    registry: &'a EventNameRegistry,
    mediator: &'a mut Mediator,
}

impl<'a> InstallContext<'a> {
    pub(crate) fn new(extension: &'static str, registry: &'a EventNameRegistry, mediator: &'a mut Mediator) -> Self {
        Self {
            extension,
            registry,
            mediator,
        }
    }

    pub fn extension(&self) -> &'static str {
        self.extension
    }

    pub fn registry(&self) -> &EventNameRegistry {
        self.registry
    }

    pub fn register_event(&mut self, name: &str, kind: ParamKind) -> Result<EventName, FacadeError> {
        self.registry.register(name, kind)
    }

    pub fn bind(&mut self, name: EventName, binder: Binder) -> Result<(), FacadeError> {
        self.mediator.bind(name, binder)
    }

    /// Register `name` (idempotent for the same kind) and bind its source.
    pub fn provide(&mut self, name: &str, kind: ParamKind, binder: Binder) -> Result<EventName, FacadeError> {
        let name = self.register_event(name, kind)?;
        self.bind(name, binder)?;
        log::debug!("{} provides '{}'", self.extension, name);
        Ok(name)
    }
}

/// Members the facades have without any extension.
pub(crate) const BASE_EXTENSION: &str = "base";

fn base_members() -> Vec<(FacadeKind, Vec<&'static str>)> {
    vec![
        (
            FacadeKind::Workbook,
            vec![
                "unit_id",
                "name",
                "get_sheets",
                "get_active_sheet",
                "get_sheet_by_id",
                "get_sheet_by_name",
                "add_event",
                "on",
                "supports",
            ],
        ),
        (
            FacadeKind::Worksheet,
            vec!["sheet_id", "name", "workbook", "get_range", "get_range_a1", "get_cell", "supports"],
        ),
        (
            FacadeKind::Range,
            vec!["worksheet", "workbook", "get_row", "get_column", "range_ref", "a1", "supports"],
        ),
        (
            FacadeKind::ThreadComment,
            vec![
                "id",
                "thread_id",
                "parent_id",
                "anchor",
                "content",
                "author",
                "created_at",
                "is_root",
            ],
        ),
    ]
}

/// `FacadeKind -> [ExtensionDescriptor]`, in install order.
#[derive(Debug)]
pub struct ExtensionRegistry {
    table: HashMap<FacadeKind, Vec<ExtensionDescriptor>>,
    installed: Vec<&'static str>,
    policy: DuplicatePolicy,
    sealed: bool,
}

impl ExtensionRegistry {
    /// Table holding only the base facade members.
    pub fn new(policy: DuplicatePolicy) -> Self {
        let mut table: HashMap<FacadeKind, Vec<ExtensionDescriptor>> = HashMap::new();
        for (facade, members) in base_members() {
            table.entry(facade).or_default().push(ExtensionDescriptor {
                extension: BASE_EXTENSION,
                members,
            });
        }
        Self {
            table,
            installed: Vec::new(),
            policy,
            sealed: false,
        }
    }

    /// Record an extension's members. Nothing is recorded if any member
    /// conflicts under [`DuplicatePolicy::Reject`].
    pub fn add(&mut self, extension: &'static str, members: Vec<(FacadeKind, Vec<&'static str>)>) -> Result<(), FacadeError> {
        if self.sealed {
            return Err(FacadeError::Sealed);
        }
        if self.installed.contains(&extension) {
            return Err(FacadeError::DuplicateExtension(extension));
        }

        // Conflicts with earlier extensions, or within this one.
        let mut conflicts = Vec::new();
        for (facade, list) in &members {
            for (i, member) in list.iter().enumerate() {
                if list[..i].contains(member) {
                    return Err(FacadeError::DuplicateMember {
                        facade: *facade,
                        member: member.to_string(),
                        existing: extension,
                    });
                }
                match self.provider(*facade, member) {
                    Some(BASE_EXTENSION) => {
                        return Err(FacadeError::DuplicateMember {
                            facade: *facade,
                            member: member.to_string(),
                            existing: BASE_EXTENSION,
                        });
                    }
                    Some(existing) => conflicts.push((*facade, *member, existing)),
                    None => {}
                }
            }
        }

        if let Some((facade, member, existing)) = conflicts.first() {
            if self.policy == DuplicatePolicy::Reject {
                return Err(FacadeError::DuplicateMember {
                    facade: *facade,
                    member: member.to_string(),
                    existing: *existing,
                });
            }
        }
        for (facade, member, existing) in conflicts {
            log::warn!("{}.{} from '{}' replaced by '{}'", facade, member, existing, extension);
            if let Some(descriptors) = self.table.get_mut(&facade) {
                for descriptor in descriptors.iter_mut() {
                    descriptor.members.retain(|m| *m != member);
                }
            }
        }

        for (facade, list) in members {
            if list.is_empty() {
                continue;
            }
            self.table.entry(facade).or_default().push(ExtensionDescriptor {
                extension,
                members: list,
            });
        }
        self.installed.push(extension);
        Ok(())
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn supports(&self, facade: FacadeKind, member: &str) -> bool {
        self.provider(facade, member).is_some()
    }

    /// Extension that provides `member` on `facade`.
    pub fn provider(&self, facade: FacadeKind, member: &str) -> Option<&'static str> {
        self.table
            .get(&facade)?
            .iter()
            .find(|d| d.members.iter().any(|m| *m == member))
            .map(|d| d.extension)
    }

    pub fn members(&self, facade: FacadeKind) -> Vec<&'static str> {
        self.descriptors(facade)
            .iter()
            .flat_map(|d| d.members.iter().copied())
            .collect()
    }

    pub fn descriptors(&self, facade: FacadeKind) -> &[ExtensionDescriptor] {
        self.table.get(&facade).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Installed extensions, in install order.
    pub fn extensions(&self) -> &[&'static str] {
        &self.installed
    }
}
