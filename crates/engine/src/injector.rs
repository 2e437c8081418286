//! Dependency container handed to every facade.
//!
//! The injector is resolved once when a facade host is built; facades keep a
//! cheap clone and look services up on every call.

use std::fmt;
use std::sync::Arc;

use cellbridge_config::Settings;

use crate::model::UnitRegistry;
use crate::services::{
    ClipboardService, CommandService, CommentModel, DragManager, EditorService, PointerManager, RenderManager,
    ScrollManager, SelectionService,
};

/// Errors from assembling an injector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectorError {
    /// A required service was never provided.
    MissingService(&'static str),
}

impl fmt::Display for InjectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingService(name) => write!(f, "missing service: {name}"),
        }
    }
}

impl std::error::Error for InjectorError {}

struct Services {
    settings: Arc<Settings>,
    units: Arc<UnitRegistry>,
    render: Arc<dyn RenderManager>,
    scroll: Arc<dyn ScrollManager>,
    selection: Arc<dyn SelectionService>,
    pointer: Arc<dyn PointerManager>,
    drag: Arc<dyn DragManager>,
    editor: Arc<dyn EditorService>,
    clipboard: Arc<dyn ClipboardService>,
    comments: Arc<dyn CommentModel>,
    commands: Arc<dyn CommandService>,
}

#[derive(Clone)]
pub struct Injector {
    services: Arc<Services>,
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("settings", &self.services.settings)
            .field("units", &self.services.units.unit_ids())
            .finish()
    }
}

impl Injector {
    pub fn builder() -> InjectorBuilder {
        InjectorBuilder::default()
    }

    pub fn settings(&self) -> &Settings {
        &self.services.settings
    }

    pub fn units(&self) -> &Arc<UnitRegistry> {
        &self.services.units
    }

    pub fn render(&self) -> &Arc<dyn RenderManager> {
        &self.services.render
    }

    pub fn scroll(&self) -> &Arc<dyn ScrollManager> {
        &self.services.scroll
    }

    pub fn selection(&self) -> &Arc<dyn SelectionService> {
        &self.services.selection
    }

    pub fn pointer(&self) -> &Arc<dyn PointerManager> {
        &self.services.pointer
    }

    pub fn drag(&self) -> &Arc<dyn DragManager> {
        &self.services.drag
    }

    pub fn editor(&self) -> &Arc<dyn EditorService> {
        &self.services.editor
    }

    pub fn clipboard(&self) -> &Arc<dyn ClipboardService> {
        &self.services.clipboard
    }

    pub fn comments(&self) -> &Arc<dyn CommentModel> {
        &self.services.comments
    }

    pub fn commands(&self) -> &Arc<dyn CommandService> {
        &self.services.commands
    }
}

/// Collects services; `build` fails on the first one missing.
#[derive(Default)]
pub struct InjectorBuilder {
    settings: Option<Settings>,
    units: Option<Arc<UnitRegistry>>,
    render: Option<Arc<dyn RenderManager>>,
    scroll: Option<Arc<dyn ScrollManager>>,
    selection: Option<Arc<dyn SelectionService>>,
    pointer: Option<Arc<dyn PointerManager>>,
    drag: Option<Arc<dyn DragManager>>,
    editor: Option<Arc<dyn EditorService>>,
    clipboard: Option<Arc<dyn ClipboardService>>,
    comments: Option<Arc<dyn CommentModel>>,
    commands: Option<Arc<dyn CommandService>>,
}

impl InjectorBuilder {
    /// Defaults to `Settings::default()` when not called.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Defaults to an empty registry when not called.
    pub fn units(mut self, units: Arc<UnitRegistry>) -> Self {
        self.units = Some(units);
        self
    }

    pub fn render(mut self, render: Arc<dyn RenderManager>) -> Self {
        self.render = Some(render);
        self
    }

    pub fn scroll(mut self, scroll: Arc<dyn ScrollManager>) -> Self {
        self.scroll = Some(scroll);
        self
    }

    pub fn selection(mut self, selection: Arc<dyn SelectionService>) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn pointer(mut self, pointer: Arc<dyn PointerManager>) -> Self {
        self.pointer = Some(pointer);
        self
    }

    pub fn drag(mut self, drag: Arc<dyn DragManager>) -> Self {
        self.drag = Some(drag);
        self
    }

    pub fn editor(mut self, editor: Arc<dyn EditorService>) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn clipboard(mut self, clipboard: Arc<dyn ClipboardService>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn comments(mut self, comments: Arc<dyn CommentModel>) -> Self {
        self.comments = Some(comments);
        self
    }

    pub fn commands(mut self, commands: Arc<dyn CommandService>) -> Self {
        self.commands = Some(commands);
        self
    }

    pub fn build(self) -> Result<Injector, InjectorError> {
        Ok(Injector {
            services: Arc::new(Services {
                settings: Arc::new(self.settings.unwrap_or_default()),
                units: self.units.unwrap_or_default(),
                render: self.render.ok_or(InjectorError::MissingService("render"))?,
                scroll: self.scroll.ok_or(InjectorError::MissingService("scroll"))?,
                selection: self.selection.ok_or(InjectorError::MissingService("selection"))?,
                pointer: self.pointer.ok_or(InjectorError::MissingService("pointer"))?,
                drag: self.drag.ok_or(InjectorError::MissingService("drag"))?,
                editor: self.editor.ok_or(InjectorError::MissingService("editor"))?,
                clipboard: self.clipboard.ok_or(InjectorError::MissingService("clipboard"))?,
                comments: self.comments.ok_or(InjectorError::MissingService("comments"))?,
                commands: self.commands.ok_or(InjectorError::MissingService("commands"))?,
            }),
        })
    }
}
