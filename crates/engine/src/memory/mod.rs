//! In-process service implementations.
//!
//! Used by tests and by the replay tool. They keep just enough state to make
//! the facade contracts observable: signals can be driven by hand, commands
//! are logged, and failure can be injected per command id.

mod clipboard;
mod commands;
mod comments;
mod editor;
mod pointer;
mod render;

use std::sync::Arc;

use cellbridge_config::Settings;

use crate::injector::{Injector, InjectorError};
use crate::model::{UnitRegistry, WorkbookModel};

pub use clipboard::MemoryClipboard;
pub use commands::MemoryCommandService;
pub use comments::MemoryCommentModel;
pub use editor::MemoryEditor;
pub use pointer::{MemoryDragManager, MemoryPointerManager, MemoryScrollManager, MemorySelectionService};
pub use render::{Geometry, MemoryRenderManager, MemoryRenderSurface};

/// A full set of in-memory services sharing one unit registry.
#[derive(Clone)]
pub struct MemoryServices {
    pub units: Arc<UnitRegistry>,
    pub render: Arc<MemoryRenderManager>,
    pub scroll: Arc<MemoryScrollManager>,
    pub selection: Arc<MemorySelectionService>,
    pub pointer: Arc<MemoryPointerManager>,
    pub drag: Arc<MemoryDragManager>,
    pub editor: Arc<MemoryEditor>,
    pub clipboard: Arc<MemoryClipboard>,
    pub comments: Arc<MemoryCommentModel>,
    pub commands: Arc<MemoryCommandService>,
}

impl Default for MemoryServices {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryServices {
    pub fn new() -> Self {
        let units = Arc::new(UnitRegistry::new());
        let scroll = Arc::new(MemoryScrollManager::new());
        let render = Arc::new(MemoryRenderManager::new(Arc::clone(&units), Arc::clone(&scroll)));
        let editor = Arc::new(MemoryEditor::new());
        let comments = Arc::new(MemoryCommentModel::new());
        let commands = Arc::new(MemoryCommandService::new(
            Arc::clone(&units),
            Arc::clone(&editor),
            Arc::clone(&scroll),
            Arc::clone(&comments),
        ));

        Self {
            units,
            render,
            scroll,
            selection: Arc::new(MemorySelectionService::new()),
            pointer: Arc::new(MemoryPointerManager::new()),
            drag: Arc::new(MemoryDragManager::new()),
            editor,
            clipboard: Arc::new(MemoryClipboard::new()),
            comments,
            commands,
        }
    }

    /// Register a workbook and mount it on a canvas.
    pub fn add_workbook(&self, model: WorkbookModel) -> Arc<WorkbookModel> {
        let model = Arc::new(model);
        self.units.add(Arc::clone(&model));
        self.render.mount(model.unit_id());
        model
    }

    /// Register a workbook without a render surface (headless).
    pub fn add_headless_workbook(&self, model: WorkbookModel) -> Arc<WorkbookModel> {
        let model = Arc::new(model);
        self.units.add(Arc::clone(&model));
        model
    }

    pub fn injector(&self, settings: Settings) -> Result<Injector, InjectorError> {
        Injector::builder()
            .settings(settings)
            .units(Arc::clone(&self.units))
            .render(self.render.clone())
            .scroll(self.scroll.clone())
            .selection(self.selection.clone())
            .pointer(self.pointer.clone())
            .drag(self.drag.clone())
            .editor(self.editor.clone())
            .clipboard(self.clipboard.clone())
            .comments(self.comments.clone())
            .commands(self.commands.clone())
            .build()
    }
}
