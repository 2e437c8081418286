use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use smol::future::{Boxed, FutureExt};

use crate::command::SheetCommand;
use crate::model::UnitRegistry;
use crate::services::CommandService;

use super::comments::MemoryCommentModel;
use super::editor::MemoryEditor;
use super::pointer::MemoryScrollManager;

/// The services commands act on.
#[derive(Clone)]
struct CommandTargets {
    units: Arc<UnitRegistry>,
    editor: Arc<MemoryEditor>,
    scroll: Arc<MemoryScrollManager>,
    comments: Arc<MemoryCommentModel>,
}

impl CommandTargets {
    fn apply(&self, command: &SheetCommand) -> bool {
        match command {
            SheetCommand::SetCellEditVisible {
                unit_id,
                visible: true,
                event_type,
                key_code,
            } => self.editor.open(unit_id, *event_type, *key_code),
            SheetCommand::SetCellEditVisible {
                unit_id,
                visible: false,
                event_type,
                key_code,
            } => self.editor.close(unit_id, *event_type, *key_code),
            SheetCommand::SetZoomRatio { unit_id, sheet_id, zoom_ratio } => self
                .units
                .get(unit_id)
                .is_some_and(|wb| wb.set_zoom_ratio(sheet_id, *zoom_ratio)),
            SheetCommand::ScrollToCell { unit_id, sheet_id, row, col } => {
                let known = self
                    .units
                    .get(unit_id)
                    .is_some_and(|wb| wb.sheet(sheet_id).is_some());
                if known {
                    self.scroll.scroll_to_cell(unit_id, sheet_id, *row, *col);
                }
                known
            }
            SheetCommand::AddComment { comment, .. } => self.comments.insert(comment.clone()),
            SheetCommand::UpdateComment { unit_id, sheet_id, comment_id, text } => {
                self.comments.update_text(unit_id, sheet_id, comment_id, text)
            }
            SheetCommand::DeleteComment { unit_id, sheet_id, comment_id } => {
                self.comments.remove(unit_id, sheet_id, comment_id)
            }
        }
    }
}

/// Command service that applies commands to the in-memory services.
///
/// Every submission is recorded (including failed ones) so tests can assert
/// on what the facades asked for. `fail_command` forces a command id to
/// report failure without being applied.
pub struct MemoryCommandService {
    targets: CommandTargets,
    executed: Arc<Mutex<Vec<SheetCommand>>>,
    failing: Arc<Mutex<HashSet<&'static str>>>,
}

impl MemoryCommandService {
    pub fn new(
        units: Arc<UnitRegistry>,
        editor: Arc<MemoryEditor>,
        scroll: Arc<MemoryScrollManager>,
        comments: Arc<MemoryCommentModel>,
    ) -> Self {
        Self {
            targets: CommandTargets {
                units,
                editor,
                scroll,
                comments,
            },
            executed: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn fail_command(&self, id: &'static str) {
        self.failing.lock().insert(id);
    }

    pub fn restore_command(&self, id: &'static str) {
        self.failing.lock().remove(id);
    }

    /// Commands submitted so far, in submission order.
    pub fn executed(&self) -> Vec<SheetCommand> {
        self.executed.lock().clone()
    }

    pub fn executed_ids(&self) -> Vec<&'static str> {
        self.executed.lock().iter().map(|c| c.id()).collect()
    }

    /// Number of submissions of one command id.
    pub fn count(&self, id: &str) -> usize {
        self.executed.lock().iter().filter(|c| c.id() == id).count()
    }

    pub fn clear_log(&self) {
        self.executed.lock().clear();
    }

    fn record(&self, command: &SheetCommand) -> bool {
        log::debug!("execute {} on {}", command.id(), command.unit_id());
        self.executed.lock().push(command.clone());
        !self.failing.lock().contains(command.id())
    }
}

impl CommandService for MemoryCommandService {
    fn sync_execute(&self, command: &SheetCommand) -> bool {
        if !self.record(command) {
            return false;
        }
        self.targets.apply(command)
    }

    fn execute(&self, command: SheetCommand) -> Boxed<bool> {
        let allowed = self.record(&command);
        let targets = self.targets.clone();
        async move {
            smol::future::yield_now().await;
            allowed && targets.apply(&command)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SheetModel, WorkbookModel};
    use cellbridge_core::{SheetId, UnitId};

    fn service() -> (Arc<UnitRegistry>, MemoryCommandService) {
        let units = Arc::new(UnitRegistry::new());
        units.add(Arc::new(WorkbookModel::new("book", "Book", vec![SheetModel::new("s1", "Sheet1")])));
        let service = MemoryCommandService::new(
            Arc::clone(&units),
            Arc::new(MemoryEditor::new()),
            Arc::new(MemoryScrollManager::new()),
            Arc::new(MemoryCommentModel::new()),
        );
        (units, service)
    }

    fn zoom(ratio: f64) -> SheetCommand {
        SheetCommand::SetZoomRatio {
            unit_id: UnitId::new("book"),
            sheet_id: SheetId::new("s1"),
            zoom_ratio: ratio,
        }
    }

    #[test]
    fn test_sync_execute_applies_and_logs() {
        let (units, service) = service();
        assert!(service.sync_execute(&zoom(2.0)));
        let sheet = units.get(&UnitId::new("book")).unwrap().sheet(&SheetId::new("s1")).unwrap();
        assert_eq!(sheet.zoom_ratio, 2.0);
        assert_eq!(service.executed_ids(), vec!["sheet.operation.set-zoom-ratio"]);
    }

    #[test]
    fn test_async_execute_resolves() {
        let (_units, service) = service();
        assert!(smol::block_on(service.execute(zoom(0.5))));
        assert_eq!(service.count("sheet.operation.set-zoom-ratio"), 1);
    }

    #[test]
    fn test_failing_command_is_logged_but_not_applied() {
        let (units, service) = service();
        service.fail_command("sheet.operation.set-zoom-ratio");
        assert!(!service.sync_execute(&zoom(3.0)));
        assert!(!smol::block_on(service.execute(zoom(3.0))));
        let sheet = units.get(&UnitId::new("book")).unwrap().sheet(&SheetId::new("s1")).unwrap();
        assert_eq!(sheet.zoom_ratio, 1.0);
        assert_eq!(service.executed().len(), 2);

        service.restore_command("sheet.operation.set-zoom-ratio");
        assert!(service.sync_execute(&zoom(3.0)));
    }
}
