//! Occurrence replay: drive the in-memory services from a script and record
//! what the facade layer delivers.
//!
//! Usage: cbridge replay script.json [--settings settings.json] [--json]
//!
//! Steps are numbered from 1. Events delivered while a step runs carry that
//! step's number; events delivered during subscription carry 0.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{json, Value};

use cellbridge_config::Settings;
use cellbridge_core::{CellPos, UnitId};
use cellbridge_engine::memory::MemoryServices;
use cellbridge_engine::model::{SheetModel, WorkbookModel};
use cellbridge_engine::occurrence::{CellPointerOccurrence, DragOccurrence};
use cellbridge_facade::event::EventParams;
use cellbridge_facade::prelude::*;

use crate::exit_codes::{EXIT_REPLAY_SCRIPT, EXIT_REPLAY_SETUP, EXIT_REPLAY_STEP};
use crate::script::{Script, Step};

#[derive(Debug, Clone, PartialEq)]
pub enum ReplayError {
    /// Unreadable or malformed script.
    Script(String),
    /// Host construction or subscription failed.
    Setup(String),
    /// A step could not be applied.
    Step { step: usize, op: &'static str, message: String },
}

impl ReplayError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ReplayError::Script(_) => EXIT_REPLAY_SCRIPT,
            ReplayError::Setup(_) => EXIT_REPLAY_SETUP,
            ReplayError::Step { .. } => EXIT_REPLAY_STEP,
        }
    }
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Script(msg) => write!(f, "invalid script: {msg}"),
            ReplayError::Setup(msg) => write!(f, "replay setup failed: {msg}"),
            ReplayError::Step { step, op, message } => write!(f, "step {step} ({op}): {message}"),
        }
    }
}

impl std::error::Error for ReplayError {}

/// One record handed to a subscriber.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveredEvent {
    pub step: usize,
    pub event: String,
    pub sheet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub op: &'static str,
    pub result: Value,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    pub workbook: String,
    pub subscribed: Vec<String>,
    pub steps: Vec<StepOutcome>,
    pub events: Vec<DeliveredEvent>,
    /// Command ids submitted to the command service, in order.
    pub commands: Vec<&'static str>,
}

impl ReplayReport {
    pub fn events_named(&self, name: &str) -> Vec<&DeliveredEvent> {
        self.events.iter().filter(|e| e.event == name).collect()
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let events_at = |step: usize| self.events.iter().filter(move |e| e.step == step);

        for event in events_at(0) {
            out.push_str(&format!("  {}\n", describe(event)));
        }
        for outcome in &self.steps {
            out.push_str(&format!("step {} {} -> {}\n", outcome.step, outcome.op, outcome.result));
            for event in events_at(outcome.step) {
                out.push_str(&format!("  {}\n", describe(event)));
            }
        }
        out.push_str(&format!(
            "{} steps, {} events, {} commands\n",
            self.steps.len(),
            self.events.len(),
            self.commands.len()
        ));
        out
    }
}

fn describe(event: &DeliveredEvent) -> String {
    let mut line = format!("{} {}", event.event, event.sheet);
    if let Some(cell) = &event.cell {
        line.push('!');
        line.push_str(cell);
    }
    if let Some(detail) = &event.detail {
        line.push_str(&format!(" {detail:?}"));
    }
    line
}

fn detail(params: &EventParams) -> Option<String> {
    match params {
        EventParams::Drag(p) => p.data.clone(),
        EventParams::EditChanging(p) => Some(p.value.clone()),
        EventParams::EditEnd(p) => p.value.clone(),
        EventParams::Clipboard(p) => Some(p.text.clone()),
        EventParams::Scroll(p) => {
            Some(CellPos::new(p.state.sheet_view_start_row, p.state.sheet_view_start_column).to_a1())
        }
        EventParams::Cell(_) | EventParams::EditStart(_) => None,
    }
}

fn facade_result(result: Result<bool, FacadeError>) -> Value {
    match result {
        Ok(applied) => Value::Bool(applied),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

fn parse_cell(reference: &str) -> Result<CellPos, String> {
    CellPos::from_a1(reference).ok_or_else(|| format!("not a cell reference: {reference}"))
}

struct Session {
    services: MemoryServices,
    host: FacadeHost,
    workbook: Workbook,
    subscriptions: HashMap<String, Disposable>,
    events: Arc<Mutex<Vec<DeliveredEvent>>>,
    current_step: Arc<AtomicUsize>,
}

impl Session {
    fn start(script: &Script, settings: Settings) -> Result<Self, ReplayError> {
        let spec = &script.workbook;
        let services = MemoryServices::new();
        let sheets = spec
            .sheets
            .iter()
            .enumerate()
            .map(|(i, name)| SheetModel::new(format!("s{}", i + 1), name.clone()))
            .collect();
        let model = WorkbookModel::new(spec.id.clone(), spec.name.clone(), sheets);
        if spec.headless {
            services.add_headless_workbook(model);
        } else {
            services.add_workbook(model);
        }

        let injector = services
            .injector(settings)
            .map_err(|e| ReplayError::Setup(e.to_string()))?;
        let host = FacadeHost::with_default_extensions(injector).map_err(|e| ReplayError::Setup(e.to_string()))?;
        let workbook = host
            .get_workbook(&UnitId::new(spec.id.as_str()))
            .ok_or_else(|| ReplayError::Setup(format!("workbook {} not registered", spec.id)))?;

        Ok(Self {
            services,
            host,
            workbook,
            subscriptions: HashMap::new(),
            events: Arc::new(Mutex::new(Vec::new())),
            current_step: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn subscribe(&mut self, name: &str) -> Result<(), ReplayError> {
        let events = Arc::clone(&self.events);
        let current_step = Arc::clone(&self.current_step);
        let event = name.to_string();
        let handle = self
            .workbook
            .add_event(name, move |params: &EventParams| {
                events.lock().push(DeliveredEvent {
                    step: current_step.load(Ordering::SeqCst),
                    event: event.clone(),
                    sheet: params.worksheet().name(),
                    cell: params.cell().map(|(row, col)| CellPos::new(row, col).to_a1()),
                    detail: detail(params),
                });
            })
            .map_err(|e| ReplayError::Setup(format!("subscribe {name}: {e}")))?;

        if let Some(previous) = self.subscriptions.insert(name.to_string(), handle) {
            previous.dispose();
        }
        Ok(())
    }

    fn worksheet(&self, name: &str) -> Result<Worksheet, String> {
        self.workbook
            .get_sheet_by_name(name)
            .ok_or_else(|| format!("no sheet named {name:?}"))
    }

    fn pointer(&self, sheet: &str, cell: &Option<String>) -> Result<Option<CellPointerOccurrence>, String> {
        let worksheet = self.worksheet(sheet)?;
        let Some(reference) = cell else {
            return Ok(None);
        };
        let pos = parse_cell(reference)?;
        Ok(Some(CellPointerOccurrence::new(
            self.workbook.unit_id().clone(),
            worksheet.sheet_id().clone(),
            pos.row,
            pos.col,
        )))
    }

    fn drag(&self, sheet: &str, cell: &Option<String>, data: &Option<String>) -> Result<Option<DragOccurrence>, String> {
        Ok(self.pointer(sheet, cell)?.map(|o| DragOccurrence {
            unit_id: o.unit_id,
            sheet_id: o.sheet_id,
            row: o.row,
            col: o.col,
            data: data.clone(),
        }))
    }

    fn apply(&mut self, step: &Step) -> Result<Value, String> {
        let unit_id = self.workbook.unit_id().clone();
        let services = self.services.clone();

        let result = match step {
            Step::Click { sheet, cell } => {
                services.pointer.click(self.pointer(sheet, cell)?);
                Value::Null
            }
            Step::Hover { sheet, cell } => {
                services.pointer.hover(self.pointer(sheet, cell)?);
                Value::Null
            }
            Step::PointerDown { sheet, cell } => {
                services.pointer.press(self.pointer(sheet, cell)?);
                Value::Null
            }
            Step::PointerUp { sheet, cell } => {
                services.pointer.release(self.pointer(sheet, cell)?);
                Value::Null
            }
            Step::PointerMove { sheet, cell } => {
                services.pointer.move_to(self.pointer(sheet, cell)?);
                Value::Null
            }
            Step::DragOver { sheet, cell, data } => {
                services.drag.drag_over_cell(self.drag(sheet, cell, data)?);
                Value::Null
            }
            Step::Drop { sheet, cell, data } => {
                services.drag.drop_on_cell(self.drag(sheet, cell, data)?);
                Value::Null
            }
            Step::StartEditing { sheet, cell } => {
                let worksheet = self.worksheet(sheet)?;
                services
                    .editor
                    .set_active_cell(&unit_id, worksheet.sheet_id(), parse_cell(cell)?);
                Value::Bool(self.workbook.start_editing())
            }
            Step::TypeText { text } => Value::Bool(services.editor.type_text(&unit_id, text)),
            Step::EndEditing { save } => Value::Bool(smol::block_on(self.workbook.end_editing_confirmed(*save))),
            Step::Copy { sheet, text, html } => {
                let worksheet = self.worksheet(sheet)?;
                Value::Bool(services.clipboard.copy(&unit_id, worksheet.sheet_id(), text, html))
            }
            Step::Paste { sheet } => {
                let worksheet = self.worksheet(sheet)?;
                services
                    .clipboard
                    .paste(&unit_id, worksheet.sheet_id())
                    .map_or(Value::Null, Value::String)
            }
            Step::AddComment { sheet, cell, text } => {
                let range = self.worksheet(sheet)?.get_range_a1(cell).map_err(|e| e.to_string())?;
                Value::Bool(smol::block_on(range.add_comment(text)))
            }
            Step::ClearComments { sheet, range } => {
                let range = self.worksheet(sheet)?.get_range_a1(range).map_err(|e| e.to_string())?;
                Value::Bool(smol::block_on(range.clear_comments()))
            }
            Step::Zoom { sheet, ratio } => facade_result(self.worksheet(sheet)?.zoom(*ratio)),
            Step::Scroll { sheet, cell } => {
                let pos = parse_cell(cell)?;
                Value::Bool(self.worksheet(sheet)?.scroll_to_cell(pos.row, pos.col))
            }
            Step::Dispose { event } => match self.subscriptions.remove(event) {
                Some(handle) => {
                    handle.dispose();
                    Value::Bool(true)
                }
                None => Value::Bool(false),
            },
        };
        Ok(result)
    }

    fn finish(self, subscribed: Vec<String>, steps: Vec<StepOutcome>) -> ReplayReport {
        for handle in self.subscriptions.values() {
            handle.dispose();
        }
        let events = self.events.lock().clone();
        ReplayReport {
            workbook: self.workbook.name().to_string(),
            subscribed,
            steps,
            events,
            commands: self.services.commands.executed_ids(),
        }
    }
}

/// Run a script against a fresh set of in-memory services.
pub fn run(script: &Script, settings: Settings) -> Result<ReplayReport, ReplayError> {
    let mut session = Session::start(script, settings)?;

    let subscribed: Vec<String> = if script.subscribe.is_empty() {
        session
            .host
            .supported_events()
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect()
    } else {
        script.subscribe.clone()
    };
    for name in &subscribed {
        session.subscribe(name)?;
    }

    let mut outcomes = Vec::with_capacity(script.steps.len());
    for (index, step) in script.steps.iter().enumerate() {
        let number = index + 1;
        session.current_step.store(number, Ordering::SeqCst);
        log::debug!("replay step {} {}", number, step.op());

        let result = session.apply(step).map_err(|message| ReplayError::Step {
            step: number,
            op: step.op(),
            message,
        })?;
        outcomes.push(StepOutcome {
            step: number,
            op: step.op(),
            result,
        });
    }

    Ok(session.finish(subscribed, outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(json: &str) -> ReplayReport {
        run(&Script::parse(json).unwrap(), Settings::default()).unwrap()
    }

    #[test]
    fn test_click_is_attributed_to_its_step() {
        let report = replay(
            r#"{
                "subscribe": ["CellClicked"],
                "steps": [
                    { "op": "hover", "sheet": "Sheet1", "cell": "A1" },
                    { "op": "click", "sheet": "Sheet1", "cell": "F4" }
                ]
            }"#,
        );
        assert_eq!(
            report.events,
            vec![DeliveredEvent {
                step: 2,
                event: "CellClicked".to_string(),
                sheet: "Sheet1".to_string(),
                cell: Some("F4".to_string()),
                detail: None,
            }]
        );
    }

    #[test]
    fn test_off_grid_pointer_delivers_nothing() {
        let report = replay(r#"{ "steps": [{ "op": "click", "sheet": "Sheet1" }] }"#);
        assert!(report.events.is_empty());
        assert_eq!(report.subscribed.len(), 17);
    }

    #[test]
    fn test_disposed_subscription_goes_quiet() {
        let report = replay(
            r#"{
                "subscribe": ["CellPointerMove"],
                "steps": [
                    { "op": "pointer_move", "sheet": "Sheet1", "cell": "B2" },
                    { "op": "dispose", "event": "CellPointerMove" },
                    { "op": "pointer_move", "sheet": "Sheet1", "cell": "C3" },
                    { "op": "dispose", "event": "CellPointerMove" }
                ]
            }"#,
        );
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.steps[1].result, Value::Bool(true));
        assert_eq!(report.steps[3].result, Value::Bool(false));
    }

    #[test]
    fn test_edit_session_records_value() {
        let report = replay(
            r#"{
                "subscribe": ["SheetEditChanging", "SheetEditEnded"],
                "steps": [
                    { "op": "start_editing", "sheet": "Sheet1", "cell": "B2" },
                    { "op": "type_text", "text": "42" },
                    { "op": "end_editing" }
                ]
            }"#,
        );
        let ended = report.events_named("SheetEditEnded");
        assert_eq!(ended.len(), 1);
        assert_eq!(ended[0].detail.as_deref(), Some("42"));
        assert_eq!(ended[0].cell.as_deref(), Some("B2"));
        assert_eq!(report.steps[2].result, Value::Bool(true));
    }

    #[test]
    fn test_headless_zoom_reports_error_in_result() {
        let report = replay(
            r#"{
                "workbook": { "headless": true },
                "steps": [{ "op": "zoom", "sheet": "Sheet1", "ratio": 2.0 }]
            }"#,
        );
        assert!(report.steps[0].result.get("error").is_some());
    }

    #[test]
    fn test_unknown_sheet_fails_the_step() {
        let err = run(
            &Script::parse(r#"{ "steps": [{ "op": "click", "sheet": "Nope", "cell": "A1" }] }"#).unwrap(),
            Settings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ReplayError::Step { step: 1, op: "click", .. }));
        assert_eq!(err.exit_code(), EXIT_REPLAY_STEP);
    }

    #[test]
    fn test_unknown_event_fails_setup() {
        let err = run(
            &Script::parse(r#"{ "subscribe": ["NoSuchEvent"] }"#).unwrap(),
            Settings::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), EXIT_REPLAY_SETUP);
    }

    #[test]
    fn test_text_report_lists_steps() {
        let report = replay(
            r#"{
                "subscribe": ["ClipboardChanged"],
                "steps": [{ "op": "copy", "sheet": "Sheet1", "text": "a\tb" }]
            }"#,
        );
        let text = report.render_text();
        assert!(text.contains("step 1 copy -> true"));
        assert!(text.contains("ClipboardChanged Sheet1 \"a\\tb\""));
        assert!(text.ends_with("1 steps, 1 events, 0 commands\n"));
    }
}
