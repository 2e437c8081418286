use std::future::Future;
use std::sync::Arc;

use smol::future::{Boxed, FutureExt};

use cellbridge_core::{DeviceInputEventType, KeyCode};
use cellbridge_engine::occurrence::{EditChangingOccurrence, EditEndOccurrence, EditStartOccurrence};
use cellbridge_engine::{Injector, SheetCommand};

use crate::error::FacadeError;
use crate::event::dispatch::{signal_binder, DispatchContext};
use crate::event::name::names;
use crate::event::schema::{EditChangingParams, EditEndParams, EditStartParams, EventParams, ParamKind};
use crate::extension::{Extension, FacadeKind, InstallContext};
use crate::workbook::Workbook;

/// Cell edit lifecycle events plus programmatic start/end of edit mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditingExtension;

impl Extension for EditingExtension {
    fn name(&self) -> &'static str {
        "editing"
    }

    fn members(&self) -> Vec<(FacadeKind, Vec<&'static str>)> {
        vec![(
            FacadeKind::Workbook,
            vec!["start_editing", "end_editing", "end_editing_confirmed", "is_editing"],
        )]
    }

    fn install(&self, ctx: &mut InstallContext<'_>) -> Result<(), FacadeError> {
        ctx.provide(
            names::BEFORE_SHEET_EDIT_START.as_str(),
            ParamKind::EditStart,
            signal_binder(|inj: &Injector| inj.editor().before_start().clone(), map_start),
        )?;
        ctx.provide(
            names::SHEET_EDIT_STARTED.as_str(),
            ParamKind::EditStart,
            signal_binder(|inj: &Injector| inj.editor().started().clone(), map_start),
        )?;
        ctx.provide(
            names::SHEET_EDIT_CHANGING.as_str(),
            ParamKind::EditChanging,
            signal_binder(|inj: &Injector| inj.editor().changing().clone(), map_changing),
        )?;
        ctx.provide(
            names::BEFORE_SHEET_EDIT_END.as_str(),
            ParamKind::EditEnd,
            signal_binder(|inj: &Injector| inj.editor().before_end().clone(), map_end),
        )?;
        ctx.provide(
            names::SHEET_EDIT_ENDED.as_str(),
            ParamKind::EditEnd,
            signal_binder(|inj: &Injector| inj.editor().ended().clone(), map_end),
        )?;
        Ok(())
    }
}

fn map_start(ctx: &DispatchContext, o: &EditStartOccurrence) -> Option<EventParams> {
    let (workbook, worksheet) = ctx.resolve(&o.unit_id, &o.sheet_id)?;
    Some(EventParams::EditStart(EditStartParams::new(
        workbook,
        worksheet,
        o.row,
        o.col,
        o.event_type,
        o.key_code,
        o.is_zen_editor,
        o.cancel.clone(),
    )))
}

fn map_changing(ctx: &DispatchContext, o: &EditChangingOccurrence) -> Option<EventParams> {
    let (workbook, worksheet) = ctx.resolve(&o.unit_id, &o.sheet_id)?;
    Some(EventParams::EditChanging(EditChangingParams {
        workbook,
        worksheet,
        row: o.row,
        column: o.col,
        value: o.value.clone(),
        is_zen_editor: o.is_zen_editor,
    }))
}

fn map_end(ctx: &DispatchContext, o: &EditEndOccurrence) -> Option<EventParams> {
    let (workbook, worksheet) = ctx.resolve(&o.unit_id, &o.sheet_id)?;
    Some(EventParams::EditEnd(EditEndParams::new(
        workbook,
        worksheet,
        o.row,
        o.col,
        o.value.clone(),
        o.event_type,
        o.key_code,
        o.is_zen_editor,
        o.is_confirm,
        o.cancel.clone(),
    )))
}

pub trait WorkbookEditingExt {
    /// Enter edit mode on the active cell, as a double click would.
    fn start_editing(&self) -> bool;

    /// Leave edit mode, committing (`save`) or discarding the edit.
    ///
    /// Waits `editing.endEditTicks` scheduler ticks, then resolves `true`
    /// whether or not the editor actually closed.
    fn end_editing(&self, save: bool) -> Boxed<bool>;

    /// Like [`end_editing`](Self::end_editing), but resolves to whether edit
    /// mode is over once the wait has elapsed.
    fn end_editing_confirmed(&self, save: bool) -> Boxed<bool>;

    fn is_editing(&self) -> bool;
}

impl WorkbookEditingExt for Workbook {
    fn start_editing(&self) -> bool {
        self.injector().commands().sync_execute(&SheetCommand::SetCellEditVisible {
            unit_id: self.unit_id().clone(),
            visible: true,
            event_type: DeviceInputEventType::Dblclick,
            key_code: None,
        })
    }

    fn end_editing(&self, save: bool) -> Boxed<bool> {
        let wait = request_end(self, save);
        async move {
            wait.await;
            true
        }
        .boxed()
    }

    fn end_editing_confirmed(&self, save: bool) -> Boxed<bool> {
        let editor = Arc::clone(self.injector().editor());
        let unit_id = self.unit_id().clone();
        let wait = request_end(self, save);
        async move {
            let accepted = wait.await;
            accepted && !editor.is_editing(&unit_id)
        }
        .boxed()
    }

    fn is_editing(&self) -> bool {
        self.injector().editor().is_editing(self.unit_id())
    }
}

/// Submit the close request now; the returned future yields the configured
/// ticks and then reports whether the request was accepted.
fn request_end(workbook: &Workbook, save: bool) -> impl Future<Output = bool> + Send + 'static {
    let key_code = if save { KeyCode::Enter } else { KeyCode::Esc };
    let accepted = workbook.injector().commands().sync_execute(&SheetCommand::SetCellEditVisible {
        unit_id: workbook.unit_id().clone(),
        visible: false,
        event_type: DeviceInputEventType::Keyboard,
        key_code: Some(key_code),
    });
    if !accepted {
        log::debug!("close request for {} was not accepted", workbook.unit_id());
    }

    let ticks = workbook.injector().settings().end_edit_ticks;
    async move {
        for _ in 0..ticks {
            smol::future::yield_now().await;
        }
        accepted
    }
}
