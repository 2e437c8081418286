use cellbridge_engine::occurrence::{CellPointerOccurrence, DragOccurrence};
use cellbridge_engine::{Disposable, Injector, Signal};

use crate::error::FacadeError;
use crate::event::dispatch::{signal_binder, DispatchContext};
use crate::event::name::names;
use crate::event::schema::{
    CellClicked, CellEventParams, CellHover, CellPointerDown, CellPointerMove, CellPointerUp, DragEventParams,
    DragOver, Drop, EventParams, ParamKind,
};
use crate::extension::{Extension, FacadeKind, InstallContext};
use crate::workbook::Workbook;

type PointerSource = fn(&Injector) -> Signal<Option<CellPointerOccurrence>>;
type DragSource = fn(&Injector) -> Signal<Option<DragOccurrence>>;

/// Pointer, hover and drag/drop events on cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellEventsExtension;

impl Extension for CellEventsExtension {
    fn name(&self) -> &'static str {
        "cell-events"
    }

    fn members(&self) -> Vec<(FacadeKind, Vec<&'static str>)> {
        vec![(
            FacadeKind::Workbook,
            vec![
                "on_cell_click",
                "on_cell_hover",
                "on_cell_pointer_down",
                "on_cell_pointer_up",
                "on_cell_pointer_move",
                "on_drag_over",
                "on_drop",
            ],
        )]
    }

    fn install(&self, ctx: &mut InstallContext<'_>) -> Result<(), FacadeError> {
        let pointer: [(&str, PointerSource); 5] = [
            (names::CELL_CLICKED.as_str(), |inj| inj.pointer().clicked_cell().clone()),
            (names::CELL_POINTER_DOWN.as_str(), |inj| inj.pointer().pointer_down().clone()),
            (names::CELL_POINTER_UP.as_str(), |inj| inj.pointer().pointer_up().clone()),
            (names::CELL_POINTER_MOVE.as_str(), |inj| inj.pointer().pointer_move().clone()),
            (names::CELL_HOVER.as_str(), |inj| inj.pointer().hover_cell().clone()),
        ];
        for (name, select) in pointer {
            ctx.provide(name, ParamKind::Cell, signal_binder(select, map_pointer))?;
        }

        let drag: [(&str, DragSource); 2] = [
            (names::DRAG_OVER.as_str(), |inj| inj.drag().drag_over().clone()),
            (names::DROP.as_str(), |inj| inj.drag().drop_cell().clone()),
        ];
        for (name, select) in drag {
            ctx.provide(name, ParamKind::Drag, signal_binder(select, map_drag))?;
        }
        Ok(())
    }
}

// `None` = pointer over no cell; never delivered.
fn map_pointer(ctx: &DispatchContext, o: &Option<CellPointerOccurrence>) -> Option<EventParams> {
    let o = o.as_ref()?;
    let (workbook, worksheet) = ctx.resolve(&o.unit_id, &o.sheet_id)?;
    Some(EventParams::Cell(CellEventParams {
        workbook,
        worksheet,
        row: o.row,
        column: o.col,
    }))
}

fn map_drag(ctx: &DispatchContext, o: &Option<DragOccurrence>) -> Option<EventParams> {
    let o = o.as_ref()?;
    let (workbook, worksheet) = ctx.resolve(&o.unit_id, &o.sheet_id)?;
    Some(EventParams::Drag(DragEventParams {
        workbook,
        worksheet,
        row: o.row,
        column: o.col,
        data: o.data.clone(),
    }))
}

pub trait WorkbookCellEventsExt {
    fn on_cell_click(&self, callback: impl Fn(&CellEventParams) + Send + Sync + 'static) -> Result<Disposable, FacadeError>;

    fn on_cell_hover(&self, callback: impl Fn(&CellEventParams) + Send + Sync + 'static) -> Result<Disposable, FacadeError>;

    fn on_cell_pointer_down(
        &self,
        callback: impl Fn(&CellEventParams) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError>;

    fn on_cell_pointer_up(
        &self,
        callback: impl Fn(&CellEventParams) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError>;

    fn on_cell_pointer_move(
        &self,
        callback: impl Fn(&CellEventParams) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError>;

    fn on_drag_over(&self, callback: impl Fn(&DragEventParams) + Send + Sync + 'static) -> Result<Disposable, FacadeError>;

    fn on_drop(&self, callback: impl Fn(&DragEventParams) + Send + Sync + 'static) -> Result<Disposable, FacadeError>;
}

impl WorkbookCellEventsExt for Workbook {
    fn on_cell_click(&self, callback: impl Fn(&CellEventParams) + Send + Sync + 'static) -> Result<Disposable, FacadeError> {
        self.on::<CellClicked>(callback)
    }

    fn on_cell_hover(&self, callback: impl Fn(&CellEventParams) + Send + Sync + 'static) -> Result<Disposable, FacadeError> {
        self.on::<CellHover>(callback)
    }

    fn on_cell_pointer_down(
        &self,
        callback: impl Fn(&CellEventParams) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError> {
        self.on::<CellPointerDown>(callback)
    }

    fn on_cell_pointer_up(
        &self,
        callback: impl Fn(&CellEventParams) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError> {
        self.on::<CellPointerUp>(callback)
    }

    fn on_cell_pointer_move(
        &self,
        callback: impl Fn(&CellEventParams) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError> {
        self.on::<CellPointerMove>(callback)
    }

    fn on_drag_over(&self, callback: impl Fn(&DragEventParams) + Send + Sync + 'static) -> Result<Disposable, FacadeError> {
        self.on::<DragOver>(callback)
    }

    fn on_drop(&self, callback: impl Fn(&DragEventParams) + Send + Sync + 'static) -> Result<Disposable, FacadeError> {
        self.on::<Drop>(callback)
    }
}
