use std::sync::Arc;

use cellbridge_core::{CellRect, RangeRef, ScrollState};
use cellbridge_engine::occurrence::ScrollOccurrence;
use cellbridge_engine::services::RenderSurface;
use cellbridge_engine::{Disposable, Injector, SheetCommand};

use crate::error::FacadeError;
use crate::event::dispatch::{signal_binder, DispatchContext};
use crate::event::name::names;
use crate::event::schema::{EventParams, ParamKind, Scroll, ScrollEventParams};
use crate::extension::{Extension, FacadeKind, InstallContext};
use crate::range::Range;
use crate::worksheet::Worksheet;

/// Zoom, scroll and viewport queries on the rendered canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasExtension;

impl Extension for CanvasExtension {
    fn name(&self) -> &'static str {
        "canvas"
    }

    fn members(&self) -> Vec<(FacadeKind, Vec<&'static str>)> {
        vec![
            (
                FacadeKind::Worksheet,
                vec![
                    "refresh_canvas",
                    "zoom",
                    "get_zoom",
                    "get_visible_range",
                    "scroll_to_cell",
                    "get_scroll_state",
                    "on_scroll",
                ],
            ),
            (FacadeKind::Range, vec!["get_cell_rect"]),
        ]
    }

    fn install(&self, ctx: &mut InstallContext<'_>) -> Result<(), FacadeError> {
        ctx.provide(
            names::SCROLL.as_str(),
            ParamKind::Scroll,
            signal_binder(|inj: &Injector| inj.scroll().scrolled().clone(), map_scroll),
        )?;
        Ok(())
    }
}

fn map_scroll(ctx: &DispatchContext, o: &ScrollOccurrence) -> Option<EventParams> {
    let (workbook, worksheet) = ctx.resolve(&o.unit_id, &o.sheet_id)?;
    Some(EventParams::Scroll(ScrollEventParams {
        workbook,
        worksheet,
        state: o.state,
    }))
}

fn render_surface(worksheet: &Worksheet) -> Result<Arc<dyn RenderSurface>, FacadeError> {
    let unit_id = worksheet.workbook().unit_id();
    worksheet
        .workbook()
        .injector()
        .render()
        .get_render(unit_id)
        .ok_or_else(|| FacadeError::NotFound(format!("render surface for {unit_id}")))
}

pub trait WorksheetCanvasExt {
    /// Recompute layout and repaint this sheet.
    fn refresh_canvas(&self) -> Result<(), FacadeError>;

    /// Set the zoom ratio, clamped to the configured bounds. Returns whether
    /// the zoom command succeeded.
    fn zoom(&self, ratio: f64) -> Result<bool, FacadeError>;

    fn get_zoom(&self) -> f64;

    /// Cells currently inside the viewport.
    fn get_visible_range(&self) -> Result<RangeRef, FacadeError>;

    /// Bring a cell to the top-left corner of the viewport.
    fn scroll_to_cell(&self, row: usize, col: usize) -> bool;

    /// Current scroll position; the origin if the sheet never scrolled.
    fn get_scroll_state(&self) -> ScrollState;

    fn on_scroll(&self, callback: impl Fn(&ScrollEventParams) + Send + Sync + 'static) -> Result<Disposable, FacadeError>;
}

impl WorksheetCanvasExt for Worksheet {
    fn refresh_canvas(&self) -> Result<(), FacadeError> {
        render_surface(self)?.refresh(self.sheet_id());
        Ok(())
    }

    fn zoom(&self, ratio: f64) -> Result<bool, FacadeError> {
        let surface = render_surface(self)?;
        let injector = self.workbook().injector();
        let zoom_ratio = injector.settings().clamp_zoom(ratio);
        if zoom_ratio != ratio {
            log::debug!("zoom {} clamped to {}", ratio, zoom_ratio);
        }

        let applied = injector.commands().sync_execute(&SheetCommand::SetZoomRatio {
            unit_id: self.workbook().unit_id().clone(),
            sheet_id: self.sheet_id().clone(),
            zoom_ratio,
        });
        if applied {
            surface.refresh(self.sheet_id());
        }
        Ok(applied)
    }

    fn get_zoom(&self) -> f64 {
        self.model().map(|s| s.zoom_ratio).unwrap_or(1.0)
    }

    fn get_visible_range(&self) -> Result<RangeRef, FacadeError> {
        render_surface(self)?
            .visible_range(self.sheet_id())
            .ok_or_else(|| FacadeError::NotFound(format!("layout of sheet {}", self.sheet_id())))
    }

    fn scroll_to_cell(&self, row: usize, col: usize) -> bool {
        self.workbook().injector().commands().sync_execute(&SheetCommand::ScrollToCell {
            unit_id: self.workbook().unit_id().clone(),
            sheet_id: self.sheet_id().clone(),
            row,
            col,
        })
    }

    fn get_scroll_state(&self) -> ScrollState {
        self.workbook()
            .injector()
            .scroll()
            .scroll_state(self.workbook().unit_id(), self.sheet_id())
            .unwrap_or_default()
    }

    fn on_scroll(&self, callback: impl Fn(&ScrollEventParams) + Send + Sync + 'static) -> Result<Disposable, FacadeError> {
        let sheet_id = self.sheet_id().clone();
        self.workbook().on::<Scroll>(move |params: &ScrollEventParams| {
            if params.worksheet.sheet_id() == &sheet_id {
                callback(params);
            }
        })
    }
}

pub trait RangeCanvasExt {
    /// Canvas rectangle of the range's top-left cell.
    fn get_cell_rect(&self) -> Result<CellRect, FacadeError>;
}

impl RangeCanvasExt for Range {
    fn get_cell_rect(&self) -> Result<CellRect, FacadeError> {
        let worksheet = self.worksheet();
        let pos = self.range_ref().top_left();
        render_surface(worksheet)?
            .cell_rect(worksheet.sheet_id(), pos)
            .ok_or_else(|| FacadeError::NotFound(format!("cell {} on sheet {}", pos.to_a1(), worksheet.sheet_id())))
    }
}
