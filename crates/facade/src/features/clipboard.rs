use cellbridge_engine::occurrence::ClipboardOccurrence;
use cellbridge_engine::{Disposable, Injector, Signal};

use crate::error::FacadeError;
use crate::event::dispatch::{signal_binder, DispatchContext};
use crate::event::name::names;
use crate::event::schema::{
    BeforeClipboardChange, BeforeClipboardPaste, ClipboardChanged, ClipboardEventParams, ClipboardPasted, EventParams,
    ParamKind,
};
use crate::extension::{Extension, FacadeKind, InstallContext};
use crate::workbook::Workbook;

/// Copy and paste events.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClipboardExtension;

impl Extension for ClipboardExtension {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    fn members(&self) -> Vec<(FacadeKind, Vec<&'static str>)> {
        vec![(
            FacadeKind::Workbook,
            vec![
                "on_before_clipboard_change",
                "on_clipboard_changed",
                "on_before_clipboard_paste",
                "on_clipboard_pasted",
            ],
        )]
    }

    fn install(&self, ctx: &mut InstallContext<'_>) -> Result<(), FacadeError> {
        let sources: [(&str, fn(&Injector) -> Signal<ClipboardOccurrence>); 4] = [
            (names::BEFORE_CLIPBOARD_CHANGE.as_str(), |inj| inj.clipboard().before_change().clone()),
            (names::CLIPBOARD_CHANGED.as_str(), |inj| inj.clipboard().changed().clone()),
            (names::BEFORE_CLIPBOARD_PASTE.as_str(), |inj| inj.clipboard().before_paste().clone()),
            (names::CLIPBOARD_PASTED.as_str(), |inj| inj.clipboard().pasted().clone()),
        ];
        for (name, select) in sources {
            ctx.provide(name, ParamKind::Clipboard, signal_binder(select, map_clipboard))?;
        }
        Ok(())
    }
}

fn map_clipboard(ctx: &DispatchContext, o: &ClipboardOccurrence) -> Option<EventParams> {
    let (workbook, worksheet) = ctx.resolve(&o.unit_id, &o.sheet_id)?;
    Some(EventParams::Clipboard(ClipboardEventParams::new(
        workbook,
        worksheet,
        o.text.clone(),
        o.html.clone(),
        o.cancel.clone(),
    )))
}

/// Typed clipboard subscriptions. `Before*` callbacks may call
/// [`ClipboardEventParams::cancel`] to veto the copy or paste.
pub trait WorkbookClipboardExt {
    fn on_before_clipboard_change(
        &self,
        callback: impl Fn(&ClipboardEventParams) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError>;

    fn on_clipboard_changed(
        &self,
        callback: impl Fn(&ClipboardEventParams) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError>;

    fn on_before_clipboard_paste(
        &self,
        callback: impl Fn(&ClipboardEventParams) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError>;

    fn on_clipboard_pasted(
        &self,
        callback: impl Fn(&ClipboardEventParams) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError>;
}

impl WorkbookClipboardExt for Workbook {
    fn on_before_clipboard_change(
        &self,
        callback: impl Fn(&ClipboardEventParams) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError> {
        self.on::<BeforeClipboardChange>(callback)
    }

    fn on_clipboard_changed(
        &self,
        callback: impl Fn(&ClipboardEventParams) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError> {
        self.on::<ClipboardChanged>(callback)
    }

    fn on_before_clipboard_paste(
        &self,
        callback: impl Fn(&ClipboardEventParams) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError> {
        self.on::<BeforeClipboardPaste>(callback)
    }

    fn on_clipboard_pasted(
        &self,
        callback: impl Fn(&ClipboardEventParams) + Send + Sync + 'static,
    ) -> Result<Disposable, FacadeError> {
        self.on::<ClipboardPasted>(callback)
    }
}
