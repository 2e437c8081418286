use parking_lot::Mutex;

use cellbridge_core::{SheetId, UnitId};

use crate::occurrence::ClipboardOccurrence;
use crate::services::ClipboardService;
use crate::signal::{Cancellation, Signal};

#[derive(Debug, Clone, Default)]
struct ClipboardContent {
    text: String,
    html: String,
}

/// Single-slot clipboard.
#[derive(Default)]
pub struct MemoryClipboard {
    content: Mutex<Option<ClipboardContent>>,
    before_change: Signal<ClipboardOccurrence>,
    changed: Signal<ClipboardOccurrence>,
    before_paste: Signal<ClipboardOccurrence>,
    pasted: Signal<ClipboardOccurrence>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy content. Returns false if a `before_change` listener vetoed.
    pub fn copy(&self, unit_id: &UnitId, sheet_id: &SheetId, text: &str, html: &str) -> bool {
        let occurrence = ClipboardOccurrence {
            unit_id: unit_id.clone(),
            sheet_id: sheet_id.clone(),
            text: text.to_string(),
            html: html.to_string(),
            cancel: Cancellation::new(),
        };
        self.before_change.emit(&occurrence);
        if occurrence.cancel.is_cancelled() {
            return false;
        }

        *self.content.lock() = Some(ClipboardContent {
            text: occurrence.text.clone(),
            html: occurrence.html.clone(),
        });
        self.changed.emit(&occurrence);
        true
    }

    /// Paste the current content into a sheet. `None` when the clipboard is
    /// empty or a `before_paste` listener vetoed.
    pub fn paste(&self, unit_id: &UnitId, sheet_id: &SheetId) -> Option<String> {
        let content = self.content.lock().clone()?;
        let occurrence = ClipboardOccurrence {
            unit_id: unit_id.clone(),
            sheet_id: sheet_id.clone(),
            text: content.text,
            html: content.html,
            cancel: Cancellation::new(),
        };
        self.before_paste.emit(&occurrence);
        if occurrence.cancel.is_cancelled() {
            return None;
        }

        self.pasted.emit(&occurrence);
        Some(occurrence.text)
    }
}

impl ClipboardService for MemoryClipboard {
    fn before_change(&self) -> &Signal<ClipboardOccurrence> {
        &self.before_change
    }

    fn changed(&self) -> &Signal<ClipboardOccurrence> {
        &self.changed
    }

    fn before_paste(&self) -> &Signal<ClipboardOccurrence> {
        &self.before_paste
    }

    fn pasted(&self) -> &Signal<ClipboardOccurrence> {
        &self.pasted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_then_paste() {
        let clipboard = MemoryClipboard::new();
        let unit = UnitId::new("book");
        let sheet = SheetId::new("s1");
        assert_eq!(clipboard.paste(&unit, &sheet), None);
        assert!(clipboard.copy(&unit, &sheet, "a\tb", "<table></table>"));
        assert_eq!(clipboard.paste(&unit, &sheet).as_deref(), Some("a\tb"));
    }

    #[test]
    fn test_vetoed_copy_keeps_previous_content() {
        let clipboard = MemoryClipboard::new();
        let unit = UnitId::new("book");
        let sheet = SheetId::new("s1");
        clipboard.copy(&unit, &sheet, "first", "");

        let _veto = clipboard.before_change().subscribe(|o: &ClipboardOccurrence| o.cancel.cancel());
        assert!(!clipboard.copy(&unit, &sheet, "second", ""));
        assert_eq!(clipboard.paste(&unit, &sheet).as_deref(), Some("first"));
    }
}
