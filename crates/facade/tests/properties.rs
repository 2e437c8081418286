// Property tests for subscription delivery.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

mod common;

use std::sync::Arc;

use proptest::prelude::*;

use cellbridge_engine::occurrence::CellPointerOccurrence;
use cellbridge_facade::prelude::*;

use common::{fixture, log};

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

/// Pointer positions: mostly cells, sometimes off-grid (`None`).
fn arb_pointer() -> impl Strategy<Value = Option<(usize, usize)>> {
    prop_oneof![
        3 => (0usize..200, 0usize..50).prop_map(Some),
        1 => Just(None),
    ]
}

fn occurrence(cell: Option<(usize, usize)>) -> Option<CellPointerOccurrence> {
    cell.map(|(row, col)| CellPointerOccurrence::new("book", "s1", row, col))
}

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn delivers_every_cell_in_order_and_skips_none(
        stream in prop::collection::vec(arb_pointer(), 0..40),
    ) {
        let fx = fixture();
        let seen = log();
        let sink = Arc::clone(&seen);
        let _handle = fx.workbook.on_cell_click(move |p| sink.lock().push((p.row, p.column))).unwrap();

        for cell in &stream {
            fx.services.pointer.click(occurrence(*cell));
        }

        let expected: Vec<_> = stream.iter().flatten().copied().collect();
        prop_assert_eq!(&*seen.lock(), &expected);
    }

    #[test]
    fn nothing_is_delivered_after_dispose(
        before in prop::collection::vec(arb_pointer(), 0..20),
        after in prop::collection::vec(arb_pointer(), 0..20),
        disposals in 1usize..4,
    ) {
        let fx = fixture();
        let seen = log();
        let sink = Arc::clone(&seen);
        let handle = fx.workbook.on_cell_hover(move |p| sink.lock().push((p.row, p.column))).unwrap();

        for cell in &before {
            fx.services.pointer.hover(occurrence(*cell));
        }
        for _ in 0..disposals {
            handle.dispose();
        }
        for cell in &after {
            fx.services.pointer.hover(occurrence(*cell));
        }

        let expected: Vec<_> = before.iter().flatten().copied().collect();
        prop_assert_eq!(&*seen.lock(), &expected);
        prop_assert!(handle.is_disposed());
    }

    #[test]
    fn zoom_always_lands_inside_bounds(ratio in -10.0f64..50.0) {
        let fx = fixture();
        let sheet = fx.workbook.get_active_sheet().unwrap();
        let _ = sheet.zoom(ratio).unwrap();
        let zoom = sheet.get_zoom();
        prop_assert!((0.1..=4.0).contains(&zoom), "zoom {} out of bounds", zoom);
    }
}
