//! Integration tests for PanelMux using a recording mock bus.
//!
//! Verifies the arbitration protocol (select -> blit -> settle ->
//! deselect, one panel at a time), dirty tracking, and the splash
//! overlay's no-panel addressing state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use duoclock_core::panel::{PANEL_HEIGHT, PANEL_WIDTH, SETTLE_MS, SPLASH_HOLD_MS};
use duoclock_core::{display_time, DisplayTime, Glyph, GlyphStore, MuxState, PanelMux};
use duoclock_hal::{BitmapRef, PanelBus, PanelId, TimeBase, WallClock};

/// Captured bus operation. Blits record the first pixel so tests can tell
/// which glyph was pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BusOp {
    Select(PanelId),
    DeselectAll,
    Blit { x: u32, y: u32, tag: u16 },
}

#[derive(Debug)]
struct MockBusError;

/// Mock panel bus that records every operation.
#[derive(Clone)]
struct MockBus {
    ops: Rc<RefCell<Vec<BusOp>>>,
}

impl MockBus {
    fn new() -> Self {
        Self {
            ops: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn ops(&self) -> Vec<BusOp> {
        self.ops.borrow().clone()
    }

    fn clear(&self) {
        self.ops.borrow_mut().clear();
    }
}

impl PanelBus for MockBus {
    type Error = MockBusError;

    fn select(&mut self, panel: PanelId) -> Result<(), Self::Error> {
        self.ops.borrow_mut().push(BusOp::Select(panel));
        Ok(())
    }

    fn deselect_all(&mut self) -> Result<(), Self::Error> {
        self.ops.borrow_mut().push(BusOp::DeselectAll);
        Ok(())
    }

    fn blit(&mut self, x: u32, y: u32, bitmap: BitmapRef<'_>) -> Result<(), Self::Error> {
        self.ops.borrow_mut().push(BusOp::Blit {
            x,
            y,
            tag: bitmap.pixels[0],
        });
        Ok(())
    }
}

/// Mock timebase: `delay_ms` advances the clock, nothing sleeps.
#[derive(Clone)]
struct MockTimeBase {
    now: Rc<Cell<u64>>,
}

impl MockTimeBase {
    fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
        }
    }
}

impl TimeBase for MockTimeBase {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now.set(self.now.get() + u64::from(ms));
    }
}

const GLYPH_W: u32 = 10;
const GLYPH_H: u32 = 16;
const SPLASH_TAG: u16 = 0xABCD;

fn digit_glyph(digit: u16) -> Glyph {
    Glyph {
        width: GLYPH_W,
        height: GLYPH_H,
        pixels: vec![digit; (GLYPH_W * GLYPH_H) as usize],
    }
}

fn make_mux() -> (PanelMux<MockBus>, MockBus, MockTimeBase) {
    let bus = MockBus::new();
    let store = GlyphStore::new(std::array::from_fn(|i| digit_glyph(i as u16)));
    let splash = Glyph {
        width: 60,
        height: 40,
        pixels: vec![SPLASH_TAG; 60 * 40],
    };
    let mux = PanelMux::new(bus.clone(), store, splash);
    (mux, bus, MockTimeBase::new())
}

fn shown(hour: u8, minute: u8) -> DisplayTime {
    display_time(&WallClock {
        hour,
        minute,
        second: 0,
    })
}

// ============================================================================
// Render cycle shape
// ============================================================================

mod render_cycle_tests {
    use super::*;

    #[test]
    fn first_sync_renders_both_panels_sequentially() {
        let (mut mux, bus, mut tb) = make_mux();
        mux.sync(shown(12, 34), &mut tb).unwrap();

        let x0 = (PANEL_WIDTH - 2 * GLYPH_W) / 2;
        let y0 = (PANEL_HEIGHT - GLYPH_H) / 2;
        assert_eq!(
            bus.ops(),
            vec![
                BusOp::Select(PanelId::Hours),
                BusOp::Blit { x: x0, y: y0, tag: 1 },
                BusOp::Blit { x: x0 + GLYPH_W, y: y0, tag: 2 },
                BusOp::DeselectAll,
                BusOp::Select(PanelId::Minutes),
                BusOp::Blit { x: x0, y: y0, tag: 3 },
                BusOp::Blit { x: x0 + GLYPH_W, y: y0, tag: 4 },
                BusOp::DeselectAll,
            ]
        );
    }

    #[test]
    fn settle_delay_held_per_transaction() {
        let (mut mux, _bus, mut tb) = make_mux();
        mux.sync(shown(12, 34), &mut tb).unwrap();
        // Two transactions, one settle window each.
        assert_eq!(tb.now_ms(), 2 * u64::from(SETTLE_MS));
    }

    #[test]
    fn mux_returns_to_idle() {
        let (mut mux, _bus, mut tb) = make_mux();
        mux.sync(shown(6, 7), &mut tb).unwrap();
        assert_eq!(mux.state(), MuxState::Idle);
    }
}

// ============================================================================
// Dirty tracking
// ============================================================================

mod dirty_tracking_tests {
    use super::*;

    #[test]
    fn same_value_twice_is_a_noop() {
        let (mut mux, bus, mut tb) = make_mux();
        mux.sync(shown(12, 34), &mut tb).unwrap();
        bus.clear();

        mux.sync(shown(12, 34), &mut tb).unwrap();
        assert!(bus.ops().is_empty());
    }

    #[test]
    fn minute_change_touches_only_minutes_panel() {
        let (mut mux, bus, mut tb) = make_mux();
        mux.sync(shown(12, 34), &mut tb).unwrap();
        bus.clear();

        mux.sync(shown(12, 35), &mut tb).unwrap();
        let ops = bus.ops();
        assert_eq!(ops[0], BusOp::Select(PanelId::Minutes));
        assert!(!ops.contains(&BusOp::Select(PanelId::Hours)));
    }

    #[test]
    fn same_digits_different_panels_tracked_independently() {
        let (mut mux, bus, mut tb) = make_mux();
        // 22:22 -> both panels show (2, 2); both must still render once.
        mux.sync(shown(22, 22), &mut tb).unwrap();
        let selects = bus
            .ops()
            .iter()
            .filter(|op| matches!(op, BusOp::Select(_)))
            .count();
        assert_eq!(selects, 2);
    }
}

// ============================================================================
// Mutual exclusion
// ============================================================================

mod mutual_exclusion_tests {
    use super::*;

    /// Replay the op stream and check that at most one chip-select is
    /// asserted at any instant, and none during splash blits.
    fn check_exclusion(ops: &[BusOp]) {
        let mut asserted: Option<PanelId> = None;
        for op in ops {
            match op {
                BusOp::Select(panel) => {
                    // A select may only happen with the bus released;
                    // the protocol deselects between transactions.
                    assert!(asserted.is_none(), "select while {:?} asserted", asserted);
                    asserted = Some(*panel);
                }
                BusOp::DeselectAll => asserted = None,
                BusOp::Blit { tag, .. } => {
                    if *tag == SPLASH_TAG {
                        assert!(asserted.is_none(), "splash blit with a panel asserted");
                    }
                }
            }
        }
        assert!(asserted.is_none(), "bus left asserted after op stream");
    }

    #[test]
    fn normal_operation_never_overlaps_chip_selects() {
        let (mut mux, bus, mut tb) = make_mux();
        mux.sync(shown(23, 59), &mut tb).unwrap();
        mux.sync(shown(0, 0), &mut tb).unwrap();
        mux.sync(shown(0, 1), &mut tb).unwrap();
        check_exclusion(&bus.ops());
    }

    #[test]
    fn splash_runs_with_both_deselected() {
        let (mut mux, bus, mut tb) = make_mux();
        mux.sync(shown(10, 30), &mut tb).unwrap();
        mux.show_splash(&mut tb).unwrap();
        check_exclusion(&bus.ops());
    }
}

// ============================================================================
// Splash overlay
// ============================================================================

mod splash_tests {
    use super::*;

    #[test]
    fn splash_releases_bus_then_blits() {
        let (mut mux, bus, mut tb) = make_mux();
        mux.show_splash(&mut tb).unwrap();

        let ops = bus.ops();
        assert_eq!(ops[0], BusOp::DeselectAll);
        assert!(matches!(ops[1], BusOp::Blit { tag: SPLASH_TAG, .. }));
        assert_eq!(tb.now_ms(), u64::from(SPLASH_HOLD_MS));
    }

    #[test]
    fn splash_invalidates_both_surfaces() {
        let (mut mux, bus, mut tb) = make_mux();
        mux.sync(shown(12, 34), &mut tb).unwrap();
        mux.show_splash(&mut tb).unwrap();
        bus.clear();

        // Same display value, but the overlay clobbered the panels:
        // both must repaint.
        mux.sync(shown(12, 34), &mut tb).unwrap();
        let selects: Vec<_> = bus
            .ops()
            .iter()
            .filter(|op| matches!(op, BusOp::Select(_)))
            .cloned()
            .collect();
        assert_eq!(
            selects,
            vec![BusOp::Select(PanelId::Hours), BusOp::Select(PanelId::Minutes)]
        );
    }
}
