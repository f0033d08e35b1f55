//! Panel multiplexer: decides what each panel shows and serializes access
//! to the shared bus.
//!
//! The two panels cannot be addressed simultaneously. Every refresh runs
//! the same cycle: assert the target panel's chip-select (the bus
//! implementation deasserts the other), issue the blits, hold for the
//! settle delay, deassert. When both panels are dirty in one iteration
//! they are serviced sequentially, hours first.

use duoclock_hal::{PanelBus, PanelId, TimeBase, WallClock};

use crate::glyphs::{Glyph, GlyphStore};

/// Panel resolution in pixels (portrait).
pub const PANEL_WIDTH: u32 = 170;
pub const PANEL_HEIGHT: u32 = 320;

/// Chip-select hold time after the blits of one refresh transaction.
pub const SETTLE_MS: u32 = 50;

/// How long the splash overlay stays up after a mode press.
pub const SPLASH_HOLD_MS: u32 = 400;

/// The hour/minute pair the engine has decided to show. Not always the
/// literal wall-clock value: see [`display_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTime {
    pub hour: u8,
    pub minute: u8,
}

/// Compute what to show for `clock`.
///
/// A panel refresh plus settle time eats a noticeable fraction of a
/// second, so during the final second of a minute the upcoming value is
/// rendered instead of the literal one; the panel is then already correct
/// at the moment the minute changes. Below second 59 the literal time is
/// used unmodified.
pub fn display_time(clock: &WallClock) -> DisplayTime {
    if clock.second >= 59 {
        let minute = (clock.minute + 1) % 60;
        let hour = if minute == 0 {
            (clock.hour + 1) % 24
        } else {
            clock.hour
        };
        DisplayTime { hour, minute }
    } else {
        DisplayTime {
            hour: clock.hour,
            minute: clock.minute,
        }
    }
}

/// Split a 0-99 value into its tens and units digits.
fn split_digits(value: u8) -> (u8, u8) {
    (value / 10, value % 10)
}

/// Multiplexer state. `RenderingPanel` and `ShowingSplash` are mutually
/// exclusive; a button edge arriving mid-render is observed at the next
/// poll, with the mux back in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuxState {
    Idle,
    RenderingPanel(PanelId),
    ShowingSplash,
}

/// Per-panel dirty tracking: the digit pair last pushed over the bus,
/// `None` until the first render (and again after a splash).
#[derive(Debug, Default)]
struct PanelSurface {
    last_rendered: Option<(u8, u8)>,
}

/// Owns the shared bus, both panel surfaces and the images they show.
pub struct PanelMux<B: PanelBus> {
    bus: B,
    glyphs: GlyphStore,
    splash: Glyph,
    surfaces: [PanelSurface; 2],
    state: MuxState,
}

impl<B: PanelBus> PanelMux<B> {
    pub fn new(bus: B, glyphs: GlyphStore, splash: Glyph) -> Self {
        Self {
            bus,
            glyphs,
            splash,
            surfaces: [PanelSurface::default(), PanelSurface::default()],
            state: MuxState::Idle,
        }
    }

    pub fn state(&self) -> MuxState {
        self.state
    }

    /// Bring both panels up to date with `shown`. Only a changed digit
    /// pair costs a bus transaction; issuing the same value twice in a
    /// row is a no-op.
    pub fn sync<T: TimeBase>(&mut self, shown: DisplayTime, tb: &mut T) -> Result<(), B::Error> {
        for panel in PanelId::ALL {
            let digits = match panel {
                PanelId::Hours => split_digits(shown.hour),
                PanelId::Minutes => split_digits(shown.minute),
            };
            if self.surfaces[panel.index()].last_rendered != Some(digits) {
                self.render_panel(panel, digits, tb)?;
            }
        }
        Ok(())
    }

    /// One full refresh transaction for `panel`:
    /// select -> blit tens -> blit units -> settle -> deselect.
    fn render_panel<T: TimeBase>(
        &mut self,
        panel: PanelId,
        digits: (u8, u8),
        tb: &mut T,
    ) -> Result<(), B::Error> {
        let (tens, units) = digits;
        log::debug!("render {:?}: {}{}", panel, tens, units);
        self.state = MuxState::RenderingPanel(panel);

        let glyph_w = self.glyphs.glyph(tens).width;
        let glyph_h = self.glyphs.glyph(tens).height;
        let x0 = PANEL_WIDTH.saturating_sub(2 * glyph_w) / 2;
        let y0 = PANEL_HEIGHT.saturating_sub(glyph_h) / 2;

        self.bus.select(panel)?;
        self.bus.blit(x0, y0, self.glyphs.glyph(tens).as_bitmap())?;
        self.bus.blit(x0 + glyph_w, y0, self.glyphs.glyph(units).as_bitmap())?;
        tb.delay_ms(SETTLE_MS);
        self.bus.deselect_all()?;

        self.surfaces[panel.index()].last_rendered = Some(digits);
        self.state = MuxState::Idle;
        Ok(())
    }

    /// Transient overlay on a mode press: release both chip-selects,
    /// render the splash in the no-panel addressing state, hold, return
    /// to normal addressing. The overlay clobbers the panel contents, so
    /// both surfaces are invalidated and repaint on the next sync.
    pub fn show_splash<T: TimeBase>(&mut self, tb: &mut T) -> Result<(), B::Error> {
        log::info!("mode press: showing splash");
        self.state = MuxState::ShowingSplash;

        self.bus.deselect_all()?;
        let x = PANEL_WIDTH.saturating_sub(self.splash.width) / 2;
        let y = PANEL_HEIGHT.saturating_sub(self.splash.height) / 2;
        self.bus.blit(x, y, self.splash.as_bitmap())?;
        tb.delay_ms(SPLASH_HOLD_MS);

        for surface in &mut self.surfaces {
            surface.last_rendered = None;
        }
        self.state = MuxState::Idle;
        Ok(())
    }
}
