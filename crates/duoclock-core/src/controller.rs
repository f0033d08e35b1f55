//! Top-level synchronization loop.
//!
//! Single-threaded cooperative polling: one RTC read per iteration, the
//! indicator refresh gated on a second change, then the panel sync, then
//! the button poll. Everything is synchronous and blocking; ordering
//! within an iteration is the whole locking discipline, so no step may be
//! reordered.

use duoclock_hal::{IndicatorPort, InputLine, PanelBus, RtcDevice, TimeBase};

use crate::debounce::DebouncedButton;
use crate::indicator::IndicatorDriver;
use crate::panel::{display_time, PanelMux};

/// Upper bound on the sleep between iterations (>= 10 Hz poll rate).
pub const TICK_MS: u32 = 100;

/// A peripheral failure, tagged with the device it came from. Propagates
/// to the host process, which decides between retry and termination.
#[derive(Debug)]
pub enum ControllerError<R, B, P> {
    /// RTC read or write failed.
    Rtc(R),
    /// Panel bus transaction failed.
    Bus(B),
    /// Indicator output write failed.
    Indicator(P),
}

/// Owns every peripheral and drives the clock. Resources are injected at
/// construction so the bus arbitration invariant has a single owner.
pub struct Controller<R, B, P, L, T>
where
    R: RtcDevice,
    B: PanelBus,
    P: IndicatorPort,
    L: InputLine,
    T: TimeBase,
{
    rtc: R,
    mux: PanelMux<B>,
    indicator: IndicatorDriver<P>,
    button: DebouncedButton,
    mode_line: L,
    timebase: T,
    last_second: Option<u8>,
}

impl<R, B, P, L, T> Controller<R, B, P, L, T>
where
    R: RtcDevice,
    B: PanelBus,
    P: IndicatorPort,
    L: InputLine,
    T: TimeBase,
{
    pub fn new(
        rtc: R,
        mux: PanelMux<B>,
        indicator: IndicatorDriver<P>,
        button: DebouncedButton,
        mode_line: L,
        timebase: T,
    ) -> Self {
        Self {
            rtc,
            mux,
            indicator,
            button,
            mode_line,
            timebase,
            last_second: None,
        }
    }

    /// One loop iteration, in the fixed order: clock read, indicator
    /// refresh (only when the second changed), panel sync, button poll.
    pub fn tick(&mut self) -> Result<(), ControllerError<R::Error, B::Error, P::Error>> {
        let clock = self.rtc.read_time().map_err(ControllerError::Rtc)?;

        if self.last_second != Some(clock.second) {
            self.indicator
                .refresh(clock.second)
                .map_err(ControllerError::Indicator)?;
            self.last_second = Some(clock.second);
        }

        let shown = display_time(&clock);
        self.mux
            .sync(shown, &mut self.timebase)
            .map_err(ControllerError::Bus)?;

        let level = self.mode_line.level();
        let now = self.timebase.now_ms();
        if self.button.poll(level, now) {
            self.mux
                .show_splash(&mut self.timebase)
                .map_err(ControllerError::Bus)?;
        }

        Ok(())
    }

    /// Run forever at the bounded poll rate. Returns only on a
    /// peripheral error.
    pub fn run(&mut self) -> Result<(), ControllerError<R::Error, B::Error, P::Error>> {
        log::info!("controller: entering main loop ({} ms tick)", TICK_MS);
        loop {
            self.tick()?;
            self.timebase.delay_ms(TICK_MS);
        }
    }
}
