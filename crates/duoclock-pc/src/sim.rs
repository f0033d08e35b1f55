//! Simulated peripherals for the PC host.
//!
//! One type per hardware device, each implementing its hal trait the way
//! the on-target platform crate would over real pins: the RTC derives
//! wall-clock time from the system clock plus a settable offset, the
//! panel bus and indicator log their transactions, and the button can
//! generate periodic raw-level pulses to exercise the debounce path.

use std::convert::Infallible;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use duoclock_hal::{
    BitmapRef, IndicatorPort, InputLine, PanelBus, PanelId, Rgb, RtcDateTime, RtcDevice, TimeBase,
    WallClock, RING_LEN,
};

const SECS_PER_DAY: i64 = 86_400;

/// RTC error for the PC platform.
#[derive(Debug)]
pub enum HostRtcError {
    /// The system clock is set before the Unix epoch.
    ClockUnavailable,
}

/// Wall-clock source backed by the system clock (UTC) plus an offset so
/// `set_time` behaves like a battery-backed register write. Calendar
/// fields of the set tuple are accepted and ignored; only the time of
/// day matters to the panels.
pub struct HostRtc {
    offset_secs: i64,
}

impl HostRtc {
    pub fn new() -> Self {
        Self { offset_secs: 0 }
    }

    fn epoch_secs() -> Result<i64, HostRtcError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .map_err(|_| HostRtcError::ClockUnavailable)
    }
}

impl Default for HostRtc {
    fn default() -> Self {
        Self::new()
    }
}

impl RtcDevice for HostRtc {
    type Error = HostRtcError;

    fn read_time(&mut self) -> Result<WallClock, Self::Error> {
        let day_secs = (Self::epoch_secs()? + self.offset_secs).rem_euclid(SECS_PER_DAY);
        Ok(WallClock {
            hour: (day_secs / 3600) as u8,
            minute: (day_secs / 60 % 60) as u8,
            second: (day_secs % 60) as u8,
        })
    }

    fn set_time(&mut self, dt: &RtcDateTime) -> Result<(), Self::Error> {
        // Second forced to 0 by construction of the target.
        let target = i64::from(dt.hour) * 3600 + i64::from(dt.minute) * 60;
        self.offset_secs = target - Self::epoch_secs()?.rem_euclid(SECS_PER_DAY);
        log::info!("rtc set to {:02}:{:02}:00", dt.hour, dt.minute);
        Ok(())
    }
}

/// Shared-bus stand-in: tracks the addressing state and logs every
/// transaction instead of shifting bits to a panel.
pub struct SimPanelBus {
    selected: Option<PanelId>,
}

impl SimPanelBus {
    pub fn new() -> Self {
        Self { selected: None }
    }
}

impl Default for SimPanelBus {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelBus for SimPanelBus {
    type Error = Infallible;

    fn select(&mut self, panel: PanelId) -> Result<(), Self::Error> {
        self.selected = Some(panel);
        log::debug!("bus: select {panel:?}");
        Ok(())
    }

    fn deselect_all(&mut self) -> Result<(), Self::Error> {
        self.selected = None;
        log::debug!("bus: release");
        Ok(())
    }

    fn blit(&mut self, x: u32, y: u32, bitmap: BitmapRef<'_>) -> Result<(), Self::Error> {
        log::debug!(
            "bus: blit {}x{} at ({x},{y}) -> {:?}",
            bitmap.width,
            bitmap.height,
            self.selected,
        );
        Ok(())
    }
}

/// Progress-indicator stand-in: renders the strip as a log bar.
pub struct SimIndicator;

impl IndicatorPort for SimIndicator {
    type Error = Infallible;

    fn write_ring(&mut self, frame: &[Rgb; RING_LEN]) -> Result<(), Self::Error> {
        let bar: String = frame
            .iter()
            .map(|led| if *led == Rgb::OFF { '-' } else { '#' })
            .collect();
        log::debug!("ring: [{bar}]");
        Ok(())
    }

    fn write_coarse(&mut self, bits: u8) -> Result<(), Self::Error> {
        log::debug!("coarse: {:03b}", bits & 0b111);
        Ok(())
    }
}

/// Mode-button stand-in. With a schedule, the raw level pulses high for
/// `width_ms` every `period_ms`; without one it stays low.
pub struct SimButton {
    schedule: Option<(u64, u64)>,
    start: Instant,
}

impl SimButton {
    /// Button that is never pressed.
    pub fn idle() -> Self {
        Self {
            schedule: None,
            start: Instant::now(),
        }
    }

    /// Button pulsing high for `width_ms` at the start of every
    /// `period_ms` interval.
    pub fn periodic(period_ms: u64, width_ms: u64) -> Self {
        Self {
            schedule: Some((period_ms, width_ms)),
            start: Instant::now(),
        }
    }
}

impl InputLine for SimButton {
    fn level(&mut self) -> bool {
        match self.schedule {
            Some((period, width)) => {
                let elapsed = self.start.elapsed().as_millis() as u64;
                elapsed % period < width
            }
            None => false,
        }
    }
}

/// Monotonic time over `std::time::Instant`; delays really sleep.
pub struct HostTimeBase {
    start: Instant,
}

impl HostTimeBase {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for HostTimeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeBase for HostTimeBase {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
