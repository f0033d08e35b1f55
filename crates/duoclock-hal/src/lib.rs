#![no_std]

/// Number of LEDs on the seconds progress strip.
pub const RING_LEN: usize = 8;

/// An atomic snapshot of the real-time clock.
///
/// Produced by a single peripheral read; the three fields are never
/// observed mid-update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Minute of hour, 0-59.
    pub minute: u8,
    /// Second of minute, 0-59.
    pub second: u8,
}

/// The tuple accepted by a one-shot clock set. The second field is not
/// part of the tuple: implementations reset it to 0 on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtcDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    /// Day of week, 0 = Monday.
    pub weekday: u8,
}

/// One physical digit panel on the shared bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelId {
    /// Panel showing the two hour digits.
    Hours,
    /// Panel showing the two minute digits.
    Minutes,
}

impl PanelId {
    /// Both panels, in the order they are serviced when both are dirty.
    pub const ALL: [PanelId; 2] = [PanelId::Hours, PanelId::Minutes];

    /// Stable index for per-panel state arrays.
    pub fn index(self) -> usize {
        match self {
            PanelId::Hours => 0,
            PanelId::Minutes => 1,
        }
    }
}

/// A single LED color on the progress strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Extinguished LED.
    pub const OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };
}

/// A borrowed RGB565 bitmap, row-major, `width * height` pixels.
#[derive(Debug, Clone, Copy)]
pub struct BitmapRef<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u16],
}

/// Abstracts the real-time clock peripheral.
///
/// Every `read_time` issues a fresh peripheral transaction; implementations
/// must not cache. A failed transaction surfaces as `Error` so the caller
/// can decide between retry and shutdown.
pub trait RtcDevice {
    type Error: core::fmt::Debug;

    /// Read the current wall-clock time as one atomic snapshot.
    fn read_time(&mut self) -> Result<WallClock, Self::Error>;

    /// One-shot clock write. Resets the second field to 0.
    fn set_time(&mut self, dt: &RtcDateTime) -> Result<(), Self::Error>;
}

/// Abstracts the shared display transport and its two chip-select lines.
///
/// Implementations MUST guarantee that `select` leaves exactly one
/// chip-select asserted and `deselect_all` leaves none; the caller owns the
/// ordering of select/blit/deselect around each transaction.
pub trait PanelBus {
    type Error: core::fmt::Debug;

    /// Assert `panel`'s chip-select and deassert the other panel's.
    fn select(&mut self, panel: PanelId) -> Result<(), Self::Error>;

    /// Deassert both chip-select lines.
    fn deselect_all(&mut self) -> Result<(), Self::Error>;

    /// Issue one opaque bitmap-blit transaction at pixel position (x, y)
    /// in the current addressing state.
    fn blit(&mut self, x: u32, y: u32, bitmap: BitmapRef<'_>) -> Result<(), Self::Error>;
}

/// Abstracts the write-only side-channel outputs: the chained LED strip
/// and the three discrete coarse-code lines. No readback.
pub trait IndicatorPort {
    type Error: core::fmt::Debug;

    /// Rewrite the whole strip. Called with a full frame every refresh.
    fn write_ring(&mut self, frame: &[Rgb; RING_LEN]) -> Result<(), Self::Error>;

    /// Drive the three discrete lines from bits 0..2 of `bits`.
    fn write_coarse(&mut self, bits: u8) -> Result<(), Self::Error>;
}

/// A raw digital input line, read as a level once per poll.
pub trait InputLine {
    /// Current raw level; true = pressed.
    fn level(&mut self) -> bool;
}

/// Monotonic time and blocking delay for the single-threaded loop.
pub trait TimeBase {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;

    /// Block the caller for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
