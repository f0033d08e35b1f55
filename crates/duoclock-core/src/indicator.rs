//! Seconds progress encoding.
//!
//! The seconds field drives two side-channel outputs: a chained LED strip
//! filled from `second % 10` and three discrete lines carrying a 3-bit
//! pattern for the decade `second / 10`. Both encoders are pure; the
//! driver rewrites the full outputs on every refresh (the strip is small,
//! no incremental diffing).

use duoclock_hal::{IndicatorPort, Rgb, RING_LEN};

/// Lit color for strip LEDs.
pub const RING_ON: Rgb = Rgb { r: 0, g: 40, b: 80 };

/// 3-bit line patterns, one per decade of the minute. Seconds 0-59 only
/// ever produce decades 0-5.
pub const COARSE_PATTERNS: [u8; 6] = [0b000, 0b001, 0b010, 0b011, 0b100, 0b101];

/// Number of lit strip LEDs for `second`, clamped to the strip length.
pub fn ring_fill(second: u8) -> u8 {
    (second % 10).min(RING_LEN as u8)
}

/// Decade index for `second`, 0-5 for valid seconds.
pub fn coarse_code(second: u8) -> u8 {
    (second / 10) % 6
}

/// Full strip frame for `second`: lit prefix, remainder extinguished.
pub fn ring_frame(second: u8) -> [Rgb; RING_LEN] {
    let lit = ring_fill(second) as usize;
    let mut frame = [Rgb::OFF; RING_LEN];
    for led in frame.iter_mut().take(lit) {
        *led = RING_ON;
    }
    frame
}

/// Drives the strip and the coarse lines from a seconds value.
pub struct IndicatorDriver<P: IndicatorPort> {
    port: P,
}

impl<P: IndicatorPort> IndicatorDriver<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Rewrite both outputs for `second`. Idempotent.
    pub fn refresh(&mut self, second: u8) -> Result<(), P::Error> {
        self.port.write_ring(&ring_frame(second))?;
        self.port.write_coarse(COARSE_PATTERNS[coarse_code(second) as usize])?;
        log::trace!("indicator: second={} fill={}", second, ring_fill(second));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_fill_bounds() {
        assert_eq!(ring_fill(0), 0);
        assert_eq!(ring_fill(8), 8);
        assert_eq!(ring_fill(9), 8); // clamped to strip length
    }

    #[test]
    fn ring_fill_periodic_over_decades() {
        assert_eq!(ring_fill(25), ring_fill(5));
        assert_eq!(ring_fill(59), ring_fill(9));
    }

    #[test]
    fn coarse_code_per_decade() {
        assert_eq!(coarse_code(0), 0);
        assert_eq!(coarse_code(9), 0);
        assert_eq!(coarse_code(10), 1);
        assert_eq!(coarse_code(37), 3);
        assert_eq!(coarse_code(59), 5);
    }

    #[test]
    fn frame_is_lit_prefix() {
        let frame = ring_frame(13);
        assert_eq!(frame[0], RING_ON);
        assert_eq!(frame[1], RING_ON);
        assert_eq!(frame[2], RING_ON);
        for led in &frame[3..] {
            assert_eq!(*led, Rgb::OFF);
        }
    }

    #[test]
    fn frame_zero_all_off() {
        assert_eq!(ring_frame(30), [Rgb::OFF; RING_LEN]);
    }
}
