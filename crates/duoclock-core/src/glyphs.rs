//! Pre-decoded digit images.
//!
//! The ten digit glyphs are decoded once at startup and immutable
//! thereafter; lookups hand out shared borrows with no per-call decoding
//! cost. Acquiring all ten is the platform loader's job and is fatal on
//! failure — the clock face has no placeholder policy for a missing digit.

use duoclock_hal::BitmapRef;

/// One decoded RGB565 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub width: u32,
    pub height: u32,
    /// Row-major, `width * height` entries.
    pub pixels: Vec<u16>,
}

impl Glyph {
    /// Borrow as a blit-ready bitmap.
    pub fn as_bitmap(&self) -> BitmapRef<'_> {
        BitmapRef {
            width: self.width,
            height: self.height,
            pixels: &self.pixels,
        }
    }
}

/// The ten digit glyphs, indexed by value.
pub struct GlyphStore {
    glyphs: [Glyph; 10],
}

impl GlyphStore {
    pub fn new(glyphs: [Glyph; 10]) -> Self {
        Self { glyphs }
    }

    /// Shared handle for `digit`. `digit` must be 0-9.
    pub fn glyph(&self, digit: u8) -> &Glyph {
        &self.glyphs[usize::from(digit)]
    }
}
