//! Runtime loading of the clock face images.
//!
//! The asset directory must contain `digit_0.png` through `digit_9.png`
//! plus `splash.png`. Everything is decoded once at startup and converted
//! to RGB565 for the panel bus; any missing or undecodable file aborts
//! startup. There is no placeholder for a missing digit.

use std::path::{Path, PathBuf};

use duoclock_core::{Glyph, GlyphStore};

/// Errors that can occur while loading face images.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required image file is not present.
    #[error("missing required image: {path}")]
    Missing { path: PathBuf },

    /// Failed to decode a PNG image.
    #[error("image decode error for {path}: {message}")]
    ImageDecode { path: PathBuf, message: String },
}

/// Load the ten digit glyphs from `dir`.
pub fn load_glyph_store(dir: &Path) -> Result<GlyphStore, AssetError> {
    let mut glyphs = Vec::with_capacity(10);
    for digit in 0u8..10 {
        let path = dir.join(format!("digit_{digit}.png"));
        glyphs.push(load_glyph(&path)?);
    }
    match <[Glyph; 10]>::try_from(glyphs) {
        Ok(arr) => Ok(GlyphStore::new(arr)),
        Err(_) => unreachable!("loop pushes exactly ten glyphs"),
    }
}

/// Load the splash overlay image from `dir`.
pub fn load_splash(dir: &Path) -> Result<Glyph, AssetError> {
    load_glyph(&dir.join("splash.png"))
}

/// Decode one PNG into an RGB565 glyph.
fn load_glyph(path: &Path) -> Result<Glyph, AssetError> {
    if !path.is_file() {
        return Err(AssetError::Missing {
            path: path.to_path_buf(),
        });
    }

    let img = image::open(path).map_err(|e| AssetError::ImageDecode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba
        .pixels()
        .map(|px| rgb565(px.0[0], px.0[1], px.0[2]))
        .collect();

    log::debug!("loaded {}: {}x{}", path.display(), width, height);

    Ok(Glyph {
        width,
        height,
        pixels,
    })
}

/// Pack 8-bit channels into RGB565.
fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    (u16::from(r >> 3) << 11) | (u16::from(g >> 2) << 5) | u16::from(b >> 3)
}
