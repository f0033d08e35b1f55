//! Platform-agnostic controller for a dual-panel clock: two digit displays
//! on one shared bus, a polled RTC, a seconds progress indicator and a
//! debounced mode button. All hardware access goes through the traits in
//! `duoclock-hal`; platform crates supply the implementations.

/// Rate-limited button edge detection.
pub mod debounce;

/// Seconds progress encoding: ring fill and coarse 3-bit code.
pub mod indicator;

/// Pre-decoded digit images.
pub mod glyphs;

/// Panel multiplexer: display policy, dirty tracking, bus arbitration.
pub mod panel;

/// Top-level synchronization loop.
pub mod controller;

pub use controller::{Controller, ControllerError};
pub use debounce::DebouncedButton;
pub use glyphs::{Glyph, GlyphStore};
pub use indicator::IndicatorDriver;
pub use panel::{display_time, DisplayTime, MuxState, PanelMux};
