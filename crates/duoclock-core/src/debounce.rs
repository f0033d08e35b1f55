//! Level-to-edge conversion with a lockout window.
//!
//! A held button is a continuous high level; mode toggling needs discrete
//! events. The conversion is a rate limiter, not a press/release state
//! machine: a still-held button re-fires once the window elapses, with no
//! intervening release required. Downstream logic depends on exactly this
//! policy.

/// Default lockout window between accepted presses.
pub const DEFAULT_LOCK_WINDOW_MS: u64 = 250;

/// Debounce state for one button.
pub struct DebouncedButton {
    lock_window_ms: u64,
    last_accepted_ms: Option<u64>,
}

impl DebouncedButton {
    /// Button with the default 250 ms lockout window.
    pub fn new() -> Self {
        Self::with_window(DEFAULT_LOCK_WINDOW_MS)
    }

    /// Button with a custom lockout window.
    pub fn with_window(lock_window_ms: u64) -> Self {
        Self {
            lock_window_ms,
            last_accepted_ms: None,
        }
    }

    /// Feed the current raw level. Returns true for at most one poll per
    /// lockout window; the acceptance timestamp is recorded only on an
    /// accepted press.
    pub fn poll(&mut self, raw_level: bool, now_ms: u64) -> bool {
        if !raw_level {
            return false;
        }
        let accepted = match self.last_accepted_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.lock_window_ms,
        };
        if accepted {
            self.last_accepted_ms = Some(now_ms);
        }
        accepted
    }
}

impl Default for DebouncedButton {
    fn default() -> Self {
        Self::new()
    }
}
