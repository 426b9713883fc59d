//! Activity LED cadence.
//!
//! The board LED doubles as a liveness heartbeat (~1 Hz when idle) and an
//! activity indicator (fast blink while scancodes or mouse frames are
//! going out). The main loop picks the rate; this module only decides
//! when to toggle.

/// Activity LED toggle state.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ActivityLed {
    last_toggle_ms: u32,
    lit: bool,
}

impl ActivityLed {
    pub const fn new() -> Self {
        Self {
            last_toggle_ms: 0,
            lit: false,
        }
    }

    /// Toggle when `rate_ms` has elapsed since the previous toggle.
    ///
    /// Returns the new LED level when it changed. The toggle timestamp
    /// advances by exactly `rate_ms` so the cadence does not drift with
    /// polling jitter.
    pub fn poll(&mut self, now_ms: u32, rate_ms: u32) -> Option<bool> {
        if now_ms.wrapping_sub(self.last_toggle_ms) < rate_ms {
            return None;
        }
        self.last_toggle_ms = self.last_toggle_ms.wrapping_add(rate_ms);
        self.lit = !self.lit;
        Some(self.lit)
    }
}
