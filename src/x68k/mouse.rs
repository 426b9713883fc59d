//! Mouse motion accumulation and X68000 mouse frame packing.
//!
//! Frame layout (3 bytes, transmitted in order):
//! ```text
//! Byte 0: Bit 0 = left button,  Bit 1 = right button,
//!         Bits 2-3 = unused (zero),
//!         Bit 4 = X overflow  (dx > 127),
//!         Bit 5 = X underflow (dx < -128),
//!         Bit 6 = Y overflow  (dy > 127),
//!         Bit 7 = Y underflow (dy < -128)
//! Byte 1: low 8 bits of accumulated dx
//! Byte 2: low 8 bits of accumulated dy
//! ```

use crate::hid::mouse::{MouseReport, MOUSE_BUTTON_LEFT, MOUSE_BUTTON_RIGHT};

/// Mouse frame size in bytes.
pub const MOUSE_FRAME_SIZE: usize = 3;

/// Relative motion accumulated between host-triggered send points.
///
/// Deltas sum every HID-delivered movement since the last successful frame
/// emission; buttons latch the current state and survive emission.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionState {
    /// Accumulated X delta (saturating).
    pub dx: i16,
    /// Accumulated Y delta (saturating).
    pub dy: i16,
    /// Left button held.
    pub lmb: bool,
    /// Right button held.
    pub rmb: bool,
}

impl MotionState {
    pub const fn new() -> Self {
        Self {
            dx: 0,
            dy: 0,
            lmb: false,
            rmb: false,
        }
    }

    /// Fold one HID mouse report into the accumulated state.
    pub fn accumulate(&mut self, report: &MouseReport) {
        self.lmb = report.buttons & MOUSE_BUTTON_LEFT != 0;
        self.rmb = report.buttons & MOUSE_BUTTON_RIGHT != 0;
        self.dx = self.dx.saturating_add(i16::from(report.x));
        self.dy = self.dy.saturating_add(i16::from(report.y));
    }

    /// Zero the deltas after a successful frame emission. Button state
    /// is steady state, not a delta, and is preserved.
    pub fn reset_deltas(&mut self) {
        self.dx = 0;
        self.dy = 0;
    }
}

/// A packed 3-byte X68000 mouse frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseFrame {
    pub bytes: [u8; MOUSE_FRAME_SIZE],
}

impl MouseFrame {
    /// Pack the current motion state into wire format.
    ///
    /// Out-of-range deltas are reported through the overflow/underflow
    /// status bits; the payload bytes still carry the low 8 bits.
    pub fn pack(motion: &MotionState) -> Self {
        let mut status = 0u8;
        if motion.lmb {
            status |= 0x01;
        }
        if motion.rmb {
            status |= 0x02;
        }
        if motion.dx > 127 {
            status |= 0x10;
        }
        if motion.dx < -128 {
            status |= 0x20;
        }
        if motion.dy > 127 {
            status |= 0x40;
        }
        if motion.dy < -128 {
            status |= 0x80;
        }
        Self {
            bytes: [status, motion.dx as u8, motion.dy as u8],
        }
    }

    /// Returns `true` when every byte of the frame is zero.
    pub fn is_empty(&self) -> bool {
        self.bytes == [0, 0, 0]
    }
}
