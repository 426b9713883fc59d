//! USB HID mouse report (boot protocol).
//!
//! Layout (3 or 4 bytes):
//! ```text
//! Byte 0: Button bitfield
//!         Bit 0 = Left, Bit 1 = Right, Bit 2 = Middle
//! Byte 1: X displacement (signed, -127..127)
//! Byte 2: Y displacement (signed, -127..127)
//! Byte 3: Scroll wheel (signed, optional)
//! ```
//!
//! The X68000 mouse protocol has no wheel field; the wheel byte is
//! parsed when present and otherwise ignored downstream.

/// Left mouse button bit.
pub const MOUSE_BUTTON_LEFT: u8 = 0x01;
/// Right mouse button bit.
pub const MOUSE_BUTTON_RIGHT: u8 = 0x02;

/// Standard USB HID boot-protocol mouse report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Button bitfield (bit 0 = left, bit 1 = right, bit 2 = middle).
    pub buttons: u8,
    /// Relative X movement (signed).
    pub x: i8,
    /// Relative Y movement (signed).
    pub y: i8,
    /// Scroll wheel delta (signed).
    pub wheel: i8,
}

impl MouseReport {
    /// Create an idle (no movement, no buttons) report.
    pub const fn empty() -> Self {
        Self {
            buttons: 0,
            x: 0,
            y: 0,
            wheel: 0,
        }
    }

    /// Parse from raw USB interface payload bytes.
    ///
    /// Accepts 3-byte (no wheel) or 4-byte (with wheel) reports.
    pub fn from_interface_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 3 {
            return None;
        }
        Some(Self {
            buttons: data[0],
            x: data[1] as i8,
            y: data[2] as i8,
            wheel: if data.len() >= 4 { data[3] as i8 } else { 0 },
        })
    }

    /// Returns `true` when no buttons are pressed and there is no movement.
    pub fn is_idle(&self) -> bool {
        self.buttons == 0 && self.x == 0 && self.y == 0 && self.wheel == 0
    }
}
