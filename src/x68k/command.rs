//! X68000 → keyboard host command decoder.
//!
//! The host sends single command bytes down the keyboard link; each is
//! matched by prefix: `(byte & MASK) == PATTERN`. The patterns below are
//! from the 'X68000 Technical Guide', Chapter 5, and are mutually disjoint.

/// MSCTRL request: `0100_0xxx`, low bit selects the level.
const MSCTRL: u8 = 0b0100_0000;
const MSCTRL_MASK: u8 = 0b1111_1000;
/// LED brightness: `0101_01xx`, low two bits are the level.
const LED_BRIGHTNESS: u8 = 0b0101_0100;
const LED_BRIGHTNESS_MASK: u8 = 0b1111_1100;
/// Key inhibit: `0101_1xxx`, low bit selects the level.
const KEY_INHIBIT: u8 = 0b0101_1000;
const KEY_INHIBIT_MASK: u8 = 0b1111_1000;
/// Repeat delay: `0110_xxxx`, low nibble is the delay step.
const REPEAT_DELAY: u8 = 0b0110_0000;
/// Repeat interval: `0111_xxxx`, low nibble is the interval step.
const REPEAT_INTERVAL: u8 = 0b0111_0000;
const REPEAT_MASK: u8 = 0b1111_0000;
/// LED state: `1xxx_xxxx`, low seven bits are the LED mask.
const LED_CTRL_MASK: u8 = 0b1000_0000;

/// A decoded host command.
///
/// Timing commands carry the resolved millisecond value, not the raw
/// nibble, so appliers never re-derive protocol arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Host drives the MSCTRL level; asserting it requests a mouse frame.
    MouseControl { asserted: bool },
    /// Keyboard LED brightness, 0 (brightest) to 3.
    LedBrightness(u8),
    /// Suppress keyboard scancode emission while set.
    KeyInhibit { inhibit: bool },
    /// Delay before the first typematic repeat, in milliseconds.
    RepeatDelay(u16),
    /// Interval between typematic repeats, in milliseconds.
    RepeatInterval(u16),
    /// Per-key LED mask (7 bits).
    LedState(u8),
}

impl Command {
    /// Decode a single host command byte. Unknown bytes yield `None`
    /// and are dropped silently by the caller.
    pub fn decode(byte: u8) -> Option<Command> {
        // TODO: verify the low-bit sense of MSCTRL and key-inhibit against
        // real X68000 hardware; "asserted/inhibited when the bit is clear"
        // is what the original firmware shipped with.
        if byte & MSCTRL_MASK == MSCTRL {
            Some(Command::MouseControl {
                asserted: byte & 0x01 == 0,
            })
        } else if byte & LED_BRIGHTNESS_MASK == LED_BRIGHTNESS {
            Some(Command::LedBrightness(byte & 0x03))
        } else if byte & KEY_INHIBIT_MASK == KEY_INHIBIT {
            Some(Command::KeyInhibit {
                inhibit: byte & 0x01 == 0,
            })
        } else if byte & REPEAT_MASK == REPEAT_DELAY {
            let n = u16::from(byte & 0x0f);
            Some(Command::RepeatDelay(200 + n * 100))
        } else if byte & REPEAT_MASK == REPEAT_INTERVAL {
            let n = u16::from(byte & 0x0f);
            Some(Command::RepeatInterval(30 + n * n * 5))
        } else if byte & LED_CTRL_MASK == LED_CTRL_MASK {
            Some(Command::LedState(byte & 0x7f))
        } else {
            None
        }
    }
}
