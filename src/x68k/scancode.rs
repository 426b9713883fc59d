//! HID keycode → X68000 scancode translation tables.
//!
//! Scancodes are 7-bit values from the 'X68000 Technical Guide', Chapter 5.
//! Bit 7 of the transmitted byte is the break flag: clear on key press
//! (make), set on key release (break).

/// Break flag ORed into a scancode on key release.
pub const BREAK_FLAG: u8 = 0x80;

/// First HID keycode covered by [`KEYCODE_SCANS`] (HID_KEY_A).
pub const HID_KEY_A: u8 = 0x04;

/// X68000 scancodes for the eight HID modifier bits, in modifier-bit order.
///
/// The X68000 has a single SHIFT key, so both HID shifts map to 0x70.
pub const MODIFIER_SCANS: [u8; 8] = [
    0x71, // "CTRL"  = Left Ctrl
    0x70, // "SHIFT" = Left Shift
    0x56, // "XF2"   = Left Alt
    0x55, // "XF1"   = Left GUI
    0x59, // "XF5"   = Right Ctrl
    0x70, // "SHIFT" = Right Shift
    0x57, // "XF3"   = Right Alt
    0x58, // "XF4"   = Right GUI
];

/// X68000 scancodes indexed by `hid_keycode - HID_KEY_A`.
///
/// A few X68000-only keys have no obvious USB home, so the choice of scan
/// is debatable: F11/F12 map to KANA/LATIN rather than OPT.1/OPT.2
/// (0x72/0x73), and keypad /, * and - stand in for SYMBOL INPUT (0x52),
/// TOROKU (0x53) and CODE INPUT (0x5c).
pub const KEYCODE_SCANS: [u8; 97] = [
    0x1e, // "A"         = HID_KEY_A
    0x2e, // "B"         = HID_KEY_B
    0x2c, // "C"         = HID_KEY_C
    0x20, // "D"         = HID_KEY_D
    0x13, // "E"         = HID_KEY_E
    0x21, // "F"         = HID_KEY_F
    0x22, // "G"         = HID_KEY_G
    0x23, // "H"         = HID_KEY_H
    0x18, // "I"         = HID_KEY_I
    0x24, // "J"         = HID_KEY_J
    0x25, // "K"         = HID_KEY_K
    0x26, // "L"         = HID_KEY_L
    0x30, // "M"         = HID_KEY_M
    0x2f, // "N"         = HID_KEY_N
    0x19, // "O"         = HID_KEY_O
    0x1a, // "P"         = HID_KEY_P
    0x11, // "Q"         = HID_KEY_Q
    0x14, // "R"         = HID_KEY_R
    0x1f, // "S"         = HID_KEY_S
    0x15, // "T"         = HID_KEY_T
    0x17, // "U"         = HID_KEY_U
    0x2d, // "V"         = HID_KEY_V
    0x12, // "W"         = HID_KEY_W
    0x2b, // "X"         = HID_KEY_X
    0x16, // "Y"         = HID_KEY_Y
    0x2a, // "Z"         = HID_KEY_Z
    0x02, // "1"         = HID_KEY_1
    0x03, // "2"         = HID_KEY_2
    0x04, // "3"         = HID_KEY_3
    0x05, // "4"         = HID_KEY_4
    0x06, // "5"         = HID_KEY_5
    0x07, // "6"         = HID_KEY_6
    0x08, // "7"         = HID_KEY_7
    0x09, // "8"         = HID_KEY_8
    0x0a, // "9"         = HID_KEY_9
    0x0b, // "0"         = HID_KEY_0
    0x1d, // "RETURN"    = HID_KEY_ENTER
    0x01, // "ESC"       = HID_KEY_ESCAPE
    0x0f, // "BS"        = HID_KEY_BACKSPACE
    0x10, // "TAB"       = HID_KEY_TAB
    0x35, // "SPACE"     = HID_KEY_SPACE
    0x0c, // "-"         = HID_KEY_MINUS
    0x0d, // "^"         = HID_KEY_EQUAL
    0x1b, // "@"         = HID_KEY_BRACKET_LEFT
    0x1c, // "["         = HID_KEY_BRACKET_RIGHT
    0x0e, // "YEN"       = HID_KEY_BACKSLASH
    0x29, // "]"         = HID_KEY_EUROPE_1
    0x27, // ";"         = HID_KEY_SEMICOLON
    0x28, // ":"         = HID_KEY_APOSTROPHE
    0x60, // "ZENKAKU"   = HID_KEY_GRAVE
    0x31, // < ,         = HID_KEY_COMMA
    0x32, // > .         = HID_KEY_PERIOD
    0x33, // ? /         = HID_KEY_SLASH
    0x5d, // "CAPS"      = HID_KEY_CAPS_LOCK
    0x63, // "F1"        = HID_KEY_F1
    0x64, // "F2"        = HID_KEY_F2
    0x65, // "F3"        = HID_KEY_F3
    0x66, // "F4"        = HID_KEY_F4
    0x67, // "F5"        = HID_KEY_F5
    0x68, // "F6"        = HID_KEY_F6
    0x69, // "F7"        = HID_KEY_F7
    0x6a, // "F8"        = HID_KEY_F8
    0x6b, // "F9"        = HID_KEY_F9
    0x6c, // "F10"       = HID_KEY_F10
    0x5a, // "KANA"      = HID_KEY_F11
    0x5b, // "LATIN"     = HID_KEY_F12
    0x62, // "COPY"      = HID_KEY_PRINT_SCREEN
    0x54, // "HELP"      = HID_KEY_SCROLL_LOCK
    0x61, // "BREAK"     = HID_KEY_PAUSE
    0x5e, // "INS"       = HID_KEY_INSERT
    0x36, // "HOME"      = HID_KEY_HOME
    0x38, // "ROLL UP"   = HID_KEY_PAGE_UP
    0x37, // "DEL"       = HID_KEY_DELETE
    0x3a, // "UNDO"      = HID_KEY_END
    0x39, // "ROLL DOWN" = HID_KEY_PAGE_DOWN
    0x3d, // "RIGHT"     = HID_KEY_ARROW_RIGHT
    0x3b, // "LEFT"      = HID_KEY_ARROW_LEFT
    0x3e, // "DOWN"      = HID_KEY_ARROW_DOWN
    0x3c, // "UP"        = HID_KEY_ARROW_UP
    0x3f, // "CLR"       = HID_KEY_NUM_LOCK
    0x40, // "/"         = HID_KEY_KEYPAD_DIVIDE
    0x41, // "*"         = HID_KEY_KEYPAD_MULTIPLY
    0x42, // "-"         = HID_KEY_KEYPAD_SUBTRACT
    0x46, // "+"         = HID_KEY_KEYPAD_ADD
    0x4e, // "ENTER"     = HID_KEY_KEYPAD_ENTER
    0x4b, // "1"         = HID_KEY_KEYPAD_1
    0x4c, // "2"         = HID_KEY_KEYPAD_2
    0x4d, // "3"         = HID_KEY_KEYPAD_3
    0x47, // "4"         = HID_KEY_KEYPAD_4
    0x48, // "5"         = HID_KEY_KEYPAD_5
    0x49, // "6"         = HID_KEY_KEYPAD_6
    0x43, // "7"         = HID_KEY_KEYPAD_7
    0x44, // "8"         = HID_KEY_KEYPAD_8
    0x45, // "9"         = HID_KEY_KEYPAD_9
    0x4f, // "0"         = HID_KEY_KEYPAD_0
    0x51, // "."         = HID_KEY_KEYPAD_DECIMAL
    0x0e, // "YEN"       = HID_KEY_EUROPE_2
];

/// Look up the X68000 scan for a HID keycode.
///
/// Returns `None` for keycodes outside the translated range; a USB keyboard
/// may present keys with no X68000 equivalent and there is no channel to
/// report that upstream.
pub fn scan_for_keycode(keycode: u8) -> Option<u8> {
    let index = keycode.checked_sub(HID_KEY_A)? as usize;
    KEYCODE_SCANS.get(index).copied()
}
