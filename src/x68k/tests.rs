//! Unit tests for the X68000 protocol engine.

use super::bridge::{Bridge, ScanSink};
use super::command::Command;
use super::mouse::{MotionState, MouseFrame};
use super::scancode::{scan_for_keycode, BREAK_FLAG, KEYCODE_SCANS, MODIFIER_SCANS};
use crate::error::Error;
use crate::hid::keyboard::KeyboardReport;
use crate::hid::mouse::MouseReport;

/// Test sink that records every byte written to it.
#[derive(Default)]
struct RecordingSink {
    bytes: Vec<u8>,
}

impl ScanSink for RecordingSink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }
}

fn keys(keycodes: [u8; 6]) -> KeyboardReport {
    KeyboardReport {
        modifier: 0,
        reserved: 0,
        keycodes,
    }
}

fn one_key(keycode: u8) -> KeyboardReport {
    keys([keycode, 0, 0, 0, 0, 0])
}

// ═══════════════════════════════════════════════════════════════════════════
// Scancode Table Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn scancode_letter_a() {
    assert_eq!(scan_for_keycode(0x04), Some(0x1E));
}

#[test]
fn scancode_out_of_range_dropped() {
    assert_eq!(scan_for_keycode(0x00), None); // empty slot
    assert_eq!(scan_for_keycode(0x03), None); // error sentinel
    assert_eq!(scan_for_keycode(0x65), None); // just past Europe 2
    assert_eq!(scan_for_keycode(0xFF), None);
}

#[test]
fn scancode_table_covers_through_europe_2() {
    // Last translated keycode is HID_KEY_EUROPE_2 (0x64) = Yen.
    assert_eq!(scan_for_keycode(0x64), Some(0x0E));
    assert_eq!(KEYCODE_SCANS.len(), 0x64 - 0x04 + 1);
}

#[test]
fn scancode_all_scans_are_7_bit() {
    for &scan in KEYCODE_SCANS.iter().chain(MODIFIER_SCANS.iter()) {
        assert_eq!(scan & BREAK_FLAG, 0, "scan 0x{scan:02X} has bit 7 set");
    }
}

#[test]
fn scancode_both_shifts_share_a_code() {
    // The X68000 has one SHIFT key; both HID shifts map onto it.
    assert_eq!(MODIFIER_SCANS[1], MODIFIER_SCANS[5]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Host Command Decoder Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn command_decode_msctrl() {
    assert_eq!(
        Command::decode(0b0100_0000),
        Some(Command::MouseControl { asserted: true })
    );
    assert_eq!(
        Command::decode(0b0100_0001),
        Some(Command::MouseControl { asserted: false })
    );
}

#[test]
fn command_decode_led_brightness() {
    assert_eq!(Command::decode(0b0101_0100), Some(Command::LedBrightness(0)));
    assert_eq!(Command::decode(0b0101_0111), Some(Command::LedBrightness(3)));
}

#[test]
fn command_decode_key_inhibit() {
    assert_eq!(
        Command::decode(0b0101_1000),
        Some(Command::KeyInhibit { inhibit: true })
    );
    assert_eq!(
        Command::decode(0b0101_1001),
        Some(Command::KeyInhibit { inhibit: false })
    );
}

#[test]
fn command_decode_repeat_delay() {
    assert_eq!(Command::decode(0b0110_0000), Some(Command::RepeatDelay(200)));
    // Nibble 5 → 200 + 5*100 = 700 ms
    assert_eq!(Command::decode(0x65), Some(Command::RepeatDelay(700)));
    assert_eq!(Command::decode(0b0110_1111), Some(Command::RepeatDelay(1700)));
}

#[test]
fn command_decode_repeat_interval() {
    assert_eq!(
        Command::decode(0b0111_0000),
        Some(Command::RepeatInterval(30))
    );
    // Quadratic step: n=4 → 30 + 16*5 = 110 ms (the power-on default)
    assert_eq!(
        Command::decode(0b0111_0100),
        Some(Command::RepeatInterval(110))
    );
    assert_eq!(
        Command::decode(0b0111_1111),
        Some(Command::RepeatInterval(30 + 15 * 15 * 5))
    );
}

#[test]
fn command_decode_led_state() {
    assert_eq!(Command::decode(0x80), Some(Command::LedState(0)));
    assert_eq!(Command::decode(0xFF), Some(Command::LedState(0x7F)));
    assert_eq!(Command::decode(0xAA), Some(Command::LedState(0x2A)));
}

#[test]
fn command_decode_unknown_bytes() {
    // Everything below 0x40 is outside the command space.
    for byte in 0x00..0x40u8 {
        assert_eq!(Command::decode(byte), None, "byte 0x{byte:02X}");
    }
    // 0101_00xx with bit 2 clear is not LED brightness.
    assert_eq!(Command::decode(0b0101_0000), None);
}

#[test]
fn command_patterns_are_disjoint() {
    // Every byte decodes to at most one variant by construction of the
    // if-chain; check that each 0x40.. byte either decodes or sits in the
    // known gaps (0100_1xxx and 0101_00xx).
    for byte in 0x40..=0xFFu16 {
        let byte = byte as u8;
        let decoded = Command::decode(byte);
        if (0x48..=0x53).contains(&byte) {
            assert_eq!(decoded, None, "byte 0x{byte:02X} is not a command");
        } else {
            assert!(decoded.is_some(), "byte 0x{byte:02X} should decode");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Mouse Accumulator & Framer Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn motion_accumulates_deltas_and_latches_buttons() {
    let mut motion = MotionState::new();
    motion.accumulate(&MouseReport {
        buttons: 0x01,
        x: 10,
        y: -5,
        wheel: 0,
    });
    motion.accumulate(&MouseReport {
        buttons: 0x01,
        x: 3,
        y: -2,
        wheel: 0,
    });

    assert_eq!(motion.dx, 13);
    assert_eq!(motion.dy, -7);
    assert!(motion.lmb);
    assert!(!motion.rmb);
}

#[test]
fn motion_buttons_overwritten_not_latched_on() {
    let mut motion = MotionState::new();
    motion.accumulate(&MouseReport {
        buttons: 0x03,
        x: 0,
        y: 0,
        wheel: 0,
    });
    motion.accumulate(&MouseReport::empty());
    assert!(!motion.lmb);
    assert!(!motion.rmb);
}

#[test]
fn motion_saturates_at_i16_bounds() {
    let mut motion = MotionState::new();
    motion.dx = i16::MAX - 10;
    motion.accumulate(&MouseReport {
        buttons: 0,
        x: 127,
        y: -128,
        wheel: 0,
    });
    assert_eq!(motion.dx, i16::MAX);
    assert_eq!(motion.dy, -128);
}

#[test]
fn frame_packs_buttons_and_deltas() {
    let motion = MotionState {
        dx: 13,
        dy: -7,
        lmb: true,
        rmb: false,
    };
    let frame = MouseFrame::pack(&motion);
    assert_eq!(frame.bytes, [0x01, 0x0D, 0xF9]);
    assert!(!frame.is_empty());
}

#[test]
fn frame_sets_overflow_bits() {
    let motion = MotionState {
        dx: 300,
        dy: 0,
        lmb: false,
        rmb: false,
    };
    let frame = MouseFrame::pack(&motion);
    // X-overflow bit, low 8 bits of +300 = 0x2C
    assert_eq!(frame.bytes, [0x10, 0x2C, 0x00]);
}

#[test]
fn frame_sets_underflow_bits() {
    let motion = MotionState {
        dx: -200,
        dy: 200,
        lmb: false,
        rmb: true,
    };
    let frame = MouseFrame::pack(&motion);
    assert_eq!(frame.bytes[0], 0x02 | 0x20 | 0x40);
    assert_eq!(frame.bytes[1], (-200i16) as u8);
    assert_eq!(frame.bytes[2], 200u16 as u8);
}

#[test]
fn frame_boundary_values_do_not_flag() {
    let frame = MouseFrame::pack(&MotionState {
        dx: 127,
        dy: -128,
        lmb: false,
        rmb: false,
    });
    assert_eq!(frame.bytes, [0x00, 0x7F, 0x80]);
}

#[test]
fn frame_empty_detection() {
    assert!(MouseFrame::pack(&MotionState::new()).is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Bridge Engine Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn bridge_emits_make_then_break() {
    let mut bridge = Bridge::new();
    let mut keyb = RecordingSink::default();

    bridge.on_keyboard_report(&one_key(0x04), &mut keyb);
    bridge.on_keyboard_report(&KeyboardReport::empty(), &mut keyb);

    assert_eq!(keyb.bytes, [0x1E, 0x9E]);
}

#[test]
fn bridge_modifiers_before_keys() {
    let mut bridge = Bridge::new();
    let mut keyb = RecordingSink::default();

    // Shift and A arrive in the same report; modifier pass runs first.
    let report = KeyboardReport {
        modifier: 0x02,
        reserved: 0,
        keycodes: [0x04, 0, 0, 0, 0, 0],
    };
    bridge.on_keyboard_report(&report, &mut keyb);
    assert_eq!(keyb.bytes, [0x70, 0x1E]);
}

#[test]
fn bridge_breaks_before_makes() {
    let mut bridge = Bridge::new();
    let mut keyb = RecordingSink::default();

    bridge.on_keyboard_report(&one_key(0x04), &mut keyb);
    keyb.bytes.clear();

    // A released and B pressed in the same report: break A, then make B.
    bridge.on_keyboard_report(&one_key(0x05), &mut keyb);
    assert_eq!(keyb.bytes, [0x9E, 0x2E]);
}

#[test]
fn bridge_skips_error_sentinels() {
    let mut bridge = Bridge::new();
    let mut keyb = RecordingSink::default();

    // ErrorRollOver fills all slots with 0x01.
    bridge.on_keyboard_report(&keys([0x01; 6]), &mut keyb);
    bridge.on_keyboard_report(&KeyboardReport::empty(), &mut keyb);
    assert!(keyb.bytes.is_empty());
}

#[test]
fn bridge_drops_untranslatable_keycodes() {
    let mut bridge = Bridge::new();
    let mut keyb = RecordingSink::default();

    // 0xE8 has no X68000 equivalent.
    bridge.on_keyboard_report(&one_key(0xE8), &mut keyb);
    bridge.on_keyboard_report(&KeyboardReport::empty(), &mut keyb);
    assert!(keyb.bytes.is_empty());
}

#[test]
fn bridge_repeat_fires_after_delay_then_interval() {
    let mut bridge = Bridge::new();
    let mut keyb = RecordingSink::default();

    bridge.on_keyboard_report(&one_key(0x04), &mut keyb);
    keyb.bytes.clear();

    // 500 ms delay at 100 ms ticks: nothing for four ticks.
    for _ in 0..4 {
        bridge.tick(100, &mut keyb);
        assert!(keyb.bytes.is_empty());
    }
    bridge.tick(100, &mut keyb);
    assert_eq!(keyb.bytes, [0x1E]);

    // Next repeat after the 110 ms interval (second tick crosses it).
    keyb.bytes.clear();
    bridge.tick(100, &mut keyb);
    assert!(keyb.bytes.is_empty());
    bridge.tick(100, &mut keyb);
    assert_eq!(keyb.bytes, [0x1E]);
}

#[test]
fn bridge_repeat_stops_on_break() {
    let mut bridge = Bridge::new();
    let mut keyb = RecordingSink::default();

    bridge.on_keyboard_report(&one_key(0x04), &mut keyb);
    bridge.on_keyboard_report(&KeyboardReport::empty(), &mut keyb);
    keyb.bytes.clear();

    for _ in 0..20 {
        bridge.tick(100, &mut keyb);
    }
    assert!(keyb.bytes.is_empty());
}

#[test]
fn bridge_repeat_rearms_on_newer_key() {
    let mut bridge = Bridge::new();
    let mut keyb = RecordingSink::default();

    bridge.on_keyboard_report(&one_key(0x04), &mut keyb);
    // B pressed while A held: B is now the repeat key.
    bridge.on_keyboard_report(&keys([0x04, 0x05, 0, 0, 0, 0]), &mut keyb);
    keyb.bytes.clear();

    for _ in 0..5 {
        bridge.tick(100, &mut keyb);
    }
    assert_eq!(keyb.bytes, [0x2E]); // repeat B, not A
}

#[test]
fn bridge_releasing_non_repeat_key_keeps_repeat() {
    let mut bridge = Bridge::new();
    let mut keyb = RecordingSink::default();

    bridge.on_keyboard_report(&one_key(0x04), &mut keyb);
    bridge.on_keyboard_report(&keys([0x04, 0x05, 0, 0, 0, 0]), &mut keyb);
    // Release A; B stays armed.
    bridge.on_keyboard_report(&one_key(0x05), &mut keyb);
    keyb.bytes.clear();

    for _ in 0..5 {
        bridge.tick(100, &mut keyb);
    }
    assert_eq!(keyb.bytes, [0x2E]);
}

#[test]
fn bridge_key_inhibit_suppresses_scancodes_only() {
    let mut bridge = Bridge::new();
    let mut keyb = RecordingSink::default();
    let mut mouse = RecordingSink::default();

    bridge.on_command_byte(0b0101_1000, &mut mouse); // inhibit on
    bridge.on_keyboard_report(&one_key(0x04), &mut keyb);
    assert!(keyb.bytes.is_empty());

    // Command parsing still proceeds: inhibit back off.
    bridge.on_command_byte(0b0101_1001, &mut mouse);
    bridge.on_keyboard_report(&KeyboardReport::empty(), &mut keyb);
    // The make was swallowed while inhibited; only the break goes out.
    assert_eq!(keyb.bytes, [0x9E]);
}

#[test]
fn bridge_tx_inhibit_suppresses_both_sinks() {
    let mut bridge = Bridge::new();
    let mut keyb = RecordingSink::default();
    let mut mouse = RecordingSink::default();

    bridge.set_tx_inhibit(true);
    bridge.on_keyboard_report(&one_key(0x04), &mut keyb);
    bridge.on_mouse_report(&MouseReport {
        buttons: 0,
        x: 5,
        y: 5,
        wheel: 0,
    });
    bridge.on_mouse_request(&mut mouse);
    for _ in 0..10 {
        bridge.tick(100, &mut keyb);
    }

    assert!(keyb.bytes.is_empty());
    assert!(mouse.bytes.is_empty());
}

#[test]
fn bridge_tx_inhibit_retains_mouse_deltas() {
    let mut bridge = Bridge::new();
    let mut mouse = RecordingSink::default();

    bridge.on_mouse_report(&MouseReport {
        buttons: 0,
        x: 7,
        y: -3,
        wheel: 0,
    });

    bridge.set_tx_inhibit(true);
    bridge.on_mouse_request(&mut mouse);
    assert!(mouse.bytes.is_empty());

    // Deltas survive the inhibited request and go out on the next one.
    bridge.set_tx_inhibit(false);
    bridge.on_mouse_request(&mut mouse);
    assert_eq!(mouse.bytes, [0x00, 0x07, 0xFD]);
}

#[test]
fn bridge_mouse_request_resets_deltas_keeps_buttons() {
    let mut bridge = Bridge::new();
    let mut mouse = RecordingSink::default();

    bridge.on_mouse_report(&MouseReport {
        buttons: 0x01,
        x: 4,
        y: 4,
        wheel: 0,
    });
    bridge.on_mouse_request(&mut mouse);
    assert_eq!(mouse.bytes, [0x01, 0x04, 0x04]);

    mouse.bytes.clear();
    bridge.on_mouse_request(&mut mouse);
    // Buttons persist; deltas are gone.
    assert_eq!(mouse.bytes, [0x01, 0x00, 0x00]);
}

#[test]
fn bridge_msctrl_command_edge_sends_frame() {
    let mut bridge = Bridge::new();
    let mut mouse = RecordingSink::default();

    bridge.on_mouse_report(&MouseReport {
        buttons: 0,
        x: 1,
        y: 2,
        wheel: 0,
    });

    bridge.on_command_byte(0b0100_0000, &mut mouse); // assert: edge → frame
    assert_eq!(mouse.bytes, [0x00, 0x01, 0x02]);

    // Still asserted: no second edge, no second frame.
    mouse.bytes.clear();
    bridge.on_command_byte(0b0100_0000, &mut mouse);
    assert!(mouse.bytes.is_empty());

    // Deassert then assert again: new edge.
    bridge.on_command_byte(0b0100_0001, &mut mouse);
    bridge.on_command_byte(0b0100_0000, &mut mouse);
    assert_eq!(mouse.bytes, [0x00, 0x00, 0x00]);
}

#[test]
fn bridge_command_updates_config() {
    let mut bridge = Bridge::new();
    let mut mouse = RecordingSink::default();

    bridge.on_command_byte(0x65, &mut mouse); // repeat delay nibble 5
    bridge.on_command_byte(0b0111_0010, &mut mouse); // interval nibble 2
    bridge.on_command_byte(0b0101_0110, &mut mouse); // brightness 2
    bridge.on_command_byte(0xD5, &mut mouse); // LED state 0x55

    let config = bridge.config();
    assert_eq!(config.repeat_delay_ms, 700);
    assert_eq!(config.repeat_interval_ms, 30 + 2 * 2 * 5);
    assert_eq!(config.led_brightness, 2);
    assert_eq!(config.led_state, 0x55);
}

#[test]
fn bridge_unknown_command_bytes_ignored() {
    let mut bridge = Bridge::new();
    let mut mouse = RecordingSink::default();

    let before = *bridge.config();
    bridge.on_command_byte(0x00, &mut mouse);
    bridge.on_command_byte(0x3F, &mut mouse);
    assert_eq!(*bridge.config(), before);
    assert!(mouse.bytes.is_empty());
}

#[test]
fn bridge_activity_latch() {
    let mut bridge = Bridge::new();
    let mut keyb = RecordingSink::default();
    let mut mouse = RecordingSink::default();

    assert!(!bridge.take_activity());

    bridge.on_keyboard_report(&one_key(0x04), &mut keyb);
    assert!(bridge.take_activity());
    assert!(!bridge.take_activity()); // consumed

    // An all-zero mouse frame does not count as activity.
    bridge.on_mouse_request(&mut mouse);
    assert!(!bridge.take_activity());

    bridge.on_mouse_report(&MouseReport {
        buttons: 0,
        x: 1,
        y: 0,
        wheel: 0,
    });
    bridge.on_mouse_request(&mut mouse);
    assert!(bridge.take_activity());
}
