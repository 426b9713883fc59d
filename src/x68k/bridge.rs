//! The protocol engine: keyboard diff passes, typematic repeat, mouse
//! frame emission, host command application, and send gating.
//!
//! All mutable state lives in a single [`Bridge`] record created once at
//! boot. Every entry point takes the record by exclusive reference, so an
//! embedded caller only needs a critical-section (or single-task) wrapper
//! around the record itself.

use crate::config;
use crate::error::Error;
use crate::hid::keyboard::{KeyboardReport, HID_KEY_ERROR_MAX};
use crate::hid::mouse::MouseReport;

use super::command::Command;
use super::mouse::{MotionState, MouseFrame};
use super::scancode::{scan_for_keycode, BREAK_FLAG, MODIFIER_SCANS};

/// Byte sink for one X68000 serial link.
///
/// Implementations block until the bytes are on the wire; at 2400/4800 baud
/// that is bounded and the protocol is fire-and-forget, so the engine
/// ignores sink errors.
pub trait ScanSink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error>;
}

/// Host-configurable behavior, mutated by the command parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigState {
    /// READY line is low; all outbound transmission is inhibited.
    pub tx_inhibit: bool,
    /// Host has inhibited keyboard scancode emission.
    pub key_inhibit: bool,
    /// Host currently asserts MSCTRL (via command byte).
    pub msctrl_asserted: bool,
    /// Keyboard LED brightness, 0-3.
    pub led_brightness: u8,
    /// Per-key LED mask, 7 bits.
    pub led_state: u8,
    /// Delay before the first typematic repeat (ms).
    pub repeat_delay_ms: u16,
    /// Interval between typematic repeats (ms).
    pub repeat_interval_ms: u16,
}

impl ConfigState {
    pub const fn new() -> Self {
        Self {
            tx_inhibit: false,
            key_inhibit: false,
            msctrl_asserted: false,
            led_brightness: 0,
            led_state: 0,
            repeat_delay_ms: config::REPEAT_DELAY_DEFAULT_MS,
            repeat_interval_ms: config::REPEAT_INTERVAL_DEFAULT_MS,
        }
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        Self::new()
    }
}

/// Typematic repeat for the most recently pressed non-modifier key.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepeatState {
    /// HID keycode eligible for repeat; 0 = disarmed.
    pub keycode: u8,
    /// Milliseconds until the next repeat make; counts down while > 0.
    pub countdown_ms: i32,
}

impl RepeatState {
    const fn disarmed() -> Self {
        Self {
            keycode: 0,
            countdown_ms: 0,
        }
    }
}

/// The bridge engine. Owns every piece of mutable protocol state.
#[derive(Clone, Copy, Debug)]
pub struct Bridge {
    config: ConfigState,
    motion: MotionState,
    repeat: RepeatState,
    prev_report: KeyboardReport,
    /// Latched when a scancode or non-empty mouse frame went out; the
    /// main loop consumes it to speed up the activity LED.
    activity: bool,
}

impl Bridge {
    pub const fn new() -> Self {
        Self {
            config: ConfigState::new(),
            motion: MotionState::new(),
            repeat: RepeatState::disarmed(),
            prev_report: KeyboardReport::empty(),
            activity: false,
        }
    }

    /// Current host-configured state (LED brightness etc. for the caller
    /// to render).
    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    /// Consume the activity latch.
    pub fn take_activity(&mut self) -> bool {
        core::mem::take(&mut self.activity)
    }

    // ── HID ingest ─────────────────────────────────────────────────────

    /// Handle one keyboard report from the USB host stack.
    ///
    /// Emits modifier changes, then break codes, then make codes, in that
    /// order, and stores the report as the new comparison baseline. The
    /// baseline advances even while emission is inhibited, so a release
    /// that happens during inhibit is lost; the original hardware behaves
    /// the same way.
    pub fn on_keyboard_report<K: ScanSink>(&mut self, report: &KeyboardReport, keyb: &mut K) {
        let prev = self.prev_report;

        let changed = prev.modifier ^ report.modifier;
        for bit in 0..8 {
            let mask = 1u8 << bit;
            if changed & mask != 0 {
                let make = report.modifier & mask != 0;
                let scan = MODIFIER_SCANS[bit] | if make { 0 } else { BREAK_FLAG };
                self.send_keyboard_byte(scan, keyb);
            }
        }

        // Break codes: keys held before, gone now.
        self.diff_keycodes(&prev, report, false, keyb);
        // Make codes: keys new in this report.
        self.diff_keycodes(report, &prev, true, keyb);

        self.prev_report = *report;
    }

    /// Handle one mouse report from the USB host stack.
    ///
    /// Only accumulates; emission waits for the host to request a frame.
    pub fn on_mouse_report(&mut self, report: &MouseReport) {
        self.motion.accumulate(report);
    }

    // ── Keyboard diff engine ───────────────────────────────────────────

    /// Emit a make (or break) for every keycode present in `a` but not in
    /// `b`, arming or disarming the repeat timer as keys come and go.
    fn diff_keycodes<K: ScanSink>(
        &mut self,
        a: &KeyboardReport,
        b: &KeyboardReport,
        make: bool,
        keyb: &mut K,
    ) {
        for &keycode in a.keycodes.iter() {
            // Skip empty slots and the HID error sentinels.
            if keycode <= HID_KEY_ERROR_MAX {
                continue;
            }
            if b.contains(keycode) {
                continue;
            }

            self.send_keycode(keycode, make, keyb);

            if make {
                self.repeat.keycode = keycode;
                self.repeat.countdown_ms = i32::from(self.config.repeat_delay_ms);
            } else if self.repeat.keycode == keycode {
                self.repeat = RepeatState::disarmed();
            }
        }
    }

    fn send_keycode<K: ScanSink>(&mut self, keycode: u8, make: bool, keyb: &mut K) {
        if let Some(scan) = scan_for_keycode(keycode) {
            self.send_keyboard_byte(scan | if make { 0 } else { BREAK_FLAG }, keyb);
        }
    }

    fn send_keyboard_byte<K: ScanSink>(&mut self, scan: u8, keyb: &mut K) {
        if self.config.tx_inhibit || self.config.key_inhibit {
            return;
        }
        let _ = keyb.write(&[scan]);
        self.activity = true;
    }

    // ── Repeat timer ───────────────────────────────────────────────────

    /// Advance the repeat timer by `dt_ms` milliseconds.
    ///
    /// Called once per main-loop tick. Emits a repeat make when the
    /// countdown expires and reloads it with the configured interval.
    pub fn tick<K: ScanSink>(&mut self, dt_ms: u32, keyb: &mut K) {
        if self.repeat.countdown_ms <= 0 {
            return;
        }
        self.repeat.countdown_ms -= dt_ms as i32;
        if self.repeat.countdown_ms <= 0 {
            let keycode = self.repeat.keycode;
            self.send_keycode(keycode, true, keyb);
            self.repeat.countdown_ms = i32::from(self.config.repeat_interval_ms);
        }
    }

    // ── Host commands ──────────────────────────────────────────────────

    /// Apply one command byte received on the keyboard link.
    ///
    /// Command parsing is never gated by the inhibit flags. A false→true
    /// MSCTRL transition requests a mouse frame, so the mouse sink is
    /// needed here.
    pub fn on_command_byte<M: ScanSink>(&mut self, byte: u8, mouse: &mut M) {
        let Some(command) = Command::decode(byte) else {
            return;
        };
        match command {
            Command::MouseControl { asserted } => {
                let was_asserted = self.config.msctrl_asserted;
                self.config.msctrl_asserted = asserted;
                if !was_asserted && asserted {
                    self.send_mouse_frame(mouse);
                }
            }
            Command::LedBrightness(level) => self.config.led_brightness = level,
            Command::KeyInhibit { inhibit } => self.config.key_inhibit = inhibit,
            Command::RepeatDelay(ms) => self.config.repeat_delay_ms = ms,
            Command::RepeatInterval(ms) => self.config.repeat_interval_ms = ms,
            Command::LedState(mask) => self.config.led_state = mask,
        }
    }

    // ── Signaling lines ────────────────────────────────────────────────

    /// Falling edge on the mouse-request line: send a frame now.
    pub fn on_mouse_request<M: ScanSink>(&mut self, mouse: &mut M) {
        self.send_mouse_frame(mouse);
    }

    /// Level of the READY line changed; low inhibits all transmission.
    pub fn set_tx_inhibit(&mut self, inhibit: bool) {
        self.config.tx_inhibit = inhibit;
    }

    // ── Mouse framer ───────────────────────────────────────────────────

    /// Pack and emit the accumulated motion as a 3-byte frame.
    ///
    /// While inhibited nothing is sent and the deltas are retained, so the
    /// next request still sees the full motion. On success the deltas are
    /// zeroed and the activity latch is set only for a non-empty frame.
    fn send_mouse_frame<M: ScanSink>(&mut self, mouse: &mut M) {
        if self.config.tx_inhibit {
            return;
        }

        let frame = MouseFrame::pack(&self.motion);
        let _ = mouse.write(&frame.bytes);

        self.motion.reset_deltas();

        if !frame.is_empty() {
            self.activity = true;
        }
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new()
    }
}
