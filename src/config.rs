//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, serial parameters, and timing defaults
//! live here so they can be tuned in one place.

// X68000 keyboard link (UART0, bidirectional)

/// Keyboard link baud rate (8 data bits, no parity, 1 stop bit).
pub const KEYB_UART_BAUD: u32 = 2400;

// X68000 mouse link (UART1, outbound only)

/// Mouse link baud rate (8 data bits, no parity, 2 stop bits).
pub const MOUSE_UART_BAUD: u32 = 4800;

// GPIO pin assignments (Raspberry Pi Pico)
//
// These are logical names; actual `embassy_rp::peripherals::*` pins are
// selected in `main.rs`. The mapping matches the Mini-DIN pinout:
//
//   GP0 UART0 TX  → "KEY RxD"  (pin 2, Keyboard Mini-DIN 7-pin)
//   GP1 UART0 RX  → "KEY TxD"  (pin 4, Keyboard Mini-DIN 7-pin)
//   GP3 input     → "MSCTRL"   (pin 2, Mouse Mini-DIN 5-pin)
//   GP4 UART1 TX  → "MSDATA"   (pin 3, Mouse Mini-DIN 5-pin)
//   GP5 input     → "READY"    (pin 5, Keyboard Mini-DIN 7-pin)

// Typematic repeat

/// Delay before the first auto-repeat (ms). Host-configurable.
pub const REPEAT_DELAY_DEFAULT_MS: u16 = 500;

/// Interval between auto-repeats (ms). Host-configurable.
pub const REPEAT_INTERVAL_DEFAULT_MS: u16 = 110;

// Main loop & activity LED

/// Period of the repeat-timer / command-poll tick (ms).
pub const TICK_MS: u32 = 10;

/// Activity LED toggle rate while idle (ms) - the ~1 Hz heartbeat.
pub const LED_IDLE_RATE_MS: u32 = 500;

/// Activity LED toggle rate after a scancode or mouse frame went out (ms).
pub const LED_ACTIVE_RATE_MS: u32 = 100;

/// How long emission activity keeps the LED on the fast rate (ms).
pub const LED_ACTIVE_HOLD_MS: u32 = 500;

// Event plumbing

/// Depth of the event channel between the ingest/signal tasks and the
/// bridge task.
pub const EVENT_QUEUE_DEPTH: usize = 32;
