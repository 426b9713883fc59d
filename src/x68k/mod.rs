//! Sharp X68000 input protocol engine.
//!
//! Translates USB HID keyboard/mouse state into the X68000 serial
//! scancode protocol ('X68000 Technical Guide', Chapter 5) and applies
//! the host's command bytes and signaling lines.

pub mod bridge;
pub mod command;
pub mod mouse;
pub mod scancode;

#[cfg(test)]
mod tests;

pub use bridge::{Bridge, ConfigState, RepeatState, ScanSink};
pub use command::Command;
pub use mouse::{MotionState, MouseFrame};
