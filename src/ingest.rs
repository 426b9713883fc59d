//! Event plumbing between the input sources and the bridge task.
//!
//! Every input source pushes an [`Event`] through one channel and a single
//! consumer applies them to the [`Bridge`](crate::x68k::Bridge) with
//! [`dispatch`], so all protocol state mutation is serialized without
//! explicit critical sections.
//!
//! The upstream USB host stack is an external collaborator: its
//! report-received callback classifies the payload
//! ([`crate::hid::classify_report`]) and pushes the result through
//! [`sender`], then re-arms reception on the device instance. The firmware's
//! own UART reader and GPIO watchers feed the same channel.

use crate::hid::HidReport;
use crate::x68k::{Bridge, ScanSink};

#[cfg(feature = "embedded")]
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
#[cfg(feature = "embedded")]
use embassy_sync::channel::{Channel, Receiver, Sender};

/// Everything the bridge task reacts to besides its periodic tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A parsed HID report from the USB host stack.
    Report(HidReport),
    /// A command byte received on the keyboard link.
    HostByte(u8),
    /// Falling edge on the MSCTRL line.
    MouseRequest,
    /// Level of the READY line changed; `true` = inhibit.
    Ready(bool),
}

/// Apply one event to the bridge.
///
/// Keyboard scancodes go to `keyb`; mouse frames (whether requested by an
/// MSCTRL edge or a host command byte) go to `mouse`.
pub fn dispatch<K: ScanSink, M: ScanSink>(
    bridge: &mut Bridge,
    event: Event,
    keyb: &mut K,
    mouse: &mut M,
) {
    match event {
        Event::Report(HidReport::Keyboard(report)) => bridge.on_keyboard_report(&report, keyb),
        Event::Report(HidReport::Mouse(report)) => bridge.on_mouse_report(&report),
        Event::HostByte(byte) => bridge.on_command_byte(byte, mouse),
        Event::MouseRequest => bridge.on_mouse_request(mouse),
        Event::Ready(inhibit) => bridge.set_tx_inhibit(inhibit),
    }
}

#[cfg(feature = "embedded")]
static EVENTS: Channel<CriticalSectionRawMutex, Event, { crate::config::EVENT_QUEUE_DEPTH }> =
    Channel::new();

/// Producer handle for the event channel.
#[cfg(feature = "embedded")]
pub type EventSender =
    Sender<'static, CriticalSectionRawMutex, Event, { crate::config::EVENT_QUEUE_DEPTH }>;

/// Consumer handle for the event channel; only the bridge task holds one.
#[cfg(feature = "embedded")]
pub type EventReceiver =
    Receiver<'static, CriticalSectionRawMutex, Event, { crate::config::EVENT_QUEUE_DEPTH }>;

#[cfg(feature = "embedded")]
pub fn sender() -> EventSender {
    EVENTS.sender()
}

#[cfg(feature = "embedded")]
pub fn receiver() -> EventReceiver {
    EVENTS.receiver()
}
