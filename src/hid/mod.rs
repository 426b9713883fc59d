//! HID report types and ingest classification.
//!
//! The USB host stack hands the bridge raw endpoint payloads; this module
//! turns them into typed reports the protocol engine consumes.

pub mod keyboard;
pub mod mouse;


pub use keyboard::KeyboardReport;
pub use mouse::MouseReport;

/// A typed HID report delivered by the upstream USB host stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Keyboard(KeyboardReport),
    Mouse(MouseReport),
}

impl HidReport {
    pub fn is_keyboard(&self) -> bool {
        matches!(self, HidReport::Keyboard(_))
    }

    pub fn is_mouse(&self) -> bool {
        matches!(self, HidReport::Mouse(_))
    }
}

/// Boot-protocol interface numbers per the USB HID spec (bInterfaceProtocol).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterfaceProtocol {
    None,
    Keyboard,
    Mouse,
}

/// Classify a raw endpoint payload given the interface protocol the device
/// advertised during enumeration.
pub fn classify_report(proto: InterfaceProtocol, data: &[u8]) -> Option<HidReport> {
    match proto {
        InterfaceProtocol::Keyboard => {
            KeyboardReport::from_interface_bytes(data).map(HidReport::Keyboard)
        }
        InterfaceProtocol::Mouse => MouseReport::from_interface_bytes(data).map(HidReport::Mouse),
        InterfaceProtocol::None => infer_from_length(data),
    }
}

/// Infer the report kind from the payload length alone.
///
/// Used when a device reports `bInterfaceProtocol = 0` but still sends
/// boot-compatible payloads (8 bytes = keyboard, 3-4 = mouse).
fn infer_from_length(data: &[u8]) -> Option<HidReport> {
    match data.len() {
        8 => KeyboardReport::from_interface_bytes(data).map(HidReport::Keyboard),
        3..=4 => MouseReport::from_interface_bytes(data).map(HidReport::Mouse),
        _ => None,
    }
}
