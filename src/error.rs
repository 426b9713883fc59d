//! Unified error type for usb2x68.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` behind the `defmt` feature so the host
//! test build stays dependency-free.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A serial write to one of the X68000 links failed.
    Uart,

    /// The USB host stack reported an error delivering a report.
    Usb,

    /// Payload too short or buffer too small for the requested operation.
    BufferOverflow,
}
