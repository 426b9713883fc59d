//! usb2x68 - USB HID to Sharp X68000 keyboard/mouse bridge.
//!
//! The library contains the whole protocol engine and is pure logic:
//! it can be built and tested on the host with `cargo test` and no
//! features enabled.
//!
//! The embedded binary (`src/main.rs`, `--features embedded`) wires the
//! engine to the Raspberry Pi Pico's UARTs and GPIO signaling lines via
//! Embassy.

#![cfg_attr(not(test), no_std)]

pub mod activity;
pub mod config;
pub mod error;
pub mod hid;
pub mod ingest;
pub mod x68k;
