//! usb2x68 firmware for the Raspberry Pi Pico.
//!
//! Wires the protocol engine to the board:
//!   - UART0 @ 2400 8N1 ↔ X68000 keyboard port (scancodes out, commands in)
//!   - UART1 @ 4800 8N2 → X68000 mouse port (frames out)
//!   - GP3 MSCTRL input (falling edge requests a mouse frame)
//!   - GP5 READY input (low inhibits all transmission)
//!   - on-board LED as activity indicator / heartbeat
//!
//! All protocol state lives in one [`Bridge`] owned by a single task; the
//! UART reader and GPIO watchers only push events into a channel, which
//! serializes every mutation without explicit critical sections.

#![no_std]
#![no_main]

use defmt::{debug, info, warn};
use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{
    self, Async, Blocking, Config as UartConfig, DataBits, Parity, StopBits, Uart, UartRx, UartTx,
};
use embassy_time::{with_timeout, Duration, Instant, Ticker};

use usb2x68::activity::ActivityLed;
use usb2x68::config;
use usb2x68::error::Error;
use usb2x68::ingest::{self, Event};
use usb2x68::x68k::{Bridge, ScanSink};

bind_interrupts!(struct Irqs {
    UART0_IRQ => uart::InterruptHandler<UART0>;
});

/// Keyboard-link serial sink (scancodes to the X68000).
struct KeybLink(UartTx<'static, UART0, Async>);

impl ScanSink for KeybLink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.0.blocking_write(bytes).map_err(|_| Error::Uart)
    }
}

/// Mouse-link serial sink (3-byte frames to the X68000).
struct MouseLink(UartTx<'static, embassy_rp::peripherals::UART1, Blocking>);

impl ScanSink for MouseLink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.0.blocking_write(bytes).map_err(|_| Error::Uart)
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    info!("usb2x68 starting");

    // Keyboard UART (2400 8N1, bidirectional)
    let mut keyb_config = UartConfig::default();
    keyb_config.baudrate = config::KEYB_UART_BAUD;
    keyb_config.data_bits = DataBits::DataBits8;
    keyb_config.stop_bits = StopBits::STOP1;
    keyb_config.parity = Parity::ParityNone;
    let keyb_uart = Uart::new(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        keyb_config,
    );
    let (keyb_tx, keyb_rx) = keyb_uart.split();

    // Mouse UART (4800 8N2, outbound only)
    let mut mouse_config = UartConfig::default();
    mouse_config.baudrate = config::MOUSE_UART_BAUD;
    mouse_config.data_bits = DataBits::DataBits8;
    mouse_config.stop_bits = StopBits::STOP2;
    mouse_config.parity = Parity::ParityNone;
    let mouse_tx = UartTx::new_blocking(p.UART1, p.PIN_4, mouse_config);

    // MSCTRL and READY, open-drain on the host side, pulled up here.
    let msctrl = Input::new(p.PIN_3, Pull::Up);
    let ready = Input::new(p.PIN_5, Pull::Up);

    let led = Output::new(p.PIN_25, Level::Low);

    spawner.must_spawn(keyb_rx_task(keyb_rx));
    spawner.must_spawn(msctrl_task(msctrl));
    spawner.must_spawn(ready_task(ready));
    spawner.must_spawn(bridge_task(KeybLink(keyb_tx), MouseLink(mouse_tx), led));

    info!("usb2x68 ready");
}

/// Watch the MSCTRL line; each falling edge is a mouse frame request.
#[embassy_executor::task]
async fn msctrl_task(mut msctrl: Input<'static>) {
    let events = ingest::sender();
    loop {
        msctrl.wait_for_falling_edge().await;
        events.send(Event::MouseRequest).await;
    }
}

/// Watch the READY line on both edges; low means "hold your bytes".
#[embassy_executor::task]
async fn ready_task(mut ready: Input<'static>) {
    let events = ingest::sender();
    // Report the boot-time level first in case the host is already busy.
    events.send(Event::Ready(ready.is_low())).await;
    loop {
        ready.wait_for_any_edge().await;
        events.send(Event::Ready(ready.is_low())).await;
    }
}

/// Read host command bytes from the keyboard link, one at a time.
///
/// The RP2040 UART RX interrupt only fires at >=4 queued bytes or after a
/// 32-bit-clock idle, so the original firmware polled the FIFO every tick.
/// A per-byte DMA read gives the same observable behavior with less
/// latency.
#[embassy_executor::task]
async fn keyb_rx_task(mut rx: UartRx<'static, UART0, Async>) {
    let mut byte = [0u8; 1];

    // Drain whatever the host sent while we were off. At 2400 baud a byte
    // takes ~4.2 ms, so a 50 ms silence means the FIFO is empty.
    loop {
        match with_timeout(Duration::from_millis(50), rx.read(&mut byte)).await {
            Ok(Ok(())) => debug!("discarding stale host byte {=u8:#x}", byte[0]),
            Ok(Err(_)) | Err(_) => break,
        }
    }

    let events = ingest::sender();
    loop {
        match rx.read(&mut byte).await {
            Ok(()) => events.send(Event::HostByte(byte[0])).await,
            Err(e) => warn!("keyboard uart read error: {}", e),
        }
    }
}

/// The single owner of all protocol state.
///
/// Multiplexes HID reports, host bytes, and signal edges with the
/// periodic tick that drives the repeat timer and the activity LED.
#[embassy_executor::task]
async fn bridge_task(mut keyb: KeybLink, mut mouse: MouseLink, mut led: Output<'static>) {
    let mut bridge = Bridge::new();
    let mut heartbeat = ActivityLed::new();
    let mut ticker = Ticker::every(Duration::from_millis(config::TICK_MS as u64));
    let events = ingest::receiver();

    let mut last_tick = Instant::now();
    let mut active_until = Instant::now();

    loop {
        match select(events.receive(), ticker.next()).await {
            Either::First(event) => {
                match event {
                    Event::HostByte(byte) => debug!("host command byte {=u8:#x}", byte),
                    Event::Ready(inhibit) => debug!("ready line: inhibit={}", inhibit),
                    _ => {}
                }
                ingest::dispatch(&mut bridge, event, &mut keyb, &mut mouse);
            }
            Either::Second(()) => {
                let now = Instant::now();
                let dt_ms = (now - last_tick).as_millis() as u32;
                last_tick = now;

                bridge.tick(dt_ms, &mut keyb);

                if bridge.take_activity() {
                    active_until = now + Duration::from_millis(config::LED_ACTIVE_HOLD_MS as u64);
                }
                let rate = if now < active_until {
                    config::LED_ACTIVE_RATE_MS
                } else {
                    config::LED_IDLE_RATE_MS
                };
                if let Some(lit) = heartbeat.poll(now.as_millis() as u32, rate) {
                    led.set_level(if lit { Level::High } else { Level::Low });
                }
            }
        }
    }
}
