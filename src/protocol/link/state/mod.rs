//! State shared between the radio's interrupt context and the link handle.
//!
//! The firmware declares one [`LinkState`] as a `static` and hands references
//! to the [`Handle`](crate::protocol::link::handle::Handle) and to the driver's
//! interrupt glue. Interrupt context only records outcomes through
//! [`RadioEvents`]; the main context reads and clears them when it pumps
//! events. Every access is a short critical section; no radio call is ever
//! made while one is held.
use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

use crate::protocol::link::events::InternalEvent;

//==================================================================================Shared
struct Shared<'buf> {
    pending: Option<InternalEvent>,
    overwritten: u32,
    rx_buffer: Option<&'buf mut [u8]>,
    rx_len: usize,
    rx_reported_len: usize,
    last_rssi: i16,
    last_snr: i8,
}

impl<'buf> Shared<'buf> {
    const fn new() -> Self {
        Self {
            pending: None,
            overwritten: 0,
            rx_buffer: None,
            rx_len: 0,
            rx_reported_len: 0,
            last_rssi: 0,
            last_snr: 0,
        }
    }

    /// Record `event`, returning the undrained event it replaced.
    fn post(&mut self, event: InternalEvent) -> Option<InternalEvent> {
        let previous = self.pending.replace(event);
        if previous.is_some() {
            self.overwritten = self.overwritten.wrapping_add(1);
        }
        previous
    }
}

//==================================================================================LinkState
/// Interrupt-visible part of a link session.
pub struct LinkState<'buf> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Shared<'buf>>>,
}

impl Default for LinkState<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'buf> LinkState<'buf> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Shared::new())),
        }
    }

    /// Sink the radio driver reports its outcomes to.
    pub fn events(&self) -> RadioEvents<'_, 'buf> {
        RadioEvents { link: self }
    }

    /// Outcome recorded since the last pump, without clearing it.
    pub fn pending_event(&self) -> Option<InternalEvent> {
        self.with(|shared| shared.pending)
    }

    /// Read and clear the pending outcome.
    pub(crate) fn take_event(&self) -> Option<InternalEvent> {
        self.with(|shared| shared.pending.take())
    }

    /// Outcomes replaced before the main context drained them.
    pub fn overwritten_events(&self) -> u32 {
        self.with(|shared| shared.overwritten)
    }

    /// Hand a receive buffer to the link. Any previous buffer is released.
    pub fn set_rx_buffer(&self, buffer: &'buf mut [u8]) {
        self.with(|shared| {
            shared.rx_buffer = Some(buffer);
            shared.rx_len = 0;
            shared.rx_reported_len = 0;
        });
    }

    /// Take the receive buffer back together with what was captured in it.
    ///
    /// Returns `None` when no buffer is held.
    pub fn take_rx(&self) -> Option<RxPacket<'buf>> {
        self.with(|shared| {
            let buf = shared.rx_buffer.take()?;
            let packet = RxPacket {
                buf,
                len: shared.rx_len,
                reported_len: shared.rx_reported_len,
                rssi: shared.last_rssi,
                snr: shared.last_snr,
            };
            shared.rx_len = 0;
            shared.rx_reported_len = 0;
            Some(packet)
        })
    }

    /// Whether a receive buffer is currently held.
    pub fn has_rx_buffer(&self) -> bool {
        self.with(|shared| shared.rx_buffer.is_some())
    }

    /// RSSI (dBm) and SNR (dB) of the last received frame.
    pub fn link_quality(&self) -> (i16, i8) {
        self.with(|shared| (shared.last_rssi, shared.last_snr))
    }

    fn with<T>(&self, f: impl FnOnce(&mut Shared<'buf>) -> T) -> T {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    fn post(&self, event: InternalEvent) {
        let _replaced = self.with(|shared| shared.post(event));
        #[cfg(feature = "defmt")]
        {
            if let Some(previous) = _replaced {
                defmt::warn!("Radio event {} overwrote undrained {}", event, previous);
            }
        }
    }
}

//==================================================================================RadioEvents
/// Completion callbacks of the radio driver.
///
/// Safe to call from interrupt context: each call is one short critical
/// section. Only the latest outcome is kept until the next pump.
#[derive(Clone, Copy)]
pub struct RadioEvents<'a, 'buf> {
    link: &'a LinkState<'buf>,
}

impl<'a, 'buf> RadioEvents<'a, 'buf> {
    pub fn on_tx_done(&self) {
        self.link.post(InternalEvent::TxDone);
    }

    /// Copy a received frame into the client's buffer.
    ///
    /// Bytes beyond the buffer capacity are dropped; the reported size is kept
    /// so the client can detect it. Without a buffer nothing is copied.
    pub fn on_rx_done(&self, payload: &[u8], rssi: i16, snr: i8) {
        let (_copied, _replaced) = self.link.with(|shared| {
            let copy_len = match shared.rx_buffer.as_deref_mut() {
                Some(buf) => {
                    let copy_len = payload.len().min(buf.len());
                    buf[..copy_len].copy_from_slice(&payload[..copy_len]);
                    copy_len
                }
                None => 0,
            };
            shared.rx_len = copy_len;
            shared.rx_reported_len = payload.len();
            shared.last_rssi = rssi;
            shared.last_snr = snr;
            (copy_len, shared.post(InternalEvent::RxDone))
        });
        #[cfg(feature = "defmt")]
        {
            if _copied < payload.len() {
                defmt::debug!(
                    "Received {} bytes, kept {} (rssi {}, snr {})",
                    payload.len(),
                    _copied,
                    rssi,
                    snr
                );
            }
            if let Some(previous) = _replaced {
                defmt::warn!("Radio event RxDone overwrote undrained {}", previous);
            }
        }
    }

    pub fn on_tx_timeout(&self) {
        self.link.post(InternalEvent::TxTimeout);
    }

    pub fn on_rx_timeout(&self) {
        self.link.post(InternalEvent::RxTimeout);
    }

    pub fn on_rx_error(&self) {
        self.link.post(InternalEvent::RxError);
    }
}

//==================================================================================RxPacket
/// Frame handed back to the client, owning the receive buffer again.
#[derive(Debug)]
pub struct RxPacket<'buf> {
    pub buf: &'buf mut [u8],
    /// Bytes copied into `buf`.
    pub len: usize,
    /// Size of the frame as reported by the radio.
    pub reported_len: usize,
    pub rssi: i16,
    pub snr: i8,
}

impl<'buf> RxPacket<'buf> {
    /// Received bytes.
    pub fn payload(&self) -> &[u8] {
        &self.buf[..self.len.min(self.buf.len())]
    }

    /// The frame did not fit in the buffer.
    pub fn is_truncated(&self) -> bool {
        self.reported_len > self.len
    }

    /// Release the buffer for the next receive.
    pub fn into_buffer(self) -> &'buf mut [u8] {
        self.buf
    }
}
