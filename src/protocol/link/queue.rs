//! Queue carrying hardware events from interrupt context to the task that
//! pumps the link.
//!
//! The firmware provides the pre-allocated queue (typically a `static`); no
//! allocation is performed by the library.
use core::cell::Cell;

use embassy_sync::{
    blocking_mutex::{raw::CriticalSectionRawMutex, Mutex},
    channel::Channel,
};

use crate::protocol::link::events::RfEvent;

/// Bounded queue of [`RfEvent`]s. Posting never blocks.
pub struct HardwareEventQueue<const N: usize> {
    channel: Channel<CriticalSectionRawMutex, RfEvent, N>,
    dropped: Mutex<CriticalSectionRawMutex, Cell<u32>>,
}

impl<const N: usize> Default for HardwareEventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> HardwareEventQueue<N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: Mutex::new(Cell::new(0)),
        }
    }

    /// Post an event from interrupt context.
    ///
    /// Returns `false` when the queue is full; the event is dropped and counted.
    pub fn notify(&self, event: RfEvent) -> bool {
        match self.channel.try_send(event) {
            Ok(()) => true,
            Err(_) => {
                self.dropped.lock(|dropped| dropped.set(dropped.get().wrapping_add(1)));
                #[cfg(feature = "defmt")]
                defmt::warn!("Hardware event queue full, dropping {}", event);
                false
            }
        }
    }

    /// Wait for the next event.
    pub async fn receive(&self) -> RfEvent {
        self.channel.receive().await
    }

    /// Next event if one is queued.
    pub fn try_receive(&self) -> Option<RfEvent> {
        self.channel.try_receive().ok()
    }

    /// Events dropped because the queue was full.
    pub fn dropped_events(&self) -> u32 {
        self.dropped.lock(Cell::get)
    }
}
