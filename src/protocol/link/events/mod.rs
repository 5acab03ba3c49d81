//! Event vocabularies of the link core.
//!
//! * [`RfEvent`]: what the hardware reports (interrupt line or timer).
//! * [`InternalEvent`]: what the radio driver concluded (recorded in the
//!   shared [`LinkState`](crate::protocol::link::state::LinkState)).
//! * [`ClientEvent`]: what the application sees after a pump.

//==================================================================================RfEvent
/// Hardware notification posted by the board's interrupt glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RfEvent {
    Dio0,
    Dio1,
    Dio2,
    Dio3,
    Dio4,
    Dio5,
    Timer1,
    Timer2,
    Timer3,
}

impl RfEvent {
    /// Index of the DIO line behind this event, `None` for timers.
    pub const fn dio_line(self) -> Option<usize> {
        match self {
            RfEvent::Dio0 => Some(0),
            RfEvent::Dio1 => Some(1),
            RfEvent::Dio2 => Some(2),
            RfEvent::Dio3 => Some(3),
            RfEvent::Dio4 => Some(4),
            RfEvent::Dio5 => Some(5),
            RfEvent::Timer1 | RfEvent::Timer2 | RfEvent::Timer3 => None,
        }
    }
}

//==================================================================================InternalEvent
/// Outcome reported by the radio driver, pending until the next pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InternalEvent {
    TxDone,
    RxDone,
    TxTimeout,
    RxTimeout,
    RxError,
}

impl InternalEvent {
    /// Client-visible kind of an outcome the link core does not act upon.
    pub const fn unhandled(self) -> Option<UnhandledEvent> {
        match self {
            InternalEvent::TxTimeout => Some(UnhandledEvent::TxTimeout),
            InternalEvent::RxTimeout => Some(UnhandledEvent::RxTimeout),
            InternalEvent::RxError => Some(UnhandledEvent::RxError),
            InternalEvent::TxDone | InternalEvent::RxDone => None,
        }
    }
}

//==================================================================================ClientEvent
/// Radio outcome surfaced to the client without further processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnhandledEvent {
    /// The radio gave up on a transmission; it is dropped, not retried.
    TxTimeout,
    /// Receive window closed without a frame.
    RxTimeout,
    /// A frame was received but failed the radio's checks.
    RxError,
}

/// Result of pumping one hardware event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClientEvent {
    /// Nothing for the client (includes intermediate fragments).
    None,
    /// The radio reported a transmission done with nothing left to send.
    ///
    /// Also reported for a late completion when no transmission is in flight
    /// (after a `TxTimeout` dropped it); that one confirms no delivery.
    TxDone,
    /// A frame is waiting in the receive buffer.
    Rx,
    /// See [`UnhandledEvent`].
    Unhandled(UnhandledEvent),
}

impl ClientEvent {
    /// Anything other than [`ClientEvent::None`].
    pub const fn is_some(&self) -> bool {
        !matches!(self, ClientEvent::None)
    }
}
