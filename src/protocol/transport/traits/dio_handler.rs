//! Interrupt handler objects a radio driver registers for its DIO lines.
use crate::protocol::link::state::RadioEvents;

/// Service routine for one DIO line.
///
/// The link core fires the handler registered for a line when the client
/// pumps the matching hardware event. The handler reads the radio's interrupt
/// status and reports completions through `events`; it must not reconfigure
/// the radio or start a transmission.
pub trait DioHandler<R: ?Sized> {
    fn fire(&self, radio: &mut R, events: &RadioEvents<'_, '_>);
}
