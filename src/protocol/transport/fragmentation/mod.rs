//! Fragmentation arithmetic: how many payload bytes each packet shape carries
//! for the active spreading factor, and the cursor that walks an encoded frame
//! one radio packet at a time.
use crate::core::{
    ChannelPlan, FRAGMENT_HEADER_LEN, LARGEST_HEADER_LEN, MULTI_HEADER_LEN, SINGLE_HEADER_LEN,
    TX_BUFFER_SIZE,
};

//==================================================================================Sizing
/// Space budget of one radio packet for a given spreading factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FragmentSizing {
    packet_capacity: usize,
}

impl FragmentSizing {
    /// Sizing for a radio packet of `packet_capacity` bytes.
    ///
    /// The capacity must exceed the largest header; generated plans guarantee
    /// it, hand-built ones are the caller's responsibility.
    pub const fn new(packet_capacity: usize) -> Self {
        debug_assert!(packet_capacity > LARGEST_HEADER_LEN);
        Self { packet_capacity }
    }

    /// Sizing of one row of a channel plan.
    pub fn for_plan(plan: &ChannelPlan, row: usize) -> Self {
        Self::new(plan.packet_capacity(row))
    }

    /// Maximum bytes per radio packet.
    #[inline]
    pub const fn packet_capacity(&self) -> usize {
        self.packet_capacity
    }

    /// Payload bytes of a frame that fits a single packet.
    #[inline]
    pub const fn single_fragment_payload(&self) -> usize {
        self.packet_capacity.saturating_sub(SINGLE_HEADER_LEN)
    }

    /// Payload bytes in the first packet of a multi-fragment frame.
    #[inline]
    pub const fn first_of_many_payload(&self) -> usize {
        self.packet_capacity.saturating_sub(MULTI_HEADER_LEN)
    }

    /// Payload bytes in each following packet.
    #[inline]
    pub const fn subsequent_payload(&self) -> usize {
        self.packet_capacity.saturating_sub(FRAGMENT_HEADER_LEN)
    }

    /// Radio packets needed to carry `wire_len` encoded bytes.
    pub const fn packets_for(&self, wire_len: usize) -> usize {
        wire_len.div_ceil(self.packet_capacity)
    }
}

//==================================================================================Cursor
/// Outbound transmission progress: the staged wire bytes, how many there are,
/// and how many were already handed to the radio.
///
/// Invariant: `sent <= total`. The transmission is complete when they are equal.
#[derive(Debug)]
pub struct TxCursor {
    buffer: [u8; TX_BUFFER_SIZE],
    total: usize,
    sent: usize,
    in_flight: bool,
}

impl Default for TxCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl TxCursor {
    pub const fn new() -> Self {
        Self {
            buffer: [0; TX_BUFFER_SIZE],
            total: 0,
            sent: 0,
            in_flight: false,
        }
    }

    /// Staging area the codec encodes into.
    pub fn staging_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Start a transmission of the first `len` staged bytes.
    pub fn load(&mut self, len: usize) {
        self.total = len.min(TX_BUFFER_SIZE);
        self.sent = 0;
        self.in_flight = true;
    }

    /// Next slice of at most `capacity` bytes, advancing the sent counter.
    ///
    /// Returns `None` once every staged byte was handed out.
    pub fn next_slice(&mut self, capacity: usize) -> Option<&[u8]> {
        if self.is_complete() || capacity == 0 {
            return None;
        }
        let start = self.sent;
        let len = capacity.min(self.total - self.sent);
        self.sent += len;
        Some(&self.buffer[start..start + len])
    }

    /// Every staged byte was handed to the radio.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.sent == self.total
    }

    /// A transmission was loaded and its final `TxDone` has not been seen.
    #[inline]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Mark the transmission as acknowledged by the radio.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    /// Drop the transmission; nothing is left to send.
    pub fn abandon(&mut self) {
        self.total = 0;
        self.sent = 0;
        self.in_flight = false;
    }

    /// Encoded length of the current transmission.
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Bytes already handed to the radio.
    #[inline]
    pub fn sent(&self) -> usize {
        self.sent
    }
}
