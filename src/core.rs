//! Defines the "data contract" between `build.rs` (the scribe) and
//! the link core (the interpreter).
//!
//! `build.rs` generates static channel plans that instantiate [`ChannelPlan`].
//! The header lengths below are shared by the build-time validation, the
//! fragmentation arithmetic, and the reference frame codec.

// Some items are only used by the build script or by generated code.
#![allow(dead_code)]

/// Size of the staging buffer holding the encoded wire bytes of one transmission.
pub const TX_BUFFER_SIZE: usize = 512;

/// Header of a frame that fits in a single radio packet.
pub const SINGLE_HEADER_LEN: usize = 8;
/// Header of the first packet of a multi-fragment frame.
pub const MULTI_HEADER_LEN: usize = 9;
/// Header of every packet after the first one of a multi-fragment frame.
pub const FRAGMENT_HEADER_LEN: usize = 3;

/// Largest of the three header shapes. Every packet capacity must exceed it.
pub const LARGEST_HEADER_LEN: usize = MULTI_HEADER_LEN;

/// Regional radio plan: where to transmit and how much fits in one packet.
#[derive(Debug, PartialEq, Eq)]
pub struct ChannelPlan {
    /// Plan identifier (diagnostics).
    pub name: &'static str,
    /// Uplink centre frequencies in Hz. A channel is drawn at random per packet.
    pub uplink_channels: &'static [u32],
    /// Spreading factor of each sizing row, in row order.
    pub spreading_factors: &'static [u8],
    /// Maximum bytes one radio packet carries, one entry per row.
    pub payload_per_fragment: &'static [usize],
    /// Row used when the configured spreading factor has no row of its own.
    pub fallback_row: usize,
    /// Fixed frequency used by the RF test transmission.
    pub rf_test_frequency: u32,
}

impl ChannelPlan {
    /// Sizing row for a spreading factor, falling back to `fallback_row`.
    pub fn row_for(&self, spreading_factor: u8) -> usize {
        self.spreading_factors
            .iter()
            .position(|&sf| sf == spreading_factor)
            .unwrap_or(self.fallback_row)
    }

    /// Packet capacity of a sizing row.
    ///
    /// Rows past the end of the table resolve to the fallback row.
    pub fn packet_capacity(&self, row: usize) -> usize {
        self.payload_per_fragment
            .get(row)
            .or_else(|| self.payload_per_fragment.get(self.fallback_row))
            .copied()
            .unwrap_or(0)
    }

    /// Number of uplink channels in the plan.
    pub fn channel_count(&self) -> usize {
        self.uplink_channels.len()
    }
}
