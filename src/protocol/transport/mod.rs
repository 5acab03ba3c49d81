//! LongFi transport layer: radio capability traits, fragment sizing, and the
//! transmission cursor.
//!
//! ## Radio timing constants
//!
//! These constants mirror the defaults of the LongFi reference boards.

pub mod fragmentation;
pub mod traits;

/// Number of DIO interrupt lines a radio may wire to the link core.
pub const NUM_DIO_LINES: usize = 6;

/// Receive timeout meaning "stay in receive until told otherwise".
pub const RX_CONTINUOUS: u32 = 0;

/// Transmit timeout programmed into the radio for every packet (ms).
///
/// An SF10/125 kHz packet of 19 bytes takes roughly 370 ms on air; the margin
/// covers the slowest row of the shipped plans with room for busy-wait
/// latency in the driver.
pub const DEFAULT_TX_TIMEOUT_MS: u32 = 3000;

/// Single byte emitted by the RF test transmission.
pub const RF_TEST_BYTE: u8 = 0xAB;
