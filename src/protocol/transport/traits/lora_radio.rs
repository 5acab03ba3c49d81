//! Minimal abstraction for a LoRa transceiver. The link core only needs to
//! configure a transmission, pick a channel, push bytes, listen, and sleep;
//! anything chip-specific stays in the driver.
use super::dio_handler::DioHandler;
use crate::protocol::transport::{DEFAULT_TX_TIMEOUT_MS, NUM_DIO_LINES};

//==================================================================================Modulation
/// LoRa signal bandwidth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Bandwidth {
    Khz125 = 0,
    Khz250 = 1,
    Khz500 = 2,
}

impl Bandwidth {
    /// Bandwidth in hertz.
    pub const fn hz(self) -> u32 {
        match self {
            Bandwidth::Khz125 => 125_000,
            Bandwidth::Khz250 => 250_000,
            Bandwidth::Khz500 => 500_000,
        }
    }
}

/// LoRa forward error correction rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CodingRate {
    Cr4_5 = 1,
    Cr4_6 = 2,
    Cr4_7 = 3,
    Cr4_8 = 4,
}

//==================================================================================RadioConfig
/// Transmission parameters programmed before every packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    /// Output power in dBm.
    pub power: i8,
    pub bandwidth: Bandwidth,
    /// Spreading factor (7..=12 on most parts). Also selects the sizing row.
    pub spreading_factor: u8,
    pub coding_rate: CodingRate,
    /// Preamble length in symbols.
    pub preamble_length: u16,
    pub fixed_length_payload: bool,
    pub crc_on: bool,
    pub iq_inverted: bool,
    /// Transmit timeout in milliseconds.
    pub timeout_ms: u32,
}

impl RadioConfig {
    /// Same settings with another spreading factor.
    pub const fn with_spreading_factor(mut self, spreading_factor: u8) -> Self {
        self.spreading_factor = spreading_factor;
        self
    }

    /// Same settings with another output power.
    pub const fn with_power(mut self, power: i8) -> Self {
        self.power = power;
        self
    }
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            power: 14,
            bandwidth: Bandwidth::Khz125,
            spreading_factor: 9,
            coding_rate: CodingRate::Cr4_5,
            preamble_length: 8,
            fixed_length_payload: false,
            crc_on: true,
            iq_inverted: false,
            timeout_ms: DEFAULT_TX_TIMEOUT_MS,
        }
    }
}

//==================================================================================LoRaRadio
/// Contract the link core drives a transceiver through.
///
/// Every call is non-blocking: `send` and `rx` only start the operation, the
/// outcome is reported later through the driver's DIO handlers (or its own
/// interrupt routine) via [`RadioEvents`](crate::protocol::link::state::RadioEvents).
pub trait LoRaRadio {
    type Error: core::fmt::Debug;
    /// Interrupt handler object stored by the link core, one per DIO line.
    type Irq: DioHandler<Self>;

    /// Bring the chip up and hand back the handler for each DIO line it wires.
    fn init(&mut self) -> Result<[Option<Self::Irq>; NUM_DIO_LINES], Self::Error>;
    /// Program modulation and power for the next transmission.
    fn set_tx_config(&mut self, config: &RadioConfig) -> Result<(), Self::Error>;
    /// Tune to `frequency_hz`.
    fn set_channel(&mut self, frequency_hz: u32) -> Result<(), Self::Error>;
    /// Start transmitting `data` (at most one radio packet).
    fn send(&mut self, data: &[u8]) -> Result<(), Self::Error>;
    /// Start receiving; a timeout of 0 keeps the receiver open.
    fn rx(&mut self, timeout_ms: u32) -> Result<(), Self::Error>;
    /// Put the chip into its lowest power state.
    fn sleep(&mut self) -> Result<(), Self::Error>;
    /// 32 random bits from the radio's entropy source.
    fn random(&mut self) -> u32;
}
