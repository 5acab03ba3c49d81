//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (frame encoding, link
//! misuse, radio driver failures).
use thiserror_no_std::Error;

//================================================================================CODEC_ERROR
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Failures raised by a link-frame codec while encoding or decoding wire bytes.
pub enum CodecError {
    /// Output buffer cannot hold the encoded frame.
    #[error("Buffer too small")]
    BufferTooSmall,
    /// Payload exceeds what the codec can encode.
    #[error("Payload too large: {len} bytes")]
    PayloadTooLarge { len: usize },
    /// Payload needs more fragments than the fragment index can address.
    #[error("Too many fragments: {count}")]
    TooManyFragments { count: usize },
    /// Encoding produced no byte to transmit.
    #[error("Empty frame")]
    EmptyFrame,
    /// Packet does not start with a known header.
    #[error("Invalid header tag {tag:#04X}")]
    InvalidHeader { tag: u8 },
    /// Packet is shorter than its header.
    #[error("Truncated packet -> needed: {needed}, available: {available}")]
    TruncatedPacket { needed: usize, available: usize },
}

//==================================================================================LINK_ERROR
#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors returned by the link handle.
pub enum LongFiError<E: core::fmt::Debug> {
    /// Operation attempted before `init`.
    #[error("Link not initialized")]
    NotInitialized,
    /// Payload exceeds the codec's maximum encodable size.
    #[error("Payload too large")]
    PayloadTooLarge,
    /// A previous transmission has not completed yet.
    #[error("Transmission already in progress")]
    TransmitInProgress,
    /// Channel plan has no uplink channel or no usable sizing row.
    #[error("Invalid channel plan: {0}")]
    InvalidChannelPlan(&'static str),
    /// Codec failure unrelated to payload size.
    #[error("Codec error: {0}")]
    Codec(CodecError),
    /// Radio driver rejected an operation.
    #[error("Radio error: {0:?}")]
    Radio(E),
}

impl<E: core::fmt::Debug> From<CodecError> for LongFiError<E> {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::BufferTooSmall
            | CodecError::PayloadTooLarge { .. }
            | CodecError::TooManyFragments { .. } => LongFiError::PayloadTooLarge,
            other => LongFiError::Codec(other),
        }
    }
}
