//! Reference LongFi frame layout. Lays a payload out as one radio packet or as
//! a first packet followed by fragments, each cut on the packet capacity of the
//! active spreading factor.
//!
//! ```text
//! single       | 0x01 | oui (4, LE) | device_id (2, LE) | seq | payload…
//! first-of-many| 0x02 | oui (4, LE) | device_id (2, LE) | seq | count | payload…
//! fragment     | 0x03 | seq | index | payload…
//! ```
//!
//! This codec does not authenticate frames.
use crate::core::{FRAGMENT_HEADER_LEN, MULTI_HEADER_LEN, SINGLE_HEADER_LEN};
use crate::error::CodecError;
use crate::infra::codec::traits::{FrameContext, LinkFrameCodec};
use crate::protocol::transport::fragmentation::FragmentSizing;

//==================================================================================Constants
/// Leading byte of a single-packet frame.
pub const TAG_SINGLE: u8 = 0x01;
/// Leading byte of the first packet of a multi-fragment frame.
pub const TAG_FIRST_OF_MANY: u8 = 0x02;
/// Leading byte of a continuation fragment.
pub const TAG_FRAGMENT: u8 = 0x03;

/// Upper bound on radio packets per frame (fragment count travels in one byte).
pub const MAX_FRAGMENTS: usize = u8::MAX as usize;

//==================================================================================Headers
/// Header of a frame carried by a single radio packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    pub oui: u32,
    pub device_id: u16,
    pub sequence: u8,
}

impl PacketHeader {
    fn write(&self, out: &mut [u8]) {
        out[0] = TAG_SINGLE;
        write_identity(&mut out[1..8], self.oui, self.device_id, self.sequence);
    }

    fn read(packet: &[u8]) -> Result<Self, CodecError> {
        let bytes = header_bytes(packet, SINGLE_HEADER_LEN)?;
        let (oui, device_id, sequence) = read_identity(&bytes[1..8]);
        Ok(Self {
            oui,
            device_id,
            sequence,
        })
    }
}

/// Header of the first packet of a multi-fragment frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiFragmentHeader {
    pub oui: u32,
    pub device_id: u16,
    pub sequence: u8,
    /// Total number of radio packets, this one included.
    pub fragment_count: u8,
}

impl MultiFragmentHeader {
    fn write(&self, out: &mut [u8]) {
        out[0] = TAG_FIRST_OF_MANY;
        write_identity(&mut out[1..8], self.oui, self.device_id, self.sequence);
        out[8] = self.fragment_count;
    }

    fn read(packet: &[u8]) -> Result<Self, CodecError> {
        let bytes = header_bytes(packet, MULTI_HEADER_LEN)?;
        let (oui, device_id, sequence) = read_identity(&bytes[1..8]);
        Ok(Self {
            oui,
            device_id,
            sequence,
            fragment_count: bytes[8],
        })
    }
}

/// Header of every packet after the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentHeader {
    pub sequence: u8,
    /// Position of the packet in the frame; the first packet is index 0.
    pub index: u8,
}

impl FragmentHeader {
    fn write(&self, out: &mut [u8]) {
        out[0] = TAG_FRAGMENT;
        out[1] = self.sequence;
        out[2] = self.index;
    }

    fn read(packet: &[u8]) -> Result<Self, CodecError> {
        let bytes = header_bytes(packet, FRAGMENT_HEADER_LEN)?;
        Ok(Self {
            sequence: bytes[1],
            index: bytes[2],
        })
    }
}

/// One received radio packet, split into header and payload.
#[derive(Debug, PartialEq, Eq)]
pub enum DecodedPacket<'p> {
    Single {
        header: PacketHeader,
        payload: &'p [u8],
    },
    FirstOfMany {
        header: MultiFragmentHeader,
        payload: &'p [u8],
    },
    Fragment {
        header: FragmentHeader,
        payload: &'p [u8],
    },
}

impl<'p> DecodedPacket<'p> {
    /// Payload bytes carried by the packet.
    pub fn payload(&self) -> &'p [u8] {
        match self {
            DecodedPacket::Single { payload, .. }
            | DecodedPacket::FirstOfMany { payload, .. }
            | DecodedPacket::Fragment { payload, .. } => payload,
        }
    }

    /// Session sequence number (low byte) stamped in the header.
    pub fn sequence(&self) -> u8 {
        match self {
            DecodedPacket::Single { header, .. } => header.sequence,
            DecodedPacket::FirstOfMany { header, .. } => header.sequence,
            DecodedPacket::Fragment { header, .. } => header.sequence,
        }
    }
}

//==================================================================================Codec
/// Stateless reference codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct LongFiCodec;

impl LongFiCodec {
    pub const fn new() -> Self {
        Self
    }

    /// Number of wire bytes `payload_len` encodes to, or `None` when the payload
    /// needs more than [`MAX_FRAGMENTS`] packets.
    pub fn encoded_len(payload_len: usize, sizing: FragmentSizing) -> Option<usize> {
        if payload_len <= sizing.single_fragment_payload() {
            return Some(SINGLE_HEADER_LEN + payload_len);
        }
        let count = Self::fragment_count(payload_len, sizing)?;
        Some(MULTI_HEADER_LEN + (count - 1) * FRAGMENT_HEADER_LEN + payload_len)
    }

    /// Radio packets needed for a payload that does not fit a single packet.
    fn fragment_count(payload_len: usize, sizing: FragmentSizing) -> Option<usize> {
        let first = sizing.first_of_many_payload();
        let per_fragment = sizing.subsequent_payload();
        if first == 0 || per_fragment == 0 {
            return None;
        }
        let rest = payload_len.saturating_sub(first);
        let count = 1 + rest.div_ceil(per_fragment);
        (count <= MAX_FRAGMENTS).then_some(count)
    }

    /// Split one radio packet into its header and payload.
    pub fn decode(packet: &[u8]) -> Result<DecodedPacket<'_>, CodecError> {
        let tag = *packet.first().ok_or(CodecError::TruncatedPacket {
            needed: 1,
            available: 0,
        })?;

        match tag {
            TAG_SINGLE => Ok(DecodedPacket::Single {
                header: PacketHeader::read(packet)?,
                payload: &packet[SINGLE_HEADER_LEN..],
            }),
            TAG_FIRST_OF_MANY => Ok(DecodedPacket::FirstOfMany {
                header: MultiFragmentHeader::read(packet)?,
                payload: &packet[MULTI_HEADER_LEN..],
            }),
            TAG_FRAGMENT => Ok(DecodedPacket::Fragment {
                header: FragmentHeader::read(packet)?,
                payload: &packet[FRAGMENT_HEADER_LEN..],
            }),
            tag => Err(CodecError::InvalidHeader { tag }),
        }
    }
}

impl LinkFrameCodec for LongFiCodec {
    fn encode(
        &mut self,
        frame: &FrameContext<'_>,
        payload: &[u8],
        out: &mut [u8],
    ) -> Result<usize, CodecError> {
        let sizing = frame.sizing;
        let session = frame.session;
        // Only the low byte of the session counter travels on air.
        let sequence = frame.sequence as u8;

        // Payload fits one radio packet.
        if payload.len() <= sizing.single_fragment_payload() {
            let total = SINGLE_HEADER_LEN + payload.len();
            let dst = out.get_mut(..total).ok_or(CodecError::BufferTooSmall)?;
            PacketHeader {
                oui: session.oui,
                device_id: session.device_id,
                sequence,
            }
            .write(&mut dst[..SINGLE_HEADER_LEN]);
            dst[SINGLE_HEADER_LEN..].copy_from_slice(payload);
            return Ok(total);
        }

        let count = Self::fragment_count(payload.len(), sizing).ok_or_else(|| {
            if sizing.subsequent_payload() == 0 {
                CodecError::PayloadTooLarge { len: payload.len() }
            } else {
                CodecError::TooManyFragments {
                    count: 1 + payload.len().div_ceil(sizing.subsequent_payload()),
                }
            }
        })?;
        let total = MULTI_HEADER_LEN + (count - 1) * FRAGMENT_HEADER_LEN + payload.len();
        let dst = out.get_mut(..total).ok_or(CodecError::BufferTooSmall)?;

        // First packet: identity header + fragment count.
        let first = sizing.first_of_many_payload();
        MultiFragmentHeader {
            oui: session.oui,
            device_id: session.device_id,
            sequence,
            fragment_count: count as u8,
        }
        .write(&mut dst[..MULTI_HEADER_LEN]);
        dst[MULTI_HEADER_LEN..MULTI_HEADER_LEN + first].copy_from_slice(&payload[..first]);

        // Continuation packets: short header + up to `subsequent_payload` bytes.
        let mut cursor = MULTI_HEADER_LEN + first;
        for (index, chunk) in payload[first..]
            .chunks(sizing.subsequent_payload())
            .enumerate()
        {
            FragmentHeader {
                sequence,
                index: (index + 1) as u8,
            }
            .write(&mut dst[cursor..cursor + FRAGMENT_HEADER_LEN]);
            cursor += FRAGMENT_HEADER_LEN;
            dst[cursor..cursor + chunk.len()].copy_from_slice(chunk);
            cursor += chunk.len();
        }

        Ok(cursor)
    }
}

//==================================================================================Helpers
fn header_bytes(packet: &[u8], len: usize) -> Result<&[u8], CodecError> {
    packet.get(..len).ok_or(CodecError::TruncatedPacket {
        needed: len,
        available: packet.len(),
    })
}

fn write_identity(out: &mut [u8], oui: u32, device_id: u16, sequence: u8) {
    out[0..4].copy_from_slice(&oui.to_le_bytes());
    out[4..6].copy_from_slice(&device_id.to_le_bytes());
    out[6] = sequence;
}

fn read_identity(bytes: &[u8]) -> (u32, u16, u8) {
    let oui = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let device_id = u16::from_le_bytes([bytes[4], bytes[5]]);
    (oui, device_id, bytes[6])
}
