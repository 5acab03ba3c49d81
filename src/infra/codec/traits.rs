//! Public traits and session types exposed by the codec boundary. They decouple
//! the link core from the byte layout of frames and from the way frames are
//! authenticated.
use crate::error::CodecError;
use crate::protocol::transport::fragmentation::FragmentSizing;

/// Length of the preshared authentication key.
pub const KEY_LEN: usize = 16;

/// Message authentication hook: computes a tag over the encoded bytes.
pub type GetMacFn = fn(data: &[u8]) -> u32;

//==================================================================================AUTH
/// How frames of a session are authenticated.
#[derive(Clone, Copy)]
pub enum AuthCallbacks {
    /// 16-byte key shared with the network.
    PresharedKey([u8; KEY_LEN]),
    /// Tag computed by an external component (secure element, HSM…).
    GetMac(GetMacFn),
}

impl core::fmt::Debug for AuthCallbacks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AuthCallbacks::PresharedKey(_) => f.write_str("PresharedKey(..)"),
            AuthCallbacks::GetMac(_) => f.write_str("GetMac(..)"),
        }
    }
}

//==================================================================================SESSION
/// Session metadata handed to the codec with every frame. Immutable for the
/// lifetime of a handle.
#[derive(Clone, Copy)]
pub struct SessionConfig {
    /// Organizationally unique identifier of the device owner.
    pub oui: u32,
    /// Device identifier within the organization.
    pub device_id: u16,
    /// Preshared key; zeroed when authentication goes through [`GetMacFn`].
    pub key: [u8; KEY_LEN],
    /// Number of meaningful bytes in `key`.
    pub key_len: usize,
    /// External tag provider, if any.
    pub get_mac: Option<GetMacFn>,
}

impl SessionConfig {
    /// Build the session view of an organization/device pair and its auth set.
    pub fn new(oui: u32, device_id: u16, auth: AuthCallbacks) -> Self {
        match auth {
            AuthCallbacks::PresharedKey(key) => Self {
                oui,
                device_id,
                key,
                key_len: KEY_LEN,
                get_mac: None,
            },
            AuthCallbacks::GetMac(get_mac) => Self {
                oui,
                device_id,
                key: [0; KEY_LEN],
                key_len: 0,
                get_mac: Some(get_mac),
            },
        }
    }

    /// Meaningful key bytes.
    pub fn key(&self) -> &[u8] {
        &self.key[..self.key_len.min(KEY_LEN)]
    }
}

impl core::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("oui", &self.oui)
            .field("device_id", &self.device_id)
            .field("key_len", &self.key_len)
            .field("get_mac", &self.get_mac.is_some())
            .finish()
    }
}

//==================================================================================CODEC
/// Everything the codec needs to lay out one outbound frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Session the frame belongs to.
    pub session: &'a SessionConfig,
    /// Session sequence number of this frame.
    pub sequence: u32,
    /// Space budget of the active spreading factor.
    pub sizing: FragmentSizing,
}

/// Converts a raw payload into the wire bytes the link core slices into
/// radio packets.
///
/// The core cuts the produced bytes every `sizing.packet_capacity()` bytes, so
/// an implementation that fragments must place its headers on those
/// boundaries.
pub trait LinkFrameCodec {
    /// Encode `payload` into `out` and return the number of bytes written.
    ///
    /// Returns [`CodecError::PayloadTooLarge`], [`CodecError::TooManyFragments`]
    /// or [`CodecError::BufferTooSmall`] when the payload cannot be encoded.
    fn encode(
        &mut self,
        frame: &FrameContext<'_>,
        payload: &[u8],
        out: &mut [u8],
    ) -> Result<usize, CodecError>;
}
