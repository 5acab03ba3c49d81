//! Infrastructure shared by the protocol layer: the link-frame codec boundary.
pub mod codec;
