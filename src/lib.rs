//! `korri-longfi` library: the LongFi link-layer control core for LoRa radios
//! in a `no_std` environment. The crate exposes the infrastructure modules
//! (frame codec boundary and reference codec), protocol logic (link handle,
//! event translation, fragmentation, channel plans), and the radio traits a
//! board support package implements.
#![no_std]
//==================================================================================
/// Core data types shared by the build script and the link core.
pub mod core;
/// Domain and low-level errors (link misuse, frame encoding, radio failures).
pub mod error;
/// Frame codec boundary and the reference LongFi codec.
pub mod infra;
/// LongFi protocol implementation: link handle, shared state, channel plans,
/// and radio transport.
pub mod protocol;
//==================================================================================
