//! Link-frame codec: the contract the link core encodes through, plus the
//! reference LongFi frame layout.
pub mod frame;
pub mod traits;
