//! High-level components of the LongFi link: session control, generated
//! channel plans, and the radio transport (fragment sizing, radio traits).
pub mod link;
pub mod plans;
pub mod transport;
