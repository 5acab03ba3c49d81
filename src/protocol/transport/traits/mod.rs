//! Abstraction traits used by the transport layer (radio peripheral and its
//! interrupt handlers).
pub mod dio_handler;
pub mod lora_radio;
