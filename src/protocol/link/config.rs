//! Session configuration supplied when a handle is created.
use crate::protocol::transport::traits::lora_radio::RadioConfig;

/// Identity of the device on the network and the radio settings it transmits with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LongFiConfig {
    /// Organizationally unique identifier of the device owner.
    pub oui: u32,
    /// Device identifier within the organization.
    pub device_id: u16,
    pub radio: RadioConfig,
}

impl LongFiConfig {
    /// Configuration with the default radio settings.
    pub fn new(oui: u32, device_id: u16) -> Self {
        Self {
            oui,
            device_id,
            radio: RadioConfig::default(),
        }
    }

    pub fn with_radio(mut self, radio: RadioConfig) -> Self {
        self.radio = radio;
        self
    }
}
