//! Paths and constants used during build-time code generation.
//==================================================================================CONF
/// Channel plans shipped with the crate.
pub(crate) const CHANNEL_PLANS_PATH: &str = "build_core/var/channel_plans.json";
/// Environment variable pointing at a replacement plan file.
pub(crate) const CHANNEL_PLANS_ENV: &str = "KORRI_LONGFI_CHANNEL_PLANS";
/// Generated plan file name (written to `OUT_DIR`).
pub(crate) const OUT_DIR_PLAN_FILE_NAME: &str = "generated_plans.rs";
/// LoRa spreading factors a plan row may declare.
pub(crate) const SPREADING_FACTOR_RANGE: std::ops::RangeInclusive<u8> = 5..=12;
/// Largest payload a LoRa packet can carry.
pub(crate) const MAX_LORA_PACKET: usize = 255;
