use serde::Deserialize;

//==================================================================================MANIFEST
// Structures to deserialize `channel_plans.json`.
#[derive(Debug, Deserialize)]
/// Every plan to generate plus the one exported as `DEFAULT_PLAN`.
pub(crate) struct PlanManifest {
    pub(crate) plans: Vec<PlanDef>,
    #[serde(rename = "default")]
    pub(crate) default_plan: String,
}

#[derive(Debug, Deserialize)]
/// One regional plan.
pub(crate) struct PlanDef {
    pub(crate) name: String,
    pub(crate) uplink_channels_hz: Vec<u32>,
    pub(crate) rf_test_frequency_hz: u32,
    pub(crate) fallback_spreading_factor: u8,
    pub(crate) rows: Vec<SizingRow>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
/// Packet capacity for one spreading factor.
pub(crate) struct SizingRow {
    pub(crate) spreading_factor: u8,
    pub(crate) max_packet_bytes: usize,
}

impl PlanDef {
    /// Row index of the fallback spreading factor, if the plan declares it.
    pub(crate) fn fallback_row(&self) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.spreading_factor == self.fallback_spreading_factor)
    }
}
