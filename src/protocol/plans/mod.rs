//! Dynamically generated module built from the channel plan manifest.
//! `generated_plans.rs` is produced at build time and exposes one constant per
//! regional plan, plus `DEFAULT_PLAN` and `ALL_PLANS`.
use crate::core::ChannelPlan;

include!(concat!(env!("OUT_DIR"), "/generated_plans.rs"));

/// Look up a generated plan by name (case-sensitive, as written in the manifest).
pub fn by_name(name: &str) -> Option<&'static ChannelPlan> {
    ALL_PLANS.iter().copied().find(|plan| plan.name == name)
}
