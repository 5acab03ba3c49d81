//! Validate channel plans and emit them as `ChannelPlan` constants.
use super::conf::{MAX_LORA_PACKET, SPREADING_FACTOR_RANGE};
use super::domain::*;
use super::errors::*;
use super::name_helpers::to_const_ident;
use crate::core::LARGEST_HEADER_LEN;

use std::collections::HashSet;
use std::fmt::Write;

/// Validate every plan of the manifest and return the generated Rust source.
pub(crate) fn run_plans_gen(manifest: &PlanManifest) -> Result<String, BuildError> {
    let mut buffer = String::new();
    let mut idents = Vec::with_capacity(manifest.plans.len());
    let mut seen = HashSet::new();

    writeln!(
        buffer,
        "// Generated by build.rs from channel_plans.json. Do not edit."
    )?;
    writeln!(buffer)?;

    for plan in &manifest.plans {
        let fallback_row = validate_plan(plan)?;
        let ident = to_const_ident(&plan.name);
        if !seen.insert(ident.clone()) {
            return Err(BuildError::DuplicatePlan {
                plan: plan.name.clone(),
            });
        }
        generate_plan_code(&mut buffer, &ident, plan, fallback_row)?;
        idents.push((plan.name.as_str(), ident));
    }

    let default_ident = idents
        .iter()
        .find(|(name, _)| *name == manifest.default_plan)
        .map(|(_, ident)| ident.as_str())
        .ok_or_else(|| BuildError::UnknownDefaultPlan {
            plan: manifest.default_plan.clone(),
        })?;

    writeln!(
        buffer,
        "/// Plan used when a handle is not given one explicitly."
    )?;
    writeln!(
        buffer,
        "pub const DEFAULT_PLAN: &ChannelPlan = &{};",
        default_ident
    )?;
    writeln!(buffer)?;
    writeln!(buffer, "/// Every generated plan, in manifest order.")?;
    write!(buffer, "pub const ALL_PLANS: &[&ChannelPlan] = &[")?;
    for (index, (_, ident)) in idents.iter().enumerate() {
        if index > 0 {
            write!(buffer, ", ")?;
        }
        write!(buffer, "&{}", ident)?;
    }
    writeln!(buffer, "];")?;

    Ok(buffer)
}

/// Check a plan against the radio and header constraints; returns the fallback row.
fn validate_plan(plan: &PlanDef) -> Result<usize, BuildError> {
    if plan.uplink_channels_hz.is_empty() {
        return Err(BuildError::NoUplinkChannel {
            plan: plan.name.clone(),
        });
    }
    if plan.rows.is_empty() {
        return Err(BuildError::NoSizingRow {
            plan: plan.name.clone(),
        });
    }

    for row in &plan.rows {
        if !SPREADING_FACTOR_RANGE.contains(&row.spreading_factor) {
            return Err(BuildError::InvalidSpreadingFactor {
                plan: plan.name.clone(),
                spreading_factor: row.spreading_factor,
            });
        }
        // Each packet must still carry payload once the largest header is written.
        if row.max_packet_bytes <= LARGEST_HEADER_LEN || row.max_packet_bytes > MAX_LORA_PACKET {
            return Err(BuildError::InvalidPacketCapacity {
                plan: plan.name.clone(),
                spreading_factor: row.spreading_factor,
                bytes: row.max_packet_bytes,
            });
        }
    }

    plan.fallback_row()
        .ok_or_else(|| BuildError::MissingFallbackRow {
            plan: plan.name.clone(),
            spreading_factor: plan.fallback_spreading_factor,
        })
}

/// Emit one `ChannelPlan` constant.
fn generate_plan_code(
    buffer: &mut String,
    ident: &str,
    plan: &PlanDef,
    fallback_row: usize,
) -> Result<(), BuildError> {
    writeln!(
        buffer,
        "/// Channel plan `{}`: {} uplink channels, {} sizing rows.",
        plan.name,
        plan.uplink_channels_hz.len(),
        plan.rows.len()
    )?;
    writeln!(buffer, "pub const {}: ChannelPlan = ChannelPlan {{", ident)?;
    writeln!(buffer, "\tname: {:?},", plan.name)?;
    writeln!(
        buffer,
        "\tuplink_channels: &{:?},",
        plan.uplink_channels_hz
    )?;

    let spreading_factors: Vec<u8> = plan.rows.iter().map(|r| r.spreading_factor).collect();
    let capacities: Vec<usize> = plan.rows.iter().map(|r| r.max_packet_bytes).collect();
    writeln!(buffer, "\tspreading_factors: &{:?},", spreading_factors)?;
    writeln!(buffer, "\tpayload_per_fragment: &{:?},", capacities)?;
    writeln!(buffer, "\tfallback_row: {},", fallback_row)?;
    writeln!(buffer, "\trf_test_frequency: {},", plan.rf_test_frequency_hz)?;
    writeln!(buffer, "}};")?;
    writeln!(buffer)?;

    Ok(())
}
