//! Cargo build script: generates the regional channel plans.

// Re-export the core module from src/core.rs so build_core can reuse it
#[path = "src/core.rs"]
mod core;

mod build_core;
use crate::build_core::{
    conf::*, domain::PlanManifest, errors::BuildError, gen_plans::run_plans_gen,
};

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

// Channel plans (uplink frequencies and per-spreading-factor packet capacities)
// are declared in JSON and turned into `ChannelPlan` constants. The header
// lengths from `src/core.rs` are used to reject plans whose packets could not
// carry a single byte of payload once the largest header is written.

//==================================================================================MAIN
fn main() -> Result<(), BuildError> {
    // Tell Cargo to rerun this script whenever one of these files changes.
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/core.rs");
    println!("cargo:rerun-if-changed={}", CHANNEL_PLANS_PATH);
    println!("cargo:rerun-if-env-changed={}", CHANNEL_PLANS_ENV);

    // 1. Locate the plan manifest.
    // Priority order:
    //   1. KORRI_LONGFI_CHANNEL_PLANS environment variable
    //   2. Default manifest shipped with the crate
    let default_plans_path =
        PathBuf::from_str(CHANNEL_PLANS_PATH).map_err(|_| BuildError::ReadPath {
            path: CHANNEL_PLANS_PATH,
        })?;

    let user_plans_path = std::env::var(CHANNEL_PLANS_ENV).ok().map(PathBuf::from);

    let plans_path = match user_plans_path {
        Some(path) if path.exists() => {
            println!("cargo:warning=Using custom channel plans from {:?}", path);
            println!("cargo:rerun-if-changed={}", path.display());
            path
        }
        Some(path) => {
            println!(
                "cargo:warning=Custom channel plan path specified but file not found: {:?}",
                path
            );
            println!("cargo:warning=Falling back to the default channel plans");
            default_plans_path
        }
        None => default_plans_path,
    };

    // 2. Parse and validate.
    let plans_string = fs::read_to_string(&plans_path).map_err(|e| BuildError::ReadFile {
        path: plans_path.to_path_buf(),
        source: e,
    })?;
    let manifest: PlanManifest = serde_json::from_str(&plans_string)?;

    // 3. Generate the constants.
    let buffer_plan_code = run_plans_gen(&manifest)?;

    // 4. Write the generated code into `OUT_DIR`.
    // `src/protocol/plans/mod.rs` pulls it in with `include!`.
    let out_dir_str = std::env::var("OUT_DIR").map_err(|e| BuildError::OutDirErr { source: e })?;
    let plan_file_path = PathBuf::from(out_dir_str).join(OUT_DIR_PLAN_FILE_NAME);

    fs::write(&plan_file_path, &buffer_plan_code).map_err(|e| BuildError::WriteFile {
        path: plan_file_path,
        source: e,
    })?;

    Ok(())
}
