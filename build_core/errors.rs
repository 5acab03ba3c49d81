//! Error set that can occur while generating code during the build step.
use std::env::VarError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the build script (JSON parsing, plan validation, etc.).
pub(crate) enum BuildError {
    /// Failed to read the `OUT_DIR` environment variable.
    #[error("[MESSAGE]:OUT_DIR error. [ERROR]:{source}")]
    OutDirErr {
        #[source]
        source: VarError,
    },

    /// Failure while parsing the plan manifest.
    #[error("[MESSAGE]:Invalid JSON format [Error]:{0:?}")]
    ParseJson(#[from] serde_json::Error),

    /// Unable to read a file from disk.
    #[error("[MESSAGE]:Failed to read file [PATH]:{path} [ERROR]:{source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Provided path is invalid or missing.
    #[error("[MESSAGE]:Failed to read path. [PATH]:{path}")]
    ReadPath { path: &'static str },

    /// Failed to write the generated code to disk.
    #[error("[MESSAGE]:Failed to write file [PATH]:{path} [ERROR]:{source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Formatting error while writing generated code.
    #[error("[MESSAGE]:Failed to display writeln! macro [ERROR]:{source}")]
    WritelnErr {
        #[from]
        source: std::fmt::Error,
    },

    /// A plan declares no uplink channel.
    #[error("[MESSAGE]:No uplink channel [PLAN]:{plan}")]
    NoUplinkChannel { plan: String },

    /// A plan declares no sizing row.
    #[error("[MESSAGE]:No sizing row [PLAN]:{plan}")]
    NoSizingRow { plan: String },

    /// A sizing row names a spreading factor LoRa does not have.
    #[error("[MESSAGE]:Invalid spreading factor [PLAN]:{plan}, [SF]:{spreading_factor}")]
    InvalidSpreadingFactor { plan: String, spreading_factor: u8 },

    /// Packet capacity cannot hold the largest header plus one payload byte,
    /// or exceeds what a LoRa packet can carry.
    #[error("[MESSAGE]:Invalid packet capacity [PLAN]:{plan}, [SF]:{spreading_factor}, [BYTES]:{bytes}")]
    InvalidPacketCapacity {
        plan: String,
        spreading_factor: u8,
        bytes: usize,
    },

    /// The fallback spreading factor has no row.
    #[error("[MESSAGE]:Fallback spreading factor has no row [PLAN]:{plan}, [SF]:{spreading_factor}")]
    MissingFallbackRow { plan: String, spreading_factor: u8 },

    /// Two plans share the same generated identifier.
    #[error("[MESSAGE]:Duplicate plan [PLAN]:{plan}")]
    DuplicatePlan { plan: String },

    /// The manifest default does not name one of its plans.
    #[error("[MESSAGE]:Unknown default plan [PLAN]:{plan}")]
    UnknownDefaultPlan { plan: String },
}
