//! Run-manifest sidecar.
//!
//! Every population run writes a small JSON manifest next to the store
//! recording the grid, the gas registry, and the generator version. The
//! manifest is advisory: the store itself is the source of truth, and a
//! missing manifest never blocks a run.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::batch::BatchConfig;
use crate::constants::{MAX_WAVENUMBER, MIN_WAVENUMBER, STORE_FORMAT_VERSION};
use crate::gases::GASES;

/// File name of the manifest written next to the store.
pub const MANIFEST_FILE_NAME: &str = "optical_depth.manifest.json";

/// Errors reading or writing a manifest.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Filesystem error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed manifest JSON
    #[error("JSON error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

/// One registry gas as recorded in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GasEntry {
    /// Gas name, e.g. "CO2"
    pub name: String,
    /// Store-local molecule id
    pub mol_id: i64,
    /// Mixing ratio used for the run (ppm)
    pub ppm: f64,
}

/// Sidecar manifest describing one population run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    /// Store schema version
    pub format_version: String,
    /// Name of the generating tool
    pub generator: String,
    /// Version of the generating tool
    pub generator_version: String,
    /// UTC timestamp of manifest creation
    pub created: DateTime<Utc>,
    /// Gas registry at the time of the run
    pub gases: Vec<GasEntry>,
    /// Lowest slab midpoint (m)
    pub altitude_floor_m: f64,
    /// Highest slab midpoint (m)
    pub altitude_ceiling_m: f64,
    /// Slab thickness (m)
    pub slab_thickness_m: f64,
    /// Lower wavenumber bound (cm^-1)
    pub min_wavenumber: f64,
    /// Upper wavenumber bound (cm^-1)
    pub max_wavenumber: f64,
}

impl RunManifest {
    /// Builds a manifest describing a run over `config`'s grid with the
    /// built-in gas registry.
    pub fn new(config: &BatchConfig) -> Self {
        Self {
            format_version: STORE_FORMAT_VERSION.to_string(),
            generator: env!("CARGO_PKG_NAME").to_string(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            created: Utc::now(),
            gases: GASES
                .iter()
                .map(|g| GasEntry {
                    name: g.name.to_string(),
                    mol_id: g.mol_id,
                    ppm: g.ppm,
                })
                .collect(),
            altitude_floor_m: config.altitude_floor_m,
            altitude_ceiling_m: config.altitude_ceiling_m,
            slab_thickness_m: config.slab_thickness_m,
            min_wavenumber: MIN_WAVENUMBER,
            max_wavenumber: MAX_WAVENUMBER,
        }
    }

    /// Writes the manifest as pretty-printed JSON.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), MetadataError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reads a manifest back from disk.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, MetadataError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
