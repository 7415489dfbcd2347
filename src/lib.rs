//! # taugen
//!
//! Precomputes greenhouse-gas optical depths over a layered model
//! atmosphere and persists them in a SQLite store for downstream
//! radiative-transfer work.
//!
//! The pipeline is deliberately simple: for each registry gas and each
//! 1 km altitude slab, compute an absorption spectrum from HITRAN line
//! data, integrate the gas column density across the slab, and write one
//! `(mol_id, altitude, wave_no) -> optical depth` row per grid point.
//! Every step is idempotent, so an interrupted run can be re-launched
//! and resumes where it stopped.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use taugen::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut provider = HitranProvider::new(HitranProviderConfig::default());
//!     let store = DepthStore::open("optical_depth.db")?;
//!     let stats = populate(&store, &mut provider, &BatchConfig::default())?;
//!     println!("{stats}");
//!     Ok(())
//! }
//! ```
//!
//! ## Layout
//!
//! - [`atmosphere`] — layered standard-atmosphere profiles
//! - [`spectra`] — HITRAN line data and Voigt absorption spectra
//! - [`depth`] — column densities and slab optical depths
//! - [`store`] — the SQLite sample store
//! - [`batch`] — the resumable population loop
//! - [`metadata`] — the JSON run manifest written next to the store

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod atmosphere;
pub mod batch;
pub mod constants;
pub mod depth;
pub mod gases;
pub mod metadata;
pub mod quiet;
pub mod spectra;
pub mod store;

/// Convenient re-exports for typical use.
pub mod prelude {
    pub use crate::batch::{populate, BatchConfig, BatchError, BatchStats};
    pub use crate::constants::{DEFAULT_LINE_DB_DIR, DEFAULT_STORE_PATH};
    pub use crate::gases::{Gas, GASES};
    pub use crate::metadata::{RunManifest, MANIFEST_FILE_NAME};
    pub use crate::spectra::{
        AbsorptionSpectrum, Environment, HitranProvider, HitranProviderConfig, LineShapeProvider,
    };
    pub use crate::store::{DepthStore, SampleOutcome};
}
