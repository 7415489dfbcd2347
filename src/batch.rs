//! Batch orchestrator: walks the gas × altitude-slab cross product and
//! fills the store, skipping any slab a previous run already covered.
//!
//! Resumability falls out of the existence checks: killing a run part-way
//! loses at most the slab in flight, and the next run picks up from the
//! store contents. There is no separate completion marker: a store is
//! complete exactly when every pair has rows.

use std::fmt;

use log::{debug, info, warn};

use crate::atmosphere;
use crate::constants::{ALTITUDE_CEILING_M, ALTITUDE_FLOOR_M, SLAB_THICKNESS_M};
use crate::depth::optical_depth;
use crate::gases::GASES;
use crate::quiet::suppress_stdout;
use crate::spectra::{Environment, LineShapeProvider, SpectraError};
use crate::store::{DepthStore, SampleOutcome, StoreError};

/// Altitude grid the batch walks, as slab midpoints.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Lowest slab midpoint (m)
    pub altitude_floor_m: f64,
    /// Highest slab midpoint (m)
    pub altitude_ceiling_m: f64,
    /// Slab thickness and midpoint spacing (m)
    pub slab_thickness_m: f64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            altitude_floor_m: ALTITUDE_FLOOR_M,
            altitude_ceiling_m: ALTITUDE_CEILING_M,
            slab_thickness_m: SLAB_THICKNESS_M,
        }
    }
}

impl BatchConfig {
    /// Midpoints of every slab in the grid, ascending.
    pub fn slab_midpoints(&self) -> Vec<f64> {
        let mut midpoints = Vec::new();
        let mut altitude = self.altitude_floor_m;
        while altitude <= self.altitude_ceiling_m {
            midpoints.push(altitude);
            altitude += self.slab_thickness_m;
        }
        midpoints
    }
}

/// Statistics from one population run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Gas/altitude pairs whose spectra were computed this run
    pub slabs_computed: usize,
    /// Gas/altitude pairs skipped because samples already existed
    pub slabs_skipped: usize,
    /// Sample rows written
    pub samples_inserted: usize,
    /// Sample inserts that found the row already present (colliding grid
    /// points across invocations)
    pub samples_already_present: usize,
    /// Samples abandoned after an unexplainable conflict
    pub samples_lost: usize,
}

impl fmt::Display for BatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Computed {} slabs ({} skipped as already present), wrote {} samples ({} duplicates, {} lost)",
            self.slabs_computed,
            self.slabs_skipped,
            self.samples_inserted,
            self.samples_already_present,
            self.samples_lost
        )
    }
}

/// Errors that abort a population run.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// The store rejected an operation for a reason other than a recovered
    /// uniqueness conflict
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// The line-shape provider failed to deliver data
    #[error("Line-shape provider error: {0}")]
    SpectraError(#[from] SpectraError),
}

/// Populates `store` with optical depths for every registry gas over every
/// slab of `config`'s grid. Safe to re-run: pairs with existing samples are
/// skipped wholesale, and per-row conflicts are absorbed.
pub fn populate<P: LineShapeProvider>(
    store: &DepthStore,
    provider: &mut P,
    config: &BatchConfig,
) -> Result<BatchStats, BatchError> {
    // One-time setup: line data first (it can take a while and may fail),
    // then schema and registry seeding, all idempotent.
    for gas in &GASES {
        suppress_stdout(|| provider.ensure_line_data(gas))?;
    }
    store.ensure_schema()?;
    for gas in &GASES {
        store.insert_gas(gas)?;
    }

    let midpoints = config.slab_midpoints();
    let half_slab = config.slab_thickness_m / 2.0;
    let surface_pressure = atmosphere::pressure(0.0);
    let mut stats = BatchStats::default();

    for gas in &GASES {
        info!("Populating {} over {} slabs", gas.name, midpoints.len());
        for &altitude in &midpoints {
            if store.has_samples(gas.mol_id, altitude)? {
                debug!("{} at {altitude} m already present, skipping", gas.name);
                stats.slabs_skipped += 1;
                continue;
            }

            let env = Environment {
                temperature: atmosphere::temperature(altitude),
                pressure_ratio: atmosphere::pressure(altitude) / surface_pressure,
            };
            let spectrum = suppress_stdout(|| provider.absorption_spectrum(gas, &env))?;
            let depths = optical_depth(
                altitude - half_slab,
                altitude + half_slab,
                gas.ppm,
                &spectrum.coefficients,
            );

            for (&wave_no, &tau) in spectrum.wavenumbers.iter().zip(depths.iter()) {
                match store.insert_sample(gas.mol_id, altitude, wave_no, tau)? {
                    SampleOutcome::Inserted => stats.samples_inserted += 1,
                    SampleOutcome::AlreadyPresent => stats.samples_already_present += 1,
                    SampleOutcome::Lost => {
                        warn!(
                            "Failed to add sample: molecule {} altitude {altitude} m wavenumber {wave_no} cm^-1",
                            gas.name
                        );
                        stats.samples_lost += 1;
                    }
                }
            }
            stats.slabs_computed += 1;
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_has_thirty_slabs() {
        let midpoints = BatchConfig::default().slab_midpoints();
        assert_eq!(midpoints.len(), 30);
        assert_eq!(midpoints[0], 500.0);
        assert_eq!(*midpoints.last().unwrap(), 29_500.0);
    }

    #[test]
    fn stats_display_is_readable() {
        let stats = BatchStats {
            slabs_computed: 3,
            slabs_skipped: 1,
            samples_inserted: 300,
            samples_already_present: 2,
            samples_lost: 0,
        };
        let text = stats.to_string();
        assert!(text.contains("3 slabs"));
        assert!(text.contains("300 samples"));
    }
}
