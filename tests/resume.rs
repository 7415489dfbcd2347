//! Resuming after a partial run: slabs already present in the store must
//! not trigger fresh line-shape computations.

use std::cell::Cell;

use taugen::gases::Gas;
use taugen::prelude::*;
use taugen::spectra::SpectraError;
use tempfile::tempdir;

/// Provider that counts how many spectra it was asked for.
struct CountingProvider {
    spectra_requested: Cell<usize>,
}

impl CountingProvider {
    fn new() -> Self {
        Self {
            spectra_requested: Cell::new(0),
        }
    }
}

impl LineShapeProvider for CountingProvider {
    fn ensure_line_data(&mut self, _gas: &Gas) -> Result<(), SpectraError> {
        Ok(())
    }

    fn absorption_spectrum(
        &self,
        _gas: &Gas,
        _env: &Environment,
    ) -> Result<AbsorptionSpectrum, SpectraError> {
        self.spectra_requested.set(self.spectra_requested.get() + 1);
        Ok(AbsorptionSpectrum {
            wavenumbers: vec![200.0, 200.01],
            coefficients: vec![3e-23, 4e-23],
        })
    }
}

#[test]
fn preexisting_slabs_are_not_recomputed() {
    let dir = tempdir().unwrap();
    let store = DepthStore::open(dir.path().join("optical_depth.db")).unwrap();
    let config = BatchConfig {
        altitude_floor_m: 500.0,
        altitude_ceiling_m: 1_500.0,
        slab_thickness_m: 1_000.0,
    };

    // Simulate a run that died after finishing CO2 at 500 m.
    store.ensure_schema().unwrap();
    let co2 = Gas::by_name("CO2").unwrap();
    store.insert_gas(co2).unwrap();
    store.insert_sample(co2.mol_id, 500.0, 200.0, 1e-3).unwrap();
    store
        .insert_sample(co2.mol_id, 500.0, 200.01, 2e-3)
        .unwrap();

    let mut provider = CountingProvider::new();
    let stats = populate(&store, &mut provider, &config).unwrap();

    // 4 gases x 2 slabs, minus the one pair already on disk.
    assert_eq!(stats.slabs_skipped, 1);
    assert_eq!(stats.slabs_computed, 7);
    assert_eq!(provider.spectra_requested.get(), 7);

    // The pre-crash rows survive untouched.
    assert_eq!(store.sample(co2.mol_id, 500.0, 200.0).unwrap(), Some(1e-3));
    assert_eq!(
        store.sample(co2.mol_id, 500.0, 200.01).unwrap(),
        Some(2e-3)
    );
}

#[test]
fn interleaved_runs_share_a_registry() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("optical_depth.db");
    let config = BatchConfig {
        altitude_floor_m: 500.0,
        altitude_ceiling_m: 500.0,
        slab_thickness_m: 1_000.0,
    };

    {
        let store = DepthStore::open(&path).unwrap();
        populate(&store, &mut CountingProvider::new(), &config).unwrap();
    }

    // A second process opening the same file sees the registry and skips.
    let store = DepthStore::open(&path).unwrap();
    let stats = populate(&store, &mut CountingProvider::new(), &config).unwrap();
    assert_eq!(stats.slabs_skipped, 4);
    assert_eq!(store.gas_count().unwrap(), 4);
}
