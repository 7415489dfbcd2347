use super::*;
use crate::gases::Gas;
use tempfile::tempdir;

fn open_with_schema(dir: &tempfile::TempDir) -> DepthStore {
    let store = DepthStore::open(dir.path().join("optical_depth.db")).unwrap();
    store.ensure_schema().unwrap();
    store
}

#[test]
fn ensure_schema_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = open_with_schema(&dir);
    store.ensure_schema().unwrap();
    assert_eq!(store.gas_count().unwrap(), 0);
    assert_eq!(store.sample_count().unwrap(), 0);
}

#[test]
fn reinserting_a_gas_keeps_one_row() {
    let dir = tempdir().unwrap();
    let store = open_with_schema(&dir);
    let co2 = Gas::by_name("CO2").unwrap();

    store.insert_gas(co2).unwrap();
    // Identical re-insert must not raise past the caller
    store.insert_gas(co2).unwrap();

    assert_eq!(store.gas_count().unwrap(), 1);
}

#[test]
fn duplicate_sample_keeps_first_value() {
    let dir = tempdir().unwrap();
    let store = open_with_schema(&dir);
    store.insert_gas(Gas::by_name("CO2").unwrap()).unwrap();

    assert_eq!(
        store.insert_sample(2, 500.0, 1000.0, 0.002).unwrap(),
        SampleOutcome::Inserted
    );
    assert_eq!(
        store.insert_sample(2, 500.0, 1000.0, 0.999).unwrap(),
        SampleOutcome::AlreadyPresent
    );

    assert_eq!(store.sample_count().unwrap(), 1);
    assert_eq!(store.sample(2, 500.0, 1000.0).unwrap(), Some(0.002));
}

#[test]
fn samples_with_distinct_keys_all_land() {
    let dir = tempdir().unwrap();
    let store = open_with_schema(&dir);
    store.insert_gas(Gas::by_name("CH4").unwrap()).unwrap();

    for (alt, nu) in [(500.0, 10.0), (500.0, 10.01), (1500.0, 10.0)] {
        assert_eq!(
            store.insert_sample(6, alt, nu, 1e-4).unwrap(),
            SampleOutcome::Inserted
        );
    }
    assert_eq!(store.sample_count().unwrap(), 3);
}

#[test]
fn has_samples_tracks_gas_altitude_pairs() {
    let dir = tempdir().unwrap();
    let store = open_with_schema(&dir);
    store.insert_gas(Gas::by_name("N2O").unwrap()).unwrap();

    assert!(!store.has_samples(4, 500.0).unwrap());
    store.insert_sample(4, 500.0, 1200.5, 3e-5).unwrap();
    assert!(store.has_samples(4, 500.0).unwrap());
    assert!(!store.has_samples(4, 1500.0).unwrap());
    assert!(!store.has_samples(1, 500.0).unwrap());
}

#[test]
fn orphan_counting() {
    let dir = tempdir().unwrap();
    let store = open_with_schema(&dir);
    store.insert_gas(Gas::by_name("H2O").unwrap()).unwrap();

    store.insert_sample(1, 500.0, 3.0, 1e-6).unwrap();
    assert_eq!(store.orphan_sample_count().unwrap(), 0);

    // mol_id 99 has no gases row
    store.insert_sample(99, 500.0, 3.0, 1e-6).unwrap();
    assert_eq!(store.orphan_sample_count().unwrap(), 1);
}

#[test]
fn only_key_collisions_count_as_unique_violations() {
    let dir = tempdir().unwrap();
    let store = open_with_schema(&dir);

    // NOT NULL failure is a constraint violation but not a key collision
    let not_null = store
        .conn
        .execute(
            "INSERT INTO gases (mol_id, mol_name, mol_ppm) VALUES (1, NULL, 1.0)",
            [],
        )
        .unwrap_err();
    assert!(!is_unique_violation(&not_null));

    store.insert_gas(Gas::by_name("CO2").unwrap()).unwrap();
    let duplicate = store
        .conn
        .execute(
            "INSERT INTO gases (mol_id, mol_name, mol_ppm) VALUES (2, 'CO2', 411000.0)",
            [],
        )
        .unwrap_err();
    assert!(is_unique_violation(&duplicate));
}

#[test]
fn reopening_preserves_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("optical_depth.db");
    {
        let store = DepthStore::open(&path).unwrap();
        store.ensure_schema().unwrap();
        store.insert_gas(Gas::by_name("CO2").unwrap()).unwrap();
        store.insert_sample(2, 500.0, 667.38, 0.12).unwrap();
    }
    let store = DepthStore::open(&path).unwrap();
    store.ensure_schema().unwrap();
    assert_eq!(store.sample(2, 500.0, 667.38).unwrap(), Some(0.12));
    assert!(store.has_samples(2, 500.0).unwrap());
}

#[test]
fn open_fails_fast_on_unusable_path() {
    let dir = tempdir().unwrap();
    let bogus = dir.path().join("missing-directory").join("store.db");
    assert!(DepthStore::open(&bogus).is_err());
}
