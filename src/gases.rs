//! Static registry of the tracked greenhouse gases.
//!
//! One immutable record per gas keeps the HITRAN identifiers and the assumed
//! abundance in a single place, so the id and concentration entries can
//! never fall out of step. Adding a gas means adding one record here.

/// One tracked greenhouse gas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gas {
    /// Gas formula, e.g. "CO2"
    pub name: &'static str,
    /// HITRAN molecule number; doubles as the `mol_id` primary key in the
    /// persisted store
    pub mol_id: i64,
    /// HITRAN global isotopologue id of the most abundant isotopologue
    /// (the only one fetched)
    pub global_iso_id: u32,
    /// Molar mass of the main isotopologue (kg / mol), for Doppler widths
    pub molar_mass: f64,
    /// Abundance in ppm, assumed constant with altitude
    pub ppm: f64,
}

/// The supported gas set, in batch-processing order.
pub const GASES: [Gas; 4] = [
    Gas {
        name: "CO2",
        mol_id: 2,
        global_iso_id: 7,
        molar_mass: 43.98983e-3,
        ppm: 411.0 * 1000.0,
    },
    Gas {
        name: "CH4",
        mol_id: 6,
        global_iso_id: 32,
        molar_mass: 16.0313e-3,
        ppm: 1893.0,
    },
    Gas {
        name: "N2O",
        mol_id: 4,
        global_iso_id: 21,
        molar_mass: 44.00106e-3,
        ppm: 327.0,
    },
    Gas {
        name: "H2O",
        mol_id: 1,
        global_iso_id: 1,
        molar_mass: 18.010565e-3,
        ppm: 25.0 * 1e6,
    },
];

impl Gas {
    /// Looks up a gas by formula name.
    pub fn by_name(name: &str) -> Option<&'static Gas> {
        GASES.iter().find(|gas| gas.name == name)
    }

    /// Looks up a gas by HITRAN molecule number.
    pub fn by_mol_id(mol_id: i64) -> Option<&'static Gas> {
        GASES.iter().find(|gas| gas.mol_id == mol_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mol_ids_are_unique() {
        for (i, a) in GASES.iter().enumerate() {
            for b in GASES.iter().skip(i + 1) {
                assert_ne!(a.mol_id, b.mol_id, "{} and {} share an id", a.name, b.name);
            }
        }
    }

    #[test]
    fn lookup_by_name_and_id_agree() {
        let co2 = Gas::by_name("CO2").unwrap();
        assert_eq!(co2.mol_id, 2);
        assert_eq!(co2.ppm, 411_000.0);
        assert_eq!(Gas::by_mol_id(2).unwrap().name, "CO2");
        assert!(Gas::by_name("O3").is_none());
    }

    #[test]
    fn abundances_match_tracked_values() {
        assert_eq!(Gas::by_name("CH4").unwrap().ppm, 1893.0);
        assert_eq!(Gas::by_name("N2O").unwrap().ppm, 327.0);
        assert_eq!(Gas::by_name("H2O").unwrap().ppm, 25_000_000.0);
    }
}
