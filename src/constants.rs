//! Physical constants, unit-conversion factors, and grid defaults shared
//! across the crate.
//!
//! Everything here is a plain `const`: the whole configuration surface of
//! the batch tool is source-level by design.

/// Avogadro constant (molecules / mol), 2019 SI exact value
pub const AVOGADRO: f64 = 6.022_140_76e23;

/// Mean molar mass of dry air (kg / mol)
pub const MEAN_MOLAR_MASS_AIR: f64 = 28.9647e-3;

/// Mass of one "molecule" of dry air (kg / molecule)
pub const MEAN_MOLECULAR_MASS_AIR: f64 = MEAN_MOLAR_MASS_AIR / AVOGADRO;

/// Scaling factor applied to ppm concentrations inside the optical-depth
/// conversion.
///
/// Dimensionally, parts-per-million converts to a fraction via 1e-6; this
/// factor matches the scaling used to produce existing `optical_depth.db`
/// stores and must not change without regenerating them.
pub const PPM_TO_FRACTION: f64 = 1e-9;

/// Converts cm^2 molecular cross sections to m^2
pub const CM2_TO_M2: f64 = 1e-4;

/// Second radiation constant c2 = h*c/k (cm K), used for the temperature
/// scaling of line intensities
pub const C2_CM_K: f64 = 1.438_776_9;

/// Speed of light (m / s)
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e8;

/// Boltzmann constant (J / K)
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// HITRAN reference temperature for line parameters (K)
pub const REFERENCE_TEMPERATURE: f64 = 296.0;

/// Lower bound of the spectral window (cm^-1)
pub const MIN_WAVENUMBER: f64 = 0.0;

/// Upper bound of the spectral window (cm^-1).
///
/// Spectral flux density (W m^-2 m^-1) is negligible beyond this region for
/// terrestrial thermal radiation, so lines above it are never fetched.
pub const MAX_WAVENUMBER: f64 = 4000.0;

/// Altitude of the lowest slab midpoint (m)
pub const ALTITUDE_FLOOR_M: f64 = 500.0;

/// Altitude of the highest slab midpoint (m)
pub const ALTITUDE_CEILING_M: f64 = 29_500.0;

/// Thickness of one atmosphere slab (m)
pub const SLAB_THICKNESS_M: f64 = 1000.0;

/// Version of the persisted store layout, written to the run manifest
pub const STORE_FORMAT_VERSION: &str = "1.0.0";

/// Default path of the SQLite optical-depth store
pub const DEFAULT_STORE_PATH: &str = "optical_depth.db";

/// Default directory holding the downloaded line-by-line tables
pub const DEFAULT_LINE_DB_DIR: &str = "spectral_line.db";
