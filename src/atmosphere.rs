//! International Standard Atmosphere (ISA) model.
//!
//! Pure, deterministic functions of geopotential altitude: temperature,
//! pressure, and density for a dry, quiescent atmosphere. The three ISA
//! layers implemented here (troposphere, tropopause, lower stratosphere)
//! cover 0 m to [`MAX_MODEL_ALTITUDE_M`], which spans every slab the batch
//! loop visits.
//!
//! Greenhouse-gas abundances are assumed constant with altitude over this
//! range, the same assumption taken by MODTRAN, which achieves better than
//! 1 K accuracy on thermal brightness temperature.

/// Highest altitude (m) at which the model is valid
pub const MAX_MODEL_ALTITUDE_M: f64 = 32_000.0;

/// Standard gravitational acceleration (m / s^2)
const G0: f64 = 9.80665;

/// Specific gas constant of dry air (J / (kg K))
const R_AIR: f64 = 287.05287;

/// One ISA layer: base altitude, base temperature, base pressure, and the
/// temperature lapse rate that holds up to the next layer's base.
struct Layer {
    base_altitude_m: f64,
    base_temperature_k: f64,
    base_pressure_pa: f64,
    lapse_k_per_m: f64,
}

/// ISA layer table for 0..=32 km. Base pressures are the standard published
/// values, consistent with evaluating each layer formula at the layer top.
const LAYERS: [Layer; 3] = [
    // Troposphere
    Layer {
        base_altitude_m: 0.0,
        base_temperature_k: 288.15,
        base_pressure_pa: 101_325.0,
        lapse_k_per_m: -0.0065,
    },
    // Tropopause (isothermal)
    Layer {
        base_altitude_m: 11_000.0,
        base_temperature_k: 216.65,
        base_pressure_pa: 22_632.06,
        lapse_k_per_m: 0.0,
    },
    // Lower stratosphere
    Layer {
        base_altitude_m: 20_000.0,
        base_temperature_k: 216.65,
        base_pressure_pa: 5_474.889,
        lapse_k_per_m: 0.001,
    },
];

fn layer_for(altitude_m: f64) -> &'static Layer {
    assert!(
        (0.0..=MAX_MODEL_ALTITUDE_M).contains(&altitude_m),
        "altitude {altitude_m} m outside the 0..={MAX_MODEL_ALTITUDE_M} m model range"
    );
    LAYERS
        .iter()
        .rev()
        .find(|layer| altitude_m >= layer.base_altitude_m)
        .unwrap_or(&LAYERS[0])
}

/// Temperature (K) at the given altitude (m).
///
/// # Panics
///
/// Panics if `altitude_m` is outside `0..=MAX_MODEL_ALTITUDE_M`.
pub fn temperature(altitude_m: f64) -> f64 {
    let layer = layer_for(altitude_m);
    layer.base_temperature_k + layer.lapse_k_per_m * (altitude_m - layer.base_altitude_m)
}

/// Pressure (Pa) at the given altitude (m).
///
/// Barometric formula per layer: power law where the lapse rate is nonzero,
/// exponential through the isothermal tropopause.
///
/// # Panics
///
/// Panics if `altitude_m` is outside `0..=MAX_MODEL_ALTITUDE_M`.
pub fn pressure(altitude_m: f64) -> f64 {
    let layer = layer_for(altitude_m);
    let dz = altitude_m - layer.base_altitude_m;
    if layer.lapse_k_per_m == 0.0 {
        layer.base_pressure_pa * (-G0 * dz / (R_AIR * layer.base_temperature_k)).exp()
    } else {
        let t = layer.base_temperature_k + layer.lapse_k_per_m * dz;
        layer.base_pressure_pa
            * (t / layer.base_temperature_k).powf(-G0 / (R_AIR * layer.lapse_k_per_m))
    }
}

/// Density (kg / m^3) at the given altitude (m), from the ideal gas law.
///
/// # Panics
///
/// Panics if `altitude_m` is outside `0..=MAX_MODEL_ALTITUDE_M`.
pub fn density(altitude_m: f64) -> f64 {
    pressure(altitude_m) / (R_AIR * temperature(altitude_m))
}
