//! HITRAN-backed line-shape provider.
//!
//! Line-by-line parameters are kept as standard 160-column `.par` records
//! under a line-database directory, one file per gas, main isotopologue
//! only. Missing tables are downloaded from the HITRAN line-by-line API
//! when the `fetch` feature is enabled; otherwise the directory must be
//! populated out of band.
//!
//! Absorption cross sections are assembled on a uniform wavenumber grid by
//! summing pressure-broadened, pressure-shifted Voigt profiles with the
//! standard HITRAN temperature scaling of line intensities.

use std::collections::HashMap;
use std::f64::consts::LN_2;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::constants::{
    AVOGADRO, BOLTZMANN, C2_CM_K, DEFAULT_LINE_DB_DIR, MAX_WAVENUMBER, MIN_WAVENUMBER,
    REFERENCE_TEMPERATURE, SPEED_OF_LIGHT,
};
use crate::gases::Gas;
use crate::spectra::{voigt_profile, AbsorptionSpectrum, Environment, LineShapeProvider, SpectraError};

/// One spectral line, as parsed from a HITRAN `.par` record. Units follow
/// the HITRAN convention: wavenumbers in cm^-1, intensity in
/// cm^-1 / (molecule cm^-2) at 296 K, widths in cm^-1 / atm.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SpectralLine {
    /// Vacuum wavenumber of the transition (cm^-1)
    nu: f64,
    /// Line intensity at the reference temperature
    intensity: f64,
    /// Air-broadened Lorentz HWHM at 296 K, 1 atm (cm^-1 / atm)
    gamma_air: f64,
    /// Lower-state energy (cm^-1)
    lower_energy: f64,
    /// Temperature exponent of the air-broadened width
    n_air: f64,
    /// Air pressure-induced line shift (cm^-1 / atm)
    delta_air: f64,
}

/// Configuration for [`HitranProvider`].
#[derive(Debug, Clone)]
pub struct HitranProviderConfig {
    /// Directory holding one `{gas}.par` line list per gas
    pub line_db_dir: PathBuf,
    /// Lower bound of the spectral window (cm^-1)
    pub min_wavenumber: f64,
    /// Upper bound of the spectral window (cm^-1)
    pub max_wavenumber: f64,
    /// Spacing of the output wavenumber grid (cm^-1)
    pub grid_step: f64,
    /// Distance from line center beyond which a line's contribution is
    /// truncated (cm^-1); 25 cm^-1 is the conventional HITRAN cutoff
    pub wing_cutoff: f64,
}

impl Default for HitranProviderConfig {
    fn default() -> Self {
        Self {
            line_db_dir: PathBuf::from(DEFAULT_LINE_DB_DIR),
            min_wavenumber: MIN_WAVENUMBER,
            max_wavenumber: MAX_WAVENUMBER,
            grid_step: 0.01,
            wing_cutoff: 25.0,
        }
    }
}

/// Line-shape provider computing Voigt absorption cross sections from
/// HITRAN line lists.
#[derive(Debug)]
pub struct HitranProvider {
    config: HitranProviderConfig,
    /// Loaded line tables, keyed by HITRAN molecule number
    tables: HashMap<i64, Vec<SpectralLine>>,
}

impl HitranProvider {
    /// Creates a provider over the given configuration. No I/O happens
    /// until [`LineShapeProvider::ensure_line_data`] is called.
    pub fn new(config: HitranProviderConfig) -> Self {
        Self {
            config,
            tables: HashMap::new(),
        }
    }

    fn table_path(&self, gas: &Gas) -> PathBuf {
        self.config.line_db_dir.join(format!("{}.par", gas.name))
    }

    /// Parses a `.par` file, keeping records for `gas`'s main isotopologue
    /// inside the configured spectral window.
    fn load_table(&self, gas: &Gas, path: &Path) -> Result<Vec<SpectralLine>, SpectraError> {
        let text = fs::read_to_string(path)?;
        let mut lines = Vec::new();
        for (index, record) in text.lines().enumerate() {
            if record.trim().is_empty() {
                continue;
            }
            let (mol_id, iso, line) = parse_par_record(record, gas.name, index + 1)?;
            if mol_id != gas.mol_id || iso != 1 {
                continue;
            }
            if line.nu < self.config.min_wavenumber || line.nu > self.config.max_wavenumber {
                continue;
            }
            lines.push(line);
        }
        Ok(lines)
    }

    #[cfg(feature = "fetch")]
    fn fetch_table(&self, gas: &Gas, path: &Path) -> Result<(), SpectraError> {
        let url = format!(
            "https://hitran.org/lbl/api?iso_ids_list={}&numin={}&numax={}",
            gas.global_iso_id, self.config.min_wavenumber, self.config.max_wavenumber
        );
        info!("Fetching {} line list from {}", gas.name, url);
        let body = reqwest::blocking::get(&url)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| SpectraError::FetchError {
                gas: gas.name.to_string(),
                reason: e.to_string(),
            })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, body)?;
        Ok(())
    }

    #[cfg(not(feature = "fetch"))]
    fn fetch_table(&self, gas: &Gas, _path: &Path) -> Result<(), SpectraError> {
        Err(SpectraError::MissingLineData(gas.name.to_string()))
    }
}

impl LineShapeProvider for HitranProvider {
    fn ensure_line_data(&mut self, gas: &Gas) -> Result<(), SpectraError> {
        if self.tables.contains_key(&gas.mol_id) {
            return Ok(());
        }
        let path = self.table_path(gas);
        if !path.exists() {
            self.fetch_table(gas, &path)?;
        }
        let lines = self.load_table(gas, &path)?;
        info!(
            "Loaded {} {} lines from {}",
            lines.len(),
            gas.name,
            path.display()
        );
        self.tables.insert(gas.mol_id, lines);
        Ok(())
    }

    fn absorption_spectrum(
        &self,
        gas: &Gas,
        env: &Environment,
    ) -> Result<AbsorptionSpectrum, SpectraError> {
        let lines = self
            .tables
            .get(&gas.mol_id)
            .ok_or_else(|| SpectraError::NotLoaded(gas.name.to_string()))?;

        let min = self.config.min_wavenumber;
        let step = self.config.grid_step;
        let points = ((self.config.max_wavenumber - min) / step).round() as usize + 1;
        let wavenumbers: Vec<f64> = (0..points).map(|i| min + i as f64 * step).collect();
        let mut coefficients = vec![0.0; points];

        let temperature = env.temperature;
        let pressure = env.pressure_ratio;
        // Doppler HWHM per unit wavenumber at this temperature
        let molecule_mass_kg = gas.molar_mass / AVOGADRO;
        let doppler_scale =
            (2.0 * LN_2 * BOLTZMANN * temperature / molecule_mass_kg).sqrt() / SPEED_OF_LIGHT;

        for line in lines {
            if line.nu <= 0.0 {
                continue;
            }
            // Diluent is pure air, so only the air-broadened width applies
            let gamma_l = pressure
                * line.gamma_air
                * (REFERENCE_TEMPERATURE / temperature).powf(line.n_air);
            let alpha_d = line.nu * doppler_scale;
            let strength = line_intensity_at(line, temperature);
            let center = line.nu + line.delta_air * pressure;

            let lo = ((center - self.config.wing_cutoff - min) / step).ceil().max(0.0) as usize;
            let hi_f = ((center + self.config.wing_cutoff - min) / step).floor();
            if hi_f < 0.0 || lo >= points {
                continue;
            }
            let hi = (hi_f as usize).min(points - 1);
            for i in lo..=hi {
                coefficients[i] += strength * voigt_profile(wavenumbers[i] - center, alpha_d, gamma_l);
            }
        }

        Ok(AbsorptionSpectrum {
            wavenumbers,
            coefficients,
        })
    }
}

/// Scales a line's reference intensity to temperature `t` using the HITRAN
/// convention: Boltzmann population of the lower state, stimulated-emission
/// correction, and a (296/T)^1.5 power-law approximation of the partition
/// function ratio.
fn line_intensity_at(line: &SpectralLine, t: f64) -> f64 {
    let boltzmann_ratio = (-C2_CM_K * line.lower_energy / t).exp()
        / (-C2_CM_K * line.lower_energy / REFERENCE_TEMPERATURE).exp();
    let stimulated = (1.0 - (-C2_CM_K * line.nu / t).exp())
        / (1.0 - (-C2_CM_K * line.nu / REFERENCE_TEMPERATURE).exp());
    line.intensity * (REFERENCE_TEMPERATURE / t).powf(1.5) * boltzmann_ratio * stimulated
}

/// Parses one fixed-width HITRAN 2004+ `.par` record. Only the fields this
/// provider consumes are extracted; the rest of the 160-column record is
/// ignored.
fn parse_par_record(
    record: &str,
    table: &str,
    number: usize,
) -> Result<(i64, u8, SpectralLine), SpectraError> {
    let parse_error = |reason: String| SpectraError::ParseError {
        table: table.to_string(),
        record: number,
        reason,
    };
    if record.len() < 67 {
        return Err(parse_error(format!(
            "record is {} bytes, expected at least 67",
            record.len()
        )));
    }
    // Columns are byte offsets; a multi-byte character anywhere before
    // column 67 puts some field boundary inside a character, which `get`
    // reports as `None` instead of panicking.
    let slice = |range: std::ops::Range<usize>, what: &str| -> Result<&str, SpectraError> {
        record
            .get(range)
            .ok_or_else(|| parse_error(format!("non-ASCII bytes in {what} field")))
    };
    let field = |range: std::ops::Range<usize>, what: &str| -> Result<f64, SpectraError> {
        let text = slice(range, what)?;
        text.trim()
            .parse::<f64>()
            .map_err(|_| parse_error(format!("bad {what} field {text:?}")))
    };

    let mol_id = field(0..2, "molecule")? as i64;
    // Isotopologues 1-9 are digits, 10 is "0", 11 and up are "A", "B", ...
    let iso = match slice(2..3, "isotopologue")?.chars().next() {
        Some(c @ '1'..='9') => c as u8 - b'0',
        Some('0') => 10,
        Some(c @ 'A'..='Z') => 11 + c as u8 - b'A',
        other => return Err(parse_error(format!("bad isotopologue field {other:?}"))),
    };
    let line = SpectralLine {
        nu: field(3..15, "wavenumber")?,
        intensity: field(15..25, "intensity")?,
        // 25..35 is the Einstein A coefficient and 40..45 the self-broadened
        // width; with air as the only diluent neither is consumed
        gamma_air: field(35..40, "gamma_air")?,
        lower_energy: field(45..55, "lower energy")?,
        n_air: field(55..59, "n_air")?,
        delta_air: field(59..67, "delta_air")?,
    };
    Ok((mol_id, iso, line))
}
