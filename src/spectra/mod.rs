//! Line-shape providers.
//!
//! A [`LineShapeProvider`] turns a gas plus an atmospheric environment into
//! per-wavenumber absorption cross sections. The batch orchestrator only
//! talks to the trait; the bundled [`HitranProvider`] computes Voigt
//! profiles from HITRAN line-by-line tables cached on disk.
//!
//! Providers are allowed to be noisy on stdout (progress meters and the
//! like); callers wrap invocations in
//! [`crate::quiet::suppress_stdout`] when that is undesired.

mod hitran;
mod voigt;

pub use hitran::{HitranProvider, HitranProviderConfig};
pub use voigt::voigt_profile;

use crate::gases::Gas;

/// Atmospheric conditions a spectrum is evaluated at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    /// Temperature (K)
    pub temperature: f64,
    /// Pressure relative to sea level (dimensionless p / p0)
    pub pressure_ratio: f64,
}

/// Result of a line-shape computation: two arrays of identical length.
#[derive(Debug, Clone, PartialEq)]
pub struct AbsorptionSpectrum {
    /// Spectral coordinates (cm^-1)
    pub wavenumbers: Vec<f64>,
    /// Absorption cross sections (cm^2 / molecule), one per wavenumber
    pub coefficients: Vec<f64>,
}

/// Source of per-wavenumber absorption coefficients for the tracked gases.
pub trait LineShapeProvider {
    /// Makes sure the line data backing `gas` is available, downloading or
    /// loading it as needed. Called once per gas before any spectra are
    /// requested.
    fn ensure_line_data(&mut self, gas: &Gas) -> Result<(), SpectraError>;

    /// Computes the absorption spectrum of `gas` under `env`, with air as
    /// the only diluent, over the provider's configured spectral window.
    fn absorption_spectrum(
        &self,
        gas: &Gas,
        env: &Environment,
    ) -> Result<AbsorptionSpectrum, SpectraError>;
}

/// Errors from line-data acquisition and line-shape computation.
#[derive(Debug, thiserror::Error)]
pub enum SpectraError {
    /// I/O error reading or writing a line-list file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A line record in a `.par` file could not be parsed
    #[error("Malformed line record {record} in {table}: {reason}")]
    ParseError {
        /// Name of the offending table (gas formula)
        table: String,
        /// 1-based record number within the file
        record: usize,
        /// What was wrong with the record
        reason: String,
    },

    /// No line data available for a gas and no way to obtain it
    #[error("No line data for {0}: populate the line database directory or enable the `fetch` feature")]
    MissingLineData(String),

    /// Downloading a line list failed
    #[error("Line-list download failed for {gas}: {reason}")]
    FetchError {
        /// Gas formula the download was for
        gas: String,
        /// Transport- or server-side failure description
        reason: String,
    },

    /// A spectrum was requested before `ensure_line_data` for that gas
    #[error("Line data for {0} not loaded")]
    NotLoaded(String),
}
