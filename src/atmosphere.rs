//! Atmospheric density models.
//!
//! Every model reduces to a single contract: given an altitude in metres,
//! return a non-negative air density in kg/m³. The solver is agnostic to
//! which variant it holds.

use std::path::Path;

use log::warn;

use crate::errors::EntryError;
use crate::table::load_density_table;

/// Atmospheric density as a function of altitude
///
/// Three variants:
/// - `Exponential`: rho0 · exp(-z / H), the standard isothermal profile
/// - `Constant`: rho0 at every altitude
/// - `Tabular`: piecewise-linear interpolation over a loaded
///   (altitude, density) table
#[derive(Debug, Clone)]
pub enum AtmosphereModel {
    Exponential { rho0: f64, scale_height: f64 },
    Constant { rho0: f64 },
    Tabular { table: Vec<(f64, f64)> },
}

impl AtmosphereModel {
    pub fn exponential(rho0: f64, scale_height: f64) -> Self {
        AtmosphereModel::Exponential { rho0, scale_height }
    }

    pub fn constant(rho0: f64) -> Self {
        AtmosphereModel::Constant { rho0 }
    }

    /// Build a tabular model from (altitude, density) pairs sorted by
    /// ascending altitude.
    pub fn tabular(table: Vec<(f64, f64)>) -> Self {
        AtmosphereModel::Tabular { table }
    }

    /// Build a tabular model from a table file on disk.
    ///
    /// A missing or malformed file is fatal for this path: without the
    /// table there is no usable density function to fall back on.
    pub fn from_table_file<P: AsRef<Path>>(path: P) -> Result<Self, EntryError> {
        Ok(Self::tabular(load_density_table(path)?))
    }

    /// Resolve a model by name, falling back to constant density.
    ///
    /// Recognised names are "exponential" and "constant" (case
    /// insensitive). Anything else — including "tabular", which needs a
    /// table file and must go through [`Self::from_table_file`] — logs a
    /// warning and substitutes `Constant { rho0 }`. The fallback is
    /// non-fatal by contract.
    pub fn from_name(name: &str, rho0: f64, scale_height: f64) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "exponential" => Self::exponential(rho0, scale_height),
            "constant" => Self::constant(rho0),
            other => {
                warn!(
                    "atmosphere model {:?} is not implemented, falling back to constant density",
                    other
                );
                Self::constant(rho0)
            }
        }
    }

    /// Air density at the given altitude, in kg/m³.
    pub fn density(&self, altitude: f64) -> f64 {
        match self {
            AtmosphereModel::Exponential { rho0, scale_height } => {
                rho0 * (-altitude / scale_height).exp()
            }
            AtmosphereModel::Constant { rho0 } => *rho0,
            AtmosphereModel::Tabular { table } => interpolate_density(table, altitude),
        }
    }
}

/// Linear interpolation between the two bracketing table entries.
///
/// Above the last tabulated altitude the atmosphere is taken to have
/// thinned to nothing. At or below the first entry the density clamps to
/// the first entry's value: intermediate RK4 stage states can probe
/// fractionally below ground before the stop check fires.
fn interpolate_density(table: &[(f64, f64)], altitude: f64) -> f64 {
    let Some(&(first_alt, first_rho)) = table.first() else {
        return 0.0;
    };
    if altitude <= first_alt {
        return first_rho;
    }
    if altitude > table[table.len() - 1].0 {
        return 0.0;
    }

    for pair in table.windows(2) {
        let (z0, rho0) = pair[0];
        let (z1, rho1) = pair[1];
        if altitude <= z1 {
            return rho0 + (altitude - z0) / (z1 - z0) * (rho1 - rho0);
        }
    }

    // Unreachable for a sorted table; the bounds checks above bracket
    // every remaining altitude.
    0.0
}
