//! Post-processing of a completed trajectory: energy-deposition profile
//! and airburst/cratering classification.

use std::fmt;

use serde::Serialize;

use crate::constants::{DEDZ_TO_KILOTON_PER_KM, JOULES_PER_KILOTON};
use crate::errors::EntryError;
use crate::solver::EntryTrajectory;

/// How the entry ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutcomeKind {
    /// Peak energy deposition above ground
    Airburst,
    /// Peak energy deposition on the series' final row — the body made
    /// it to the surface
    Cratering,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Burst statistics derived from a finished trajectory
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeSummary {
    pub outcome: OutcomeKind,
    /// Peak energy-deposition rate (kt TNT per km)
    pub burst_peak_dedz: f64,
    /// Altitude of the peak (m); 0 for a cratering event
    pub burst_altitude: f64,
    /// Downrange distance of the peak (m)
    pub burst_distance: f64,
    /// Energy released up to the burst (kt TNT)
    pub burst_energy: f64,
}

/// Kinetic energy lost per unit altitude at each step, in kt TNT per km.
///
/// The first row has no predecessor and is defined as exactly 0; row i
/// holds (KE[i-1] - KE[i]) / (z[i-1] - z[i]) scaled to kilotons per
/// kilometre, positive when energy is deposited on the way down.
pub fn compute_energy_profile(trajectory: &EntryTrajectory) -> Vec<f64> {
    let steps = &trajectory.steps;
    let mut dedz = Vec::with_capacity(steps.len());
    if steps.is_empty() {
        return dedz;
    }

    dedz.push(0.0);
    for pair in steps.windows(2) {
        let lost = pair[0].kinetic_energy() - pair[1].kinetic_energy();
        let dropped = pair[0].altitude - pair[1].altitude;
        dedz.push(lost / dropped / DEDZ_TO_KILOTON_PER_KM);
    }
    dedz
}

/// Classify a finished trajectory as an airburst or a cratering event.
///
/// The burst row is the one with the highest deposition rate, first
/// occurrence winning ties. If that row is the last of the series the
/// body deposited its peak at the ground: a cratering event with the
/// released energy taken as the larger of the residual kinetic energy
/// and the energy already lost. Otherwise the peak sits above ground and
/// the burst energy is everything lost down to that row.
///
/// # Arguments
/// * `trajectory` - A solved entry trajectory
/// * `dedz` - Its deposition profile from [`compute_energy_profile`]
pub fn analyse_outcome(
    trajectory: &EntryTrajectory,
    dedz: &[f64],
) -> Result<OutcomeSummary, EntryError> {
    let steps = &trajectory.steps;
    if steps.is_empty() {
        return Err(EntryError::Degenerate("empty trajectory".to_string()));
    }
    if dedz.len() != steps.len() {
        return Err(EntryError::Degenerate(format!(
            "dedz column has {} rows for {} trajectory rows",
            dedz.len(),
            steps.len()
        )));
    }

    let mut peak = 0;
    for (i, &rate) in dedz.iter().enumerate() {
        if rate > dedz[peak] {
            peak = i;
        }
    }

    let initial_energy = steps[0].kinetic_energy() / JOULES_PER_KILOTON;
    let peak_energy = steps[peak].kinetic_energy() / JOULES_PER_KILOTON;

    let summary = if peak == steps.len() - 1 {
        OutcomeSummary {
            outcome: OutcomeKind::Cratering,
            burst_peak_dedz: dedz[peak],
            burst_altitude: 0.0,
            burst_distance: steps[peak].distance,
            burst_energy: peak_energy.max(initial_energy - peak_energy),
        }
    } else {
        OutcomeSummary {
            outcome: OutcomeKind::Airburst,
            burst_peak_dedz: dedz[peak],
            burst_altitude: steps[peak].altitude,
            burst_distance: steps[peak].distance,
            burst_energy: initial_energy - peak_energy,
        }
    };
    Ok(summary)
}
