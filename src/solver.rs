//! Entry scenario inputs, the fixed-step integrators and the trajectory
//! they produce.

use std::f64::consts::PI;
use std::fmt;

use log::warn;
use nalgebra::vector;
use serde::Serialize;

use crate::atmosphere::AtmosphereModel;
use crate::constants::DEFAULT_MAX_STEPS;
use crate::derivatives::{compute_derivatives, StateVector};
use crate::errors::EntryError;
use crate::planet::Planet;

/// Integration backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationBackend {
    ForwardEuler,
    Rk4,
}

impl IntegrationBackend {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "FE" | "EULER" => Some(IntegrationBackend::ForwardEuler),
            "RK4" => Some(IntegrationBackend::Rk4),
            _ => None,
        }
    }

    /// Resolve a backend name, warning and falling back to forward Euler
    /// for anything unrecognised.
    pub fn from_name_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            warn!(
                "integration backend {:?} is not implemented, falling back to forward Euler",
                s
            );
            IntegrationBackend::ForwardEuler
        })
    }
}

impl fmt::Display for IntegrationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationBackend::ForwardEuler => write!(f, "FE"),
            IntegrationBackend::Rk4 => write!(f, "RK4"),
        }
    }
}

/// Scenario parameters for a single entry run
///
/// Immutable once a solve starts. Angles are degrees unless `radians` is
/// set; the returned trajectory uses the same unit as the input.
#[derive(Debug, Clone)]
pub struct EntryInputs {
    /// Body radius (m)
    pub radius: f64,
    /// Entry speed (m/s)
    pub velocity: f64,
    /// Body material density (kg/m³)
    pub density: f64,
    /// Material strength: the ram pressure that starts fragmentation (Pa)
    pub strength: f64,
    /// Trajectory angle to the horizontal
    pub angle: f64,
    /// Initial altitude (m)
    pub init_altitude: f64,
    /// Output timestep (s)
    pub dt: f64,
    /// Whether `angle` is given in radians rather than degrees
    pub radians: bool,
    pub backend: IntegrationBackend,
}

impl Default for EntryInputs {
    fn default() -> Self {
        Self {
            radius: 10.0,
            velocity: 19_000.0,
            density: 3000.0,
            strength: 1e5,
            angle: 20.0,
            init_altitude: 100e3,
            dt: 0.05,
            radians: false,
            backend: IntegrationBackend::Rk4,
        }
    }
}

impl EntryInputs {
    /// Check that every dimensional parameter is strictly positive.
    pub fn validate(&self) -> Result<(), EntryError> {
        let fields = [
            ("radius", self.radius),
            ("velocity", self.velocity),
            ("density", self.density),
            ("strength", self.strength),
            ("init_altitude", self.init_altitude),
            ("dt", self.dt),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(EntryError::InvalidInput(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// One row of the output table
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntryState {
    pub velocity: f64,
    pub mass: f64,
    pub angle: f64,
    pub altitude: f64,
    pub distance: f64,
    pub radius: f64,
    pub time: f64,
}

impl EntryState {
    fn from_vector(state: &StateVector, time: f64) -> Self {
        Self {
            velocity: state[3],
            mass: state[4],
            angle: state[0],
            altitude: state[2],
            distance: state[5],
            radius: state[1],
            time,
        }
    }

    /// Kinetic energy of the body at this state, in joules.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity * self.velocity
    }
}

/// Which terminal predicate ended the integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopCondition {
    /// Altitude reached zero
    GroundImpact,
    /// Ablation consumed the whole body
    MassExhausted,
    /// Radius collapsed to zero
    RadiusVanished,
    /// Velocity dropped to zero
    VelocityStalled,
    /// Altitude climbed back to the initial altitude
    Escaped,
}

/// Completed entry simulation
///
/// `steps` is time-ascending and excludes the state that fired the stop
/// condition; `stop` records which predicate that state satisfied.
#[derive(Debug, Clone)]
pub struct EntryTrajectory {
    pub steps: Vec<EntryState>,
    /// Index of the first step whose derivative evaluation saw ram
    /// pressure exceed the material strength
    pub burst_index: Option<usize>,
    pub stop: StopCondition,
}

struct RawSeries {
    series: Vec<EntryState>,
    burst_index: Option<usize>,
    stop: StopCondition,
}

fn stop_condition(state: &StateVector, init_altitude: f64) -> Option<StopCondition> {
    if state[2] <= 0.0 {
        Some(StopCondition::GroundImpact)
    } else if state[4] <= 0.0 {
        Some(StopCondition::MassExhausted)
    } else if state[1] <= 0.0 {
        Some(StopCondition::RadiusVanished)
    } else if state[3] <= 0.0 {
        Some(StopCondition::VelocityStalled)
    } else if state[2] >= init_altitude {
        Some(StopCondition::Escaped)
    } else {
        None
    }
}

/// Fixed-step entry solver
///
/// Owns the planet constants, the atmosphere model and the scenario, and
/// produces an [`EntryTrajectory`] value per solve. Runs are independent:
/// nothing is accumulated on the solver between calls.
pub struct EntrySolver {
    planet: Planet,
    atmosphere: AtmosphereModel,
    inputs: EntryInputs,
    max_steps: usize,
}

impl EntrySolver {
    pub fn new(planet: Planet, atmosphere: AtmosphereModel, inputs: EntryInputs) -> Self {
        Self {
            planet,
            atmosphere,
            inputs,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Override the defensive step cap.
    pub fn set_max_steps(&mut self, max_steps: usize) {
        self.max_steps = max_steps;
    }

    pub fn inputs(&self) -> &EntryInputs {
        &self.inputs
    }

    /// Integrate the scenario to a stop condition.
    ///
    /// The terminating state itself is excluded from the returned series.
    /// If the step cap is hit first the run fails with
    /// [`EntryError::NonConvergence`] rather than looping without bound.
    pub fn solve(&self) -> Result<EntryTrajectory, EntryError> {
        self.planet.validate()?;
        self.inputs.validate()?;

        let theta0 = if self.inputs.radians {
            self.inputs.angle
        } else {
            self.inputs.angle.to_radians()
        };

        let raw = match self.inputs.backend {
            IntegrationBackend::ForwardEuler => self.solve_euler(theta0)?,
            IntegrationBackend::Rk4 => self.solve_rk4(theta0)?,
        };

        let mut steps = raw.series;
        steps.pop();

        // A burst flagged only while producing the dropped terminal row
        // has no row to point at in the published series.
        let burst_index = raw.burst_index.filter(|&i| i < steps.len());

        if !self.inputs.radians {
            for step in &mut steps {
                step.angle = step.angle.to_degrees();
            }
        }

        Ok(EntryTrajectory {
            steps,
            burst_index,
            stop: raw.stop,
        })
    }

    fn initial_state(&self, theta0: f64) -> StateVector {
        let inputs = &self.inputs;
        let mass = 4.0 / 3.0 * PI * inputs.radius.powi(3) * inputs.density;
        vector![
            theta0,
            inputs.radius,
            inputs.init_altitude,
            inputs.velocity,
            mass,
            0.0
        ]
    }

    fn solve_euler(&self, theta0: f64) -> Result<RawSeries, EntryError> {
        let inputs = &self.inputs;
        let dt = inputs.dt;

        let mut state = self.initial_state(theta0);
        let mut time = 0.0;
        let mut series = vec![EntryState::from_vector(&state, time)];
        let mut burst_index: Option<usize> = None;

        for _ in 0..self.max_steps {
            let d = compute_derivatives(
                &state,
                &self.planet,
                inputs.density,
                inputs.strength,
                &self.atmosphere,
            );
            if d.fragmenting && burst_index.is_none() {
                burst_index = Some(series.len());
            }

            state += d.rate * dt;
            time += dt;
            series.push(EntryState::from_vector(&state, time));

            if let Some(stop) = stop_condition(&state, inputs.init_altitude) {
                return Ok(RawSeries {
                    series,
                    burst_index,
                    stop,
                });
            }
        }

        Err(EntryError::NonConvergence {
            steps: self.max_steps,
        })
    }

    fn solve_rk4(&self, theta0: f64) -> Result<RawSeries, EntryError> {
        let inputs = &self.inputs;
        let dt = inputs.dt;

        let mut state = self.initial_state(theta0);
        let mut time = 0.0;
        let mut series = vec![EntryState::from_vector(&state, time)];
        let mut burst_index: Option<usize> = None;

        for _ in 0..self.max_steps {
            let derivs = |s: &StateVector| {
                compute_derivatives(
                    s,
                    &self.planet,
                    inputs.density,
                    inputs.strength,
                    &self.atmosphere,
                )
            };

            let k1 = derivs(&state);
            let k2 = derivs(&(state + k1.rate * (0.5 * dt)));
            let k3 = derivs(&(state + k2.rate * (0.5 * dt)));
            let k4 = derivs(&(state + k3.rate * dt));

            let fragmenting =
                k1.fragmenting || k2.fragmenting || k3.fragmenting || k4.fragmenting;
            if fragmenting && burst_index.is_none() {
                burst_index = Some(series.len());
            }

            state += (k1.rate + k2.rate * 2.0 + k3.rate * 2.0 + k4.rate) * (dt / 6.0);
            time += dt;
            series.push(EntryState::from_vector(&state, time));

            if let Some(stop) = stop_condition(&state, inputs.init_altitude) {
                return Ok(RawSeries {
                    series,
                    burst_index,
                    stop,
                });
            }
        }

        Err(EntryError::NonConvergence {
            steps: self.max_steps,
        })
    }
}
