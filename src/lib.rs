//! # Airburst Engine
//!
//! Numerical simulation of meteoroid atmospheric entry: a coupled ODE
//! system for velocity, mass, trajectory angle, altitude, downrange
//! distance and fragmentation-driven radius growth, integrated with
//! forward Euler or classic RK4, plus post-processing into an energy
//! deposition profile and an airburst/cratering classification.

// Re-export the main types and functions
pub use analysis::{analyse_outcome, compute_energy_profile, OutcomeKind, OutcomeSummary};
pub use atmosphere::AtmosphereModel;
pub use derivatives::{compute_derivatives, Derivatives, StateVector};
pub use errors::EntryError;
pub use planet::Planet;
pub use solver::{
    EntryInputs, EntrySolver, EntryState, EntryTrajectory, IntegrationBackend, StopCondition,
};
pub use table::load_density_table;

// Module declarations
mod analysis;
mod atmosphere;
mod constants;
mod derivatives;
mod errors;
mod planet;
mod solver;
mod table;
