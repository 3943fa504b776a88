//! Right-hand side of the entry equations.
//!
//! State vector order: [angle, radius, altitude, velocity, mass, distance].

use nalgebra::{vector, SVector};
use std::f64::consts::PI;

use crate::atmosphere::AtmosphereModel;
use crate::planet::Planet;

/// Six-component entry state: [theta, r, z, v, m, x]
pub type StateVector = SVector<f64, 6>;

/// One derivative evaluation
#[derive(Debug, Clone, Copy)]
pub struct Derivatives {
    /// Rate of change of each state component
    pub rate: StateVector,
    /// Whether ram pressure exceeded the body's strength at this state
    pub fragmenting: bool,
}

/// Evaluate the entry equations at one state.
///
/// Drag decelerates the body, ablation removes mass, gravity and the
/// planet's curvature turn the flight path, and once the dynamic ram
/// pressure exceeds the material strength the radius grows with the
/// dispersion law sqrt(7·rho_air·alpha / (2·rho_body))·v.
///
/// Velocity must be positive: the gravity-turn term divides by v. The
/// solver guarantees this by stopping any run whose velocity reaches
/// zero before the next evaluation.
pub fn compute_derivatives(
    state: &StateVector,
    planet: &Planet,
    body_density: f64,
    strength: f64,
    atmosphere: &AtmosphereModel,
) -> Derivatives {
    let theta = state[0];
    let radius = state[1];
    let altitude = state[2];
    let velocity = state[3];
    let mass = state[4];

    let cos_theta = theta.cos();
    let sin_theta = theta.sin();
    let area = PI * radius * radius;
    let rho_air = atmosphere.density(altitude);
    let rho_area_v = rho_air * area * velocity;
    let ram_pressure = rho_air * velocity * velocity;

    let dv = -planet.drag_coeff * rho_area_v * velocity / (2.0 * mass)
        + planet.gravity * sin_theta;
    let dm = -planet.heat_transfer_coeff * rho_area_v * velocity * velocity
        / (2.0 * planet.ablation_heat);
    let dtheta = -planet.lift_coeff * rho_area_v / (2.0 * mass)
        + planet.gravity * cos_theta / velocity
        - velocity * cos_theta / (planet.radius + altitude);
    let dz = -velocity * sin_theta;
    let dx = velocity * cos_theta / (1.0 + altitude / planet.radius);

    let fragmenting = ram_pressure > strength;
    let dr = if fragmenting {
        (7.0 * rho_air * planet.dispersion_coeff / (2.0 * body_density)).sqrt() * velocity
    } else {
        0.0
    };

    Derivatives {
        rate: vector![dtheta, dr, dz, dv, dm, dx],
        fragmenting,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_state() -> StateVector {
        // 45° descent, 10 m body, 50 km up, 19 km/s
        let radius: f64 = 10.0;
        let mass = 4.0 / 3.0 * PI * radius.powi(3) * 3000.0;
        vector![PI / 4.0, radius, 50_000.0, 19_000.0, mass, 0.0]
    }

    #[test]
    fn test_descending_body_loses_altitude_and_mass() {
        let planet = Planet::earth();
        let atmosphere = AtmosphereModel::exponential(1.2, 8000.0);
        let d = compute_derivatives(&sample_state(), &planet, 3000.0, 1e32, &atmosphere);

        assert!(d.rate[2] < 0.0, "altitude must fall on a descending path");
        assert!(d.rate[3] < 0.0, "drag must dominate gravity at entry speed");
        assert!(d.rate[4] < 0.0, "ablation must remove mass");
        assert!(d.rate[5] > 0.0, "downrange distance must grow");
        assert_relative_eq!(
            d.rate[2],
            -19_000.0 * (PI / 4.0).sin(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_no_fragmentation_below_strength() {
        let planet = Planet::earth();
        let atmosphere = AtmosphereModel::exponential(1.2, 8000.0);
        // Unbreakable body: ram pressure can never exceed 1e32 Pa
        let d = compute_derivatives(&sample_state(), &planet, 3000.0, 1e32, &atmosphere);
        assert!(!d.fragmenting);
        assert_eq!(d.rate[1], 0.0);
    }

    #[test]
    fn test_fragmentation_above_strength() {
        let planet = Planet::earth();
        let atmosphere = AtmosphereModel::exponential(1.2, 8000.0);
        let state = sample_state();
        let d = compute_derivatives(&state, &planet, 3000.0, 1e5, &atmosphere);

        let rho_air = atmosphere.density(50_000.0);
        assert!(rho_air * 19_000.0f64.powi(2) > 1e5, "scenario must exceed strength");
        assert!(d.fragmenting);
        let expected = (7.0 * rho_air * 0.3 / (2.0 * 3000.0)).sqrt() * 19_000.0;
        assert_relative_eq!(d.rate[1], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_vacuum_leaves_only_gravity_terms() {
        let planet = Planet::earth();
        let atmosphere = AtmosphereModel::constant(0.0);
        let state = sample_state();
        let d = compute_derivatives(&state, &planet, 3000.0, 1e5, &atmosphere);

        assert!(!d.fragmenting);
        assert_eq!(d.rate[1], 0.0);
        assert_eq!(d.rate[4], 0.0, "no air, no ablation");
        assert_relative_eq!(
            d.rate[3],
            planet.gravity * (PI / 4.0).sin(),
            epsilon = 1e-12
        );
    }
}
