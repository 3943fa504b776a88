use crate::errors::EntryError;

/// Constants describing the target planet and its atmosphere
///
/// Chosen once at construction and never mutated during a run. The
/// default is Earth.
#[derive(Debug, Clone)]
pub struct Planet {
    /// Drag coefficient
    pub drag_coeff: f64,
    /// Heat-transfer coefficient
    pub heat_transfer_coeff: f64,
    /// Heat of ablation (J/kg)
    pub ablation_heat: f64,
    /// Lift coefficient
    pub lift_coeff: f64,
    /// Dispersion coefficient for fragmentation-driven spreading
    pub dispersion_coeff: f64,
    /// Planet radius (m)
    pub radius: f64,
    /// Surface gravity (m/s²)
    pub gravity: f64,
    /// Atmospheric scale height (m)
    pub scale_height: f64,
    /// Air density at zero altitude (kg/m³)
    pub surface_density: f64,
}

impl Default for Planet {
    fn default() -> Self {
        Self {
            drag_coeff: 1.0,
            heat_transfer_coeff: 0.1,
            ablation_heat: 1e7,
            lift_coeff: 1e-3,
            dispersion_coeff: 0.3,
            radius: 6371e3,
            gravity: 9.81,
            scale_height: 8000.0,
            surface_density: 1.2,
        }
    }
}

impl Planet {
    /// Earth with the standard coefficient set.
    pub fn earth() -> Self {
        Self::default()
    }

    /// Check that every constant is strictly positive.
    pub fn validate(&self) -> Result<(), EntryError> {
        let fields = [
            ("drag_coeff", self.drag_coeff),
            ("heat_transfer_coeff", self.heat_transfer_coeff),
            ("ablation_heat", self.ablation_heat),
            ("lift_coeff", self.lift_coeff),
            ("dispersion_coeff", self.dispersion_coeff),
            ("radius", self.radius),
            ("gravity", self.gravity),
            ("scale_height", self.scale_height),
            ("surface_density", self.surface_density),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(EntryError::InvalidInput(format!(
                    "planet {} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earth_defaults_validate() {
        assert!(Planet::earth().validate().is_ok());
    }

    #[test]
    fn test_non_positive_constant_rejected() {
        let mut planet = Planet::earth();
        planet.gravity = 0.0;
        let err = planet.validate().unwrap_err();
        assert!(matches!(err, EntryError::InvalidInput(_)));
        assert!(err.to_string().contains("gravity"));
    }
}
