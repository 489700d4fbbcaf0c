use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ATOMIC_MASS_UNIT, ELECTRON_MASS, ELECTRON_REST_ENERGY_MEV, ELEMENTARY_CHARGE, PROTON_MASS,
    PROTON_REST_ENERGY_MEV,
};
use crate::error::{FelError, Result};
use crate::kinematics::rest_energy_from_mass;

/// Mass, charge and rest energy of a beam particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSpecies {
    pub mass_kg: f64,
    pub charge_c: f64,
    pub rest_energy_mev: f64,
}

const PREDEFINED: &[&str] = &["electron", "proton"];

impl ParticleSpecies {
    pub const ELECTRON: ParticleSpecies = ParticleSpecies {
        mass_kg: ELECTRON_MASS,
        charge_c: ELEMENTARY_CHARGE,
        rest_energy_mev: ELECTRON_REST_ENERGY_MEV,
    };

    pub const PROTON: ParticleSpecies = ParticleSpecies {
        mass_kg: PROTON_MASS,
        charge_c: ELEMENTARY_CHARGE,
        rest_energy_mev: PROTON_REST_ENERGY_MEV,
    };

    /// Look up a predefined particle ("electron" or "proton").
    pub fn by_name(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "electron" => Ok(Self::ELECTRON),
            "proton" => Ok(Self::PROTON),
            _ => Err(FelError::UnknownParticle(format!(
                "{name} (available: {})",
                PREDEFINED.join(", ")
            ))),
        }
    }

    /// Ion of mass number A in charge state Z: m = A·u, q = Z·e.
    pub fn isotope(mass_number: u32, ion_charge: u32) -> Result<Self> {
        if mass_number == 0 {
            return Err(FelError::domain("mass number", "must be positive, got 0"));
        }
        if ion_charge == 0 {
            return Err(FelError::domain("ion charge", "must be positive, got 0"));
        }
        let mass_kg = f64::from(mass_number) * ATOMIC_MASS_UNIT;
        Ok(ParticleSpecies {
            mass_kg,
            charge_c: f64::from(ion_charge) * ELEMENTARY_CHARGE,
            rest_energy_mev: rest_energy_from_mass(mass_kg),
        })
    }

    /// Parse either a predefined name or an isotope written as `"A,Z"`.
    pub fn parse(spec: &str) -> Result<Self> {
        if let Ok(species) = Self::by_name(spec) {
            return Ok(species);
        }

        let invalid = |reason: String| FelError::InvalidParticleSpec {
            spec: spec.to_string(),
            reason,
        };

        let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(invalid(format!(
                "use a particle name ({}) or isotope format 'A,Z' such as '12,5'",
                PREDEFINED.join(", ")
            )));
        }
        let mass_number: i64 = parts[0]
            .parse()
            .map_err(|_| invalid(format!("mass number '{}' is not an integer", parts[0])))?;
        let ion_charge: i64 = parts[1]
            .parse()
            .map_err(|_| invalid(format!("ion charge '{}' is not an integer", parts[1])))?;

        let mass_number = u32::try_from(mass_number)
            .ok()
            .filter(|&a| a > 0)
            .ok_or_else(|| invalid(format!("mass number must be positive, got {mass_number}")))?;
        let ion_charge = u32::try_from(ion_charge)
            .ok()
            .filter(|&z| z > 0)
            .ok_or_else(|| invalid(format!("ion charge must be positive, got {ion_charge}")))?;

        Self::isotope(mass_number, ion_charge)
    }
}

impl FromStr for ParticleSpecies {
    type Err = FelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_is_case_insensitive() {
        assert_eq!(ParticleSpecies::by_name("Electron").unwrap(), ParticleSpecies::ELECTRON);
        assert_eq!(ParticleSpecies::by_name(" proton ").unwrap(), ParticleSpecies::PROTON);
    }

    #[test]
    fn test_unknown_name() {
        let err = ParticleSpecies::by_name("muon").unwrap_err();
        assert!(matches!(err, FelError::UnknownParticle(_)));
        assert!(err.to_string().contains("muon"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for spec in ["12", "12,5,1", "a,5", "12,b", "0,5", "12,0", "-12,5", "12,5x", ""] {
            assert!(
                matches!(
                    ParticleSpecies::parse(spec),
                    Err(FelError::InvalidParticleSpec { .. })
                ),
                "spec {spec:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_isotope_zero_is_domain_error() {
        assert!(matches!(
            ParticleSpecies::isotope(0, 1),
            Err(FelError::Domain { .. })
        ));
    }
}
