use std::sync::OnceLock;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::MEV_TO_J;
use crate::error::{FelError, Result};
use crate::materials_db::MATERIALS;

/// Thermal and stopping properties of a target material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    pub name: String,
    /// kg/m³
    pub density: f64,
    /// J/(kg·K)
    pub specific_heat: f64,
    /// J/(g·K)
    pub heat_capacity: f64,
    pub atomic_number: u32,
    /// g/mol
    pub atomic_mass: f64,
    /// Mean excitation energy (eV)
    pub ionization_potential: f64,
    /// Mass stopping power (MeV·cm²/g), as tabulated
    pub stopping_power_coefficient: f64,
    /// Linear stopping power (J/m), derived from the tabulated coefficient
    pub stopping_power_si: f64,
}

impl MaterialProperties {
    /// Density in g/cm³.
    pub fn density_g_cm3(&self) -> f64 {
        self.density / 1000.0
    }

    /// Electron density (m^-3).
    pub fn electron_density(&self, avogadro: f64) -> f64 {
        avogadro * self.density_g_cm3() / self.atomic_mass * f64::from(self.atomic_number) * 1e6
    }
}

/// Convert a mass stopping power (MeV·cm²/g) to a linear one (J/m).
pub fn stopping_power_to_si(coefficient_mev_cm2_per_g: f64, density_kg_m3: f64) -> f64 {
    // MeV·cm²/g × g/cm³ = MeV/cm
    let mev_per_cm = coefficient_mev_cm2_per_g * density_kg_m3 / 1000.0;
    mev_per_cm * 100.0 * MEV_TO_J
}

/// The material catalogue with SI stopping powers filled in.
///
/// Every SI value is computed from the immutable raw catalogue, so building
/// the table any number of times gives the same result.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTable {
    materials: Vec<MaterialProperties>,
}

static MATERIAL_TABLE: OnceLock<MaterialTable> = OnceLock::new();

impl MaterialTable {
    pub fn new() -> Self {
        let materials = MATERIALS
            .iter()
            .map(
                |&(name, density, specific_heat, heat_capacity, z, a, ip, coefficient)| {
                    MaterialProperties {
                        name: name.to_string(),
                        density,
                        specific_heat,
                        heat_capacity,
                        atomic_number: z,
                        atomic_mass: a,
                        ionization_potential: ip,
                        stopping_power_coefficient: coefficient,
                        stopping_power_si: stopping_power_to_si(coefficient, density),
                    }
                },
            )
            .collect();
        MaterialTable { materials }
    }

    /// Process-wide table, built on first use.
    pub fn global() -> &'static MaterialTable {
        MATERIAL_TABLE.get_or_init(|| {
            let table = MaterialTable::new();
            debug!("material table built with {} entries", table.len());
            table
        })
    }

    /// Find a material by name (case-insensitive).
    pub fn get(&self, name: &str) -> Result<&MaterialProperties> {
        let name = name.trim();
        self.materials
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                FelError::UnknownMaterial(format!("{name} (available: {})", self.names().join(", ")))
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialProperties> {
        self.materials.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.materials.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_case_insensitive() {
        let table = MaterialTable::new();
        assert_eq!(table.get("copper").unwrap().atomic_number, 29);
        assert_eq!(table.get("STAINLESS STEEL").unwrap().atomic_number, 26);
        assert!(matches!(
            table.get("unobtainium"),
            Err(FelError::UnknownMaterial(_))
        ));
    }

    #[test]
    fn test_stopping_power_si() {
        // 5 MeV·cm²/g in copper: 44.8 MeV/cm
        let cu = MaterialTable::new().get("Copper").unwrap().clone();
        let expected = 44.8 * 100.0 * MEV_TO_J;
        assert!((cu.stopping_power_si - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_global_table_is_idempotent() {
        let first = MaterialTable::global();
        let second = MaterialTable::global();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, &MaterialTable::new());
        assert_eq!(MaterialTable::new(), MaterialTable::new());
    }
}
