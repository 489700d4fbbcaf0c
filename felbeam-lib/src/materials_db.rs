/// Embedded target-material catalogue, as tabulated for the beam dump and
/// collimator studies.
///
/// Each entry: (name, density_kg_per_m3, specific_heat_j_per_kg_k,
/// heat_capacity_j_per_g_k, atomic_number, atomic_mass_g_per_mol,
/// ionization_potential_ev, stopping_power_mev_cm2_per_g)
#[allow(clippy::type_complexity)]
pub(crate) const MATERIALS: &[(&str, f64, f64, f64, u32, f64, f64, f64)] = &[
    ("Aluminum", 2700.0, 900.0, 0.897, 13, 26.98, 166.0, 2.7),
    ("Copper", 8960.0, 385.0, 0.385, 29, 63.55, 322.0, 5.0),
    ("Stainless Steel", 7850.0, 500.0, 0.500, 26, 55.85, 233.0, 3.5),
];
