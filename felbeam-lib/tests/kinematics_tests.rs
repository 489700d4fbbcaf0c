use approx::assert_relative_eq;
use felbeam::kinematics::{
    beta_gamma_from_energy, beta_gamma_from_energy_all, beta_gamma_from_energy_with,
    energy_from_beta_gamma, energy_from_beta_gamma_all, energy_from_beta_gamma_with, gamma_from_kinetic_energy, momentum_pc, photon_energy_from_wavelength,
    relativistic_parameters, rest_energy_from_mass,
};
use felbeam::units::{j_to_ev, ma_to_a, us_to_s_all};
use felbeam::{BeamPulseParameters, FelError, LaserParameters, ParticleSpecies};

#[test]
fn test_electron_at_45_mev() {
    let (gamma, beta) = relativistic_parameters(45.0, 0.51099895).unwrap();
    assert_relative_eq!(gamma, 89.0628, epsilon = 1e-4);
    assert_relative_eq!(beta, 0.999937, epsilon = 1e-6);
}

#[test]
fn test_proton_rest_energy_from_mass() {
    let p = ParticleSpecies::PROTON;
    assert_relative_eq!(rest_energy_from_mass(p.mass_kg), 938.272, epsilon = 1e-2);
    let gamma = gamma_from_kinetic_energy(938.272, p.rest_energy_mev).unwrap();
    assert_relative_eq!(gamma, 2.0, epsilon = 1e-5);
}

#[test]
fn test_momentum_of_particle_at_rest() {
    assert_eq!(momentum_pc(0.0, 0.51099895), 0.0);
    // pc = sqrt(T² + 2T·E₀); at T = E₀, pc = √3·E₀
    assert_relative_eq!(momentum_pc(1.0, 1.0), 3.0_f64.sqrt(), epsilon = 1e-15);
}

#[test]
fn test_beta_gamma_round_trip() {
    for e in [0.01, 0.5, 1.0, 45.0, 100.0, 1000.0] {
        let bg = beta_gamma_from_energy(e);
        assert_relative_eq!(energy_from_beta_gamma(bg), e, max_relative = 1e-9);
    }
}

#[test]
fn test_beta_gamma_of_invalid_energy_is_zero() {
    assert_eq!(beta_gamma_from_energy(-5.0), 0.0);
    assert_eq!(beta_gamma_from_energy(f64::NAN), 0.0);
    assert_eq!(energy_from_beta_gamma(-1.0), 0.0);
}

#[test]
fn test_beta_gamma_needs_positive_rest_energy() {
    for rest in [0.0, -1.0, f64::NAN] {
        assert!(matches!(
            beta_gamma_from_energy_with(1.0, rest),
            Err(FelError::Domain { field: "rest energy", .. })
        ));
        assert!(matches!(
            energy_from_beta_gamma_with(1.0, rest),
            Err(FelError::Domain { field: "rest energy", .. })
        ));
    }
    assert!(beta_gamma_from_energy_with(0.0, 0.0).is_err());

    let proton = ParticleSpecies::PROTON.rest_energy_mev;
    let bg = beta_gamma_from_energy_with(100.0, proton).unwrap();
    assert_relative_eq!(energy_from_beta_gamma_with(bg, proton).unwrap(), 100.0, max_relative = 1e-12);
}

#[test]
fn test_sequence_forms_preserve_length() {
    let energies = [1.0, 10.0, 45.0];
    let bgs = beta_gamma_from_energy_all(&energies);
    assert_eq!(bgs.len(), 3);
    let back = energy_from_beta_gamma_all(&bgs);
    for (a, b) in energies.iter().zip(&back) {
        assert_relative_eq!(*a, *b, max_relative = 1e-9);
    }
    assert!(beta_gamma_from_energy_all(&[]).is_empty());
    assert!(us_to_s_all(&[]).is_empty());
}

#[test]
fn test_isotope_carbon_5_plus() {
    let c12 = ParticleSpecies::parse("12,5").unwrap();
    assert_relative_eq!(c12.mass_kg, 1.9926e-26, max_relative = 1e-4);
    assert_relative_eq!(c12.charge_c, 8.0109e-19, max_relative = 1e-4);
    assert_relative_eq!(c12.rest_energy_mev, 11177.9, max_relative = 1e-5);
    assert_eq!("12, 5".parse::<ParticleSpecies>().unwrap(), c12);
}

#[test]
fn test_particle_spec_errors() {
    assert!(matches!(
        ParticleSpecies::parse("muon"),
        Err(FelError::InvalidParticleSpec { .. })
    ));
    assert!(matches!(
        ParticleSpecies::by_name("muon"),
        Err(FelError::UnknownParticle(_))
    ));
    assert!(matches!(
        ParticleSpecies::isotope(0, 1),
        Err(FelError::Domain { .. })
    ));
    assert_eq!(ParticleSpecies::parse("Electron").unwrap(), ParticleSpecies::ELECTRON);
}

#[test]
fn test_default_macropulse() {
    let beam = BeamPulseParameters::default();
    assert_relative_eq!(beam.bunches_per_macropulse(), 11424.0, max_relative = 1e-12);
    assert_relative_eq!(beam.electrons_per_bunch(), 3.7449e8, max_relative = 1e-4);
    // I = Q_bunch · f_RF
    assert_relative_eq!(beam.macropulse_current(), ma_to_a(171.36), max_relative = 1e-9);
}

#[test]
fn test_default_laser() {
    let laser = LaserParameters::default();
    assert_relative_eq!(j_to_ev(laser.photon_energy_j()), 0.41328, max_relative = 1e-4);
    assert_relative_eq!(
        laser.photon_energy_j(),
        photon_energy_from_wavelength(3.0),
        max_relative = 1e-15
    );
    assert_relative_eq!(laser.photons_per_pulse(), 1.5102e17, max_relative = 1e-3);
}
