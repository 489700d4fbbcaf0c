/// Elementary charge (C)
pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;

/// Speed of light in vacuum (m/s)
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Planck's constant (J·s)
pub const PLANCK: f64 = 6.62607015e-34;

/// Vacuum permittivity (F/m)
pub const VACUUM_PERMITTIVITY: f64 = 8.8541878128e-12;

/// Avogadro's number (mol^-1)
pub const AVOGADRO: f64 = 6.02214076e23;

/// Electron mass (kg)
pub const ELECTRON_MASS: f64 = 9.1093837015e-31;

/// Proton mass (kg)
pub const PROTON_MASS: f64 = 1.67262192369e-27;

/// Atomic mass unit (kg)
pub const ATOMIC_MASS_UNIT: f64 = 1.66053906660e-27;

/// Electron rest energy (MeV)
pub const ELECTRON_REST_ENERGY_MEV: f64 = 0.51099895;

/// Proton rest energy (MeV)
pub const PROTON_REST_ENERGY_MEV: f64 = 938.27208816;

/// MeV to Joules
pub const MEV_TO_J: f64 = 1.602176634e-13;

/// Default linac RF frequency (Hz)
pub const RF_FREQUENCY_DEFAULT: f64 = 2.856e9;

/// Default quadrupole gradient per unit current (T/A/m)
pub const QUAD_GRADIENT_DEFAULT: f64 = 2.694;

/// Alpha magnet entrance angle (degrees)
pub const ALPHA_THETA_DEG: f64 = 40.70991;

/// Alpha magnet path length coefficient: s = S·sqrt(βγ/g), m·sqrt(T/m)
pub const ALPHA_S_COEFF: f64 = 0.19165;

/// Alpha magnet excursion coefficient: x = X·sqrt(βγ/g), m·sqrt(T/m)
pub const ALPHA_X_COEFF: f64 = 0.07505;

/// Default alpha magnet gradient per unit current ((T/m)/A)
pub const ALPHA_GRADIENT_PER_AMP: f64 = 0.103754;

/// Default alpha magnet excitation current (A)
pub const ALPHA_NOMINAL_CURRENT: f64 = 17.5;
