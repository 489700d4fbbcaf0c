//! Unit conversions between SI and the accelerator conventions used in the
//! model inputs (µs, mA, µm, eV, MeV).
//!
//! Each conversion has a scalar form and an `_all` form that maps a slice
//! elementwise; an empty slice yields an empty vector.

use crate::constants::{ELEMENTARY_CHARGE, MEV_TO_J};

macro_rules! conversion {
    ($(#[$doc:meta])* $name:ident, $name_all:ident, |$x:ident| $body:expr) => {
        $(#[$doc])*
        #[inline]
        pub fn $name($x: f64) -> f64 {
            $body
        }

        $(#[$doc])*
        pub fn $name_all(values: &[f64]) -> Vec<f64> {
            values.iter().map(|&v| $name(v)).collect()
        }
    };
}

conversion!(
    /// Microseconds to seconds.
    us_to_s, us_to_s_all, |x| x * 1e-6
);
conversion!(
    /// Seconds to microseconds.
    s_to_us, s_to_us_all, |x| x * 1e6
);
conversion!(
    /// Milliseconds to seconds.
    ms_to_s, ms_to_s_all, |x| x * 1e-3
);
conversion!(
    /// Milliamperes to amperes.
    ma_to_a, ma_to_a_all, |x| x * 1e-3
);
conversion!(
    /// Amperes to milliamperes.
    a_to_ma, a_to_ma_all, |x| x * 1e3
);
conversion!(
    /// Micrometres to metres.
    um_to_m, um_to_m_all, |x| x * 1e-6
);
conversion!(
    /// Metres to micrometres.
    m_to_um, m_to_um_all, |x| x * 1e6
);
conversion!(
    /// Electronvolts to joules.
    ev_to_j, ev_to_j_all, |x| x * ELEMENTARY_CHARGE
);
conversion!(
    /// Joules to electronvolts.
    j_to_ev, j_to_ev_all, |x| x / ELEMENTARY_CHARGE
);
conversion!(
    /// MeV to joules.
    mev_to_j, mev_to_j_all, |x| x * MEV_TO_J
);
