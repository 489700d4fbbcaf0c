pub mod alpha;
pub mod beam;
pub mod compton;
pub mod config;
pub mod constants;
pub mod deposition;
pub mod error;
pub mod grid;
pub mod kinematics;
pub mod materials;
pub(crate) mod materials_db;
pub mod particles;
pub mod physics;
pub mod profile;
pub mod quadrature;
pub mod units;

pub use beam::{BeamPulseParameters, LaserParameters};
pub use config::{AlphaMagnetConfig, BeamSpot, FelConfig, PhysicsConstants, QuadratureConfig, Tolerances};
pub use deposition::current_linspace;
pub use error::{FelError, Result};
pub use materials::{MaterialProperties, MaterialTable};
pub use particles::ParticleSpecies;
pub use physics::BeamPhysics;
pub use profile::{GaussianShape, ProfileShape};
pub use quadrature::{GaussKronrod, Quadrature, QuadratureEstimate};
pub use felbeam_data;
