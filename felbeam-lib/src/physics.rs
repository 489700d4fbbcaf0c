use std::sync::Arc;

use crate::config::{AlphaMagnetConfig, BeamSpot, FelConfig, PhysicsConstants, Tolerances};
use crate::error::{FelError, Result};
use crate::materials::{MaterialProperties, MaterialTable};
use crate::profile::{GaussianShape, ProfileShape};
use crate::quadrature::{GaussKronrod, Quadrature};

/// The main interface to the beam models.
///
/// Cheap to clone: the constants are plain values, the material table is
/// statically allocated, and the numeric capabilities are shared.
#[derive(Clone)]
pub struct BeamPhysics {
    constants: PhysicsConstants,
    tolerances: Tolerances,
    alpha_magnet: AlphaMagnetConfig,
    beam_spot: BeamSpot,
    materials: &'static MaterialTable,
    quadrature: Option<Arc<dyn Quadrature>>,
    profile_shape: Option<Arc<dyn ProfileShape>>,
}

impl BeamPhysics {
    pub fn new() -> Self {
        Self::build(&FelConfig::default())
    }

    /// Build from a configuration, rejecting it if [`FelConfig::validate`]
    /// fails.
    pub fn from_config(config: &FelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &FelConfig) -> Self {
        BeamPhysics {
            constants: config.constants,
            tolerances: config.tolerances,
            alpha_magnet: config.alpha_magnet,
            beam_spot: config.beam_spot,
            materials: MaterialTable::global(),
            quadrature: Some(Arc::new(GaussKronrod::from(config.quadrature))),
            profile_shape: Some(Arc::new(GaussianShape)),
        }
    }

    pub fn with_quadrature(mut self, quadrature: impl Quadrature + 'static) -> Self {
        self.quadrature = Some(Arc::new(quadrature));
        self
    }

    /// Drop the integration capability; threshold fractions then fail with
    /// [`FelError::Dependency`].
    pub fn without_quadrature(mut self) -> Self {
        self.quadrature = None;
        self
    }

    pub fn with_profile_shape(mut self, shape: impl ProfileShape + 'static) -> Self {
        self.profile_shape = Some(Arc::new(shape));
        self
    }

    pub fn without_profile_shape(mut self) -> Self {
        self.profile_shape = None;
        self
    }

    pub fn with_beam_spot(mut self, beam_spot: BeamSpot) -> Self {
        self.beam_spot = beam_spot;
        self
    }

    pub fn with_alpha_magnet(mut self, alpha_magnet: AlphaMagnetConfig) -> Self {
        self.alpha_magnet = alpha_magnet;
        self
    }

    pub fn constants(&self) -> &PhysicsConstants {
        &self.constants
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    pub fn alpha_magnet(&self) -> &AlphaMagnetConfig {
        &self.alpha_magnet
    }

    pub fn beam_spot(&self) -> &BeamSpot {
        &self.beam_spot
    }

    pub fn materials(&self) -> &'static MaterialTable {
        self.materials
    }

    pub fn material(&self, name: &str) -> Result<&'static MaterialProperties> {
        self.materials.get(name)
    }

    pub fn has_quadrature(&self) -> bool {
        self.quadrature.is_some()
    }

    pub(crate) fn quadrature(&self) -> Result<&dyn Quadrature> {
        self.quadrature
            .as_deref()
            .ok_or(FelError::Dependency("numeric integration"))
    }

    pub(crate) fn profile_shape(&self) -> Result<&dyn ProfileShape> {
        self.profile_shape
            .as_deref()
            .ok_or(FelError::Dependency("normal distribution"))
    }
}

impl Default for BeamPhysics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BeamPhysics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeamPhysics")
            .field("constants", &self.constants)
            .field("tolerances", &self.tolerances)
            .field("alpha_magnet", &self.alpha_magnet)
            .field("beam_spot", &self.beam_spot)
            .field("materials", &self.materials.names())
            .field("quadrature", &self.quadrature.is_some())
            .field("profile_shape", &self.profile_shape.is_some())
            .finish()
    }
}
