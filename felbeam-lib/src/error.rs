use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FelError {
    /// Physically invalid input, e.g. a non-positive rest energy or gradient.
    #[error("invalid {field}: {reason}")]
    Domain { field: &'static str, reason: String },

    /// An optional numeric capability was removed from the model.
    #[error("{0} capability is not available")]
    Dependency(&'static str),

    #[error("numeric integration did not converge on [{lower}, {upper}]: {reason}")]
    NumericIntegration {
        lower: f64,
        upper: f64,
        reason: String,
    },

    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    #[error("unknown particle: {0}")]
    UnknownParticle(String),

    #[error("invalid particle specification '{spec}': {reason}")]
    InvalidParticleSpec { spec: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl FelError {
    pub(crate) fn domain(field: &'static str, reason: impl Into<String>) -> Self {
        FelError::Domain {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FelError>;

/// Reject non-finite or non-positive values.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(FelError::domain(field, format!("must be positive, got {value}")))
    }
}

/// Reject non-finite or negative values.
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(FelError::domain(
            field,
            format!("must be non-negative, got {value}"),
        ))
    }
}
