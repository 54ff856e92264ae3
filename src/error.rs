//! Input validation errors for the time-stepping scheme.

use std::fmt;

use thiserror::Error;

/// Which dimension of a frame series or field disagreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Frames,
    SizeX,
    SizeY,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Frames => write!(f, "frames"),
            Dimension::SizeX => write!(f, "size_x"),
            Dimension::SizeY => write!(f, "size_y"),
        }
    }
}

/// Errors raised before the frame loop starts. No output is produced when
/// any of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemeError {
    /// An input array does not match the shape implied by the others.
    #[error("shape mismatch in `{field}` along {dimension}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Name of the offending input.
        field: &'static str,
        /// The dimension that disagreed.
        dimension: Dimension,
        /// Size required by the grid or frame count.
        expected: usize,
        /// Size actually supplied.
        actual: usize,
    },

    /// A physical or discretisation parameter would divide by zero or is not finite.
    #[error("parameter `{parameter}` must be a finite positive number, got {value}")]
    NonPositive {
        /// Parameter name.
        parameter: &'static str,
        /// Supplied value.
        value: f64,
    },

    /// Viscosity must be finite and non-negative.
    #[error("viscosity must be finite and non-negative, got {0}")]
    NegativeViscosity(f64),

    /// At least the initial frame is required.
    #[error("frame count must be at least 1")]
    ZeroFrames,

    /// An axis has no interior cells to update.
    #[error("grid axis {axis} has {size} cells; at least 3 are required")]
    GridTooSmall {
        /// The short axis.
        axis: Dimension,
        /// Its cell count.
        size: usize,
    },
}

impl SchemeError {
    /// Compare an actual extent against the expected one.
    pub(crate) fn check_extent(
        field: &'static str,
        dimension: Dimension,
        expected: usize,
        actual: usize,
    ) -> Result<(), SchemeError> {
        if expected == actual {
            Ok(())
        } else {
            Err(SchemeError::ShapeMismatch {
                field,
                dimension,
                expected,
                actual,
            })
        }
    }
}
