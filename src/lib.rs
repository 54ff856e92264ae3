// Finite-difference time stepping for 2D incompressible viscous flow

extern crate nalgebra as na;

pub mod error;
pub mod sim;

use na::DMatrix;

/// A single time level of a scalar quantity, indexed `(i, j)`.
pub type ScalarField = DMatrix<f64>;

/// A pair of scalar fields; `[u, v]` for velocities.
pub type VectorField = [ScalarField; 2];

pub use error::SchemeError;
pub use sim::grid::{FrameSeries, GridParams, GridState};
pub use sim::navier::{Navier, NonFiniteCell, Solution, solve};
