// Builds initial conditions and the force series from the driver input

use ndarray::Array3;
use rand::{Rng, SeedableRng, rngs::StdRng};

use nse_fd::{FrameSeries, ScalarField, VectorField};

use crate::preprocessing::SimulationInput;

pub struct InitialState {
    pub p: ScalarField,
    pub velocity: VectorField,
    pub force: [FrameSeries; 2],
}

/// Uniform pressure, fluid at rest (plus optional interior noise) and a
/// force constant in space and time.
///
/// Parameters
/// - `input` - The driver input
///
/// Returns
/// - The fields to hand to the solver
pub fn initial_state(input: &SimulationInput) -> InitialState {
    let (rows, cols) = input.size;

    let p = ScalarField::from_element(rows, cols, input.initial_pressure);

    let mut u = ScalarField::zeros(rows, cols);
    let mut v = ScalarField::zeros(rows, cols);

    if input.noise > 0. {
        let mut rng = StdRng::seed_from_u64(input.seed);

        for i in 1..rows.saturating_sub(1) {
            for j in 1..cols.saturating_sub(1) {
                u[(i, j)] = rng.random_range(-input.noise..input.noise);
                v[(i, j)] = rng.random_range(-input.noise..input.noise);
            }
        }
    }

    let (fx, fy) = input.force;
    let force = [
        FrameSeries::from_array(Array3::from_elem((input.frames, rows, cols), fx)),
        FrameSeries::from_array(Array3::from_elem((input.frames, rows, cols), fy)),
    ];

    InitialState {
        p,
        velocity: [u, v],
        force,
    }
}
