// Task runner for the solver

use std::error::Error;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use nse_fd::{Navier, Solution};

use crate::preprocessing::{SimulationInput, initial::initial_state};

#[derive(Serialize)]
pub struct SimulationOutput {
    pub input: SimulationInput,
    pub solution: Solution,
}

/// Solve the configured run, reporting progress per frame
pub fn run(simulation_input: &SimulationInput) -> Result<SimulationOutput, Box<dyn Error>> {
    let params = simulation_input.grid_params()?;
    let state = initial_state(simulation_input);

    let mut sim = Navier::new(
        state.p,
        state.velocity,
        state.force,
        simulation_input.frames,
        params,
    )?;

    let bar = ProgressBar::new(sim.iter_count() as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "[Elapsed: {elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames (Remaining: {eta_precise})",
        )?
        .progress_chars("##-"),
    );

    for frame in sim.by_ref() {
        bar.set_position(frame as u64);
    }
    bar.finish();

    let solution = sim.into_solution();

    match solution.find_non_finite() {
        Some(cell) => warn!(
            "Solution contains non-finite values; first {:?} at frame {}, cell ({}, {})",
            cell.quantity, cell.frame, cell.i, cell.j
        ),
        None => info!("Solved {} frames", solution.frame_count()),
    }

    Ok(SimulationOutput {
        input: simulation_input.clone(),
        solution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_small_input() {
        let input = SimulationInput {
            size: (6, 6),
            frames: 4,
            ..SimulationInput::default()
        };

        let output = run(&input).unwrap();

        assert_eq!(output.solution.frame_count(), 4);
        assert_eq!(output.solution.u.dim(), (4, 6, 6));
        assert!(output.solution.find_non_finite().is_none());

        // constant forcing in x accelerates the interior
        assert!(output.solution.u.frame(3)[(2, 2)] > 0.);
    }

    #[test]
    fn test_run_rejects_invalid_input() {
        let input = SimulationInput {
            size: (6, 6),
            frames: 0,
            ..SimulationInput::default()
        };

        assert!(run(&input).is_err());
    }
}
