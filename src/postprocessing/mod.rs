// Contains post-processers for persisting and rendering simulation results

pub mod export;
pub mod frames;

use std::error::Error;

use tracing::info;

use crate::task::SimulationOutput;

pub fn postprocess(sim_output: &SimulationOutput) -> Result<(), Box<dyn Error>> {
    let settings = &sim_output.input.output;

    if let Some(path) = &settings.output_json {
        export::save_json(sim_output, path)?;
        info!("Saved solution to {:?}", path);
    }

    if let Some(frames_dir) = &settings.frames_dir {
        frames::render_frames(&sim_output.solution, frames_dir)?;
        info!(
            "Rendered {} frames to {:?}",
            sim_output.solution.frame_count(),
            frames_dir
        );
    }

    Ok(())
}
