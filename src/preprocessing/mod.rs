use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use nse_fd::{GridParams, SchemeError};

pub mod cli;
pub mod initial;

/// Where results go after solving
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct OutputSettings {
    /// Write the input and the full solution here as JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_json: Option<PathBuf>,

    /// Write one PNG per frame and field here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames_dir: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationInput {
    pub size: (usize, usize),
    pub frames: usize,
    pub spacing: (f64, f64),
    pub dt: f64,
    pub density: f64,
    pub viscosity: f64,
    pub initial_pressure: f64,
    pub force: (f64, f64),
    pub noise: f64,
    pub seed: u64,
    pub output: OutputSettings,
}

impl Default for SimulationInput {
    fn default() -> Self {
        SimulationInput {
            size: (50, 50),
            frames: 120,
            spacing: (0.5, 0.5),
            dt: 0.01,
            density: 1.0,
            viscosity: 8.9e-4,
            initial_pressure: 1.0,
            force: (1.0, 0.0),
            noise: 0.0,
            seed: 0,
            output: OutputSettings::default(),
        }
    }
}

impl SimulationInput {
    pub fn grid_params(&self) -> Result<GridParams, SchemeError> {
        GridParams::new(
            self.size,
            self.spacing,
            self.dt,
            self.density,
            self.viscosity,
        )
    }

    pub fn log(&self) {
        info!(
            "Simulation is shown below:\n\n\
        \t grid:       {} x {} cells\n\
        \t frames:     {}\n\
        \t spacing:    < {}, {} >\n\
        \t time step:  {} s\n\
        \t density:    {}\n\
        \t viscosity:  {}\n\
        \t pressure:   {} (initial, uniform)\n\
        \t force:      < {}, {} >\n\
        \t noise:      {} (seed {})\n\n\
        ",
            self.size.0,
            self.size.1,
            self.frames,
            self.spacing.0,
            self.spacing.1,
            self.dt,
            self.density,
            self.viscosity,
            self.initial_pressure,
            self.force.0,
            self.force.1,
            self.noise,
            self.seed,
        );

        if let Ok(output_str) = serde_json::to_string_pretty(&self.output) {
            info!("Output settings are:\n\n{}", output_str);
        }
    }
}
