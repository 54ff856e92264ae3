use std::{error::Error, fs::File, io::BufReader, path::PathBuf};

use clap::Parser;
use tracing::info;

use crate::preprocessing::{OutputSettings, SimulationInput};

// Raw, CLI input
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    #[arg(long, help = "An input file with pre-loaded parameters.")]
    input_json: Option<PathBuf>,

    #[arg(long, help = "Optional path to save the resolved input file to.")]
    pub input_json_savepath: Option<PathBuf>,

    #[arg(long, help = "Write the input and solution arrays to this JSON file.")]
    output_json: Option<PathBuf>,

    #[arg(
        long,
        help = "An optional directory where pressure and velocity frames should be saved."
    )]
    frames_dir: Option<PathBuf>,

    #[arg(long, help = "Cells along the row (i) axis.", default_value = "50")]
    size_x: usize,

    #[arg(long, help = "Cells along the column (j) axis.", default_value = "50")]
    size_y: usize,

    #[arg(
        short,
        long,
        help = "Number of frames, including the initial one.",
        default_value = "120"
    )]
    frames: usize,

    #[arg(long, help = "Spacing paired with the column axis.", default_value = "0.5")]
    dx: f64,

    #[arg(long, help = "Spacing paired with the row axis.", default_value = "0.5")]
    dy: f64,

    #[arg(long, help = "Time step.", default_value = "0.01")]
    dt: f64,

    #[arg(long, default_value = "1.0", help = "Fluid density")]
    density: f64,

    #[arg(long, default_value = "0.00089", help = "Dynamic viscosity")]
    viscosity: f64,

    #[arg(long, default_value = "1.0", help = "Uniform initial pressure")]
    pressure: f64,

    #[arg(long, help = "Force x component, constant in space and time.", default_value = "1.0")]
    force_x: f64,

    #[arg(long, help = "Force y component, constant in space and time.", default_value = "0.0")]
    force_y: f64,

    #[arg(
        long,
        help = "Amplitude of uniform noise added to the initial interior velocity.",
        default_value = "0.0"
    )]
    noise: f64,

    #[arg(long, help = "Seed for the initial velocity noise.", default_value = "0")]
    seed: u64,

    #[arg(short, long, help = "Log every frame.")]
    pub verbose: bool,
}

impl CliArgs {
    pub fn create_input(&self) -> Result<SimulationInput, Box<dyn Error>> {
        // if the input file is supplied, just use that
        if let Some(input_filepath) = &self.input_json {
            if !input_filepath.exists() {
                return Err(format!("Input file {:?} does not exist.", input_filepath).into());
            }
            if input_filepath.is_dir() {
                return Err(format!("Input file {:?} is a directory.", input_filepath).into());
            }

            info!(
                "Using input file {}",
                input_filepath.to_str().unwrap_or("<unknown>")
            );

            let reader = BufReader::new(File::open(input_filepath)?);
            let mut loaded_input: SimulationInput = serde_json::from_reader(reader)?;

            // output flags override the file
            if self.output_json.is_some() {
                loaded_input.output.output_json = self.output_json.clone();
            }
            if self.frames_dir.is_some() {
                loaded_input.output.frames_dir = self.frames_dir.clone();
            }

            return Ok(loaded_input);
        }

        // otherwise, build the input from the other arguments
        Ok(SimulationInput {
            size: (self.size_x, self.size_y),
            frames: self.frames,
            spacing: (self.dx, self.dy),
            dt: self.dt,
            density: self.density,
            viscosity: self.viscosity,
            initial_pressure: self.pressure,
            force: (self.force_x, self.force_y),
            noise: self.noise,
            seed: self.seed,
            output: OutputSettings {
                output_json: self.output_json.clone(),
                frames_dir: self.frames_dir.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_input_defaults() {
        let args = CliArgs::parse_from(["nse-fd"]);
        let input = args.create_input().unwrap();

        assert_eq!(input, SimulationInput::default());
    }

    #[test]
    fn test_flags_build_input() {
        let args = CliArgs::parse_from([
            "nse-fd",
            "--size-x",
            "8",
            "--size-y",
            "6",
            "-f",
            "5",
            "--force-x",
            "0",
            "--noise",
            "0.1",
            "--frames-dir",
            "frames",
        ]);
        let input = args.create_input().unwrap();

        assert_eq!(input.size, (8, 6));
        assert_eq!(input.frames, 5);
        assert_eq!(input.force, (0.0, 0.0));
        assert_eq!(input.noise, 0.1);
        assert_eq!(input.output.frames_dir, Some(PathBuf::from("frames")));
    }

    #[test]
    fn test_missing_input_file() {
        let args = CliArgs::parse_from(["nse-fd", "--input-json", "/nonexistent/input.json"]);

        assert!(args.create_input().is_err());
    }
}
