use std::{fs::File, io::BufWriter, process::exit};

extern crate nalgebra as na;

mod postprocessing;
mod preprocessing;
mod task;

use clap::Parser;
use tracing::{Level, error, info};

use preprocessing::cli::CliArgs;

fn main() {
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let simulation_input = args
        .create_input()
        .inspect_err(|err| error!("Failed to build simulation input: {err}"))
        .unwrap_or_else(|_| exit(1));

    simulation_input.log();

    if let Some(savepath) = &args.input_json_savepath {
        let saved = File::create(savepath)
            .map(BufWriter::new)
            .map_err(|err| err.to_string())
            .and_then(|writer| {
                serde_json::to_writer_pretty(writer, &simulation_input).map_err(|err| err.to_string())
            });

        match saved {
            Ok(()) => info!("Saved input file to {:?}", savepath),
            Err(err) => error!("Failed to save input file: {err}"),
        }
    }

    let sim_output = task::run(&simulation_input)
        .inspect_err(|err| error!("Simulation failed: {err}"))
        .unwrap_or_else(|_| exit(1));

    if let Err(err) = postprocessing::postprocess(&sim_output) {
        error!("Post-processing failed: {err}");
        exit(1);
    }
}
