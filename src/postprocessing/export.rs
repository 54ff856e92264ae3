// Persists a finished run as JSON

use std::{
    error::Error,
    fs::{self, File},
    io::BufWriter,
    path::Path,
};

use crate::task::SimulationOutput;

/// Write the input and every frame of `p`, `u`, `v` to `path`
pub fn save_json(output: &SimulationOutput, path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::{preprocessing::SimulationInput, task};

    #[test]
    fn test_save_json() {
        let input = SimulationInput {
            size: (4, 4),
            frames: 2,
            ..SimulationInput::default()
        };
        let output = task::run(&input).unwrap();

        let path = std::env::temp_dir().join("nse-fd-export-test").join("run.json");
        save_json(&output, &path).unwrap();

        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(saved["input"]["frames"], 2);
        assert!(saved["solution"]["p"].is_object());
        assert!(saved["solution"]["u"].is_object());

        fs::remove_file(&path).unwrap();
    }
}
