// Renders solution frames to greyscale PNGs

use std::{error::Error, fs, path::Path};

use plotters::prelude::*;

use nse_fd::{ScalarField, Solution};

/// Min-max normalise a field to `[0, 1]`. Constant fields map to zero.
fn normalise(field: &ScalarField) -> ScalarField {
    let (min, max) = (field.min(), field.max());
    let range = max - min;

    if !(range.is_finite() && range > 0.) {
        return ScalarField::zeros(field.nrows(), field.ncols());
    }

    field.map(|x| (x - min) / range)
}

/// Save a scalar field as a greyscale bitmap, one pixel per cell.
///
/// Parameters
/// - `bitmap` - The field to draw; row `i` becomes pixel row `i`
/// - `filename` - The file name inside `frames_dir`
/// - `frames_dir` - The output directory, which must exist
pub fn image_save(
    bitmap: &ScalarField,
    filename: &str,
    frames_dir: &Path,
) -> Result<(), Box<dyn Error>> {
    let (rows, cols) = bitmap.shape();

    let filename = frames_dir.join(filename);

    let root = BitMapBackend::new(&filename, (cols as u32, rows as u32)).into_drawing_area();
    root.fill(&WHITE)?;

    let bitmap = normalise(bitmap);

    for i in 0..rows {
        for j in 0..cols {
            let pixel_mag = bitmap.get((i, j)).ok_or("Pixel not on field")?;
            let pixel_intensity = (254.0 * pixel_mag).floor() as u8;
            let pixel_color = &RGBColor(pixel_intensity, pixel_intensity, pixel_intensity);

            root.draw_pixel((j as i32, i as i32), pixel_color)?;
        }
    }
    root.present()?;

    Ok(())
}

/// Write `pressure-{k}.png` and `velocity-{k}.png` (velocity magnitude) for
/// every frame. An existing `frames_dir` is replaced.
pub fn render_frames(solution: &Solution, frames_dir: &Path) -> Result<(), Box<dyn Error>> {
    if frames_dir.exists() {
        fs::remove_dir_all(frames_dir)?;
    }
    fs::create_dir_all(frames_dir)?;

    for k in 0..solution.frame_count() {
        let (u, v) = (solution.u.frame(k), solution.v.frame(k));

        let velocity_magnitude = (u.map(|x| x.powi(2)) + v.map(|y| y.powi(2))).map(|m| m.sqrt());

        image_save(&solution.p.frame(k), &format!("pressure-{k}.png"), frames_dir)?;
        image_save(&velocity_magnitude, &format!("velocity-{k}.png"), frames_dir)?;
    }

    Ok(())
}
