// Grid parameters and the preallocated frame buffers

use ndarray::{Array3, Axis, s};
use serde::{Deserialize, Serialize};

use crate::{
    ScalarField,
    error::{Dimension, SchemeError},
};

/// Immutable discretisation and fluid parameters for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridParams {
    /// Number of cells along the row axis (`i`)
    pub size_x: usize,

    /// Number of cells along the column axis (`j`)
    pub size_y: usize,

    /// Spacing paired with the column index `j`
    pub dx: f64,

    /// Spacing paired with the row index `i`
    pub dy: f64,

    /// Time step
    pub dt: f64,

    /// Fluid density
    pub density: f64,

    /// Kinematic viscosity, `viscosity / density`
    pub kinematic_viscosity: f64,
}

impl GridParams {
    /// Validate and build the parameter set.
    ///
    /// Parameters
    /// - `size` - The cell counts `(size_x, size_y)`
    /// - `spacing` - The cell spacing `(dx, dy)`
    /// - `dt` - The time step
    /// - `density` - The fluid density
    /// - `viscosity` - The dynamic viscosity; divided by `density` here
    pub fn new(
        size: (usize, usize),
        spacing: (f64, f64),
        dt: f64,
        density: f64,
        viscosity: f64,
    ) -> Result<Self, SchemeError> {
        let (size_x, size_y) = size;
        let (dx, dy) = spacing;

        for (axis, size) in [(Dimension::SizeX, size_x), (Dimension::SizeY, size_y)] {
            if size < 3 {
                return Err(SchemeError::GridTooSmall { axis, size });
            }
        }

        for (parameter, value) in [("dx", dx), ("dy", dy), ("dt", dt), ("density", density)] {
            if !(value.is_finite() && value > 0.) {
                return Err(SchemeError::NonPositive { parameter, value });
            }
        }

        if !(viscosity.is_finite() && viscosity >= 0.) {
            return Err(SchemeError::NegativeViscosity(viscosity));
        }

        Ok(GridParams {
            size_x,
            size_y,
            dx,
            dy,
            dt,
            density,
            kinematic_viscosity: viscosity / density,
        })
    }

    /// The spatial shape `(size_x, size_y)`
    pub fn shape(&self) -> (usize, usize) {
        (self.size_x, self.size_y)
    }
}

/// A time series of scalar fields stored contiguously, indexed `(k, i, j)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSeries {
    data: Array3<f64>,
}

impl FrameSeries {
    /// Zero-filled series of `frames` slices shaped `(rows, cols)`
    pub fn zeros(frames: usize, rows: usize, cols: usize) -> Self {
        FrameSeries {
            data: Array3::zeros((frames, rows, cols)),
        }
    }

    /// Zero-filled series whose frame 0 is an exact copy of `initial`
    pub fn with_initial(frames: usize, initial: &ScalarField) -> Self {
        let (rows, cols) = initial.shape();
        let mut series = Self::zeros(frames, rows, cols);
        series.set_frame(0, initial);
        series
    }

    /// Wrap an existing `(frames, rows, cols)` array
    pub fn from_array(data: Array3<f64>) -> Self {
        FrameSeries { data }
    }

    /// `(frames, rows, cols)`
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    pub fn frames(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn as_array(&self) -> &Array3<f64> {
        &self.data
    }

    pub fn into_array(self) -> Array3<f64> {
        self.data
    }

    /// Copy frame `k` out as a `ScalarField`
    pub fn frame(&self, k: usize) -> ScalarField {
        let slice = self.data.index_axis(Axis(0), k);
        let (rows, cols) = slice.dim();

        ScalarField::from_fn(rows, cols, |i, j| slice[[i, j]])
    }

    /// Overwrite every cell of frame `k`
    pub fn set_frame(&mut self, k: usize, field: &ScalarField) {
        let mut slice = self.data.index_axis_mut(Axis(0), k);

        for ((i, j), cell) in slice.indexed_iter_mut() {
            *cell = field[(i, j)];
        }
    }

    /// Overwrite the interior cells `[1, size-2]` of frame `k`, leaving edges untouched
    pub fn set_interior(&mut self, k: usize, field: &ScalarField) {
        let (_, rows, cols) = self.data.dim();
        let mut interior = self.data.slice_mut(s![k, 1..rows - 1, 1..cols - 1]);

        for ((i, j), cell) in interior.indexed_iter_mut() {
            *cell = field[(i + 1, j + 1)];
        }
    }

    /// Overwrite the four edge rows/columns of frame `k`, leaving the interior untouched
    pub fn set_edges(&mut self, k: usize, field: &ScalarField) {
        let (_, rows, cols) = self.data.dim();

        for j in 0..cols {
            self.data[[k, 0, j]] = field[(0, j)];
            self.data[[k, rows - 1, j]] = field[(rows - 1, j)];
        }
        for i in 0..rows {
            self.data[[k, i, 0]] = field[(i, 0)];
            self.data[[k, i, cols - 1]] = field[(i, cols - 1)];
        }
    }

    /// The first non-finite cell of frame `k`, scanning row by row
    pub fn first_non_finite(&self, k: usize) -> Option<(usize, usize)> {
        self.data
            .index_axis(Axis(0), k)
            .indexed_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(idx, _)| idx)
    }
}

/// The owned pressure and velocity series for one solve.
#[derive(Debug, Clone)]
pub struct GridState {
    pub p: FrameSeries,
    pub u: FrameSeries,
    pub v: FrameSeries,
}

impl GridState {
    /// Allocate `frames` zeroed slices per quantity, with frame 0 set to the
    /// initial conditions.
    pub fn new(
        frames: usize,
        p_initial: &ScalarField,
        u_initial: &ScalarField,
        v_initial: &ScalarField,
    ) -> Self {
        GridState {
            p: FrameSeries::with_initial(frames, p_initial),
            u: FrameSeries::with_initial(frames, u_initial),
            v: FrameSeries::with_initial(frames, v_initial),
        }
    }
}

/// Check that a field has the grid's spatial shape.
pub(crate) fn check_field(
    name: &'static str,
    field: &ScalarField,
    params: &GridParams,
) -> Result<(), SchemeError> {
    let (rows, cols) = field.shape();
    SchemeError::check_extent(name, Dimension::SizeX, params.size_x, rows)?;
    SchemeError::check_extent(name, Dimension::SizeY, params.size_y, cols)
}

/// Check that a series has `frames` slices of the grid's spatial shape.
pub(crate) fn check_series(
    name: &'static str,
    series: &FrameSeries,
    frames: usize,
    params: &GridParams,
) -> Result<(), SchemeError> {
    let (n, rows, cols) = series.dim();
    SchemeError::check_extent(name, Dimension::Frames, frames, n)?;
    SchemeError::check_extent(name, Dimension::SizeX, params.size_x, rows)?;
    SchemeError::check_extent(name, Dimension::SizeY, params.size_y, cols)
}

#[cfg(test)]
mod tests {
    use na::dmatrix;

    use super::*;

    #[test]
    fn test_params_derive_kinematic_viscosity() {
        let params = GridParams::new((5, 4), (0.5, 0.25), 0.01, 2.0, 8.0e-4).unwrap();

        assert_eq!(params.shape(), (5, 4));
        assert_eq!(params.kinematic_viscosity, 4.0e-4);
    }

    #[test]
    fn test_params_reject_degenerate() {
        assert_eq!(
            GridParams::new((5, 5), (1., 1.), 1., 0., 1.),
            Err(SchemeError::NonPositive {
                parameter: "density",
                value: 0.
            })
        );
        assert_eq!(
            GridParams::new((5, 5), (1., 0.), 1., 1., 1.),
            Err(SchemeError::NonPositive {
                parameter: "dy",
                value: 0.
            })
        );
        assert!(matches!(
            GridParams::new((5, 5), (1., 1.), f64::NAN, 1., 1.),
            Err(SchemeError::NonPositive { parameter: "dt", .. })
        ));
        assert_eq!(
            GridParams::new((5, 5), (1., 1.), 1., 1., -1.),
            Err(SchemeError::NegativeViscosity(-1.))
        );
        assert_eq!(
            GridParams::new((5, 2), (1., 1.), 1., 1., 0.),
            Err(SchemeError::GridTooSmall {
                axis: Dimension::SizeY,
                size: 2
            })
        );
    }

    #[test]
    fn test_frame_series_initial_copy() {
        let initial = dmatrix![
            1., 2., 3.;
            4., 5., 6.;
            7., 8., 9.;
        ];

        let series = FrameSeries::with_initial(3, &initial);

        assert_eq!(series.dim(), (3, 3, 3));
        assert_eq!(series.frame(0), initial);
        assert_eq!(series.frame(1), ScalarField::zeros(3, 3));
        assert_eq!(series.as_array()[[0, 1, 2]], 6.);
    }

    #[test]
    fn test_interior_and_edge_writes_are_disjoint() {
        let field = ScalarField::from_element(4, 4, 7.);
        let mut series = FrameSeries::zeros(2, 4, 4);

        series.set_interior(1, &field);

        let expected_interior = dmatrix![
            0., 0., 0., 0.;
            0., 7., 7., 0.;
            0., 7., 7., 0.;
            0., 0., 0., 0.;
        ];
        assert_eq!(series.frame(1), expected_interior);

        series.set_edges(1, &ScalarField::from_element(4, 4, 2.));

        let expected_full = dmatrix![
            2., 2., 2., 2.;
            2., 7., 7., 2.;
            2., 7., 7., 2.;
            2., 2., 2., 2.;
        ];
        assert_eq!(series.frame(1), expected_full);
        assert_eq!(series.frame(0), ScalarField::zeros(4, 4));
    }

    #[test]
    fn test_first_non_finite() {
        let mut field = ScalarField::zeros(3, 4);
        field[(1, 2)] = f64::NAN;
        field[(2, 0)] = f64::INFINITY;

        let series = FrameSeries::with_initial(1, &field);

        assert_eq!(series.first_non_finite(0), Some((1, 2)));
    }

    #[test]
    fn test_series_shape_checks() {
        let params = GridParams::new((4, 5), (1., 1.), 1., 1., 0.).unwrap();
        let series = FrameSeries::zeros(3, 4, 6);

        assert_eq!(
            check_series("force_x", &series, 3, &params),
            Err(SchemeError::ShapeMismatch {
                field: "force_x",
                dimension: Dimension::SizeY,
                expected: 5,
                actual: 6,
            })
        );
        assert!(check_field("p_initial", &ScalarField::zeros(4, 5), &params).is_ok());
    }
}
