// Numeric approximations
//
// Axis convention: the column index `j` is paired with `dx`, the row index
// `i` with `dy`.

use crate::{ScalarField, VectorField};

/// Forward difference of `field` along the column axis at `(i, j)`, undivided:
/// `f[i][j+1] - f[i][j]`
#[inline]
pub fn delta_x(field: &ScalarField, i: usize, j: usize) -> f64 {
    field[(i, j + 1)] - field[(i, j)]
}

/// Forward difference of `field` along the row axis at `(i, j)`, undivided:
/// `f[i+1][j] - f[i][j]`
#[inline]
pub fn delta_y(field: &ScalarField, i: usize, j: usize) -> f64 {
    field[(i + 1, j)] - field[(i, j)]
}

/// Five-point laplacian of a scalar field at interior cell `(i, j)`. That is ∇²f
///
/// Mathematically, this is ∇²f = ∂²f/∂x² + ∂²f/∂y², with second-order
/// central differences.
///
/// Parameters:
/// - `field` - The field to take the laplacian of
/// - `i`, `j` - An interior cell; all four neighbours must exist
/// - `dy` - The row-axis step size
/// - `dx` - The column-axis step size
pub fn laplacian_at(field: &ScalarField, i: usize, j: usize, dy: f64, dx: f64) -> f64 {
    let centre = field[(i, j)];

    (field[(i, j + 1)] - 2. * centre + field[(i, j - 1)]) / dx.powi(2)
        + (field[(i + 1, j)] - 2. * centre + field[(i - 1, j)]) / dy.powi(2)
}

/// Build a field by evaluating `cell` on every interior cell; edge rows and
/// columns stay zero.
pub fn interior_map<F>(rows: usize, cols: usize, mut cell: F) -> ScalarField
where
    F: FnMut(usize, usize) -> f64,
{
    let mut out = ScalarField::zeros(rows, cols);

    for i in 1..rows.saturating_sub(1) {
        for j in 1..cols.saturating_sub(1) {
            out[(i, j)] = cell(i, j);
        }
    }

    out
}

/// Forward-difference divergence of F=<u,v> on interior cells. That is ∇⋅F
///
/// Mathematically, this is du/dx + dv/dy. Edge cells are zero.
///
/// Parameters:
/// - `field` - The `VectorField` to take the divergence of
/// - `dy` - The row-axis step size
/// - `dx` - The column-axis step size
pub fn divergence(field: &VectorField, dy: f64, dx: f64) -> ScalarField {
    let (u, v) = (&field[0], &field[1]);
    let (rows, cols) = u.shape();

    interior_map(rows, cols, |i, j| {
        delta_x(u, i, j) / dx + delta_y(v, i, j) / dy
    })
}

/// Round half-to-even at `places` fractional decimal digits. Non-finite
/// values pass through unchanged.
pub fn round_decimals(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round_ties_even() / scale
}
