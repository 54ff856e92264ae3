// Pressure relaxation toward lower divergence of the provisional velocity.
//
// This is a diffusion-style update of the previous pressure, not a solve of
// ∇²p = ρ/Δt ∇⋅ũ; divergence is reduced but not driven to zero.

use crate::{
    ScalarField, VectorField,
    sim::{
        grid::GridParams,
        numeric::{delta_x, delta_y, interior_map, laplacian_at},
    },
};

/// Advance the pressure one step.
///
/// `p_next = (Δt/ρ) ∇²p - ∇⋅ũ + p` on interior cells.
///
/// Parameters
/// - `p` - The pressure at the current frame, edges pinned
/// - `tilde` - The provisional velocity `[tilde_u, tilde_v]`
/// - `params` - The grid parameters
///
/// Returns
/// - The next pressure; only interior cells are meaningful, edges are zero
pub fn relax(p: &ScalarField, tilde: &VectorField, params: &GridParams) -> ScalarField {
    let (tilde_u, tilde_v) = (&tilde[0], &tilde[1]);
    let (rows, cols) = p.shape();
    let GridParams {
        dx,
        dy,
        dt,
        density,
        ..
    } = *params;

    interior_map(rows, cols, |i, j| {
        let laplace_p = laplacian_at(p, i, j, dy, dx);
        let divergence = delta_x(tilde_u, i, j) / dx + delta_y(tilde_v, i, j) / dy;

        (dt / density) * laplace_p - divergence + p[(i, j)]
    })
}
