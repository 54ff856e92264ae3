// Provisional velocity from diffusion, advection and forcing

use crate::{
    ScalarField, VectorField,
    sim::{
        grid::GridParams,
        numeric::{delta_x, delta_y, interior_map, laplacian_at},
    },
};

/// Advection of `u` at interior cell `(i, j)`:
/// `2u·Δx(u)/dx + v·Δy(u)/dy + u·Δy(v)/dy`
fn advection_u(u: &ScalarField, v: &ScalarField, i: usize, j: usize, dy: f64, dx: f64) -> f64 {
    let (uc, vc) = (u[(i, j)], v[(i, j)]);

    2. * uc * delta_x(u, i, j) / dx + vc * delta_y(u, i, j) / dy + uc * delta_y(v, i, j) / dy
}

/// Advection of `v` at interior cell `(i, j)`:
/// `u·Δx(v)/dx + v·Δx(u)/dx + 2v·Δy(v)/dy`
fn advection_v(u: &ScalarField, v: &ScalarField, i: usize, j: usize, dy: f64, dx: f64) -> f64 {
    let (uc, vc) = (u[(i, j)], v[(i, j)]);

    uc * delta_x(v, i, j) / dx + vc * delta_x(u, i, j) / dx + 2. * vc * delta_y(v, i, j) / dy
}

/// Project the next velocity field while neglecting the pressure gradient
/// influence; i.e. ũ
///
/// Parameters
/// - `velocity` - `[u, v]` at the current frame, edges already set
/// - `force` - `[Fx, Fy]` at the current frame
/// - `params` - The grid parameters
///
/// Returns
/// - `[tilde_u, tilde_v]`, with edge rows and columns left at zero
pub fn predict(velocity: &VectorField, force: &VectorField, params: &GridParams) -> VectorField {
    let (u, v) = (&velocity[0], &velocity[1]);
    let (fx, fy) = (&force[0], &force[1]);
    let (rows, cols) = u.shape();
    let GridParams {
        dx,
        dy,
        dt,
        kinematic_viscosity: nu,
        ..
    } = *params;

    let tilde_u = interior_map(rows, cols, |i, j| {
        let laplace_u = laplacian_at(u, i, j, dy, dx);
        let advect_u = advection_u(u, v, i, j, dy, dx);

        u[(i, j)] + dt * (fx[(i, j)] + nu * laplace_u - advect_u)
    });

    let tilde_v = interior_map(rows, cols, |i, j| {
        let laplace_v = laplacian_at(v, i, j, dy, dx);
        let advect_v = advection_v(u, v, i, j, dy, dx);

        v[(i, j)] + dt * (fy[(i, j)] + nu * laplace_v - advect_v)
    });

    [tilde_u, tilde_v]
}

#[cfg(test)]
mod tests {
    use na::dmatrix;

    use super::*;

    fn params(size: (usize, usize), viscosity: f64) -> GridParams {
        GridParams::new(size, (1., 1.), 1., 1., viscosity).unwrap()
    }

    #[test]
    fn test_uniform_rest_state_stays_at_rest() {
        let zero = ScalarField::zeros(5, 5);
        let velocity = [zero.clone(), zero.clone()];
        let force = [zero.clone(), zero.clone()];

        let [tilde_u, tilde_v] = predict(&velocity, &force, &params((5, 5), 0.3));

        assert_eq!(tilde_u, zero);
        assert_eq!(tilde_v, zero);
    }

    #[test]
    fn test_forcing_only_touches_interior() {
        let zero = ScalarField::zeros(4, 4);
        let velocity = [zero.clone(), zero.clone()];
        let force = [
            ScalarField::from_element(4, 4, 2.),
            ScalarField::from_element(4, 4, -1.),
        ];

        let params = GridParams::new((4, 4), (1., 1.), 0.5, 1., 0.).unwrap();
        let [tilde_u, tilde_v] = predict(&velocity, &force, &params);

        let expected_u: ScalarField = dmatrix![
            0., 0., 0., 0.;
            0., 1., 1., 0.;
            0., 1., 1., 0.;
            0., 0., 0., 0.;
        ];

        assert_eq!(tilde_u, expected_u);
        assert_eq!(tilde_v, -0.5 * expected_u);
    }

    #[test]
    fn test_stencil_by_hand() {
        let u: ScalarField = dmatrix![
            0., 0., 0.;
            0., 1., 2.;
            0., 3., 0.;
        ];
        let v: ScalarField = dmatrix![
            0., 0., 0.;
            0., 2., 1.;
            0., 0., 0.;
        ];
        let zero = ScalarField::zeros(3, 3);

        let [tilde_u, tilde_v] = predict(&[u, v], &[zero.clone(), zero], &params((3, 3), 1.));

        // laplace_u = (2 - 2 + 0) + (3 - 2 + 0) = 1
        // advect_u  = 2*1*(2-1) + 2*(3-1) + 1*(0-2) = 4
        // tilde_u   = 1 + (0 + 1 - 4)
        assert_eq!(tilde_u[(1, 1)], -2.);

        // laplace_v = (1 - 4 + 0) + (0 - 4 + 0) = -7
        // advect_v  = 1*(1-2) + 2*(2-1) + 2*2*(0-2) = -7
        // tilde_v   = 2 + (0 - 7 + 7)
        assert_eq!(tilde_v[(1, 1)], 2.);

        assert_eq!(tilde_u[(0, 1)], 0.);
        assert_eq!(tilde_v[(1, 2)], 0.);
    }
}
