// Velocity correction by the relaxed pressure gradient

use crate::{
    ScalarField, VectorField,
    sim::{
        grid::GridParams,
        numeric::{delta_x, delta_y, interior_map, round_decimals},
    },
};

/// Fractional digits kept in corrected velocities
pub const VELOCITY_DECIMALS: i32 = 5;

/// Compute the next velocity field from the provisional one and the new
/// pressure, using forward pressure differences. Results are rounded to
/// `VELOCITY_DECIMALS` fractional digits.
///
/// Parameters
/// - `tilde` - The provisional velocity `[tilde_u, tilde_v]`
/// - `p_next` - The pressure of the frame being written, edges pinned
/// - `params` - The grid parameters
///
/// Returns
/// - `[u_next, v_next]`; edge rows and columns are zero
pub fn correct(tilde: &VectorField, p_next: &ScalarField, params: &GridParams) -> VectorField {
    let (tilde_u, tilde_v) = (&tilde[0], &tilde[1]);
    let (rows, cols) = p_next.shape();
    let GridParams {
        dx,
        dy,
        dt,
        density,
        ..
    } = *params;

    let u_next = interior_map(rows, cols, |i, j| {
        round_decimals(
            tilde_u[(i, j)] - dt * delta_x(p_next, i, j) / dx / density,
            VELOCITY_DECIMALS,
        )
    });

    let v_next = interior_map(rows, cols, |i, j| {
        round_decimals(
            tilde_v[(i, j)] - dt * delta_y(p_next, i, j) / dy / density,
            VELOCITY_DECIMALS,
        )
    });

    [u_next, v_next]
}

#[cfg(test)]
mod tests {
    use na::dmatrix;

    use super::*;

    #[test]
    fn test_correction_by_hand() {
        let tilde_u = ScalarField::from_element(3, 3, 0.1);
        let tilde_v = ScalarField::from_element(3, 3, -0.2);
        let p_next: ScalarField = dmatrix![
            0., 0., 0.;
            0., 1., 4.;
            0., 2., 0.;
        ];
        let params = GridParams::new((3, 3), (2., 0.5), 0.1, 4., 0.).unwrap();

        let [u_next, v_next] = correct(&[tilde_u, tilde_v], &p_next, &params);

        // 0.1 - 0.1 * (4 - 1) / 2 / 4
        assert_eq!(u_next[(1, 1)], 0.0625);
        // -0.2 - 0.1 * (2 - 1) / 0.5 / 4
        assert_eq!(v_next[(1, 1)], -0.25);
        assert_eq!(u_next[(2, 1)], 0.);
    }

    #[test]
    fn test_correction_rounds_to_five_decimals() {
        let tilde_u = ScalarField::from_element(3, 3, 1. / 3.);
        let tilde_v = ScalarField::from_element(3, 3, 2. / 3.);
        let p_next = ScalarField::zeros(3, 3);
        let params = GridParams::new((3, 3), (1., 1.), 1., 1., 0.).unwrap();

        let [u_next, v_next] = correct(&[tilde_u, tilde_v], &p_next, &params);

        assert_eq!(u_next[(1, 1)], 0.33333);
        assert_eq!(v_next[(1, 1)], 0.66667);
    }
}
