// Navier-Stokes timestepping struct

use ndarray::Array3;
use serde::{Deserialize, Serialize};
use tracing::{Level, debug, info, warn};

use crate::{
    ScalarField, VectorField,
    error::SchemeError,
    sim::{
        boundary, corrector,
        grid::{FrameSeries, GridParams, GridState, check_field, check_series},
        numeric, predictor, pressure,
    },
};

/// The stored quantities of a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantity {
    Pressure,
    VelocityX,
    VelocityY,
}

/// The first cell found holding `NaN` or `±Inf`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonFiniteCell {
    pub quantity: Quantity,
    pub frame: usize,
    pub i: usize,
    pub j: usize,
}

/// The pressure and velocity series produced by a solve, each shaped
/// `(frame_count, size_x, size_y)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub p: FrameSeries,
    pub u: FrameSeries,
    pub v: FrameSeries,

    /// Recorded only when the finite check was enabled during the run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_non_finite: Option<NonFiniteCell>,
}

impl Solution {
    pub fn frame_count(&self) -> usize {
        self.p.frames()
    }

    /// Scan every frame, in order, for the first non-finite cell
    pub fn find_non_finite(&self) -> Option<NonFiniteCell> {
        (0..self.frame_count())
            .find_map(|k| first_non_finite_in_frame(&self.p, &self.u, &self.v, k))
    }
}

fn first_non_finite_in_frame(
    p: &FrameSeries,
    u: &FrameSeries,
    v: &FrameSeries,
    frame: usize,
) -> Option<NonFiniteCell> {
    [
        (Quantity::Pressure, p),
        (Quantity::VelocityX, u),
        (Quantity::VelocityY, v),
    ]
    .into_iter()
    .find_map(|(quantity, series)| {
        series
            .first_non_finite(frame)
            .map(|(i, j)| NonFiniteCell {
                quantity,
                frame,
                i,
                j,
            })
    })
}

/// High-level Navier-Stokes timestepping object. Owns the frame buffers and
/// steps through the fixed number of frames.
///
/// Each step applies the edge policy to frame `k`, predicts the provisional
/// velocity, relaxes the pressure and corrects the velocity, writing frame
/// `k + 1`. Iterating yields the index of each frame written.
pub struct Navier {
    /// Discretisation and fluid parameters
    params: GridParams,

    /// The initial pressure, whose edges pin every frame
    p_initial: ScalarField,

    /// External force series `[Fx, Fy]`
    force: [FrameSeries; 2],

    /// Pressure and velocity frame buffers
    state: GridState,

    /// The frame the next step reads from
    k: usize,

    /// Scan each written frame for non-finite values
    check_finite: bool,

    first_non_finite: Option<NonFiniteCell>,
}

impl Navier {
    /// Create a new solver instance, validating every input before any
    /// buffer is allocated.
    ///
    /// Parameters
    /// - `p_initial` - The initial pressure, shaped `(size_x, size_y)`
    /// - `velocity` - The initial `[u, v]`, same shape
    /// - `force` - `[Fx, Fy]`, each `(frame_count, size_x, size_y)`
    /// - `frame_count` - The number of frames to produce, including frame 0
    /// - `params` - The grid parameters; their shape must match the fields
    pub fn new(
        p_initial: ScalarField,
        velocity: VectorField,
        force: [FrameSeries; 2],
        frame_count: usize,
        params: GridParams,
    ) -> Result<Self, SchemeError> {
        if frame_count == 0 {
            return Err(SchemeError::ZeroFrames);
        }

        check_field("p_initial", &p_initial, &params)?;
        check_field("u_initial", &velocity[0], &params)?;
        check_field("v_initial", &velocity[1], &params)?;
        check_series("force_x", &force[0], frame_count, &params)?;
        check_series("force_y", &force[1], frame_count, &params)?;

        let state = GridState::new(frame_count, &p_initial, &velocity[0], &velocity[1]);

        Ok(Navier {
            params,
            p_initial,
            force,
            state,
            k: 0,
            check_finite: cfg!(debug_assertions),
            first_non_finite: None,
        })
    }

    /// Enable or disable the per-frame non-finite scan
    pub fn with_finite_check(mut self, enabled: bool) -> Self {
        self.check_finite = enabled;
        self
    }

    pub fn params(&self) -> &GridParams {
        &self.params
    }

    pub fn frame_count(&self) -> usize {
        self.state.p.frames()
    }

    /// The total number of steps, `frame_count - 1`
    pub fn iter_count(&self) -> usize {
        self.frame_count() - 1
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn first_non_finite(&self) -> Option<NonFiniteCell> {
        self.first_non_finite
    }

    /// Consume the solver, returning the frame buffers. Frames not yet
    /// stepped to are zero.
    pub fn into_solution(self) -> Solution {
        let GridState { p, u, v } = self.state;

        Solution {
            p,
            u,
            v,
            first_non_finite: self.first_non_finite,
        }
    }

    /// Apply the edge policy to frame `k` and return its working copies.
    /// Stored frame 0 keeps the initial condition exactly.
    fn set_bv(&mut self, k: usize) -> (ScalarField, VectorField) {
        let mut p = self.state.p.frame(k);
        let mut u = self.state.u.frame(k);
        let mut v = self.state.v.frame(k);

        boundary::pin_edges(&mut p, &self.p_initial);
        boundary::mirror_edges(&mut u);
        boundary::mirror_edges(&mut v);

        self.state.p.set_edges(k, &p);
        if k > 0 {
            self.state.u.set_edges(k, &u);
            self.state.v.set_edges(k, &v);
        }

        (p, [u, v])
    }

    /// Advance from frame `k` to frame `k + 1`
    fn step(&mut self, k: usize) {
        let (p, velocity) = self.set_bv(k);
        let force = [self.force[0].frame(k), self.force[1].frame(k)];

        // predict ũ
        let tilde: VectorField = predictor::predict(&velocity, &force, &self.params);

        // relax pressure
        let p_relaxed: ScalarField = pressure::relax(&p, &tilde, &self.params);
        self.state.p.set_interior(k + 1, &p_relaxed);

        let mut p_next = self.state.p.frame(k + 1);
        boundary::pin_edges(&mut p_next, &self.p_initial);
        self.state.p.set_edges(k + 1, &p_next);

        // compute next velocity field
        let [u_next, v_next] = corrector::correct(&tilde, &p_next, &self.params);
        self.state.u.set_interior(k + 1, &u_next);
        self.state.v.set_interior(k + 1, &v_next);

        if tracing::enabled!(Level::DEBUG) {
            let div = numeric::divergence(&[u_next, v_next], self.params.dy, self.params.dx);
            debug!(frame = k + 1, max_divergence = div.amax(), "frame written");
        }

        if self.check_finite && self.first_non_finite.is_none() {
            self.first_non_finite =
                first_non_finite_in_frame(&self.state.p, &self.state.u, &self.state.v, k + 1);

            if let Some(cell) = self.first_non_finite {
                warn!(
                    "{:?} went non-finite at frame {}, cell ({}, {})",
                    cell.quantity, cell.frame, cell.i, cell.j
                );
            }
        }
    }
}

impl Iterator for Navier {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.k + 1 >= self.frame_count() {
            return None;
        }

        self.step(self.k);
        self.k += 1;

        Some(self.k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.iter_count() - self.k;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Navier {}

/// Run the full time evolution.
///
/// Parameters
/// - `p_initial`, `u_initial`, `v_initial` - Initial fields, `(size_x, size_y)`
/// - `force_x`, `force_y` - Force series, `(frame_count, size_x, size_y)`
/// - `viscosity` - The dynamic viscosity; the kinematic viscosity is `viscosity / density`
/// - `density` - The fluid density
/// - `frame_count` - Frames to produce, including the initial one
/// - `dx`, `dy` - Spacing along the column and row axes
/// - `dt` - The time step
///
/// Returns
/// - The `(p, u, v)` series, or the first validation error; no partial output
#[allow(clippy::too_many_arguments)]
pub fn solve(
    p_initial: &ScalarField,
    u_initial: &ScalarField,
    v_initial: &ScalarField,
    force_x: &Array3<f64>,
    force_y: &Array3<f64>,
    viscosity: f64,
    density: f64,
    frame_count: usize,
    dx: f64,
    dy: f64,
    dt: f64,
) -> Result<Solution, SchemeError> {
    let params = GridParams::new(p_initial.shape(), (dx, dy), dt, density, viscosity)?;

    let mut navier = Navier::new(
        p_initial.clone(),
        [u_initial.clone(), v_initial.clone()],
        [
            FrameSeries::from_array(force_x.clone()),
            FrameSeries::from_array(force_y.clone()),
        ],
        frame_count,
        params,
    )?;

    info!(
        size_x = params.size_x,
        size_y = params.size_y,
        frame_count,
        dt,
        "starting solve"
    );

    let steps = navier.by_ref().count();

    info!(steps, "solve finished");

    Ok(navier.into_solution())
}
