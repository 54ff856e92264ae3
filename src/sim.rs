// Pressure/velocity time stepping: boundary pass, prediction, pressure
// relaxation and correction, sequenced by `navier::Navier`.

pub mod boundary;
pub mod corrector;
pub mod grid;
pub mod navier;
pub mod numeric;
pub mod predictor;
pub mod pressure;
