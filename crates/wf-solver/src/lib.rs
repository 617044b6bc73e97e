//! Numeric machinery shared by all drawdown models.
//!
//! - `laplace`: de Hoog inversion of Laplace-domain kernels
//! - `quadrature`: adaptive Gauss–Kronrod integration with semi-infinite tails
//! - `linear`: dense complex linear solve for piecewise radial models

pub mod error;
pub mod laplace;
pub mod linear;
pub mod quadrature;

pub use error::{SolverError, SolverResult};
pub use laplace::{InversionConfig, Inversion, LaplaceInverter};
pub use linear::solve_complex;
pub use quadrature::{QuadratureConfig, QuadratureEstimate, RadialQuadrature};
