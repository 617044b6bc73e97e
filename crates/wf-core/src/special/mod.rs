//! Special functions used by the Laplace-domain kernels.
//!
//! - Modified Bessel functions `I_0, I_1, K_0, K_1` of complex argument,
//!   plain and exponentially scaled
//! - Exponential integral `E_1` (Theis well function)

pub mod bessel;
pub mod expint;

pub use bessel::*;
pub use expint::*;
