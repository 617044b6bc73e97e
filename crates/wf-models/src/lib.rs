//! wf-models: drawdown models for pumping tests.
//!
//! Every model is a [`Solution`]: a unit-rate step response given either as a
//! Laplace-domain kernel or as a time-domain radial integral, together with
//! parameter validation and numeric defaults. Models are pure and stateless;
//! the [`SolutionCatalog`] maps identifiers to shared instances.
//!
//! Built-in models:
//! - `theis`: confined, homogeneous, infinite
//! - `hantush` / `hantush_integral`: leaky confined
//! - `double_porosity`: fractured rock with matrix storage
//! - `bounded`: straight boundaries via image wells
//! - `zoned`: concentric zones and constant-head outer circle
//! - `wellbore_storage`: finite well with storage and skin
//! - `ext_theis_2d` / `ext_theis_3d`: log-normal conductivity fields upscaled into zones

pub mod boundary;
pub mod catalog;
pub mod common;
pub mod double_porosity;
pub mod error;
pub mod ext_theis;
pub mod leaky;
pub mod theis;
pub mod traits;
pub mod wellbore;
pub mod zoned;

// Re-exports
pub use boundary::Bounded;
pub use catalog::{ModelInfo, SolutionCatalog};
pub use double_porosity::DoublePorosity;
pub use error::{ModelError, ModelResult};
pub use ext_theis::{ExtTheis2d, ExtTheis3d, Upscaling, anisotropy_function};
pub use leaky::{Hantush, HantushIntegral, leaky_well_function};
pub use theis::{Theis, theis_drawdown};
pub use traits::{
    ImageWell, LaplaceKernel, NumericDefaults, RadialIntegral, Representation, RepresentationKind,
    Solution,
};
pub use wellbore::WellboreStorage;
pub use zoned::Zoned;
