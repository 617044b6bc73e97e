//! Well geometry and wellbore properties.

use crate::error::ParamResult;
use crate::numeric::{ensure_finite, ensure_non_negative};

/// Plan-view location (same length unit as all other lengths).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Pumping well description.
///
/// A radius of zero means a line source. Wellbore storage is the storage
/// coefficient `C = π r_c²` (area); skin is the dimensionless skin factor.
/// Values are validated by the builder methods and immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawWell")
)]
pub struct WellConfiguration {
    position: Position,
    radius: f64,
    wellbore_storage: f64,
    skin: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawWell {
    position: Position,
    #[serde(default)]
    radius: f64,
    #[serde(default)]
    wellbore_storage: f64,
    #[serde(default)]
    skin: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawWell> for WellConfiguration {
    type Error = crate::ParameterError;

    fn try_from(raw: RawWell) -> ParamResult<Self> {
        WellConfiguration::at(raw.position.x, raw.position.y)?
            .with_radius(raw.radius)?
            .with_wellbore_storage(raw.wellbore_storage)?
            .with_skin(raw.skin)
    }
}

impl Default for WellConfiguration {
    fn default() -> Self {
        Self {
            position: Position::ORIGIN,
            radius: 0.0,
            wellbore_storage: 0.0,
            skin: 0.0,
        }
    }
}

impl WellConfiguration {
    /// Line-source well at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line-source well at `(x, y)`.
    pub fn at(x: f64, y: f64) -> ParamResult<Self> {
        ensure_finite(x, "well x")?;
        ensure_finite(y, "well y")?;
        Ok(Self {
            position: Position::new(x, y),
            ..Self::default()
        })
    }

    pub fn with_radius(mut self, radius: f64) -> ParamResult<Self> {
        self.radius = ensure_non_negative(radius, "well radius")?;
        Ok(self)
    }

    pub fn with_wellbore_storage(mut self, storage: f64) -> ParamResult<Self> {
        self.wellbore_storage = ensure_non_negative(storage, "wellbore storage")?;
        Ok(self)
    }

    /// Wellbore storage from the casing radius, `C = π r_c²`.
    pub fn with_casing_radius(self, casing_radius: f64) -> ParamResult<Self> {
        let rc = ensure_non_negative(casing_radius, "casing radius")?;
        self.with_wellbore_storage(std::f64::consts::PI * rc * rc)
    }

    pub fn with_skin(mut self, skin: f64) -> ParamResult<Self> {
        self.skin = ensure_finite(skin, "skin factor")?;
        Ok(self)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn wellbore_storage(&self) -> f64 {
        self.wellbore_storage
    }

    pub fn skin(&self) -> f64 {
        self.skin
    }

    /// Same well properties, relocated. Used for image wells.
    pub fn relocated(&self, position: Position) -> Self {
        Self { position, ..*self }
    }

    pub fn is_line_source(&self) -> bool {
        self.radius == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParameterError;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn builder_validates() {
        let well = WellConfiguration::at(1.0, 2.0)
            .and_then(|w| w.with_radius(0.1))
            .and_then(|w| w.with_skin(-1.5))
            .unwrap();
        assert_eq!(well.radius(), 0.1);
        assert_eq!(well.skin(), -1.5);
        assert!(!well.is_line_source());

        assert!(matches!(
            WellConfiguration::new().with_radius(-0.1),
            Err(ParameterError::Negative { .. })
        ));
        assert!(WellConfiguration::at(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn casing_radius_sets_storage() {
        let well = WellConfiguration::new().with_casing_radius(0.1).unwrap();
        assert!((well.wellbore_storage() - std::f64::consts::PI * 0.01).abs() < 1e-15);
    }
}
