//! Aquifer bounded by one or two perpendicular straight boundaries.
//!
//! The kernel is the confined one; the boundaries are represented by image
//! wells the superposition engine treats as ordinary sources. A no-flow
//! boundary mirrors the well with the same rate, a constant-head boundary
//! with the opposite rate. Two perpendicular boundaries add the corner image
//! with the product of both signs.

use crate::common::check_observation_distance;
use crate::error::ModelResult;
use crate::theis::Theis;
use crate::traits::{ImageWell, LaplaceKernel, Representation, Solution};
use wf_core::{AquiferParameters, Complex, ParamResult, ParameterError, Position, WellConfiguration};

#[derive(Clone, Copy, Debug, Default)]
pub struct Bounded;

impl LaplaceKernel for Bounded {
    fn evaluate(
        &self,
        p: Complex,
        r: f64,
        aquifer: &AquiferParameters,
        well: &WellConfiguration,
    ) -> ModelResult<Complex> {
        Theis.evaluate(p, r, aquifer, well)
    }
}

impl Solution for Bounded {
    fn id(&self) -> &'static str {
        "bounded"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["image_wells"]
    }

    fn description(&self) -> &'static str {
        "Confined aquifer with straight no-flow or constant-head boundaries (image wells)"
    }

    fn required_parameters(&self) -> &'static [&'static str] {
        &[
            "transmissivity",
            "storativity",
            "one or two perpendicular boundaries",
            "well radius (optional)",
        ]
    }

    fn validate(&self, aquifer: &AquiferParameters, wells: &[WellConfiguration]) -> ParamResult<()> {
        if aquifer.boundaries().is_empty() {
            return Err(ParameterError::Missing {
                what: "aquifer boundary",
            });
        }
        for well in wells {
            for boundary in aquifer.boundaries() {
                let clearance = boundary.clearance(&well.position());
                if clearance <= well.radius() || clearance <= 0.0 {
                    return Err(ParameterError::Inconsistent {
                        what: format!(
                            "well at ({}, {}) is {clearance} from a boundary, not beyond its radius {}",
                            well.position().x,
                            well.position().y,
                            well.radius()
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_point(
        &self,
        aquifer: &AquiferParameters,
        well: &WellConfiguration,
        point: &Position,
    ) -> ParamResult<()> {
        check_observation_distance(well, point)?;
        for boundary in aquifer.boundaries() {
            if boundary.clearance(point) < 0.0 {
                return Err(ParameterError::Inconsistent {
                    what: format!(
                        "observation point ({}, {}) lies outside the bounded aquifer",
                        point.x, point.y
                    ),
                });
            }
        }
        Ok(())
    }

    fn representation(&self) -> Representation<'_> {
        Representation::Laplace(self)
    }

    fn image_wells(&self, aquifer: &AquiferParameters, well: &WellConfiguration) -> Vec<ImageWell> {
        let origin = well.position();
        let boundaries = aquifer.boundaries();
        let mut images: Vec<ImageWell> = boundaries
            .iter()
            .map(|b| ImageWell {
                position: b.mirror(&origin),
                sign: b.kind().image_sign(),
            })
            .collect();
        if let [first, second] = boundaries {
            images.push(ImageWell {
                position: second.mirror(&first.mirror(&origin)),
                sign: first.kind().image_sign() * second.kind().image_sign(),
            });
        }
        images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::{Boundary, BoundaryAxis, BoundaryKind};

    fn aquifer(boundaries: &[Boundary]) -> AquiferParameters {
        boundaries
            .iter()
            .try_fold(AquiferParameters::new(100.0, 1e-4).unwrap(), |aq, b| aq.with_boundary(*b))
            .unwrap()
    }

    #[test]
    fn single_boundary_image() {
        let b = Boundary::new(BoundaryAxis::X, 100.0, BoundaryKind::NoFlow).unwrap();
        let aq = aquifer(&[b]);
        let well = WellConfiguration::at(20.0, 10.0).unwrap();
        let images = Bounded.image_wells(&aq, &well);
        assert_eq!(
            images,
            vec![ImageWell {
                position: Position::new(180.0, 10.0),
                sign: 1.0
            }]
        );
    }

    #[test]
    fn corner_image_takes_product_sign() {
        let river = Boundary::new(BoundaryAxis::X, 50.0, BoundaryKind::ConstantHead).unwrap();
        let wall = Boundary::new(BoundaryAxis::Y, -30.0, BoundaryKind::NoFlow).unwrap();
        let aq = aquifer(&[river, wall]);
        let images = Bounded.image_wells(&aq, &WellConfiguration::new());
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].position, Position::new(100.0, 0.0));
        assert_eq!(images[0].sign, -1.0);
        assert_eq!(images[1].position, Position::new(0.0, -60.0));
        assert_eq!(images[1].sign, 1.0);
        assert_eq!(images[2].position, Position::new(100.0, -60.0));
        assert_eq!(images[2].sign, -1.0);
    }

    #[test]
    fn geometry_validation() {
        let b = Boundary::new(BoundaryAxis::X, 10.0, BoundaryKind::NoFlow).unwrap();
        let aq = aquifer(&[b]);
        let inside = WellConfiguration::at(0.0, 0.0).unwrap();
        let too_wide = WellConfiguration::at(9.5, 0.0)
            .and_then(|w| w.with_radius(1.0))
            .unwrap();
        let outside = WellConfiguration::at(12.0, 0.0).unwrap();
        assert!(Bounded.validate(&aq, &[inside]).is_ok());
        assert!(Bounded.validate(&aq, &[too_wide]).is_err());
        assert!(Bounded.validate(&aq, &[outside]).is_err());
        assert!(Bounded.validate(&AquiferParameters::new(1.0, 1.0).unwrap(), &[inside]).is_err());

        assert!(Bounded.validate_point(&aq, &inside, &Position::new(10.0, 0.0)).is_ok());
        assert!(Bounded.validate_point(&aq, &inside, &Position::new(10.5, 0.0)).is_err());
    }
}
