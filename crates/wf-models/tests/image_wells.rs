use proptest::prelude::*;
use wf_core::{AquiferParameters, Boundary, BoundaryAxis, BoundaryKind, Position, WellConfiguration};
use wf_models::{Bounded, Solution, Theis};

fn kind(constant_head: bool) -> BoundaryKind {
    if constant_head {
        BoundaryKind::ConstantHead
    } else {
        BoundaryKind::NoFlow
    }
}

proptest! {
    #[test]
    fn images_are_equidistant_from_the_boundary_line(
        offset in 1.0f64..500.0,
        x in -400.0f64..0.9,
        y in -400.0f64..400.0,
        along in -1000.0f64..1000.0,
        constant_head in any::<bool>(),
    ) {
        let boundary = Boundary::new(BoundaryAxis::X, offset, kind(constant_head)).unwrap();
        let aq = AquiferParameters::new(10.0, 1e-3).unwrap().with_boundary(boundary).unwrap();
        let well = WellConfiguration::at(x, y).unwrap();
        prop_assert!(Bounded.validate(&aq, &[well]).is_ok());

        let images = Bounded.image_wells(&aq, &well);
        prop_assert_eq!(images.len(), 1);
        let on_line = Position::new(offset, along);
        let real = well.position().distance_to(&on_line);
        let image = images[0].position.distance_to(&on_line);
        prop_assert!((real - image).abs() <= 1e-9 * real.max(1.0));
        prop_assert_eq!(images[0].sign, if constant_head { -1.0 } else { 1.0 });
    }

    #[test]
    fn corner_images_cancel_on_constant_head_lines(
        x in 1.0f64..99.0,
        y in 1.0f64..99.0,
        along in 0.0f64..100.0,
    ) {
        let aq = AquiferParameters::new(10.0, 1e-3)
            .unwrap()
            .with_boundary(Boundary::new(BoundaryAxis::X, 100.0, BoundaryKind::ConstantHead).unwrap())
            .unwrap()
            .with_boundary(Boundary::new(BoundaryAxis::Y, 100.0, BoundaryKind::NoFlow).unwrap())
            .unwrap();
        let well = WellConfiguration::at(x, y).unwrap();
        let images = Bounded.image_wells(&aq, &well);
        prop_assert_eq!(images.len(), 3);

        let on_line = Position::new(100.0, along);
        let d = |p: &Position| p.distance_to(&on_line);
        // real/x-image and y-image/corner pairs cancel on the line
        prop_assert!((d(&well.position()) - d(&images[0].position)).abs() < 1e-9);
        prop_assert!((d(&images[1].position) - d(&images[2].position)).abs() < 1e-9);
        prop_assert_eq!(images[0].sign, -1.0);
        prop_assert_eq!(images[1].sign + images[2].sign, 0.0);
    }
}

#[test]
fn unbounded_models_ignore_boundaries() {
    let boundary = Boundary::new(BoundaryAxis::Y, 50.0, BoundaryKind::NoFlow).unwrap();
    let aq = AquiferParameters::new(10.0, 1e-3).unwrap().with_boundary(boundary).unwrap();
    let well = WellConfiguration::at(0.0, 10.0).unwrap();
    assert!(Theis.image_wells(&aq, &well).is_empty());
    assert!(Theis.validate_point(&aq, &well, &Position::new(0.0, 80.0)).is_ok());
    assert!(Theis.validate_point(&aq, &well, &Position::new(0.0, 10.0)).is_err());
}
