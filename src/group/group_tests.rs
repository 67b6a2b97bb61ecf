use nalgebra::{Point3, Vector3};

use crate::group::{generate_full_symmops, PointGroup, MAX_SYMMOPS};
use crate::symmetry::symmetry_operation::SymmetryOperation;

fn assert_closed(operations: &[SymmetryOperation], thresh: f64) {
    for op1 in operations {
        for op2 in operations {
            let product = op1.compose(op2);
            assert!(
                operations.iter().any(|op| op.approx_eq(&product, thresh)),
                "composition of two members is not in the set"
            );
        }
    }
}

#[test]
fn test_group_closure_c4() {
    let c4 = SymmetryOperation::from_origin_axis_angle(
        &Point3::origin(),
        &Vector3::new(0.0, 0.0, 1.0),
        90.0,
    );
    let symmops = generate_full_symmops(&[c4], 0.1);
    assert_eq!(symmops.len(), 4);
    assert_closed(&symmops, 0.1);
}

#[test]
fn test_group_closure_contains_identity() {
    // The identity must be present even when the generating set lacks it.
    let sigma = SymmetryOperation::reflection(&Vector3::new(1.0, 0.0, 0.0));
    let symmops = generate_full_symmops(&[sigma], 0.1);
    let identity = SymmetryOperation::identity();
    assert!(symmops.iter().any(|op| op.approx_eq(&identity, 0.1)));
    assert_eq!(symmops.len(), 2);

    let empty = generate_full_symmops(&[], 0.1);
    assert_eq!(empty.len(), 1);
    assert!(empty[0].approx_eq(&identity, 0.1));
}

#[test]
fn test_group_closure_c2h() {
    let c2 = SymmetryOperation::from_origin_axis_angle(
        &Point3::origin(),
        &Vector3::new(0.0, 0.0, 1.0),
        180.0,
    );
    let sigma_h = SymmetryOperation::reflection(&Vector3::new(0.0, 0.0, 1.0));
    let symmops = generate_full_symmops(&[c2, sigma_h], 0.1);
    // {E, C2, sigma_h, i}
    assert_eq!(symmops.len(), 4);
    assert_closed(&symmops, 0.1);
    let inversion = SymmetryOperation::inversion();
    assert!(symmops.iter().any(|op| op.approx_eq(&inversion, 0.1)));
}

#[test]
fn test_group_closure_ceiling() {
    // A rotation by an angle incommensurate with 360 degrees never closes;
    // the generator must stop at the safety ceiling instead of looping.
    let irrational = SymmetryOperation::from_origin_axis_angle(
        &Point3::origin(),
        &Vector3::new(0.0, 0.0, 1.0),
        360.0 / std::f64::consts::E,
    );
    let symmops = generate_full_symmops(&[irrational], 1e-7);
    assert_eq!(symmops.len(), MAX_SYMMOPS + 1);
}

#[test]
fn test_point_group_from_generators() {
    let c3 = SymmetryOperation::from_origin_axis_angle(
        &Point3::origin(),
        &Vector3::new(0.0, 0.0, 1.0),
        120.0,
    );
    let point_group = PointGroup::from_generators("C3", &[c3.clone()], 0.1);
    assert_eq!(point_group.sch_symbol(), "C3");
    assert_eq!(point_group.order(), 3);
    assert_eq!(point_group.to_string(), "C3");
    assert!(point_group.contains(&SymmetryOperation::identity()));
    assert!(point_group.contains(&c3.compose(&c3)));
    assert!(!point_group.contains(&SymmetryOperation::inversion()));
}
