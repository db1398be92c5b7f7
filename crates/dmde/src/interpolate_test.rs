use approx::assert_relative_eq;

use crate::error::DmdeError;
use crate::interpolate::LinearInterpolant;

#[test]
fn eval_interpolates_between_knots() {
    let f = LinearInterpolant::new(vec![0.0, 0.5, 1.0], vec![0.0, 2.0, 3.0]).unwrap();

    assert_relative_eq!(f.eval(0.25).unwrap(), 1.0);
    assert_relative_eq!(f.eval(0.75).unwrap(), 2.5);
}

#[test]
fn eval_hits_knots_exactly() {
    let f = LinearInterpolant::new(vec![0.0, 0.3, 1.0], vec![1.0, 7.0, 9.0]).unwrap();

    assert_eq!(f.eval(0.0).unwrap(), 1.0);
    assert_eq!(f.eval(0.3).unwrap(), 7.0);
    assert_eq!(f.eval(1.0).unwrap(), 9.0);
}

#[test]
fn eval_outside_domain_fails() {
    let f = LinearInterpolant::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();

    assert!(matches!(f.eval(-0.1), Err(DmdeError::OutOfRange { .. })));
    assert!(matches!(f.eval(1.1), Err(DmdeError::OutOfRange { .. })));
}

#[test]
fn new_rejects_non_monotone_knots() {
    let result = LinearInterpolant::new(vec![0.0, 0.5, 0.5, 1.0], vec![0.0, 1.0, 2.0, 3.0]);
    assert!(matches!(result, Err(DmdeError::Degenerate(_))));
}

#[test]
fn new_rejects_mismatched_or_short_input() {
    assert!(matches!(
        LinearInterpolant::new(vec![0.0, 1.0], vec![0.0]),
        Err(DmdeError::KnotMismatch { xs: 2, ys: 1 })
    ));
    assert!(LinearInterpolant::new(vec![0.0], vec![0.0]).is_err());
}

#[test]
fn domain_and_range() {
    let f = LinearInterpolant::new(vec![0.0, 0.4, 1.0], vec![5.0, -1.0, 3.0]).unwrap();
    assert_eq!(f.domain(), (0.0, 1.0));
    assert_eq!(f.range(), (-1.0, 5.0));
}
