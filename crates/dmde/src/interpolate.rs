//! Piecewise-linear interpolation over strictly increasing knots.

use crate::error::{DmdeError, Result};

/// Piecewise-linear interpolant y(x) defined on `[x_0, x_n]`
///
/// Knots must be finite and strictly increasing in `x`. Queries outside the
/// knot range fail instead of extrapolating.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolant {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolant {
    /// Builds an interpolant from paired knots
    ///
    /// # Examples
    ///
    /// ```
    /// use dmde::LinearInterpolant;
    ///
    /// let f = LinearInterpolant::new(vec![0.0, 1.0, 2.0], vec![0.0, 10.0, 0.0]).unwrap();
    /// assert_eq!(f.eval(0.5).unwrap(), 5.0);
    /// assert!(f.eval(2.5).is_err());
    /// ```
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(DmdeError::KnotMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        if xs.len() < 2 {
            return Err(DmdeError::Degenerate(format!(
                "interpolant needs at least two knots, got {}",
                xs.len()
            )));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(DmdeError::Degenerate("non-finite knot".to_string()));
        }
        if let Some(pair) = xs.windows(2).find(|w| w[1] <= w[0]) {
            return Err(DmdeError::Degenerate(format!(
                "knots not strictly increasing at {} -> {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self { xs, ys })
    }

    /// Evaluates the interpolant at `x`
    pub fn eval(&self, x: f64) -> Result<f64> {
        let (min, max) = self.domain();
        if !(min..=max).contains(&x) {
            return Err(DmdeError::OutOfRange { x, min, max });
        }

        // First knot >= x; x lies in (xs[i-1], xs[i]]
        let i = self.xs.partition_point(|&v| v < x);
        if self.xs[i] == x {
            return Ok(self.ys[i]);
        }
        let (x0, x1) = (self.xs[i - 1], self.xs[i]);
        let (y0, y1) = (self.ys[i - 1], self.ys[i]);
        Ok(y0 + (x - x0) * (y1 - y0) / (x1 - x0))
    }

    /// Closed interval the interpolant is defined on
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Smallest and largest knot value
    pub fn range(&self) -> (f64, f64) {
        self.ys
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &y| {
                (lo.min(y), hi.max(y))
            })
    }

    pub fn knots_x(&self) -> &[f64] {
        &self.xs
    }

    pub fn knots_y(&self) -> &[f64] {
        &self.ys
    }
}
