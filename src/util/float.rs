/*!
Floating point helpers with the exact semantics that tick location relies on.

Tick positions are computed with floor division and remainders on `f64`
values. The results must be stable at the edges (for example, when a view
limit sits exactly on a tick) so these routines pin down precisely how
rounding works rather than relying on `f64::div_euclid`, which rounds
differently in some corner cases.
*/

/// Returns the floored quotient and the remainder of `x / y`.
///
/// The remainder always has the same sign as `y` (or is zero), and the
/// quotient is the mathematical floor of `x / y`, corrected for the rounding
/// error of the intermediate division.
pub(crate) fn divmod(x: f64, y: f64) -> (f64, f64) {
    let mut rem = x % y;
    let mut div = (x - rem) / y;
    if rem != 0.0 {
        if (y < 0.0) != (rem < 0.0) {
            rem += y;
            div -= 1.0;
        }
    } else {
        rem = 0.0f64.copysign(y);
    }
    let floordiv = if div != 0.0 {
        let mut floordiv = div.floor();
        if div - floordiv > 0.5 {
            floordiv += 1.0;
        }
        floordiv
    } else {
        0.0f64.copysign(x / y)
    };
    (floordiv, rem)
}

/// Returns the floored quotient of `x / y`.
pub(crate) fn floor_div(x: f64, y: f64) -> f64 {
    divmod(x, y).0
}

/// Rounds `x` to the given number of decimal digits.
///
/// Ties are rounded to even, which keeps values that are a hair off of a
/// whole number (because of accumulated floating point error) from being
/// pushed across it.
pub(crate) fn round_to_digits(x: f64, digits: i32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let scale = 10f64.powi(digits);
    let scaled = x * scale;
    if !scaled.is_finite() {
        return x;
    }
    let rounded = scaled.round_ties_even() / scale;
    if rounded.is_finite() {
        rounded
    } else {
        x
    }
}

/// An edge finder for a fixed step size.
///
/// This is how tick locators find the first multiple of a step that is at
/// or above some value, while tolerating a tiny amount of floating point
/// error. Without the tolerance, a view limit of
/// `0.30000000000000004` with a step of `0.1` would start at `0.4`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Edge {
    step: f64,
}

impl Edge {
    const TOLERANCE: f64 = 1e-10;

    pub(crate) fn new(step: f64) -> Edge {
        Edge { step: step.abs() }
    }

    fn close_to(&self, ms: f64, edge: f64) -> bool {
        (ms - edge).abs() < Edge::TOLERANCE
    }

    /// Returns the smallest `n` such that `n * step >= x`.
    pub(crate) fn ge(&self, x: f64) -> f64 {
        let (d, m) = divmod(x, self.step);
        if self.close_to(m / self.step, 0.0) {
            d
        } else {
            d + 1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divmod_signs() {
        assert_eq!(divmod(7.0, 2.0), (3.0, 1.0));
        assert_eq!(divmod(-7.0, 2.0), (-4.0, 1.0));
        assert_eq!(divmod(7.0, -2.0), (-4.0, -1.0));
        assert_eq!(divmod(-7.0, -2.0), (3.0, -1.0));
        assert_eq!(divmod(6.0, 2.0), (3.0, 0.0));
        assert_eq!(floor_div(141.02, 20.0), 7.0);
    }

    #[test]
    fn edges() {
        let edge = Edge::new(0.1);
        assert_eq!(edge.ge(0.30000000000000004), 3.0);
        assert_eq!(edge.ge(0.35), 4.0);

        let edge = Edge::new(20.0);
        assert_eq!(edge.ge(100.0), 5.0);
        assert_eq!(edge.ge(100.15), 6.0);
        assert_eq!(edge.ge(-5.0), 0.0);
    }

    #[test]
    fn rounding_digits() {
        assert_eq!(round_to_digits(99.99999999999999, 13), 100.0);
        assert_eq!(round_to_digits(0.125, 13), 0.125);
        assert_eq!(round_to_digits(-1.5, 0), -2.0);
        assert_eq!(round_to_digits(2.5, 0), 2.0);
        assert!(round_to_digits(f64::NAN, 13).is_nan());
        assert_eq!(round_to_digits(f64::INFINITY, 13), f64::INFINITY);
    }
}
