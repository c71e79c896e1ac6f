use crate::{
    locator::{self, TickLocator},
    util::{
        b,
        float::{floor_div, Edge},
    },
};

/// Places ticks at every integer multiple of a step.
///
/// The step is in days. One extra tick is placed before the first multiple
/// at or above the lower limit, and enough ticks follow to cover the upper
/// limit plus one more.
///
/// This is the tick generator behind the fixed and automatic locators, but
/// it can also be used on its own.
///
/// # Example
///
/// ```
/// use tdaxis::locator::MultipleLocator;
///
/// let locator = MultipleLocator::new(20.0);
/// let ticks = locator.locate(100.0, 241.0);
/// assert_eq!(ticks.first(), Some(&80.0));
/// assert_eq!(ticks.last(), Some(&260.0));
/// assert_eq!(ticks.len(), 10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MultipleLocator {
    step: f64,
}

impl MultipleLocator {
    /// Creates a locator with the given step, in days.
    ///
    /// The sign of the step is ignored.
    pub fn new(step: f64) -> MultipleLocator {
        MultipleLocator { step: step.abs() }
    }

    /// Returns the step between ticks, in days.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the tick locations for the given limits.
    ///
    /// Unlike [`TickLocator::tick_values`], this doesn't adjust degenerate
    /// ranges first. Limits that aren't finite (or a step that is zero or
    /// not finite) produce no ticks.
    ///
    /// At most a thousand ticks are returned. When the step would need more
    /// than that to cover the limits, it is multiplied by the smallest whole
    /// factor that brings the count under the limit, so every tick is still
    /// a multiple of the step.
    pub fn locate(&self, vmin: f64, vmax: f64) -> Vec<f64> {
        let mut step = self.step;
        if !(step > 0.0 && step.is_finite()) {
            return vec![];
        }
        let (vmin, vmax) =
            if vmax < vmin { (vmax, vmin) } else { (vmin, vmax) };
        loop {
            let start = Edge::new(step).ge(vmin) * step;
            let n = floor_div(vmax - start + 0.001 * step, step);
            let count = n + 3.0;
            if !count.is_finite() || count <= 0.0 {
                return vec![];
            }
            if count <= b::MAX_TICKS as f64 {
                let first = start - step;
                // Positive and no bigger than `MAX_TICKS`.
                let count = count as usize;
                return (0..count).map(|i| first + i as f64 * step).collect();
            }
            // Always at least 2, so this terminates.
            let factor = (count / b::MAX_TICKS as f64).ceil();
            warn!(
                "locating {count} ticks between {vmin} and {vmax} \
                 (step {step}) exceeds the maximum of {}, \
                 widening the step by a factor of {factor}",
                b::MAX_TICKS,
            );
            step *= factor;
            if !step.is_finite() {
                return vec![];
            }
        }
    }
}

impl TickLocator for MultipleLocator {
    fn tick_values(&mut self, vmin: f64, vmax: f64) -> Vec<f64> {
        self.locate(vmin, vmax)
    }

    fn nonsingular(&self, vmin: f64, vmax: f64) -> (f64, f64) {
        locator::nonsingular(vmin, vmax, 1e-6, 2.0 * self.step)
    }

    fn unit(&self) -> f64 {
        1.0
    }

    fn interval(&self) -> f64 {
        self.step
    }
}
