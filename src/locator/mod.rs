/*!
Tick locators for axes of durations.

A locator decides where the ticks go. Every locator in this crate places
ticks at the multiples of some step (in days), with one extra tick on each
side of the requested range:

* [`MultipleLocator`] uses a step given directly in days.
* [`FixedTimedeltaLocator`] uses a fixed interval of a fixed [`BaseUnit`],
  like "every 20 minutes."
* [`AutoTimedeltaLocator`] picks the unit and interval from the span of the
  view, so that there are neither too few nor too many ticks.

Formatters need to know which unit a locator settled on, so locators are
usually shared between a formatter and the host axis as a
[`SharedLocator`].

[`BaseUnit`]: crate::unit::BaseUnit
*/

use std::{cell::RefCell, rc::Rc};

use crate::axis::Axis;

pub use self::{
    auto::AutoTimedeltaLocator, fixed::FixedTimedeltaLocator,
    multiple::MultipleLocator,
};

mod auto;
mod fixed;
mod multiple;

/// A locator that can be shared between a formatter and a host axis.
pub type SharedLocator = Rc<RefCell<dyn TickLocator>>;

/// Decides where ticks go on an axis of durations.
///
/// All values are axis coordinates, in days.
pub trait TickLocator {
    /// Returns the tick locations for the given view limits.
    ///
    /// The limits are not required to be ordered. The returned locations are
    /// ascending and may extend past the limits by one step on each side.
    fn tick_values(&mut self, vmin: f64, vmax: f64) -> Vec<f64>;

    /// Returns the tick locations for the current view of the given axis.
    fn ticks(&mut self, axis: &dyn Axis) -> Vec<f64> {
        let (vmin, vmax) = axis.view_interval();
        self.tick_values(vmin, vmax)
    }

    /// Adjusts a proposed range so that it is usable for locating ticks.
    ///
    /// Non-finite ranges are replaced by a window from one to two days, the
    /// limits are ordered and a range of (nearly) zero width is padded on
    /// both sides by twice the current step.
    fn nonsingular(&self, vmin: f64, vmax: f64) -> (f64, f64);

    /// Returns the length of one unit of this locator, in days.
    ///
    /// For example, a locator ticking in hours returns `1.0 / 24.0`.
    fn unit(&self) -> f64;

    /// Returns the number of units between ticks.
    fn interval(&self) -> f64;
}

/// The window used when a range has no finite limits (such as before any
/// data has been plotted).
const DEFAULT_RANGE: (f64, f64) = (1.0, 2.0);

/// Implements the degenerate range handling shared by every locator.
///
/// Ranges narrower than `min_width` are padded by `pad` on each side. A
/// `min_width` of zero only pads ranges of exactly zero width.
pub(crate) fn nonsingular(
    vmin: f64,
    vmax: f64,
    min_width: f64,
    pad: f64,
) -> (f64, f64) {
    if !vmin.is_finite() || !vmax.is_finite() {
        trace!(
            "replacing non-finite range {vmin}..{vmax} with {:?}",
            DEFAULT_RANGE,
        );
        return DEFAULT_RANGE;
    }
    let (vmin, vmax) = if vmax < vmin { (vmax, vmin) } else { (vmin, vmax) };
    let width = vmax - vmin;
    if width < min_width || width == 0.0 {
        trace!("padding degenerate range {vmin}..{vmax} by {pad}");
        return (vmin - pad, vmax + pad);
    }
    (vmin, vmax)
}
