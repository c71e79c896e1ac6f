/*!
Tick formatters for axes of durations.

A formatter turns tick locations (in days) into labels. There are three:

* [`TimedeltaFormatter`] renders every tick with one explicit
  [`FormatSpec`], optionally relative to an offset that is shown once
  alongside the axis.
* [`ConciseTimedeltaFormatter`] asks its locator which unit ticks are being
  placed in, and picks a compact format plus an offset from a per-unit
  table. An axis ticked every two hours starting at 100 days reads
  `0:00, 2:00, 4:00, ...` with an offset of `100 days`.
* [`AutoTimedeltaFormatter`] also asks its locator for the current unit,
  but picks a self-contained format (without offset) from a table keyed by
  unit length.

# Example

This shows how the concise formatter follows the unit its locator picked:

```
use std::{cell::RefCell, rc::Rc};

use tdaxis::{
    axis::DummyAxis,
    formatter::{ConciseTimedeltaFormatter, TickFormatter},
    locator::{AutoTimedeltaLocator, TickLocator},
};

let mut axis = DummyAxis::new();
axis.set_view_interval(100.0, 101.0);
axis.set_data_interval(100.0, 101.0);

let locator = Rc::new(RefCell::new(AutoTimedeltaLocator::new()));
let mut formatter = ConciseTimedeltaFormatter::new(locator.clone());

let ticks = locator.borrow_mut().ticks(&axis);
let labels = formatter.format_ticks(&ticks, Some(&axis))?;
assert_eq!(labels[..4], ["-2:00", "0:00", "2:00", "4:00"]);
assert_eq!(formatter.offset(), "100 days");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use crate::{axis::Axis, Error};

pub use self::{
    auto::AutoTimedeltaFormatter,
    concise::{ConciseLevels, ConciseTimedeltaFormatter, OffsetFormat},
    timedelta::TimedeltaFormatter,
};

mod auto;
mod concise;
mod timedelta;

/// Turns tick locations into labels.
///
/// All values are axis coordinates, in days.
pub trait TickFormatter {
    /// Returns the label for a single value.
    ///
    /// `pos` is the index of the tick among the ticks being labeled, when
    /// known.
    fn format(&mut self, x: f64, pos: Option<usize>) -> Result<String, Error>;

    /// Returns the labels for a full set of ticks.
    ///
    /// The axis, when given, may be consulted for its data interval. The
    /// returned labels are in the same order as `values`. This may update
    /// the label returned by [`TickFormatter::offset`].
    fn format_ticks(
        &mut self,
        values: &[f64],
        axis: Option<&dyn Axis>,
    ) -> Result<Vec<String>, Error> {
        let _ = axis;
        values
            .iter()
            .enumerate()
            .map(|(i, &x)| self.format(x, Some(i)))
            .collect()
    }

    /// Returns the offset label computed by the last call to
    /// [`TickFormatter::format_ticks`].
    ///
    /// This is empty for formatters that don't use an offset.
    fn offset(&self) -> &str {
        ""
    }
}

/// Returns the smallest value that isn't NaN, if any.
fn min_finite(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values.into_iter().filter(|x| !x.is_nan()).reduce(f64::min)
}
