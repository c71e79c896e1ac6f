/*!
The view of a host axis that locators and formatters need.
*/

/// The parts of a host chart axis that tick locators and formatters read.
///
/// Both intervals are in axis coordinates (days). The view interval is the
/// visible range. The data interval is the range spanned by the plotted data,
/// which is `(f64::INFINITY, f64::NEG_INFINITY)` when nothing is plotted.
pub trait Axis {
    /// Returns the visible range as `(min, max)`.
    ///
    /// The values are not required to be ordered.
    fn view_interval(&self) -> (f64, f64);

    /// Returns the range of the plotted data as `(min, max)`.
    fn data_interval(&self) -> (f64, f64);
}

impl<A: Axis + ?Sized> Axis for &A {
    fn view_interval(&self) -> (f64, f64) {
        (**self).view_interval()
    }

    fn data_interval(&self) -> (f64, f64) {
        (**self).data_interval()
    }
}

/// A standalone axis with explicitly set intervals.
///
/// This is useful for driving locators and formatters without a host chart,
/// for example in tests or when rendering ticks for a static image.
///
/// # Example
///
/// ```
/// use tdaxis::axis::{Axis, DummyAxis};
///
/// let mut axis = DummyAxis::new();
/// axis.set_view_interval(100.0, 241.0);
/// assert_eq!(axis.view_interval(), (100.0, 241.0));
/// assert_eq!(axis.data_interval(), (f64::INFINITY, f64::NEG_INFINITY));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DummyAxis {
    view: (f64, f64),
    data: (f64, f64),
}

impl DummyAxis {
    /// Creates an axis viewing `0..1` with no data.
    pub fn new() -> DummyAxis {
        DummyAxis {
            view: (0.0, 1.0),
            data: (f64::INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Sets the visible range.
    pub fn set_view_interval(&mut self, vmin: f64, vmax: f64) {
        self.view = (vmin, vmax);
    }

    /// Sets the range of the plotted data.
    pub fn set_data_interval(&mut self, vmin: f64, vmax: f64) {
        self.data = (vmin, vmax);
    }

    /// Extends the data range to include the given values.
    ///
    /// NaN values are ignored.
    pub fn update_data(&mut self, values: &[f64]) {
        for &x in values.iter().filter(|x| !x.is_nan()) {
            self.data.0 = self.data.0.min(x);
            self.data.1 = self.data.1.max(x);
        }
    }
}

impl Default for DummyAxis {
    fn default() -> DummyAxis {
        DummyAxis::new()
    }
}

impl Axis for DummyAxis {
    fn view_interval(&self) -> (f64, f64) {
        self.view
    }

    fn data_interval(&self) -> (f64, f64) {
        self.data
    }
}
