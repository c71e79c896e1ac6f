/*!
Converters that describe an axis of durations to a host chart.

A host chart asks a converter two things about the values plotted on an
axis: how the axis should be set up ([`AxisConverter::axis_info`]) and
where each value goes ([`AxisConverter::convert`]). This crate provides two
converters, differing only in how ticks are labeled:

* [`TimedeltaConverter`] labels every tick in full, using an
  [`AutoTimedeltaFormatter`].
* [`ConciseTimedeltaConverter`] labels ticks compactly with an offset, using
  a [`ConciseTimedeltaFormatter`].

Both place ticks with a fresh [`AutoTimedeltaLocator`] for every axis and
default the axis to a view from one to two days.

# Example

```
use tdaxis::{
    axis::DummyAxis,
    codec::Timedeltas,
    converter::{AxisConverter, AxisValue, ConciseTimedeltaConverter},
    formatter::TickFormatter,
    locator::TickLocator,
    Timedelta,
};

let converter = ConciseTimedeltaConverter::new();
let values = Timedeltas::from(vec![
    Timedelta::from_hours(2),
    Timedelta::from_hours(20),
]);
let xs = converter.convert(&AxisValue::Sequence(&values)).into_vec();

let mut info = converter.axis_info();
let mut axis = DummyAxis::new();
axis.set_view_interval(xs[0], xs[1]);
let ticks = info.major_locator.borrow_mut().ticks(&axis);
let labels = info.major_formatter.format_ticks(&ticks, Some(&axis))?;
assert_eq!(labels[..3], ["0:00", "2:00", "4:00"]);
assert_eq!(info.major_formatter.offset(), "0 days");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use std::{cell::RefCell, rc::Rc};

use crate::{
    codec::{self, TimedeltaLike, Timedeltas},
    fmt::FormatSpec,
    formatter::{
        AutoTimedeltaFormatter, ConciseLevels, ConciseTimedeltaFormatter,
        TickFormatter,
    },
    locator::{AutoTimedeltaLocator, SharedLocator},
};

/// The default view of an axis without data, in days.
pub const DEFAULT_LIMITS: (f64, f64) = (1.0, 2.0);

/// How a host chart should set up an axis of durations.
pub struct AxisInfo {
    /// Where major ticks go. The formatter follows this same locator.
    pub major_locator: SharedLocator,
    /// How major ticks are labeled.
    pub major_formatter: Box<dyn TickFormatter>,
    /// The axis label. Durations have none.
    pub label: String,
    /// The view used before any data is plotted, in days.
    pub default_limits: (f64, f64),
}

impl core::fmt::Debug for AxisInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("AxisInfo")
            .field("label", &self.label)
            .field("default_limits", &self.default_limits)
            .finish_non_exhaustive()
    }
}

/// A host value that wraps durations, like a column of a table.
///
/// Converters unwrap such values before converting them.
pub trait Unwrap {
    /// Returns the durations held by this value.
    fn unwrap_values(&self) -> Timedeltas;
}

/// A value plotted on an axis of durations.
#[derive(Clone, Copy)]
pub enum AxisValue<'a> {
    /// A single duration.
    Scalar(TimedeltaLike),
    /// A sequence of durations.
    Sequence(&'a Timedeltas),
    /// A host value wrapping a sequence of durations.
    Wrapped(&'a dyn Unwrap),
}

impl<'a> core::fmt::Debug for AxisValue<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            AxisValue::Scalar(ref td) => {
                f.debug_tuple("Scalar").field(td).finish()
            }
            AxisValue::Sequence(tds) => {
                f.debug_tuple("Sequence").field(tds).finish()
            }
            AxisValue::Wrapped(_) => {
                f.debug_tuple("Wrapped").field(&"..").finish()
            }
        }
    }
}

/// Axis coordinates in days, in the shape of the value they came from.
#[derive(Clone, Debug, PartialEq)]
pub enum Coordinates {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl Coordinates {
    /// Returns the coordinates as a sequence.
    ///
    /// A scalar becomes a sequence of one.
    pub fn into_vec(self) -> Vec<f64> {
        match self {
            Coordinates::Scalar(x) => vec![x],
            Coordinates::Sequence(xs) => xs,
        }
    }
}

/// Describes an axis of durations to a host chart.
pub trait AxisConverter {
    /// Returns a fresh locator and formatter for a new axis.
    fn axis_info(&self) -> AxisInfo;

    /// Converts plotted values to axis coordinates.
    ///
    /// Missing values become NaN. A scalar produces a scalar, and a
    /// sequence (wrapped or not) produces a sequence of the same length.
    fn convert(&self, value: &AxisValue<'_>) -> Coordinates {
        match *value {
            AxisValue::Scalar(td) => Coordinates::Scalar(codec::to_num(td)),
            AxisValue::Sequence(tds) => {
                Coordinates::Sequence(codec::to_nums(tds))
            }
            AxisValue::Wrapped(wrapped) => {
                Coordinates::Sequence(codec::to_nums(&wrapped.unwrap_values()))
            }
        }
    }
}

/// Customizes the formatter of a [`TimedeltaConverter`].
///
/// # Example
///
/// ```
/// use tdaxis::converter::{AutoFormatterArgs, TimedeltaConverter};
///
/// let args = AutoFormatterArgs::default().scaled(1.0 / 24.0, "%H:%m");
/// let converter = TimedeltaConverter::new().formatter_args(args);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AutoFormatterArgs {
    scaled: Vec<(f64, FormatSpec)>,
    default_format: Option<FormatSpec>,
    usetex: bool,
}

impl AutoFormatterArgs {
    /// Adds (or replaces) an entry in the formatter's table.
    ///
    /// See [`AutoTimedeltaFormatter::scaled`].
    pub fn scaled(
        mut self,
        unit: f64,
        format: impl Into<FormatSpec>,
    ) -> AutoFormatterArgs {
        self.scaled.push((unit, format.into()));
        self
    }

    /// Sets the format used beyond the largest entry of the table.
    pub fn default_format(
        self,
        format: impl Into<FormatSpec>,
    ) -> AutoFormatterArgs {
        AutoFormatterArgs { default_format: Some(format.into()), ..self }
    }

    /// Sets whether labels are wrapped for rendering with TeX.
    pub fn usetex(self, yes: bool) -> AutoFormatterArgs {
        AutoFormatterArgs { usetex: yes, ..self }
    }

    fn build(&self, locator: SharedLocator) -> AutoTimedeltaFormatter {
        let mut formatter =
            AutoTimedeltaFormatter::new(locator).usetex(self.usetex);
        for (unit, format) in self.scaled.iter() {
            formatter = formatter.scaled(*unit, format.clone());
        }
        if let Some(ref format) = self.default_format {
            formatter = formatter.default_format(format.clone());
        }
        formatter
    }
}

/// Customizes the formatter of a [`ConciseTimedeltaConverter`].
#[derive(Clone, Debug)]
pub struct ConciseFormatterArgs {
    levels: ConciseLevels,
    show_offset: bool,
    show_offset_zero: bool,
    usetex: bool,
}

impl ConciseFormatterArgs {
    /// Sets the tick and offset formats.
    pub fn levels(self, levels: ConciseLevels) -> ConciseFormatterArgs {
        ConciseFormatterArgs { levels, ..self }
    }

    /// Sets whether the offset label is shown.
    pub fn show_offset(self, yes: bool) -> ConciseFormatterArgs {
        ConciseFormatterArgs { show_offset: yes, ..self }
    }

    /// Sets whether the offset label is shown when the offset is zero.
    pub fn show_offset_zero(self, yes: bool) -> ConciseFormatterArgs {
        ConciseFormatterArgs { show_offset_zero: yes, ..self }
    }

    /// Sets whether labels are wrapped for rendering with TeX.
    pub fn usetex(self, yes: bool) -> ConciseFormatterArgs {
        ConciseFormatterArgs { usetex: yes, ..self }
    }

    fn build(&self, locator: SharedLocator) -> ConciseTimedeltaFormatter {
        ConciseTimedeltaFormatter::new(locator)
            .levels(self.levels.clone())
            .show_offset(self.show_offset)
            .show_offset_zero(self.show_offset_zero)
            .usetex(self.usetex)
    }
}

impl Default for ConciseFormatterArgs {
    fn default() -> ConciseFormatterArgs {
        ConciseFormatterArgs {
            levels: ConciseLevels::default(),
            show_offset: true,
            show_offset_zero: true,
            usetex: false,
        }
    }
}

/// Sets up axes of durations with fully labeled ticks.
#[derive(Clone, Debug, Default)]
pub struct TimedeltaConverter {
    args: AutoFormatterArgs,
}

impl TimedeltaConverter {
    /// Creates a converter with the default formatter.
    pub fn new() -> TimedeltaConverter {
        TimedeltaConverter::default()
    }

    /// Sets how the formatter of every new axis is customized.
    pub fn formatter_args(
        self,
        args: AutoFormatterArgs,
    ) -> TimedeltaConverter {
        TimedeltaConverter { args }
    }
}

impl AxisConverter for TimedeltaConverter {
    fn axis_info(&self) -> AxisInfo {
        let locator = Rc::new(RefCell::new(AutoTimedeltaLocator::new()));
        let formatter = self.args.build(locator.clone());
        AxisInfo {
            major_locator: locator,
            major_formatter: Box::new(formatter),
            label: String::new(),
            default_limits: DEFAULT_LIMITS,
        }
    }
}

/// Sets up axes of durations with compact tick labels and an offset.
#[derive(Clone, Debug, Default)]
pub struct ConciseTimedeltaConverter {
    args: ConciseFormatterArgs,
}

impl ConciseTimedeltaConverter {
    /// Creates a converter with the default formatter.
    pub fn new() -> ConciseTimedeltaConverter {
        ConciseTimedeltaConverter::default()
    }

    /// Sets how the formatter of every new axis is customized.
    pub fn formatter_args(
        self,
        args: ConciseFormatterArgs,
    ) -> ConciseTimedeltaConverter {
        ConciseTimedeltaConverter { args }
    }
}

impl AxisConverter for ConciseTimedeltaConverter {
    fn axis_info(&self) -> AxisInfo {
        let locator = Rc::new(RefCell::new(AutoTimedeltaLocator::new()));
        let formatter = self.args.build(locator.clone());
        AxisInfo {
            major_locator: locator,
            major_formatter: Box::new(formatter),
            label: String::new(),
            default_limits: DEFAULT_LIMITS,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        codec::{ScalarTimedelta, TickDuration, TickUnit},
        unit::BaseUnit,
        util::b,
        Timedelta,
    };

    use super::*;

    struct Column(Vec<i64>);

    impl Unwrap for Column {
        fn unwrap_values(&self) -> Timedeltas {
            let counts = self.0.clone();
            Timedeltas::Ticks { unit: TickUnit::Minute, counts }
        }
    }

    #[test]
    fn convert() {
        let conv = TimedeltaConverter::new();
        let half = AxisValue::Scalar(Timedelta::from_hours(12).into());
        let x = conv.convert(&half);
        assert_eq!(x, Coordinates::Scalar(0.5));

        let x = conv.convert(&AxisValue::Scalar(
            TickDuration::nat(TickUnit::Second).into(),
        ));
        assert!(matches!(x, Coordinates::Scalar(x) if x.is_nan()));

        let tds = Timedeltas::from(vec![
            ScalarTimedelta::new(b::NANOS_PER_DAY * 3),
            ScalarTimedelta::missing(),
        ]);
        let xs = conv.convert(&AxisValue::Sequence(&tds)).into_vec();
        assert_eq!(xs.len(), 2);
        assert_eq!(xs[0], 3.0);
        assert!(xs[1].is_nan());

        let column = Column(vec![720, -1440]);
        let xs = conv.convert(&AxisValue::Wrapped(&column));
        assert_eq!(xs, Coordinates::Sequence(vec![0.5, -1.0]));

        let empty = Timedeltas::Native(vec![]);
        let xs = conv.convert(&AxisValue::Sequence(&empty));
        assert_eq!(xs, Coordinates::Sequence(vec![]));
    }

    #[test]
    fn auto_axis_info() {
        let conv = TimedeltaConverter::new();
        let mut info = conv.axis_info();
        assert_eq!(info.default_limits, (1.0, 2.0));
        assert_eq!(info.label, "");
        info.major_locator.borrow_mut().tick_values(0.0, 1.0);
        let label = info.major_formatter.format(3.0 / 24.0, None).unwrap();
        assert_eq!(label, "0 days, 03:00");

        let args = AutoFormatterArgs::default().scaled(1.0 / 24.0, "%H:%m");
        let conv = TimedeltaConverter::new().formatter_args(args);
        let mut info = conv.axis_info();
        info.major_locator.borrow_mut().tick_values(0.0, 1.0);
        let label = info.major_formatter.format(3.0 / 24.0, None).unwrap();
        assert_eq!(label, "3:00");
    }

    #[test]
    fn axis_info_is_fresh() {
        let conv = TimedeltaConverter::new();
        let first = conv.axis_info();
        first.major_locator.borrow_mut().tick_values(0.0, 1.0);
        let second = conv.axis_info();
        assert_eq!(first.major_locator.borrow().unit(), 1.0 / 24.0);
        assert_eq!(second.major_locator.borrow().unit(), 1.0);
    }

    #[test]
    fn concise_axis_info() {
        let conv = ConciseTimedeltaConverter::new();
        let mut info = conv.axis_info();
        info.major_locator.borrow_mut().tick_values(0.0, 1.0);
        let label = info.major_formatter.format(0.125, None).unwrap();
        assert_eq!(label, "3:00");
        assert_eq!(info.major_formatter.offset(), "0 days");

        let levels =
            ConciseLevels::default().format(BaseUnit::Hour, "%H:00:00");
        let args = ConciseFormatterArgs::default()
            .levels(levels)
            .show_offset_zero(false);
        let conv = ConciseTimedeltaConverter::new().formatter_args(args);
        let mut info = conv.axis_info();
        info.major_locator.borrow_mut().tick_values(0.0, 1.0);
        let label = info.major_formatter.format(0.125, None).unwrap();
        assert_eq!(label, "3:00:00");
        assert_eq!(info.major_formatter.offset(), "");
    }

    #[test]
    fn usetex() {
        let args = ConciseFormatterArgs::default().usetex(true);
        let conv = ConciseTimedeltaConverter::new().formatter_args(args);
        let mut info = conv.axis_info();
        info.major_locator.borrow_mut().tick_values(0.0, 1.0);
        let label = info.major_formatter.format(0.125, None).unwrap();
        insta::assert_snapshot!(label, @r"$\mathdefault{3{:}00}$");
        insta::assert_snapshot!(
            info.major_formatter.offset(),
            @r"$\mathdefault{0\;}$days",
        );
    }
}
