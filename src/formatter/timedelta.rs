use crate::{
    axis::Axis,
    error::{formatter::Error as E, ErrorContext},
    fmt::{wrap_in_tex, FormatSpec},
    formatter::{min_finite, TickFormatter},
    unit::BaseUnit,
    util::float::round_to_digits,
    Error,
};

/// Formats ticks with one explicit format, optionally relative to an offset.
///
/// When an offset unit is set, [`TickFormatter::format_ticks`] computes an
/// offset from the smallest tick (or the start of the plotted data, when
/// that is larger) floored to a whole number of that unit. Every tick is
/// rendered relative to that offset, and the offset itself is rendered
/// with its own format. This keeps labels short on an axis far away from
/// zero.
///
/// # Example
///
/// ```
/// use tdaxis::{
///     formatter::{TickFormatter, TimedeltaFormatter},
///     unit::BaseUnit,
/// };
///
/// let mut formatter = TimedeltaFormatter::new("%H:%m")
///     .with_offset(Some(BaseUnit::Day), Some("%d %day".into()))?;
/// let ticks = [100.0, 100.25, 100.5, 100.75, 101.0];
/// let labels = formatter.format_ticks(&ticks, None)?;
/// assert_eq!(labels, ["0:00", "6:00", "12:00", "18:00", "24:00"]);
/// assert_eq!(formatter.offset(), "100 days");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct TimedeltaFormatter {
    format: FormatSpec,
    offset_on: Option<BaseUnit>,
    offset_format: Option<FormatSpec>,
    usetex: bool,
    offset_value: Option<f64>,
    offset_label: String,
}

impl TimedeltaFormatter {
    /// Creates a formatter rendering every tick with `format` and no
    /// offset.
    pub fn new(format: impl Into<FormatSpec>) -> TimedeltaFormatter {
        TimedeltaFormatter {
            format: format.into(),
            offset_on: None,
            offset_format: None,
            usetex: false,
            offset_value: None,
            offset_label: String::new(),
        }
    }

    /// Sets the unit the offset is floored to and the format the offset
    /// label is rendered with.
    ///
    /// An offset unit without an offset format subtracts the offset from
    /// every tick but leaves the offset label empty.
    ///
    /// # Errors
    ///
    /// This returns an error when an offset format is given without an
    /// offset unit.
    pub fn with_offset(
        self,
        offset_on: Option<BaseUnit>,
        offset_format: Option<FormatSpec>,
    ) -> Result<TimedeltaFormatter, Error> {
        if offset_on.is_none() && offset_format.is_some() {
            return Err(Error::from(E::OffsetFormatWithoutUnit));
        }
        Ok(TimedeltaFormatter { offset_on, offset_format, ..self })
    }

    /// Sets whether labels are wrapped for rendering with TeX.
    ///
    /// This is disabled by default.
    pub fn usetex(self, yes: bool) -> TimedeltaFormatter {
        TimedeltaFormatter { usetex: yes, ..self }
    }

    /// Returns the format that ticks are rendered with.
    pub fn get_format(&self) -> &FormatSpec {
        &self.format
    }

    /// Returns the unit the offset is computed in, if any.
    pub fn get_offset_on(&self) -> Option<BaseUnit> {
        self.offset_on
    }

    /// Returns the offset (in days) computed by the last call to
    /// [`TickFormatter::format_ticks`].
    ///
    /// This is `None` when no offset unit is set or no ticks were given.
    pub fn offset_value(&self) -> Option<f64> {
        self.offset_value
    }

    fn compute_offset(
        &self,
        unit: BaseUnit,
        values: &[f64],
        axis: Option<&dyn Axis>,
    ) -> f64 {
        let data_min = axis.and_then(|axis| {
            let (lo, hi) = axis.data_interval();
            min_finite([lo, hi])
        });
        // The data interval of an axis without data is `(inf, -inf)`, and
        // `max` discards its minimum of `-inf`.
        let reference = match (min_finite(values.iter().copied()), data_min) {
            (Some(tick_min), Some(data_min)) => tick_min.max(data_min),
            (Some(tick_min), None) => tick_min,
            (None, _) => return 0.0,
        };
        let reference = round_to_digits(reference, 13);
        if !reference.is_finite() {
            return 0.0;
        }
        let factor = unit.factor();
        (reference * factor).floor() / factor
    }

    fn render(
        &self,
        spec: &FormatSpec,
        x: f64,
        pos: Option<usize>,
    ) -> Result<String, Error> {
        let label = spec.format(x, pos)?;
        Ok(if self.usetex { wrap_in_tex(&label) } else { label })
    }
}

impl TickFormatter for TimedeltaFormatter {
    fn format(&mut self, x: f64, pos: Option<usize>) -> Result<String, Error> {
        self.render(&self.format, x, pos).context(E::FormatTick)
    }

    fn format_ticks(
        &mut self,
        values: &[f64],
        axis: Option<&dyn Axis>,
    ) -> Result<Vec<String>, Error> {
        self.offset_label.clear();
        self.offset_value = None;
        if values.is_empty() {
            return Ok(vec![]);
        }
        let offset = match self.offset_on {
            None => 0.0,
            Some(unit) => {
                let offset = self.compute_offset(unit, values, axis);
                self.offset_value = Some(offset);
                offset
            }
        };
        let labels = values
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                self.render(&self.format, x - offset, Some(i))
                    .context(E::FormatTick)
            })
            .collect::<Result<Vec<String>, Error>>()?;
        if let Some(ref spec) = self.offset_format {
            self.offset_label =
                self.render(spec, offset, None).context(E::FormatOffset)?;
        }
        Ok(labels)
    }

    fn offset(&self) -> &str {
        &self.offset_label
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        axis::DummyAxis,
        locator::{FixedTimedeltaLocator, TickLocator},
        util::b,
    };

    use super::*;

    /// The start of every view in these tests: 100 days, 3 hours and 40
    /// minutes.
    const START: f64 = 100.0 + 220.0 / b::MINUTES_PER_DAY;

    fn ticks(base: BaseUnit, interval: f64, width: f64) -> Vec<f64> {
        FixedTimedeltaLocator::new(base, interval)
            .tick_values(START, START + width)
    }

    #[test]
    fn hours_relative_to_days() {
        let mut f = TimedeltaFormatter::new("%H:%m")
            .with_offset(Some(BaseUnit::Day), Some("%d %day".into()))
            .unwrap();
        let ticks = ticks(BaseUnit::Hour, 4.0, 40.0 / b::HOURS_PER_DAY);
        let labels = f.format_ticks(&ticks, None).unwrap();
        insta::assert_snapshot!(labels.join(" "), @"0:00 4:00 8:00 12:00 16:00 20:00 24:00 28:00 32:00 36:00 40:00 44:00");
        insta::assert_snapshot!(f.offset(), @"100 days");
        assert_eq!(f.offset_value(), Some(100.0));

        // Formatting again gives the same result.
        assert_eq!(f.format_ticks(&ticks, None).unwrap(), labels);
        assert_eq!(f.offset(), "100 days");
    }

    #[test]
    fn minutes_relative_to_hours() {
        let mut f = TimedeltaFormatter::new("%M:%s.0")
            .with_offset(Some(BaseUnit::Hour), Some("%d %day, %h:%m".into()))
            .unwrap();
        let ticks = ticks(BaseUnit::Minute, 3.0, 30.0 / b::MINUTES_PER_DAY);
        let labels = f.format_ticks(&ticks, None).unwrap();
        insta::assert_snapshot!(labels.join(" "), @"39:00.0 42:00.0 45:00.0 48:00.0 51:00.0 54:00.0 57:00.0 60:00.0 63:00.0 66:00.0 69:00.0 72:00.0");
        insta::assert_snapshot!(f.offset(), @"100 days, 03:00");
    }

    #[test]
    fn data_interval_moves_offset() {
        let mut f = TimedeltaFormatter::new("%H:%m")
            .with_offset(Some(BaseUnit::Day), Some("%d %day".into()))
            .unwrap();
        let mut axis = DummyAxis::new();
        axis.set_data_interval(101.5, 102.0);
        let labels =
            f.format_ticks(&[100.5, 101.5, 102.5], Some(&axis)).unwrap();
        assert_eq!(labels, ["-12:00", "12:00", "36:00"]);
        assert_eq!(f.offset(), "101 days");

        // A smaller data minimum doesn't lower the offset below the ticks.
        axis.set_data_interval(50.0, 102.0);
        f.format_ticks(&[100.5, 101.5, 102.5], Some(&axis)).unwrap();
        assert_eq!(f.offset(), "100 days");
    }

    #[test]
    fn no_offset() {
        let mut f = TimedeltaFormatter::new("%d %day, %h:%m");
        let labels = f.format_ticks(&[1.0, 1.5], None).unwrap();
        assert_eq!(labels, ["1 day, 00:00", "1 day, 12:00"]);
        assert_eq!(f.offset(), "");
        assert_eq!(f.offset_value(), None);

        // An offset unit alone shifts the labels without an offset label.
        let mut f = f.with_offset(Some(BaseUnit::Day), None).unwrap();
        let labels = f.format_ticks(&[1.0, 1.5], None).unwrap();
        assert_eq!(labels, ["0 days, 00:00", "0 days, 12:00"]);
        assert_eq!(f.offset(), "");
        assert_eq!(f.offset_value(), Some(1.0));
    }

    #[test]
    fn empty() {
        let mut f = TimedeltaFormatter::new("%H")
            .with_offset(Some(BaseUnit::Day), Some("%d %day".into()))
            .unwrap();
        f.format_ticks(&[2.5], None).unwrap();
        assert_eq!(f.offset(), "2 days");
        assert!(f.format_ticks(&[], None).unwrap().is_empty());
        assert_eq!(f.offset(), "");
    }

    #[test]
    fn single_value_has_no_offset() {
        let mut f = TimedeltaFormatter::new("%H:%m")
            .with_offset(Some(BaseUnit::Day), Some("%d %day".into()))
            .unwrap();
        assert_eq!(f.format(100.25, Some(0)).unwrap(), "2406:00");
    }

    #[test]
    fn callbacks() {
        let spec = FormatSpec::callback(|x, pos| format!("{x}/{pos:?}"));
        let offset = FormatSpec::callback(|x, pos| format!("+{x}/{pos:?}"));
        let mut f = TimedeltaFormatter::new(spec)
            .with_offset(Some(BaseUnit::Day), Some(offset))
            .unwrap();
        let labels = f.format_ticks(&[3.5, 4.5], None).unwrap();
        assert_eq!(labels, ["0.5/Some(0)", "1.5/Some(1)"]);
        assert_eq!(f.offset(), "+3/None");
    }

    #[test]
    fn usetex() {
        let mut f = TimedeltaFormatter::new("%H:%m")
            .with_offset(Some(BaseUnit::Day), Some("%d %day".into()))
            .unwrap()
            .usetex(true);
        let labels = f.format_ticks(&[1.25], None).unwrap();
        insta::assert_snapshot!(labels[0], @r"$\mathdefault{6{:}00}$");
        insta::assert_snapshot!(f.offset(), @r"$\mathdefault{1\;}$day");
    }

    #[test]
    fn errors() {
        let err = TimedeltaFormatter::new("%H")
            .with_offset(None, Some("%d".into()))
            .unwrap_err();
        assert!(err.is_invalid_parameter());
        insta::assert_snapshot!(
            err,
            @"an offset format was given, but no unit to compute the offset in",
        );

        let mut f = TimedeltaFormatter::new("%days");
        let err = f.format_ticks(&[1.0], None).unwrap_err();
        assert!(err.is_format());
        insta::assert_snapshot!(
            err,
            @"failed to format tick label: found unrecognized directive `%days` (supported directives are %d, %day, %H, %M, %S, %h, %m, %s, %ms, %us and %%)",
        );

        let mut f = TimedeltaFormatter::new("%H")
            .with_offset(Some(BaseUnit::Day), Some("%q".into()))
            .unwrap();
        let err = f.format_ticks(&[1.0], None).unwrap_err();
        insta::assert_snapshot!(
            err,
            @"failed to format offset label: found unrecognized directive `%q` (supported directives are %d, %day, %H, %M, %S, %h, %m, %s, %ms, %us and %%)",
        );
    }
}
