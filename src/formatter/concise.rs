use crate::{
    axis::Axis,
    error::formatter::Error as E,
    fmt::FormatSpec,
    formatter::{TickFormatter, TimedeltaFormatter},
    locator::SharedLocator,
    unit::{BaseUnit, UnitTable},
    Error,
};

/// How the offset label is rendered at one level of a concise formatter.
///
/// Either both a format and a unit are set, only a unit is set (ticks are
/// shifted but no offset label is shown) or neither is set (ticks are
/// rendered as is).
#[derive(Clone, Debug, Default)]
pub struct OffsetFormat {
    format: Option<FormatSpec>,
    unit: Option<BaseUnit>,
}

impl OffsetFormat {
    /// No offset at all.
    pub fn none() -> OffsetFormat {
        OffsetFormat::default()
    }

    /// An offset floored to a whole number of `unit`, rendered with
    /// `format`.
    pub fn new(format: impl Into<FormatSpec>, unit: BaseUnit) -> OffsetFormat {
        OffsetFormat { format: Some(format.into()), unit: Some(unit) }
    }

    /// Creates an offset format from its optional parts.
    ///
    /// # Errors
    ///
    /// This returns an error when a format is given without a unit.
    pub fn from_parts(
        format: Option<FormatSpec>,
        unit: Option<BaseUnit>,
    ) -> Result<OffsetFormat, Error> {
        if format.is_some() && unit.is_none() {
            return Err(Error::from(E::OffsetFormatWithoutUnit));
        }
        Ok(OffsetFormat { format, unit })
    }

    /// Returns the format of the offset label, if any.
    pub fn format(&self) -> Option<&FormatSpec> {
        self.format.as_ref()
    }

    /// Returns the unit the offset is floored to, if any.
    pub fn unit(&self) -> Option<BaseUnit> {
        self.unit
    }
}

/// The tick and offset formats of a concise formatter, one per base unit.
///
/// The defaults are:
///
/// | Unit         | Tick format  | Offset format            |
/// |--------------|--------------|--------------------------|
/// | days         | `%d %day`    | none                     |
/// | hours        | `%H:00`      | `%d %day` in days        |
/// | minutes      | `%H:%m`      | `%d %day` in days        |
/// | seconds      | `%M:%s.0`    | `%d %day, %h:00` in hours |
/// | microseconds | `%S.%ms%us`  | `%d %day, %h:%m` in minutes |
///
/// # Example
///
/// ```
/// use tdaxis::{formatter::ConciseLevels, unit::BaseUnit};
///
/// let levels = ConciseLevels::default()
///     .formats(["%d", "%H", "%M", "%S", "%us"])?;
/// assert_eq!(levels.get_format(BaseUnit::Minute).as_template(), Some("%M"));
///
/// // Every unit needs a format.
/// let err = ConciseLevels::default().formats(["%d", "%H"]).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "formats must have exactly 5 entries (one per base unit), \
///      but 2 were given",
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct ConciseLevels {
    formats: UnitTable<FormatSpec>,
    offset_formats: UnitTable<OffsetFormat>,
}

impl ConciseLevels {
    /// Replaces the tick formats, given from days to microseconds.
    ///
    /// # Errors
    ///
    /// This returns an error unless exactly one format per base unit is
    /// given.
    pub fn formats<S: Into<FormatSpec>>(
        self,
        formats: impl IntoIterator<Item = S>,
    ) -> Result<ConciseLevels, Error> {
        let formats = formats.into_iter().map(Into::into);
        let formats = per_unit::<FormatSpec>("formats", formats)?;
        Ok(ConciseLevels { formats, ..self })
    }

    /// Replaces the offset formats, given from days to microseconds.
    ///
    /// # Errors
    ///
    /// This returns an error unless exactly one offset format per base unit
    /// is given.
    pub fn offset_formats(
        self,
        offset_formats: impl IntoIterator<Item = OffsetFormat>,
    ) -> Result<ConciseLevels, Error> {
        let offset_formats = per_unit("offset formats", offset_formats)?;
        Ok(ConciseLevels { offset_formats, ..self })
    }

    /// Replaces the tick format of a single unit.
    pub fn format(
        mut self,
        unit: BaseUnit,
        format: impl Into<FormatSpec>,
    ) -> ConciseLevels {
        self.formats[unit] = format.into();
        self
    }

    /// Replaces the offset format of a single unit.
    pub fn offset_format(
        mut self,
        unit: BaseUnit,
        offset_format: OffsetFormat,
    ) -> ConciseLevels {
        self.offset_formats[unit] = offset_format;
        self
    }

    /// Returns the tick format used when ticks are placed in `unit`.
    pub fn get_format(&self, unit: BaseUnit) -> &FormatSpec {
        &self.formats[unit]
    }

    /// Returns the offset format used when ticks are placed in `unit`.
    pub fn get_offset_format(&self, unit: BaseUnit) -> &OffsetFormat {
        &self.offset_formats[unit]
    }
}

impl Default for ConciseLevels {
    fn default() -> ConciseLevels {
        ConciseLevels {
            formats: UnitTable::new([
                "%d %day".into(),
                "%H:00".into(),
                "%H:%m".into(),
                "%M:%s.0".into(),
                "%S.%ms%us".into(),
            ]),
            offset_formats: UnitTable::new([
                OffsetFormat::none(),
                OffsetFormat::new("%d %day", BaseUnit::Day),
                OffsetFormat::new("%d %day", BaseUnit::Day),
                OffsetFormat::new("%d %day, %h:00", BaseUnit::Hour),
                OffsetFormat::new("%d %day, %h:%m", BaseUnit::Minute),
            ]),
        }
    }
}

fn per_unit<T>(
    what: &'static str,
    values: impl IntoIterator<Item = T>,
) -> Result<UnitTable<T>, Error> {
    let values: Vec<T> = values.into_iter().collect();
    let got = values.len();
    let values = <[T; 5]>::try_from(values).map_err(|_| {
        Error::from(E::TableLength { what, expected: 5, got })
    })?;
    Ok(UnitTable::new(values))
}

/// Formats ticks as compactly as possible, using an offset for the rest.
///
/// This reads the unit its locator last placed ticks in, and renders ticks
/// with that unit's format and offset from a [`ConciseLevels`] table. For
/// example, ticks placed every few minutes are rendered like `3:42`, with
/// the day shown once in the offset label.
///
/// The locator must report one of the units in
/// [`BaseUnit::ALL`](crate::unit::BaseUnit::ALL), which is always true for
/// an [`AutoTimedeltaLocator`](crate::locator::AutoTimedeltaLocator). If
/// the locator is in use elsewhere (and so can't be borrowed) when ticks
/// are formatted, labels are rendered at the level for days.
pub struct ConciseTimedeltaFormatter {
    locator: SharedLocator,
    levels: ConciseLevels,
    show_offset: bool,
    show_offset_zero: bool,
    usetex: bool,
    offset_label: String,
}

impl ConciseTimedeltaFormatter {
    /// Creates a concise formatter following the given locator, with the
    /// default formats.
    pub fn new(locator: SharedLocator) -> ConciseTimedeltaFormatter {
        ConciseTimedeltaFormatter {
            locator,
            levels: ConciseLevels::default(),
            show_offset: true,
            show_offset_zero: true,
            usetex: false,
            offset_label: String::new(),
        }
    }

    /// Sets the tick and offset formats.
    pub fn levels(self, levels: ConciseLevels) -> ConciseTimedeltaFormatter {
        ConciseTimedeltaFormatter { levels, ..self }
    }

    /// Sets whether the offset label is shown at all.
    ///
    /// This is enabled by default.
    pub fn show_offset(self, yes: bool) -> ConciseTimedeltaFormatter {
        ConciseTimedeltaFormatter { show_offset: yes, ..self }
    }

    /// Sets whether the offset label is shown when the offset is zero.
    ///
    /// This is enabled by default. When disabled, an axis starting near
    /// zero doesn't get a `0 days` offset label.
    pub fn show_offset_zero(self, yes: bool) -> ConciseTimedeltaFormatter {
        ConciseTimedeltaFormatter { show_offset_zero: yes, ..self }
    }

    /// Sets whether labels are wrapped for rendering with TeX.
    pub fn usetex(self, yes: bool) -> ConciseTimedeltaFormatter {
        ConciseTimedeltaFormatter { usetex: yes, ..self }
    }

    /// Returns the locator this formatter follows.
    pub fn locator(&self) -> &SharedLocator {
        &self.locator
    }

    /// Returns the tick and offset formats.
    pub fn get_levels(&self) -> &ConciseLevels {
        &self.levels
    }

    fn level(&self) -> Result<BaseUnit, Error> {
        let scale = self
            .locator
            .try_borrow()
            .map(|locator| locator.unit())
            .unwrap_or(1.0);
        BaseUnit::from_days(scale)
            .ok_or_else(|| Error::from(E::UnknownScale { scale }))
    }
}

impl TickFormatter for ConciseTimedeltaFormatter {
    fn format(
        &mut self,
        x: f64,
        _pos: Option<usize>,
    ) -> Result<String, Error> {
        let labels = self.format_ticks(&[x], None)?;
        Ok(labels.into_iter().next().unwrap_or_default())
    }

    fn format_ticks(
        &mut self,
        values: &[f64],
        axis: Option<&dyn Axis>,
    ) -> Result<Vec<String>, Error> {
        self.offset_label.clear();
        let level = self.level()?;
        let offset = self.levels.get_offset_format(level).clone();
        let mut inner =
            TimedeltaFormatter::new(self.levels.get_format(level).clone())
                .with_offset(offset.unit, offset.format)?
                .usetex(self.usetex);
        let labels = inner.format_ticks(values, axis)?;
        let hidden = !self.show_offset
            || (!self.show_offset_zero && inner.offset_value() == Some(0.0));
        if !hidden {
            self.offset_label.push_str(inner.offset());
        }
        Ok(labels)
    }

    fn offset(&self) -> &str {
        &self.offset_label
    }
}

impl core::fmt::Debug for ConciseTimedeltaFormatter {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("ConciseTimedeltaFormatter")
            .field("levels", &self.levels)
            .field("show_offset", &self.show_offset)
            .field("show_offset_zero", &self.show_offset_zero)
            .field("usetex", &self.usetex)
            .field("offset_label", &self.offset_label)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crate::{
        locator::{AutoTimedeltaLocator, FixedTimedeltaLocator, TickLocator},
        util::b,
    };

    use super::*;

    const START: f64 = 100.0 + 220.0 / b::MINUTES_PER_DAY;

    fn auto() -> Rc<RefCell<AutoTimedeltaLocator>> {
        Rc::new(RefCell::new(AutoTimedeltaLocator::new()))
    }

    #[test]
    fn minutes() {
        let locator = auto();
        let mut f = ConciseTimedeltaFormatter::new(locator.clone());
        let ticks = locator
            .borrow_mut()
            .tick_values(START, START + 30.0 / b::MINUTES_PER_DAY);
        let labels = f.format_ticks(&ticks, None).unwrap();
        insta::assert_snapshot!(labels.join(" "), @"3:39 3:42 3:45 3:48 3:51 3:54 3:57 4:00 4:03 4:06 4:09 4:12");
        insta::assert_snapshot!(f.offset(), @"100 days");
    }

    #[test]
    fn seconds_offset_in_hours() {
        let locator = auto();
        let mut f = ConciseTimedeltaFormatter::new(locator.clone());
        let ticks = locator
            .borrow_mut()
            .tick_values(START, START + 40.0 / b::SECONDS_PER_DAY);
        let labels = f.format_ticks(&ticks, None).unwrap();
        insta::assert_snapshot!(labels.join(" "), @"39:55.0 40:00.0 40:05.0 40:10.0 40:15.0 40:20.0 40:25.0 40:30.0 40:35.0 40:40.0 40:45.0");
        insta::assert_snapshot!(f.offset(), @"100 days, 03:00");
    }

    #[test]
    fn days_have_no_offset() {
        let locator = auto();
        let mut f = ConciseTimedeltaFormatter::new(locator.clone());
        let ticks = locator.borrow_mut().tick_values(100.0, 241.0);
        let labels = f.format_ticks(&ticks, None).unwrap();
        assert_eq!(labels[0], "80 days");
        assert_eq!(labels[9], "260 days");
        assert_eq!(f.offset(), "");
    }

    #[test]
    fn single_value() {
        let locator = auto();
        let mut f = ConciseTimedeltaFormatter::new(locator.clone());
        locator.borrow_mut().tick_values(0.0, 1.0);
        assert_eq!(f.format(0.125, None).unwrap(), "3:00");
        assert_eq!(f.offset(), "0 days");

        let levels =
            ConciseLevels::default().format(BaseUnit::Hour, "%H:00:00");
        let mut f = ConciseTimedeltaFormatter::new(locator.clone())
            .levels(levels)
            .show_offset_zero(false);
        assert_eq!(f.format(0.125, None).unwrap(), "3:00:00");
        assert_eq!(f.offset(), "");
        // A non-zero offset is still shown.
        assert_eq!(f.format(1.125, None).unwrap(), "3:00:00");
        assert_eq!(f.offset(), "1 day");
    }

    #[test]
    fn hidden_offset() {
        let locator = auto();
        let mut f =
            ConciseTimedeltaFormatter::new(locator.clone()).show_offset(false);
        let ticks = locator.borrow_mut().tick_values(10.0, 11.0);
        let labels = f.format_ticks(&ticks, None).unwrap();
        assert_eq!(labels[..2], ["22:00", "24:00"]);
        assert_eq!(f.offset(), "");
    }

    #[test]
    fn busy_locator_uses_days() {
        let locator = auto();
        let mut f = ConciseTimedeltaFormatter::new(locator.clone());
        locator.borrow_mut().tick_values(0.0, 1.0);
        let _guard = locator.borrow_mut();
        assert_eq!(f.format(2.0, None).unwrap(), "2 days");
    }

    #[test]
    fn unknown_scale() {
        let locator = Rc::new(RefCell::new(FixedTimedeltaLocator::new(
            BaseUnit::Hour,
            1.0,
        )));
        let mut f = ConciseTimedeltaFormatter::new(locator.clone());
        assert_eq!(f.format(1.5, None).unwrap(), "12:00");

        // A locator ticking in a unit that isn't a base unit can't be
        // formatted concisely.
        struct Weeks;
        impl TickLocator for Weeks {
            fn tick_values(&mut self, _: f64, _: f64) -> Vec<f64> {
                vec![]
            }
            fn nonsingular(&self, vmin: f64, vmax: f64) -> (f64, f64) {
                (vmin, vmax)
            }
            fn unit(&self) -> f64 {
                7.0
            }
            fn interval(&self) -> f64 {
                1.0
            }
        }
        let weeks = Rc::new(RefCell::new(Weeks));
        let mut f = ConciseTimedeltaFormatter::new(weeks);
        let err = f.format_ticks(&[1.0], None).unwrap_err();
        assert!(err.is_invalid_parameter());
        insta::assert_snapshot!(
            err,
            @"locator unit of 7 days does not correspond to any base unit",
        );
    }

    #[test]
    fn offset_formats() {
        let err =
            OffsetFormat::from_parts(Some("%d".into()), None).unwrap_err();
        insta::assert_snapshot!(
            err,
            @"an offset format was given, but no unit to compute the offset in",
        );
        let unit_only =
            OffsetFormat::from_parts(None, Some(BaseUnit::Day)).unwrap();
        assert!(unit_only.format().is_none());

        let err = ConciseLevels::default()
            .offset_formats(vec![OffsetFormat::none(); 6])
            .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"offset formats must have exactly 5 entries (one per base unit), but 6 were given",
        );

        let levels = ConciseLevels::default()
            .offset_formats(vec![unit_only; 5])
            .unwrap();
        let locator = auto();
        let mut f =
            ConciseTimedeltaFormatter::new(locator.clone()).levels(levels);
        let ticks = locator.borrow_mut().tick_values(10.0, 11.0);
        let labels = f.format_ticks(&ticks, None).unwrap();
        assert_eq!(labels[1], "24:00");
        assert_eq!(f.offset(), "");
    }
}
