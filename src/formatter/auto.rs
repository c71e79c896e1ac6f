use crate::{
    error::{formatter::Error as E, ErrorContext},
    fmt::{wrap_in_tex, FormatSpec},
    formatter::TickFormatter,
    locator::SharedLocator,
    util::b,
    Error,
};

/// Formats ticks with a format chosen by the unit of a locator.
///
/// The formatter holds a table from unit lengths (in days) to formats.
/// Each label is rendered with the format of the smallest unit length that
/// is at least the unit the locator last placed ticks in. When the locator
/// reports a unit larger than every key, the default format is used.
///
/// Every format is self-contained, so this formatter never produces an
/// offset label.
///
/// The default table is:
///
/// | Unit length       | Format                        |
/// |-------------------|-------------------------------|
/// | 1 day             | `%d %day`                     |
/// | 1 hour            | `%d %day, %h:%m`              |
/// | 1 minute          | `%d %day, %h:%m`              |
/// | 1 second          | `%d %day, %h:%m:%s`           |
/// | 1 millisecond     | `%d %day, %h:%m:%s.%ms`       |
/// | 1 microsecond     | `%d %day, %h:%m:%s.%ms%us`    |
///
/// The default format is `%d %day, %h:%m`.
///
/// # Example
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use tdaxis::{
///     formatter::{AutoTimedeltaFormatter, TickFormatter},
///     locator::{AutoTimedeltaLocator, TickLocator},
/// };
///
/// let locator = Rc::new(RefCell::new(AutoTimedeltaLocator::new()));
/// let mut formatter = AutoTimedeltaFormatter::new(locator.clone());
///
/// locator.borrow_mut().tick_values(0.0, 1.0);
/// assert_eq!(formatter.format(3.0 / 24.0, None)?, "0 days, 03:00");
///
/// let mut formatter = formatter.scaled(1.0 / 24.0, "%H:%m");
/// assert_eq!(formatter.format(3.0 / 24.0, None)?, "3:00");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct AutoTimedeltaFormatter {
    locator: SharedLocator,
    scaled: Vec<(f64, FormatSpec)>,
    default_format: FormatSpec,
    usetex: bool,
}

impl AutoTimedeltaFormatter {
    /// Creates a formatter following the given locator, with the default
    /// table.
    pub fn new(locator: SharedLocator) -> AutoTimedeltaFormatter {
        let micros = b::MICROSECONDS_PER_DAY;
        let scaled = vec![
            (1.0 / micros, "%d %day, %h:%m:%s.%ms%us".into()),
            (1e3 / micros, "%d %day, %h:%m:%s.%ms".into()),
            (1.0 / b::SECONDS_PER_DAY, "%d %day, %h:%m:%s".into()),
            (1.0 / b::MINUTES_PER_DAY, "%d %day, %h:%m".into()),
            (1.0 / b::HOURS_PER_DAY, "%d %day, %h:%m".into()),
            (1.0, "%d %day".into()),
        ];
        AutoTimedeltaFormatter {
            locator,
            scaled,
            default_format: "%d %day, %h:%m".into(),
            usetex: false,
        }
    }

    /// Sets the format used when the locator's unit is at most `unit`
    /// days (and larger than any smaller key).
    ///
    /// An existing entry for the same unit length is replaced.
    pub fn scaled(
        mut self,
        unit: f64,
        format: impl Into<FormatSpec>,
    ) -> AutoTimedeltaFormatter {
        let format = format.into();
        match self.scaled.binary_search_by(|&(key, _)| key.total_cmp(&unit)) {
            Ok(i) => self.scaled[i].1 = format,
            Err(i) => self.scaled.insert(i, (unit, format)),
        }
        self
    }

    /// Sets the format used when the locator's unit is larger than every
    /// key in the table.
    pub fn default_format(
        self,
        format: impl Into<FormatSpec>,
    ) -> AutoTimedeltaFormatter {
        AutoTimedeltaFormatter { default_format: format.into(), ..self }
    }

    /// Sets whether template labels are wrapped for rendering with TeX.
    ///
    /// Labels produced by callbacks are never wrapped.
    pub fn usetex(self, yes: bool) -> AutoTimedeltaFormatter {
        AutoTimedeltaFormatter { usetex: yes, ..self }
    }

    /// Returns the table of unit lengths to formats, ordered by unit
    /// length.
    pub fn get_scaled(&self) -> &[(f64, FormatSpec)] {
        &self.scaled
    }

    /// Returns the format for the locator's current unit.
    fn select(&self) -> &FormatSpec {
        // An unavailable locator is being used to place ticks right now,
        // so fall back to the coarsest unit.
        let unit = self
            .locator
            .try_borrow()
            .map(|locator| locator.unit())
            .unwrap_or(1.0);
        self.scaled
            .iter()
            .find(|&&(key, _)| key >= unit)
            .map(|(_, format)| format)
            .unwrap_or(&self.default_format)
    }
}

impl TickFormatter for AutoTimedeltaFormatter {
    fn format(&mut self, x: f64, pos: Option<usize>) -> Result<String, Error> {
        let spec = self.select();
        let label = spec.format(x, pos).context(E::FormatTick)?;
        Ok(match *spec {
            FormatSpec::Template(_) if self.usetex => wrap_in_tex(&label),
            _ => label,
        })
    }
}

impl core::fmt::Debug for AutoTimedeltaFormatter {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("AutoTimedeltaFormatter")
            .field("scaled", &self.scaled)
            .field("default_format", &self.default_format)
            .field("usetex", &self.usetex)
            .finish_non_exhaustive()
    }
}
