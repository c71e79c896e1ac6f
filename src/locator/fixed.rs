use crate::{
    locator::{self, MultipleLocator, TickLocator},
    unit::BaseUnit,
    Error,
};

/// Places ticks at a fixed interval of a fixed unit.
///
/// # Example
///
/// Ticks every 20 minutes:
///
/// ```
/// use tdaxis::{
///     locator::{FixedTimedeltaLocator, TickLocator},
///     unit::BaseUnit,
///     Timedelta,
/// };
///
/// let mut locator = FixedTimedeltaLocator::new(BaseUnit::Minute, 20.0);
/// let ticks = locator.tick_values(1.0, 1.0 + 1.0 / 24.0);
/// let labels: Vec<String> = ticks
///     .into_iter()
///     .map(|x| Timedelta::from_days_f64(x).to_string())
///     .collect();
/// assert_eq!(labels, [
///     "23:40:00",
///     "1 day, 0:00:00",
///     "1 day, 0:20:00",
///     "1 day, 0:40:00",
///     "1 day, 1:00:00",
///     "1 day, 1:20:00",
/// ]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedTimedeltaLocator {
    base: BaseUnit,
    interval: f64,
}

impl FixedTimedeltaLocator {
    /// Creates a locator ticking every `interval` of `base`.
    pub fn new(base: BaseUnit, interval: f64) -> FixedTimedeltaLocator {
        FixedTimedeltaLocator { base, interval }
    }

    /// Creates a locator from the name of a base unit, like `"hours"`.
    ///
    /// # Errors
    ///
    /// This returns an error when `base` isn't the name of a base unit.
    ///
    /// # Example
    ///
    /// ```
    /// use tdaxis::locator::FixedTimedeltaLocator;
    ///
    /// assert!(FixedTimedeltaLocator::from_name("days", 0.5).is_ok());
    /// let err = FixedTimedeltaLocator::from_name("weeks", 1.0).unwrap_err();
    /// assert!(err.is_invalid_parameter());
    /// ```
    pub fn from_name(
        base: &str,
        interval: f64,
    ) -> Result<FixedTimedeltaLocator, Error> {
        Ok(FixedTimedeltaLocator::new(base.parse()?, interval))
    }

    /// Returns the unit ticks are placed in.
    pub fn base(&self) -> BaseUnit {
        self.base
    }

    fn generator(&self) -> MultipleLocator {
        MultipleLocator::new(self.interval / self.base.factor())
    }
}

impl TickLocator for FixedTimedeltaLocator {
    fn tick_values(&mut self, vmin: f64, vmax: f64) -> Vec<f64> {
        let (vmin, vmax) = self.nonsingular(vmin, vmax);
        self.generator().locate(vmin, vmax)
    }

    fn nonsingular(&self, vmin: f64, vmax: f64) -> (f64, f64) {
        let unit = self.unit();
        let pad = 2.0 * unit * self.interval;
        locator::nonsingular(vmin, vmax, 1e-6 * unit, pad)
    }

    fn unit(&self) -> f64 {
        self.base.days()
    }

    fn interval(&self) -> f64 {
        self.interval
    }
}
