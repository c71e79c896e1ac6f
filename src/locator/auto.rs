use crate::{
    locator::{self, MultipleLocator, TickLocator},
    unit::{BaseUnit, UnitTable},
    util::float::floor_div,
};

/// Places ticks at an interval and unit chosen from the span of the view.
///
/// On every call to [`TickLocator::tick_values`], this locator picks the
/// largest [`BaseUnit`] in which the view spans at least
/// [`minticks`](AutoTimedeltaLocator::minticks) units. It then picks the
/// first interval from that unit's list of candidate intervals that yields
/// no more than that unit's maximum number of ticks. If no candidate is
/// small enough, the last one is used.
///
/// The chosen unit and interval are remembered, and are what
/// [`TickLocator::unit`] and [`TickLocator::interval`] report. This is how
/// formatters find out what precision to render labels with.
///
/// # Example
///
/// ```
/// use tdaxis::{
///     locator::{AutoTimedeltaLocator, TickLocator},
///     unit::BaseUnit,
/// };
///
/// let mut locator = AutoTimedeltaLocator::new();
/// // 141 days is ticked every 20 days.
/// let ticks = locator.tick_values(100.0, 241.0);
/// assert_eq!(ticks.first(), Some(&80.0));
/// assert_eq!(ticks.last(), Some(&260.0));
/// assert_eq!(locator.base(), BaseUnit::Day);
/// assert_eq!(locator.interval(), 20.0);
///
/// // 40 hours is ticked every 4 hours.
/// locator.tick_values(100.0, 100.0 + 40.0 / 24.0);
/// assert_eq!(locator.base(), BaseUnit::Hour);
/// assert_eq!(locator.unit(), 1.0 / 24.0);
/// assert_eq!(locator.interval(), 4.0);
/// ```
#[derive(Clone, Debug)]
pub struct AutoTimedeltaLocator {
    intervals: UnitTable<Vec<f64>>,
    maxticks: UnitTable<usize>,
    minticks: usize,
    base: BaseUnit,
    interval: f64,
}

impl AutoTimedeltaLocator {
    /// Creates a locator with the default interval lists and tick counts.
    ///
    /// Until it has located ticks for the first time, the locator reports
    /// a unit of one day and an interval of one.
    pub fn new() -> AutoTimedeltaLocator {
        AutoTimedeltaLocator {
            intervals: default_intervals(),
            maxticks: UnitTable::new([11, 12, 11, 11, 8]),
            minticks: 5,
            base: BaseUnit::Day,
            interval: 1.0,
        }
    }

    /// Sets the minimum number of units the view must span for a unit to
    /// be chosen.
    ///
    /// The default is `5`.
    pub fn minticks(self, minticks: usize) -> AutoTimedeltaLocator {
        AutoTimedeltaLocator { minticks, ..self }
    }

    /// Sets the same maximum number of ticks for every unit.
    pub fn maxticks(self, maxticks: usize) -> AutoTimedeltaLocator {
        self.maxticks_per_unit(UnitTable::new([maxticks; 5]))
    }

    /// Sets the maximum number of ticks for each unit.
    ///
    /// The defaults are `11` for days, minutes and seconds, `12` for hours
    /// and `8` for microseconds.
    pub fn maxticks_per_unit(
        self,
        maxticks: UnitTable<usize>,
    ) -> AutoTimedeltaLocator {
        AutoTimedeltaLocator { maxticks, ..self }
    }

    /// Replaces the candidate intervals for one unit.
    ///
    /// Candidates should be ascending. An empty list means an interval of
    /// one.
    ///
    /// # Example
    ///
    /// ```
    /// use tdaxis::{
    ///     locator::{AutoTimedeltaLocator, TickLocator},
    ///     unit::BaseUnit,
    /// };
    ///
    /// let mut locator =
    ///     AutoTimedeltaLocator::new().intervals(BaseUnit::Hour, [3.0]);
    /// let ticks = locator.tick_values(1.0, 3.0);
    /// assert_eq!(locator.interval(), 3.0);
    /// assert_eq!(ticks.len(), 19);
    /// ```
    pub fn intervals(
        mut self,
        base: BaseUnit,
        intervals: impl Into<Vec<f64>>,
    ) -> AutoTimedeltaLocator {
        self.intervals[base] = intervals.into();
        self
    }

    /// Returns the minimum number of units a chosen unit must span.
    pub fn get_minticks(&self) -> usize {
        self.minticks
    }

    /// Returns the maximum number of ticks for each unit.
    pub fn get_maxticks(&self) -> &UnitTable<usize> {
        &self.maxticks
    }

    /// Returns the candidate intervals for each unit.
    pub fn get_intervals(&self) -> &UnitTable<Vec<f64>> {
        &self.intervals
    }

    /// Returns the candidate intervals for mutation in place.
    ///
    /// Changes take effect on the next call to locate ticks, which is
    /// useful when this locator is shared with a formatter.
    pub fn intervals_mut(&mut self) -> &mut UnitTable<Vec<f64>> {
        &mut self.intervals
    }

    /// Returns the maximum number of ticks per unit for mutation in place.
    pub fn maxticks_mut(&mut self) -> &mut UnitTable<usize> {
        &mut self.maxticks
    }

    /// Returns the unit chosen when ticks were last located.
    pub fn base(&self) -> BaseUnit {
        self.base
    }

    /// Chooses a unit and interval for the given limits and returns the
    /// locator that generates ticks for them.
    ///
    /// The choice is remembered, so this changes what [`TickLocator::unit`]
    /// and [`TickLocator::interval`] report.
    pub fn locator_for(&mut self, vmin: f64, vmax: f64) -> MultipleLocator {
        let span = (vmax - vmin).abs();
        let base = BaseUnit::ALL
            .into_iter()
            .find(|base| span * base.factor() >= self.minticks as f64)
            .unwrap_or(BaseUnit::Day);
        let norm = span * base.factor();
        let maxticks = self.maxticks[base] as f64;
        let mut interval = 1.0;
        for &candidate in self.intervals[base].iter() {
            interval = candidate;
            if floor_div(norm, candidate) <= maxticks {
                break;
            }
        }
        debug!(
            "selected an interval of {interval} {base} for a view of {}",
            crate::logging::Days(span),
        );
        self.base = base;
        self.interval = interval;
        MultipleLocator::new(interval / base.factor())
    }
}

impl Default for AutoTimedeltaLocator {
    fn default() -> AutoTimedeltaLocator {
        AutoTimedeltaLocator::new()
    }
}

impl TickLocator for AutoTimedeltaLocator {
    fn tick_values(&mut self, vmin: f64, vmax: f64) -> Vec<f64> {
        let (vmin, vmax) = self.nonsingular(vmin, vmax);
        self.locator_for(vmin, vmax).locate(vmin, vmax)
    }

    fn nonsingular(&self, vmin: f64, vmax: f64) -> (f64, f64) {
        let pad = 2.0 * self.unit() * self.interval;
        locator::nonsingular(vmin, vmax, 0.0, pad)
    }

    fn unit(&self) -> f64 {
        self.base.days()
    }

    fn interval(&self) -> f64 {
        self.interval
    }
}

fn default_intervals() -> UnitTable<Vec<f64>> {
    let clock = vec![1.0, 2.0, 3.0, 5.0, 10.0, 15.0, 20.0, 30.0];
    UnitTable::new([
        vec![
            1.0, 2.0, 5.0, 10.0, 20.0, 25.0, 50.0, 100.0, 200.0, 500.0,
            1000.0, 2000.0, 5000.0, 10000.0, 20000.0, 50000.0, 100000.0,
            200000.0, 500000.0, 1000000.0,
        ],
        vec![1.0, 2.0, 3.0, 4.0, 6.0, 8.0, 12.0],
        clock.clone(),
        clock,
        vec![
            1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0,
            2000.0, 5000.0, 10000.0, 20000.0, 50000.0, 100000.0, 200000.0,
            500000.0, 1000000.0,
        ],
    ])
}
