/*!
The base units that ticks are located and labeled in.
*/

use crate::{error::unit::Error as E, util::b, Error};

/// A unit that an axis of durations can be ticked in.
///
/// Units are ordered from the largest (`Day`) to the smallest
/// (`Microsecond`). Each unit has a fixed factor converting a number of days
/// into a count of that unit.
///
/// Units can be parsed from their plural (or singular) English name:
///
/// ```
/// use tdaxis::unit::BaseUnit;
///
/// assert_eq!("hours".parse::<BaseUnit>()?, BaseUnit::Hour);
/// assert_eq!("microsecond".parse::<BaseUnit>()?, BaseUnit::Microsecond);
/// assert_eq!(BaseUnit::Minute.to_string(), "minutes");
/// assert!("weeks".parse::<BaseUnit>().is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseUnit {
    #[cfg_attr(feature = "serde", serde(rename = "days"))]
    Day,
    #[cfg_attr(feature = "serde", serde(rename = "hours"))]
    Hour,
    #[cfg_attr(feature = "serde", serde(rename = "minutes"))]
    Minute,
    #[cfg_attr(feature = "serde", serde(rename = "seconds"))]
    Second,
    #[cfg_attr(feature = "serde", serde(rename = "microseconds"))]
    Microsecond,
}

impl BaseUnit {
    /// Every base unit, from the largest to the smallest.
    pub const ALL: [BaseUnit; 5] = [
        BaseUnit::Day,
        BaseUnit::Hour,
        BaseUnit::Minute,
        BaseUnit::Second,
        BaseUnit::Microsecond,
    ];

    /// Returns the number of this unit in one day.
    pub fn factor(self) -> f64 {
        match self {
            BaseUnit::Day => 1.0,
            BaseUnit::Hour => b::HOURS_PER_DAY,
            BaseUnit::Minute => b::MINUTES_PER_DAY,
            BaseUnit::Second => b::SECONDS_PER_DAY,
            BaseUnit::Microsecond => b::MICROSECONDS_PER_DAY,
        }
    }

    /// Returns the length of one of this unit, in days.
    ///
    /// This is the value locators report as their current unit.
    pub fn days(self) -> f64 {
        1.0 / self.factor()
    }

    /// Returns the unit whose length in days is exactly `scale`.
    ///
    /// # Example
    ///
    /// ```
    /// use tdaxis::unit::BaseUnit;
    ///
    /// assert_eq!(BaseUnit::from_days(1.0 / 24.0), Some(BaseUnit::Hour));
    /// assert_eq!(BaseUnit::from_days(2.0 / 24.0), None);
    /// ```
    pub fn from_days(scale: f64) -> Option<BaseUnit> {
        BaseUnit::ALL.into_iter().find(|unit| unit.days() == scale)
    }

    /// Returns the position of this unit in [`BaseUnit::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the plural name of this unit, like `hours`.
    pub fn plural(self) -> &'static str {
        match self {
            BaseUnit::Day => "days",
            BaseUnit::Hour => "hours",
            BaseUnit::Minute => "minutes",
            BaseUnit::Second => "seconds",
            BaseUnit::Microsecond => "microseconds",
        }
    }

    /// Returns the singular name of this unit, like `hour`.
    pub fn singular(self) -> &'static str {
        match self {
            BaseUnit::Day => "day",
            BaseUnit::Hour => "hour",
            BaseUnit::Minute => "minute",
            BaseUnit::Second => "second",
            BaseUnit::Microsecond => "microsecond",
        }
    }
}

impl core::str::FromStr for BaseUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<BaseUnit, Error> {
        BaseUnit::ALL
            .into_iter()
            .find(|unit| s == unit.plural() || s == unit.singular())
            .ok_or_else(|| E::Unknown { given: s.into() }.into())
    }
}

impl core::fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.plural())
    }
}

/// A table holding one value per base unit.
///
/// This is how per-unit configuration (like the interval lists of the auto
/// locator) is stored. It is indexed by [`BaseUnit`].
///
/// # Example
///
/// ```
/// use tdaxis::unit::{BaseUnit, UnitTable};
///
/// let mut table = UnitTable::new([11, 12, 11, 11, 8]);
/// table[BaseUnit::Hour] = 24;
/// assert_eq!(table[BaseUnit::Hour], 24);
/// assert_eq!(table[BaseUnit::Microsecond], 8);
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct UnitTable<T>([T; 5]);

impl<T> UnitTable<T> {
    /// Creates a table from values given in the order of [`BaseUnit::ALL`].
    pub fn new(values: [T; 5]) -> UnitTable<T> {
        UnitTable(values)
    }

    /// Returns an iterator over each unit and its value.
    pub fn iter(&self) -> impl Iterator<Item = (BaseUnit, &T)> {
        BaseUnit::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> core::ops::Index<BaseUnit> for UnitTable<T> {
    type Output = T;

    fn index(&self, unit: BaseUnit) -> &T {
        &self.0[unit.index()]
    }
}

impl<T> core::ops::IndexMut<BaseUnit> for UnitTable<T> {
    fn index_mut(&mut self, unit: BaseUnit) -> &mut T {
        &mut self.0[unit.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors() {
        assert_eq!(BaseUnit::Day.factor(), 1.0);
        assert_eq!(BaseUnit::Hour.factor(), 24.0);
        assert_eq!(BaseUnit::Minute.factor(), 1440.0);
        assert_eq!(BaseUnit::Second.factor(), 86400.0);
        assert_eq!(BaseUnit::Microsecond.factor(), 86_400_000_000.0);
        for unit in BaseUnit::ALL {
            assert_eq!(BaseUnit::from_days(unit.days()), Some(unit));
        }
        assert_eq!(BaseUnit::from_days(1e3 / b::MICROSECONDS_PER_DAY), None);
    }

    #[test]
    fn parse() {
        for unit in BaseUnit::ALL {
            assert_eq!(unit.plural().parse::<BaseUnit>().unwrap(), unit);
            assert_eq!(unit.singular().parse::<BaseUnit>().unwrap(), unit);
        }
        let err = "Days".parse::<BaseUnit>().unwrap_err();
        assert!(err.is_invalid_parameter());
        insta::assert_snapshot!(
            err,
            @"unrecognized unit `Days` (expected one of 'days', 'hours', 'minutes', 'seconds' or 'microseconds')",
        );
    }

    #[test]
    fn ordering() {
        assert!(BaseUnit::Day < BaseUnit::Microsecond);
        assert_eq!(BaseUnit::ALL.map(BaseUnit::index), [0, 1, 2, 3, 4]);
    }
}
