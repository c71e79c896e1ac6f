/*!
A module for constants describing the relationships between the base units.

The floating point constants are used for converting between day coordinates
and other units. They are written as products of smaller constants so that
the values (and therefore the rounding behavior of every computation built
on them) are exactly the same everywhere in this crate.

The integer constants are used by the exact (nanosecond) arithmetic on
`Timedelta`.
*/

pub(crate) const HOURS_PER_DAY: f64 = 24.0;
pub(crate) const MINUTES_PER_HOUR: f64 = 60.0;
pub(crate) const SECONDS_PER_MINUTE: f64 = 60.0;
pub(crate) const MINUTES_PER_DAY: f64 = MINUTES_PER_HOUR * HOURS_PER_DAY;
pub(crate) const SECONDS_PER_HOUR: f64 = SECONDS_PER_MINUTE * MINUTES_PER_HOUR;
pub(crate) const SECONDS_PER_DAY: f64 = SECONDS_PER_HOUR * HOURS_PER_DAY;
pub(crate) const MICROSECONDS_PER_SECOND: f64 = 1e6;
pub(crate) const MICROSECONDS_PER_DAY: f64 =
    MICROSECONDS_PER_SECOND * SECONDS_PER_DAY;

pub(crate) const NANOS_PER_MICRO: i64 = 1_000;
pub(crate) const NANOS_PER_MILLI: i64 = 1_000_000;
pub(crate) const NANOS_PER_SEC: i64 = 1_000_000_000;
pub(crate) const NANOS_PER_MIN: i64 = 60 * NANOS_PER_SEC;
pub(crate) const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MIN;
pub(crate) const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;
pub(crate) const NANOS_PER_WEEK: i64 = 7 * NANOS_PER_DAY;

pub(crate) const SECS_PER_MIN: i64 = 60;
pub(crate) const SECS_PER_HOUR: i64 = 60 * SECS_PER_MIN;
pub(crate) const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// The most ticks a locator is expected to produce before it complains.
pub(crate) const MAX_TICKS: usize = 1000;
