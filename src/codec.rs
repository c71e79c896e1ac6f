/*!
Conversion between durations and axis coordinates.

An axis coordinate is a signed, fractional number of days stored in an `f64`.
Every duration form this crate accepts is first normalized to a
[`Timedelta`], and only then converted to days. Going the other way, a
coordinate is rounded to the nearest microsecond.

Missing durations are carried through as NaN coordinates (and NaN
coordinates come back as [`Timedelta::NAT`]).

# Source forms

Durations may arrive in three shapes:

* [`Timedelta`] itself (or `core::time::Duration`, which converts to one).
* [`TickDuration`], an integer count of some fixed [`TickUnit`], where
  `i64::MIN` means "not a time."
* [`ScalarTimedelta`], a nanosecond payload tagged with the resolution it
  was produced at, where `i64::MIN` means "missing."

Sequences of each form are grouped in [`Timedeltas`].

# Example

```
use tdaxis::{codec, Timedelta};

let x = codec::to_num(Timedelta::from_hours(36));
assert_eq!(x, 1.5);
assert_eq!(codec::from_num(x), Timedelta::from_hours(36));

assert!(codec::to_num(Timedelta::NAT).is_nan());
assert!(codec::from_num(f64::NAN).is_nat());
```
*/

use crate::{util::b, Timedelta};

/// The unit of the integer count in a [`TickDuration`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum TickUnit {
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

impl TickUnit {
    /// Returns the number of nanoseconds in one tick of this unit.
    pub fn nanos(self) -> i64 {
        use self::TickUnit::*;

        match self {
            Week => b::NANOS_PER_WEEK,
            Day => b::NANOS_PER_DAY,
            Hour => b::NANOS_PER_HOUR,
            Minute => b::NANOS_PER_MIN,
            Second => b::NANOS_PER_SEC,
            Millisecond => b::NANOS_PER_MILLI,
            Microsecond => b::NANOS_PER_MICRO,
            Nanosecond => 1,
        }
    }
}

/// A fixed width integer duration: a count of ticks of some unit.
///
/// A count of `i64::MIN` is "not a time."
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TickDuration {
    count: i64,
    unit: TickUnit,
}

impl TickDuration {
    /// Creates a new tick duration.
    pub fn new(count: i64, unit: TickUnit) -> TickDuration {
        TickDuration { count, unit }
    }

    /// Creates a "not a time" tick duration in the given unit.
    pub fn nat(unit: TickUnit) -> TickDuration {
        TickDuration { count: i64::MIN, unit }
    }

    /// Returns the number of ticks.
    pub fn count(self) -> i64 {
        self.count
    }

    /// Returns the unit of each tick.
    pub fn unit(self) -> TickUnit {
        self.unit
    }

    /// Returns true if this is "not a time."
    pub fn is_nat(self) -> bool {
        self.count == i64::MIN
    }

    /// Converts this to the canonical duration, saturating on overflow.
    pub fn to_timedelta(self) -> Timedelta {
        if self.is_nat() {
            return Timedelta::NAT;
        }
        Timedelta::from_nanos_i128(
            i128::from(self.count) * i128::from(self.unit.nanos()),
        )
    }
}

impl From<TickDuration> for Timedelta {
    fn from(td: TickDuration) -> Timedelta {
        td.to_timedelta()
    }
}

/// A scalar duration carrying a nanosecond payload and a resolution.
///
/// This is the form third party tabular libraries tend to hand out: the
/// payload is always a count of nanoseconds, but the scalar remembers the
/// resolution it was stored at. A payload of `i64::MIN` means "missing."
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ScalarTimedelta {
    value: i64,
    resolution: TickUnit,
}

impl ScalarTimedelta {
    /// Creates a scalar with the given nanosecond payload and nanosecond
    /// resolution.
    pub fn new(nanos: i64) -> ScalarTimedelta {
        ScalarTimedelta { value: nanos, resolution: TickUnit::Nanosecond }
    }

    /// Creates a scalar with the given nanosecond payload and resolution.
    pub fn with_resolution(
        nanos: i64,
        resolution: TickUnit,
    ) -> ScalarTimedelta {
        ScalarTimedelta { value: nanos, resolution }
    }

    /// Creates a missing scalar.
    pub fn missing() -> ScalarTimedelta {
        ScalarTimedelta::new(i64::MIN)
    }

    /// Returns the nanosecond payload.
    pub fn value(self) -> i64 {
        self.value
    }

    /// Returns the resolution this scalar was stored at.
    pub fn resolution(self) -> TickUnit {
        self.resolution
    }

    /// Returns true if this is the missing sentinel.
    pub fn is_missing(self) -> bool {
        self.value == i64::MIN
    }

    /// Converts this to the canonical duration after truncating the payload
    /// to the given resolution.
    fn to_timedelta_at(self, unit: TickUnit) -> Timedelta {
        if self.is_missing() {
            return Timedelta::NAT;
        }
        let count = self.value.div_euclid(unit.nanos());
        TickDuration::new(count, unit).to_timedelta()
    }

    fn to_timedelta(self) -> Timedelta {
        self.to_timedelta_at(self.resolution)
    }
}

impl From<ScalarTimedelta> for Timedelta {
    fn from(scalar: ScalarTimedelta) -> Timedelta {
        scalar.to_timedelta()
    }
}

/// A single duration in any of the supported source forms.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TimedeltaLike {
    Native(Timedelta),
    Ticks(TickDuration),
    Scalar(ScalarTimedelta),
}

impl TimedeltaLike {
    /// Normalizes this value to the canonical duration.
    pub fn to_timedelta(self) -> Timedelta {
        match self {
            TimedeltaLike::Native(td) => td,
            TimedeltaLike::Ticks(td) => td.to_timedelta(),
            TimedeltaLike::Scalar(scalar) => scalar.to_timedelta(),
        }
    }
}

impl From<Timedelta> for TimedeltaLike {
    fn from(td: Timedelta) -> TimedeltaLike {
        TimedeltaLike::Native(td)
    }
}

impl From<core::time::Duration> for TimedeltaLike {
    fn from(d: core::time::Duration) -> TimedeltaLike {
        TimedeltaLike::Native(Timedelta::from(d))
    }
}

impl From<TickDuration> for TimedeltaLike {
    fn from(td: TickDuration) -> TimedeltaLike {
        TimedeltaLike::Ticks(td)
    }
}

impl From<ScalarTimedelta> for TimedeltaLike {
    fn from(scalar: ScalarTimedelta) -> TimedeltaLike {
        TimedeltaLike::Scalar(scalar)
    }
}

/// A sequence of durations in one of the supported source forms.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Timedeltas {
    Native(Vec<Timedelta>),
    /// Integer counts that all share one unit. `i64::MIN` is "not a time."
    Ticks { unit: TickUnit, counts: Vec<i64> },
    Scalars(Vec<ScalarTimedelta>),
}

impl Timedeltas {
    /// Returns the number of durations in this sequence.
    pub fn len(&self) -> usize {
        match *self {
            Timedeltas::Native(ref tds) => tds.len(),
            Timedeltas::Ticks { ref counts, .. } => counts.len(),
            Timedeltas::Scalars(ref scalars) => scalars.len(),
        }
    }

    /// Returns true if this sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalizes every element to the canonical duration.
    ///
    /// For scalars, the tick resolution of the whole sequence is taken from
    /// the first element that isn't missing (or microseconds when every
    /// element is missing). Each payload is truncated to that resolution, and
    /// missing elements become `Timedelta::NAT`.
    pub fn to_timedeltas(&self) -> Vec<Timedelta> {
        match *self {
            Timedeltas::Native(ref tds) => tds.clone(),
            Timedeltas::Ticks { unit, ref counts } => counts
                .iter()
                .map(|&count| TickDuration::new(count, unit).to_timedelta())
                .collect(),
            Timedeltas::Scalars(ref scalars) => {
                let unit = scalars
                    .iter()
                    .find(|s| !s.is_missing())
                    .map(|s| s.resolution())
                    .unwrap_or(TickUnit::Microsecond);
                scalars.iter().map(|s| s.to_timedelta_at(unit)).collect()
            }
        }
    }
}

impl From<Vec<Timedelta>> for Timedeltas {
    fn from(tds: Vec<Timedelta>) -> Timedeltas {
        Timedeltas::Native(tds)
    }
}

impl From<Vec<ScalarTimedelta>> for Timedeltas {
    fn from(scalars: Vec<ScalarTimedelta>) -> Timedeltas {
        Timedeltas::Scalars(scalars)
    }
}

/// Converts a single duration to an axis coordinate in days.
///
/// "Not a time" (and missing scalars) become NaN. A scalar is truncated to
/// its own resolution, which gives the same coordinate as converting it as
/// a sequence of one.
pub fn to_num(value: impl Into<TimedeltaLike>) -> f64 {
    value.into().to_timedelta().as_days_f64()
}

/// Converts a sequence of durations to axis coordinates in days.
///
/// The output has the same length and order as the input.
///
/// # Example
///
/// ```
/// use tdaxis::codec::{self, TickUnit, Timedeltas};
///
/// let values = Timedeltas::Ticks {
///     unit: TickUnit::Hour,
///     counts: vec![6, i64::MIN, -12],
/// };
/// let nums = codec::to_nums(&values);
/// assert_eq!(nums[0], 0.25);
/// assert!(nums[1].is_nan());
/// assert_eq!(nums[2], -0.5);
/// ```
pub fn to_nums(values: &Timedeltas) -> Vec<f64> {
    values.to_timedeltas().into_iter().map(Timedelta::as_days_f64).collect()
}

/// Converts an axis coordinate in days back to a duration.
///
/// The result is rounded to the nearest microsecond. NaN becomes
/// `Timedelta::NAT` and coordinates that are out of range saturate.
pub fn from_num(x: f64) -> Timedelta {
    Timedelta::from_days_f64(x)
}

/// Converts a sequence of axis coordinates back to durations.
pub fn from_nums(xs: &[f64]) -> Vec<Timedelta> {
    xs.iter().copied().map(from_num).collect()
}
