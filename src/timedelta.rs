use crate::util::b;

const NANOS_PER_SEC: i128 = b::NANOS_PER_SEC as i128;
const NANOS_PER_DAY: i128 = b::NANOS_PER_DAY as i128;

/// A signed duration of time with nanosecond precision, or "not a time."
///
/// This is the canonical representation that every duration form supported
/// by this crate is normalized to before being turned into an axis
/// coordinate. It is stored as a number of whole seconds plus a fractional
/// second in nanoseconds, where the two parts always have the same sign.
///
/// A distinguished [`Timedelta::NAT`] value stands for a missing duration.
/// It converts to a NaN coordinate and a NaN coordinate converts back to it.
///
/// # Display
///
/// The `Display` implementation uses the conventional
/// `[D day[s], ]H:MM:SS[.ffffff]` form, where the day count may be negative
/// but the clock part is always positive:
///
/// ```
/// use tdaxis::Timedelta;
///
/// assert_eq!(Timedelta::from_days(100).to_string(), "100 days, 0:00:00");
/// assert_eq!(Timedelta::from_hours(12).to_string(), "12:00:00");
/// assert_eq!(Timedelta::from_secs(-1).to_string(), "-1 day, 23:59:59");
/// assert_eq!(Timedelta::from_micros(200).to_string(), "0:00:00.000200");
/// assert_eq!(Timedelta::NAT.to_string(), "NaT");
/// ```
///
/// # Ordering
///
/// Durations are ordered by their length. `Timedelta::NAT` compares equal to
/// itself and sorts before every other duration.
///
/// # Saturation
///
/// Constructors and arithmetic saturate at [`Timedelta::MIN`] and
/// [`Timedelta::MAX`] instead of failing or panicking. Arithmetic involving
/// `Timedelta::NAT` always produces `Timedelta::NAT`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timedelta {
    secs: i64,
    nanos: i32,
}

impl Timedelta {
    /// A duration of zero length.
    pub const ZERO: Timedelta = Timedelta { secs: 0, nanos: 0 };

    /// The "not a time" sentinel.
    pub const NAT: Timedelta = Timedelta { secs: i64::MIN, nanos: 0 };

    /// The most negative duration that isn't `Timedelta::NAT`.
    pub const MIN: Timedelta =
        Timedelta { secs: i64::MIN + 1, nanos: -999_999_999 };

    /// The most positive duration.
    pub const MAX: Timedelta =
        Timedelta { secs: i64::MAX, nanos: 999_999_999 };

    /// Creates a new duration from whole seconds and fractional nanoseconds.
    ///
    /// The two parts may have different signs and `nanos` may exceed one
    /// second. The result is normalized.
    ///
    /// # Example
    ///
    /// ```
    /// use tdaxis::Timedelta;
    ///
    /// let td = Timedelta::new(1, -500_000_000);
    /// assert_eq!(td.as_secs(), 0);
    /// assert_eq!(td.subsec_nanos(), 500_000_000);
    /// ```
    pub fn new(secs: i64, nanos: i32) -> Timedelta {
        Timedelta::from_nanos_i128(
            i128::from(secs) * NANOS_PER_SEC + i128::from(nanos),
        )
    }

    /// Creates a duration of the given number of 24 hour days.
    pub fn from_days(days: i64) -> Timedelta {
        Timedelta::from_nanos_i128(i128::from(days) * NANOS_PER_DAY)
    }

    /// Creates a duration of the given number of hours.
    pub fn from_hours(hours: i64) -> Timedelta {
        Timedelta::from_nanos_i128(
            i128::from(hours) * i128::from(b::NANOS_PER_HOUR),
        )
    }

    /// Creates a duration of the given number of minutes.
    pub fn from_minutes(minutes: i64) -> Timedelta {
        Timedelta::from_nanos_i128(
            i128::from(minutes) * i128::from(b::NANOS_PER_MIN),
        )
    }

    /// Creates a duration of the given number of seconds.
    pub fn from_secs(secs: i64) -> Timedelta {
        Timedelta::from_nanos_i128(i128::from(secs) * NANOS_PER_SEC)
    }

    /// Creates a duration of the given number of milliseconds.
    pub fn from_millis(millis: i64) -> Timedelta {
        Timedelta::from_nanos_i128(
            i128::from(millis) * i128::from(b::NANOS_PER_MILLI),
        )
    }

    /// Creates a duration of the given number of microseconds.
    pub fn from_micros(micros: i64) -> Timedelta {
        Timedelta::from_nanos_i128(
            i128::from(micros) * i128::from(b::NANOS_PER_MICRO),
        )
    }

    /// Creates a duration of the given number of nanoseconds.
    pub fn from_nanos(nanos: i64) -> Timedelta {
        Timedelta::from_nanos_i128(i128::from(nanos))
    }

    /// Creates a duration from a total number of nanoseconds, saturating at
    /// the representable boundaries.
    pub(crate) fn from_nanos_i128(nanos: i128) -> Timedelta {
        let nanos =
            nanos.clamp(Timedelta::MIN.as_nanos(), Timedelta::MAX.as_nanos());
        // Both casts are lossless after clamping. Truncating division keeps
        // the two parts on the same side of zero.
        let secs = (nanos / NANOS_PER_SEC) as i64;
        let nanos = (nanos % NANOS_PER_SEC) as i32;
        Timedelta { secs, nanos }
    }

    /// Creates a duration from a fractional number of days.
    ///
    /// The result is rounded to the nearest microsecond, with ties going to
    /// the even microsecond. A NaN input produces `Timedelta::NAT`. Inputs
    /// that are too big (including infinities) saturate.
    ///
    /// An `f64` only resolves every microsecond up to roughly ten thousand
    /// days. Past that, a coordinate is only as precise as its own spacing,
    /// which is about `days * 2^-52` days.
    ///
    /// # Example
    ///
    /// ```
    /// use tdaxis::Timedelta;
    ///
    /// let td = Timedelta::from_days_f64(1.5);
    /// assert_eq!(td.to_string(), "1 day, 12:00:00");
    /// let td = Timedelta::from_days_f64(-0.25);
    /// assert_eq!(td.to_string(), "-1 day, 18:00:00");
    /// assert!(Timedelta::from_days_f64(f64::NAN).is_nat());
    /// ```
    pub fn from_days_f64(days: f64) -> Timedelta {
        if days.is_nan() {
            return Timedelta::NAT;
        }
        if days.is_infinite() {
            return if days > 0.0 { Timedelta::MAX } else { Timedelta::MIN };
        }
        // Whole days, whole seconds and microseconds are split apart before
        // any rounding so that large day counts don't swamp the fraction.
        let whole_days = days.trunc();
        let day_secs = (days - whole_days) * b::SECONDS_PER_DAY;
        let whole_secs = day_secs.trunc();
        let micros = ((day_secs - whole_secs) * b::MICROSECONDS_PER_SECOND)
            .round_ties_even();
        // `as` saturates for floats, and the saturated values are well within
        // the range of an `i128` product.
        let nanos = i128::from(whole_days as i64) * NANOS_PER_DAY
            + i128::from(whole_secs as i64) * NANOS_PER_SEC
            + i128::from(micros as i64) * i128::from(b::NANOS_PER_MICRO);
        Timedelta::from_nanos_i128(nanos)
    }

    /// Returns this duration as a fractional number of days.
    ///
    /// `Timedelta::NAT` returns NaN.
    ///
    /// The whole seconds (floored) and the remaining fraction of a second are
    /// converted separately and then summed, which keeps sub-microsecond
    /// precision for durations of up to a few thousand days.
    pub fn as_days_f64(self) -> f64 {
        if self.is_nat() {
            return f64::NAN;
        }
        let (secs, nanos) = if self.nanos < 0 {
            (self.secs - 1, self.nanos + b::NANOS_PER_SEC as i32)
        } else {
            (self.secs, self.nanos)
        };
        let secs = secs as f64 / b::SECONDS_PER_DAY;
        let fraction = f64::from(nanos) / 1e9 / b::SECONDS_PER_DAY;
        secs + fraction
    }

    /// Returns true if this is the "not a time" sentinel.
    pub fn is_nat(self) -> bool {
        self.secs == i64::MIN
    }

    /// Returns true if this duration is strictly less than zero.
    pub fn is_negative(self) -> bool {
        !self.is_nat() && (self.secs < 0 || self.nanos < 0)
    }

    /// Returns true if this duration has zero length.
    pub fn is_zero(self) -> bool {
        self.secs == 0 && self.nanos == 0
    }

    /// Returns the number of whole seconds in this duration.
    ///
    /// The sign matches the sign of the duration. For `Timedelta::NAT`, this
    /// returns `i64::MIN`.
    pub fn as_secs(self) -> i64 {
        self.secs
    }

    /// Returns the fractional part of this duration in nanoseconds.
    ///
    /// The sign matches the sign of the duration.
    pub fn subsec_nanos(self) -> i32 {
        self.nanos
    }

    /// Returns the total number of nanoseconds in this duration.
    ///
    /// For `Timedelta::NAT`, the value returned is meaningless.
    pub fn as_nanos(self) -> i128 {
        i128::from(self.secs) * NANOS_PER_SEC + i128::from(self.nanos)
    }

    /// Returns the absolute value of this duration.
    pub fn abs(self) -> Timedelta {
        if self.is_negative() {
            -self
        } else {
            self
        }
    }

    /// Adds two durations, returning `None` if the result would be out of
    /// bounds or if either one is `Timedelta::NAT`.
    pub fn checked_add(self, rhs: Timedelta) -> Option<Timedelta> {
        if self.is_nat() || rhs.is_nat() {
            return None;
        }
        let sum = self.as_nanos() + rhs.as_nanos();
        if sum < Timedelta::MIN.as_nanos() || sum > Timedelta::MAX.as_nanos() {
            return None;
        }
        Some(Timedelta::from_nanos_i128(sum))
    }

    /// Subtracts `rhs` from this duration, returning `None` if the result
    /// would be out of bounds or if either one is `Timedelta::NAT`.
    pub fn checked_sub(self, rhs: Timedelta) -> Option<Timedelta> {
        if rhs.is_nat() {
            return None;
        }
        self.checked_add(-rhs)
    }

    /// Adds two durations, saturating at the boundaries.
    pub fn saturating_add(self, rhs: Timedelta) -> Timedelta {
        if self.is_nat() || rhs.is_nat() {
            return Timedelta::NAT;
        }
        Timedelta::from_nanos_i128(self.as_nanos() + rhs.as_nanos())
    }
}

impl Default for Timedelta {
    fn default() -> Timedelta {
        Timedelta::ZERO
    }
}

impl core::ops::Neg for Timedelta {
    type Output = Timedelta;

    fn neg(self) -> Timedelta {
        if self.is_nat() {
            return self;
        }
        // Can't overflow since MIN is the negation of MAX.
        Timedelta { secs: -self.secs, nanos: -self.nanos }
    }
}

impl core::ops::Add for Timedelta {
    type Output = Timedelta;

    fn add(self, rhs: Timedelta) -> Timedelta {
        self.saturating_add(rhs)
    }
}

impl core::ops::Sub for Timedelta {
    type Output = Timedelta;

    fn sub(self, rhs: Timedelta) -> Timedelta {
        self.saturating_add(-rhs)
    }
}

impl From<core::time::Duration> for Timedelta {
    fn from(d: core::time::Duration) -> Timedelta {
        Timedelta::from_nanos_i128(
            i128::from(d.as_secs()) * NANOS_PER_SEC
                + i128::from(d.subsec_nanos()),
        )
    }
}

impl core::fmt::Display for Timedelta {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.is_nat() {
            return f.write_str("NaT");
        }
        let nanos = self.as_nanos();
        let days = nanos.div_euclid(NANOS_PER_DAY);
        let rest = nanos.rem_euclid(NANOS_PER_DAY);
        let secs = rest / NANOS_PER_SEC;
        let subsec = rest % NANOS_PER_SEC;
        if days != 0 {
            let plural = if days.abs() == 1 { "" } else { "s" };
            write!(f, "{days} day{plural}, ")?;
        }
        let hours = secs / i128::from(b::SECS_PER_HOUR);
        let minutes = secs % i128::from(b::SECS_PER_HOUR)
            / i128::from(b::SECS_PER_MIN);
        let seconds = secs % i128::from(b::SECS_PER_MIN);
        write!(f, "{hours}:{minutes:02}:{seconds:02}")?;
        if subsec != 0 {
            let per_micro = i128::from(b::NANOS_PER_MICRO);
            if subsec % per_micro == 0 {
                write!(f, ".{:06}", subsec / per_micro)?;
            } else {
                write!(f, ".{subsec:09}")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Timedelta {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if f.alternate() {
            f.debug_struct("Timedelta")
                .field("secs", &self.secs)
                .field("nanos", &self.nanos)
                .finish()
        } else {
            write!(f, "Timedelta({self})")
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Timedelta {
    fn arbitrary(g: &mut quickcheck::Gen) -> Timedelta {
        // Microsecond precision within about ten thousand days, which is
        // the range where a day coordinate can represent every microsecond.
        // Larger magnitudes are covered by
        // `prop_days_round_trip_any_magnitude`.
        let max = 10_000 * b::SECS_PER_DAY * 1_000_000;
        let micros = i64::arbitrary(g) % max;
        Timedelta::from_micros(micros)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let micros = (self.as_nanos() / 1_000) as i64;
        Box::new(micros.shrink().map(Timedelta::from_micros))
    }
}
