/*!
A small template language for rendering durations as tick labels.

A template is a string where every `%` starts a directive. The directive name
is the longest run of ASCII letters, digits and underscores following the
`%` (it may also be spelled `%{name}`, which is useful when a directive is
immediately followed by a letter). Everything else is copied to the output
verbatim.

Negative durations are rendered from their magnitude, and a single `-` is
prepended to the whole result.

# Conversion specifications

The "total" directives are not reduced by their parent unit. For example,
a duration of one and a half days has `%d` equal to `1`, `%h` equal to `12`
and `%H` equal to `36`.

| Directive | Example | Description |
| --------- | ------- | ----------- |
| `%d` | `2` | Whole days. |
| `%day` | `days` | `day` for exactly one whole day, otherwise `days`. |
| `%H` | `54` | Total hours. |
| `%M` | `3241` | Total minutes. |
| `%S` | `194460` | Total seconds. |
| `%h` | `06` | Hour of the day, zero padded to two digits. |
| `%m` | `01` | Minute of the hour, zero padded to two digits. |
| `%s` | `00` | Second of the minute, zero padded to two digits. |
| `%ms` | `001` | Milliseconds of the second, zero padded to three digits. |
| `%us` | `250` | Microseconds of the millisecond, padded to three digits. |
| `%%` | `%` | A literal `%`. |

Any other directive is an error. A directive name runs for as long as
there are ASCII letters, digits or underscores, so `%days` is an unknown
directive rather than `%d` followed by `ays`. Braces end a name early:
`%{d}days` renders as `2days`.

# Example

```
use tdaxis::{fmt, Timedelta};

let td = Timedelta::from_days_f64(2.25);
assert_eq!(fmt::format(td, "%d %day, %h:%m")?, "2 days, 06:00");
assert_eq!(fmt::format(-td, "%H hours")?, "-54 hours");

// The same thing, but starting from an axis coordinate.
assert_eq!(fmt::format_num("%d %day, %h:%m", 1.0)?, "1 day, 00:00");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use std::rc::Rc;

use crate::{util::b, Error, Timedelta};

pub use self::tex::wrap_in_tex;

mod template;
mod tex;

/// Renders a duration according to the given template.
///
/// `Timedelta::NAT` renders as `NaT` regardless of the template.
///
/// # Errors
///
/// This returns an error when the template contains a directive that isn't
/// recognized, or when it ends with a lone `%`.
pub fn format(td: Timedelta, template: &str) -> Result<String, Error> {
    if td.is_nat() {
        return Ok(String::from("NaT"));
    }
    let tm = BrokenDownTimedelta::from(td);
    let mut buf = String::with_capacity(template.len() + 8);
    let mut formatter =
        template::Formatter { fmt: template, tm: &tm, wtr: &mut buf };
    formatter.format()?;
    Ok(buf)
}

/// Renders an axis coordinate (in days) according to the given template.
///
/// The coordinate is first rounded to the nearest microsecond. This is
/// otherwise identical to [`format`].
pub fn format_num(template: &str, x: f64) -> Result<String, Error> {
    format(Timedelta::from_days_f64(x), template)
}

/// A duration broken down into the fields that label templates refer to.
///
/// Every field is a magnitude. The sign is kept separately.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct BrokenDownTimedelta {
    negative: bool,
    days: u64,
    total_hours: u64,
    total_minutes: u64,
    total_seconds: u64,
    hour: u64,
    minute: u64,
    second: u64,
    millisecond: u32,
    microsecond: u32,
}

impl From<Timedelta> for BrokenDownTimedelta {
    fn from(td: Timedelta) -> BrokenDownTimedelta {
        let nanos = td.as_nanos().unsigned_abs();
        let nanos_per_sec = b::NANOS_PER_SEC as u128;
        // The magnitude of any duration is at most `i64::MAX` seconds.
        let total_seconds = (nanos / nanos_per_sec) as u64;
        let subsec = (nanos % nanos_per_sec) as u32;

        let secs_per_day = b::SECS_PER_DAY as u64;
        let secs_per_hour = b::SECS_PER_HOUR as u64;
        let secs_per_min = b::SECS_PER_MIN as u64;
        BrokenDownTimedelta {
            negative: td.is_negative(),
            days: total_seconds / secs_per_day,
            total_hours: total_seconds / secs_per_hour,
            total_minutes: total_seconds / secs_per_min,
            total_seconds,
            hour: total_seconds % secs_per_day / secs_per_hour,
            minute: total_seconds % secs_per_hour / secs_per_min,
            second: total_seconds % secs_per_min,
            millisecond: subsec / b::NANOS_PER_MILLI as u32,
            microsecond: subsec / b::NANOS_PER_MICRO as u32 % 1_000,
        }
    }
}

/// How a single label is produced: a template or a callback.
///
/// Templates are rendered with [`format_num`]. Callbacks receive the
/// coordinate (in days) and the position of the tick, when known. Offset
/// labels are always rendered with a position of `None`.
///
/// A `FormatSpec` is immutable once constructed and cheap to clone.
///
/// # Example
///
/// ```
/// use tdaxis::fmt::FormatSpec;
///
/// let spec = FormatSpec::from("%h:%m");
/// assert_eq!(spec.format(0.5, None)?, "12:00");
///
/// let spec = FormatSpec::callback(|x, pos| format!("{x}@{pos:?}"));
/// assert_eq!(spec.format(0.5, Some(3))?, "0.5@Some(3)");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub enum FormatSpec {
    Template(Rc<str>),
    Callback(Rc<dyn Fn(f64, Option<usize>) -> String>),
}

impl FormatSpec {
    /// Creates a spec that calls the given function for each label.
    pub fn callback(
        f: impl Fn(f64, Option<usize>) -> String + 'static,
    ) -> FormatSpec {
        FormatSpec::Callback(Rc::new(f))
    }

    /// Returns the template string, if this spec is a template.
    pub fn as_template(&self) -> Option<&str> {
        match *self {
            FormatSpec::Template(ref template) => Some(&**template),
            FormatSpec::Callback(_) => None,
        }
    }

    /// Renders the given coordinate with this spec.
    pub fn format(&self, x: f64, pos: Option<usize>) -> Result<String, Error> {
        match *self {
            FormatSpec::Template(ref template) => format_num(template, x),
            FormatSpec::Callback(ref f) => Ok(f(x, pos)),
        }
    }
}

impl From<&str> for FormatSpec {
    fn from(template: &str) -> FormatSpec {
        FormatSpec::Template(Rc::from(template))
    }
}

impl From<String> for FormatSpec {
    fn from(template: String) -> FormatSpec {
        FormatSpec::Template(Rc::from(template))
    }
}

impl core::fmt::Debug for FormatSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            FormatSpec::Template(ref template) => {
                f.debug_tuple("Template").field(template).finish()
            }
            FormatSpec::Callback(_) => {
                f.debug_tuple("Callback").field(&"..").finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broken_down() {
        let tm = BrokenDownTimedelta::from(Timedelta::new(
            2 * b::SECS_PER_DAY + 6 * b::SECS_PER_HOUR + 61,
            1_250_000,
        ));
        assert_eq!(
            tm,
            BrokenDownTimedelta {
                negative: false,
                days: 2,
                total_hours: 54,
                total_minutes: 3241,
                total_seconds: 194_461,
                hour: 6,
                minute: 1,
                second: 1,
                millisecond: 1,
                microsecond: 250,
            }
        );

        let tm = BrokenDownTimedelta::from(-Timedelta::from_hours(36));
        assert!(tm.negative);
        assert_eq!((tm.days, tm.hour, tm.total_hours), (1, 12, 36));
    }

    #[test]
    fn format_days_and_clock() {
        let f = |x: f64, template: &str| format_num(template, x).unwrap();

        insta::assert_snapshot!(f(1.0, "%d %day, %h:%m"), @"1 day, 00:00");
        insta::assert_snapshot!(f(2.25, "%d %day, %h:%m"), @"2 days, 06:00");
        insta::assert_snapshot!(f(0.0, "%d %day"), @"0 days");
        insta::assert_snapshot!(f(-1.5, "%d %day, %h:%m"), @"-1 day, 12:00");
        insta::assert_snapshot!(f(-0.25, "%h:%m"), @"-06:00");
    }

    #[test]
    fn format_totals() {
        let f = |x: f64, template: &str| format_num(template, x).unwrap();

        insta::assert_snapshot!(f(2.0, "%H hours"), @"48 hours");
        insta::assert_snapshot!(f(0.25, "%M min"), @"360 min");
        insta::assert_snapshot!(
            f(362.13 / b::SECONDS_PER_DAY, "%S.%ms"),
            @"362.130",
        );
        insta::assert_snapshot!(
            f(362.0 / b::SECONDS_PER_DAY, "%h:%m:%s.%ms"),
            @"00:06:02.000",
        );
        insta::assert_snapshot!(
            f(1250.0 / b::MICROSECONDS_PER_DAY, "%s.%ms%us"),
            @"00.001250",
        );
    }

    #[test]
    fn format_literals_and_braces() {
        let td = Timedelta::from_hours(30);
        insta::assert_snapshot!(format(td, "100%% done").unwrap(), @"100% done");
        insta::assert_snapshot!(format(td, "%{d}d %{h}h").unwrap(), @"1d 06h");
        insta::assert_snapshot!(format(td, "%d").unwrap(), @"1");
        insta::assert_snapshot!(format(td, "").unwrap(), @"");
        insta::assert_snapshot!(format(td, "élan %h").unwrap(), @"élan 06");
        insta::assert_snapshot!(format(Timedelta::NAT, "%q").unwrap(), @"NaT");
    }

    #[test]
    fn format_errors() {
        let td = Timedelta::from_hours(30);
        let err = |template: &str| format(td, template).unwrap_err();

        insta::assert_snapshot!(
            err("%q"),
            @"found unrecognized directive `%q` (supported directives are %d, %day, %H, %M, %S, %h, %m, %s, %ms, %us and %%)",
        );
        insta::assert_snapshot!(
            err("%days"),
            @"found unrecognized directive `%days` (supported directives are %d, %day, %H, %M, %S, %h, %m, %s, %ms, %us and %%)",
        );
        insta::assert_snapshot!(
            err("%h:%"),
            @"invalid format string, expected directive after '%'",
        );
        insta::assert_snapshot!(
            err("%{d"),
            @"found unrecognized directive `%{d` (supported directives are %d, %day, %H, %M, %S, %h, %m, %s, %ms, %us and %%)",
        );
        insta::assert_snapshot!(
            err("% d"),
            @"found unrecognized directive `% ` (supported directives are %d, %day, %H, %M, %S, %h, %m, %s, %ms, %us and %%)",
        );
        assert!(err("%q").is_format());
    }

    #[test]
    fn spec_debug() {
        insta::assert_snapshot!(
            format!("{:?}", FormatSpec::from("%h")),
            @r#"Template("%h")"#,
        );
        let spec = FormatSpec::callback(|_, _| String::new());
        insta::assert_snapshot!(format!("{spec:?}"), @r#"Callback("..")"#);
        assert_eq!(spec.as_template(), None);
    }
}
