/*!
Tdaxis puts durations on chart axes.

A chart positions everything on a floating point axis. This crate maps
durations onto such an axis (one unit is one day), decides where ticks go
on an axis of durations, and labels those ticks in a way that reads
naturally for durations, like `2 days, 04:00` or `04:00` with an offset of
`2 days` shown once.

# Overview

* [`codec`] converts durations, in any of the supported forms, to axis
  coordinates and back without losing precision.
* [`fmt`] renders a coordinate as text from a template like `%d %day,
  %h:%m`.
* [`locator`] places ticks: every so many units with
  [`FixedTimedeltaLocator`](locator::FixedTimedeltaLocator), or with a unit
  and interval picked from the view with
  [`AutoTimedeltaLocator`](locator::AutoTimedeltaLocator).
* [`formatter`] labels ticks, either with an explicit format or with one
  that follows the unit the locator picked.
* [`converter`] bundles a locator and a formatter for a host chart, and
  [`integration`] registers converters with one.
* [`config`] holds the settings a host would keep globally.

# Example

This places a tick every four hours across a forty hour view, and labels
each tick with its hours relative to a whole number of days:

```
use tdaxis::{
    formatter::{TickFormatter, TimedeltaFormatter},
    locator::{FixedTimedeltaLocator, TickLocator},
    unit::BaseUnit,
};

// 100 days, 03:40
let start = 100.0 + 220.0 / 1440.0;
let mut locator = FixedTimedeltaLocator::new(BaseUnit::Hour, 4.0);
let ticks = locator.tick_values(start, start + 40.0 / 24.0);

let mut formatter = TimedeltaFormatter::new("%H:%m")
    .with_offset(Some(BaseUnit::Day), Some("%d %day".into()))?;
let labels = formatter.format_ticks(&ticks, None)?;
assert_eq!(labels[..3], ["0:00", "4:00", "8:00"]);
assert_eq!(labels.last().map(|s| s.as_str()), Some("44:00"));
assert_eq!(formatter.offset(), "100 days");

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Crate features

* `logging`: emits messages through the [`log`](https://docs.rs/log) crate,
  mostly about which unit and interval were picked for an axis and why.
* `serde`: implements `Serialize` and `Deserialize` for
  [`config::Settings`].
*/

#![deny(rustdoc::broken_intra_doc_links)]
// No clue why this thing is still unstable because it's pretty amazing. This
// adds Cargo feature annotations to items in the rustdoc output.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

pub use crate::{error::Error, timedelta::Timedelta};

#[macro_use]
mod logging;

pub mod axis;
pub mod codec;
pub mod config;
pub mod converter;
mod error;
pub mod fmt;
pub mod formatter;
pub mod integration;
pub mod locator;
mod timedelta;
pub mod unit;
mod util;
