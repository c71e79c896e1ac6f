/*!
Crate-wide settings, the equivalent of a host chart's runtime parameters.

[`Settings`] holds the choices a host chart would normally keep in its own
global configuration: which converter to register for durations, and
whether labels are typeset with TeX. Settings can be built explicitly, read
from the environment with [`Settings::from_env`] or (with the `serde`
feature enabled) deserialized.

# Environment

* `TDAXIS_CONVERTER` is one of `default`, `auto` or `concise`.
* `TDAXIS_USETEX` is a boolean like `1`, `true`, `yes` or `on` (or `0`,
  `false`, `no` or `off`).

Invalid values are ignored, and a warning is logged when the `logging`
feature is enabled.
*/

use std::ffi::OsString;

use crate::{error::config::Error as E, Error};

const ENV_CONVERTER: &str = "TDAXIS_CONVERTER";
const ENV_USETEX: &str = "TDAXIS_USETEX";

/// Which converter handles durations plotted on an axis.
///
/// # Example
///
/// ```
/// use tdaxis::config::ConverterKind;
///
/// assert_eq!("concise".parse::<ConverterKind>()?, ConverterKind::Concise);
/// assert_eq!(ConverterKind::Auto.to_string(), "auto");
/// assert!("fancy".parse::<ConverterKind>().is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ConverterKind {
    /// Whatever converter the settings name, or `Auto` when they name
    /// `Default` too.
    #[default]
    Default,
    /// Fully labeled ticks, via
    /// [`TimedeltaConverter`](crate::converter::TimedeltaConverter).
    Auto,
    /// Compact labels with an offset, via
    /// [`ConciseTimedeltaConverter`][concise].
    ///
    /// [concise]: crate::converter::ConciseTimedeltaConverter
    Concise,
}

impl ConverterKind {
    /// Resolves `Default` through the given settings.
    ///
    /// The result is never `Default`.
    ///
    /// # Example
    ///
    /// ```
    /// use tdaxis::config::{ConverterKind, Settings};
    ///
    /// let settings = Settings::new().converter(ConverterKind::Concise);
    /// assert_eq!(
    ///     ConverterKind::Default.resolve(&settings),
    ///     ConverterKind::Concise,
    /// );
    /// assert_eq!(
    ///     ConverterKind::Default.resolve(&Settings::new()),
    ///     ConverterKind::Auto,
    /// );
    /// assert_eq!(
    ///     ConverterKind::Auto.resolve(&settings),
    ///     ConverterKind::Auto,
    /// );
    /// ```
    pub fn resolve(self, settings: &Settings) -> ConverterKind {
        match (self, settings.converter) {
            (ConverterKind::Default, ConverterKind::Default) => {
                ConverterKind::Auto
            }
            (ConverterKind::Default, kind) => kind,
            (kind, _) => kind,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ConverterKind::Default => "default",
            ConverterKind::Auto => "auto",
            ConverterKind::Concise => "concise",
        }
    }
}

impl core::str::FromStr for ConverterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<ConverterKind, Error> {
        match s {
            "default" => Ok(ConverterKind::Default),
            "auto" => Ok(ConverterKind::Auto),
            "concise" => Ok(ConverterKind::Concise),
            _ => Err(Error::from(E::UnknownConverter { given: s.into() })),
        }
    }
}

impl core::fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings shared by every axis of durations.
///
/// # Example
///
/// ```
/// use tdaxis::config::{ConverterKind, Settings};
///
/// let settings = Settings::new()
///     .converter(ConverterKind::Concise)
///     .usetex(true);
/// assert_eq!(settings.get_converter(), ConverterKind::Concise);
/// assert!(settings.get_usetex());
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Settings {
    converter: ConverterKind,
    usetex: bool,
}

impl Settings {
    /// Returns the default settings: the `Default` converter and no TeX.
    pub fn new() -> Settings {
        Settings::default()
    }

    /// Reads settings from the environment.
    ///
    /// Unset or invalid variables leave the corresponding setting at its
    /// default. See the [`config`](crate::config) module for the variables
    /// that are read.
    pub fn from_env() -> Settings {
        Settings::from_vars(|name| std::env::var_os(name))
    }

    fn from_vars(var: impl Fn(&str) -> Option<OsString>) -> Settings {
        let mut settings = Settings::new();
        let parse_kind = str::parse::<ConverterKind>;
        if let Some(kind) = read(&var, ENV_CONVERTER, parse_kind) {
            debug!("using converter {kind} from {ENV_CONVERTER}");
            settings.converter = kind;
        }
        if let Some(usetex) = read(&var, ENV_USETEX, parse_bool) {
            debug!("using usetex={usetex} from {ENV_USETEX}");
            settings.usetex = usetex;
        }
        settings
    }

    /// Sets the converter to register for durations.
    pub fn converter(self, kind: ConverterKind) -> Settings {
        Settings { converter: kind, ..self }
    }

    /// Sets whether labels are typeset with TeX.
    pub fn usetex(self, yes: bool) -> Settings {
        Settings { usetex: yes, ..self }
    }

    /// Returns the converter to register for durations.
    pub fn get_converter(&self) -> ConverterKind {
        self.converter
    }

    /// Returns whether labels are typeset with TeX.
    pub fn get_usetex(&self) -> bool {
        self.usetex
    }
}

/// Reads and parses a single variable, logging a warning when it is set to
/// something invalid.
fn read<T>(
    var: impl Fn(&str) -> Option<OsString>,
    name: &'static str,
    parse: impl Fn(&str) -> Result<T, Error>,
) -> Option<T> {
    let value = var(name)?;
    let result = value
        .to_str()
        .ok_or_else(|| Error::from(E::EnvVar { name }))
        .and_then(|value| parse(value.trim()));
    match result {
        Ok(value) => Some(value),
        Err(_err) => {
            warn!("ignoring invalid value for {name}: {_err}");
            None
        }
    }
}

fn parse_bool(s: &str) -> Result<bool, Error> {
    match &*s.to_ascii_lowercase() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::from(E::UnknownBool { given: s.into() })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(
        pairs: &'a [(&'a str, &'a str)],
    ) -> impl Fn(&str) -> Option<OsString> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|&&(key, _)| key == name)
                .map(|&(_, value)| OsString::from(value))
        }
    }

    #[test]
    fn from_vars() {
        let settings = Settings::from_vars(vars(&[]));
        assert_eq!(settings, Settings::new());

        let settings = Settings::from_vars(vars(&[
            ("TDAXIS_CONVERTER", "concise"),
            ("TDAXIS_USETEX", " Yes "),
        ]));
        assert_eq!(settings.get_converter(), ConverterKind::Concise);
        assert!(settings.get_usetex());

        // Invalid values are ignored one by one.
        let settings = Settings::from_vars(vars(&[
            ("TDAXIS_CONVERTER", "fancy"),
            ("TDAXIS_USETEX", "off"),
        ]));
        assert_eq!(settings.get_converter(), ConverterKind::Default);
        assert!(!settings.get_usetex());

        let settings =
            Settings::from_vars(vars(&[("TDAXIS_USETEX", "maybe")]));
        assert!(!settings.get_usetex());
    }

    #[test]
    fn errors() {
        insta::assert_snapshot!(
            "fancy".parse::<ConverterKind>().unwrap_err(),
            @"unrecognized converter `fancy` (expected one of 'default', 'auto' or 'concise')",
        );
        insta::assert_snapshot!(
            parse_bool("maybe").unwrap_err(),
            @"unrecognized boolean `maybe` (expected one of '1', 'true', 'yes', 'on', '0', 'false', 'no' or 'off')",
        );
        assert!(parse_bool("maybe").unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn round_trip_names() {
        for kind in [
            ConverterKind::Default,
            ConverterKind::Auto,
            ConverterKind::Concise,
        ] {
            let parsed = kind.to_string().parse::<ConverterKind>().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde() {
        let settings: Settings =
            serde_json::from_str(r#"{"converter":"concise","usetex":true}"#)
                .unwrap();
        assert_eq!(
            settings,
            Settings::new().converter(ConverterKind::Concise).usetex(true),
        );
        insta::assert_snapshot!(
            serde_json::to_string(&Settings::new()).unwrap(),
            @r#"{"converter":"default","usetex":false}"#,
        );

        // Missing fields take their defaults.
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::new());
    }
}
