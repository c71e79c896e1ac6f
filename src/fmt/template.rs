use core::fmt::Write;

use crate::{error::fmt::Error as E, fmt::BrokenDownTimedelta, Error};

/// The directives recognized in a label template.
#[derive(Clone, Copy, Debug)]
enum Directive {
    Days,
    DayWord,
    TotalHours,
    TotalMinutes,
    TotalSeconds,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
}

impl Directive {
    fn from_name(name: &str) -> Option<Directive> {
        use self::Directive::*;

        Some(match name {
            "d" => Days,
            "day" => DayWord,
            "H" => TotalHours,
            "M" => TotalMinutes,
            "S" => TotalSeconds,
            "h" => Hour,
            "m" => Minute,
            "s" => Second,
            "ms" => Millisecond,
            "us" => Microsecond,
            _ => return None,
        })
    }
}

pub(super) struct Formatter<'f, 't, 'w> {
    pub(super) fmt: &'f str,
    pub(super) tm: &'t BrokenDownTimedelta,
    pub(super) wtr: &'w mut String,
}

impl<'f, 't, 'w> Formatter<'f, 't, 'w> {
    pub(super) fn format(&mut self) -> Result<(), Error> {
        if self.tm.negative {
            self.wtr.push('-');
        }
        while !self.fmt.is_empty() {
            let Some(start) = self.fmt.find('%') else {
                self.wtr.push_str(self.fmt);
                break;
            };
            self.wtr.push_str(&self.fmt[..start]);
            self.fmt = &self.fmt[start + 1..];
            if self.fmt.is_empty() {
                return Err(E::UnexpectedEndAfterPercent.into());
            }
            self.format_one()?;
        }
        Ok(())
    }

    /// Formats the directive at the start of `fmt`, which is positioned
    /// just after a `%`.
    fn format_one(&mut self) -> Result<(), Error> {
        if let Some(rest) = self.fmt.strip_prefix('%') {
            self.wtr.push('%');
            self.fmt = rest;
            return Ok(());
        }
        let (name, rest) = if let Some(braced) = self.fmt.strip_prefix('{') {
            let end = braced.find('}').ok_or_else(|| self.unknown())?;
            (&braced[..end], &braced[end + 1..])
        } else {
            let end = self.identifier_len();
            (&self.fmt[..end], &self.fmt[end..])
        };
        let directive =
            Directive::from_name(name).ok_or_else(|| self.unknown())?;
        self.fmt = rest;
        self.write_directive(directive);
        Ok(())
    }

    /// Returns the length of the directive name at the start of `fmt`.
    ///
    /// Names start with an ASCII letter or underscore, and continue with
    /// ASCII letters, digits or underscores. The longest such run is taken,
    /// so `%day` is always the `day` directive and never `%d` followed by
    /// `ay`.
    fn identifier_len(&self) -> usize {
        let bytes = self.fmt.as_bytes();
        match bytes.first() {
            Some(&b) if b.is_ascii_alphabetic() || b == b'_' => {}
            _ => return 0,
        }
        bytes
            .iter()
            .position(|&b| !(b.is_ascii_alphanumeric() || b == b'_'))
            .unwrap_or(bytes.len())
    }

    /// Builds an error for the directive at the start of `fmt`.
    fn unknown(&self) -> Error {
        let len = match self.identifier_len() {
            0 if self.fmt.starts_with('{') => self
                .fmt
                .find('}')
                .map(|end| end + 1)
                .unwrap_or(self.fmt.len()),
            0 => self.fmt.chars().next().map_or(0, char::len_utf8),
            len => len,
        };
        E::UnknownDirective { directive: self.fmt[..len].into() }.into()
    }

    fn write_directive(&mut self, directive: Directive) {
        use self::Directive::*;

        let tm = self.tm;
        // Writing to a `String` never fails.
        let _ = match directive {
            Days => write!(self.wtr, "{}", tm.days),
            DayWord => {
                let word = if tm.days == 1 { "day" } else { "days" };
                self.wtr.write_str(word)
            }
            TotalHours => write!(self.wtr, "{}", tm.total_hours),
            TotalMinutes => write!(self.wtr, "{}", tm.total_minutes),
            TotalSeconds => write!(self.wtr, "{}", tm.total_seconds),
            Hour => write!(self.wtr, "{:02}", tm.hour),
            Minute => write!(self.wtr, "{:02}", tm.minute),
            Second => write!(self.wtr, "{:02}", tm.second),
            Millisecond => write!(self.wtr, "{:03}", tm.millisecond),
            Microsecond => write!(self.wtr, "{:03}", tm.microsecond),
        };
    }
}
