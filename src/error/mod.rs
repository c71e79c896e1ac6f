use std::sync::Arc;

pub(crate) mod config;
pub(crate) mod fmt;
pub(crate) mod formatter;
pub(crate) mod unit;

/// An error that can occur in this crate.
///
/// Almost every error in this crate is the result of a bad configuration:
///
/// * A label template that contains a directive that isn't recognized, or
/// that ends with a lone `%`.
/// * A unit name (like `"fortnights"`) that isn't one of the base units.
/// * A table of per-unit label formats that doesn't have exactly one entry
/// for each base unit.
/// * An offset label format that was given without a unit to compute the
/// offset in.
/// * A settings value read from the environment that couldn't be parsed.
///
/// Converting durations to coordinates and locating ticks never fail. Those
/// operations saturate or fall back to a sensible default instead.
///
/// # Introspection is limited
///
/// Other than implementing the [`std::error::Error`] trait, the
/// [`core::fmt::Debug`] trait and the [`core::fmt::Display`] trait, this
/// error type provides very limited introspection capabilities. Simple
/// predicates like `Error::is_invalid_parameter` are provided, but the
/// predicates are not exhaustive.
///
/// # Design
///
/// Only one error type exists for all of the operations in this crate. Errors
/// form a chain: a high level error (say, "failed to format tick label") may
/// carry a cause (say, "unknown directive `%q`"). The `Display`
/// implementation prints the whole chain, separated by `: `.
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// This is in an `Arc` to make an `Error` cheap to clone. It also keeps
    /// the size of an error equal to one word.
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates a new error value from `core::fmt::Arguments`.
    ///
    /// It is expected to use [`format_args!`](format_args) from
    /// Rust's standard library (available in `core`) to create a
    /// `core::fmt::Arguments`.
    ///
    /// This is mostly useful for label callbacks and host integrations that
    /// want to report failures through the same error type as this crate.
    ///
    /// # Example
    ///
    /// ```
    /// use tdaxis::Error;
    ///
    /// let err = Error::from_args(format_args!("something failed"));
    /// assert_eq!(err.to_string(), "something failed");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when this error originated as a result of an invalid
    /// configuration of parameters to a function call.
    ///
    /// This covers unknown unit names, per-unit format tables with the wrong
    /// number of entries, offset formats without an offset unit and settings
    /// values that could not be parsed.
    ///
    /// # Example
    ///
    /// ```
    /// use tdaxis::unit::BaseUnit;
    ///
    /// let err = "fortnights".parse::<BaseUnit>().unwrap_err();
    /// assert!(err.is_invalid_parameter());
    /// ```
    pub fn is_invalid_parameter(&self) -> bool {
        use self::ErrorKind::*;

        matches!(*self.root().kind(), Unit(_) | Formatter(_) | Config(_))
    }

    /// Returns true when this error originated from rendering a label
    /// template.
    ///
    /// # Example
    ///
    /// ```
    /// use tdaxis::fmt;
    ///
    /// let err = fmt::format_num("%q", 1.0).unwrap_err();
    /// assert!(err.is_format());
    /// ```
    pub fn is_format(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Fmt(_))
    }
}

impl Error {
    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            None => ErrorKind::Unknown,
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => {
                    debug_assert!(
                        inner.cause.is_none(),
                        "cause of consequence must be `None`"
                    );
                    inner.kind
                }
                Err(inner) => ErrorKind::Adhoc(AdhocError::from_args(
                    format_args!("{}", inner.kind),
                )),
            },
        };
        Error { inner: Some(Arc::new(ErrorInner { kind, cause: Some(self) })) }
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        let mut err = self;
        while let Some(cause) =
            err.inner.as_ref().and_then(|inner| inner.cause.as_ref())
        {
            err = cause;
        }
        err
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always the
    /// "root" cause. That is, the error closest to the point where something
    /// has gone wrong.
    ///
    /// The iterator returned is guaranteed to yield at least one error.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    /// Returns the kind of this error.
    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f
                    .debug_struct("Error")
                    .field("kind", &"None")
                    .finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Config(self::config::Error),
    Fmt(self::fmt::Error),
    Formatter(self::formatter::Error),
    Unit(self::unit::Error),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref msg) => core::fmt::Display::fmt(msg, f),
            Config(ref err) => core::fmt::Display::fmt(err, f),
            Fmt(ref err) => core::fmt::Display::fmt(err, f),
            Formatter(ref err) => core::fmt::Display::fmt(err, f),
            Unit(ref err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown tdaxis error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Some(Arc::new(ErrorInner { kind, cause: None })) }
    }
}

/// A generic error message.
///
/// This supports the `Error::from_args` public API, which permits callers to
/// manifest their own `Error` values from an arbitrary message.
struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        AdhocError { message: message.to_string().into_boxed_str() }
    }
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This trait basically exists to make `Error::context` work without needing
/// to rely on public `From` impls.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or `Result<T, Error>`.
/// Specifically, in the latter case, it absolves one of the need to call
/// `map_err` everywhere one wants to add context to an error.
pub(crate) trait ErrorContext<T, E> {
    /// Contextualize the given consequent error with this (`self`) error as
    /// the cause.
    ///
    /// This is equivalent to saying that "consequent is caused by self."
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: IntoError,
{
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }
}
