use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    FormatOffset,
    FormatTick,
    OffsetFormatWithoutUnit,
    TableLength { what: &'static str, expected: usize, got: usize },
    UnknownScale { scale: f64 },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Formatter(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            FormatOffset => f.write_str("failed to format offset label"),
            FormatTick => f.write_str("failed to format tick label"),
            OffsetFormatWithoutUnit => f.write_str(
                "an offset format was given, \
                 but no unit to compute the offset in",
            ),
            TableLength { what, expected, got } => write!(
                f,
                "{what} must have exactly {expected} entries \
                 (one per base unit), but {got} were given",
            ),
            UnknownScale { scale } => write!(
                f,
                "locator unit of {scale} days does not correspond \
                 to any base unit",
            ),
        }
    }
}
