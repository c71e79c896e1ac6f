use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    UnexpectedEndAfterPercent,
    UnknownDirective { directive: Box<str> },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Fmt(err).into()
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
            UnexpectedEndAfterPercent => f.write_str(
                "invalid format string, expected directive after '%'",
            ),
            UnknownDirective { ref directive } => write!(
                f,
                "found unrecognized directive `%{directive}` \
                 (supported directives are %d, %day, %H, %M, %S, \
                  %h, %m, %s, %ms, %us and %%)",
                directive = directive.escape_debug(),
            ),
        }
    }
}
