use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    Unknown { given: Box<str> },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Unit(err).into()
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
            Unknown { ref given } => write!(
                f,
                "unrecognized unit `{given}` (expected one of \
                 'days', 'hours', 'minutes', 'seconds' or 'microseconds')",
                given = given.escape_debug(),
            ),
        }
    }
}
