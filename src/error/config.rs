use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    EnvVar { name: &'static str },
    UnknownBool { given: Box<str> },
    UnknownConverter { given: Box<str> },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Config(err).into()
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
            EnvVar { name } => {
                write!(f, "failed to read environment variable `{name}`")
            }
            UnknownBool { ref given } => write!(
                f,
                "unrecognized boolean `{given}` (expected one of \
                 '1', 'true', 'yes', 'on', '0', 'false', 'no' or 'off')",
                given = given.escape_debug(),
            ),
            UnknownConverter { ref given } => write!(
                f,
                "unrecognized converter `{given}` (expected one of \
                 'default', 'auto' or 'concise')",
                given = given.escape_debug(),
            ),
        }
    }
}
