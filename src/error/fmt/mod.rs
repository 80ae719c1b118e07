use crate::error;

pub(crate) mod pattern;
pub(crate) mod period;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    StdFmtWriteAdapter,
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Fmt(err).into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            StdFmtWriteAdapter => {
                f.write_str("an error occurred when formatting an argument")
            }
        }
    }
}
