use crate::{error, unit::Unit};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    NotInFamily { unit: Unit, family: &'static str },
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
            NotInFamily { unit, family } => write!(
                f,
                "unit '{unit}' is not allowed in a duration \
                 restricted to {family} units",
                unit = unit.singular(),
            ),
        }
    }
}
