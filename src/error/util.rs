use crate::{error, util::escape::Byte};

#[derive(Clone, Debug)]
pub(crate) enum ParseIntError {
    NoDigitsFound,
    InvalidDigit(u8),
}

impl From<ParseIntError> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: ParseIntError) -> error::Error {
        error::ErrorKind::ParseInt(err).into()
    }
}

impl error::IntoError for ParseIntError {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for ParseIntError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ParseIntError::*;

        match *self {
            NoDigitsFound => write!(f, "invalid number, no digits found"),
            InvalidDigit(got) => {
                write!(f, "invalid digit, expected 0-9 but got {}", Byte(got))
            }
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum ParseFractionError {
    NoDigitsFound,
    TooManyDigits,
}

impl ParseFractionError {
    pub(crate) const MAX_PRECISION: usize = 9;
}

impl From<ParseFractionError> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: ParseFractionError) -> error::Error {
        error::ErrorKind::ParseFraction(err).into()
    }
}

impl error::IntoError for ParseFractionError {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for ParseFractionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ParseFractionError::*;

        match *self {
            NoDigitsFound => write!(
                f,
                "found decimal separator, \
                 but did not find any decimal digits after it",
            ),
            TooManyDigits => write!(
                f,
                "invalid fraction, too many digits \
                 (at most {max} are allowed)",
                max = ParseFractionError::MAX_PRECISION,
            ),
        }
    }
}
