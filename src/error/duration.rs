use crate::{error, unit::Unit};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    BuilderEmpty,
    BuilderFieldTwice { unit: Unit },
    BuilderNegative { unit: Unit },
    MixedComponents,
    MixedSign,
    NegativeAmount { unit: Unit },
    NegativeIso,
    NonPositiveSteps { steps: i64 },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Duration(err).into()
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
            BuilderEmpty => f.write_str(
                "cannot build a duration without setting at least one unit",
            ),
            BuilderFieldTwice { unit } => write!(
                f,
                "the amount of {unit} was already set on this builder \
                 (every unit may only be set once)",
                unit = unit.plural(),
            ),
            BuilderNegative { unit } => write!(
                f,
                "amount of {unit} given to a duration builder must not be \
                 negative (the builder's sign applies to every unit)",
                unit = unit.plural(),
            ),
            MixedComponents => f.write_str(
                "components of a duration must not have mixed signs",
            ),
            MixedSign => f.write_str(
                "cannot merge durations whose calendar and clock parts \
                 have opposite signs",
            ),
            NegativeAmount { unit } => write!(
                f,
                "amount of {unit} must not be negative",
                unit = unit.plural(),
            ),
            NegativeIso => f.write_str(
                "ISO 8601 does not support negative durations",
            ),
            NonPositiveSteps { steps } => write!(
                f,
                "rounding steps must be greater than zero, but got {steps}",
            ),
        }
    }
}
