use crate::{error, unit::Unit};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    DuplicateUnit { unit: Unit },
    EmptyMetric,
    MetricFailed { unit: Unit },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Timeline(err).into()
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
            DuplicateUnit { unit } => write!(
                f,
                "unit '{unit}' occurs more than once in metric \
                 (milliseconds and microseconds count as nanoseconds)",
                unit = unit.singular(),
            ),
            EmptyMetric => {
                f.write_str("a metric requires at least one unit")
            }
            MetricFailed { unit } => write!(
                f,
                "failed to compute amount of {unit} between time points",
                unit = unit.plural(),
            ),
        }
    }
}
