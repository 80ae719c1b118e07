use crate::{error, unit::Unit, util::escape};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    EmptyDate,
    EmptyTime,
    ExpectedAmountFoundByte { byte: u8 },
    ExpectedDateSymbolFoundByte { byte: u8, week_based: bool },
    ExpectedDateSymbolFoundEndOfInput { week_based: bool },
    ExpectedDesignatorFoundByte { byte: u8 },
    ExpectedDesignatorFoundEndOfInput,
    ExpectedDigitFoundByte { byte: u8 },
    ExpectedDigitFoundEndOfInput,
    ExpectedSeparatorFoundByte { expected: u8, byte: u8 },
    ExpectedSeparatorFoundEndOfInput { expected: u8 },
    ExpectedTimeDesignatorFoundByte { byte: u8 },
    ExpectedTimeDesignatorFoundEndOfInput,
    ExpectedTimeSymbolFoundByte { byte: u8 },
    ExpectedTimeSymbolFoundEndOfInput,
    FailedFraction,
    InvalidAlternativeDate { len: usize },
    InvalidDay { day: i64 },
    InvalidHour { hour: i64 },
    InvalidMinute { minute: i64 },
    InvalidMonth { month: i64 },
    InvalidSecond { second: i64 },
    MisplacedDecimal,
    TimeNotAllowed,
    TrailingAlternativeTime { byte: u8 },
    UnitOutOfOrder { unit: Unit, previous: Unit },
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
        error::ErrorKind::FmtPeriod(err).into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        fn date_symbols(week_based: bool) -> &'static str {
            if week_based {
                "(`Y`, `W` or `D`)"
            } else {
                "(`I`, `C`, `E`, `Y`, `Q`, `M`, `W` or `D`)"
            }
        }

        match *self {
            EmptyDate => f.write_str(
                "found period designator `P`, \
                 but did not find any date or time units",
            ),
            EmptyTime => f.write_str(
                "found time designator `T`, \
                 but did not find any time units",
            ),
            ExpectedAmountFoundByte { byte } => write!(
                f,
                "expected to find an amount before a unit symbol, \
                 but found `{byte}` instead",
                byte = escape::Byte(byte),
            ),
            ExpectedDateSymbolFoundByte { byte, week_based } => write!(
                f,
                "expected to find date unit symbol {symbols}, \
                 but found `{byte}` instead",
                symbols = date_symbols(week_based),
                byte = escape::Byte(byte),
            ),
            ExpectedDateSymbolFoundEndOfInput { week_based } => write!(
                f,
                "expected to find date unit symbol {symbols}, \
                 but found end of date units",
                symbols = date_symbols(week_based),
            ),
            ExpectedDesignatorFoundByte { byte } => write!(
                f,
                "expected to find period beginning with `P`, \
                 but found `{byte}` instead",
                byte = escape::Byte(byte),
            ),
            ExpectedDesignatorFoundEndOfInput => f.write_str(
                "expected to find period beginning with `P`, \
                 but found end of input",
            ),
            ExpectedDigitFoundByte { byte } => write!(
                f,
                "expected to find a digit, but found `{byte}` instead",
                byte = escape::Byte(byte),
            ),
            ExpectedDigitFoundEndOfInput => {
                f.write_str("expected to find a digit, but found end of input")
            }
            ExpectedSeparatorFoundByte { expected, byte } => write!(
                f,
                "expected `{expected}` separator, but found `{byte}`",
                expected = escape::Byte(expected),
                byte = escape::Byte(byte),
            ),
            ExpectedSeparatorFoundEndOfInput { expected } => write!(
                f,
                "expected `{expected}` separator, but found end of input",
                expected = escape::Byte(expected),
            ),
            ExpectedTimeDesignatorFoundByte { byte } => write!(
                f,
                "parsing a clock period requires the time designator `T` \
                 right after `P`, but found `{byte}` instead",
                byte = escape::Byte(byte),
            ),
            ExpectedTimeDesignatorFoundEndOfInput => f.write_str(
                "parsing a clock period requires the time designator `T` \
                 right after `P`, but found end of input",
            ),
            ExpectedTimeSymbolFoundByte { byte } => write!(
                f,
                "expected to find time unit symbol (`H`, `M` or `S`), \
                 but found `{byte}` instead",
                byte = escape::Byte(byte),
            ),
            ExpectedTimeSymbolFoundEndOfInput => f.write_str(
                "expected to find time unit symbol (`H`, `M` or `S`), \
                 but found end of input",
            ),
            FailedFraction => {
                f.write_str("failed to parse fractional seconds")
            }
            InvalidAlternativeDate { len } => write!(
                f,
                "date part ends with a digit, so it must be written \
                 in one of the forms YYYYDDD, YYYY-DDD, YYYYMMDD or \
                 YYYY-MM-DD, but it has {len} characters",
            ),
            InvalidDay { day } => write!(
                f,
                "day {day} in alternative date format \
                 is greater than 30",
            ),
            InvalidHour { hour } => write!(
                f,
                "hour {hour} in alternative time format \
                 is greater than 24",
            ),
            InvalidMinute { minute } => write!(
                f,
                "minute {minute} in alternative time format \
                 is greater than 60",
            ),
            InvalidMonth { month } => write!(
                f,
                "month {month} in alternative date format \
                 is greater than 12",
            ),
            InvalidSecond { second } => write!(
                f,
                "second {second} in alternative time format \
                 is greater than 60",
            ),
            MisplacedDecimal => f.write_str(
                "a decimal separator is only allowed \
                 in the amount of seconds",
            ),
            TimeNotAllowed => f.write_str(
                "found time designator `T`, but time units \
                 are not allowed in this kind of period",
            ),
            TrailingAlternativeTime { byte } => write!(
                f,
                "found unexpected `{byte}` after the fields \
                 of an alternative time format",
                byte = escape::Byte(byte),
            ),
            UnitOutOfOrder { unit, previous } => write!(
                f,
                "found value with unit {unit} after unit {previous}, \
                 but units must be written from largest to smallest \
                 (and they can't be repeated)",
                unit = unit.singular(),
                previous = previous.singular(),
            ),
        }
    }
}
