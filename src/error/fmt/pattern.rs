use crate::{error, unit::Unit, util::escape};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    // Errors in the pattern itself.
    DuplicateUnit { unit: Unit },
    EmptyPattern,
    EmptySection,
    FractionTooWide { width: usize },
    UnbalancedSectionEnd,
    UnknownSymbol { symbol: char },
    UnterminatedLiteral,
    UnterminatedSection,
    // Errors when printing a duration with a pattern.
    UnitNotInPattern { unit: Unit },
    // Errors when parsing text with a pattern.
    ExpectedDigits,
    ExpectedLiteralFoundByte { expected: char, byte: u8 },
    ExpectedLiteralFoundEndOfInput { expected: char },
    TrailingInput { byte: u8 },
}

impl Error {
    pub(crate) fn is_invalid_argument(&self) -> bool {
        use self::Error::*;

        !matches!(
            *self,
            ExpectedDigits
                | ExpectedLiteralFoundByte { .. }
                | ExpectedLiteralFoundEndOfInput { .. }
                | TrailingInput { .. }
        )
    }
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
        error::ErrorKind::Pattern(err).into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            DuplicateUnit { unit } => write!(
                f,
                "unit '{unit}' occurs more than once in duration pattern",
                unit = unit.singular(),
            ),
            EmptyPattern => f.write_str("duration pattern must not be empty"),
            EmptySection => {
                f.write_str("optional section in duration pattern is empty")
            }
            FractionTooWide { width } => write!(
                f,
                "fraction in duration pattern has {width} digits, \
                 but at most 9 are supported",
            ),
            UnbalancedSectionEnd => f.write_str(
                "found `]` in duration pattern without matching `[`",
            ),
            UnknownSymbol { symbol } => write!(
                f,
                "unknown symbol `{symbol}` in duration pattern \
                 (quote literal letters with `'`)",
            ),
            UnterminatedLiteral => {
                f.write_str("unterminated quoted literal in duration pattern")
            }
            UnterminatedSection => f.write_str(
                "unterminated optional section in duration pattern",
            ),
            UnitNotInPattern { unit } => write!(
                f,
                "duration contains {unit}, \
                 but the pattern has no symbol for it",
                unit = unit.plural(),
            ),
            ExpectedDigits => f.write_str("expected to find digits"),
            ExpectedLiteralFoundByte { expected, byte } => write!(
                f,
                "expected to find `{expected}`, but found `{byte}` instead",
                byte = escape::Byte(byte),
            ),
            ExpectedLiteralFoundEndOfInput { expected } => write!(
                f,
                "expected to find `{expected}`, but found end of input",
            ),
            TrailingInput { byte } => write!(
                f,
                "found unparsed input starting with `{byte}` \
                 after the end of the pattern",
                byte = escape::Byte(byte),
            ),
        }
    }
}
