use alloc::vec::Vec;

use crate::{
    duration::Duration,
    error::{fmt::period::Error as E, ErrorContext, IntoError},
    fmt::Parsed,
    unit::{
        sealed::{Kind, Sealed},
        Family, Unit,
    },
    util::parse,
    Error,
};

/// A parser for durations in the ISO 8601 period format.
///
/// The dialect is selected by the unit family of the duration that is
/// parsed:
///
/// * [`Full`](crate::unit::Full) accepts every unit symbol, a time part and
/// the alternative formats for both the date and the time part.
/// * [`Calendar`](crate::unit::Calendar) accepts the date unit symbols
/// `I`, `C`, `E`, `Y`, `Q`, `M`, `W` and `D` and the alternative date format,
/// but no time part.
/// * [`Clock`](crate::unit::Clock) requires the time designator `T` right
/// after `P` and accepts the time unit symbols `H`, `M` and `S` and the
/// alternative time format.
/// * [`WeekBased`](crate::unit::WeekBased) accepts only `Y` (week-based
/// years), `W` and `D`.
///
/// # Grammar
///
/// A period is an optional `-`, the designator `P`, a date part and an
/// optional time part introduced by `T`. Each part is a sequence of amounts,
/// each followed by a unit symbol. Units must be written from the longest to
/// the shortest, and each unit at most once. The amount of seconds may have
/// a fraction of up to 9 digits, introduced by `,` or `.`.
///
/// When a part ends with a digit, it is parsed in an alternative format
/// made of fixed-width fields instead. Dates may be written as `YYYYDDD`,
/// `YYYY-DDD`, `YYYYMMDD` or `YYYY-MM-DD`, and times as `hh[mm[ss[,f]]]` or
/// `hh[:mm[:ss[,f]]]`.
///
/// The empty duration is written as `PT0S`, which is accepted in every
/// dialect.
///
/// # Errors
///
/// Every error returned by this parser is a parse error (see
/// [`Error::is_parse`]) that reports the original input and the offset at
/// which parsing failed.
///
/// # Example
///
/// ```
/// use tenor::{fmt::period::DurationParser, unit::Clock, Duration};
///
/// static PARSER: DurationParser = DurationParser::new();
///
/// let d: Duration<Clock> = PARSER.parse("PT12:30")?;
/// assert_eq!(d.to_string(), "PT12H30M");
///
/// let err = PARSER.parse::<Clock, _>("P1D").unwrap_err();
/// assert_eq!(err.parse_offset(), Some(1));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct DurationParser {
    /// There are currently no configuration options for this parser.
    _priv: (),
}

impl DurationParser {
    /// Create a new period parser with the default configuration.
    pub const fn new() -> DurationParser {
        DurationParser { _priv: () }
    }

    /// Parse a duration of the family `F` from the given input.
    pub fn parse<F: Family, I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<Duration<F>, Error> {
        let input = input.as_ref();
        let mut period = Period::new(input, <F as Sealed>::KIND);
        let negative = period.parse()?;
        Duration::from_units(&period.units, negative)
            .map_err(|err| period.error(&input[input.len()..], err))
    }
}

/// The state for parsing a single period.
///
/// This accumulates the units found so far. It is not generic over the unit
/// family, so that the bulk of the parser is only compiled once.
struct Period<'i> {
    /// The complete input, used for reporting error offsets.
    input: &'i [u8],
    kind: Kind,
    units: Vec<(Unit, i64)>,
    /// The last unit parsed. Every unit must be shorter than this one.
    previous: Option<Unit>,
}

impl<'i> Period<'i> {
    fn new(input: &'i [u8], kind: Kind) -> Period<'i> {
        Period { input, kind, units: Vec::new(), previous: None }
    }

    /// Parses the whole input and returns whether the period is negative.
    fn parse(&mut self) -> Result<bool, Error> {
        let Parsed { value: negative, input } = self.parse_sign(self.input);
        let Parsed { input, .. } = self.parse_designator(input)?;
        // The empty duration is printed like this in every dialect.
        if input == b"T0S" {
            return Ok(negative);
        }
        let input = if self.kind == Kind::Clock {
            match input.first() {
                Some(&b'T') => input,
                Some(&byte) => {
                    return Err(self.error(
                        input,
                        E::ExpectedTimeDesignatorFoundByte { byte },
                    ));
                }
                None => {
                    return Err(self.error(
                        input,
                        E::ExpectedTimeDesignatorFoundEndOfInput,
                    ));
                }
            }
        } else {
            if input.is_empty() {
                return Err(self.error(input, E::EmptyDate));
            }
            let len =
                input.iter().position(|&b| b == b'T').unwrap_or(input.len());
            let alternative = matches!(self.kind, Kind::Full | Kind::Calendar)
                && ends_with_digit(&input[..len]);
            let parsed = if alternative {
                self.parse_alternative_date(input, len)?
            } else {
                self.parse_date_units(input)?
            };
            parsed.input
        };
        // The date part stops at the end of input or at `T`.
        let Some(input) = input.strip_prefix(b"T") else {
            return Ok(negative);
        };
        if matches!(self.kind, Kind::Calendar | Kind::WeekBased) {
            let at = &self.input[self.input.len() - input.len() - 1..];
            return Err(self.error(at, E::TimeNotAllowed));
        }
        if input.is_empty() {
            return Err(self.error(input, E::EmptyTime));
        }
        let alternative = ends_with_digit(input);
        let Parsed { input, .. } = if alternative {
            self.parse_alternative_time(input)?
        } else {
            self.parse_time_units(input)?
        };
        debug_assert!(input.is_empty(), "time part runs to the end of input");
        Ok(negative)
    }

    fn parse_sign(&self, input: &'i [u8]) -> Parsed<'i, bool> {
        match input.strip_prefix(b"-") {
            Some(input) => Parsed { value: true, input },
            None => Parsed { value: false, input },
        }
    }

    fn parse_designator(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, ()>, Error> {
        match input.split_first() {
            Some((&b'P', input)) => Ok(Parsed { value: (), input }),
            Some((&byte, _)) => {
                Err(self.error(input, E::ExpectedDesignatorFoundByte { byte }))
            }
            None => Err(self.error(input, E::ExpectedDesignatorFoundEndOfInput)),
        }
    }

    /// Parses amounts followed by date unit symbols, up to the end of input
    /// or the time designator.
    fn parse_date_units(
        &mut self,
        mut input: &'i [u8],
    ) -> Result<Parsed<'i, ()>, Error> {
        let week_based = self.kind == Kind::WeekBased;
        while !input.is_empty() && input[0] != b'T' {
            let (digits, rest) = parse::digits(input);
            if digits.is_empty() {
                let byte = input[0];
                return Err(self.error(input, E::ExpectedAmountFoundByte { byte }));
            }
            let unit = match rest.first() {
                None | Some(&b'T') => {
                    return Err(self.error(
                        rest,
                        E::ExpectedDateSymbolFoundEndOfInput { week_based },
                    ));
                }
                Some(&(b'.' | b',')) => {
                    return Err(self.error(rest, E::MisplacedDecimal));
                }
                Some(&byte) => match date_unit(byte, week_based) {
                    Some(unit) => unit,
                    None => {
                        return Err(self.error(
                            rest,
                            E::ExpectedDateSymbolFoundByte { byte, week_based },
                        ));
                    }
                },
            };
            self.check_order(rest, unit)?;
            let amount = parse::i64(digits, unit.plural())
                .map_err(|err| self.error(input, err))?;
            self.units.push((unit, amount));
            input = &rest[1..];
        }
        Ok(Parsed { value: (), input })
    }

    /// Parses amounts followed by time unit symbols, up to the end of input.
    fn parse_time_units(
        &mut self,
        mut input: &'i [u8],
    ) -> Result<Parsed<'i, ()>, Error> {
        while !input.is_empty() {
            let (digits, rest) = parse::digits(input);
            if digits.is_empty() {
                let byte = input[0];
                return Err(self.error(input, E::ExpectedAmountFoundByte { byte }));
            }
            let (separator, nanos, rest) =
                if matches!(rest.first(), Some(&(b'.' | b','))) {
                    let Parsed { value, input: after } =
                        self.parse_fraction(rest)?;
                    (Some(rest), value, after)
                } else {
                    (None, 0, rest)
                };
            let unit = match rest.first() {
                Some(&b'H') => Unit::Hour,
                Some(&b'M') => Unit::Minute,
                Some(&b'S') => Unit::Second,
                Some(&byte) => {
                    return Err(self.error(
                        rest,
                        E::ExpectedTimeSymbolFoundByte { byte },
                    ));
                }
                None => {
                    return Err(
                        self.error(rest, E::ExpectedTimeSymbolFoundEndOfInput)
                    );
                }
            };
            if let Some(at) = separator {
                if unit != Unit::Second {
                    return Err(self.error(at, E::MisplacedDecimal));
                }
            }
            self.check_order(rest, unit)?;
            let amount = parse::i64(digits, unit.plural())
                .map_err(|err| self.error(input, err))?;
            self.units.push((unit, amount));
            if separator.is_some() {
                self.units.push((Unit::Nanosecond, nanos));
            }
            input = &rest[1..];
        }
        Ok(Parsed { value: (), input })
    }

    /// Parses a date part of `len` bytes in one of the forms `YYYYDDD`,
    /// `YYYY-DDD`, `YYYYMMDD` or `YYYY-MM-DD`.
    fn parse_alternative_date(
        &mut self,
        input: &'i [u8],
        len: usize,
    ) -> Result<Parsed<'i, ()>, Error> {
        let extended = input.get(4) == Some(&b'-');
        let ordinal = match (extended, len) {
            (true, 8) | (false, 7) => true,
            (true, 10) | (false, 8) => false,
            _ => {
                return Err(self.error(input, E::InvalidAlternativeDate { len }))
            }
        };
        let Parsed { value: years, mut input } =
            self.parse_fixed(input, 4, "years")?;
        if extended {
            input = self.parse_separator(input, b'-')?;
        }
        self.units.push((Unit::Year, years));
        if ordinal {
            let Parsed { value: days, input } =
                self.parse_fixed(input, 3, "days")?;
            self.units.push((Unit::Day, days));
            self.previous = Some(Unit::Day);
            return Ok(Parsed { value: (), input });
        }

        let Parsed { value: month, input: rest } =
            self.parse_fixed(input, 2, "months")?;
        if month > 12 {
            return Err(self.error(input, E::InvalidMonth { month }));
        }
        let mut input = rest;
        if extended {
            input = self.parse_separator(input, b'-')?;
        }
        let Parsed { value: day, input: rest } =
            self.parse_fixed(input, 2, "days")?;
        if day > 30 {
            return Err(self.error(input, E::InvalidDay { day }));
        }
        self.units.push((Unit::Month, month));
        self.units.push((Unit::Day, day));
        self.previous = Some(Unit::Day);
        Ok(Parsed { value: (), input: rest })
    }

    /// Parses a time part in one of the forms `hh[mm[ss[,f]]]` or
    /// `hh[:mm[:ss[,f]]]`.
    fn parse_alternative_time(
        &mut self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, ()>, Error> {
        let extended = input.get(2) == Some(&b':');
        let Parsed { value: hour, input: mut rest } =
            self.parse_fixed(input, 2, "hours")?;
        if hour > 24 {
            return Err(self.error(input, E::InvalidHour { hour }));
        }
        self.units.push((Unit::Hour, hour));

        let mut seconds = false;
        for unit in [Unit::Minute, Unit::Second] {
            if rest.is_empty() {
                break;
            }
            if extended {
                rest = self.parse_separator(rest, b':')?;
            }
            let Parsed { value, input: after } =
                self.parse_fixed(rest, 2, unit.plural())?;
            if value > 60 {
                let err = if unit == Unit::Minute {
                    E::InvalidMinute { minute: value }
                } else {
                    E::InvalidSecond { second: value }
                };
                return Err(self.error(rest, err));
            }
            self.units.push((unit, value));
            seconds = unit == Unit::Second;
            rest = after;
        }
        if seconds && matches!(rest.first(), Some(&(b'.' | b','))) {
            let Parsed { value: nanos, input: after } =
                self.parse_fraction(rest)?;
            self.units.push((Unit::Nanosecond, nanos));
            rest = after;
        }
        if let Some(&byte) = rest.first() {
            return Err(self.error(rest, E::TrailingAlternativeTime { byte }));
        }
        Ok(Parsed { value: (), input: rest })
    }

    /// Parses a decimal separator followed by 1 to 9 digits and returns the
    /// fraction in nanoseconds.
    fn parse_fraction(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, i64>, Error> {
        let after = &input[1..];
        let (digits, rest) = parse::digits(after);
        let nanos = parse::fraction(digits)
            .context(E::FailedFraction)
            .map_err(|err| self.error(after, err))?;
        Ok(Parsed { value: nanos, input: rest })
    }

    /// Parses exactly `width` ASCII digits.
    fn parse_fixed(
        &self,
        input: &'i [u8],
        width: usize,
        what: &'static str,
    ) -> Result<Parsed<'i, i64>, Error> {
        for i in 0..width {
            match input.get(i) {
                Some(byte) if byte.is_ascii_digit() => {}
                Some(&byte) => {
                    return Err(self.error(
                        &input[i..],
                        E::ExpectedDigitFoundByte { byte },
                    ));
                }
                None => {
                    return Err(self.error(
                        &input[input.len()..],
                        E::ExpectedDigitFoundEndOfInput,
                    ));
                }
            }
        }
        let (digits, rest) = input.split_at(width);
        let value =
            parse::i64(digits, what).map_err(|err| self.error(input, err))?;
        Ok(Parsed { value, input: rest })
    }

    fn parse_separator(
        &self,
        input: &'i [u8],
        expected: u8,
    ) -> Result<&'i [u8], Error> {
        match input.split_first() {
            Some((&byte, rest)) if byte == expected => Ok(rest),
            Some((&byte, _)) => Err(self.error(
                input,
                E::ExpectedSeparatorFoundByte { expected, byte },
            )),
            None => Err(self.error(
                input,
                E::ExpectedSeparatorFoundEndOfInput { expected },
            )),
        }
    }

    /// Checks that the given unit is shorter than every unit parsed so far,
    /// and records it.
    fn check_order(&mut self, at: &[u8], unit: Unit) -> Result<(), Error> {
        if let Some(previous) = self.previous {
            if unit >= previous {
                return Err(
                    self.error(at, E::UnitOutOfOrder { unit, previous })
                );
            }
        }
        self.previous = Some(unit);
        Ok(())
    }

    /// Wraps the given error with the location of `at`, which must be a
    /// suffix of the complete input.
    fn error(&self, at: &[u8], err: impl IntoError) -> Error {
        let offset = self.input.len() - at.len();
        err.into_error().context(Error::parse(self.input, offset))
    }
}

/// Returns the unit for a date unit symbol.
fn date_unit(symbol: u8, week_based: bool) -> Option<Unit> {
    let unit = match symbol {
        b'Y' if week_based => Unit::WeekBasedYear,
        b'W' => Unit::Week,
        b'D' => Unit::Day,
        _ if week_based => return None,
        b'I' => Unit::Millennium,
        b'C' => Unit::Century,
        b'E' => Unit::Decade,
        b'Y' => Unit::Year,
        b'Q' => Unit::Quarter,
        b'M' => Unit::Month,
        _ => return None,
    };
    Some(unit)
}

fn ends_with_digit(part: &[u8]) -> bool {
    part.last().map_or(false, |b| b.is_ascii_digit())
}
