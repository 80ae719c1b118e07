/*!
A numeric pattern language for custom duration formats.

A [`DurationPattern`] is compiled from a pattern string once, and can then
be used to both print and parse durations. Patterns only deal with numbers:
there is no support for unit names or plural forms.

# Pattern syntax

| symbol | meaning |
| ------ | ------- |
| `I` | millennia |
| `C` | centuries |
| `E` | decades |
| `Y` | years |
| `Q` | quarters |
| `M` | months |
| `W` | weeks |
| `D` | days |
| `h` | hours |
| `m` | minutes |
| `s` | seconds |
| `f` | fraction of a second, one digit per `f` (at most 9) |
| `+` | the sign, always printed |
| `-` | the sign, only printed when the duration is negative |
| `'...'` | quoted literal text, where `''` is a single quote |
| `[...]` | an optional section |

Repeating a unit symbol sets the minimum number of digits. For example, `hh`
prints one hour as `01`. Every symbol may be used only once. Other ASCII
letters are reserved and must be quoted. Every other character is printed
as is.

An optional section is only printed when at least one of the units in it is
not zero. When parsing, an optional section is skipped if it doesn't match.

When a pattern has no sign outside of optional sections, negative durations
are printed with a leading `-`, and a leading `-` is accepted when parsing.

When parsing, a unit followed directly by another unit or by a fraction
consumes exactly as many digits as its symbol is repeated. Otherwise, it
consumes all digits. A fraction always consumes exactly one digit per `f`.

# Example

```
use tenor::{fmt::pattern::DurationPattern, Duration};

let pattern = DurationPattern::compile("[D'd ']hh:mm:ss[.fff]")?;

let d: Duration = "-P2DT3H4M5,6S".parse()?;
assert_eq!(pattern.duration_to_string(&d)?, "-2d 03:04:05.600");

let d: Duration = pattern.parse("03:04:05")?;
assert_eq!(d.to_string(), "PT3H4M5S");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use alloc::{string::String, vec::Vec};

use crate::{
    duration::Duration,
    error::{fmt::pattern::Error as E, IntoError},
    fmt::{
        util::{DecimalFormatter, FractionalFormatter},
        Parsed, Write, WriteExt,
    },
    unit::{Family, Unit},
    util::parse,
    Error,
};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

type Values = [i64; Unit::ALL.len()];

/// A compiled duration pattern.
///
/// See the [module documentation](self) for the pattern syntax.
#[derive(Clone, Debug)]
pub struct DurationPattern {
    tokens: Vec<Token>,
}

#[derive(Clone, Debug)]
enum Token {
    Field { unit: Unit, width: u8 },
    Fraction { width: u8 },
    Sign { always: bool },
    Literal(char),
    Optional(Vec<Token>),
}

impl Token {
    fn is_numeric(&self) -> bool {
        matches!(*self, Token::Field { .. } | Token::Fraction { .. })
    }

    fn is_sign(&self) -> bool {
        matches!(*self, Token::Sign { .. })
    }
}

impl DurationPattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// This returns an error when the pattern is empty, uses an unknown
    /// symbol or uses a unit more than once, when a fraction has more than 9
    /// digits, or when a quoted literal or an optional section is not
    /// terminated.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::fmt::pattern::DurationPattern;
    ///
    /// assert!(DurationPattern::compile("h'h'").is_ok());
    ///
    /// let err = DurationPattern::compile("hx").unwrap_err();
    /// assert!(err.is_invalid_argument());
    /// ```
    pub fn compile(pattern: &str) -> Result<DurationPattern, Error> {
        if pattern.is_empty() {
            return Err(Error::from(E::EmptyPattern));
        }
        let mut compiler =
            Compiler { chars: pattern.chars().peekable(), units: Vec::new() };
        let tokens = compiler.tokens(false)?;
        Ok(DurationPattern { tokens })
    }

    /// Prints the given duration to a string.
    ///
    /// # Errors
    ///
    /// This returns an error when the duration has a unit this pattern has
    /// no symbol for. Nanoseconds require a fraction, and nanoseconds of a
    /// second or more also require seconds.
    pub fn duration_to_string<F: Family>(
        &self,
        duration: &Duration<F>,
    ) -> Result<String, Error> {
        let mut buf = String::new();
        self.print(duration, &mut buf)?;
        Ok(buf)
    }

    /// Prints the given duration to the given writer.
    ///
    /// # Errors
    ///
    /// This returns an error when the duration has a unit this pattern has
    /// no symbol for, or when writing fails.
    pub fn print<F: Family, W: Write>(
        &self,
        duration: &Duration<F>,
        mut wtr: W,
    ) -> Result<(), Error> {
        let values = self.values(duration)?;
        let negative = duration.is_negative();
        if negative && !prints_sign(&self.tokens, &values) {
            wtr.write_char('-')?;
        }
        print_tokens(&self.tokens, &values, negative, &mut wtr)
    }

    /// Parses a duration.
    ///
    /// Units that parse as zero are left out of the result.
    ///
    /// # Errors
    ///
    /// This returns an error when the input doesn't match this pattern, when
    /// an amount overflows or when a unit isn't admitted by the family `F`.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{fmt::pattern::DurationPattern, unit::Clock, Duration};
    ///
    /// let pattern = DurationPattern::compile("hhmmss")?;
    /// let d: Duration<Clock> = pattern.parse("013000")?;
    /// assert_eq!(d.to_string(), "PT1H30M");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse<F: Family, I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<Duration<F>, Error> {
        let input = input.as_ref();
        let mut parser = PatternParser { input, state: State::default() };
        let mut rest = input;
        if !self.tokens.iter().any(Token::is_sign) {
            if let Some(unsigned) = rest.strip_prefix(b"-") {
                parser.state.negative = true;
                rest = unsigned;
            }
        }
        let rest = parser.tokens(&self.tokens, rest)?;
        if let Some(&byte) = rest.first() {
            return Err(parser.error(rest, E::TrailingInput { byte }));
        }
        parser.state.units.retain(|&(_, amount)| amount != 0);
        Duration::from_units(&parser.state.units, parser.state.negative)
            .map_err(|err| parser.error(rest, err))
    }

    /// Returns the amount of every unit of the duration, after checking
    /// that this pattern can show all of them.
    fn values<F: Family>(
        &self,
        duration: &Duration<F>,
    ) -> Result<Values, Error> {
        let mut values = [0; Unit::ALL.len()];
        for item in duration.items() {
            let unit = item.unit();
            if !contains(&self.tokens, unit) {
                return Err(Error::from(E::UnitNotInPattern { unit }));
            }
            values[unit as usize] = item.amount();
        }
        let nanos = values[Unit::Nanosecond as usize];
        if nanos >= NANOS_PER_SECOND {
            if !contains(&self.tokens, Unit::Second) {
                return Err(Error::from(E::UnitNotInPattern {
                    unit: Unit::Second,
                }));
            }
            let seconds = &mut values[Unit::Second as usize];
            *seconds = seconds
                .checked_add(nanos / NANOS_PER_SECOND)
                .ok_or_else(|| Error::overflow("seconds"))?;
            values[Unit::Nanosecond as usize] = nanos % NANOS_PER_SECOND;
        }
        Ok(values)
    }
}

/// Returns true if the given tokens can show the given unit.
fn contains(tokens: &[Token], unit: Unit) -> bool {
    tokens.iter().any(|token| match *token {
        Token::Field { unit: field, .. } => field == unit,
        Token::Fraction { .. } => unit == Unit::Nanosecond,
        Token::Optional(ref inner) => contains(inner, unit),
        Token::Sign { .. } | Token::Literal(_) => false,
    })
}

/// Returns true if printing the given tokens writes a sign token, which
/// happens for a sign inside an optional section only when that section is
/// printed.
fn prints_sign(tokens: &[Token], values: &Values) -> bool {
    tokens.iter().any(|token| match *token {
        Token::Sign { .. } => true,
        Token::Optional(ref inner) => {
            any_non_zero(inner, values) && prints_sign(inner, values)
        }
        Token::Field { .. } | Token::Fraction { .. } | Token::Literal(_) => {
            false
        }
    })
}

/// Returns true if any unit shown by the given tokens is not zero.
fn any_non_zero(tokens: &[Token], values: &Values) -> bool {
    tokens.iter().any(|token| match *token {
        Token::Field { unit, .. } => values[unit as usize] != 0,
        Token::Fraction { .. } => values[Unit::Nanosecond as usize] != 0,
        Token::Optional(ref inner) => any_non_zero(inner, values),
        Token::Sign { .. } | Token::Literal(_) => false,
    })
}

fn print_tokens<W: Write>(
    tokens: &[Token],
    values: &Values,
    negative: bool,
    wtr: &mut W,
) -> Result<(), Error> {
    for token in tokens {
        match *token {
            Token::Field { unit, width } => {
                let fmt = DecimalFormatter::new().padding(width);
                wtr.write_int(&fmt, values[unit as usize])?;
            }
            Token::Fraction { width } => {
                let fmt = FractionalFormatter::new().precision(Some(width));
                wtr.write_fraction(&fmt, values[Unit::Nanosecond as usize])?;
            }
            Token::Sign { always } => {
                if negative {
                    wtr.write_char('-')?;
                } else if always {
                    wtr.write_char('+')?;
                }
            }
            Token::Literal(c) => wtr.write_char(c)?,
            Token::Optional(ref inner) => {
                if any_non_zero(inner, values) {
                    print_tokens(inner, values, negative, wtr)?;
                }
            }
        }
    }
    Ok(())
}

struct Compiler<'p> {
    chars: core::iter::Peekable<core::str::Chars<'p>>,
    units: Vec<Unit>,
}

impl<'p> Compiler<'p> {
    /// Compiles tokens until the end of the pattern, or until the end of
    /// the current optional section when `nested` is true.
    fn tokens(&mut self, nested: bool) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();
        while let Some(c) = self.chars.next() {
            let token = match c {
                '[' => {
                    let inner = self.tokens(true)?;
                    if inner.is_empty() {
                        return Err(Error::from(E::EmptySection));
                    }
                    Token::Optional(inner)
                }
                ']' if nested => return Ok(tokens),
                ']' => return Err(Error::from(E::UnbalancedSectionEnd)),
                '\'' => {
                    self.literal(&mut tokens)?;
                    continue;
                }
                '+' | '-' => Token::Sign { always: c == '+' },
                c if c.is_ascii_alphabetic() => self.symbol(c)?,
                c => Token::Literal(c),
            };
            tokens.push(token);
        }
        if nested {
            return Err(Error::from(E::UnterminatedSection));
        }
        Ok(tokens)
    }

    /// Compiles a quoted literal, after its opening quote.
    fn literal(&mut self, tokens: &mut Vec<Token>) -> Result<(), Error> {
        if self.chars.next_if_eq(&'\'').is_some() {
            tokens.push(Token::Literal('\''));
            return Ok(());
        }
        loop {
            match self.chars.next() {
                None => return Err(Error::from(E::UnterminatedLiteral)),
                Some('\'') if self.chars.next_if_eq(&'\'').is_some() => {
                    tokens.push(Token::Literal('\''));
                }
                Some('\'') => return Ok(()),
                Some(c) => tokens.push(Token::Literal(c)),
            }
        }
    }

    /// Compiles a symbol, including its repetitions.
    fn symbol(&mut self, symbol: char) -> Result<Token, Error> {
        let mut width = 1;
        while self.chars.next_if_eq(&symbol).is_some() {
            width += 1;
        }
        if symbol == 'f' {
            if width > 9 {
                return Err(Error::from(E::FractionTooWide { width }));
            }
            self.claim(Unit::Nanosecond)?;
            // OK because the width is at most 9.
            return Ok(Token::Fraction { width: width as u8 });
        }
        let unit = symbol_unit(symbol).ok_or(E::UnknownSymbol { symbol })?;
        self.claim(unit)?;
        let width = u8::try_from(width).unwrap_or(u8::MAX);
        Ok(Token::Field { unit, width })
    }

    fn claim(&mut self, unit: Unit) -> Result<(), Error> {
        if self.units.contains(&unit) {
            return Err(Error::from(E::DuplicateUnit { unit }));
        }
        self.units.push(unit);
        Ok(())
    }
}

fn symbol_unit(symbol: char) -> Option<Unit> {
    let unit = match symbol {
        'I' => Unit::Millennium,
        'C' => Unit::Century,
        'E' => Unit::Decade,
        'Y' => Unit::Year,
        'Q' => Unit::Quarter,
        'M' => Unit::Month,
        'W' => Unit::Week,
        'D' => Unit::Day,
        'h' => Unit::Hour,
        'm' => Unit::Minute,
        's' => Unit::Second,
        _ => return None,
    };
    Some(unit)
}

#[derive(Clone, Debug, Default)]
struct State {
    negative: bool,
    units: Vec<(Unit, i64)>,
}

struct PatternParser<'i> {
    input: &'i [u8],
    state: State,
}

impl<'i> PatternParser<'i> {
    fn tokens(
        &mut self,
        tokens: &[Token],
        mut input: &'i [u8],
    ) -> Result<&'i [u8], Error> {
        for (i, token) in tokens.iter().enumerate() {
            let fixed = tokens.get(i + 1).map_or(false, Token::is_numeric);
            input = match *token {
                Token::Field { unit, width } => {
                    let Parsed { value: digits, input: rest } =
                        self.parse_digits(input, usize::from(width), fixed)?;
                    let amount = parse::i64(digits, unit.plural())
                        .map_err(|err| self.error(input, err))?;
                    self.state.units.push((unit, amount));
                    rest
                }
                Token::Fraction { width } => {
                    let Parsed { value: digits, input: rest } =
                        self.parse_digits(input, usize::from(width), true)?;
                    let nanos = parse::fraction(digits)
                        .map_err(|err| self.error(input, err))?;
                    self.state.units.push((Unit::Nanosecond, nanos));
                    rest
                }
                Token::Sign { always } => self.parse_sign(input, always)?,
                Token::Literal(c) => self.parse_literal(input, c)?,
                Token::Optional(ref inner) => {
                    let saved = self.state.clone();
                    match self.tokens(inner, input) {
                        Ok(rest) => rest,
                        Err(_err) => {
                            trace!("skipping optional section: {_err}");
                            self.state = saved;
                            input
                        }
                    }
                }
            };
        }
        Ok(input)
    }

    /// Parses digits for a field. When `fixed` is true, exactly `width`
    /// digits are consumed.
    fn parse_digits(
        &self,
        input: &'i [u8],
        width: usize,
        fixed: bool,
    ) -> Result<Parsed<'i, &'i [u8]>, Error> {
        let (digits, rest) = parse::digits(input);
        if digits.is_empty() || (fixed && digits.len() < width) {
            return Err(self.error(input, E::ExpectedDigits));
        }
        if fixed {
            let (digits, rest) = input.split_at(width);
            return Ok(Parsed { value: digits, input: rest });
        }
        Ok(Parsed { value: digits, input: rest })
    }

    fn parse_sign(
        &mut self,
        input: &'i [u8],
        always: bool,
    ) -> Result<&'i [u8], Error> {
        match input.first() {
            Some(&b'-') => {
                self.state.negative = true;
                Ok(&input[1..])
            }
            Some(&b'+') if always => Ok(&input[1..]),
            _ if !always => Ok(input),
            Some(&byte) => Err(self.error(
                input,
                E::ExpectedLiteralFoundByte { expected: '+', byte },
            )),
            None => Err(self.error(
                input,
                E::ExpectedLiteralFoundEndOfInput { expected: '+' },
            )),
        }
    }

    fn parse_literal(
        &self,
        input: &'i [u8],
        expected: char,
    ) -> Result<&'i [u8], Error> {
        let mut buf = [0; 4];
        let literal = expected.encode_utf8(&mut buf).as_bytes();
        if let Some(rest) = input.strip_prefix(literal) {
            return Ok(rest);
        }
        let err = match input.first() {
            Some(&byte) => E::ExpectedLiteralFoundByte { expected, byte },
            None => E::ExpectedLiteralFoundEndOfInput { expected },
        };
        Err(self.error(input, err))
    }

    /// Wraps the given error with the location of `at`, which must be a
    /// suffix of the complete input.
    fn error(&self, at: &[u8], err: impl IntoError) -> Error {
        let offset = self.input.len() - at.len();
        err.into_error().context(Error::parse(self.input, offset))
    }
}

#[cfg(test)]
mod tests {
    use crate::unit::{Calendar, Clock, Full};

    use super::*;

    fn print(pattern: &str, duration: &str) -> String {
        let d: Duration = duration.parse().unwrap();
        DurationPattern::compile(pattern)
            .unwrap()
            .duration_to_string(&d)
            .unwrap()
    }

    fn parse(pattern: &str, input: &str) -> Duration {
        DurationPattern::compile(pattern).unwrap().parse(input).unwrap()
    }

    fn compile_err(pattern: &str) -> Error {
        DurationPattern::compile(pattern).unwrap_err()
    }

    fn parse_err(pattern: &str, input: &str) -> Error {
        DurationPattern::compile(pattern)
            .unwrap()
            .parse::<Full, _>(input)
            .unwrap_err()
    }

    #[test]
    fn print_fields() {
        insta::assert_snapshot!(print("hh:mm:ss", "PT1H2M3S"), @"01:02:03");
        insta::assert_snapshot!(print("hh:mm:ss", "PT25H"), @"25:00:00");
        insta::assert_snapshot!(print("h:mm", "PT123H4M"), @"123:04");
        insta::assert_snapshot!(print("Y/MM/DD", "P1Y2M3D"), @"1/02/03");
        insta::assert_snapshot!(print("I C E Q W", "P1I2C3E4Q5W"), @"1 2 3 4 5");
        insta::assert_snapshot!(print("D' days'", "P3D"), @"3 days");
        insta::assert_snapshot!(print("''h", "PT5H"), @"'5");
        insta::assert_snapshot!(print("'it''s' h", "PT5H"), @"it's 5");
    }

    #[test]
    fn print_signs() {
        insta::assert_snapshot!(print("-hh:mm", "-PT1H30M"), @"-01:30");
        insta::assert_snapshot!(print("-hh:mm", "PT1H30M"), @"01:30");
        insta::assert_snapshot!(print("+hh", "PT1H"), @"+01");
        insta::assert_snapshot!(print("+hh", "-PT1H"), @"-01");
        insta::assert_snapshot!(print("h'h' m'm'", "-PT3H4M"), @"-3h 4m");
        insta::assert_snapshot!(print("h", "PT0S"), @"0");

        // A sign in an optional section counts only when it is printed.
        insta::assert_snapshot!(print("[-h]", "-PT1H"), @"-1");
        let pattern = "[-h'h ']m'm'";
        insta::assert_snapshot!(print(pattern, "-PT1H5M"), @"-1h 5m");
        insta::assert_snapshot!(print(pattern, "-PT5M"), @"-5m");
        insta::assert_snapshot!(parse(pattern, "-1h 5m"), @"-PT1H5M");
        insta::assert_snapshot!(parse(pattern, "-5m"), @"-PT5M");
    }

    #[test]
    fn print_optional_sections() {
        let pattern = "[Y'y ']M'm'";
        insta::assert_snapshot!(print(pattern, "P5M"), @"5m");
        insta::assert_snapshot!(print(pattern, "P1Y5M"), @"1y 5m");
        insta::assert_snapshot!(print(pattern, "P1Y"), @"1y 0m");
        insta::assert_snapshot!(print("[[D'd']h'h']", "PT0S"), @"");
        insta::assert_snapshot!(print("[[D'd']h'h']", "PT2H"), @"2h");
    }

    #[test]
    fn print_fractions() {
        insta::assert_snapshot!(print("s.fff", "PT1,5S"), @"1.500");
        insta::assert_snapshot!(print("s.ff", "PT1,234567S"), @"1.23");
        insta::assert_snapshot!(print("s.fffffffff", "PT0,000000001S"), @"0.000000001");
        insta::assert_snapshot!(print("s[.f]", "PT7S"), @"7");
        insta::assert_snapshot!(print("'0.'fff", "PT0,25S"), @"0.250");

        let d: Duration = Duration::of(1_500, Unit::Millisecond).unwrap();
        let pattern = DurationPattern::compile("s.fff").unwrap();
        insta::assert_snapshot!(pattern.duration_to_string(&d).unwrap(), @"1.500");
    }

    #[test]
    fn print_errors() {
        let pattern = DurationPattern::compile("hh:mm").unwrap();
        let d: Duration = "PT1H1S".parse().unwrap();
        let err = pattern.duration_to_string(&d).unwrap_err();
        assert!(err.is_invalid_argument());
        insta::assert_snapshot!(
            err,
            @"duration contains seconds, but the pattern has no symbol for it",
        );

        let d: Duration = "PT0,5S".parse().unwrap();
        insta::assert_snapshot!(
            pattern.duration_to_string(&d).unwrap_err(),
            @"duration contains nanoseconds, but the pattern has no symbol for it",
        );

        let pattern = DurationPattern::compile("fff").unwrap();
        let d: Duration = Duration::of(1_500, Unit::Millisecond).unwrap();
        insta::assert_snapshot!(
            pattern.duration_to_string(&d).unwrap_err(),
            @"duration contains seconds, but the pattern has no symbol for it",
        );

        let pattern = DurationPattern::compile("Y").unwrap();
        let d: Duration = Duration::of(1, Unit::WeekBasedYear).unwrap();
        insta::assert_snapshot!(
            pattern.duration_to_string(&d).unwrap_err(),
            @"duration contains week-based years, but the pattern has no symbol for it",
        );
    }

    #[test]
    fn compile_errors() {
        insta::assert_snapshot!(
            compile_err(""),
            @"duration pattern must not be empty",
        );
        insta::assert_snapshot!(
            compile_err("hh:mm:h"),
            @"unit 'hour' occurs more than once in duration pattern",
        );
        insta::assert_snapshot!(
            compile_err("s.f:f"),
            @"unit 'nanosecond' occurs more than once in duration pattern",
        );
        insta::assert_snapshot!(
            compile_err("h x"),
            @"unknown symbol `x` in duration pattern (quote literal letters with `'`)",
        );
        insta::assert_snapshot!(
            compile_err("s.ffffffffff"),
            @"fraction in duration pattern has 10 digits, but at most 9 are supported",
        );
        insta::assert_snapshot!(
            compile_err("h[]"),
            @"optional section in duration pattern is empty",
        );
        insta::assert_snapshot!(
            compile_err("h]"),
            @"found `]` in duration pattern without matching `[`",
        );
        insta::assert_snapshot!(
            compile_err("[h[m]"),
            @"unterminated optional section in duration pattern",
        );
        insta::assert_snapshot!(
            compile_err("h'h"),
            @"unterminated quoted literal in duration pattern",
        );
        assert!(compile_err("q").is_invalid_argument());
        assert!(!compile_err("q").is_parse());
    }

    #[test]
    fn parse_fields() {
        insta::assert_snapshot!(parse("hh:mm:ss", "01:02:03"), @"PT1H2M3S");
        insta::assert_snapshot!(parse("hh:mm:ss", "100:02:03"), @"PT100H2M3S");
        insta::assert_snapshot!(parse("hhmmss", "010203"), @"PT1H2M3S");
        insta::assert_snapshot!(parse("hhmmss", "01020345"), @"PT1H2M345S");
        insta::assert_snapshot!(parse("Y/MM/DD", "0/00/00"), @"PT0S");
        insta::assert_snapshot!(parse("D' days'", "3 days"), @"P3D");
        insta::assert_snapshot!(parse("'it''s' h", "it's 5"), @"PT5H");
        insta::assert_snapshot!(parse("s.fff", "1.500"), @"PT1,500S");
        insta::assert_snapshot!(parse("sfff", "1500"), @"PT1,500S");
    }

    #[test]
    fn parse_signs_and_sections() {
        insta::assert_snapshot!(parse("-hh:mm", "-01:30"), @"-PT1H30M");
        insta::assert_snapshot!(parse("-hh:mm", "01:30"), @"PT1H30M");
        insta::assert_snapshot!(parse("+hh", "+01"), @"PT1H");
        insta::assert_snapshot!(parse("+hh", "-01"), @"-PT1H");
        insta::assert_snapshot!(parse("h'h'", "-3h"), @"-PT3H");

        let pattern = "[Y'y ']M'm'";
        insta::assert_snapshot!(parse(pattern, "1y 5m"), @"P1Y5M");
        insta::assert_snapshot!(parse(pattern, "5m"), @"P5M");
        insta::assert_snapshot!(parse("s[.fff]", "7"), @"PT7S");
        insta::assert_snapshot!(parse("s[.fff]", "7.250"), @"PT7,250S");
    }

    #[test]
    fn parse_families() {
        let pattern = DurationPattern::compile("D hh").unwrap();
        let d = pattern.parse::<Full, _>("2 05").unwrap();
        insta::assert_snapshot!(d, @"P2DT5H");

        let d = pattern.parse::<Calendar, _>("2 00").unwrap();
        insta::assert_snapshot!(d, @"P2D");

        let err = pattern.parse::<Clock, _>("2 05").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.is_parse());
        insta::assert_snapshot!(
            err,
            @r#"failed to parse "2 05" at offset 4: unit 'day' is not allowed in a duration restricted to clock units"#,
        );
    }

    #[test]
    fn parse_errors() {
        insta::assert_snapshot!(
            parse_err("hh:mm", "01-30"),
            @r#"failed to parse "01-30" at offset 2: expected to find `:`, but found `-` instead"#,
        );
        insta::assert_snapshot!(
            parse_err("hh:mm", "01"),
            @r#"failed to parse "01" at offset 2: expected to find `:`, but found end of input"#,
        );
        insta::assert_snapshot!(
            parse_err("hh:mm", "01:"),
            @r#"failed to parse "01:" at offset 3: expected to find digits"#,
        );
        insta::assert_snapshot!(
            parse_err("hh:mm", "01:30x"),
            @r#"failed to parse "01:30x" at offset 5: found unparsed input starting with `x` after the end of the pattern"#,
        );
        insta::assert_snapshot!(
            parse_err("hhmm", "1"),
            @r#"failed to parse "1" at offset 0: expected to find digits"#,
        );
        insta::assert_snapshot!(
            parse_err("+h", "1"),
            @r#"failed to parse "1" at offset 0: expected to find `+`, but found `1` instead"#,
        );

        let err = parse_err("s", "99999999999999999999");
        assert!(err.is_overflow());
        assert!(err.is_parse());
        assert_eq!(err.parse_offset(), Some(0));
    }

    quickcheck::quickcheck! {
        fn prop_clock_roundtrip(d: Duration<Clock>) -> bool {
            let pattern = DurationPattern::compile("-h:m:s.fffffffff").unwrap();
            let printed = pattern.duration_to_string(&d).unwrap();
            let got: Duration<Clock> = pattern.parse(&printed).unwrap();
            got == d
        }
    }
}
