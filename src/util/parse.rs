use crate::{
    error::util::{ParseFractionError, ParseIntError},
    Error,
};

/// Parses an `i64` number from the beginning to the end of the given slice of
/// ASCII digit characters.
///
/// If any byte in the given slice is not `[0-9]`, then this returns an error.
/// Similarly, if the number parsed does not fit into a `i64`, then this
/// returns an overflow error labeled with `what`. Notably, this routine does
/// not permit parsing a negative integer. (We use signed integers because
/// they are the amounts of a duration.)
pub(crate) fn i64(bytes: &[u8], what: &'static str) -> Result<i64, Error> {
    if bytes.is_empty() {
        return Err(ParseIntError::NoDigitsFound.into());
    }
    let mut n: i64 = 0;
    for &byte in bytes {
        if !byte.is_ascii_digit() {
            return Err(ParseIntError::InvalidDigit(byte).into());
        }
        let digit = i64::from(byte - b'0');
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| Error::overflow(what))?;
    }
    Ok(n)
}

/// Parses a fractional number of seconds from the given slice of ASCII
/// digits and returns it as a number of nanoseconds.
///
/// The fraction is given without its decimal separator. For example, `4`
/// corresponds to `400_000_000` nanoseconds. At most 9 digits are allowed.
pub(crate) fn fraction(bytes: &[u8]) -> Result<i64, Error> {
    if bytes.is_empty() {
        return Err(ParseFractionError::NoDigitsFound.into());
    }
    if bytes.len() > ParseFractionError::MAX_PRECISION {
        return Err(ParseFractionError::TooManyDigits.into());
    }
    let mut n = i64(bytes, "fraction")?;
    for _ in bytes.len()..ParseFractionError::MAX_PRECISION {
        // OK because 999_999_999 is the biggest possible result.
        n *= 10;
    }
    Ok(n)
}

/// Splits the given input into its longest prefix of ASCII digits and the
/// remaining input.
pub(crate) fn digits(input: &[u8]) -> (&[u8], &[u8]) {
    let len = input.iter().take_while(|b| b.is_ascii_digit()).count();
    input.split_at(len)
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn parse_i64() {
        assert_eq!(i64(b"0", "test").unwrap(), 0);
        assert_eq!(i64(b"0042", "test").unwrap(), 42);
        assert_eq!(i64(b"9223372036854775807", "test").unwrap(), i64::MAX);

        let err = i64(b"9223372036854775808", "years").unwrap_err();
        assert!(err.is_overflow());
        insta::assert_snapshot!(err, @"arithmetic overflow for years");

        insta::assert_snapshot!(
            i64(b"", "test").unwrap_err(),
            @"invalid number, no digits found",
        );
        insta::assert_snapshot!(
            i64(b"1a", "test").unwrap_err(),
            @"invalid digit, expected 0-9 but got a",
        );
    }

    #[test]
    fn parse_fraction() {
        assert_eq!(fraction(b"4").unwrap(), 400_000_000);
        assert_eq!(fraction(b"000000001").unwrap(), 1);
        assert_eq!(fraction(b"123456789").unwrap(), 123_456_789);
        assert_eq!(fraction(b"05").unwrap(), 50_000_000);
        assert_eq!(
            fraction(b"1234567891").unwrap_err().to_string(),
            "invalid fraction, too many digits (at most 9 are allowed)",
        );
        assert!(fraction(b"").is_err());
    }

    #[test]
    fn split_digits() {
        assert_eq!(digits(b"123Y"), (&b"123"[..], &b"Y"[..]));
        assert_eq!(digits(b"Y"), (&b""[..], &b"Y"[..]));
        assert_eq!(digits(b"12"), (&b"12"[..], &b""[..]));
    }
}
