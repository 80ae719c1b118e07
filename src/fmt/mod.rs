/*!
Routines for printing and parsing durations.

The [`period`] module implements the ISO 8601 period format in its four
dialects (full, calendar, clock and week-based) and the three output styles
(normal, ISO 8601 and XML Schema). The [`pattern`] module implements a
small numeric pattern language for custom duration formats.

Most users won't need to use these modules directly. The `Display` and
`FromStr` trait implementations on [`Duration`](crate::Duration) use the
period format, and [`Duration::to_iso_string`](crate::Duration::to_iso_string)
and [`Duration::to_xml_string`](crate::Duration::to_xml_string) provide the
other output styles.

# The `Write` trait

The printers in this module write to an implementation of [`Write`]. It is
implemented for `String`, `Vec<u8>` and `&mut W` for any `W: Write`. To
write to an implementation of `core::fmt::Write` or `std::io::Write`, wrap
it in [`StdFmtWrite`] or [`StdIoWrite`], respectively.
*/

use crate::{error::fmt::Error as E, Error};

use self::util::{Decimal, DecimalFormatter, Fractional, FractionalFormatter};

pub mod pattern;
pub mod period;
mod util;

/// The result of parsing a value out of a slice of bytes.
///
/// This contains both the parsed value and the remaining input. This makes
/// it easy to compose small parsers where each one consumes a prefix of the
/// input.
pub(crate) struct Parsed<'i, V> {
    /// The value parsed.
    pub(crate) value: V,
    /// The remaining unparsed input.
    pub(crate) input: &'i [u8],
}

impl<'i, V: core::fmt::Debug> core::fmt::Debug for Parsed<'i, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Parsed")
            .field("value", &self.value)
            .field("input", &crate::util::escape::Bytes(self.input))
            .finish()
    }
}

/// A trait for printing durations in any of the supported formats.
///
/// This trait is a simplified version of the `core::fmt::Write` trait. The
/// main difference is that it returns this crate's error type.
pub trait Write {
    /// Write the given string to this writer, returning whether the write
    /// succeeded or not.
    fn write_str(&mut self, string: &str) -> Result<(), Error>;

    /// Write the given character to this writer, returning whether the write
    /// succeeded or not.
    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        self.write_str(char.encode_utf8(&mut [0; 4]))
    }
}

impl Write for alloc::string::String {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.push_str(string);
        Ok(())
    }
}

impl Write for alloc::vec::Vec<u8> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.extend_from_slice(string.as_bytes());
        Ok(())
    }
}

impl<W: ?Sized + Write> Write for &mut W {
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        (**self).write_str(string)
    }

    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        (**self).write_char(char)
    }
}

/// An adapter for using `std::io::Write` implementations with
/// [`fmt::Write`](Write).
///
/// # Example
///
/// ```
/// use tenor::{fmt::{period::DurationPrinter, StdIoWrite}, Duration};
///
/// let d: Duration = "P1Y2M".parse()?;
///
/// let mut buf = vec![];
/// DurationPrinter::new().print(&d, StdIoWrite(&mut buf))?;
/// assert_eq!(buf, b"P1Y2M");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg(feature = "std")]
#[derive(Clone, Debug)]
pub struct StdIoWrite<W>(pub W);

#[cfg(feature = "std")]
impl<W: std::io::Write> Write for StdIoWrite<W> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0.write_all(string.as_bytes()).map_err(|err| {
            Error::from_args(format_args!("failed to write: {err}"))
        })
    }
}

/// An adapter for using `core::fmt::Write` implementations with
/// [`fmt::Write`](Write).
///
/// This is used by the `Display` implementation of
/// [`Duration`](crate::Duration), and can be used in a similar way for
/// other printers.
#[derive(Clone, Debug)]
pub struct StdFmtWrite<W>(pub W);

impl<W: core::fmt::Write> Write for StdFmtWrite<W> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0.write_str(string).map_err(|_| Error::from(E::StdFmtWriteAdapter))
    }
}

/// Extension methods for writing numbers.
trait WriteExt: Write {
    /// Write the given number as a decimal using ASCII digits to this buffer.
    /// The given formatter controls how the decimal is formatted.
    #[inline]
    fn write_int(
        &mut self,
        formatter: &DecimalFormatter,
        n: impl Into<i64>,
    ) -> Result<(), Error> {
        self.write_decimal(&formatter.format(n.into()))
    }

    /// Write the given fractional number using ASCII digits to this buffer.
    /// The given formatter controls how the fractional number is formatted.
    #[inline]
    fn write_fraction(
        &mut self,
        formatter: &FractionalFormatter,
        n: impl Into<i64>,
    ) -> Result<(), Error> {
        self.write_fractional(&formatter.format(n.into()))
    }

    /// Write the given decimal number to this buffer.
    #[inline]
    fn write_decimal(&mut self, decimal: &Decimal) -> Result<(), Error> {
        self.write_str(decimal.as_str())
    }

    /// Write the given fractional number to this buffer.
    #[inline]
    fn write_fractional(
        &mut self,
        fractional: &Fractional,
    ) -> Result<(), Error> {
        self.write_str(fractional.as_str())
    }
}

impl<W: Write> WriteExt for W {}
