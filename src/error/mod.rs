use alloc::{boxed::Box, sync::Arc};

use crate::util::escape;

pub(crate) mod duration;
pub(crate) mod fmt;
pub(crate) mod timeline;
pub(crate) mod unit;
pub(crate) mod util;

/// An error that can occur in this crate.
///
/// Errors fall into four broad categories, each with its own predicate:
///
/// * [`Error::is_invalid_argument`]: a negative amount was given to a
/// factory that only accepts non-negative amounts, a unit was given that the
/// duration's [family](crate::unit::Family) does not admit, a builder field
/// was set twice or a builder was finished without any fields set.
/// * [`Error::is_mixed_sign`]: two durations could not be merged into one
/// sign-consistent duration, or ISO 8601 output was requested for a negative
/// duration.
/// * [`Error::is_parse`]: text could not be parsed as a duration. The
/// original input and the offset at which parsing failed are available via
/// [`Error::parse_input`] and [`Error::parse_offset`].
/// * [`Error::is_overflow`]: an amount, or the product of an amount with a
/// unit conversion factor or a scalar, does not fit into a 64-bit integer.
///
/// # Design
///
/// Like a number of other date and time libraries, this crate uses a single
/// error type for every fallible operation. Errors are cheap to clone and are
/// one word in size. Errors may carry a chain of causes, and the `Display`
/// implementation writes the whole chain, from the most general context to
/// the root cause, separated by `: `.
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// This is in an `Arc` to make an `Error` cloneable and one word big.
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates a new error value from `core::fmt::Arguments`.
    ///
    /// It is expected to use [`format_args!`](format_args) from
    /// Rust's standard library (available in `core`) to create a
    /// `core::fmt::Arguments`.
    ///
    /// This is mostly useful for implementations of
    /// [`TimePoint`](crate::timeline::TimePoint), which need to report
    /// their own failures through this crate's error type.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::Error;
    ///
    /// let err = Error::from_args(format_args!("something failed"));
    /// assert_eq!(err.to_string(), "something failed");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when this error was caused by an invalid argument.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{Duration, unit::Unit};
    ///
    /// let err = Duration::of_positive().try_years(-1).unwrap_err();
    /// assert!(err.is_invalid_argument());
    ///
    /// let err = Duration::of_positive().build().unwrap_err();
    /// assert!(err.is_invalid_argument());
    /// ```
    pub fn is_invalid_argument(&self) -> bool {
        use self::duration::Error as DurationError;
        use self::ErrorKind::*;

        match *self.root().kind() {
            Duration(ref err) => !matches!(
                *err,
                DurationError::MixedSign | DurationError::NegativeIso
            ),
            Pattern(ref err) => err.is_invalid_argument(),
            Timeline(_) | Unit(_) => true,
            _ => false,
        }
    }

    /// Returns true when this error was caused by two durations whose signs
    /// could not be reconciled, or by requesting ISO 8601 output for a
    /// negative duration.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::Duration;
    ///
    /// let d1: Duration = "P1M".parse()?;
    /// let d2: Duration = "-P30D".parse()?;
    /// assert!(d1.plus_duration(&d2).unwrap_err().is_mixed_sign());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_mixed_sign(&self) -> bool {
        use self::duration::Error as DurationError;

        matches!(
            *self.root().kind(),
            ErrorKind::Duration(
                DurationError::MixedSign | DurationError::NegativeIso
            )
        )
    }

    /// Returns true when this error occurred while parsing text.
    ///
    /// Note that the root cause of a parse error may be an overflow, in
    /// which case both this and [`Error::is_overflow`] return true.
    pub fn is_parse(&self) -> bool {
        self.parse_context().is_some()
    }

    /// Returns true when this error is the result of arithmetic overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{Duration, unit::Unit};
    ///
    /// let d: Duration = Duration::of(i64::MAX, Unit::Day)?;
    /// assert!(d.multiplied_by(2).unwrap_err().is_overflow());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_overflow(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Overflow(_))
    }

    /// When this is a parse error, this returns the zero based byte offset
    /// into the original input at which parsing failed.
    ///
    /// When the input ended prematurely, the offset is equal to the length
    /// of the input.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::Duration;
    ///
    /// let err = "P1Y2X".parse::<Duration>().unwrap_err();
    /// assert_eq!(err.parse_offset(), Some(4));
    ///
    /// let err = "P1YT".parse::<Duration>().unwrap_err();
    /// assert_eq!(err.parse_offset(), Some(4));
    /// ```
    pub fn parse_offset(&self) -> Option<usize> {
        self.parse_context().map(|err| err.offset)
    }

    /// When this is a parse error, this returns the original input (lossily
    /// decoded as UTF-8) that failed to parse.
    pub fn parse_input(&self) -> Option<&str> {
        self.parse_context().map(|err| &*err.input)
    }

    fn parse_context(&self) -> Option<&ParseError> {
        self.chain().find_map(|err| match *err.kind() {
            ErrorKind::Parse(ref err) => Some(err),
            _ => None,
        })
    }
}

impl Error {
    /// Creates a new error indicating that some arithmetic operation
    /// overflowed. The given `what` label describes the quantity that
    /// overflowed. (e.g., "nanoseconds")
    #[inline(never)]
    #[cold]
    pub(crate) fn overflow(what: &'static str) -> Error {
        Error::from(ErrorKind::Overflow(OverflowError { what }))
    }

    /// Creates a parse context error for the given input and offset.
    ///
    /// This is meant to be used as the consequent of a more specific parse
    /// error via `Error::context`.
    #[inline(never)]
    #[cold]
    pub(crate) fn parse(input: &[u8], offset: usize) -> Error {
        let input = alloc::string::String::from_utf8_lossy(input).into();
        Error::from(ErrorKind::Parse(ParseError { input, offset }))
    }

    pub(crate) fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err
            .inner
            .as_mut()
            .expect("error was just created with an inner value");
        assert!(inner.cause.is_none(), "cause of consequence must be `None`");
        // OK because we just created this error so the Arc
        // has one reference.
        Arc::get_mut(inner)
            .expect("freshly created error has a single reference")
            .cause = Some(self);
        err
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        // OK because `Error::chain` is guaranteed to return a non-empty
        // iterator.
        self.chain().last().unwrap()
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always the
    /// "root" cause. That is, the error closest to the point where something
    /// has gone wrong.
    ///
    /// The iterator returned is guaranteed to yield at least one error.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    /// Returns the kind of this error.
    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f
                    .debug_struct("Error")
                    .field("kind", &"None")
                    .finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Duration(self::duration::Error),
    Fmt(self::fmt::Error),
    FmtPeriod(self::fmt::period::Error),
    Overflow(OverflowError),
    Parse(ParseError),
    ParseFraction(self::util::ParseFractionError),
    ParseInt(self::util::ParseIntError),
    Pattern(self::fmt::pattern::Error),
    Timeline(self::timeline::Error),
    Unit(self::unit::Error),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref msg) => msg.fmt(f),
            Duration(ref err) => err.fmt(f),
            Fmt(ref err) => err.fmt(f),
            FmtPeriod(ref err) => err.fmt(f),
            Overflow(ref err) => err.fmt(f),
            Parse(ref err) => err.fmt(f),
            ParseFraction(ref err) => err.fmt(f),
            ParseInt(ref err) => err.fmt(f),
            Pattern(ref err) => err.fmt(f),
            Timeline(ref err) => err.fmt(f),
            Unit(ref err) => err.fmt(f),
            Unknown => f.write_str("unknown tenor error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Some(Arc::new(ErrorInner { kind, cause: None })) }
    }
}

/// A generic error message.
///
/// This supports the `Error::from_args` public API, which permits users of
/// this crate to manifest their own `Error` values from an arbitrary message.
struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        use alloc::string::ToString;

        let message = message.to_string().into_boxed_str();
        AdhocError { message }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// An error that occurs when an amount no longer fits into a 64-bit integer.
#[derive(Clone, Debug)]
struct OverflowError {
    what: &'static str,
}

impl core::fmt::Display for OverflowError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let OverflowError { what } = *self;
        write!(f, "arithmetic overflow for {what}")
    }
}

/// The location of a parse failure.
///
/// This is always the consequent of a more specific error describing what
/// went wrong.
#[derive(Clone, Debug)]
struct ParseError {
    input: Box<str>,
    offset: usize,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "failed to parse {input:?} at offset {offset}",
            input = escape::Bytes(self.input.as_bytes()),
            offset = self.offset,
        )
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This trait basically exists to make `Error::context` work without needing
/// to rely on public `From` impls.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or `Result<T, Error>`.
/// Specifically, in the latter case, it absolves one of the need to call
/// `map_err` everywhere one wants to add context to an error.
pub(crate) trait ErrorContext<T, E> {
    /// Contextualize the given consequent error with this (`self`) error as
    /// the cause.
    ///
    /// This is equivalent to saying that "consequent is caused by self."
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    ///
    /// This is useful when error construction allocates, since the closure
    /// is only called on the error path.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: IntoError,
{
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }

    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent().into_error())
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    // We test that our 'Error' type is the size we expect. This isn't an API
    // guarantee, but if the size increases, we really want to make sure we
    // decide to do that intentionally.
    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn chain_display() {
        let err = Error::overflow("months")
            .context(duration::Error::MixedSign);
        insta::assert_snapshot!(
            err.to_string(),
            @"cannot merge durations whose calendar and clock parts have opposite signs: arithmetic overflow for months",
        );
        assert!(err.is_overflow());
        assert!(!err.is_mixed_sign());
    }

    #[test]
    fn parse_context() {
        let err = Error::overflow("seconds").context(Error::parse(b"PT9S", 2));
        assert!(err.is_parse());
        assert!(err.is_overflow());
        assert_eq!(err.parse_offset(), Some(2));
        assert_eq!(err.parse_input(), Some("PT9S"));
        insta::assert_snapshot!(
            err.to_string(),
            @r#"failed to parse "PT9S" at offset 2: arithmetic overflow for seconds"#,
        );
    }
}
