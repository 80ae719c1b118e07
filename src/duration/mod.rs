/*!
The duration value type.

A [`Duration`] is an ordered list of [`Item`]s, each a non-negative amount of
one [`Unit`], plus a single sign that applies to every item. The arithmetic
on durations lives in this module as well: see [`Duration::plus`],
[`Duration::plus_duration`], [`Duration::union`] and
[`Duration::multiplied_by`]. Durations may also be assembled with a
[`Builder`].
*/

use core::marker::PhantomData;

use alloc::{string::String, vec::Vec};

use crate::{
    error::duration::Error as E,
    fmt::period::{DurationParser, DurationPrinter, Style},
    unit::{self, Calendar, Clock, Family, Full, Unit, WeekBased},
    Error,
};

pub use self::builder::Builder;

mod arith;
mod builder;

/// The default parser used by the `FromStr` implementation on `Duration`.
static DEFAULT_PERIOD_PARSER: DurationParser = DurationParser::new();
/// The default printer used by the `Display` implementation on `Duration`.
static DEFAULT_PERIOD_PRINTER: DurationPrinter = DurationPrinter::new();
/// The printer used by [`Duration::to_iso_string`].
static ISO_PERIOD_PRINTER: DurationPrinter =
    DurationPrinter::new().style(Style::Iso);
/// The printer used by [`Duration::to_xml_string`].
static XML_PERIOD_PRINTER: DurationPrinter =
    DurationPrinter::new().style(Style::Xml);

/// A signed duration made up of calendar and clock units.
///
/// A duration is a list of [`Item`]s, ordered from the longest unit to the
/// shortest, where every unit occurs at most once. The amount of every item
/// is non-negative and non-zero. The direction of the duration is given by
/// one sign for the whole duration. The empty duration is never negative, so
/// there is exactly one representation of zero.
///
/// Milliseconds and microseconds are never stored. Any amount given in
/// those units is converted to nanoseconds when a duration is constructed.
///
/// The type parameter `F` is the [unit family](crate::unit::Family) of the
/// duration. It restricts the units a duration may contain, and it selects
/// the dialect used when parsing a duration. It defaults to
/// [`Full`], which admits every unit.
///
/// Durations are immutable values. Every operation returns a new duration.
///
/// # Equality
///
/// Two durations are equal when they have the same sign and the same items.
/// No units are converted when comparing durations for equality, so `P1Y`
/// and `P12M` are not equal. To order durations by their length, use a
/// [`LengthComparator`](crate::timeline::LengthComparator).
///
/// # Example
///
/// ```
/// use tenor::{Duration, unit::Unit};
///
/// let d = Duration::of_positive().years(1).hours(36).build()?;
/// assert_eq!(d.to_string(), "P1YT36H");
/// assert_eq!(d.get_partial_amount(Unit::Hour), 36);
///
/// let d = d.inverse();
/// assert_eq!(d.to_string(), "-P1YT36H");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Duration<F = Full> {
    items: Vec<Item>,
    negative: bool,
    family: PhantomData<F>,
}

/// A non-negative amount of a single unit.
///
/// Items are the components of a [`Duration`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Item {
    amount: i64,
    unit: Unit,
}

impl Item {
    /// Creates a new item from a non-negative amount and a unit.
    ///
    /// # Errors
    ///
    /// This returns an error if the amount is negative.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{duration::Item, unit::Unit};
    ///
    /// let item = Item::new(5, Unit::Week)?;
    /// assert_eq!(item.amount(), 5);
    /// assert_eq!(item.unit(), Unit::Week);
    ///
    /// assert!(Item::new(-5, Unit::Week).unwrap_err().is_invalid_argument());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(amount: i64, unit: Unit) -> Result<Item, Error> {
        if amount < 0 {
            return Err(Error::from(E::NegativeAmount { unit }));
        }
        Ok(Item { amount, unit })
    }

    /// Returns the non-negative amount of this item.
    #[inline]
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the unit of this item.
    #[inline]
    pub fn unit(&self) -> Unit {
        self.unit
    }
}

/// Factories for durations.
impl<F: Family> Duration<F> {
    /// Returns the empty duration.
    ///
    /// There is only one empty duration, and it is never negative.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::Duration;
    ///
    /// let zero: Duration = Duration::of_zero();
    /// assert!(zero.is_empty());
    /// assert_eq!(zero.to_string(), "PT0S");
    /// assert_eq!(zero, zero.inverse());
    /// ```
    #[inline]
    pub const fn of_zero() -> Duration<F> {
        Duration { items: Vec::new(), negative: false, family: PhantomData }
    }

    /// Creates a duration with a single unit.
    ///
    /// The sign of the amount becomes the sign of the duration. An amount of
    /// zero yields the empty duration. Milliseconds and microseconds are
    /// converted to nanoseconds.
    ///
    /// # Errors
    ///
    /// This returns an error if the unit is not admitted by the duration's
    /// family, or if the amount overflows (which can only happen for
    /// `i64::MIN` or when converting to nanoseconds).
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{Duration, unit::Unit};
    ///
    /// let d: Duration = Duration::of(-5, Unit::Quarter)?;
    /// assert_eq!(d.to_string(), "-P5Q");
    ///
    /// let d: Duration = Duration::of(1_500, Unit::Millisecond)?;
    /// assert_eq!(d.get_partial_amount(Unit::Nanosecond), 1_500_000_000);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn of(amount: i64, unit: Unit) -> Result<Duration<F>, Error> {
        unit::check::<F>(unit)?;
        let (amount, unit) = unit.fold(amount)?;
        if amount == 0 {
            return Ok(Duration::of_zero());
        }
        let magnitude =
            amount.checked_abs().ok_or_else(|| Error::overflow(unit.plural()))?;
        Ok(Duration::new_unchecked(
            alloc::vec![Item { amount: magnitude, unit }],
            amount < 0,
        ))
    }

    /// Creates a duration from a list of non-negative unit amounts and a
    /// sign.
    ///
    /// The units may be given in any order. Amounts for the same unit are
    /// added together, and milliseconds and microseconds are converted to
    /// nanoseconds. Zero amounts are dropped. If every amount is zero, then
    /// the empty duration is returned regardless of `negative`.
    ///
    /// # Errors
    ///
    /// This returns an error if any amount is negative, if any unit is not
    /// admitted by the duration's family or if an amount overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{Duration, unit::Unit};
    ///
    /// let d: Duration = Duration::from_units(
    ///     &[(Unit::Millisecond, 5), (Unit::Day, 2), (Unit::Nanosecond, 7)],
    ///     true,
    /// )?;
    /// assert_eq!(d.to_string(), "-P2DT0,005000007S");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_units(
        units: &[(Unit, i64)],
        negative: bool,
    ) -> Result<Duration<F>, Error> {
        let mut magnitudes = [0i128; Unit::ALL.len()];
        for &(unit, amount) in units {
            unit::check::<F>(unit)?;
            if amount < 0 {
                return Err(Error::from(E::NegativeAmount { unit }));
            }
            let (amount, unit) = unit.fold(amount)?;
            magnitudes[unit as usize] += i128::from(amount);
        }
        Duration::from_magnitudes(&magnitudes, negative)
    }

    /// Creates a duration from an array of magnitudes indexed by unit.
    ///
    /// Every magnitude must be non-negative and milliseconds and
    /// microseconds must be zero. Each magnitude is checked to fit into an
    /// `i64`, and each unit is checked against the duration's family.
    pub(crate) fn from_magnitudes(
        magnitudes: &[i128; Unit::ALL.len()],
        negative: bool,
    ) -> Result<Duration<F>, Error> {
        let mut items = Vec::new();
        for unit in Unit::ALL {
            let magnitude = magnitudes[unit as usize];
            if magnitude == 0 {
                continue;
            }
            debug_assert!(magnitude > 0, "magnitudes are never negative");
            debug_assert!(
                !matches!(unit, Unit::Millisecond | Unit::Microsecond),
                "milliseconds and microseconds are folded into nanoseconds",
            );
            unit::check::<F>(unit)?;
            let amount = i64::try_from(magnitude)
                .map_err(|_| Error::overflow(unit.plural()))?;
            items.push(Item { amount, unit });
        }
        Ok(Duration::new_unchecked(items, negative))
    }

    /// Creates a duration from items that are already sorted, deduplicated
    /// and non-zero.
    ///
    /// The sign is ignored when there are no items.
    pub(crate) fn new_unchecked(
        items: Vec<Item>,
        negative: bool,
    ) -> Duration<F> {
        debug_assert!(items.windows(2).all(|w| w[0].unit > w[1].unit));
        debug_assert!(items.iter().all(|item| item.amount > 0));
        let negative = negative && !items.is_empty();
        Duration { items, negative, family: PhantomData }
    }
}

/// Factories only available for the full family of units.
impl Duration<Full> {
    /// Returns a builder for a positive duration.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::Duration;
    ///
    /// let d = Duration::of_positive().years(2).months(13).days(35).build()?;
    /// assert_eq!(d.to_string(), "P2Y13M35D");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn of_positive() -> Builder {
        Builder::new(false)
    }

    /// Returns a builder for a negative duration.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::Duration;
    ///
    /// let d = Duration::of_negative().hours(3).millis(5).build()?;
    /// assert_eq!(d.to_string(), "-PT3H0,005S");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn of_negative() -> Builder {
        Builder::new(true)
    }

    /// Parses a duration in the full dialect of the ISO 8601 period format.
    ///
    /// This is equivalent to `input.parse::<Duration>()`.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::Duration;
    ///
    /// let d = Duration::parse_period("P1Y2M3DT4H5M6,7S")?;
    /// assert_eq!(d.to_string(), "P1Y2M3DT4H5M6,700S");
    ///
    /// // Alternative format with fixed-width fields.
    /// let d = Duration::parse_period("P0001-02-03T04:05:06")?;
    /// assert_eq!(d.to_string(), "P1Y2M3DT4H5M6S");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse_period(input: &str) -> Result<Duration<Full>, Error> {
        DEFAULT_PERIOD_PARSER.parse(input)
    }
}

/// Factories only available for calendar units.
impl Duration<Calendar> {
    /// Creates a calendar duration from years, months and days.
    ///
    /// The sign of the duration is derived from the signs of the given
    /// amounts.
    ///
    /// # Errors
    ///
    /// This returns an error when some amounts are positive and others are
    /// negative, or when an amount overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{Duration, unit::Calendar};
    ///
    /// let d = Duration::<Calendar>::of_calendar_units(-1, -2, 0)?;
    /// assert_eq!(d.to_string(), "-P1Y2M");
    ///
    /// let err = Duration::<Calendar>::of_calendar_units(1, -2, 0).unwrap_err();
    /// assert!(err.is_invalid_argument());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn of_calendar_units(
        years: i64,
        months: i64,
        days: i64,
    ) -> Result<Duration<Calendar>, Error> {
        Duration::of_components(&[
            (Unit::Year, years),
            (Unit::Month, months),
            (Unit::Day, days),
        ])
    }

    /// Parses a duration in the calendar dialect of the ISO 8601 period
    /// format.
    ///
    /// Time units are not allowed, but all calendar units except
    /// week-based years are.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{Duration, unit::Calendar};
    ///
    /// let d = Duration::<Calendar>::parse_calendar_period("P2C3Q")?;
    /// assert_eq!(d.to_string(), "P2C3Q");
    /// assert!(Duration::<Calendar>::parse_calendar_period("P1DT1H").is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse_calendar_period(
        input: &str,
    ) -> Result<Duration<Calendar>, Error> {
        DEFAULT_PERIOD_PARSER.parse(input)
    }
}

/// Factories only available for clock units.
impl Duration<Clock> {
    /// Creates a clock duration from hours, minutes and seconds.
    ///
    /// The sign of the duration is derived from the signs of the given
    /// amounts.
    ///
    /// # Errors
    ///
    /// This returns an error when some amounts are positive and others are
    /// negative, or when an amount overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{Duration, unit::Clock};
    ///
    /// let d = Duration::<Clock>::of_clock_units(0, 90, 15)?;
    /// assert_eq!(d.to_string(), "PT90M15S");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn of_clock_units(
        hours: i64,
        minutes: i64,
        seconds: i64,
    ) -> Result<Duration<Clock>, Error> {
        Duration::of_components(&[
            (Unit::Hour, hours),
            (Unit::Minute, minutes),
            (Unit::Second, seconds),
        ])
    }

    /// Parses a duration in the clock dialect of the ISO 8601 period format.
    ///
    /// The time designator `T` must immediately follow `P`.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{Duration, unit::Clock};
    ///
    /// let d = Duration::<Clock>::parse_clock_period("-PT1H30M")?;
    /// assert_eq!(d.to_string(), "-PT1H30M");
    /// assert!(Duration::<Clock>::parse_clock_period("P1D").is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse_clock_period(input: &str) -> Result<Duration<Clock>, Error> {
        DEFAULT_PERIOD_PARSER.parse(input)
    }
}

/// Factories only available for week-based units.
impl Duration<WeekBased> {
    /// Parses a duration in the week-based dialect of the ISO 8601 period
    /// format.
    ///
    /// Only the symbols `Y` (week-based years), `W` and `D` are allowed.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{Duration, unit::{Unit, WeekBased}};
    ///
    /// let d = Duration::<WeekBased>::parse_week_based_period("P2Y5W")?;
    /// assert_eq!(d.get_partial_amount(Unit::WeekBasedYear), 2);
    /// assert_eq!(d.to_string(), "P2Y5W");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse_week_based_period(
        input: &str,
    ) -> Result<Duration<WeekBased>, Error> {
        DEFAULT_PERIOD_PARSER.parse(input)
    }
}

impl<F: Family> Duration<F> {
    /// Creates a duration from signed components that must all share one
    /// sign.
    fn of_components(
        components: &[(Unit, i64)],
    ) -> Result<Duration<F>, Error> {
        let positive = components.iter().any(|&(_, amount)| amount > 0);
        let negative = components.iter().any(|&(_, amount)| amount < 0);
        if positive && negative {
            return Err(Error::from(E::MixedComponents));
        }
        let mut magnitudes = [0i128; Unit::ALL.len()];
        for &(unit, amount) in components {
            unit::check::<F>(unit)?;
            magnitudes[unit as usize] = i128::from(amount).abs();
        }
        Duration::from_magnitudes(&magnitudes, negative)
    }
}

/// Accessors.
impl<F: Family> Duration<F> {
    /// Returns the items of this duration, ordered from the longest unit to
    /// the shortest.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{Duration, unit::Unit};
    ///
    /// let d: Duration = "-P7Y4M3D".parse()?;
    /// let units: Vec<Unit> = d.items().iter().map(|item| item.unit()).collect();
    /// assert_eq!(units, vec![Unit::Year, Unit::Month, Unit::Day]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns true if this duration has a non-zero amount for the given
    /// unit.
    ///
    /// For milliseconds and microseconds, this reports whether the amount
    /// derived from the nanosecond item (see
    /// [`Duration::get_partial_amount`]) is non-zero.
    #[inline]
    pub fn contains(&self, unit: Unit) -> bool {
        self.get_partial_amount(unit) > 0
    }

    /// Returns the non-negative amount of the given unit in this duration.
    ///
    /// No conversion between units takes place, except that the amount of
    /// milliseconds and microseconds is derived from the nanosecond item by
    /// truncation. When the duration doesn't contain the unit, `0` is
    /// returned.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{Duration, unit::Unit};
    ///
    /// let d: Duration = "PT1H0,123456789S".parse()?;
    /// assert_eq!(d.get_partial_amount(Unit::Hour), 1);
    /// assert_eq!(d.get_partial_amount(Unit::Minute), 0);
    /// assert_eq!(d.get_partial_amount(Unit::Millisecond), 123);
    /// assert_eq!(d.get_partial_amount(Unit::Microsecond), 123_456);
    /// assert_eq!(d.get_partial_amount(Unit::Nanosecond), 123_456_789);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get_partial_amount(&self, unit: Unit) -> i64 {
        let divisor = match unit {
            Unit::Millisecond => 1_000_000,
            Unit::Microsecond => 1_000,
            _ => 1,
        };
        let unit = if divisor == 1 { unit } else { Unit::Nanosecond };
        self.position(unit)
            .map_or(0, |i| self.items[i].amount / divisor)
    }

    /// Returns true if this duration has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if and only if this duration is negative.
    ///
    /// The empty duration is never negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns true if and only if this duration is non-empty and not
    /// negative.
    #[inline]
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.is_empty()
    }

    /// Returns the "sign number" or "signum" of this duration.
    ///
    /// The number returned is `-1` when this duration is negative,
    /// `0` when this duration is empty and `1` when this duration is
    /// positive.
    #[inline]
    pub fn signum(&self) -> i8 {
        if self.negative {
            -1
        } else if self.is_empty() {
            0
        } else {
            1
        }
    }

    /// Returns the index of the item with the given unit, if present.
    fn position(&self, unit: Unit) -> Option<usize> {
        // Items are sorted in descending order.
        self.items.binary_search_by(|item| unit.cmp(&item.unit)).ok()
    }

    /// Returns the amount of the given item with the sign of this duration
    /// applied.
    fn signed(&self, item: &Item) -> i64 {
        if self.negative {
            -item.amount
        } else {
            item.amount
        }
    }
}

/// Printing.
impl<F: Family> Duration<F> {
    /// Returns this duration in the ISO 8601 period format.
    ///
    /// Quarters are written as months, and decades, centuries and millennia
    /// as years. Weeks are written as days unless weeks are the only unit of
    /// this duration.
    ///
    /// # Errors
    ///
    /// ISO 8601 has no negative durations, so this returns an error when
    /// this duration is negative.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::Duration;
    ///
    /// let d: Duration = "P1E2Q3W".parse()?;
    /// assert_eq!(d.to_iso_string()?, "P10Y6M21D");
    ///
    /// let d: Duration = "P3W".parse()?;
    /// assert_eq!(d.to_iso_string()?, "P3W");
    ///
    /// let d: Duration = "-P3W".parse()?;
    /// assert!(d.to_iso_string().unwrap_err().is_mixed_sign());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_iso_string(&self) -> Result<String, Error> {
        let mut buf = String::new();
        ISO_PERIOD_PRINTER.print(self, &mut buf)?;
        Ok(buf)
    }

    /// Returns this duration in the format of the XML Schema `duration`
    /// data type.
    ///
    /// This is like [`Duration::to_iso_string`], except that weeks are
    /// always written as days, negative durations are permitted and the
    /// decimal separator is always a period.
    ///
    /// # Errors
    ///
    /// This returns an error when writing compound units as years or months
    /// overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::Duration;
    ///
    /// let d: Duration = "-PT3H2M1,4S".parse()?;
    /// assert_eq!(d.to_xml_string()?, "-PT3H2M1.400S");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_xml_string(&self) -> Result<String, Error> {
        let mut buf = String::new();
        XML_PERIOD_PRINTER.print(self, &mut buf)?;
        Ok(buf)
    }
}

impl<F: Family> Default for Duration<F> {
    #[inline]
    fn default() -> Duration<F> {
        Duration::of_zero()
    }
}

impl<F: Family> core::fmt::Debug for Duration<F> {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl<F: Family> core::fmt::Display for Duration<F> {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::StdFmtWrite;

        DEFAULT_PERIOD_PRINTER
            .print(self, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl<F: Family> core::str::FromStr for Duration<F> {
    type Err = Error;

    #[inline]
    fn from_str(string: &str) -> Result<Duration<F>, Error> {
        DEFAULT_PERIOD_PARSER.parse(string)
    }
}

impl<F: Family> core::ops::Neg for Duration<F> {
    type Output = Duration<F>;

    #[inline]
    fn neg(self) -> Duration<F> {
        self.inverse()
    }
}

impl<'a, F: Family> core::ops::Neg for &'a Duration<F> {
    type Output = Duration<F>;

    #[inline]
    fn neg(self) -> Duration<F> {
        self.inverse()
    }
}

macro_rules! impl_family_conversions {
    ($family:ty) => {
        impl From<Duration<$family>> for Duration<Full> {
            #[inline]
            fn from(d: Duration<$family>) -> Duration<Full> {
                Duration::new_unchecked(d.items, d.negative)
            }
        }

        impl TryFrom<Duration<Full>> for Duration<$family> {
            type Error = Error;

            #[inline]
            fn try_from(d: Duration<Full>) -> Result<Duration<$family>, Error> {
                for item in d.items.iter() {
                    unit::check::<$family>(item.unit)?;
                }
                Ok(Duration::new_unchecked(d.items, d.negative))
            }
        }
    };
}

impl_family_conversions!(Calendar);
impl_family_conversions!(Clock);
impl_family_conversions!(WeekBased);

#[cfg(feature = "serde")]
impl<F: Family> serde::Serialize for Duration<F> {
    #[inline]
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de, F: Family> serde::Deserialize<'de> for Duration<F> {
    #[inline]
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration<F>, D::Error> {
        use serde::de;

        struct DurationVisitor<F>(PhantomData<F>);

        impl<'de, F: Family> de::Visitor<'de> for DurationVisitor<F> {
            type Value = Duration<F>;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                write!(f, "an ISO 8601 period restricted to {} units", F::NAME)
            }

            #[inline]
            fn visit_bytes<E: de::Error>(
                self,
                value: &[u8],
            ) -> Result<Duration<F>, E> {
                DEFAULT_PERIOD_PARSER.parse(value).map_err(de::Error::custom)
            }

            #[inline]
            fn visit_str<E: de::Error>(
                self,
                value: &str,
            ) -> Result<Duration<F>, E> {
                self.visit_bytes(value.as_bytes())
            }
        }

        deserializer.deserialize_str(DurationVisitor(PhantomData))
    }
}

#[cfg(test)]
impl<F: Family> quickcheck::Arbitrary for Duration<F> {
    fn arbitrary(g: &mut quickcheck::Gen) -> Duration<F> {
        use quickcheck::Arbitrary;

        let mut units = Vec::new();
        for unit in Unit::ALL {
            if !F::admits(unit)
                || matches!(unit, Unit::Millisecond | Unit::Microsecond)
                || u8::arbitrary(g) % 3 != 0
            {
                continue;
            }
            let amount = if unit == Unit::Nanosecond {
                i64::from(u32::arbitrary(g) % 1_000_000_000)
            } else {
                i64::from(u16::arbitrary(g) % 1_000)
            };
            units.push((unit, amount));
        }
        Duration::from_units(&units, bool::arbitrary(g)).unwrap()
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Duration<F>>> {
        let mut smaller = Vec::new();
        for i in 0..self.items.len() {
            let mut items = self.items.clone();
            items.remove(i);
            smaller.push(Duration::new_unchecked(items, self.negative));
        }
        alloc::boxed::Box::new(smaller.into_iter())
    }
}
