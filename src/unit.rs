/*!
Units of time and the unit families that restrict which units a duration may
contain.

A [`Unit`] has no exact length by itself. Instead, every unit has an
estimated average length (a year is `365.2425` days, a month is a twelfth of
that) which is used wherever an exact length is required: ordering units,
merging durations with opposite signs and approximate normalization.
*/

use crate::{error::unit::Error as E, Error};

/// A unit of time.
///
/// Units are totally ordered by their estimated average length, such that
/// longer units compare greater than shorter units. Units with the same
/// average length but a distinct identity (years and week-based years) still
/// compare unequal: a year compares greater than a week-based year.
///
/// # Examples
///
/// ```
/// use tenor::unit::Unit;
///
/// assert!(Unit::Year > Unit::Nanosecond);
/// assert!(Unit::Quarter > Unit::Month);
/// assert!(Unit::Year > Unit::WeekBasedYear);
/// assert_eq!(Unit::Hour, Unit::Hour);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Unit {
    Millennium = 14,
    Century = 13,
    Decade = 12,
    Year = 11,
    WeekBasedYear = 10,
    Quarter = 9,
    Month = 8,
    Week = 7,
    Day = 6,
    Hour = 5,
    Minute = 4,
    Second = 3,
    Millisecond = 2,
    Microsecond = 1,
    Nanosecond = 0,
}

impl Unit {
    /// Every unit, from longest to shortest.
    pub const ALL: [Unit; 15] = [
        Unit::Millennium,
        Unit::Century,
        Unit::Decade,
        Unit::Year,
        Unit::WeekBasedYear,
        Unit::Quarter,
        Unit::Month,
        Unit::Week,
        Unit::Day,
        Unit::Hour,
        Unit::Minute,
        Unit::Second,
        Unit::Millisecond,
        Unit::Microsecond,
        Unit::Nanosecond,
    ];

    /// Returns the estimated average length of this unit in seconds.
    ///
    /// A year is assumed to be `365.2425` days (the mean length of a
    /// Gregorian year) and a month is a twelfth of a year.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::unit::Unit;
    ///
    /// assert_eq!(Unit::Day.length(), 86_400.0);
    /// assert_eq!(Unit::Year.length(), 31_556_952.0);
    /// assert_eq!(Unit::Month.length(), 2_629_746.0);
    /// assert_eq!(Unit::Millisecond.length(), 0.001);
    /// ```
    pub fn length(self) -> f64 {
        match self {
            Unit::Millisecond => 1e-3,
            Unit::Microsecond => 1e-6,
            Unit::Nanosecond => 1e-9,
            // Every other unit is an integral number of seconds.
            unit => (unit.nanoseconds() / 1_000_000_000) as f64,
        }
    }

    /// Returns the estimated average length of this unit in nanoseconds.
    ///
    /// Unlike [`Unit::length`], this is exact.
    pub(crate) const fn nanoseconds(self) -> i128 {
        const SECOND: i128 = 1_000_000_000;
        const DAY: i128 = 86_400 * SECOND;
        // 365.2425 days
        const YEAR: i128 = 31_556_952 * SECOND;
        match self {
            Unit::Millennium => 1_000 * YEAR,
            Unit::Century => 100 * YEAR,
            Unit::Decade => 10 * YEAR,
            Unit::Year | Unit::WeekBasedYear => YEAR,
            Unit::Quarter => YEAR / 4,
            Unit::Month => YEAR / 12,
            Unit::Week => 7 * DAY,
            Unit::Day => DAY,
            Unit::Hour => 3_600 * SECOND,
            Unit::Minute => 60 * SECOND,
            Unit::Second => SECOND,
            Unit::Millisecond => 1_000_000,
            Unit::Microsecond => 1_000,
            Unit::Nanosecond => 1,
        }
    }

    /// Returns true if this is a calendar unit (days or longer) and false
    /// if it is a clock unit (hours or shorter).
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::unit::Unit;
    ///
    /// assert!(Unit::Day.is_calendrical());
    /// assert!(Unit::WeekBasedYear.is_calendrical());
    /// assert!(!Unit::Hour.is_calendrical());
    /// ```
    pub fn is_calendrical(self) -> bool {
        self >= Unit::Day
    }

    /// Returns the symbol used for this unit in ISO 8601 periods.
    ///
    /// Sub-second units have no ISO 8601 symbol and are represented by the
    /// number of decimal digits they correspond to (`3`, `6` and `9`).
    ///
    /// Note that years and week-based years share the symbol `Y`, and months
    /// and minutes share the symbol `M`. Which one is meant is determined by
    /// the context in which the symbol occurs.
    pub fn symbol(self) -> char {
        match self {
            Unit::Millennium => 'I',
            Unit::Century => 'C',
            Unit::Decade => 'E',
            Unit::Year | Unit::WeekBasedYear => 'Y',
            Unit::Quarter => 'Q',
            Unit::Month => 'M',
            Unit::Week => 'W',
            Unit::Day => 'D',
            Unit::Hour => 'H',
            Unit::Minute => 'M',
            Unit::Second => 'S',
            Unit::Millisecond => '3',
            Unit::Microsecond => '6',
            Unit::Nanosecond => '9',
        }
    }

    /// Returns an upper case identifier for this unit.
    ///
    /// This is used in place of a symbol when a symbol would be ambiguous.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::unit::Unit;
    ///
    /// assert_eq!(Unit::WeekBasedYear.name(), "WEEK_BASED_YEARS");
    /// assert_eq!(Unit::Quarter.name(), "QUARTERS");
    /// ```
    pub fn name(self) -> &'static str {
        match self {
            Unit::Millennium => "MILLENNIA",
            Unit::Century => "CENTURIES",
            Unit::Decade => "DECADES",
            Unit::Year => "YEARS",
            Unit::WeekBasedYear => "WEEK_BASED_YEARS",
            Unit::Quarter => "QUARTERS",
            Unit::Month => "MONTHS",
            Unit::Week => "WEEKS",
            Unit::Day => "DAYS",
            Unit::Hour => "HOURS",
            Unit::Minute => "MINUTES",
            Unit::Second => "SECONDS",
            Unit::Millisecond => "MILLIS",
            Unit::Microsecond => "MICROS",
            Unit::Nanosecond => "NANOS",
        }
    }

    /// A human readable singular description of this unit of time.
    pub(crate) fn singular(&self) -> &'static str {
        match *self {
            Unit::Millennium => "millennium",
            Unit::Century => "century",
            Unit::Decade => "decade",
            Unit::Year => "year",
            Unit::WeekBasedYear => "week-based year",
            Unit::Quarter => "quarter",
            Unit::Month => "month",
            Unit::Week => "week",
            Unit::Day => "day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
            Unit::Millisecond => "millisecond",
            Unit::Microsecond => "microsecond",
            Unit::Nanosecond => "nanosecond",
        }
    }

    /// A human readable plural description of this unit of time.
    pub(crate) fn plural(&self) -> &'static str {
        match *self {
            Unit::Millennium => "millennia",
            Unit::Century => "centuries",
            Unit::Decade => "decades",
            Unit::Year => "years",
            Unit::WeekBasedYear => "week-based years",
            Unit::Quarter => "quarters",
            Unit::Month => "months",
            Unit::Week => "weeks",
            Unit::Day => "days",
            Unit::Hour => "hours",
            Unit::Minute => "minutes",
            Unit::Second => "seconds",
            Unit::Millisecond => "milliseconds",
            Unit::Microsecond => "microseconds",
            Unit::Nanosecond => "nanoseconds",
        }
    }

    /// Folds milliseconds and microseconds into nanoseconds.
    ///
    /// Every other unit is returned unchanged. This returns an error when
    /// the converted amount overflows.
    pub(crate) fn fold(
        self,
        amount: i64,
    ) -> Result<(i64, Unit), Error> {
        let factor = match self {
            Unit::Millisecond => 1_000_000,
            Unit::Microsecond => 1_000,
            unit => return Ok((amount, unit)),
        };
        let nanos = amount
            .checked_mul(factor)
            .ok_or_else(|| Error::overflow(Unit::Nanosecond.plural()))?;
        Ok((nanos, Unit::Nanosecond))
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.plural())
    }
}

/// A family of units that a [`Duration`](crate::Duration) may contain.
///
/// This trait is sealed. The families are:
///
/// * [`Full`] admits every unit. This is the default.
/// * [`Calendar`] admits date units except week-based years: millennia,
/// centuries, decades, years, quarters, months, weeks and days.
/// * [`Clock`] admits hours, minutes, seconds and sub-second units.
/// * [`WeekBased`] admits week-based years, weeks and days.
///
/// A duration restricted to a family rejects any other unit at construction
/// time, and parsing text into such a duration uses the matching dialect of
/// the ISO 8601 period grammar.
///
/// # Example
///
/// ```
/// use tenor::{Duration, unit::{Clock, Unit}};
///
/// assert!(Duration::<Clock>::of(3, Unit::Hour).is_ok());
/// let err = Duration::<Clock>::of(3, Unit::Day).unwrap_err();
/// assert!(err.is_invalid_argument());
/// ```
pub trait Family:
    sealed::Sealed
    + Clone
    + Copy
    + core::fmt::Debug
    + Default
    + Eq
    + core::hash::Hash
    + Send
    + Sync
    + 'static
{
    /// A short human readable name of this family.
    const NAME: &'static str;

    /// Returns true when durations of this family may contain the given
    /// unit.
    fn admits(unit: Unit) -> bool;
}

/// The family of all units.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Full;

/// The family of calendar units, excluding week-based years.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Calendar;

/// The family of clock units.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Clock;

/// The family of units used with ISO week dates: week-based years, weeks and
/// days.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct WeekBased;

impl Family for Full {
    const NAME: &'static str = "all";

    fn admits(_: Unit) -> bool {
        true
    }
}

impl Family for Calendar {
    const NAME: &'static str = "calendar";

    fn admits(unit: Unit) -> bool {
        unit.is_calendrical() && unit != Unit::WeekBasedYear
    }
}

impl Family for Clock {
    const NAME: &'static str = "clock";

    fn admits(unit: Unit) -> bool {
        !unit.is_calendrical()
    }
}

impl Family for WeekBased {
    const NAME: &'static str = "week-based";

    fn admits(unit: Unit) -> bool {
        matches!(unit, Unit::WeekBasedYear | Unit::Week | Unit::Day)
    }
}

impl sealed::Sealed for Full {
    const KIND: sealed::Kind = sealed::Kind::Full;
}

impl sealed::Sealed for Calendar {
    const KIND: sealed::Kind = sealed::Kind::Calendar;
}

impl sealed::Sealed for Clock {
    const KIND: sealed::Kind = sealed::Kind::Clock;
}

impl sealed::Sealed for WeekBased {
    const KIND: sealed::Kind = sealed::Kind::WeekBased;
}

/// Returns an error if the family `F` does not admit the given unit.
pub(crate) fn check<F: Family>(unit: Unit) -> Result<(), Error> {
    if F::admits(unit) {
        return Ok(());
    }
    Err(Error::from(E::NotInFamily { unit, family: F::NAME }))
}

pub(crate) mod sealed {
    pub trait Sealed {
        const KIND: Kind;
    }

    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum Kind {
        Full,
        Calendar,
        Clock,
        WeekBased,
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Unit {
    fn arbitrary(g: &mut quickcheck::Gen) -> Unit {
        *g.choose(&Unit::ALL).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn order_follows_length() {
        for pair in Unit::ALL.windows(2) {
            let (longer, shorter) = (pair[0], pair[1]);
            assert!(longer > shorter, "{longer:?} > {shorter:?}");
            assert!(
                longer.nanoseconds() >= shorter.nanoseconds(),
                "{longer:?} is at least as long as {shorter:?}",
            );
        }
        assert_eq!(Unit::Year.nanoseconds(), Unit::WeekBasedYear.nanoseconds());
        assert_ne!(Unit::Year, Unit::WeekBasedYear);
    }

    #[test]
    fn lengths_are_consistent() {
        assert_eq!(Unit::Year.nanoseconds(), 12 * Unit::Month.nanoseconds());
        assert_eq!(Unit::Quarter.nanoseconds(), 3 * Unit::Month.nanoseconds());
        assert_eq!(Unit::Decade.nanoseconds(), 10 * Unit::Year.nanoseconds());
        assert_eq!(Unit::Week.nanoseconds(), 7 * Unit::Day.nanoseconds());
        assert_eq!(Unit::Quarter.length(), 7_889_238.0);
        assert_eq!(Unit::Millennium.length(), 31_556_952_000.0);
    }

    #[test]
    fn families() {
        let admitted = |admits: fn(Unit) -> bool| {
            Unit::ALL
                .iter()
                .filter(|&&u| admits(u))
                .map(|u| u.symbol())
                .collect::<alloc::string::String>()
        };
        assert_eq!(admitted(Full::admits), "ICEYYQMWDHMS369");
        assert_eq!(admitted(Calendar::admits), "ICEYQMWD");
        assert_eq!(admitted(Clock::admits), "HMS369");
        assert_eq!(admitted(WeekBased::admits), "YWD");
    }

    #[test]
    fn family_error() {
        let err = check::<WeekBased>(Unit::Month).unwrap_err();
        assert!(err.is_invalid_argument());
        insta::assert_snapshot!(
            err.to_string(),
            @"unit 'month' is not allowed in a duration restricted to week-based units",
        );
    }

    #[test]
    fn fold() {
        assert_eq!(
            Unit::Millisecond.fold(3).unwrap(),
            (3_000_000, Unit::Nanosecond)
        );
        assert_eq!(Unit::Microsecond.fold(-3).unwrap(), (-3_000, Unit::Nanosecond));
        assert_eq!(Unit::Hour.fold(3).unwrap(), (3, Unit::Hour));
        assert!(Unit::Millisecond.fold(i64::MAX).unwrap_err().is_overflow());
        assert_eq!(Unit::Millisecond.to_string(), "milliseconds");
    }
}
