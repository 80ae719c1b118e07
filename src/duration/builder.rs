use alloc::vec::Vec;

use crate::{
    duration::Duration, error::duration::Error as E, unit::Unit, Error,
};

/// A builder for assembling a [`Duration`] one unit at a time.
///
/// A builder is created with [`Duration::of_positive`] or
/// [`Duration::of_negative`]. The sign chosen there applies to every unit,
/// so all amounts given to a builder must be non-negative. Every unit may be
/// set at most once.
///
/// Milliseconds, microseconds and nanoseconds may each be set once. They
/// are added together as nanoseconds when the duration is built.
///
/// Every setter comes in two versions: one that panics on invalid input,
/// like [`Builder::years`], and one that returns an error, like
/// [`Builder::try_years`].
///
/// # Example
///
/// ```
/// use tenor::Duration;
///
/// let d = Duration::of_negative()
///     .years(1)
///     .days(2)
///     .millis(3)
///     .nanos(4)
///     .build()?;
/// assert_eq!(d.to_string(), "-P1Y2DT0,003000004S");
///
/// // Setting a unit twice is an error.
/// let err = Duration::of_positive().days(1).try_days(2).unwrap_err();
/// assert!(err.is_invalid_argument());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
    negative: bool,
    amounts: [Option<i64>; Unit::ALL.len()],
}

macro_rules! setters {
    ($($name:ident, $try_name:ident, $unit:expr, $label:literal;)*) => {
        $(
            #[doc = concat!("Sets the amount of ", $label, ".")]
            ///
            /// # Panics
            ///
            /// This panics when the amount is negative or when this unit was
            /// already set.
            #[doc = concat!("The fallible version is [`Builder::", stringify!($try_name), "`].")]
            #[inline]
            pub fn $name<I: Into<i64>>(self, amount: I) -> Builder {
                self.$try_name(amount).expect(concat!(
                    "value for ", $label, " is valid and set only once",
                ))
            }

            #[doc = concat!("Sets the amount of ", $label, ".")]
            ///
            /// # Errors
            ///
            /// This returns an error when the amount is negative or when
            /// this unit was already set.
            #[inline]
            pub fn $try_name<I: Into<i64>>(
                self,
                amount: I,
            ) -> Result<Builder, Error> {
                self.set($unit, amount.into())
            }
        )*
    };
}

impl Builder {
    pub(crate) fn new(negative: bool) -> Builder {
        Builder { negative, amounts: [None; Unit::ALL.len()] }
    }

    setters! {
        years, try_years, Unit::Year, "years";
        months, try_months, Unit::Month, "months";
        weeks, try_weeks, Unit::Week, "weeks";
        days, try_days, Unit::Day, "days";
        hours, try_hours, Unit::Hour, "hours";
        minutes, try_minutes, Unit::Minute, "minutes";
        seconds, try_seconds, Unit::Second, "seconds";
        millis, try_millis, Unit::Millisecond, "milliseconds";
        micros, try_micros, Unit::Microsecond, "microseconds";
        nanos, try_nanos, Unit::Nanosecond, "nanoseconds";
    }

    /// Builds the duration.
    ///
    /// Units whose amount is zero are left out. When every amount is zero,
    /// the empty duration is returned regardless of the builder's sign.
    ///
    /// # Errors
    ///
    /// This returns an error when no unit was set at all, or when adding
    /// milliseconds, microseconds and nanoseconds together overflows.
    pub fn build(self) -> Result<Duration, Error> {
        let units = Unit::ALL
            .into_iter()
            .filter_map(|unit| Some((unit, self.amounts[unit as usize]?)))
            .collect::<Vec<(Unit, i64)>>();
        if units.is_empty() {
            return Err(Error::from(E::BuilderEmpty));
        }
        Duration::from_units(&units, self.negative)
    }

    fn set(mut self, unit: Unit, amount: i64) -> Result<Builder, Error> {
        if amount < 0 {
            return Err(Error::from(E::BuilderNegative { unit }));
        }
        let slot = &mut self.amounts[unit as usize];
        if slot.is_some() {
            return Err(Error::from(E::BuilderFieldTwice { unit }));
        }
        *slot = Some(amount);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build() {
        let d = Duration::of_positive()
            .years(2)
            .months(13)
            .weeks(1)
            .days(35)
            .hours(4)
            .minutes(132)
            .seconds(7)
            .build()
            .unwrap();
        insta::assert_snapshot!(d, @"P2Y13M1W35DT4H132M7S");

        let d = Duration::of_negative()
            .millis(1)
            .micros(1)
            .nanos(1)
            .build()
            .unwrap();
        insta::assert_snapshot!(d, @"-PT0,001001001S");

        let d = Duration::of_negative().days(0).build().unwrap();
        assert!(d.is_empty());
        assert!(!d.is_negative());
    }

    #[test]
    fn errors() {
        let err = Duration::of_positive().build().unwrap_err();
        assert!(err.is_invalid_argument());
        insta::assert_snapshot!(
            err,
            @"cannot build a duration without setting at least one unit",
        );

        let err = Duration::of_positive().days(1).try_days(1).unwrap_err();
        assert!(err.is_invalid_argument());
        insta::assert_snapshot!(
            err,
            @"the amount of days was already set on this builder (every unit may only be set once)",
        );

        let err = Duration::of_negative().try_hours(-1).unwrap_err();
        insta::assert_snapshot!(
            err,
            @"amount of hours given to a duration builder must not be negative (the builder's sign applies to every unit)",
        );

        let err = Duration::of_positive()
            .millis(i64::MAX)
            .build()
            .unwrap_err();
        assert!(err.is_overflow());
    }

    #[test]
    #[should_panic]
    fn setting_twice_panics() {
        Duration::of_positive().weeks(1).weeks(2);
    }
}
