/*!
Normalizers that rewrite a duration in terms of other units.

A [`Normalizer`] turns a duration into another duration of the same unit
family. Normalizers are applied with [`Duration::with`].

This module provides two kinds of normalizers:

* [`StdPeriod`] is exact. It only performs conversions that hold for every
calendar, like writing 12 months as a year or 60 seconds as a minute.
* [`Approximate`] is lossy. It computes the length of a duration from the
estimated average length of each unit, rounds it and expresses it in fewer
and bigger units. This is useful for showing durations to humans, when
"about 3 years and 2 months" is more helpful than every last second.

# Example

```
use tenor::{round::{Approximate, StdPeriod}, Duration};

let d: Duration = "P1Y14M3WT90M".parse()?;
assert_eq!(d.with(StdPeriod)?.to_string(), "P2Y2M21DT1H30M");
assert_eq!(d.with(Approximate::max_unit_only())?.to_string(), "P2Y");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use crate::{
    duration::Duration,
    error::duration::Error as E,
    unit::{Family, Full, Unit},
    Error,
};

const UNITS: usize = Unit::ALL.len();

/// A strategy for rewriting a duration in terms of other units.
///
/// The result has the same unit family as the input.
pub trait Normalizer<F: Family> {
    /// Returns the normalized form of the given duration.
    fn normalize(&self, duration: &Duration<F>) -> Result<Duration<F>, Error>;
}

impl<'a, F: Family, N: Normalizer<F>> Normalizer<F> for &'a N {
    fn normalize(&self, duration: &Duration<F>) -> Result<Duration<F>, Error> {
        (**self).normalize(duration)
    }
}

/// An exact normalizer for every unit family.
///
/// This normalizer:
///
/// * writes millennia, centuries and decades as years,
/// * writes quarters as months and weeks as days,
/// * carries every 12 months into a year,
/// * carries nanoseconds into seconds, seconds into minutes and minutes into
/// hours.
///
/// Hours are never carried into days, and days are never carried into
/// months, because neither conversion is exact. Week-based years are kept
/// as they are.
///
/// # Errors
///
/// This returns an error when an amount overflows.
///
/// # Example
///
/// ```
/// use tenor::{round::StdPeriod, unit::Clock, Duration};
///
/// let d: Duration<Clock> = "PT59M61,5S".parse()?;
/// assert_eq!(d.with(StdPeriod)?.to_string(), "PT1H1,500S");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StdPeriod;

impl<F: Family> Normalizer<F> for StdPeriod {
    fn normalize(&self, duration: &Duration<F>) -> Result<Duration<F>, Error> {
        let mut m = [0i128; UNITS];
        for item in duration.items() {
            m[item.unit() as usize] = i128::from(item.amount());
        }
        let take = |m: &mut [i128; UNITS], unit: Unit| {
            core::mem::take(&mut m[unit as usize])
        };

        let years = take(&mut m, Unit::Millennium) * 1_000
            + take(&mut m, Unit::Century) * 100
            + take(&mut m, Unit::Decade) * 10
            + take(&mut m, Unit::Year);
        let months = take(&mut m, Unit::Quarter) * 3 + take(&mut m, Unit::Month);
        let days = take(&mut m, Unit::Week) * 7 + take(&mut m, Unit::Day);
        m[Unit::Year as usize] = years + months / 12;
        m[Unit::Month as usize] = months % 12;
        m[Unit::Day as usize] = days;

        let nanos = take(&mut m, Unit::Nanosecond);
        let seconds = take(&mut m, Unit::Second) + nanos / 1_000_000_000;
        let minutes = take(&mut m, Unit::Minute) + seconds / 60;
        let hours = take(&mut m, Unit::Hour) + minutes / 60;
        m[Unit::Hour as usize] = hours;
        m[Unit::Minute as usize] = minutes % 60;
        m[Unit::Second as usize] = seconds % 60;
        m[Unit::Nanosecond as usize] = nanos % 1_000_000_000;

        Duration::from_magnitudes(&m, duration.is_negative())
    }
}

/// A lossy normalizer that rounds a duration and rewrites it with fewer,
/// bigger units.
///
/// The length of the duration is computed from the estimated average length
/// of each of its units (for example, a year is 365.2425 days and a month is
/// a twelfth of that). The length is then rounded, half away from zero, to a
/// multiple of a rounding unit, and split back into years, months, days,
/// hours, minutes, seconds and nanoseconds. Weeks are never produced by this
/// split.
///
/// There are two kinds of approximate normalizers:
///
/// * [`Approximate::hours`], [`Approximate::minutes`] and
/// [`Approximate::seconds`] round to a multiple of a fixed unit. The amount
/// of that unit is truncated to a multiple of the given steps, and all
/// smaller units are dropped.
/// * [`Approximate::max_unit_only`] and [`Approximate::max_unit_or_weeks`]
/// round to the longest unit of the duration, and then keep only the longest
/// unit of the result.
///
/// Approximate normalizers only apply to durations of the
/// [`Full`] family.
///
/// # Errors
///
/// This returns an error when the number of steps is not positive, or when
/// the length of the duration overflows.
///
/// # Example
///
/// ```
/// use tenor::{round::Approximate, Duration};
///
/// let d = Duration::of_positive()
///     .years(2)
///     .months(13)
///     .days(35)
///     .minutes(132)
///     .build()?;
/// assert_eq!(d.with(Approximate::hours(24))?.to_string(), "P3Y2M4D");
/// assert_eq!(d.with(Approximate::hours(1))?.to_string(), "P3Y2M4DT15H");
/// assert_eq!(d.with(Approximate::max_unit_only())?.to_string(), "P3Y");
///
/// let d: Duration = "P10D".parse()?;
/// assert_eq!(d.with(Approximate::max_unit_or_weeks())?.to_string(), "P1W");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Approximate {
    mode: Mode,
}

#[derive(Clone, Copy, Debug)]
enum Mode {
    Fixed { unit: Unit, steps: i64 },
    MaxUnitOnly,
    MaxUnitOrWeeks,
}

/// The units produced by the approximate split, longest first.
const TIERS: [Unit; 7] = [
    Unit::Year,
    Unit::Month,
    Unit::Day,
    Unit::Hour,
    Unit::Minute,
    Unit::Second,
    Unit::Nanosecond,
];

impl Approximate {
    /// Round to a multiple of `steps` hours.
    pub const fn hours(steps: i64) -> Approximate {
        Approximate { mode: Mode::Fixed { unit: Unit::Hour, steps } }
    }

    /// Round to a multiple of `steps` minutes.
    pub const fn minutes(steps: i64) -> Approximate {
        Approximate { mode: Mode::Fixed { unit: Unit::Minute, steps } }
    }

    /// Round to a multiple of `steps` seconds.
    pub const fn seconds(steps: i64) -> Approximate {
        Approximate { mode: Mode::Fixed { unit: Unit::Second, steps } }
    }

    /// Round to the longest unit of the duration, and keep only the longest
    /// unit of the result.
    pub const fn max_unit_only() -> Approximate {
        Approximate { mode: Mode::MaxUnitOnly }
    }

    /// Like [`Approximate::max_unit_only`], except that a result of 7 days
    /// or more is rounded to weeks.
    pub const fn max_unit_or_weeks() -> Approximate {
        Approximate { mode: Mode::MaxUnitOrWeeks }
    }
}

impl Normalizer<Full> for Approximate {
    fn normalize(&self, duration: &Duration) -> Result<Duration, Error> {
        let Some(longest) = duration.items().first().map(|item| item.unit())
        else {
            return Ok(Duration::of_zero());
        };
        let (target, steps) = match self.mode {
            Mode::Fixed { steps, .. } if steps <= 0 => {
                return Err(Error::from(E::NonPositiveSteps { steps }));
            }
            Mode::Fixed { unit, steps } => (unit, steps),
            Mode::MaxUnitOnly | Mode::MaxUnitOrWeeks => (longest, 1),
        };
        let overflow = || Error::overflow("nanoseconds");

        let mut total: i128 = 0;
        for item in duration.items() {
            let len = i128::from(item.amount())
                .checked_mul(item.unit().nanoseconds())
                .ok_or_else(overflow)?;
            total = total.checked_add(len).ok_or_else(overflow)?;
        }
        let step = target
            .nanoseconds()
            .checked_mul(i128::from(steps))
            .ok_or_else(overflow)?;
        // Half up: adding half a step before dividing, all doubled to stay
        // in integers.
        let doubled = total.checked_mul(2).ok_or_else(overflow)?;
        let quotient = doubled
            .checked_add(step)
            .ok_or_else(overflow)?
            .checked_div(step.checked_mul(2).ok_or_else(overflow)?)
            .ok_or_else(overflow)?;
        let rounded = quotient * step;
        trace!(
            "approximating {duration} with total length {total}ns, \
             rounded to {quotient} steps of {steps} {target}",
        );

        let mut tiers = [0i128; TIERS.len()];
        let mut rest = rounded;
        for (tier, unit) in tiers.iter_mut().zip(TIERS) {
            let len = unit.nanoseconds();
            *tier = rest / len;
            rest %= len;
        }

        let mut m = [0i128; UNITS];
        match self.mode {
            Mode::Fixed { unit, steps } => {
                let steps = i128::from(steps);
                for (tier, tier_unit) in tiers.into_iter().zip(TIERS) {
                    if tier_unit > unit {
                        m[tier_unit as usize] = tier;
                    } else if tier_unit == unit {
                        m[tier_unit as usize] = tier - tier % steps;
                    }
                }
            }
            Mode::MaxUnitOnly | Mode::MaxUnitOrWeeks => {
                let found = tiers
                    .into_iter()
                    .zip(TIERS)
                    .find(|&(tier, _)| tier != 0);
                if let Some((tier, unit)) = found {
                    m[unit as usize] = tier;
                }
                let days = m[Unit::Day as usize];
                if matches!(self.mode, Mode::MaxUnitOrWeeks) && days >= 7 {
                    m[Unit::Day as usize] = 0;
                    m[Unit::Week as usize] = (2 * days + 7) / 14;
                }
            }
        }
        Duration::from_magnitudes(&m, duration.is_negative())
    }
}
