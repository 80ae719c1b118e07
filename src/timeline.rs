/*!
Durations applied to a time line.

A duration like `P1M` has no exact length by itself. This module connects
durations to time points provided by another crate (a date type, a
timestamp type and so on) through the [`TimePoint`] trait. With a time
point, durations can be:

* added to or subtracted from it, with [`Duration::add_to`] and
[`Duration::subtract_from`],
* ordered by their length, with a [`LengthComparator`] anchored at it,
* computed as the difference between two of them, with a [`Metric`].

This crate doesn't provide any time point itself.
*/

use core::{cmp::Ordering, marker::PhantomData};

use alloc::vec::Vec;

use crate::{
    duration::Duration,
    error::{timeline::Error as E, ErrorContext},
    unit::{self, Family, Full, Unit},
    Error,
};

/// A point on a time line that durations can be applied to.
///
/// The units given to the methods of this trait are never milliseconds or
/// microseconds. Durations and metrics always express those as nanoseconds.
///
/// Implementations decide how variable length units behave. For example, a
/// date type might clamp the day of the month when adding months to the 31st
/// of January.
pub trait TimePoint: Clone + Ord {
    /// Returns this time point moved by the given signed amount of a unit.
    ///
    /// # Errors
    ///
    /// Implementations should return an error when the result is out of
    /// range or when the unit isn't supported.
    fn plus(&self, amount: i64, unit: Unit) -> Result<Self, Error>;

    /// Returns the number of whole units from this time point until `end`.
    ///
    /// This is only called with `end` greater than or equal to `self`, and
    /// it must then return the largest non-negative amount such that
    /// `self.plus(amount, unit)` is not after `end`.
    ///
    /// # Errors
    ///
    /// Implementations should return an error when the amount doesn't fit
    /// in an `i64` or when the unit isn't supported.
    fn until(&self, end: &Self, unit: Unit) -> Result<i64, Error>;
}

/// Applying durations to time points.
impl<F: Family> Duration<F> {
    /// Adds this duration to the given time point.
    ///
    /// The items of this duration are added one at a time, from the longest
    /// unit to the shortest, each with the sign of this duration.
    ///
    /// # Errors
    ///
    /// This returns any error reported by the time point.
    pub fn add_to<T: TimePoint>(&self, point: &T) -> Result<T, Error> {
        let mut point = point.clone();
        for item in self.items() {
            let amount = if self.is_negative() {
                -item.amount()
            } else {
                item.amount()
            };
            point = point.plus(amount, item.unit())?;
        }
        Ok(point)
    }

    /// Subtracts this duration from the given time point.
    ///
    /// This is the same as adding the inverse of this duration.
    ///
    /// # Errors
    ///
    /// This returns any error reported by the time point.
    pub fn subtract_from<T: TimePoint>(&self, point: &T) -> Result<T, Error> {
        self.inverse().add_to(point)
    }
}

/// Orders durations by their length when added to an anchor time point.
///
/// A negative duration is always shorter than a duration that isn't
/// negative, and two empty durations are equal. Otherwise, both durations
/// are added to the anchor and the results are compared.
///
/// Since the length of units like months depends on the anchor, the same two
/// durations may compare differently for different anchors.
#[derive(Clone, Debug)]
pub struct LengthComparator<T> {
    anchor: T,
}

impl<T: TimePoint> LengthComparator<T> {
    /// Creates a comparator anchored at the given time point.
    pub fn new(anchor: T) -> LengthComparator<T> {
        LengthComparator { anchor }
    }

    /// Returns the anchor of this comparator.
    pub fn anchor(&self) -> &T {
        &self.anchor
    }

    /// Compares the lengths of two durations.
    ///
    /// # Errors
    ///
    /// This returns any error reported by the anchor while adding either
    /// duration to it.
    pub fn compare<F: Family>(
        &self,
        d1: &Duration<F>,
        d2: &Duration<F>,
    ) -> Result<Ordering, Error> {
        match (d1.is_negative(), d2.is_negative()) {
            (true, false) => return Ok(Ordering::Less),
            (false, true) => return Ok(Ordering::Greater),
            _ => {}
        }
        if d1.is_empty() && d2.is_empty() {
            return Ok(Ordering::Equal);
        }
        let p1 = d1.add_to(&self.anchor)?;
        let p2 = d2.add_to(&self.anchor)?;
        Ok(p1.cmp(&p2))
    }
}

/// Computes durations between two time points in a fixed set of units.
///
/// A metric splits the distance between two time points greedily: it takes
/// as many of its longest unit as fit, then as many of the next unit, and so
/// on. Units that end up with a zero amount are left out of the result.
///
/// Milliseconds and microseconds are computed as nanoseconds, and the
/// nanosecond amount is truncated to the finest of those units given to
/// [`Metric::new`].
///
/// # Example
///
/// This uses a time point that counts seconds on a line without any
/// irregularities, where every unit has its average length.
///
/// ```
/// use tenor::{timeline::{Metric, TimePoint}, unit::Unit, Duration, Error};
///
/// #[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
/// struct Second(i64);
///
/// impl TimePoint for Second {
///     fn plus(&self, amount: i64, unit: Unit) -> Result<Second, Error> {
///         Ok(Second(self.0 + amount * unit.length() as i64))
///     }
///
///     fn until(&self, end: &Second, unit: Unit) -> Result<i64, Error> {
///         Ok((end.0 - self.0) / unit.length() as i64)
///     }
/// }
///
/// let metric: Metric = Metric::new(&[Unit::Hour, Unit::Minute])?;
/// let d = metric.between(&Second(10_000), &Second(0))?;
/// assert_eq!(d.to_string(), "-PT2H46M");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Metric<F = Full> {
    units: Vec<Unit>,
    precision: Unit,
    family: PhantomData<F>,
}

impl<F: Family> Metric<F> {
    /// Creates a metric over the given units.
    ///
    /// The units may be given in any order.
    ///
    /// # Errors
    ///
    /// This returns an error when no unit is given, when a unit is not
    /// admitted by the family `F`, or when a unit occurs twice. Since
    /// milliseconds and microseconds are computed as nanoseconds, at most one
    /// of those three units may be given.
    pub fn new(units: &[Unit]) -> Result<Metric<F>, Error> {
        if units.is_empty() {
            return Err(Error::from(E::EmptyMetric));
        }
        let mut folded = Vec::with_capacity(units.len());
        let mut precision = Unit::Nanosecond;
        for &unit in units {
            unit::check::<F>(unit)?;
            let folded_unit = match unit {
                Unit::Millisecond | Unit::Microsecond => {
                    precision = unit;
                    Unit::Nanosecond
                }
                unit => unit,
            };
            if folded.contains(&folded_unit) {
                return Err(Error::from(E::DuplicateUnit { unit }));
            }
            folded.push(folded_unit);
        }
        folded.sort_unstable_by(|u1, u2| u2.cmp(u1));
        Ok(Metric { units: folded, precision, family: PhantomData })
    }

    /// Returns the units of this metric, from the longest to the shortest.
    ///
    /// Milliseconds and microseconds are reported as nanoseconds.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Returns the duration from `start` to `end`.
    ///
    /// The result is negative when `end` is before `start`. In that case,
    /// the distance is computed from `end` to `start` and then negated.
    ///
    /// # Errors
    ///
    /// This returns an error when the time point fails to compute or apply
    /// an amount, or when it reports a negative amount.
    pub fn between<T: TimePoint>(
        &self,
        start: &T,
        end: &T,
    ) -> Result<Duration<F>, Error> {
        let (negative, mut current, end) = match start.cmp(end) {
            Ordering::Equal => return Ok(Duration::of_zero()),
            Ordering::Less => (false, start.clone(), end),
            Ordering::Greater => (true, end.clone(), start),
        };
        let mut amounts = Vec::with_capacity(self.units.len());
        for &unit in self.units.iter() {
            let amount = current
                .until(end, unit)
                .with_context(|| E::MetricFailed { unit })?;
            if amount < 0 {
                return Err(Error::from(E::MetricFailed { unit }));
            }
            if amount == 0 {
                continue;
            }
            current = current
                .plus(amount, unit)
                .with_context(|| E::MetricFailed { unit })?;
            amounts.push((unit, amount));
        }
        let truncate = match self.precision {
            Unit::Millisecond => 1_000_000,
            Unit::Microsecond => 1_000,
            _ => 1,
        };
        for (unit, amount) in amounts.iter_mut() {
            if *unit == Unit::Nanosecond {
                *amount -= *amount % truncate;
            }
        }
        trace!(
            "metric over {units:?} computed {amounts:?} \
             (negative: {negative})",
            units = self.units,
        );
        Duration::from_units(&amounts, negative)
    }
}
