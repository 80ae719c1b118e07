use alloc::{vec, vec::Vec};

use crate::{
    duration::{Duration, Item},
    error::duration::Error as E,
    round::Normalizer,
    unit::{self, Family, Unit},
    Error,
};

/// The number of slots in an array indexed by unit.
const UNITS: usize = Unit::ALL.len();

/// Arithmetic.
impl<F: Family> Duration<F> {
    /// Adds the given signed amount of a unit to this duration.
    ///
    /// When this duration already has an item for the unit, the amount is
    /// added to it. An item whose amount becomes zero is removed. When the
    /// duration has no item for the unit and the amount has the same sign as
    /// the duration, a new item is inserted.
    ///
    /// When the result cannot be expressed by changing one item while keeping
    /// the sign of this duration, this falls back to the general merge
    /// performed by [`Duration::plus_duration`]. As a special case, a
    /// duration with exactly one item may freely change its sign.
    ///
    /// # Errors
    ///
    /// This returns an error when the unit is not admitted by the family of
    /// this duration, when the merge fails because of irreconcilable signs
    /// or when an amount overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{Duration, unit::Unit};
    ///
    /// let d: Duration = Duration::of(1, Unit::Month)?;
    /// assert_eq!(d.plus(-6, Unit::Month)?.to_string(), "-P5M");
    ///
    /// let d: Duration = "P1DT1H".parse()?;
    /// assert_eq!(d.plus(2, Unit::Minute)?.to_string(), "P1DT1H2M");
    /// assert_eq!(d.plus(-1, Unit::Hour)?.to_string(), "P1D");
    /// // The sign would not match, so this is a general merge.
    /// assert_eq!(d.plus(-2, Unit::Hour)?.to_string(), "PT23H");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn plus(&self, amount: i64, unit: Unit) -> Result<Duration<F>, Error> {
        unit::check::<F>(unit)?;
        let (amount, unit) = unit.fold(amount)?;
        if amount == 0 {
            return Ok(self.clone());
        }
        if self.is_empty() {
            return Duration::of(amount, unit);
        }
        let overflow = || Error::overflow(unit.plural());
        let negative = amount < 0;
        match self.items.binary_search_by(|item| unit.cmp(&item.unit)) {
            Err(index) => {
                if negative != self.negative {
                    return self.escalate(amount, unit);
                }
                let magnitude = amount.checked_abs().ok_or_else(overflow)?;
                let mut items = self.items.clone();
                items.insert(index, Item { amount: magnitude, unit });
                Ok(Duration::new_unchecked(items, self.negative))
            }
            Ok(index) => {
                let sum = self
                    .signed(&self.items[index])
                    .checked_add(amount)
                    .ok_or_else(overflow)?;
                let mut items = self.items.clone();
                if sum == 0 {
                    items.remove(index);
                    return Ok(Duration::new_unchecked(items, self.negative));
                }
                let magnitude = sum.checked_abs().ok_or_else(overflow)?;
                if items.len() == 1 {
                    items[0].amount = magnitude;
                    return Ok(Duration::new_unchecked(items, sum < 0));
                }
                if (sum < 0) != self.negative {
                    return self.escalate(amount, unit);
                }
                items[index].amount = magnitude;
                Ok(Duration::new_unchecked(items, self.negative))
            }
        }
    }

    /// Subtracts the given signed amount of a unit from this duration.
    ///
    /// This is like [`Duration::plus`] with a negated amount.
    pub fn minus(&self, amount: i64, unit: Unit) -> Result<Duration<F>, Error> {
        let amount =
            amount.checked_neg().ok_or_else(|| Error::overflow(unit.plural()))?;
        self.plus(amount, unit)
    }

    /// Adds the given duration to this one.
    ///
    /// When the amounts of both durations, added unit by unit, all have the
    /// same sign, the result has those amounts and that sign. Otherwise,
    /// both durations are reduced to a number of months (from millennia,
    /// centuries, decades, years, quarters and months) and a length of time
    /// (from weeks, days, hours, minutes, seconds and nanoseconds). When those
    /// two buckets have the same sign, the result is rebuilt from them as
    /// years, months, days, hours, minutes, seconds and nanoseconds.
    /// Otherwise, the durations cannot be merged into one duration.
    ///
    /// Week-based years cannot be converted to months, so a duration with
    /// week-based years can only be merged with a duration of the same sign.
    ///
    /// # Errors
    ///
    /// This returns an error when the signs cannot be reconciled (see
    /// [`Error::is_mixed_sign`]), or when an amount overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::Duration;
    ///
    /// let d1: Duration = "P1Y2M".parse()?;
    /// let d2: Duration = "P3MT4H".parse()?;
    /// assert_eq!(d1.plus_duration(&d2)?.to_string(), "P1Y5MT4H");
    ///
    /// let d2: Duration = "-P3M".parse()?;
    /// assert_eq!(d1.plus_duration(&d2)?.to_string(), "P11M");
    ///
    /// // A month has no fixed number of days.
    /// let d2: Duration = "-P3D".parse()?;
    /// assert!(d1.plus_duration(&d2).unwrap_err().is_mixed_sign());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn plus_duration(
        &self,
        other: &Duration<F>,
    ) -> Result<Duration<F>, Error> {
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.is_empty() {
            return Ok(other.clone());
        }
        let mut sums = [0i128; UNITS];
        for d in [self, other] {
            for item in d.items.iter() {
                sums[item.unit as usize] += i128::from(d.signed(item));
            }
        }
        let positive = sums.iter().any(|&sum| sum > 0);
        let negative = sums.iter().any(|&sum| sum < 0);
        if !(positive && negative) {
            return Duration::from_magnitudes(&sums.map(i128::abs), negative);
        }
        trace!(
            "amounts of {self} and {other} have mixed signs, \
             merging through months and length of time",
        );
        Duration::merge_mixed(&sums)
    }

    /// Subtracts the given duration from this one.
    ///
    /// This is like [`Duration::plus_duration`] with the inverse of `other`.
    pub fn minus_duration(
        &self,
        other: &Duration<F>,
    ) -> Result<Duration<F>, Error> {
        self.plus_duration(&other.inverse())
    }

    /// Returns a duration where the signed amount of the given unit is
    /// replaced with the given amount.
    ///
    /// The other items are not changed, unless the new amount has a sign
    /// that differs from this duration's sign. In that case, the result is
    /// computed like [`Duration::plus`] with the difference between the new
    /// and the old amount.
    ///
    /// Since milliseconds and microseconds are stored as nanoseconds, setting
    /// either of them replaces the entire nanosecond item.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::{Duration, unit::Unit};
    ///
    /// let d: Duration = "P1Y2M".parse()?;
    /// assert_eq!(d.with_amount(5, Unit::Month)?.to_string(), "P1Y5M");
    /// assert_eq!(d.with_amount(0, Unit::Year)?.to_string(), "P2M");
    /// assert_eq!(d.with_amount(3, Unit::Day)?.to_string(), "P1Y2M3D");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_amount(
        &self,
        amount: i64,
        unit: Unit,
    ) -> Result<Duration<F>, Error> {
        unit::check::<F>(unit)?;
        let (amount, unit) = unit.fold(amount)?;
        let current = self.position(unit).map_or(0, |i| self.signed(&self.items[i]));
        let delta = amount
            .checked_sub(current)
            .ok_or_else(|| Error::overflow(unit.plural()))?;
        self.plus(delta, unit)
    }

    /// Merges the given duration into this one if possible.
    ///
    /// This attempts the same merge as [`Duration::plus_duration`]. When it
    /// succeeds, the single merged duration is returned. When the signs
    /// cannot be reconciled, both durations are returned unchanged, in
    /// order. They are then meant to be applied to a time point one after
    /// the other (see [`Duration::add_to`]).
    ///
    /// # Errors
    ///
    /// This only returns an error when an amount overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::Duration;
    ///
    /// let d1: Duration = "P1M".parse()?;
    /// let d2: Duration = "P2D".parse()?;
    /// assert_eq!(d1.union(&d2)?, vec!["P1M2D".parse()?]);
    ///
    /// let d2: Duration = "-P2D".parse()?;
    /// assert_eq!(d1.union(&d2)?, vec![d1.clone(), d2.clone()]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn union(&self, other: &Duration<F>) -> Result<Vec<Duration<F>>, Error> {
        match self.plus_duration(other) {
            Ok(merged) => Ok(vec![merged]),
            Err(err) if err.is_mixed_sign() => {
                Ok(vec![self.clone(), other.clone()])
            }
            Err(err) => Err(err),
        }
    }

    /// Multiplies every amount of this duration by the absolute value of
    /// the given factor, and inverts the duration if the factor is
    /// negative.
    ///
    /// A factor of zero yields the empty duration.
    ///
    /// # Errors
    ///
    /// This returns an error when an amount overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::Duration;
    ///
    /// let d: Duration = "P1Y2DT3H".parse()?;
    /// assert_eq!(d.multiplied_by(3)?.to_string(), "P3Y6DT9H");
    /// assert_eq!(d.multiplied_by(-2)?.to_string(), "-P2Y4DT6H");
    /// assert!(d.multiplied_by(0)?.is_empty());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn multiplied_by(&self, factor: i64) -> Result<Duration<F>, Error> {
        if factor == 0 {
            return Ok(Duration::of_zero());
        }
        if factor == 1 || self.is_empty() {
            return Ok(self.clone());
        }
        let magnitude = factor
            .checked_abs()
            .ok_or_else(|| Error::overflow("multiplication factor"))?;
        let items = self
            .items
            .iter()
            .map(|item| {
                let amount = item
                    .amount
                    .checked_mul(magnitude)
                    .ok_or_else(|| Error::overflow(item.unit.plural()))?;
                Ok(Item { amount, ..*item })
            })
            .collect::<Result<Vec<Item>, Error>>()?;
        Ok(Duration::new_unchecked(items, self.negative != (factor < 0)))
    }

    /// Returns this duration with its sign inverted.
    ///
    /// The empty duration is its own inverse.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::Duration;
    ///
    /// let d: Duration = "P1DT12H".parse()?;
    /// assert_eq!(d.inverse().to_string(), "-P1DT12H");
    /// assert_eq!(d.inverse().inverse(), d);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn inverse(&self) -> Duration<F> {
        Duration::new_unchecked(self.items.clone(), !self.negative)
    }

    /// Returns the absolute value of this duration.
    ///
    /// # Example
    ///
    /// ```
    /// use tenor::Duration;
    ///
    /// let d: Duration = "-P2W".parse()?;
    /// assert_eq!(d.abs().to_string(), "P2W");
    /// assert_eq!(d.abs().abs(), d.abs());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn abs(&self) -> Duration<F> {
        if self.negative {
            self.inverse()
        } else {
            self.clone()
        }
    }

    /// Normalizes this duration with the given normalizer.
    ///
    /// See the [`round`](crate::round) module for the available
    /// normalizers.
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
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with<N: Normalizer<F>>(
        &self,
        normalizer: N,
    ) -> Result<Duration<F>, Error> {
        normalizer.normalize(self)
    }

    /// Adds the given amount to this duration with a general merge.
    fn escalate(&self, amount: i64, unit: Unit) -> Result<Duration<F>, Error> {
        trace!(
            "adding {amount} {unit} to {self} changes its sign, \
             falling back to a general merge",
        );
        self.plus_duration(&Duration::of(amount, unit)?)
    }

    /// Merges signed amounts (indexed by unit) that have mixed signs.
    ///
    /// Calendar amounts are reduced to months and the remaining amounts to
    /// a length of time. Those two must not have opposite signs.
    fn merge_mixed(sums: &[i128; UNITS]) -> Result<Duration<F>, Error> {
        let get = |unit: Unit| sums[unit as usize];
        if get(Unit::WeekBasedYear) != 0 {
            return Err(Error::from(E::MixedSign));
        }
        let months = get(Unit::Millennium) * 12_000
            + get(Unit::Century) * 1_200
            + get(Unit::Decade) * 120
            + get(Unit::Year) * 12
            + get(Unit::Quarter) * 3
            + get(Unit::Month);
        // The time bucket is counted in the coarsest granularity that
        // represents every non-zero amount exactly.
        let granularity = if get(Unit::Nanosecond) != 0 {
            Unit::Nanosecond
        } else if get(Unit::Hour) != 0
            || get(Unit::Minute) != 0
            || get(Unit::Second) != 0
        {
            Unit::Second
        } else {
            Unit::Day
        };
        let per = granularity.nanoseconds();
        let time = [
            Unit::Week,
            Unit::Day,
            Unit::Hour,
            Unit::Minute,
            Unit::Second,
            Unit::Nanosecond,
        ]
        .into_iter()
        .map(|unit| get(unit) * (unit.nanoseconds() / per))
        .sum::<i128>();
        if months.signum() * time.signum() < 0 {
            debug!(
                "cannot merge {months} months with {time} {granularity} \
                 because their signs differ",
            );
            return Err(Error::from(E::MixedSign));
        }

        let negative = months < 0 || time < 0;
        let (months, mut nanos) = (months.abs(), time.abs() * per);
        let mut magnitudes = [0i128; UNITS];
        magnitudes[Unit::Year as usize] = months / 12;
        magnitudes[Unit::Month as usize] = months % 12;
        for unit in [Unit::Day, Unit::Hour, Unit::Minute, Unit::Second] {
            if !F::admits(unit) {
                continue;
            }
            let len = unit.nanoseconds();
            magnitudes[unit as usize] = nanos / len;
            nanos %= len;
        }
        magnitudes[Unit::Nanosecond as usize] = nanos;
        Duration::from_magnitudes(&magnitudes, negative)
    }
}
