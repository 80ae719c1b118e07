use alloc::string::String;

use crate::{
    duration::Duration,
    error::duration::Error as E,
    fmt::{
        util::{DecimalFormatter, FractionalFormatter},
        Write, WriteExt,
    },
    unit::{Family, Unit},
    Error,
};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// The output style of a [`DurationPrinter`].
///
/// The styles differ in how they treat negative durations, compound units
/// and weeks:
///
/// | style | sign | quarters, decades, centuries, millennia | weeks |
/// |---|---|---|---|
/// | `Normal` | leading `-` | kept | kept |
/// | `Iso` | error | folded into months and years | folded into days, unless weeks are the only unit |
/// | `Xml` | leading `-` | folded into months and years | always folded into days |
///
/// In every style, the empty duration is written as `PT0S`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Style {
    /// The canonical format of this crate, which can be parsed back into
    /// an equal duration.
    Normal,
    /// The period format of ISO 8601.
    Iso,
    /// The format of the `duration` data type of XML Schema. The decimal
    /// separator is always a period.
    Xml,
}

/// A printer for durations in the ISO 8601 period format.
///
/// This printer is used by the `Display` implementation of
/// [`Duration`], and by [`Duration::to_iso_string`] and
/// [`Duration::to_xml_string`].
///
/// # Example
///
/// ```
/// use tenor::{fmt::period::{DurationPrinter, Style}, Duration};
///
/// static PRINTER: DurationPrinter =
///     DurationPrinter::new().style(Style::Iso).decimal_separator(b'.');
///
/// let d: Duration = "P1QT1,5S".parse()?;
/// assert_eq!(PRINTER.duration_to_string(&d)?, "P3MT1.500S");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct DurationPrinter {
    style: Style,
    separator: u8,
}

impl DurationPrinter {
    /// Create a new printer for the normal style, using a comma as the
    /// decimal separator.
    pub const fn new() -> DurationPrinter {
        DurationPrinter { style: Style::Normal, separator: b',' }
    }

    /// Set the output style.
    pub const fn style(self, style: Style) -> DurationPrinter {
        DurationPrinter { style, ..self }
    }

    /// Set the decimal separator used before fractional seconds.
    ///
    /// This has no effect on the XML style, which always uses a period.
    ///
    /// # Panics
    ///
    /// This panics when the separator is neither `,` nor `.`.
    pub const fn decimal_separator(self, separator: u8) -> DurationPrinter {
        assert!(
            separator == b',' || separator == b'.',
            "decimal separator must be a comma or a period",
        );
        DurationPrinter { separator, ..self }
    }

    /// Format a duration into a string.
    ///
    /// # Errors
    ///
    /// This returns an error when the style is [`Style::Iso`] and the
    /// duration is negative, or when folding units overflows.
    pub fn duration_to_string<F: Family>(
        &self,
        duration: &Duration<F>,
    ) -> Result<String, Error> {
        let mut buf = String::new();
        self.print(duration, &mut buf)?;
        Ok(buf)
    }

    /// Print a duration to the given writer.
    ///
    /// # Errors
    ///
    /// This returns an error when writing to the given writer fails, when
    /// the style is [`Style::Iso`] and the duration is negative, or when
    /// folding units overflows.
    pub fn print<F: Family, W: Write>(
        &self,
        duration: &Duration<F>,
        mut wtr: W,
    ) -> Result<(), Error> {
        if self.style == Style::Iso && duration.is_negative() {
            return Err(Error::from(E::NegativeIso));
        }
        if duration.is_empty() {
            return wtr.write_str("PT0S");
        }
        let fields = Fields::new(duration, self.style)?;
        let fmtint = DecimalFormatter::new();

        if duration.is_negative() {
            wtr.write_char('-')?;
        }
        wtr.write_char('P')?;
        for &(amount, unit) in fields.date.iter() {
            if amount == 0 {
                continue;
            }
            wtr.write_int(&fmtint, amount)?;
            if unit == Unit::WeekBasedYear && !fields.week_based_only {
                wtr.write_str("{WEEK_BASED_YEARS}")?;
            } else {
                wtr.write_char(unit.symbol())?;
            }
        }
        if fields.has_time() {
            wtr.write_char('T')?;
            if fields.hours != 0 {
                wtr.write_int(&fmtint, fields.hours)?;
                wtr.write_char('H')?;
            }
            if fields.minutes != 0 {
                wtr.write_int(&fmtint, fields.minutes)?;
                wtr.write_char('M')?;
            }
            if fields.seconds != 0 || fields.nanos != 0 {
                write_seconds(&mut wtr, fields.seconds)?;
                if fields.nanos != 0 {
                    let separator = match self.style {
                        Style::Xml => '.',
                        _ => char::from(self.separator),
                    };
                    wtr.write_char(separator)?;
                    let fmtfrac = FractionalFormatter::new();
                    wtr.write_fraction(&fmtfrac, fields.nanos)?;
                }
                wtr.write_char('S')?;
            }
        }
        Ok(())
    }
}

/// The amounts of a duration, prepared for printing in one style.
#[derive(Debug)]
struct Fields {
    /// Date amounts with their units, from the longest unit to the shortest.
    /// Amounts that were folded into another unit are zero.
    date: [(i64, Unit); 9],
    /// Whether the duration only has week-based years, weeks and days. Only
    /// then may week-based years be written with the symbol `Y`.
    week_based_only: bool,
    hours: i64,
    minutes: i64,
    /// Whole seconds, including those carried from nanoseconds. The carry
    /// may take this past `i64::MAX`.
    seconds: i128,
    /// Nanoseconds less than one second.
    nanos: i64,
}

impl Fields {
    fn new<F: Family>(
        duration: &Duration<F>,
        style: Style,
    ) -> Result<Fields, Error> {
        let get = |unit| duration.get_partial_amount(unit);
        let mut date = [
            (get(Unit::Millennium), Unit::Millennium),
            (get(Unit::Century), Unit::Century),
            (get(Unit::Decade), Unit::Decade),
            (get(Unit::Year), Unit::Year),
            (get(Unit::WeekBasedYear), Unit::WeekBasedYear),
            (get(Unit::Quarter), Unit::Quarter),
            (get(Unit::Month), Unit::Month),
            (get(Unit::Week), Unit::Week),
            (get(Unit::Day), Unit::Day),
        ];
        if style != Style::Normal {
            let weeks_only =
                duration.items().len() == 1 && get(Unit::Week) != 0;
            fold(
                &mut date,
                &[Unit::Millennium, Unit::Century, Unit::Decade],
                Unit::Year,
            )?;
            fold(&mut date, &[Unit::Quarter], Unit::Month)?;
            if style == Style::Xml || !weeks_only {
                fold(&mut date, &[Unit::Week], Unit::Day)?;
            }
        }
        let week_based_only = duration.items().iter().all(|item| {
            matches!(item.unit(), Unit::WeekBasedYear | Unit::Week | Unit::Day)
        });

        let nanos = get(Unit::Nanosecond);
        let carry = nanos / NANOS_PER_SECOND;
        let seconds = i128::from(get(Unit::Second)) + i128::from(carry);
        Ok(Fields {
            date,
            week_based_only,
            hours: get(Unit::Hour),
            minutes: get(Unit::Minute),
            seconds,
            nanos: nanos % NANOS_PER_SECOND,
        })
    }

    fn has_time(&self) -> bool {
        self.hours != 0
            || self.minutes != 0
            || self.seconds != 0
            || self.nanos != 0
    }
}

/// Writes a number of whole seconds that may not fit into an `i64`.
fn write_seconds<W: Write>(
    wtr: &mut W,
    seconds: i128,
) -> Result<(), Error> {
    const SPLIT: i128 = 1_000_000_000_000_000_000;

    if let Ok(seconds) = i64::try_from(seconds) {
        return wtr.write_int(&DecimalFormatter::new(), seconds);
    }
    // Seconds and carried nanoseconds are each at most `i64::MAX`, so both
    // halves fit.
    let high = i64::try_from(seconds / SPLIT)
        .map_err(|_| Error::overflow("seconds"))?;
    let low = i64::try_from(seconds % SPLIT)
        .map_err(|_| Error::overflow("seconds"))?;
    wtr.write_int(&DecimalFormatter::new(), high)?;
    wtr.write_int(&DecimalFormatter::new().padding(18), low)
}

/// Adds the amounts of the given units, converted, to the amount of
/// `target` and zeroes them.
fn fold(
    date: &mut [(i64, Unit); 9],
    units: &[Unit],
    target: Unit,
) -> Result<(), Error> {
    let overflow = || Error::overflow(target.plural());
    let mut total = slot(date, target).0;
    for &unit in units {
        let factor = i64::try_from(unit.nanoseconds() / target.nanoseconds())
            .map_err(|_| overflow())?;
        let entry = slot(date, unit);
        let amount = entry.0.checked_mul(factor).ok_or_else(overflow)?;
        entry.0 = 0;
        total = total.checked_add(amount).ok_or_else(overflow)?;
    }
    slot(date, target).0 = total;
    Ok(())
}

fn slot(date: &mut [(i64, Unit); 9], unit: Unit) -> &mut (i64, Unit) {
    // OK because every date unit has a slot.
    date.iter_mut().find(|(_, u)| *u == unit).unwrap()
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::unit::{Calendar, Full, WeekBased};

    use super::*;

    fn d(s: &str) -> Duration {
        s.parse().unwrap()
    }

    fn print(printer: DurationPrinter, s: &str) -> String {
        printer.duration_to_string(&d(s)).unwrap()
    }

    #[test]
    fn normal() {
        let p = |s| print(DurationPrinter::new(), s);

        insta::assert_snapshot!(p("P1I2C3E4Y5Q6M7W8DT9H10M11S"), @"P1I2C3E4Y5Q6M7W8DT9H10M11S");
        insta::assert_snapshot!(p("-P7Y4M3D"), @"-P7Y4M3D");
        insta::assert_snapshot!(p("PT0,000001S"), @"PT0,000001S");
        insta::assert_snapshot!(p("PT0S"), @"PT0S");
        insta::assert_snapshot!(p("PT1H"), @"PT1H");
        insta::assert_snapshot!(p("P3D"), @"P3D");

        let d = Duration::<Full>::of(1_500_000_000, Unit::Nanosecond).unwrap();
        insta::assert_snapshot!(d, @"PT1,500S");
        let d = Duration::<Full>::of(2_000, Unit::Millisecond).unwrap();
        insta::assert_snapshot!(d, @"PT2S");
    }

    #[test]
    fn week_based_years() {
        let wby = Duration::<Full>::of(2, Unit::WeekBasedYear).unwrap();
        insta::assert_snapshot!(wby, @"P2Y");
        let d = wby.plus(3, Unit::Week).unwrap().plus(1, Unit::Day).unwrap();
        insta::assert_snapshot!(d, @"P2Y3W1D");
        let d = wby.plus(3, Unit::Month).unwrap();
        insta::assert_snapshot!(d, @"P2{WEEK_BASED_YEARS}3M");
        let d = wby.plus(3, Unit::Hour).unwrap();
        insta::assert_snapshot!(d, @"P2{WEEK_BASED_YEARS}T3H");

        let d = Duration::<WeekBased>::parse_week_based_period("P5Y2W").unwrap();
        insta::assert_snapshot!(d.to_iso_string().unwrap(), @"P5Y14D");
    }

    #[test]
    fn iso() {
        let p = |s| print(DurationPrinter::new().style(Style::Iso), s);

        insta::assert_snapshot!(p("P1E2Q3W"), @"P10Y6M21D");
        insta::assert_snapshot!(p("P1I1C1E1Y1Q1M"), @"P1111Y4M");
        insta::assert_snapshot!(p("P3W"), @"P3W");
        insta::assert_snapshot!(p("P3WT1H"), @"P21DT1H");
        insta::assert_snapshot!(p("PT3H2M1,4S"), @"PT3H2M1,400S");
        insta::assert_snapshot!(p("PT0S"), @"PT0S");

        let p = |s| {
            print(
                DurationPrinter::new()
                    .style(Style::Iso)
                    .decimal_separator(b'.'),
                s,
            )
        };
        insta::assert_snapshot!(p("PT0,25S"), @"PT0.250S");

        let err = DurationPrinter::new()
            .style(Style::Iso)
            .duration_to_string(&d("-P1D"))
            .unwrap_err();
        assert!(err.is_mixed_sign());
        insta::assert_snapshot!(err, @"ISO 8601 does not support negative durations");

        let err = DurationPrinter::new()
            .style(Style::Iso)
            .duration_to_string(&d("P922337203685477581E"))
            .unwrap_err();
        assert!(err.is_overflow());
    }

    #[test]
    fn xml() {
        let p = |s| print(DurationPrinter::new().style(Style::Xml), s);

        insta::assert_snapshot!(p("PT3H2M1,4S"), @"PT3H2M1.400S");
        insta::assert_snapshot!(p("-PT3H2M1,4S"), @"-PT3H2M1.400S");
        insta::assert_snapshot!(p("-P3W"), @"-P21D");
        insta::assert_snapshot!(p("P1C2Q"), @"P100Y6M");
        insta::assert_snapshot!(p("PT0S"), @"PT0S");

        // The configured separator is ignored.
        let p = |s| {
            print(
                DurationPrinter::new()
                    .style(Style::Xml)
                    .decimal_separator(b','),
                s,
            )
        };
        insta::assert_snapshot!(p("PT0,5S"), @"PT0.500S");
    }

    #[test]
    fn zero_in_every_style() {
        let zero = Duration::<Calendar>::of_zero();
        assert_eq!(zero.to_string(), "PT0S");
        assert_eq!(zero.to_iso_string().unwrap(), "PT0S");
        assert_eq!(zero.to_xml_string().unwrap(), "PT0S");
        for s in [zero.to_string(), zero.to_xml_string().unwrap()] {
            assert_eq!(s.parse::<Duration>().unwrap(), Duration::of_zero());
        }
    }

    #[test]
    fn nanosecond_carry_past_i64() {
        let half =
            Duration::<Full>::of(600_000_000, Unit::Nanosecond).unwrap();
        let d = Duration::<Full>::of(i64::MAX, Unit::Second)
            .unwrap()
            .plus_duration(&half)
            .unwrap()
            .plus_duration(&half)
            .unwrap();
        assert_eq!(d.get_partial_amount(Unit::Nanosecond), 1_200_000_000);
        insta::assert_snapshot!(d, @"PT9223372036854775808,200S");
        insta::assert_snapshot!(
            d.to_xml_string().unwrap(),
            @"PT9223372036854775808.200S",
        );
        insta::assert_snapshot!(
            alloc::format!("{d:?}"),
            @"PT9223372036854775808,200S",
        );
    }

    #[test]
    #[should_panic]
    fn invalid_separator() {
        DurationPrinter::new().decimal_separator(b':');
    }
}
