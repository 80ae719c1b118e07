use std::cmp::Ordering;

use tenor::{
    timeline::{LengthComparator, Metric, TimePoint},
    unit::Unit,
    Duration, Error,
};

/// A count of seconds where every unit has its average length.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
struct Seconds(i64);

fn length(unit: Unit) -> Result<i64, Error> {
    if unit == Unit::Nanosecond {
        return Err(Error::from_args(format_args!(
            "nanoseconds are not supported"
        )));
    }
    Ok(unit.length() as i64)
}

impl TimePoint for Seconds {
    fn plus(&self, amount: i64, unit: Unit) -> Result<Seconds, Error> {
        let delta = amount
            .checked_mul(length(unit)?)
            .ok_or_else(|| Error::from_args(format_args!("out of range")))?;
        Ok(Seconds(self.0 + delta))
    }

    fn until(&self, end: &Seconds, unit: Unit) -> Result<i64, Error> {
        Ok((end.0 - self.0) / length(unit)?)
    }
}

#[test]
fn add_and_subtract() -> Result<(), Error> {
    crate::init();

    let d: Duration = "P1DT1H".parse()?;
    assert_eq!(d.add_to(&Seconds(0))?, Seconds(90_000));
    assert_eq!(d.subtract_from(&Seconds(0))?, Seconds(-90_000));
    assert_eq!(d.inverse().add_to(&Seconds(0))?, Seconds(-90_000));

    let d: Duration = "PT0,5S".parse()?;
    let err = d.add_to(&Seconds(0)).unwrap_err();
    assert_eq!(err.to_string(), "nanoseconds are not supported");

    Ok(())
}

#[test]
fn compare_lengths() -> Result<(), Error> {
    let cmp = LengthComparator::new(Seconds(0));
    let d = |s: &str| s.parse::<Duration>();

    assert_eq!(cmp.compare(&d("P1Y")?, &d("P12M")?)?, Ordering::Equal);
    assert_eq!(cmp.compare(&d("P1M")?, &d("P30D")?)?, Ordering::Greater);
    assert_eq!(cmp.compare(&d("-P1M")?, &d("PT1S")?)?, Ordering::Less);
    assert_eq!(cmp.compare(&d("PT0S")?, &d("PT0S")?)?, Ordering::Equal);

    let mut durations =
        vec![d("P1W")?, d("-PT1H")?, d("P1M")?, d("PT0S")?, d("P6D")?];
    durations.sort_by(|d1, d2| cmp.compare(d1, d2).unwrap());
    let sorted: Vec<String> =
        durations.iter().map(|d| d.to_string()).collect();
    assert_eq!(sorted, ["-PT1H", "PT0S", "P6D", "P1W", "P1M"]);

    Ok(())
}

#[test]
fn metric() -> Result<(), Error> {
    crate::init();

    let metric: Metric =
        Metric::new(&[Unit::Second, Unit::Day, Unit::Hour, Unit::Minute])?;
    assert_eq!(
        metric.units(),
        &[Unit::Day, Unit::Hour, Unit::Minute, Unit::Second],
    );

    let d = metric.between(&Seconds(0), &Seconds(93_784))?;
    assert_eq!(d.to_string(), "P1DT2H3M4S");
    let d = metric.between(&Seconds(93_784), &Seconds(0))?;
    assert_eq!(d.to_string(), "-P1DT2H3M4S");
    assert!(metric.between(&Seconds(5), &Seconds(5))?.is_empty());

    let err = Metric::<tenor::unit::Full>::new(&[]).unwrap_err();
    assert!(err.is_invalid_argument());

    Ok(())
}
