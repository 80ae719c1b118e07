use tenor::{
    round::{Approximate, StdPeriod},
    unit::{Calendar, Clock, Unit},
    Duration,
};

use crate::Result;

#[test]
fn single_unit_reconciles() -> Result {
    crate::init();

    let d: Duration = Duration::of(1, Unit::Month)?.plus(-6, Unit::Month)?;
    assert_eq!(d, Duration::of(-5, Unit::Month)?);

    let d: Duration = Duration::of(5, Unit::Month)?.plus(-6, Unit::Month)?;
    assert_eq!(d.to_string(), "-P1M");

    let d: Duration = Duration::of(3, Unit::Day)?.minus(3, Unit::Day)?;
    assert!(d.is_empty());
    assert!(!d.is_negative());

    Ok(())
}

#[test]
fn merge_with_opposite_signs() -> Result {
    crate::init();

    let d1: Duration = "P1Y1D".parse()?;
    let d2: Duration = "-P1MT1H".parse()?;
    assert_eq!(d1.plus_duration(&d2)?.to_string(), "P11MT23H");

    let d1: Duration = "P1M".parse()?;
    let d2: Duration = "-P30D".parse()?;
    let err = d1.plus_duration(&d2).unwrap_err();
    assert!(err.is_mixed_sign());
    assert!(!err.is_invalid_argument());

    let parts = d1.union(&d2)?;
    assert_eq!(parts, vec![d1.clone(), d2.clone()]);

    let parts = d1.union(&"P2M".parse()?)?;
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].to_string(), "P3M");

    Ok(())
}

#[test]
fn scaling_and_sign() -> Result {
    let d: Duration = "-P7Y4M3D".parse()?;
    assert!(d.is_negative());
    assert_eq!(d.signum(), -1);
    assert_eq!(d.inverse().to_string(), "P7Y4M3D");
    assert_eq!(d.inverse().inverse(), d);
    assert_eq!(d.abs().to_string(), "P7Y4M3D");
    assert_eq!(d.abs().abs(), d.abs());
    assert_eq!(-&d, d.inverse());

    assert_eq!(d.multiplied_by(-2)?.to_string(), "P14Y8M6D");
    assert_eq!(d.multiplied_by(1)?, d);
    assert!(d.multiplied_by(0)?.is_empty());

    let err = d.multiplied_by(i64::MAX).unwrap_err();
    assert!(err.is_overflow());

    Ok(())
}

#[test]
fn zero_is_identity() -> Result {
    let zero: Duration = Duration::of_zero();
    for s in ["P1Y", "-PT3H0,5S", "P2Q3W", "PT0S"] {
        let d: Duration = s.parse()?;
        assert_eq!(zero.plus_duration(&d)?, d);
        assert_eq!(d.plus_duration(&zero)?, d);
    }
    Ok(())
}

#[test]
fn builders_and_factories() -> Result {
    let d = Duration::of_positive()
        .years(2)
        .months(13)
        .days(35)
        .minutes(132)
        .build()?;
    assert_eq!(d.to_string(), "P2Y13M35DT132M");

    let err = Duration::of_negative().hours(1).try_hours(2).unwrap_err();
    assert!(err.is_invalid_argument());

    let d = Duration::<Calendar>::of_calendar_units(-1, -2, 0)?;
    assert_eq!(d.to_string(), "-P1Y2M");
    let err = Duration::<Clock>::of_clock_units(1, -2, 0).unwrap_err();
    assert!(err.is_invalid_argument());

    let clock = Duration::<Clock>::of_clock_units(1, 30, 0)?;
    let full: Duration = clock.clone().into();
    assert_eq!(Duration::<Clock>::try_from(full)?, clock);
    let full: Duration = "P1D".parse()?;
    assert!(Duration::<Clock>::try_from(full).is_err());

    Ok(())
}

#[test]
fn normalizers() -> Result {
    crate::init();

    let d = Duration::of_positive()
        .years(2)
        .months(13)
        .days(35)
        .minutes(132)
        .build()?;
    assert_eq!(d.with(Approximate::hours(24))?.to_string(), "P3Y2M4D");
    assert_eq!(d.with(Approximate::max_unit_only())?.to_string(), "P3Y");
    assert_eq!(d.with(StdPeriod)?.to_string(), "P3Y1M35DT2H12M");

    let d: Duration = "-P10D".parse()?;
    assert_eq!(d.with(Approximate::max_unit_or_weeks())?.to_string(), "-P1W");

    let err = d.with(Approximate::seconds(0)).unwrap_err();
    assert!(err.is_invalid_argument());

    Ok(())
}
