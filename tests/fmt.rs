use tenor::{
    fmt::{
        pattern::DurationPattern,
        period::{DurationParser, DurationPrinter, Style},
        StdFmtWrite,
    },
    unit::{Calendar, Clock, Unit, WeekBased},
    Duration,
};

use crate::Result;

#[test]
fn canonical_roundtrip() -> Result {
    let d = Duration::parse_period("-P7Y4M3D")?;
    assert!(d.is_negative());
    let units: Vec<(Unit, i64)> =
        d.items().iter().map(|item| (item.unit(), item.amount())).collect();
    assert_eq!(units, vec![(Unit::Year, 7), (Unit::Month, 4), (Unit::Day, 3)]);
    assert_eq!(d.to_string(), "-P7Y4M3D");

    for s in ["P1I2C3E4Y5Q6M7W8DT9H10M11S", "-PT0,000000001S", "P1W"] {
        let d: Duration = s.parse()?;
        assert_eq!(d.to_string(), s);
        assert_eq!(Duration::parse_period(&d.to_string())?, d);
    }

    Ok(())
}

#[test]
fn fractional_seconds() -> Result {
    let d = Duration::parse_period("PT3H2M1,4S")?;
    assert_eq!(d.get_partial_amount(Unit::Hour), 3);
    assert_eq!(d.get_partial_amount(Unit::Minute), 2);
    assert_eq!(d.get_partial_amount(Unit::Second), 1);
    assert_eq!(d.get_partial_amount(Unit::Nanosecond), 400_000_000);
    assert_eq!(d.to_xml_string()?, "PT3H2M1.400S");
    assert_eq!(d.to_string(), "PT3H2M1,400S");

    let d = Duration::parse_period("PT1.5S")?;
    assert_eq!(d.to_string(), "PT1,500S");

    Ok(())
}

#[test]
fn zero_in_every_style() -> Result {
    let zero: Duration = Duration::of_zero();
    assert_eq!(zero.to_string(), "PT0S");
    assert_eq!(zero.to_iso_string()?, "PT0S");
    assert_eq!(zero.to_xml_string()?, "PT0S");

    assert_eq!(Duration::parse_period("PT0S")?, zero);
    assert!(Duration::parse_calendar_period("PT0S")?.is_empty());
    assert!(Duration::parse_clock_period("PT0S")?.is_empty());
    assert!(Duration::parse_week_based_period("PT0S")?.is_empty());

    Ok(())
}

#[test]
fn iso_and_xml() -> Result {
    let d: Duration = "P1C2QT1,5S".parse()?;
    assert_eq!(d.to_iso_string()?, "P100Y6MT1,500S");
    assert_eq!(d.to_xml_string()?, "P100Y6MT1.500S");
    assert_eq!(Duration::parse_period(&d.to_iso_string()?)?.to_string(), "P100Y6MT1,500S");

    let d: Duration = "P2W".parse()?;
    assert_eq!(d.to_iso_string()?, "P2W");
    assert_eq!(d.to_xml_string()?, "P14D");

    let d: Duration = "-P1D".parse()?;
    let err = d.to_iso_string().unwrap_err();
    assert!(err.is_mixed_sign());
    assert_eq!(d.to_xml_string()?, "-P1D");

    Ok(())
}

#[test]
fn printer_configuration() -> Result {
    static ISO_DOT: DurationPrinter =
        DurationPrinter::new().style(Style::Iso).decimal_separator(b'.');

    let d: Duration = "PT0,25S".parse()?;
    assert_eq!(ISO_DOT.duration_to_string(&d)?, "PT0.250S");

    let mut out = String::new();
    ISO_DOT.print(&d, StdFmtWrite(&mut out))?;
    assert_eq!(out, "PT0.250S");

    let mut bytes = vec![];
    DurationPrinter::new().print(&d, &mut bytes)?;
    assert_eq!(bytes, b"PT0,250S");

    Ok(())
}

#[test]
fn dialects() -> Result {
    static PARSER: DurationParser = DurationParser::new();

    let d: Duration<Calendar> = PARSER.parse("P1Y2M3D")?;
    assert_eq!(d.to_string(), "P1Y2M3D");
    let d: Duration<Clock> = PARSER.parse("-PT1H")?;
    assert_eq!(d.to_string(), "-PT1H");
    let d: Duration<WeekBased> = PARSER.parse("P2Y3W")?;
    assert_eq!(d.get_partial_amount(Unit::WeekBasedYear), 2);
    assert_eq!(d.to_string(), "P2Y3W");

    assert!(PARSER.parse::<Calendar, _>("P1DT1H").is_err());
    assert!(PARSER.parse::<Clock, _>("P1D").is_err());
    assert!(PARSER.parse::<WeekBased, _>("P1M").is_err());

    let d = Duration::parse_period("P2012-02-05T01:02:03,5")?;
    assert_eq!(d.to_string(), "P2012Y2M5DT1H2M3,500S");

    Ok(())
}

#[test]
fn parse_errors_carry_position() {
    let err = Duration::parse_period("P1D2Y").unwrap_err();
    assert!(err.is_parse());
    assert_eq!(err.parse_input(), Some("P1D2Y"));
    assert_eq!(err.parse_offset(), Some(4));

    let err = Duration::parse_week_based_period("P1W2").unwrap_err();
    assert!(err.is_parse());
    assert_eq!(err.parse_offset(), Some(4));

    let err = Duration::parse_period("1Y").unwrap_err();
    assert_eq!(err.parse_offset(), Some(0));

    let err = Duration::parse_period("PT1,5H").unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn custom_pattern() -> Result {
    let pattern = DurationPattern::compile("[D'd ']hh:mm:ss[.fff]")?;

    let d: Duration = "-P2DT3H4M5,6S".parse()?;
    assert_eq!(pattern.duration_to_string(&d)?, "-2d 03:04:05.600");
    assert_eq!(pattern.parse::<tenor::unit::Full, _>("-2d 03:04:05.600")?, d);

    let d: Duration<Clock> = pattern.parse("00:90:00")?;
    assert_eq!(d.to_string(), "PT90M");

    let d: Duration = "P1M".parse()?;
    assert!(pattern.duration_to_string(&d).unwrap_err().is_invalid_argument());

    let err = DurationPattern::compile("hh:[mm").unwrap_err();
    assert!(err.is_invalid_argument());

    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn serde() -> Result {
    let d: Duration = "-P1YT0,5S".parse()?;
    let json = serde_json::to_string(&d).unwrap();
    assert_eq!(json, r#""-P1YT0,500S""#);
    let got: Duration = serde_json::from_str(&json).unwrap();
    assert_eq!(got, d);

    assert!(serde_json::from_str::<Duration<Clock>>(r#""P1D""#).is_err());

    Ok(())
}
