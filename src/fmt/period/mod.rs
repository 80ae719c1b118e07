/*!
Support for the ISO 8601 period format.

A period looks like `P1Y2M3DT4H5M6,7S`: the designator `P`, amounts of date
units, the time designator `T` and amounts of time units. This crate extends
the format with a leading `-` for negative durations and with the symbols
`I` (millennia), `C` (centuries), `E` (decades), `Q` (quarters) and `W`
(weeks) in the date part.

The [`DurationParser`] handles the four dialects selected by the unit
[family](crate::unit::Family) of the duration being parsed, and the
[`DurationPrinter`] writes durations in one of three [`Style`]s.

Most of the time, there is no need to use this module directly. A
[`Duration`](crate::Duration) can be parsed with `str::parse` and printed
with its `Display` implementation, which use the default configuration of
the parser and the printer.

# Example

```
use tenor::{fmt::period::{DurationPrinter, Style}, Duration};

static XML: DurationPrinter = DurationPrinter::new().style(Style::Xml);

let d: Duration = "-P1QT0,5S".parse()?;
assert_eq!(d.to_string(), "-P1QT0,500S");
assert_eq!(XML.duration_to_string(&d)?, "-P3MT0.500S");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub use self::{
    parser::DurationParser,
    printer::{DurationPrinter, Style},
};

mod parser;
mod printer;

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::{
        unit::{Clock, Unit},
        Duration,
    };

    use super::*;

    quickcheck::quickcheck! {
        fn prop_xml_roundtrip(d: Duration<Clock>) -> bool {
            let xml = DurationPrinter::new().style(Style::Xml);
            let printed = xml.duration_to_string(&d).unwrap();
            let got: Duration<Clock> = printed.parse().unwrap();
            got == d
        }

        fn prop_separators_are_interchangeable(d: Duration) -> bool {
            let comma = d.to_string();
            let period = DurationPrinter::new()
                .decimal_separator(b'.')
                .duration_to_string(&d)
                .unwrap();
            comma.replace(',', ".") == period
        }

        fn prop_iso_never_prints_compound_units(d: Duration) -> bool {
            let Ok(iso) = d.to_iso_string() else {
                return d.is_negative();
            };
            if !d.contains(Unit::WeekBasedYear)
                && iso.contains("{WEEK_BASED_YEARS}")
            {
                return false;
            }
            let iso = iso.replace("{WEEK_BASED_YEARS}", "");
            !iso.contains(|c: char| matches!(c, 'I' | 'C' | 'E' | 'Q'))
                && (!iso.contains('W') || d.items().len() == 1)
        }
    }
}
