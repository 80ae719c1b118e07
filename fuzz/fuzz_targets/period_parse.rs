#![no_main]

use std::borrow::Cow;

use libfuzzer_sys::fuzz_target;

use tenor::{fmt::period, Duration};

fn do_fuzz(data: &[u8]) {
    const PARSER: period::DurationParser = period::DurationParser::new();
    const PRINTER: period::DurationPrinter = period::DurationPrinter::new();

    let Ok(first) = PARSER.parse::<tenor::unit::Full, _>(data) else {
        return;
    };
    let mut unparsed = Vec::with_capacity(data.len());
    PRINTER
        .print(&first, &mut unparsed)
        .expect("we parsed it, so we should be able to print it");

    match PARSER.parse::<tenor::unit::Full, _>(&unparsed) {
        Ok(second) => {
            assert_eq!(
                first, second,
                "expected the initially parsed value \
                 to be equal to the value after printing and re-parsing",
            );
        }
        Err(e) if cfg!(not(feature = "relaxed")) => {
            let unparsed_str = String::from_utf8_lossy(&unparsed);
            panic!(
                "should be able to parse a printed value; \
                 failed with `{e}` at: `{unparsed_str}`{}, \
                 corresponding to {first:?}",
                if matches!(unparsed_str, Cow::Owned(_)) {
                    Cow::from(format!(" (lossy; actual bytes: {unparsed:?})"))
                } else {
                    Cow::from("")
                }
            );
        }
        Err(_) => {}
    }

    // The XML style folds compound units into years and months, which may
    // overflow. When it doesn't, the result must parse and keep the sign.
    let Ok(xml) = first.to_xml_string() else { return };
    let second: Duration = match xml.parse() {
        Ok(second) => second,
        Err(e) => panic!("failed to re-parse XML form `{xml}` of {first:?}: {e}"),
    };
    assert_eq!(first.is_negative(), second.is_negative());
}

fuzz_target!(|data: &[u8]| do_fuzz(data));
