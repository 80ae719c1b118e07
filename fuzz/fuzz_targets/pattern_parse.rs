#![no_main]

use libfuzzer_sys::fuzz_target;

use tenor::{fmt::pattern::DurationPattern, Duration};

fn do_fuzz(data: &[u8]) {
    let Some((&split, rest)) = data.split_first() else { return };
    let split = usize::from(split).min(rest.len());
    let (pattern, input) = rest.split_at(split);
    let Ok(pattern) = std::str::from_utf8(pattern) else { return };
    let Ok(pattern) = DurationPattern::compile(pattern) else { return };

    // Parsing arbitrary input must never panic, and neither must printing
    // whatever was parsed.
    let Ok(parsed) = pattern.parse::<tenor::unit::Full, _>(input) else {
        return;
    };
    let _ = pattern.duration_to_string::<tenor::unit::Full>(&parsed);
    let _ = parsed.to_string().parse::<Duration>();
}

fuzz_target!(|data: &[u8]| do_fuzz(data));
