//! Fuzz target for strict date parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use vehiscope::schema::DEFAULT_DATE_FORMAT;
use vehiscope::table::parse_date;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1_000 {
        return;
    }

    if let Ok(input) = std::str::from_utf8(data) {
        if let Some(date) = parse_date(input, DEFAULT_DATE_FORMAT) {
            // Anything accepted must render back to the same text.
            assert_eq!(date.format(DEFAULT_DATE_FORMAT).to_string(), input.trim());
        }
    }
});
