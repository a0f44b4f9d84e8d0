//! Fuzz target for the listings parser.
//!
//! Arbitrary bytes must either parse into a raw table or fail with an
//! error, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use vehiscope::{Parser, Table};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    for delimiter in [b',', b'\t', b';'] {
        if let Ok(raw) = parser.parse_bytes(data, delimiter) {
            let _ = Table::from_data_table(&raw);
        }
    }
});
