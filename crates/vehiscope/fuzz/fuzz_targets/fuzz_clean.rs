//! Fuzz target for the cleaning stages.
//!
//! Fuzzed text lands in every cell of a listings file; resolution and
//! normalization may reject it but must not panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use vehiscope::{EmptyGroupPolicy, MissingValueResolver, Parser, Table, TypeNormalizer};

const HEADER: &str = "price,model_year,model,condition,cylinders,fuel,odometer,transmission,type,paint_color,date_posted,days_listed,is_4wd";

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let cell = content.replace([',', '\n', '\r', '"'], " ");
    let row = vec![cell.as_str(); 13].join(",");
    let csv = format!("{HEADER}\n{row}\n2011,2011,bmw x5,good,6,gas,1,automatic,SUV,red,2018-06-23,19,\n");

    let Ok(raw) = Parser::new().parse_bytes(csv.as_bytes(), b',') else {
        return;
    };
    let Ok(table) = Table::from_data_table(&raw) else {
        return;
    };

    let resolver = MissingValueResolver::new().empty_group_policy(EmptyGroupPolicy::GlobalFallback);
    if let Ok((resolved, _)) = resolver.resolve(&table) {
        let _ = TypeNormalizer::new().normalize(&resolved);
    }
});
