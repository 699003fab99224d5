#![no_main]

use libfuzzer_sys::fuzz_target;
use stockkit::command::{parse_commands, parse_stock_list};
use stockkit::store::Warehouse;

// Fuzz the counted text formats
//
// Parsing must never panic, and any script that parses must apply cleanly.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(commands) = parse_commands(text) {
        let mut warehouse = Warehouse::new();
        let outcomes = warehouse.apply_all(commands);
        assert!(outcomes.len() <= text.lines().count());
        warehouse.check_invariants().unwrap();
    }

    if let Ok(entries) = parse_stock_list(text) {
        let warehouse: Warehouse = entries.into_iter().collect();
        warehouse.check_invariants().unwrap();
    }
});
