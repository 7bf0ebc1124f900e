#![no_main]

use chemeng::Units;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut units = Units::new();
        let _ = units.convert_quantity(s);
        let _ = chemeng::parse_units(s);
    }
});
