#![no_main]

use chemeng::stoichiometry::expand_groups;
use chemeng::{SolverConfig, Stoichiometry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let config = SolverConfig::default();
        let _ = expand_groups(s, &config);
        let _ = Stoichiometry::with_config(s, &config);
    }
});
