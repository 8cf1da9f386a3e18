#![no_main]

use libfuzzer_sys::fuzz_target;
use svf_enrich_core::Report;

// Accepts arbitrary bytes, attempts to parse as an SVF report and writes it
// back out. Goal: anything that parses also serializes.
fuzz_target!(|data: &[u8]| {
    if let Ok(report) = serde_json::from_slice::<Report>(data) {
        let _ = serde_json::to_vec(&report).expect("parsed report serializes");
    }
});
