#![no_main]

use libfuzzer_sys::fuzz_target;
use svf_enrich_core::Lexicon;

// Arbitrary bytes as a source line (lossy UTF-8), through the name filter
// with both caps policies. Goal: no panics on any line.
fuzz_target!(|data: &[u8]| {
    let line = String::from_utf8_lossy(data);
    let lexicon = Lexicon::c_family();
    let _ = lexicon.filter_names(&line, true);
    let _ = lexicon.filter_names(&line, false);
});
