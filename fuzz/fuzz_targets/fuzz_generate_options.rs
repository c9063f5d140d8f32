//! Fuzz target: JSON deserialization of `sandboxGenerate` options.

#![no_main]

use libfuzzer_sys::fuzz_target;
use structor_core::GenerateOptions;

fuzz_target!(|data: &[u8]| {
    let _ = serde_json::from_slice::<GenerateOptions>(data);
});
