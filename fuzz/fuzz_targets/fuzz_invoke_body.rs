//! Fuzz target: JSON deserialization of the `/sandbox/invoke` body.
//!
//! Arbitrary bytes must never panic the request parser; errors are fine.

#![no_main]

use libfuzzer_sys::fuzz_target;
use structor_gateway::routes::InvokeRequest;

fuzz_target!(|data: &[u8]| {
    let _ = serde_json::from_slice::<InvokeRequest>(data);
});
