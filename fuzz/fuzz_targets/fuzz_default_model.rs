//! Fuzz target: default model resolution over arbitrary model file sources.
//!
//! Whatever the generated `TestComponent.json` contains, resolution must not
//! panic and must yield a non-empty model.

#![no_main]

use libfuzzer_sys::fuzz_target;
use structor_core::{resolve_default_model, FileDescriptor};

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);
    let files = [FileDescriptor::new("TestComponent.json", source)];
    let resolution = resolve_default_model(&files, "TestComponent", None);
    assert!(!resolution.model.is_empty());
});
