#![no_main]

//! Fuzz the markup selector parser: must never panic, and accepted
//! selectors must produce a non-empty tag.

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(selector) = frond_render::parse_selector(input) {
            assert!(!selector.tag.is_empty());
            assert!(selector.classes.iter().all(|class| !class.is_empty()));
        }
    }
});
