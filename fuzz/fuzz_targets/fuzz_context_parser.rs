//! Fuzz target for request-context parsing.
//!
//! Goal: Context parsing should **never panic** on any input.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_context_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = ace_loader::fuzz::parse_context_json(text);
    }
});
