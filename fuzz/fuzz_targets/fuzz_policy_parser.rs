//! Fuzz target for policy document parsing.
//!
//! Goal: The JSON and YAML policy parsers should **never panic** on any input.
//! They may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_policy_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = ace_loader::fuzz::parse_policy_json(text);
        let _ = ace_loader::fuzz::parse_policy_yaml(text);
    }
});
