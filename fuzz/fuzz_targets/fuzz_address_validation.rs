//! Fuzz target: ATR address and denom validation
//!
//! Feeds arbitrary strings to validate_address() / validate_denom() to
//! ensure neither ever panics, whatever the input.
//!
//! Run: cargo +nightly fuzz run fuzz_address_validation -- -max_len=256

#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must never panic, even on garbage input
        let _ = atr_core::validate_address(s);
        let _ = atr_core::validate_denom(s);
    }
});
