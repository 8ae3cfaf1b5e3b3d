//! Fuzz target: Coins / DecCoins JSON deserialization
//!
//! Feeds arbitrary bytes to serde_json to detect panics or unexpected
//! behavior in amount deserialization (genesis import attack surface).
//!
//! Run: cargo +nightly fuzz run fuzz_coins_deserialize -- -max_len=4096

#![no_main]
use atr_core::{Coins, DecCoins};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Attempt JSON deserialization — must not panic
    if let Ok(s) = std::str::from_utf8(data) {
        let _: Result<Coins, _> = serde_json::from_str(s);
        let _: Result<DecCoins, _> = serde_json::from_str(s);
    }

    // Also test from raw bytes
    let _: Result<Coins, _> = serde_json::from_slice(data);
    let _: Result<DecCoins, _> = serde_json::from_slice(data);
});
