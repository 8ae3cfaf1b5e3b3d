//! Fuzz target: genesis state validation
//!
//! Deserializes arbitrary JSON into GenesisState and runs the full
//! validation pass. Malformed genesis must be rejected, never panic.
//!
//! Run: cargo +nightly fuzz run fuzz_genesis_validate -- -max_len=8192

#![no_main]
use atr_dist::genesis::{validate_genesis, GenesisState};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(state) = serde_json::from_slice::<GenesisState>(data) {
        // Validation must classify, not crash
        let _ = validate_genesis(&state);
    }
});
