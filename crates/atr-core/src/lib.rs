// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ATRIUM (ATR) - DISTRIBUTION CORE
//
// Primitives for the per-round fee distribution engine: multi-denomination
// amounts (integer and fixed-point decimal), the burn/base/staking ratio,
// the community fee pool, and the domain events the engine returns.
// All consensus-critical arithmetic is truncating fixed-point, never floats.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub mod coins;
pub mod dec;
pub mod events;
pub mod fee_pool;
pub mod params;
pub mod ratio;

pub use coins::{Coin, Coins, CoinsError, DecCoin, DecCoins};
pub use events::Event;
pub use fee_pool::FeePool;
pub use params::{Params, ParamsError};
pub use ratio::{Ratio, RatioError};

/// Bech32-style prefix carried by every ATRIUM account identifier.
pub const ADDRESS_PREFIX: &str = "atr1";

/// Minimum / maximum accepted address length (prefix included).
pub const MIN_ADDRESS_LEN: usize = 12;
pub const MAX_ADDRESS_LEN: usize = 90;

/// Validate the shape of an account address.
/// Only format is checked here; existence is the bank's concern.
pub fn validate_address(addr: &str) -> Result<(), String> {
    if addr.is_empty() {
        return Err("address cannot be empty".to_string());
    }
    if !addr.starts_with(ADDRESS_PREFIX) {
        return Err(format!(
            "address {} does not carry the {} prefix",
            addr, ADDRESS_PREFIX
        ));
    }
    if addr.len() < MIN_ADDRESS_LEN || addr.len() > MAX_ADDRESS_LEN {
        return Err(format!(
            "address length {} outside {}..={}",
            addr.len(),
            MIN_ADDRESS_LEN,
            MAX_ADDRESS_LEN
        ));
    }
    if !addr.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("address {} contains non-alphanumeric bytes", addr));
    }
    Ok(())
}

/// Validate a denomination string ("uatr", "uflux", ...).
pub fn validate_denom(denom: &str) -> Result<(), String> {
    if denom.len() < 3 || denom.len() > 64 {
        return Err(format!("denom length {} outside 3..=64", denom.len()));
    }
    let mut chars = denom.chars();
    let first = chars.next().unwrap();
    if !first.is_ascii_lowercase() {
        return Err(format!("denom {} must start with a lowercase letter", denom));
    }
    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
        return Err(format!("denom {} contains invalid characters", denom));
    }
    Ok(())
}
