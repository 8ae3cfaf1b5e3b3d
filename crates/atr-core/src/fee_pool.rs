use crate::coins::{CoinsError, DecCoins};
use serde::{Deserialize, Serialize};

/// Singleton pool absorbing the community tax and every truncation
/// remainder the per-round allocation leaves behind. Held in decimal
/// form so sub-unit fractions survive across rounds; the sweep
/// transfers out the integer part and re-persists the change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct FeePool {
    pub community_pool: DecCoins,
}

impl FeePool {
    /// Genesis state: an empty pool.
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), CoinsError> {
        if self.community_pool.is_any_negative() {
            if let Some(coin) = self
                .community_pool
                .iter()
                .find(|c| c.amount < rust_decimal::Decimal::ZERO)
            {
                return Err(CoinsError::Negative {
                    denom: coin.denom.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coins::DecCoin;
    use rust_decimal_macros::dec;

    #[test]
    fn test_initial_pool_empty_and_valid() {
        let pool = FeePool::initial();
        assert!(pool.community_pool.is_zero());
        assert!(pool.validate().is_ok());
    }

    #[test]
    fn test_negative_pool_rejected() {
        let pool = FeePool {
            community_pool: DecCoins::new(vec![DecCoin::new("uatr", dec!(-1))]),
        };
        assert!(pool.validate().is_err());
    }
}
