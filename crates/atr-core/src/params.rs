use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("community tax must be between 0 and 1, got {0}")]
    InvalidCommunityTax(Decimal),
}

/// Module parameters read once per round.
///
/// `community_tax` is the fraction of collected fees reserved for the
/// community pool before the burn/base/staking split is applied.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub community_tax: Decimal,
}

impl Params {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.community_tax < Decimal::ZERO || self.community_tax > Decimal::ONE {
            return Err(ParamsError::InvalidCommunityTax(self.community_tax));
        }
        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            // 2% community tax
            community_tax: Decimal::new(2, 2),
        }
    }
}
