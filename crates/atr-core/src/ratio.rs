// ─────────────────────────────────────────────────────────────────
// Burn / base / staking-rewards split
// ─────────────────────────────────────────────────────────────────
// The three shares must sum to exactly 1.0 in fixed-point terms.
// Validated whenever a ratio is persisted (genesis or moderator
// change). The stored value is trusted once validated, so the
// per-round path never re-checks it.
// ─────────────────────────────────────────────────────────────────

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RatioError {
    #[error("negative {component} in ratio: {value}")]
    Negative {
        component: &'static str,
        value: Decimal,
    },
    #[error("ratio components must sum to exactly 1, got {sum}")]
    SumMismatch { sum: Decimal },
}

/// How each round's post-tax fee pool is split.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    pub staking_rewards: Decimal,
    pub base: Decimal,
    pub burn: Decimal,
}

impl Ratio {
    pub fn new(staking_rewards: Decimal, base: Decimal, burn: Decimal) -> Self {
        Self {
            staking_rewards,
            base,
            burn,
        }
    }

    /// Genesis default: an even three-way split. The spare 10⁻¹⁸ goes to
    /// staking rewards so the components sum to exactly 1.
    pub fn initial() -> Self {
        Self {
            staking_rewards: Decimal::new(333_333_333_333_333_334, 18),
            base: Decimal::new(333_333_333_333_333_333, 18),
            burn: Decimal::new(333_333_333_333_333_333, 18),
        }
    }

    pub fn validate(&self) -> Result<(), RatioError> {
        for (component, value) in [
            ("staking_rewards", self.staking_rewards),
            ("base", self.base),
            ("burn", self.burn),
        ] {
            if value < Decimal::ZERO {
                return Err(RatioError::Negative { component, value });
            }
        }
        let sum = self.staking_rewards + self.base + self.burn;
        if sum != Decimal::ONE {
            return Err(RatioError::SumMismatch { sum });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_initial_ratio_sums_to_one() {
        assert!(Ratio::initial().validate().is_ok());
    }

    #[test]
    fn test_exact_sum_required() {
        let ratio = Ratio::new(dec!(0.34), dec!(0.33), dec!(0.33));
        assert!(ratio.validate().is_ok());

        let short = Ratio::new(dec!(0.34), dec!(0.33), dec!(0.32));
        assert_eq!(
            short.validate(),
            Err(RatioError::SumMismatch { sum: dec!(0.99) })
        );

        // Off by one unit at the last fixed-point digit is still a mismatch
        let off = Ratio::new(
            dec!(0.333333333333333333),
            dec!(0.333333333333333333),
            dec!(0.333333333333333333),
        );
        assert!(off.validate().is_err());
    }

    #[test]
    fn test_negative_component_rejected() {
        let ratio = Ratio::new(dec!(1.2), dec!(-0.1), dec!(-0.1));
        assert_eq!(
            ratio.validate(),
            Err(RatioError::Negative {
                component: "base",
                value: dec!(-0.1)
            })
        );
    }

    #[test]
    fn test_degenerate_splits_allowed() {
        // All-burn and all-staking are valid policies
        assert!(Ratio::new(dec!(0), dec!(0), dec!(1)).validate().is_ok());
        assert!(Ratio::new(dec!(1), dec!(0), dec!(0)).validate().is_ok());
    }
}
