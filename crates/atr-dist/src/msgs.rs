// ─────────────────────────────────────────────────────────────────
// Moderator surface
// ─────────────────────────────────────────────────────────────────
// Privileged configuration handlers, each gated on the stored
// moderator identity. Validation happens here, once, when a value is
// persisted. The per-round path trusts what it reads.
// ─────────────────────────────────────────────────────────────────

use atr_core::{validate_address, validate_denom, Event, Ratio};
use log::info;

use crate::bank::Bank;
use crate::engine::AllocationEngine;
use crate::errors::DistError;
use crate::staking::ValidatorSet;

impl<B: Bank, V: ValidatorSet> AllocationEngine<B, V> {
    fn require_moderator(&self, sender: &str) -> Result<(), DistError> {
        let moderator = self.store().moderator()?.ok_or(DistError::NoModerator)?;
        if moderator != sender {
            return Err(DistError::Unauthorized(sender.to_string()));
        }
        Ok(())
    }

    /// Replace the burn/base/staking split.
    pub fn change_ratio(&mut self, sender: &str, ratio: Ratio) -> Result<Event, DistError> {
        self.require_moderator(sender)?;
        ratio.validate()?;
        self.store().set_ratio(&ratio)?;
        info!(
            "ratio changed: burn={} base={} staking_rewards={}",
            ratio.burn, ratio.base, ratio.staking_rewards
        );
        Ok(Event::ChangeRatio { ratio })
    }

    /// Point the base share at a new payee.
    pub fn change_base_address(
        &mut self,
        sender: &str,
        new_base_address: &str,
    ) -> Result<Event, DistError> {
        self.require_moderator(sender)?;
        validate_address(new_base_address).map_err(|reason| DistError::InvalidAddress {
            addr: new_base_address.to_string(),
            reason,
        })?;
        self.store().set_base_address(new_base_address)?;
        info!("base address changed to {}", new_base_address);
        Ok(Event::ChangeBaseAddress {
            new_base_address: new_base_address.to_string(),
        })
    }

    /// Hand the moderator role to a new account.
    pub fn change_moderator(
        &mut self,
        sender: &str,
        new_moderator: &str,
    ) -> Result<Event, DistError> {
        self.require_moderator(sender)?;
        validate_address(new_moderator).map_err(|reason| DistError::InvalidAddress {
            addr: new_moderator.to_string(),
            reason,
        })?;
        self.store().set_moderator(new_moderator)?;
        info!("moderator changed to {}", new_moderator);
        Ok(Event::ChangeModerator {
            new_moderator: new_moderator.to_string(),
        })
    }

    /// Overwrite the burned-total counter for one denomination. The
    /// counter is otherwise monotone; this is the only way down.
    pub fn reset_total_burned(
        &mut self,
        sender: &str,
        denom: &str,
        amount: u128,
    ) -> Result<Event, DistError> {
        self.require_moderator(sender)?;
        validate_denom(denom).map_err(|reason| DistError::InvalidDenom {
            denom: denom.to_string(),
            reason,
        })?;
        self.store().set_total_burned(denom, amount)?;
        info!("total burned for {} reset to {}", denom, amount);
        Ok(Event::ResetTotalBurned {
            denom: denom.to_string(),
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::MemoryBank;
    use crate::staking::StaticValidatorSet;
    use atr_store::DistributionStore;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    const MODERATOR: &str = "atr1moderator001";
    const INTRUDER: &str = "atr1intruder0001";

    fn engine_with_moderator() -> (
        TempDir,
        AllocationEngine<MemoryBank, StaticValidatorSet>,
    ) {
        let dir = TempDir::new().unwrap();
        let store = DistributionStore::open(dir.path().join("dist_db")).unwrap();
        store.set_moderator(MODERATOR).unwrap();
        let engine = AllocationEngine::new(store, MemoryBank::new(), StaticValidatorSet::new());
        (dir, engine)
    }

    #[test]
    fn test_change_ratio_validates_and_persists() {
        let (_dir, mut engine) = engine_with_moderator();
        let ratio = Ratio::new(dec!(0.5), dec!(0.25), dec!(0.25));
        let event = engine.change_ratio(MODERATOR, ratio).unwrap();
        assert_eq!(event, Event::ChangeRatio { ratio });
        assert_eq!(engine.store().ratio().unwrap(), ratio);

        // A ratio that does not sum to 1 is rejected and not persisted
        let bad = Ratio::new(dec!(0.5), dec!(0.25), dec!(0.26));
        assert!(matches!(
            engine.change_ratio(MODERATOR, bad),
            Err(DistError::Ratio(_))
        ));
        assert_eq!(engine.store().ratio().unwrap(), ratio);
    }

    #[test]
    fn test_only_moderator_may_change_config() {
        let (_dir, mut engine) = engine_with_moderator();
        assert!(matches!(
            engine.change_base_address(INTRUDER, "atr1basepayee0001"),
            Err(DistError::Unauthorized(_))
        ));
        assert!(matches!(
            engine.reset_total_burned(INTRUDER, "uatr", 0),
            Err(DistError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_no_moderator_configured() {
        let dir = TempDir::new().unwrap();
        let store = DistributionStore::open(dir.path().join("dist_db")).unwrap();
        let mut engine =
            AllocationEngine::new(store, MemoryBank::new(), StaticValidatorSet::new());
        assert!(matches!(
            engine.change_base_address(MODERATOR, "atr1basepayee0001"),
            Err(DistError::NoModerator)
        ));
    }

    #[test]
    fn test_change_moderator_hands_off_authority() {
        let (_dir, mut engine) = engine_with_moderator();
        let new_moderator = "atr1moderator002";
        engine.change_moderator(MODERATOR, new_moderator).unwrap();

        // Old moderator is locked out, new one is in charge
        assert!(matches!(
            engine.change_base_address(MODERATOR, "atr1basepayee0001"),
            Err(DistError::Unauthorized(_))
        ));
        engine
            .change_base_address(new_moderator, "atr1basepayee0001")
            .unwrap();
        assert_eq!(
            engine.store().base_address().unwrap(),
            Some("atr1basepayee0001".to_string())
        );
    }

    #[test]
    fn test_change_base_address_rejects_malformed() {
        let (_dir, mut engine) = engine_with_moderator();
        assert!(matches!(
            engine.change_base_address(MODERATOR, "not-an-address"),
            Err(DistError::InvalidAddress { .. })
        ));
        assert_eq!(engine.store().base_address().unwrap(), None);
    }

    #[test]
    fn test_reset_total_burned() {
        let (_dir, mut engine) = engine_with_moderator();
        engine.store().set_total_burned("uatr", 1000).unwrap();

        let event = engine.reset_total_burned(MODERATOR, "uatr", 0).unwrap();
        assert_eq!(
            event,
            Event::ResetTotalBurned {
                denom: "uatr".to_string(),
                amount: 0
            }
        );
        assert_eq!(engine.store().total_burned("uatr").unwrap(), 0);

        assert!(matches!(
            engine.reset_total_burned(MODERATOR, "UATR", 0),
            Err(DistError::InvalidDenom { .. })
        ));
    }
}
