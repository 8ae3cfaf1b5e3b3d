// ─────────────────────────────────────────────────────────────────
// Bank collaborator boundary
// ─────────────────────────────────────────────────────────────────
// The engine never touches balances directly; every movement of funds
// goes through this trait. Implementations are assumed atomic: a call
// either fully applies or fully fails.
// ─────────────────────────────────────────────────────────────────

use atr_core::Coins;
use std::collections::BTreeMap;

pub trait Bank {
    /// All balances held by a module or user account.
    fn balances(&self, account: &str) -> Coins;

    /// Move coins between two module accounts.
    fn send_module_to_module(&mut self, from: &str, to: &str, amount: &Coins)
        -> Result<(), String>;

    /// Move coins from a module account to a user account.
    fn send_module_to_account(
        &mut self,
        module: &str,
        account: &str,
        amount: &Coins,
    ) -> Result<(), String>;

    /// Destroy coins held by a module account.
    fn burn(&mut self, module: &str, amount: &Coins) -> Result<(), String>;
}

/// In-memory reference bank. Used by the test suites and local tooling;
/// a production deployment wires the engine to the real ledger instead.
#[derive(Debug, Clone, Default)]
pub struct MemoryBank {
    balances: BTreeMap<String, Coins>,
    burned: Coins,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account out of thin air (test/genesis funding).
    pub fn mint(&mut self, account: &str, amount: &Coins) {
        let entry = self.balances.entry(account.to_string()).or_default();
        *entry = entry.add(amount);
    }

    /// Everything ever destroyed through `burn`.
    pub fn burned(&self) -> &Coins {
        &self.burned
    }

    fn withdraw(&mut self, account: &str, amount: &Coins) -> Result<(), String> {
        let entry = self.balances.entry(account.to_string()).or_default();
        *entry = entry
            .checked_sub(amount)
            .map_err(|e| format!("{}: {}", account, e))?;
        Ok(())
    }
}

impl Bank for MemoryBank {
    fn balances(&self, account: &str) -> Coins {
        self.balances.get(account).cloned().unwrap_or_default()
    }

    fn send_module_to_module(
        &mut self,
        from: &str,
        to: &str,
        amount: &Coins,
    ) -> Result<(), String> {
        self.withdraw(from, amount)?;
        self.mint(to, amount);
        Ok(())
    }

    fn send_module_to_account(
        &mut self,
        module: &str,
        account: &str,
        amount: &Coins,
    ) -> Result<(), String> {
        self.withdraw(module, amount)?;
        self.mint(account, amount);
        Ok(())
    }

    fn burn(&mut self, module: &str, amount: &Coins) -> Result<(), String> {
        self.withdraw(module, amount)?;
        self.burned = self.burned.add(amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_bank_transfer_and_burn() {
        let mut bank = MemoryBank::new();
        bank.mint("fee_collector", &Coins::one("uatr", 100));

        bank.send_module_to_module("fee_collector", "distribution", &Coins::one("uatr", 100))
            .unwrap();
        assert!(bank.balances("fee_collector").is_zero());
        assert_eq!(bank.balances("distribution").amount_of("uatr"), 100);

        bank.burn("distribution", &Coins::one("uatr", 33)).unwrap();
        assert_eq!(bank.balances("distribution").amount_of("uatr"), 67);
        assert_eq!(bank.burned().amount_of("uatr"), 33);

        // Overdraw fails and leaves state untouched
        assert!(bank.burn("distribution", &Coins::one("uatr", 100)).is_err());
        assert_eq!(bank.balances("distribution").amount_of("uatr"), 67);
    }
}
