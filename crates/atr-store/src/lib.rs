// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ATRIUM (ATR) - DISTRIBUTION STORE
//
// sled-backed persistent state for the fee distribution engine: the
// community fee pool, the split ratio, module params, the base payee and
// moderator singletons, per-denom burned totals, and the three
// per-validator reward ledgers keyed by operator address bytes.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use atr_core::{Coins, DecCoins, FeePool, Params, Ratio};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha3::{Digest, Sha3_256};
use sled::Tree;
use std::path::Path;
use thiserror::Error;

const TREE_META: &str = "meta";
const TREE_TOTAL_BURNED: &str = "total_burned";
const TREE_OUTSTANDING_REWARDS: &str = "outstanding_rewards";
const TREE_ACCUMULATED_COMMISSION: &str = "accumulated_commission";
const TREE_CURRENT_REWARDS: &str = "current_rewards";

const KEY_FEE_POOL: &[u8] = b"fee_pool";
const KEY_RATIO: &[u8] = b"ratio";
const KEY_PARAMS: &[u8] = b"params";
const KEY_BASE_ADDRESS: &[u8] = b"base_address";
const KEY_MODERATOR: &[u8] = b"moderator";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sled::Error),
    #[error("codec: {0}")]
    Codec(#[from] bincode::Error),
    #[error("corrupt value under key {key}")]
    Corrupt { key: String },
}

/// Persistent distribution state.
///
/// Writes flush to disk before returning, so a crash between rounds
/// never loses a committed round. Exclusivity is the caller's concern:
/// the surrounding state machine runs one round at a time.
pub struct DistributionStore {
    db: sled::Db,
    meta: Tree,
    total_burned: Tree,
    outstanding: Tree,
    commission: Tree,
    current: Tree,
}

impl DistributionStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let meta = db.open_tree(TREE_META)?;
        let total_burned = db.open_tree(TREE_TOTAL_BURNED)?;
        let outstanding = db.open_tree(TREE_OUTSTANDING_REWARDS)?;
        let commission = db.open_tree(TREE_ACCUMULATED_COMMISSION)?;
        let current = db.open_tree(TREE_CURRENT_REWARDS)?;
        Ok(Self {
            db,
            meta,
            total_burned,
            outstanding,
            commission,
            current,
        })
    }

    fn get_value<T: DeserializeOwned>(tree: &Tree, key: &[u8]) -> Result<Option<T>, StoreError> {
        match tree.get(key)? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_value<T: Serialize>(&self, tree: &Tree, key: &[u8], value: &T) -> Result<(), StoreError> {
        tree.insert(key, bincode::serialize(value)?)?;
        self.db.flush()?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────
    // Singletons
    // ─────────────────────────────────────────────────────────────────

    pub fn fee_pool(&self) -> Result<FeePool, StoreError> {
        Ok(Self::get_value(&self.meta, KEY_FEE_POOL)?.unwrap_or_else(FeePool::initial))
    }

    pub fn set_fee_pool(&self, pool: &FeePool) -> Result<(), StoreError> {
        self.put_value(&self.meta, KEY_FEE_POOL, pool)
    }

    pub fn ratio(&self) -> Result<Ratio, StoreError> {
        Ok(Self::get_value(&self.meta, KEY_RATIO)?.unwrap_or_else(Ratio::initial))
    }

    pub fn set_ratio(&self, ratio: &Ratio) -> Result<(), StoreError> {
        self.put_value(&self.meta, KEY_RATIO, ratio)
    }

    pub fn params(&self) -> Result<Params, StoreError> {
        Ok(Self::get_value(&self.meta, KEY_PARAMS)?.unwrap_or_default())
    }

    pub fn set_params(&self, params: &Params) -> Result<(), StoreError> {
        self.put_value(&self.meta, KEY_PARAMS, params)
    }

    fn address_singleton(&self, key: &[u8]) -> Result<Option<String>, StoreError> {
        match self.meta.get(key)? {
            Some(bytes) if !bytes.is_empty() => {
                let addr = String::from_utf8(bytes.to_vec()).map_err(|_| StoreError::Corrupt {
                    key: String::from_utf8_lossy(key).into_owned(),
                })?;
                Ok(Some(addr))
            }
            _ => Ok(None),
        }
    }

    /// The configured base payee, or None when unset. An empty string
    /// unsets (matching the genesis representation).
    pub fn base_address(&self) -> Result<Option<String>, StoreError> {
        self.address_singleton(KEY_BASE_ADDRESS)
    }

    pub fn set_base_address(&self, addr: &str) -> Result<(), StoreError> {
        self.meta.insert(KEY_BASE_ADDRESS, addr.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }

    pub fn moderator(&self) -> Result<Option<String>, StoreError> {
        self.address_singleton(KEY_MODERATOR)
    }

    pub fn set_moderator(&self, addr: &str) -> Result<(), StoreError> {
        self.meta.insert(KEY_MODERATOR, addr.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────
    // Burned totals (per denom, u128 little-endian)
    // ─────────────────────────────────────────────────────────────────

    pub fn total_burned(&self, denom: &str) -> Result<u128, StoreError> {
        match self.total_burned.get(denom.as_bytes())? {
            Some(bytes) => {
                let arr: [u8; 16] = bytes.as_ref().try_into().map_err(|_| StoreError::Corrupt {
                    key: denom.to_string(),
                })?;
                Ok(u128::from_le_bytes(arr))
            }
            None => Ok(0),
        }
    }

    pub fn set_total_burned(&self, denom: &str, amount: u128) -> Result<(), StoreError> {
        self.total_burned
            .insert(denom.as_bytes(), &amount.to_le_bytes())?;
        self.db.flush()?;
        Ok(())
    }

    /// Accumulate freshly burned coins into the per-denom totals.
    pub fn add_total_burned(&self, burned: &Coins) -> Result<(), StoreError> {
        for coin in burned.iter() {
            let current = self.total_burned(&coin.denom)?;
            self.total_burned.insert(
                coin.denom.as_bytes(),
                &current.saturating_add(coin.amount).to_le_bytes(),
            )?;
        }
        self.db.flush()?;
        Ok(())
    }

    pub fn total_burned_all(&self) -> Result<Vec<(String, u128)>, StoreError> {
        let mut out = Vec::new();
        for item in self.total_burned.iter() {
            let (key, value) = item?;
            let denom = String::from_utf8(key.to_vec()).map_err(|_| StoreError::Corrupt {
                key: hex::encode(&key),
            })?;
            let arr: [u8; 16] = value.as_ref().try_into().map_err(|_| StoreError::Corrupt {
                key: denom.clone(),
            })?;
            out.push((denom, u128::from_le_bytes(arr)));
        }
        Ok(out)
    }

    // ─────────────────────────────────────────────────────────────────
    // Per-validator reward ledgers (keyed by operator address bytes)
    // ─────────────────────────────────────────────────────────────────

    fn ledger_entry(tree: &Tree, operator: &str) -> Result<DecCoins, StoreError> {
        Ok(Self::get_value(tree, operator.as_bytes())?.unwrap_or_default())
    }

    fn ledger_all(tree: &Tree) -> Result<Vec<(String, DecCoins)>, StoreError> {
        let mut out = Vec::new();
        for item in tree.iter() {
            let (key, value) = item?;
            let operator = String::from_utf8(key.to_vec()).map_err(|_| StoreError::Corrupt {
                key: hex::encode(&key),
            })?;
            out.push((operator, bincode::deserialize(&value)?));
        }
        Ok(out)
    }

    /// Total reward ever allocated (commission + delegator share) and not
    /// yet withdrawn.
    pub fn outstanding_rewards(&self, operator: &str) -> Result<DecCoins, StoreError> {
        Self::ledger_entry(&self.outstanding, operator)
    }

    pub fn set_outstanding_rewards(
        &self,
        operator: &str,
        rewards: &DecCoins,
    ) -> Result<(), StoreError> {
        self.put_value(&self.outstanding, operator.as_bytes(), rewards)
    }

    pub fn outstanding_rewards_all(&self) -> Result<Vec<(String, DecCoins)>, StoreError> {
        Self::ledger_all(&self.outstanding)
    }

    /// Commission owed to the validator operator.
    pub fn accumulated_commission(&self, operator: &str) -> Result<DecCoins, StoreError> {
        Self::ledger_entry(&self.commission, operator)
    }

    pub fn set_accumulated_commission(
        &self,
        operator: &str,
        commission: &DecCoins,
    ) -> Result<(), StoreError> {
        self.put_value(&self.commission, operator.as_bytes(), commission)
    }

    pub fn accumulated_commission_all(&self) -> Result<Vec<(String, DecCoins)>, StoreError> {
        Self::ledger_all(&self.commission)
    }

    /// Reward owed to delegators at the current reward period.
    pub fn current_rewards(&self, operator: &str) -> Result<DecCoins, StoreError> {
        Self::ledger_entry(&self.current, operator)
    }

    pub fn set_current_rewards(
        &self,
        operator: &str,
        rewards: &DecCoins,
    ) -> Result<(), StoreError> {
        self.put_value(&self.current, operator.as_bytes(), rewards)
    }

    pub fn current_rewards_all(&self) -> Result<Vec<(String, DecCoins)>, StoreError> {
        Self::ledger_all(&self.current)
    }

    // ─────────────────────────────────────────────────────────────────
    // State digest
    // ─────────────────────────────────────────────────────────────────

    /// Deterministic SHA3-256 digest over every tree in a fixed order.
    /// Trees iterate in key order, so replicas holding the same state
    /// produce the same digest. Used to compare ledgers across nodes
    /// after a round.
    pub fn state_digest(&self) -> Result<String, StoreError> {
        let mut hasher = Sha3_256::new();
        for (name, tree) in [
            (TREE_META, &self.meta),
            (TREE_TOTAL_BURNED, &self.total_burned),
            (TREE_OUTSTANDING_REWARDS, &self.outstanding),
            (TREE_ACCUMULATED_COMMISSION, &self.commission),
            (TREE_CURRENT_REWARDS, &self.current),
        ] {
            hasher.update(name.as_bytes());
            for item in tree.iter() {
                let (key, value) = item?;
                hasher.update(&key);
                hasher.update(&value);
            }
        }
        Ok(hex::encode(hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atr_core::coins::{Coin, DecCoin};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, DistributionStore) {
        let dir = TempDir::new().unwrap();
        let store = DistributionStore::open(dir.path().join("dist_db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_defaults_when_unset() {
        let (_dir, store) = temp_store();
        assert_eq!(store.fee_pool().unwrap(), FeePool::initial());
        assert_eq!(store.ratio().unwrap(), Ratio::initial());
        assert_eq!(store.params().unwrap(), Params::default());
        assert_eq!(store.base_address().unwrap(), None);
        assert_eq!(store.moderator().unwrap(), None);
        assert_eq!(store.total_burned("uatr").unwrap(), 0);
        assert!(store.outstanding_rewards("atr1anyone").unwrap().is_zero());
    }

    #[test]
    fn test_singleton_roundtrip() {
        let (_dir, store) = temp_store();

        let pool = FeePool {
            community_pool: DecCoins::new(vec![DecCoin::new("uatr", dec!(1.25))]),
        };
        store.set_fee_pool(&pool).unwrap();
        assert_eq!(store.fee_pool().unwrap(), pool);

        store.set_base_address("atr1basepayee0001").unwrap();
        assert_eq!(
            store.base_address().unwrap(),
            Some("atr1basepayee0001".to_string())
        );

        // Empty string unsets
        store.set_base_address("").unwrap();
        assert_eq!(store.base_address().unwrap(), None);
    }

    #[test]
    fn test_total_burned_accumulates() {
        let (_dir, store) = temp_store();
        store
            .add_total_burned(&Coins::new(vec![
                Coin::new("uatr", 33),
                Coin::new("uflux", 5),
            ]))
            .unwrap();
        store.add_total_burned(&Coins::one("uatr", 7)).unwrap();

        assert_eq!(store.total_burned("uatr").unwrap(), 40);
        assert_eq!(store.total_burned("uflux").unwrap(), 5);

        store.set_total_burned("uatr", 0).unwrap();
        assert_eq!(store.total_burned("uatr").unwrap(), 0);

        let all = store.total_burned_all().unwrap();
        assert_eq!(all, vec![("uatr".to_string(), 0), ("uflux".to_string(), 5)]);
    }

    #[test]
    fn test_validator_ledgers_independent() {
        let (_dir, store) = temp_store();
        let rewards = DecCoins::one("uatr", dec!(18.36));
        let commission = DecCoins::one("uatr", dec!(2.04));

        store.set_current_rewards("atr1valoper0001", &rewards).unwrap();
        store
            .set_accumulated_commission("atr1valoper0001", &commission)
            .unwrap();

        assert_eq!(store.current_rewards("atr1valoper0001").unwrap(), rewards);
        assert_eq!(
            store.accumulated_commission("atr1valoper0001").unwrap(),
            commission
        );
        // Outstanding untouched
        assert!(store.outstanding_rewards("atr1valoper0001").unwrap().is_zero());
        // Other operators untouched
        assert!(store.current_rewards("atr1valoper0002").unwrap().is_zero());
    }

    #[test]
    fn test_persistence_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dist_db");

        {
            let store = DistributionStore::open(&path).unwrap();
            store.set_moderator("atr1moderator001").unwrap();
            store
                .set_outstanding_rewards("atr1valoper0001", &DecCoins::one("uatr", dec!(34)))
                .unwrap();
        }

        let store = DistributionStore::open(&path).unwrap();
        assert_eq!(
            store.moderator().unwrap(),
            Some("atr1moderator001".to_string())
        );
        assert_eq!(
            store.outstanding_rewards("atr1valoper0001").unwrap(),
            DecCoins::one("uatr", dec!(34))
        );
    }

    #[test]
    fn test_state_digest_tracks_content() {
        let (_dir, a) = temp_store();
        let (_dir2, b) = temp_store();
        assert_eq!(a.state_digest().unwrap(), b.state_digest().unwrap());

        a.set_total_burned("uatr", 1).unwrap();
        assert_ne!(a.state_digest().unwrap(), b.state_digest().unwrap());

        b.set_total_burned("uatr", 1).unwrap();
        assert_eq!(a.state_digest().unwrap(), b.state_digest().unwrap());
    }
}
