// ─────────────────────────────────────────────────────────────────
// Genesis state
// ─────────────────────────────────────────────────────────────────

use atr_core::{
    validate_address, validate_denom, CoinsError, DecCoins, FeePool, Params, Ratio,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::bank::Bank;
use crate::engine::AllocationEngine;
use crate::errors::DistError;
use crate::staking::ValidatorSet;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TotalBurnedRecord {
    pub denom: String,
    pub amount: u128,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidatorLedgerRecord {
    pub operator_address: String,
    pub amount: DecCoins,
}

/// Complete distribution state at chain start (or at export time).
/// `base_address` and `moderator` use the empty string for "unset".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenesisState {
    pub params: Params,
    pub fee_pool: FeePool,
    pub ratio: Ratio,
    pub base_address: String,
    pub moderator: String,
    pub total_burned: Vec<TotalBurnedRecord>,
    pub outstanding_rewards: Vec<ValidatorLedgerRecord>,
    pub accumulated_commissions: Vec<ValidatorLedgerRecord>,
    pub current_rewards: Vec<ValidatorLedgerRecord>,
}

impl Default for GenesisState {
    fn default() -> Self {
        Self {
            params: Params::default(),
            fee_pool: FeePool::initial(),
            ratio: Ratio::initial(),
            base_address: String::new(),
            moderator: String::new(),
            total_burned: Vec::new(),
            outstanding_rewards: Vec::new(),
            accumulated_commissions: Vec::new(),
            current_rewards: Vec::new(),
        }
    }
}

fn validate_ledger_records(records: &[ValidatorLedgerRecord]) -> Result<(), DistError> {
    for record in records {
        validate_address(&record.operator_address).map_err(|reason| {
            DistError::InvalidAddress {
                addr: record.operator_address.clone(),
                reason,
            }
        })?;
        if record.amount.is_any_negative() {
            let denom = record
                .amount
                .iter()
                .find(|c| c.amount < rust_decimal::Decimal::ZERO)
                .map(|c| c.denom.clone())
                .unwrap_or_default();
            return Err(DistError::Coins(CoinsError::Negative { denom }));
        }
    }
    Ok(())
}

pub fn validate_genesis(state: &GenesisState) -> Result<(), DistError> {
    state.params.validate()?;
    state.ratio.validate()?;
    state.fee_pool.validate()?;
    if !state.base_address.is_empty() {
        validate_address(&state.base_address).map_err(|reason| DistError::InvalidAddress {
            addr: state.base_address.clone(),
            reason,
        })?;
    }
    if !state.moderator.is_empty() {
        validate_address(&state.moderator).map_err(|reason| DistError::InvalidAddress {
            addr: state.moderator.clone(),
            reason,
        })?;
    }
    for record in &state.total_burned {
        validate_denom(&record.denom).map_err(|reason| DistError::InvalidDenom {
            denom: record.denom.clone(),
            reason,
        })?;
    }
    validate_ledger_records(&state.outstanding_rewards)?;
    validate_ledger_records(&state.accumulated_commissions)?;
    validate_ledger_records(&state.current_rewards)?;
    Ok(())
}

impl<B: Bank, V: ValidatorSet> AllocationEngine<B, V> {
    /// Seed the store from a validated genesis state.
    pub fn init_genesis(&mut self, state: &GenesisState) -> Result<(), DistError> {
        validate_genesis(state)?;

        let store = self.store();
        store.set_params(&state.params)?;
        store.set_fee_pool(&state.fee_pool)?;
        store.set_ratio(&state.ratio)?;
        store.set_base_address(&state.base_address)?;
        store.set_moderator(&state.moderator)?;
        for record in &state.total_burned {
            store.set_total_burned(&record.denom, record.amount)?;
        }
        for record in &state.outstanding_rewards {
            store.set_outstanding_rewards(&record.operator_address, &record.amount)?;
        }
        for record in &state.accumulated_commissions {
            store.set_accumulated_commission(&record.operator_address, &record.amount)?;
        }
        for record in &state.current_rewards {
            store.set_current_rewards(&record.operator_address, &record.amount)?;
        }
        Ok(())
    }

    /// Snapshot the full distribution state, e.g. for a chain export.
    pub fn export_genesis(&self) -> Result<GenesisState, DistError> {
        let store = self.store();
        let to_records = |entries: Vec<(String, DecCoins)>| {
            entries
                .into_iter()
                .map(|(operator_address, amount)| ValidatorLedgerRecord {
                    operator_address,
                    amount,
                })
                .collect()
        };
        Ok(GenesisState {
            params: store.params()?,
            fee_pool: store.fee_pool()?,
            ratio: store.ratio()?,
            base_address: store.base_address()?.unwrap_or_default(),
            moderator: store.moderator()?.unwrap_or_default(),
            total_burned: store
                .total_burned_all()?
                .into_iter()
                .map(|(denom, amount)| TotalBurnedRecord { denom, amount })
                .collect(),
            outstanding_rewards: to_records(store.outstanding_rewards_all()?),
            accumulated_commissions: to_records(store.accumulated_commission_all()?),
            current_rewards: to_records(store.current_rewards_all()?),
        })
    }
}

/// The operator-editable slice of genesis, loadable from a TOML file.
/// Ledger records never appear here; they only exist in chain exports.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenesisConfig {
    pub community_tax: rust_decimal::Decimal,
    pub base_address: String,
    pub moderator: String,
    pub ratio: Ratio,
}

impl GenesisConfig {
    /// Load genesis config from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: GenesisConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save genesis config to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        Params {
            community_tax: self.community_tax,
        }
        .validate()
        .map_err(|e| e.to_string())?;
        self.ratio.validate().map_err(|e| e.to_string())?;
        if !self.base_address.is_empty() {
            validate_address(&self.base_address)?;
        }
        if !self.moderator.is_empty() {
            validate_address(&self.moderator)?;
        }
        Ok(())
    }

    pub fn into_genesis_state(self) -> GenesisState {
        GenesisState {
            params: Params {
                community_tax: self.community_tax,
            },
            ratio: self.ratio,
            base_address: self.base_address,
            moderator: self.moderator,
            ..GenesisState::default()
        }
    }
}
