// ─────────────────────────────────────────────────────────────────
// Staking collaborator boundary
// ─────────────────────────────────────────────────────────────────

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One validator's vote from the previous round, as reported by
/// consensus. `power` is the bonded voting power backing the vote.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VoteInfo {
    pub validator_address: String,
    pub power: i64,
}

impl VoteInfo {
    pub fn new(validator_address: impl Into<String>, power: i64) -> Self {
        Self {
            validator_address: validator_address.into(),
            power,
        }
    }
}

/// What the staking collaborator exposes about a bonded validator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidatorInfo {
    pub operator_address: String,
    pub commission_rate: Decimal,
}

impl ValidatorInfo {
    pub fn new(operator_address: impl Into<String>, commission_rate: Decimal) -> Self {
        Self {
            operator_address: operator_address.into(),
            commission_rate,
        }
    }
}

/// Resolves the consensus address a vote carries to the validator it
/// belongs to. Backed by the external staking module in production.
pub trait ValidatorSet {
    fn by_consensus_address(&self, consensus_address: &str) -> Option<ValidatorInfo>;
}

/// Fixed validator set over a BTreeMap. Used by the test suites and by
/// tooling that replays rounds against a known snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticValidatorSet {
    validators: BTreeMap<String, ValidatorInfo>,
}

impl StaticValidatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, consensus_address: impl Into<String>, info: ValidatorInfo) {
        self.validators.insert(consensus_address.into(), info);
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl ValidatorSet for StaticValidatorSet {
    fn by_consensus_address(&self, consensus_address: &str) -> Option<ValidatorInfo> {
        self.validators.get(consensus_address).cloned()
    }
}
