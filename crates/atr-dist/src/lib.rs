// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ATRIUM (ATR) - FEE DISTRIBUTION ENGINE
//
// Once per consensus round, splits the previous round's collected fees
// among the burn sink, the configured base payee, and the bonded
// validator set (commission-split with delegators), crediting every
// truncation remainder to the community pool. Deterministic across
// replicas: fixed-point truncating arithmetic, votes processed in input
// order, no floats anywhere.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub mod bank;
pub mod engine;
pub mod errors;
pub mod genesis;
pub mod msgs;
pub mod staking;

pub use bank::{Bank, MemoryBank};
pub use engine::AllocationEngine;
pub use errors::DistError;
pub use genesis::{GenesisConfig, GenesisState};
pub use staking::{StaticValidatorSet, ValidatorInfo, ValidatorSet, VoteInfo};

/// Module account that accrues transaction fees during a round.
pub const FEE_COLLECTOR_ACCOUNT: &str = "fee_collector";

/// Module account owned by the distribution engine. Holds each round's
/// fees from the moment they are pulled out of the collector until they
/// are burned, paid out, or swept.
pub const MODULE_ACCOUNT: &str = "distribution";

/// External community pool module account, target of the sweep.
pub const EXTERNAL_POOL_ACCOUNT: &str = "community_pool";
