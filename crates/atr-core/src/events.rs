// ─────────────────────────────────────────────────────────────────
// Domain events
// ─────────────────────────────────────────────────────────────────
// The engine performs no I/O of its own: every operation returns the
// events it produced and the surrounding state-machine driver decides
// whether and where to publish them. Dropping them never affects
// ledger correctness.
// ─────────────────────────────────────────────────────────────────

use crate::coins::{Coins, DecCoins};
use crate::ratio::Ratio;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Fees destroyed this round per the burn share of the ratio.
    BurnFee { amount: Coins },
    /// Fees paid to the configured base payee.
    BaseFee { amount: Coins, base_address: String },
    /// Commission credited to a validator operator.
    Commission { validator: String, amount: DecCoins },
    /// Total reward (commission + delegator share) allocated to a validator.
    Rewards { validator: String, amount: DecCoins },
    /// Moderator changed the distribution ratio.
    ChangeRatio { ratio: Ratio },
    /// Moderator changed the base payee.
    ChangeBaseAddress { new_base_address: String },
    /// Moderator handed off to a new moderator.
    ChangeModerator { new_moderator: String },
    /// Moderator reset the burned-total counter for one denomination.
    ResetTotalBurned { denom: String, amount: u128 },
    /// Integer part of the community pool moved to the external pool account.
    CommunityPoolSweep { amount: Coins },
}
