// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ATRIUM (ATR) - PER-ROUND ALLOCATION
//
// Order of operations each round:
//   1. pull collected fees into the module account
//   2. reserve the community tax, split the rest by the stored ratio
//   3. burn share → burn sink (+ burned totals)
//   4. base share → base payee (folds into staking rewards when unset)
//   5. staking pool → validators, proportional to bonded voting power,
//      each commission-split between operator and delegators
//   6. whatever truncation left behind → community pool
//
// Votes are processed in input order and every multiply/divide truncates,
// so replicas fed the same votes produce bit-identical ledgers.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use atr_core::coins::{Coin, CoinsError};
use atr_core::{dec, validate_address, Coins, DecCoins, Event};
use atr_store::DistributionStore;
use log::{debug, info};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::bank::Bank;
use crate::errors::DistError;
use crate::staking::{ValidatorInfo, ValidatorSet, VoteInfo};
use crate::{EXTERNAL_POOL_ACCOUNT, FEE_COLLECTOR_ACCOUNT, MODULE_ACCOUNT};

/// Per-denomination truncated share of `amounts`. Only strictly positive
/// truncated entries appear in the result, so negligible shares vanish
/// instead of producing zero-value transfers.
pub fn calculate_percentage(
    amounts: &DecCoins,
    percentage: Decimal,
) -> Result<Coins, CoinsError> {
    let mut out = Vec::new();
    for coin in amounts.iter() {
        let share = dec::mul_truncate(coin.amount, percentage).trunc();
        let amount = share.to_u128().ok_or_else(|| CoinsError::AmountOverflow {
            denom: coin.denom.clone(),
        })?;
        if amount > 0 {
            out.push(Coin::new(coin.denom.clone(), amount));
        }
    }
    Ok(Coins::new(out))
}

/// The fee distribution engine. Owns the persistent distribution store
/// and holds handles to its two collaborators; constructed once by the
/// surrounding state machine and driven synchronously, one round at a
/// time.
pub struct AllocationEngine<B: Bank, V: ValidatorSet> {
    store: DistributionStore,
    bank: B,
    validators: V,
}

impl<B: Bank, V: ValidatorSet> AllocationEngine<B, V> {
    pub fn new(store: DistributionStore, bank: B, validators: V) -> Self {
        Self {
            store,
            bank,
            validators,
        }
    }

    pub fn store(&self) -> &DistributionStore {
        &self.store
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    /// Distribute the previous round's collected fees. Called once per
    /// consensus round with the bonded votes and total bonded power of
    /// that round.
    ///
    /// Either the whole round commits or none of it does: every lookup
    /// is resolved before the first transfer or store write, and a bank
    /// failure after that point is the fatal `TransferFailure`.
    pub fn allocate_tokens(
        &mut self,
        total_previous_power: i64,
        bonded_votes: &[VoteInfo],
    ) -> Result<Vec<Event>, DistError> {
        // Fees collected during the previous round still sit in the
        // collector account. Nothing collected → nothing to do.
        let fees_collected = self.bank.balances(FEE_COLLECTOR_ACCOUNT);
        if fees_collected.is_zero() {
            return Ok(Vec::new());
        }

        let ratio = self.store.ratio()?;
        let params = self.store.params()?;

        let base_address = self.store.base_address()?;
        if let Some(addr) = &base_address {
            validate_address(addr).map_err(|reason| DistError::InvalidAddress {
                addr: addr.clone(),
                reason,
            })?;
        }
        let resolved = if total_previous_power > 0 {
            self.resolve_votes(bonded_votes)?
        } else {
            Vec::new()
        };

        // All lookups held up. Pull the round's fees into the module
        // account. From here on a bank refusal is fatal.
        self.bank
            .send_module_to_module(FEE_COLLECTOR_ACCOUNT, MODULE_ACCOUNT, &fees_collected)
            .map_err(DistError::TransferFailure)?;

        let total_fees = fees_collected.to_dec()?;
        let mut events = Vec::new();

        // No bonded power: there is no validator set to reward, so the
        // entire round's fees are preserved for the community pool and
        // burn/base are skipped.
        if total_previous_power <= 0 {
            info!(
                "no bonded power; {} credited to community pool",
                total_fees
            );
            self.credit_community_pool(&total_fees)?;
            return Ok(events);
        }

        info!(
            "ratio burn={} base={} staking_rewards={} community_tax={}",
            ratio.burn, ratio.base, ratio.staking_rewards, params.community_tax
        );

        // The community tax share never enters the burn/base/staking
        // split; it falls through `remaining` into the community pool.
        let staking_multiplier = Decimal::ONE - params.community_tax;
        let fee_multiplier = total_fees.mul_dec_truncate(staking_multiplier);

        let burn_fee = calculate_percentage(&fee_multiplier, ratio.burn)?;
        if !burn_fee.is_zero() {
            self.bank
                .burn(MODULE_ACCOUNT, &burn_fee)
                .map_err(DistError::TransferFailure)?;
            self.store.add_total_burned(&burn_fee)?;
        }
        info!("burned {}", burn_fee);
        events.push(Event::BurnFee {
            amount: burn_fee.clone(),
        });

        // An unconfigured base payee does not burn or lose its share:
        // the base slice stays inside the staking pool below.
        let base_fee = match &base_address {
            Some(addr) => {
                let base_fee = calculate_percentage(&fee_multiplier, ratio.base)?;
                if !base_fee.is_zero() {
                    self.bank
                        .send_module_to_account(MODULE_ACCOUNT, addr, &base_fee)
                        .map_err(DistError::TransferFailure)?;
                }
                info!("base fee {} paid to {}", base_fee, addr);
                events.push(Event::BaseFee {
                    amount: base_fee.clone(),
                    base_address: addr.clone(),
                });
                base_fee
            }
            None => Coins::default(),
        };

        let staking_pool = fee_multiplier
            .checked_sub(&burn_fee.to_dec()?)?
            .checked_sub(&base_fee.to_dec()?)?;
        debug!("staking rewards pool {}", staking_pool);

        // Running remainder: everything not burned, not paid to base,
        // and not allocated below belongs to the community pool.
        let mut remaining = total_fees
            .checked_sub(&burn_fee.to_dec()?)?
            .checked_sub(&base_fee.to_dec()?)?;

        let total_power = Decimal::from(total_previous_power);
        for (validator, power) in &resolved {
            let power_fraction = dec::quo_truncate(Decimal::from(*power), total_power);
            let reward = staking_pool.mul_dec_truncate(power_fraction);
            self.allocate_tokens_to_validator(validator, &reward, &mut events)?;
            remaining = remaining.checked_sub(&reward)?;
        }

        self.credit_community_pool(&remaining)?;
        Ok(events)
    }

    /// Split one validator's allocation between operator commission and
    /// the delegator share, and bump its three ledgers. The complement
    /// is exact: `commission + shared == tokens`, no leakage.
    fn allocate_tokens_to_validator(
        &mut self,
        validator: &ValidatorInfo,
        tokens: &DecCoins,
        events: &mut Vec<Event>,
    ) -> Result<(), DistError> {
        let commission = tokens.mul_dec(validator.commission_rate);
        let shared = tokens.checked_sub(&commission)?;
        let operator = &validator.operator_address;

        let accumulated = self.store.accumulated_commission(operator)?.add(&commission);
        self.store.set_accumulated_commission(operator, &accumulated)?;

        let current = self.store.current_rewards(operator)?.add(&shared);
        self.store.set_current_rewards(operator, &current)?;

        let outstanding = self.store.outstanding_rewards(operator)?.add(tokens);
        self.store.set_outstanding_rewards(operator, &outstanding)?;

        debug!(
            "allocated {} to {} (commission {})",
            tokens, operator, commission
        );
        events.push(Event::Commission {
            validator: operator.clone(),
            amount: commission,
        });
        events.push(Event::Rewards {
            validator: operator.clone(),
            amount: tokens.clone(),
        });
        Ok(())
    }

    fn resolve_votes(
        &self,
        votes: &[VoteInfo],
    ) -> Result<Vec<(ValidatorInfo, i64)>, DistError> {
        let mut resolved = Vec::with_capacity(votes.len());
        for vote in votes {
            if vote.power < 0 {
                return Err(DistError::InvalidVotePower {
                    addr: vote.validator_address.clone(),
                    power: vote.power,
                });
            }
            let validator = self
                .validators
                .by_consensus_address(&vote.validator_address)
                .ok_or_else(|| DistError::UnknownValidator(vote.validator_address.clone()))?;
            resolved.push((validator, vote.power));
        }
        Ok(resolved)
    }

    fn credit_community_pool(&mut self, amount: &DecCoins) -> Result<(), DistError> {
        if amount.is_zero() {
            return Ok(());
        }
        let mut fee_pool = self.store.fee_pool()?;
        fee_pool.community_pool = fee_pool.community_pool.add(amount);
        self.store.set_fee_pool(&fee_pool)?;
        debug!("community pool now {}", fee_pool.community_pool);
        Ok(())
    }

    /// Out-of-band sweep: move the integer part of the community pool to
    /// the external pool account and keep only the sub-unit change, so
    /// the stored remainder stays below 1 per denomination without ever
    /// losing the fraction.
    pub fn send_community_pool_to_external_pool(&mut self) -> Result<Vec<Event>, DistError> {
        let mut fee_pool = self.store.fee_pool()?;
        if fee_pool.community_pool.is_zero() {
            return Ok(Vec::new());
        }

        let (amount, remaining) = fee_pool.community_pool.truncate_decimal()?;
        debug!(
            "sweeping community pool: amount={} remaining={}",
            amount, remaining
        );
        if !amount.is_zero() {
            self.bank
                .send_module_to_module(MODULE_ACCOUNT, EXTERNAL_POOL_ACCOUNT, &amount)
                .map_err(DistError::TransferFailure)?;
        }
        fee_pool.community_pool = remaining;
        self.store.set_fee_pool(&fee_pool)?;

        if amount.is_zero() {
            Ok(Vec::new())
        } else {
            Ok(vec![Event::CommunityPoolSweep { amount }])
        }
    }
}
