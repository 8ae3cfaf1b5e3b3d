// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ATRIUM (ATR) - MULTI-DENOMINATION AMOUNTS
//
// Coins: integer (u128) amounts, the transferable form.
// DecCoins: fixed-point decimal amounts, the internal bookkeeping form.
// Both are kept canonical: sorted by denom, one entry per denom, zero
// entries elided. Sorted Vec gives deterministic iteration and
// serialization across all replicas.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use crate::dec;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoinsError {
    #[error("subtraction would drive {denom} negative")]
    Negative { denom: String },
    #[error("amount for {denom} exceeds the representable range")]
    AmountOverflow { denom: String },
}

/// A single integer-amount denomination entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Canonical set of integer coins. Absent denominations are implicitly zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Canonicalize: merge duplicate denoms, drop zero entries, sort.
    pub fn new(coins: Vec<Coin>) -> Self {
        let mut merged: BTreeMap<String, u128> = BTreeMap::new();
        for coin in coins {
            if coin.amount > 0 {
                let entry = merged.entry(coin.denom).or_default();
                *entry = entry.saturating_add(coin.amount);
            }
        }
        Coins(
            merged
                .into_iter()
                .map(|(denom, amount)| Coin { denom, amount })
                .collect(),
        )
    }

    /// Single-denomination convenience constructor.
    pub fn one(denom: impl Into<String>, amount: u128) -> Self {
        Self::new(vec![Coin::new(denom, amount)])
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    pub fn add(&self, other: &Coins) -> Coins {
        let mut merged: Vec<Coin> = self.0.clone();
        merged.extend(other.0.iter().cloned());
        Coins::new(merged)
    }

    /// Per-denomination subtraction; errors instead of going negative.
    pub fn checked_sub(&self, other: &Coins) -> Result<Coins, CoinsError> {
        let mut amounts: BTreeMap<String, u128> = self
            .0
            .iter()
            .map(|c| (c.denom.clone(), c.amount))
            .collect();
        for coin in &other.0 {
            let have = amounts.entry(coin.denom.clone()).or_default();
            *have = have.checked_sub(coin.amount).ok_or(CoinsError::Negative {
                denom: coin.denom.clone(),
            })?;
        }
        Ok(Coins(
            amounts
                .into_iter()
                .filter(|(_, amount)| *amount > 0)
                .map(|(denom, amount)| Coin { denom, amount })
                .collect(),
        ))
    }

    /// Lift into the decimal bookkeeping form.
    pub fn to_dec(&self) -> Result<DecCoins, CoinsError> {
        let mut out = Vec::with_capacity(self.0.len());
        for coin in &self.0 {
            let amount =
                Decimal::from_u128(coin.amount).ok_or_else(|| CoinsError::AmountOverflow {
                    denom: coin.denom.clone(),
                })?;
            out.push(DecCoin {
                denom: coin.denom.clone(),
                amount,
            });
        }
        Ok(DecCoins(out))
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// A single decimal-amount denomination entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DecCoin {
    pub denom: String,
    pub amount: Decimal,
}

impl DecCoin {
    pub fn new(denom: impl Into<String>, amount: Decimal) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Canonical set of decimal coins.
///
/// Negative entries are never produced by the arithmetic here
/// (`checked_sub` errors first), but a hand-built value may contain
/// them; `is_any_negative` exists so genesis validation can reject it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct DecCoins(Vec<DecCoin>);

impl DecCoins {
    /// Canonicalize: merge duplicate denoms, drop zero entries, sort.
    pub fn new(coins: Vec<DecCoin>) -> Self {
        let mut merged: BTreeMap<String, Decimal> = BTreeMap::new();
        for coin in coins {
            let entry = merged.entry(coin.denom).or_insert(Decimal::ZERO);
            *entry += coin.amount;
        }
        DecCoins(
            merged
                .into_iter()
                .filter(|(_, amount)| !amount.is_zero())
                .map(|(denom, amount)| DecCoin { denom, amount })
                .collect(),
        )
    }

    /// Single-denomination convenience constructor.
    pub fn one(denom: impl Into<String>, amount: Decimal) -> Self {
        Self::new(vec![DecCoin::new(denom, amount)])
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_any_negative(&self) -> bool {
        self.0.iter().any(|c| c.amount < Decimal::ZERO)
    }

    pub fn amount_of(&self, denom: &str) -> Decimal {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecCoin> {
        self.0.iter()
    }

    pub fn add(&self, other: &DecCoins) -> DecCoins {
        let mut merged: Vec<DecCoin> = self.0.clone();
        merged.extend(other.0.iter().cloned());
        DecCoins::new(merged)
    }

    /// Per-denomination subtraction; errors instead of going negative.
    pub fn checked_sub(&self, other: &DecCoins) -> Result<DecCoins, CoinsError> {
        let mut amounts: BTreeMap<String, Decimal> = self
            .0
            .iter()
            .map(|c| (c.denom.clone(), c.amount))
            .collect();
        for coin in &other.0 {
            let have = amounts.entry(coin.denom.clone()).or_insert(Decimal::ZERO);
            *have -= coin.amount;
            if *have < Decimal::ZERO {
                return Err(CoinsError::Negative {
                    denom: coin.denom.clone(),
                });
            }
        }
        Ok(DecCoins(
            amounts
                .into_iter()
                .filter(|(_, amount)| !amount.is_zero())
                .map(|(denom, amount)| DecCoin { denom, amount })
                .collect(),
        ))
    }

    /// Exact per-denomination multiply (used for the commission split,
    /// where `commission + shared == tokens` must hold with no loss).
    pub fn mul_dec(&self, d: Decimal) -> DecCoins {
        DecCoins::new(
            self.0
                .iter()
                .map(|c| DecCoin::new(c.denom.clone(), c.amount * d))
                .collect(),
        )
    }

    /// Truncating per-denomination multiply (used wherever a share is
    /// carved out of a pool and the loss must fall to the remainder).
    pub fn mul_dec_truncate(&self, d: Decimal) -> DecCoins {
        DecCoins::new(
            self.0
                .iter()
                .map(|c| DecCoin::new(c.denom.clone(), dec::mul_truncate(c.amount, d)))
                .collect(),
        )
    }

    /// Split into the transferable integer part and the sub-unit decimal
    /// remainder. Every remainder entry is strictly below 1.
    pub fn truncate_decimal(&self) -> Result<(Coins, DecCoins), CoinsError> {
        let mut whole = Vec::new();
        let mut change = Vec::new();
        for coin in &self.0 {
            let int_part = coin.amount.trunc();
            let frac_part = coin.amount - int_part;
            let amount = int_part.to_u128().ok_or_else(|| CoinsError::AmountOverflow {
                denom: coin.denom.clone(),
            })?;
            whole.push(Coin::new(coin.denom.clone(), amount));
            change.push(DecCoin::new(coin.denom.clone(), frac_part));
        }
        Ok((Coins::new(whole), DecCoins::new(change)))
    }
}

impl fmt::Display for DecCoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}
