use atr_core::{CoinsError, ParamsError, RatioError};
use atr_store::StoreError;
use thiserror::Error;

/// Everything the distribution engine can fail with.
///
/// Only `TransferFailure` is fatal: it means the bank refused a burn or
/// send the engine had already computed as affordable, which implies the
/// module balance no longer matches the fees it just received. The
/// caller must halt round processing rather than retry. Every other
/// variant aborts the round before any ledger mutation was committed
/// and is safe to surface as an ordinary error.
#[derive(Debug, Error)]
pub enum DistError {
    #[error(transparent)]
    Ratio(#[from] RatioError),
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error("invalid address {addr}: {reason}")]
    InvalidAddress { addr: String, reason: String },
    #[error("invalid denomination {denom}: {reason}")]
    InvalidDenom { denom: String, reason: String },
    #[error("no validator bound to consensus address {0}")]
    UnknownValidator(String),
    #[error("negative voting power {power} for {addr}")]
    InvalidVotePower { addr: String, power: i64 },
    #[error("no moderator configured")]
    NoModerator,
    #[error("{0} is not the configured moderator")]
    Unauthorized(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Coins(#[from] CoinsError),
    #[error("transfer failed after allocation was computed: {0}")]
    TransferFailure(String),
}

impl DistError {
    /// True for faults that must halt processing instead of being
    /// returned to the round's caller for retry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DistError::TransferFailure(_))
    }
}
