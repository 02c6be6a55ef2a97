//! The error type for anyone-can-pay transaction assembly.

use ckb_types::error::VerificationError;
use thiserror::Error;

/// A specialized `Result` type for anyone-can-pay transaction assembly.
pub type Result<T> = std::result::Result<T, Error>;

/// A list specifying general categories of anyone-can-pay assembly errors.
///
/// Every error is terminal for the operation that raised it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operation which queries cells was given a skeleton without a cell provider.
    #[error("cell provider is missing")]
    MissingCellProvider,
    /// A cell or lock presented where an anyone-can-pay lock was required is not one.
    #[error("not an anyone-can-pay lock script")]
    NotAcpScript,
    /// The active configuration has no anyone-can-pay script.
    #[error("anyone-can-pay script is not configured")]
    ScriptNotConfigured,
    /// The caller supplied an output index out of bounds.
    #[error("invalid output index {index}, the transaction has {len} outputs")]
    InvalidOutputIndex { index: usize, len: usize },
    /// The lock field of the group witness already carries signature data.
    #[error("lock field of witness {index} is set aside for the signature")]
    LockFieldReserved { index: usize },
    /// The proposed capacity violates the minimums configured by the receiving lock.
    #[error(
        "capacity {capacity} is less than the minimal capacity limit {min_capacity} of the receiving lock{}",
        amount_hint(.min_amount)
    )]
    BelowLimit {
        capacity: u64,
        min_capacity: u64,
        min_amount: Option<u128>,
    },
    /// The destination has no live anyone-can-pay cell to merge into.
    #[error("anyone-can-pay input of the destination is not found")]
    NoAcpInputFound,
    /// The cell source is exhausted or the change would be below its occupied capacity.
    #[error("not enough capacity from the payer, {remaining} shannons still required")]
    InsufficientFunds { remaining: u64 },
    /// The head input of a lock group has no witness.
    #[error("the first witness of the lock group starting at input {index} does not exist")]
    MissingWitnessForGroup { index: usize },
    /// The requested withdrawal is outside the allowed range.
    #[error("withdraw capacity {capacity} must be in [0, {max}] or exactly {total}")]
    InvalidWithdrawCapacity { capacity: u64, max: u64, total: u64 },
    /// A witness could not be decoded as `WitnessArgs`.
    #[error("invalid witness: {0}")]
    InvalidWitness(String),
    /// Capacity or amount arithmetic overflowed.
    #[error("capacity or amount overflow")]
    Overflow,
    /// The cell provider failed to answer a query.
    #[error("cell provider error: {0}")]
    CellProvider(String),
    /// An address could not be encoded or decoded.
    #[error("invalid address: {0}")]
    Address(String),
    /// The configuration could not be loaded.
    #[error("invalid config: {0}")]
    Config(String),
}

fn amount_hint(min_amount: &Option<u128>) -> String {
    match min_amount {
        Some(amount) => format!(
            ", and the minimal amount limit is {amount}; transfer the sUDT to reach it instead"
        ),
        None => String::new(),
    }
}

impl From<VerificationError> for Error {
    fn from(err: VerificationError) -> Error {
        Error::InvalidWitness(err.to_string())
    }
}

impl From<bech32::Error> for Error {
    fn from(err: bech32::Error) -> Error {
        Error::Address(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Error {
        Error::Config(err.to_string())
    }
}
