//! Owner configured minimums of an anyone-can-pay lock.
//!
//! The lock args are `blake160 | capacity exponent | amount exponent`, the two
//! trailing bytes being optional. An exponent `n` at byte 20 requires payments
//! of at least `10^n` CKBytes, an exponent `m` at byte 21 requires sUDT
//! payments of at least `10^m` units.

use crate::error::{Error, Result};

pub const CAPACITY_EXPONENT_INDEX: usize = 20;
pub const AMOUNT_EXPONENT_INDEX: usize = 21;

const SHANNONS_PER_CKB: u64 = 100_000_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AcpLimit {
    /// In shannons.
    pub min_capacity: Option<u64>,
    pub min_amount: Option<u128>,
}

impl AcpLimit {
    pub fn from_args(args: &[u8]) -> Self {
        let min_capacity = args.get(CAPACITY_EXPONENT_INDEX).map(|exponent| {
            10u64
                .checked_pow(u32::from(*exponent))
                .and_then(|ckb| ckb.checked_mul(SHANNONS_PER_CKB))
                .unwrap_or(u64::MAX)
        });
        let min_amount = args
            .get(AMOUNT_EXPONENT_INDEX)
            .map(|exponent| 10u128.checked_pow(u32::from(*exponent)).unwrap_or(u128::MAX));
        AcpLimit {
            min_capacity,
            min_amount,
        }
    }

    /// Only the capacity leg is enforced, also when an amount minimum is set.
    /// The amount is left to sUDT transfers.
    pub fn check(&self, capacity: u64) -> Result<()> {
        match self.min_capacity {
            Some(min_capacity) if capacity < min_capacity => Err(Error::BelowLimit {
                capacity,
                min_capacity,
                min_amount: self.min_amount,
            }),
            _ => Ok(()),
        }
    }
}

/// Checks a payment of `capacity` shannons against the minimums in `args`.
pub fn check_limit(args: &[u8], capacity: u64) -> Result<()> {
    AcpLimit::from_args(args).check(capacity)
}
