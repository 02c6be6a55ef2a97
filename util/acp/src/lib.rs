//! # The Anyone-Can-Pay Transaction Library
//!
//! Assembles transactions spending or receiving cells locked by the
//! anyone-can-pay lock, and computes the messages their owners must sign.
//!
//! Every step takes a [`TransactionSkeleton`] by value and returns the updated
//! one:
//!
//! - [`setup_input_cell`] attaches an anyone-can-pay cell as an input.
//! - [`setup_output_cell`] pays into the receiver's existing cell.
//! - [`inject_capacity`] raises capacity from the payer.
//! - [`prepare_signing_entries`] computes the group messages to sign.
//! - [`withdraw`] moves capacity out of one anyone-can-pay cell.

pub mod address;
mod cell;
mod collector;
pub mod config;
mod error;
mod inject;
mod input;
pub mod limit;
mod output;
pub mod provider;
mod signing;
mod skeleton;
mod withdraw;

#[cfg(test)]
mod tests;

pub use address::{Address, NetworkType};
pub use cell::{decode_udt_amount, LiveCell};
pub use collector::AcpCellCollector;
pub use config::{AcpConfig, ScriptsConfig};
pub use error::{Error, Result};
pub use inject::inject_capacity;
pub use input::{
    secp_signature_placeholder, setup_input_cell, setup_input_cell_with_witness,
    SECP_SIGNATURE_SIZE,
};
pub use limit::{check_limit, AcpLimit};
pub use output::setup_output_cell;
pub use provider::{CellProvider, CellQueryOptions, MemoryCellProvider, TypeFilter};
pub use signing::prepare_signing_entries;
pub use skeleton::{
    FixedEntry, SigningEntry, SigningEntryKind, SkeletonField, TransactionSkeleton,
};
pub use withdraw::withdraw;
