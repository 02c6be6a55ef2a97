use std::collections::HashSet;

use ckb_hash::{new_blake2b, Blake2b};
use ckb_logger::{debug, trace};
use ckb_types::{bytes::Bytes, packed::Script, prelude::*, H256};

use crate::cell::LiveCell;
use crate::config::ScriptsConfig;
use crate::error::{Error, Result};
use crate::skeleton::{SigningEntry, SigningEntryKind, TransactionSkeleton};

/// Appends the messages the anyone-can-pay lock groups must sign.
///
/// A group is headed by the first input of each distinct anyone-can-pay args.
/// Groups receiving at least as much capacity and sUDT amount as they spend
/// need no signature and are skipped. For the others the message is
///
/// ```text
/// blake2b(tx_hash | witness of the head | witnesses of the other group inputs
///         | witnesses without an input)
/// ```
///
/// where each witness is prefixed by its length as a little-endian `u64`.
pub fn prepare_signing_entries(
    mut skeleton: TransactionSkeleton,
    config: &ScriptsConfig,
) -> Result<TransactionSkeleton> {
    let acp = config.anyone_can_pay()?;
    let tx_hash = skeleton.build_transaction().hash();
    let inputs = skeleton.inputs();
    let witnesses = skeleton.witnesses();

    let mut processed_args = HashSet::new();
    let mut entries = Vec::new();
    for (index, input) in inputs.iter().enumerate() {
        let lock = input.lock();
        if !acp.is_acp_script(&lock) || !processed_args.insert(lock.args().raw_data()) {
            continue;
        }

        let (input_capacity, input_amount) = sum_by_lock(inputs, &lock)?;
        let (output_capacity, output_amount) = sum_by_lock(skeleton.outputs(), &lock)?;
        if input_capacity <= output_capacity && input_amount <= output_amount {
            trace!("lock group at input {} only receives, skip", index);
            continue;
        }

        let head_witness = witnesses
            .get(index)
            .ok_or(Error::MissingWitnessForGroup { index })?;
        let mut hasher = new_blake2b();
        hasher.update(tx_hash.as_slice());
        hash_witness(&mut hasher, head_witness);
        for (other, witness) in inputs
            .iter()
            .zip(witnesses.iter())
            .skip(index + 1)
        {
            if other.lock() == lock {
                hash_witness(&mut hasher, witness);
            }
        }
        for witness in witnesses.iter().skip(inputs.len()) {
            hash_witness(&mut hasher, witness);
        }
        let mut message = [0u8; 32];
        hasher.finalize(&mut message);

        let message = H256::from(message);
        debug!("lock group at input {} signs message {:#x}", index, message);
        entries.push(SigningEntry {
            kind: SigningEntryKind::WitnessArgsLock,
            index,
            message,
        });
    }

    for entry in entries {
        skeleton.push_signing_entry(entry);
    }
    Ok(skeleton)
}

fn hash_witness(hasher: &mut Blake2b, witness: &Bytes) {
    hasher.update(&(witness.len() as u64).to_le_bytes());
    hasher.update(witness);
}

fn sum_by_lock(cells: &[LiveCell], lock: &Script) -> Result<(u64, u128)> {
    cells
        .iter()
        .filter(|cell| &cell.lock() == lock)
        .try_fold((0u64, 0u128), |(capacity, amount), cell| {
            Some((
                capacity.checked_add(cell.capacity())?,
                amount.checked_add(cell.udt_amount())?,
            ))
        })
        .ok_or(Error::Overflow)
}
