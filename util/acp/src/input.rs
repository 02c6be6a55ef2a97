use ckb_logger::debug;
use ckb_types::{bytes::Bytes, packed::WitnessArgs, prelude::*};

use crate::cell::LiveCell;
use crate::config::ScriptsConfig;
use crate::error::{Error, Result};
use crate::skeleton::{FixedEntry, TransactionSkeleton};

/// Length of a recoverable secp256k1 signature.
pub const SECP_SIGNATURE_SIZE: usize = 65;

/// The zero filled `lock` field reserved for the group signature.
pub fn secp_signature_placeholder() -> Bytes {
    Bytes::from(vec![0u8; SECP_SIGNATURE_SIZE])
}

/// Attaches an anyone-can-pay cell as an input.
///
/// Besides the input itself this pushes an empty witness, a fixed output
/// replicating the cell, and the script cell dep. The witness of the first
/// input with the same lock gets the signature placeholder in its `lock`
/// field, keeping its `input_type` and `output_type`.
pub fn setup_input_cell(
    skeleton: TransactionSkeleton,
    input_cell: LiveCell,
    since: Option<u64>,
    config: &ScriptsConfig,
) -> Result<TransactionSkeleton> {
    setup_input_cell_with_witness(skeleton, input_cell, since, Bytes::new(), config)
}

/// Like [`setup_input_cell`], pushing `default_witness` for the new input.
///
/// When the input heads its lock group the witness must decode as
/// `WitnessArgs`, it then receives the signature placeholder.
pub fn setup_input_cell_with_witness(
    mut skeleton: TransactionSkeleton,
    input_cell: LiveCell,
    since: Option<u64>,
    default_witness: Bytes,
    config: &ScriptsConfig,
) -> Result<TransactionSkeleton> {
    let acp = config.anyone_can_pay()?;
    let input_lock = input_cell.lock();
    if !acp.is_acp_script(&input_lock) {
        return Err(Error::NotAcpScript);
    }

    let output = input_cell.pass_through();
    let input_index = skeleton.push_input(input_cell);
    if let Some(since) = since {
        skeleton.set_input_since(input_index, since);
    }
    skeleton.push_witness(default_witness);
    let output_index = skeleton.push_output(output);
    skeleton.push_fixed_entry(FixedEntry::output(output_index));
    skeleton.add_cell_dep(acp.cell_dep());

    let first_index = skeleton
        .inputs()
        .iter()
        .position(|cell| cell.lock() == input_lock)
        .unwrap_or(input_index);
    skeleton.pad_witnesses(first_index);
    let witness = reserve_signature(&skeleton.witnesses()[first_index], first_index)?;
    skeleton.set_witness(first_index, witness.as_bytes());
    debug!(
        "attach anyone-can-pay input {}, group witness at {}",
        input_index, first_index
    );

    Ok(skeleton)
}

fn reserve_signature(witness: &Bytes, index: usize) -> Result<WitnessArgs> {
    let placeholder = secp_signature_placeholder();
    let mut builder = WitnessArgs::new_builder();
    if !witness.is_empty() {
        let witness_args = WitnessArgs::from_slice(witness)?;
        if let Some(lock) = witness_args.lock().to_opt() {
            if lock.raw_data() != placeholder {
                return Err(Error::LockFieldReserved { index });
            }
        }
        builder = builder
            .input_type(witness_args.input_type())
            .output_type(witness_args.output_type());
    }
    Ok(builder.lock(Some(placeholder).pack()).build())
}
