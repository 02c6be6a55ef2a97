use std::collections::HashSet;

use ckb_logger::{debug, trace};
use ckb_types::{bytes::Bytes, packed, prelude::*};

use crate::cell::LiveCell;
use crate::collector::AcpCellCollector;
use crate::config::ScriptsConfig;
use crate::error::{Error, Result};
use crate::input::setup_input_cell;
use crate::skeleton::TransactionSkeleton;

/// Raises `capacity` shannons from the collector's lock for the payment at
/// `output_index`, which must point at an existing output.
///
/// First the free capacity of outputs of the same lock placed after the last
/// fixed output is reclaimed, each keeping its occupied capacity. If that is
/// not enough, new cells are pulled from `collector` and whatever they carry
/// beyond the need goes to a single change output.
///
/// Outputs at or before the last fixed output are never reclaimed even when
/// they belong to the payer and are not fixed themselves.
pub fn inject_capacity(
    collector: &AcpCellCollector,
    mut skeleton: TransactionSkeleton,
    output_index: usize,
    capacity: u64,
    config: &ScriptsConfig,
) -> Result<TransactionSkeleton> {
    let outputs_len = skeleton.outputs().len();
    if output_index >= outputs_len {
        return Err(Error::InvalidOutputIndex {
            index: output_index,
            len: outputs_len,
        });
    }
    config.anyone_can_pay()?;
    let from_script = collector.from_script().clone();

    let start = skeleton.last_fixed_output().map_or(0, |index| index + 1);
    let mut capacity = reclaim(&mut skeleton, start, &from_script, capacity)?;
    if capacity == 0 {
        return Ok(skeleton);
    }

    let mut change = LiveCell::new(
        packed::CellOutput::new_builder().lock(from_script).build(),
        Bytes::new(),
    );
    let min_change_capacity = change.occupied_capacity()?;
    let mut change_capacity = 0u64;
    let mut change_index = None;

    let previous_inputs: HashSet<packed::OutPoint> = skeleton
        .inputs()
        .iter()
        .filter_map(|cell| cell.out_point.clone())
        .collect();

    for input_cell in collector.collect() {
        let input_cell = input_cell?;
        if input_cell
            .out_point
            .as_ref()
            .map_or(false, |out_point| previous_inputs.contains(out_point))
        {
            continue;
        }

        let input_capacity = input_cell.capacity();
        skeleton = setup_input_cell(skeleton, input_cell, None, config)?;
        // keep the raw capacity, drop the replica
        let last = skeleton.outputs().len() - 1;
        skeleton.remove_output(last);

        let deduct = input_capacity.min(capacity);
        capacity -= deduct;
        change_capacity = change_capacity
            .checked_add(input_capacity - deduct)
            .ok_or(Error::Overflow)?;
        trace!(
            "pulled {} shannons, {} still required, change {}",
            input_capacity,
            capacity,
            change_capacity
        );
        if capacity == 0 && change_capacity >= min_change_capacity {
            break;
        }
        change.set_capacity(change_capacity);
        upsert_output(&mut skeleton, &mut change_index, change.clone());
    }

    if capacity > 0 {
        return Err(Error::InsufficientFunds {
            remaining: capacity,
        });
    }
    if change_capacity < min_change_capacity {
        return Err(Error::InsufficientFunds {
            remaining: min_change_capacity - change_capacity,
        });
    }
    change.set_capacity(change_capacity);
    upsert_output(&mut skeleton, &mut change_index, change);

    Ok(skeleton)
}

/// Shrinks outputs of `lock` from `start` on, returns what is still required.
fn reclaim(
    skeleton: &mut TransactionSkeleton,
    start: usize,
    lock: &packed::Script,
    mut capacity: u64,
) -> Result<u64> {
    let required = capacity;
    for output in skeleton.outputs_mut().iter_mut().skip(start) {
        if capacity == 0 {
            break;
        }
        if &output.lock() != lock {
            continue;
        }
        let cell_capacity = output.capacity();
        let available = cell_capacity.saturating_sub(output.occupied_capacity()?);
        let deduct = available.min(capacity);
        capacity -= deduct;
        output.set_capacity(cell_capacity - deduct);
    }

    let mut index = start;
    while index < skeleton.outputs().len() {
        if skeleton.outputs()[index].capacity() == 0 {
            skeleton.remove_output(index);
        } else {
            index += 1;
        }
    }
    debug!(
        "reclaimed {} of {} shannons from existing outputs",
        required - capacity,
        required
    );
    Ok(capacity)
}

fn upsert_output(skeleton: &mut TransactionSkeleton, slot: &mut Option<usize>, cell: LiveCell) {
    match *slot {
        Some(index) => skeleton.outputs_mut()[index] = cell,
        None => *slot = Some(skeleton.push_output(cell)),
    }
}
