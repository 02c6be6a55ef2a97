use ckb_logger::debug;
use ckb_types::{bytes::Bytes, packed::CellOutput, prelude::*};

use crate::address::Address;
use crate::cell::LiveCell;
use crate::collector::first_acp_cell;
use crate::config::ScriptsConfig;
use crate::error::{Error, Result};
use crate::input::setup_input_cell;
use crate::limit::check_limit;
use crate::skeleton::TransactionSkeleton;

/// Moves `capacity` shannons out of the anyone-can-pay cell `from_input` to `to_address`.
///
/// `capacity` must leave the source at least its occupied capacity, or be the
/// whole capacity of the source, in which case no change is left behind. When
/// the destination is an anyone-can-pay lock the payment is merged into its
/// first live cell.
pub fn withdraw(
    mut skeleton: TransactionSkeleton,
    from_input: LiveCell,
    to_address: &Address,
    capacity: u64,
    config: &ScriptsConfig,
) -> Result<TransactionSkeleton> {
    let acp = config.anyone_can_pay()?;
    if !acp.is_acp_script(&from_input.lock()) {
        return Err(Error::NotAcpScript);
    }

    let from_capacity = from_input.capacity();
    let max = from_capacity.saturating_sub(from_input.occupied_capacity()?);
    if capacity > max && capacity != from_capacity {
        return Err(Error::InvalidWithdrawCapacity {
            capacity,
            max,
            total: from_capacity,
        });
    }

    let to_script = to_address.script().clone();
    let mut target = LiveCell::new(
        CellOutput::new_builder()
            .capacity(capacity.pack())
            .lock(to_script.clone())
            .build(),
        Bytes::new(),
    );
    if acp.is_acp_script(&to_script) {
        check_limit(&to_script.args().raw_data(), capacity)?;
        let to_input = first_acp_cell(&skeleton, &to_script, config)?;
        let output_capacity = capacity
            .checked_add(to_input.capacity())
            .ok_or(Error::Overflow)?;
        target.set_capacity(output_capacity);
        skeleton.push_input(to_input);
        skeleton.push_witness(Bytes::new());
    }
    skeleton.push_output(target);

    let mut leftover = from_input.pass_through();
    skeleton = setup_input_cell(skeleton, from_input, None, config)?;
    // the source value is redirected, not preserved
    let last = skeleton.outputs().len() - 1;
    skeleton.remove_output(last);

    if capacity != from_capacity {
        leftover.set_capacity(from_capacity - capacity);
        skeleton.push_output(leftover);
    }
    debug!(
        "withdraw {} of {} shannons to {}",
        capacity, from_capacity, to_address
    );

    Ok(skeleton)
}
