use ckb_logger::debug;
use ckb_types::bytes::Bytes;

use crate::cell::LiveCell;
use crate::collector::first_acp_cell;
use crate::config::ScriptsConfig;
use crate::error::{Error, Result};
use crate::limit::check_limit;
use crate::skeleton::TransactionSkeleton;

/// Pays `output_cell` into the receiver's existing anyone-can-pay cell.
///
/// The receiver's first cell is consumed as an input and `output_cell` is
/// pushed with that cell's capacity added. The payer is not debited here,
/// see [`inject_capacity`](crate::inject_capacity).
pub fn setup_output_cell(
    mut skeleton: TransactionSkeleton,
    mut output_cell: LiveCell,
    config: &ScriptsConfig,
) -> Result<TransactionSkeleton> {
    let acp = config.anyone_can_pay()?;
    let to_script = output_cell.lock();
    let capacity = output_cell.capacity();
    check_limit(&to_script.args().raw_data(), capacity)?;

    let to_input = first_acp_cell(&skeleton, &to_script, config)?;
    let output_capacity = capacity
        .checked_add(to_input.capacity())
        .ok_or(Error::Overflow)?;
    output_cell.set_capacity(output_capacity);
    debug!(
        "merge payment of {} shannons into anyone-can-pay cell holding {}",
        capacity,
        to_input.capacity()
    );

    skeleton.push_output(output_cell);
    skeleton.push_input(to_input);
    skeleton.push_witness(Bytes::new());
    skeleton.add_cell_dep(acp.cell_dep());

    Ok(skeleton)
}
