use ckb_types::bytes::Bytes;

use super::{acp_lock, ckb, live_cell, output_cell, provider, scripts_config, secp_lock};
use crate::collector::AcpCellCollector;
use crate::error::Error;
use crate::inject::inject_capacity;
use crate::input::setup_input_cell;
use crate::skeleton::{FixedEntry, TransactionSkeleton};
use crate::LiveCell;

fn collector_of(cells: Vec<LiveCell>) -> AcpCellCollector {
    AcpCellCollector::new(acp_lock(1, &[]), provider(cells), &scripts_config())
}

#[test]
fn reclaim_from_existing_output() {
    let payer = acp_lock(1, &[]);
    let skeleton = TransactionSkeleton::new()
        .output(output_cell(secp_lock(9), ckb(30)))
        .output(output_cell(payer.clone(), ckb(101)));

    let skeleton =
        inject_capacity(&collector_of(vec![]), skeleton, 0, ckb(30), &scripts_config()).unwrap();
    assert_eq!(
        skeleton.outputs(),
        &[
            output_cell(secp_lock(9), ckb(30)),
            output_cell(payer, ckb(71)),
        ]
    );
    assert!(skeleton.inputs().is_empty());
}

#[test]
fn leave_fixed_outputs_untouched() {
    let config = scripts_config();
    let payer = acp_lock(1, &[]);
    let attached = live_cell(payer.clone(), ckb(200), 1);
    let fresh = live_cell(payer.clone(), ckb(100), 2);
    let skeleton = setup_input_cell(TransactionSkeleton::new(), attached.clone(), None, &config)
        .unwrap()
        .output(output_cell(secp_lock(9), ckb(30)));

    let collector = collector_of(vec![attached.clone(), fresh.clone()]);
    let skeleton = inject_capacity(&collector, skeleton, 1, ckb(30), &config).unwrap();

    assert_eq!(skeleton.inputs(), &[attached.clone(), fresh]);
    assert_eq!(
        skeleton.outputs(),
        &[
            attached.pass_through(),
            output_cell(secp_lock(9), ckb(30)),
            output_cell(payer, ckb(70)),
        ]
    );
    assert_eq!(skeleton.fixed_entries(), &[FixedEntry::output(0)]);
    assert_eq!(
        skeleton.inputs_capacity().unwrap(),
        skeleton.outputs_capacity().unwrap()
    );
}

#[test]
fn drop_empty_outputs() {
    let payer = acp_lock(1, &[]);
    let skeleton = TransactionSkeleton::new()
        .output(output_cell(secp_lock(9), ckb(30)))
        .output(output_cell(payer.clone(), 0));

    let collector = collector_of(vec![live_cell(payer.clone(), ckb(100), 1)]);
    let skeleton = inject_capacity(&collector, skeleton, 0, ckb(30), &scripts_config()).unwrap();
    assert_eq!(
        skeleton.outputs(),
        &[
            output_cell(secp_lock(9), ckb(30)),
            output_cell(payer, ckb(70)),
        ]
    );
}

#[test]
fn pull_cells_until_satisfied() {
    let config = scripts_config();
    let payer = acp_lock(1, &[]);
    let first = live_cell(payer.clone(), ckb(100), 1);
    let second = live_cell(payer.clone(), ckb(200), 2);
    let unused = live_cell(payer.clone(), ckb(300), 3);
    let skeleton = TransactionSkeleton::new().output(output_cell(secp_lock(9), ckb(150)));

    let collector = collector_of(vec![first.clone(), second.clone(), unused]);
    let skeleton = inject_capacity(&collector, skeleton, 0, ckb(150), &config).unwrap();

    assert_eq!(skeleton.inputs(), &[first, second]);
    assert_eq!(
        skeleton.outputs(),
        &[
            output_cell(secp_lock(9), ckb(150)),
            output_cell(payer.clone(), ckb(150)),
        ]
    );
    assert_eq!(skeleton.witnesses().len(), 2);
    assert_eq!(skeleton.witnesses()[1], Bytes::new());
    assert!(skeleton.fixed_entries().is_empty());
    assert_eq!(
        skeleton.inputs_capacity().unwrap(),
        skeleton.outputs_capacity().unwrap()
    );
    for output in skeleton.outputs().iter().filter(|cell| cell.lock() == payer) {
        assert!(output.capacity() >= output.occupied_capacity().unwrap());
    }
}

#[test]
fn report_missing_capacity() {
    let payer = acp_lock(1, &[]);
    let skeleton = TransactionSkeleton::new().output(output_cell(secp_lock(9), ckb(150)));
    let collector = collector_of(vec![live_cell(payer, ckb(100), 1)]);

    let result = inject_capacity(&collector, skeleton, 0, ckb(150), &scripts_config());
    assert_eq!(
        result.unwrap_err(),
        Error::InsufficientFunds {
            remaining: ckb(50)
        }
    );
}

#[test]
fn report_change_below_occupied() {
    let payer = acp_lock(1, &[]);
    let skeleton = TransactionSkeleton::new().output(output_cell(secp_lock(9), ckb(60)));
    let collector = collector_of(vec![live_cell(payer, ckb(100), 1)]);

    let result = inject_capacity(&collector, skeleton, 0, ckb(60), &scripts_config());
    assert_eq!(
        result.unwrap_err(),
        Error::InsufficientFunds {
            remaining: ckb(21)
        }
    );
}

#[test]
fn reject_invalid_output_index() {
    let skeleton = TransactionSkeleton::new().output(output_cell(secp_lock(9), ckb(60)));
    let result = inject_capacity(&collector_of(vec![]), skeleton, 1, ckb(60), &scripts_config());
    assert_eq!(
        result.unwrap_err(),
        Error::InvalidOutputIndex { index: 1, len: 1 }
    );
}
