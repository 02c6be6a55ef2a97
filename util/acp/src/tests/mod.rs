mod config;
mod inject;

use std::sync::Arc;

use ckb_jsonrpc_types::{DepType, ScriptHashType};
use ckb_types::{
    bytes::Bytes,
    core, h256,
    packed::{Byte32, CellOutput, OutPoint, Script},
    prelude::*,
};

use crate::{AcpConfig, CellProvider, LiveCell, MemoryCellProvider, ScriptsConfig};

pub(crate) const ONE_CKB: u64 = 100_000_000;

pub(crate) fn ckb(amount: u64) -> u64 {
    amount * ONE_CKB
}

pub(crate) fn scripts_config() -> ScriptsConfig {
    ScriptsConfig::new(AcpConfig {
        code_hash: h256!("0x3419a1c09eb2567f6552ee7a8ecffd64155cffe0f1796e6e61ec088d740c1356"),
        hash_type: ScriptHashType::Type,
        tx_hash: h256!("0xec26b0f85ed839ece5f11c4c4e837ec359f5adc4420410f6453b1f6b60fb96a6"),
        index: 0,
        dep_type: DepType::DepGroup,
    })
}

/// An anyone-can-pay lock owned by `owner`, args `[owner; 20] | limits`.
pub(crate) fn acp_lock(owner: u8, limits: &[u8]) -> Script {
    let mut args = vec![owner; 20];
    args.extend_from_slice(limits);
    scripts_config()
        .anyone_can_pay()
        .unwrap()
        .script(Bytes::from(args))
}

pub(crate) fn secp_lock(owner: u8) -> Script {
    Script::new_builder()
        .code_hash(
            h256!("0x9bd7e06f3ecf4be0f2fcd2188b23f1b9fcc88e5d4b65a8637b17723bbda3cce8").pack(),
        )
        .hash_type(core::ScriptHashType::Type.into())
        .args(Bytes::from(vec![owner; 20]).pack())
        .build()
}

pub(crate) fn out_point(tx: u8, index: u32) -> OutPoint {
    OutPoint::new(Byte32::new([tx; 32]), index)
}

pub(crate) fn output_cell(lock: Script, capacity: u64) -> LiveCell {
    LiveCell::new(
        CellOutput::new_builder()
            .capacity(capacity.pack())
            .lock(lock)
            .build(),
        Bytes::new(),
    )
}

pub(crate) fn live_cell(lock: Script, capacity: u64, tx: u8) -> LiveCell {
    output_cell(lock, capacity).with_out_point(out_point(tx, 0))
}

pub(crate) fn udt_cell(lock: Script, capacity: u64, amount: u128, tx: u8) -> LiveCell {
    let udt_type = Script::new_builder()
        .code_hash(Byte32::new([0xaa; 32]))
        .hash_type(core::ScriptHashType::Data1.into())
        .args(Bytes::from(vec![0xbb; 32]).pack())
        .build();
    LiveCell::new(
        CellOutput::new_builder()
            .capacity(capacity.pack())
            .lock(lock)
            .type_(Some(udt_type).pack())
            .build(),
        Bytes::from(amount.to_le_bytes().to_vec()),
    )
    .with_out_point(out_point(tx, 0))
}

pub(crate) fn provider(cells: Vec<LiveCell>) -> Arc<dyn CellProvider> {
    Arc::new(MemoryCellProvider::new(cells))
}
