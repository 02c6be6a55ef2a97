use ckb_types::{
    bytes::Bytes,
    core::Capacity,
    packed::{CellOutput, OutPoint, Script},
    prelude::*,
};

use crate::error::{Error, Result};

/// A live cell: its output, its data and, once on chain, its out point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiveCell {
    pub cell_output: CellOutput,
    pub data: Bytes,
    pub out_point: Option<OutPoint>,
}

impl LiveCell {
    /// Creates a cell which is not on chain yet.
    pub fn new(cell_output: CellOutput, data: Bytes) -> Self {
        LiveCell {
            cell_output,
            data,
            out_point: None,
        }
    }

    pub fn with_out_point(mut self, out_point: OutPoint) -> Self {
        self.out_point = Some(out_point);
        self
    }

    pub fn capacity(&self) -> u64 {
        self.cell_output.capacity().unpack()
    }

    pub fn lock(&self) -> Script {
        self.cell_output.lock()
    }

    pub fn type_(&self) -> Option<Script> {
        self.cell_output.type_().to_opt()
    }

    pub fn set_capacity(&mut self, capacity: u64) {
        self.cell_output = self
            .cell_output
            .clone()
            .as_builder()
            .capacity(capacity.pack())
            .build();
    }

    /// The minimal capacity this cell must hold, derived from its serialized size.
    pub fn occupied_capacity(&self) -> Result<u64> {
        let data_capacity = Capacity::bytes(self.data.len()).map_err(|_| Error::Overflow)?;
        self.cell_output
            .occupied_capacity(data_capacity)
            .map(|capacity| capacity.as_u64())
            .map_err(|_| Error::Overflow)
    }

    /// The sUDT amount carried by the cell data, zero when there is none.
    pub fn udt_amount(&self) -> u128 {
        decode_udt_amount(&self.data).unwrap_or(0)
    }

    /// An output replicating this cell, detached from its out point.
    pub fn pass_through(&self) -> LiveCell {
        LiveCell::new(self.cell_output.clone(), self.data.clone())
    }
}

/// Reads the little-endian `u128` amount at the head of sUDT cell data.
pub fn decode_udt_amount(data: &[u8]) -> Option<u128> {
    let mut buf = [0u8; 16];
    buf.copy_from_slice(data.get(0..16)?);
    Some(u128::from_le_bytes(buf))
}
