//! The partially built transaction threaded through every assembly step.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use ckb_types::{
    bytes::Bytes,
    core::{TransactionBuilder, TransactionView},
    packed::{self, CellInput, OutPoint},
    prelude::*,
    H256,
};

use crate::cell::LiveCell;
use crate::error::{Error, Result};
use crate::provider::CellProvider;

/// The skeleton field a fixed entry protects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkeletonField {
    Inputs,
    Outputs,
    CellDeps,
    HeaderDeps,
    Witnesses,
}

/// A position later steps must neither reorder nor alter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedEntry {
    pub field: SkeletonField,
    pub index: usize,
}

impl FixedEntry {
    pub fn output(index: usize) -> Self {
        FixedEntry {
            field: SkeletonField::Outputs,
            index,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SigningEntryKind {
    /// The signature goes to the `lock` field of the `WitnessArgs` at `index`.
    WitnessArgsLock,
}

/// A message the owner of a lock group must sign.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningEntry {
    pub kind: SigningEntryKind,
    pub index: usize,
    pub message: H256,
}

/// An owned, partially built transaction.
///
/// Witnesses are raw bytes, empty ones stand for `0x`. The witness list may be
/// shorter than the input list.
#[derive(Clone, Default)]
pub struct TransactionSkeleton {
    inputs: Vec<LiveCell>,
    input_sinces: BTreeMap<usize, u64>,
    outputs: Vec<LiveCell>,
    witnesses: Vec<Bytes>,
    cell_deps: Vec<packed::CellDep>,
    header_deps: Vec<packed::Byte32>,
    fixed_entries: Vec<FixedEntry>,
    signing_entries: Vec<SigningEntry>,
    cell_provider: Option<Arc<dyn CellProvider>>,
}

impl fmt::Debug for TransactionSkeleton {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TransactionSkeleton")
            .field("inputs", &self.inputs)
            .field("input_sinces", &self.input_sinces)
            .field("outputs", &self.outputs)
            .field("witnesses", &self.witnesses)
            .field("cell_deps", &self.cell_deps)
            .field("header_deps", &self.header_deps)
            .field("fixed_entries", &self.fixed_entries)
            .field("signing_entries", &self.signing_entries)
            .field("cell_provider", &self.cell_provider.is_some())
            .finish()
    }
}

impl TransactionSkeleton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell_provider(mut self, provider: Arc<dyn CellProvider>) -> Self {
        self.cell_provider = Some(provider);
        self
    }

    pub fn input(mut self, cell: LiveCell) -> Self {
        self.inputs.push(cell);
        self
    }

    pub fn input_since(mut self, index: usize, since: u64) -> Self {
        self.input_sinces.insert(index, since);
        self
    }

    pub fn output(mut self, cell: LiveCell) -> Self {
        self.outputs.push(cell);
        self
    }

    pub fn witness(mut self, witness: Bytes) -> Self {
        self.witnesses.push(witness);
        self
    }

    pub fn cell_dep(mut self, cell_dep: packed::CellDep) -> Self {
        self.add_cell_dep(cell_dep);
        self
    }

    pub fn header_dep(mut self, block_hash: packed::Byte32) -> Self {
        self.header_deps.push(block_hash);
        self
    }

    pub fn fixed_entry(mut self, entry: FixedEntry) -> Self {
        self.fixed_entries.push(entry);
        self
    }

    pub fn inputs(&self) -> &[LiveCell] {
        &self.inputs
    }

    pub fn since_of(&self, index: usize) -> Option<u64> {
        self.input_sinces.get(&index).copied()
    }

    pub fn outputs(&self) -> &[LiveCell] {
        &self.outputs
    }

    pub fn witnesses(&self) -> &[Bytes] {
        &self.witnesses
    }

    pub fn cell_deps(&self) -> &[packed::CellDep] {
        &self.cell_deps
    }

    pub fn header_deps(&self) -> &[packed::Byte32] {
        &self.header_deps
    }

    pub fn fixed_entries(&self) -> &[FixedEntry] {
        &self.fixed_entries
    }

    pub fn signing_entries(&self) -> &[SigningEntry] {
        &self.signing_entries
    }

    pub fn get_cell_provider(&self) -> Option<&Arc<dyn CellProvider>> {
        self.cell_provider.as_ref()
    }

    pub fn inputs_capacity(&self) -> Result<u64> {
        sum_capacity(&self.inputs)
    }

    pub fn outputs_capacity(&self) -> Result<u64> {
        sum_capacity(&self.outputs)
    }

    /// Index of the last fixed output, everything up to it is frozen.
    pub fn last_fixed_output(&self) -> Option<usize> {
        self.fixed_entries
            .iter()
            .filter(|entry| entry.field == SkeletonField::Outputs)
            .map(|entry| entry.index)
            .max()
    }

    /// Builds the transaction the skeleton describes.
    ///
    /// Inputs without an out point are encoded as the null out point.
    pub fn build_transaction(&self) -> TransactionView {
        let inputs = self.inputs.iter().enumerate().map(|(index, cell)| {
            let previous_output = cell.out_point.clone().unwrap_or_else(OutPoint::null);
            CellInput::new(previous_output, self.since_of(index).unwrap_or(0))
        });
        TransactionBuilder::default()
            .cell_deps(self.cell_deps.clone())
            .header_deps(self.header_deps.clone())
            .inputs(inputs)
            .outputs(self.outputs.iter().map(|cell| cell.cell_output.clone()))
            .outputs_data(self.outputs.iter().map(|cell| cell.data.pack()))
            .witnesses(self.witnesses.iter().map(|witness| witness.pack()))
            .build()
    }

    pub(crate) fn push_input(&mut self, cell: LiveCell) -> usize {
        self.inputs.push(cell);
        self.inputs.len() - 1
    }

    pub(crate) fn set_input_since(&mut self, index: usize, since: u64) {
        self.input_sinces.insert(index, since);
    }

    pub(crate) fn push_output(&mut self, cell: LiveCell) -> usize {
        self.outputs.push(cell);
        self.outputs.len() - 1
    }

    pub(crate) fn outputs_mut(&mut self) -> &mut Vec<LiveCell> {
        &mut self.outputs
    }

    pub(crate) fn push_witness(&mut self, witness: Bytes) {
        self.witnesses.push(witness);
    }

    /// Grows the witnesses with empty entries until `index` is addressable.
    pub(crate) fn pad_witnesses(&mut self, index: usize) {
        if self.witnesses.len() <= index {
            self.witnesses.resize(index + 1, Bytes::new());
        }
    }

    pub(crate) fn set_witness(&mut self, index: usize, witness: Bytes) {
        self.pad_witnesses(index);
        self.witnesses[index] = witness;
    }

    pub(crate) fn push_fixed_entry(&mut self, entry: FixedEntry) {
        self.fixed_entries.push(entry);
    }

    pub(crate) fn add_cell_dep(&mut self, cell_dep: packed::CellDep) {
        if !self.cell_deps.contains(&cell_dep) {
            self.cell_deps.push(cell_dep);
        }
    }

    /// Removes the output at `index` together with the fixed entry guarding it.
    pub(crate) fn remove_output(&mut self, index: usize) -> LiveCell {
        let removed = self.outputs.remove(index);
        if let Some(position) = self
            .fixed_entries
            .iter()
            .position(|entry| *entry == FixedEntry::output(index))
        {
            self.fixed_entries.remove(position);
        }
        removed
    }

    pub(crate) fn push_signing_entry(&mut self, entry: SigningEntry) {
        self.signing_entries.push(entry);
    }
}

fn sum_capacity(cells: &[LiveCell]) -> Result<u64> {
    cells
        .iter()
        .try_fold(0u64, |sum, cell| sum.checked_add(cell.capacity()))
        .ok_or(Error::Overflow)
}
