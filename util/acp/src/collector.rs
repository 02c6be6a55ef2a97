use std::sync::Arc;

use ckb_logger::trace;
use ckb_types::packed::Script;

use crate::address::Address;
use crate::cell::LiveCell;
use crate::config::ScriptsConfig;
use crate::error::{Error, Result};
use crate::provider::{CellIter, CellProvider, CellQueryOptions, TypeFilter};
use crate::skeleton::TransactionSkeleton;

/// Collects the live cells of one anyone-can-pay lock.
///
/// By default only cells without a type script are returned. When the lock is
/// not an anyone-can-pay lock nothing is returned, so this path can never
/// gather cells of other locks.
#[derive(Clone)]
pub struct AcpCellCollector {
    from_script: Script,
    is_acp: bool,
    query: CellQueryOptions,
    provider: Arc<dyn CellProvider>,
}

impl AcpCellCollector {
    pub fn new(
        from_script: Script,
        provider: Arc<dyn CellProvider>,
        config: &ScriptsConfig,
    ) -> Self {
        let is_acp = config
            .anyone_can_pay()
            .map(|acp| acp.is_acp_script(&from_script))
            .unwrap_or(false);
        let query = CellQueryOptions::new(from_script.clone()).type_filter(TypeFilter::Empty);
        AcpCellCollector {
            from_script,
            is_acp,
            query,
            provider,
        }
    }

    /// Collects the cells of the lock behind `address`.
    pub fn from_address(
        address: &Address,
        provider: Arc<dyn CellProvider>,
        config: &ScriptsConfig,
    ) -> Self {
        Self::new(address.script().clone(), provider, config)
    }

    /// Uses the cell provider attached to `skeleton`.
    pub fn from_skeleton(
        skeleton: &TransactionSkeleton,
        from_script: Script,
        config: &ScriptsConfig,
    ) -> Result<Self> {
        let provider = skeleton
            .get_cell_provider()
            .cloned()
            .ok_or(Error::MissingCellProvider)?;
        Ok(Self::new(from_script, provider, config))
    }

    /// Overrides the default "no type script" filter.
    pub fn type_filter(mut self, type_filter: TypeFilter) -> Self {
        self.query = self.query.type_filter(type_filter);
        self
    }

    pub fn from_script(&self) -> &Script {
        &self.from_script
    }

    pub fn collect(&self) -> CellIter<'_> {
        if !self.is_acp {
            trace!("skip collecting cells of non anyone-can-pay lock {}", self.from_script);
            return Box::new(std::iter::empty());
        }
        self.provider.collect_cells(&self.query)
    }
}

/// Takes the first anyone-can-pay cell of `lock`, the one a payment merges into.
pub(crate) fn first_acp_cell(
    skeleton: &TransactionSkeleton,
    lock: &Script,
    config: &ScriptsConfig,
) -> Result<LiveCell> {
    let collector = AcpCellCollector::from_skeleton(skeleton, lock.clone(), config)?;
    let first = collector.collect().next().transpose()?;
    first.ok_or(Error::NoAcpInputFound)
}
