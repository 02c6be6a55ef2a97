//! Cell queries by lock script.

use ckb_types::packed::Script;

use crate::cell::LiveCell;
use crate::error::Result;

/// A lazily evaluated stream of cells. Dropping it abandons the query.
pub type CellIter<'a> = Box<dyn Iterator<Item = Result<LiveCell>> + 'a>;

/// Which type scripts a query accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TypeFilter {
    /// Any type script, or none.
    #[default]
    Any,
    /// Only cells without a type script.
    Empty,
    /// Only cells with exactly this type script.
    Script(Script),
}

impl TypeFilter {
    pub fn matches(&self, type_: Option<&Script>) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::Empty => type_.is_none(),
            TypeFilter::Script(script) => type_ == Some(script),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellQueryOptions {
    pub lock: Script,
    pub type_filter: TypeFilter,
}

impl CellQueryOptions {
    pub fn new(lock: Script) -> Self {
        CellQueryOptions {
            lock,
            type_filter: TypeFilter::default(),
        }
    }

    pub fn type_filter(mut self, type_filter: TypeFilter) -> Self {
        self.type_filter = type_filter;
        self
    }

    pub fn matches(&self, cell: &LiveCell) -> bool {
        cell.lock() == self.lock && self.type_filter.matches(cell.type_().as_ref())
    }
}

/// The source of live cells.
///
/// Implementations must yield cells in a stable order for a given chain state.
/// Query failures are reported through the items as `Error::CellProvider`.
pub trait CellProvider: Send + Sync {
    fn collect_cells(&self, query: &CellQueryOptions) -> CellIter<'_>;
}

/// Keeps cells in memory and answers queries in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryCellProvider {
    cells: Vec<LiveCell>,
}

impl MemoryCellProvider {
    pub fn new(cells: Vec<LiveCell>) -> Self {
        MemoryCellProvider { cells }
    }

    pub fn push(&mut self, cell: LiveCell) {
        self.cells.push(cell);
    }
}

impl CellProvider for MemoryCellProvider {
    fn collect_cells(&self, query: &CellQueryOptions) -> CellIter<'_> {
        let query = query.clone();
        Box::new(
            self.cells
                .iter()
                .filter(move |cell| query.matches(cell))
                .cloned()
                .map(Ok),
        )
    }
}
