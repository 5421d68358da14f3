//! Compare domain: overlay data and the symbol-picker dialog.

pub mod dialog;

pub use dialog::{CompareDialog, DropdownStatus};

use std::future::Future;

use crate::domain::bar::Bar;
use crate::error::ChartError;
use crate::shared::SymbolName;

/// Series data for a comparison overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareData {
    pub bars: Vec<Bar>,
    pub symbol_name: SymbolName,
    pub description: String,
}

/// Host-supplied lookup of comparison series by token address.
pub trait CompareDataProvider {
    fn fetch_compare(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<CompareData, ChartError>> + Send;
}

/// Placeholder provider for charts without comparison support.
///
/// Every fetch fails with [`CompareError::Unavailable`](crate::error::CompareError).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompare;

impl CompareDataProvider for NoCompare {
    fn fetch_compare(
        &self,
        _address: &str,
    ) -> impl Future<Output = Result<CompareData, ChartError>> + Send {
        std::future::ready(Err(crate::error::CompareError::Unavailable.into()))
    }
}
