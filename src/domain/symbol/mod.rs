//! Symbol domain: chartable series and the registry that owns them.

pub mod state;

pub use state::{SharedRegistry, SymbolRegistry};

use crate::domain::bar::{latest_close, Bar};
use crate::shared::{price_scale, SymbolName};

/// A chartable series: the main token or a comparison overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolEntry {
    pub name: SymbolName,
    pub description: String,
    pub exchange: String,
    pub bars: Vec<Bar>,
}

impl SymbolEntry {
    pub fn new(
        name: impl Into<SymbolName>,
        description: impl Into<String>,
        exchange: impl Into<String>,
        bars: Vec<Bar>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            exchange: exchange.into(),
            bars,
        }
    }

    pub fn latest_bar(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Close of the latest bar, `0.0` when there are no bars.
    pub fn latest_close(&self) -> f64 {
        latest_close(&self.bars)
    }

    /// Axis scale derived from the latest close.
    pub fn price_scale(&self) -> u64 {
        price_scale(self.latest_close())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::DEFAULT_PRICE_SCALE;

    fn bar(time: i64, close: f64) -> Bar {
        Bar {
            time,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }

    #[test]
    fn test_empty_series_uses_default_scale() {
        let entry = SymbolEntry::new("PEPE", "Pepe / SOL", "Raydium", vec![]);
        assert!(entry.latest_bar().is_none());
        assert_eq!(entry.latest_close(), 0.0);
        assert_eq!(entry.price_scale(), DEFAULT_PRICE_SCALE);
    }

    #[test]
    fn test_scale_follows_latest_close() {
        let entry = SymbolEntry::new(
            "PEPE",
            "Pepe / SOL",
            "Raydium",
            vec![bar(1, 2.0), bar(2, 0.000000031)],
        );
        assert_eq!(entry.latest_bar().map(|b| b.time), Some(2));
        assert_eq!(entry.price_scale(), 10_000_000_000);
    }
}
