//! Datafeed: the widget's data-source contract and its registry-backed
//! implementation.
//!
//! The widget drives every call. Results come back through callbacks that
//! fire on the tokio runtime after a configurable delay, never synchronously
//! inside the call.

pub mod adapter;
pub mod subscriptions;

pub use adapter::FeedAdapter;
pub use subscriptions::RealtimeSubscriptions;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::bar::ChartBar;
use crate::domain::symbol::SymbolEntry;
use crate::error::FeedError;
use crate::shared::{Resolution, SymbolName};

pub const SYMBOL_TYPE: &str = "crypto";
pub const SESSION: &str = "24x7";
pub const TIMEZONE: &str = "Etc/UTC";
pub const LISTED_EXCHANGE: &str = "Listed exchange";
pub const PRICE_FORMAT: &str = "price";

// ─── Callbacks ───────────────────────────────────────────────────────────────

pub type OnReady = Box<dyn FnOnce(DatafeedConfiguration) + Send>;
pub type OnResolve = Box<dyn FnOnce(SymbolInfo) + Send>;
pub type OnHistory = Box<dyn FnOnce(BarsResult) + Send>;
pub type OnSearch = Box<dyn FnOnce(Vec<SearchSymbolResult>) + Send>;
pub type OnError = Box<dyn FnOnce(FeedError) + Send>;
pub type OnTick = Box<dyn Fn(ChartBar) + Send>;

/// The widget's datafeed contract.
pub trait Datafeed: Send + Sync {
    fn on_ready(&self, callback: OnReady);

    fn resolve_symbol(&self, symbol_name: &str, on_resolve: OnResolve, on_error: OnError);

    fn get_bars(
        &self,
        symbol_info: &SymbolInfo,
        resolution: Resolution,
        period: PeriodParams,
        on_history: OnHistory,
        on_error: OnError,
    );

    /// Start realtime updates for `listener_guid`. A second subscription under
    /// the same GUID replaces the first.
    fn subscribe_bars(
        &self,
        symbol_info: &SymbolInfo,
        resolution: Resolution,
        on_tick: OnTick,
        listener_guid: &str,
    );

    /// Stop realtime updates. No tick is delivered once this returns.
    fn unsubscribe_bars(&self, listener_guid: &str);

    fn search_symbols(
        &self,
        user_input: &str,
        exchange: &str,
        symbol_type: &str,
        on_result: OnSearch,
    );
}

// ─── Payloads ────────────────────────────────────────────────────────────────

/// Capabilities reported by `on_ready`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatafeedConfiguration {
    pub supported_resolutions: Vec<Resolution>,
    pub supports_marks: bool,
    pub supports_timescale_marks: bool,
    pub supports_time: bool,
}

impl Default for DatafeedConfiguration {
    fn default() -> Self {
        Self {
            supported_resolutions: Resolution::SUPPORTED.to_vec(),
            supports_marks: true,
            supports_timescale_marks: true,
            supports_time: true,
        }
    }
}

/// Resolved symbol metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub name: SymbolName,
    pub ticker: SymbolName,
    pub description: String,
    #[serde(rename = "type")]
    pub symbol_type: String,
    pub session: String,
    pub timezone: String,
    pub exchange: String,
    pub listed_exchange: String,
    pub minmov: u32,
    pub pricescale: u64,
    pub has_intraday: bool,
    pub supported_resolutions: Vec<Resolution>,
    pub format: String,
}

impl SymbolInfo {
    /// Metadata for a registry entry; the scale follows its latest close.
    pub fn from_entry(entry: &SymbolEntry) -> Self {
        Self {
            name: entry.name.clone(),
            ticker: entry.name.clone(),
            description: entry.description.clone(),
            symbol_type: SYMBOL_TYPE.to_string(),
            session: SESSION.to_string(),
            timezone: TIMEZONE.to_string(),
            exchange: entry.exchange.clone(),
            listed_exchange: LISTED_EXCHANGE.to_string(),
            minmov: 1,
            pricescale: entry.price_scale(),
            has_intraday: true,
            supported_resolutions: Resolution::SUPPORTED.to_vec(),
            format: PRICE_FORMAT.to_string(),
        }
    }
}

/// History request window. `from`/`to` are Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodParams {
    pub from: i64,
    pub to: i64,
    #[serde(default)]
    pub count_back: Option<u32>,
    #[serde(default)]
    pub first_data_request: bool,
}

impl PeriodParams {
    pub fn new(from: i64, to: i64) -> Self {
        Self {
            from,
            to,
            count_back: None,
            first_data_request: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryMetadata {
    pub no_data: bool,
}

/// `get_bars` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarsResult {
    pub bars: Vec<ChartBar>,
    pub meta: HistoryMetadata,
}

impl BarsResult {
    pub fn new(bars: Vec<ChartBar>) -> Self {
        let no_data = bars.is_empty();
        Self {
            bars,
            meta: HistoryMetadata { no_data },
        }
    }
}

/// A symbol offered by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSymbol {
    pub symbol: String,
    pub full_name: String,
    #[serde(default)]
    pub description: String,
}

impl SearchSymbol {
    pub fn new(
        symbol: impl Into<String>,
        full_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            full_name: full_name.into(),
            description: description.into(),
        }
    }
}

/// Search hit returned to the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSymbolResult {
    pub symbol: String,
    pub full_name: String,
    pub description: String,
    pub exchange: String,
    #[serde(rename = "type")]
    pub symbol_type: String,
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Callback timing for [`FeedAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Delay before a resolved symbol is delivered.
    pub resolve_delay: Duration,
    /// Delay before a history batch is delivered.
    pub bars_delay: Duration,
    /// Period of realtime re-emission of the latest bar.
    pub realtime_interval: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            resolve_delay: Duration::ZERO,
            bars_delay: Duration::from_millis(50),
            realtime_interval: Duration::from_secs(10),
        }
    }
}

impl FeedConfig {
    pub fn resolve_delay(mut self, delay: Duration) -> Self {
        self.resolve_delay = delay;
        self
    }

    pub fn bars_delay(mut self, delay: Duration) -> Self {
        self.bars_delay = delay;
        self
    }

    pub fn realtime_interval(mut self, interval: Duration) -> Self {
        self.realtime_interval = interval;
        self
    }
}
