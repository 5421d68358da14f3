//! Registry-backed datafeed.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use super::subscriptions::{lock_flag, ActiveFlag, RealtimeSubscription};
use super::{
    BarsResult, Datafeed, DatafeedConfiguration, FeedConfig, OnError, OnHistory, OnReady,
    OnResolve, OnSearch, OnTick, PeriodParams, RealtimeSubscriptions, SearchSymbol,
    SearchSymbolResult, SymbolInfo, SYMBOL_TYPE,
};
use crate::domain::bar::{bars_in_window, ChartBar};
use crate::domain::symbol::SharedRegistry;
use crate::error::FeedError;
use crate::shared::{Resolution, SymbolName};

/// Serves the widget from a shared [`SymbolRegistry`](crate::domain::symbol::SymbolRegistry).
///
/// Cheap to clone; clones share the registry and the realtime table. Must be
/// created inside a tokio runtime, which it uses to deliver callbacks.
#[derive(Clone)]
pub struct FeedAdapter {
    registry: SharedRegistry,
    search_symbols: Arc<Vec<SearchSymbol>>,
    config: FeedConfig,
    realtime: RealtimeSubscriptions,
    runtime: Handle,
}

impl FeedAdapter {
    pub fn new(
        registry: SharedRegistry,
        search_symbols: Vec<SearchSymbol>,
        config: FeedConfig,
    ) -> Result<Self, FeedError> {
        let runtime = Handle::try_current().map_err(|_| FeedError::NoRuntime)?;
        Ok(Self {
            registry,
            search_symbols: Arc::new(search_symbols),
            config,
            realtime: RealtimeSubscriptions::new(),
            runtime,
        })
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn realtime(&self) -> &RealtimeSubscriptions {
        &self.realtime
    }

    pub fn configuration(&self) -> DatafeedConfiguration {
        DatafeedConfiguration::default()
    }

    // ── Async cores ──────────────────────────────────────────────────────

    /// Metadata for a registered symbol.
    pub async fn resolve(&self, symbol_name: &str) -> Result<SymbolInfo, FeedError> {
        let registry = self.registry.read().await;
        match registry.get(symbol_name) {
            Some(entry) => Ok(SymbolInfo::from_entry(entry)),
            None => Err(FeedError::UnknownSymbol(symbol_name.to_string())),
        }
    }

    /// Bars of `symbol_name` inside the requested window.
    pub async fn bars(&self, symbol_name: &str, period: &PeriodParams) -> BarsResult {
        let registry = self.registry.read().await;
        let bars = registry
            .get(symbol_name)
            .map(|entry| bars_in_window(&entry.bars, period.from, period.to))
            .unwrap_or_default();
        BarsResult::new(bars)
    }

    /// Case-insensitive substring match on `full_name`.
    pub async fn search(&self, user_input: &str) -> Vec<SearchSymbolResult> {
        let exchange = self.registry.read().await.main().exchange.clone();
        let needle = user_input.to_lowercase();
        self.search_symbols
            .iter()
            .filter(|s| s.full_name.to_lowercase().contains(&needle))
            .map(|s| SearchSymbolResult {
                symbol: s.symbol.clone(),
                full_name: s.full_name.clone(),
                description: s.description.clone(),
                exchange: exchange.clone(),
                symbol_type: SYMBOL_TYPE.to_string(),
            })
            .collect()
    }

    /// Latest bar of `symbol_name`, in widget shape.
    pub async fn latest_bar(&self, symbol_name: &str) -> Option<ChartBar> {
        latest_bar(&self.registry, symbol_name).await
    }

    /// Cancel every realtime timer. Returns how many were live.
    pub fn unsubscribe_all(&self) -> usize {
        let cancelled = self.realtime.clear();
        if cancelled > 0 {
            tracing::debug!(cancelled, "realtime subscriptions cancelled");
        }
        cancelled
    }
}

async fn delay(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

async fn latest_bar(registry: &SharedRegistry, symbol_name: &str) -> Option<ChartBar> {
    let registry = registry.read().await;
    registry
        .get(symbol_name)
        .and_then(|entry| entry.latest_bar())
        .map(ChartBar::from)
}

/// Re-emit the latest bar every `period` while `active` holds.
///
/// Holds the registry only: the subscription table owns this task's handle.
async fn run_ticker(
    registry: SharedRegistry,
    symbol: SymbolName,
    period: Duration,
    active: ActiveFlag,
    on_tick: OnTick,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    ticker.reset(); // skip immediate first tick

    loop {
        ticker.tick().await;

        let Some(bar) = latest_bar(&registry, symbol.as_str()).await else {
            continue;
        };

        let guard = lock_flag(&active);
        if !*guard {
            return;
        }
        on_tick(bar);
    }
}

impl Datafeed for FeedAdapter {
    fn on_ready(&self, callback: OnReady) {
        let configuration = self.configuration();
        self.runtime.spawn(async move {
            callback(configuration);
        });
    }

    fn resolve_symbol(&self, symbol_name: &str, on_resolve: OnResolve, on_error: OnError) {
        let feed = self.clone();
        let symbol_name = symbol_name.to_string();
        self.runtime.spawn(async move {
            delay(feed.config.resolve_delay).await;
            match feed.resolve(&symbol_name).await {
                Ok(info) => {
                    tracing::debug!(symbol = %symbol_name, pricescale = info.pricescale, "symbol resolved");
                    on_resolve(info);
                }
                Err(e) => {
                    tracing::warn!(symbol = %symbol_name, "cannot resolve symbol");
                    on_error(e);
                }
            }
        });
    }

    fn get_bars(
        &self,
        symbol_info: &SymbolInfo,
        resolution: Resolution,
        period: PeriodParams,
        on_history: OnHistory,
        _on_error: OnError,
    ) {
        let feed = self.clone();
        let symbol = symbol_info.name.clone();
        self.runtime.spawn(async move {
            delay(feed.config.bars_delay).await;
            let result = feed.bars(symbol.as_str(), &period).await;
            tracing::debug!(
                symbol = %symbol,
                resolution = %resolution,
                from = period.from,
                to = period.to,
                count = result.bars.len(),
                "history served"
            );
            on_history(result);
        });
    }

    fn subscribe_bars(
        &self,
        symbol_info: &SymbolInfo,
        resolution: Resolution,
        on_tick: OnTick,
        listener_guid: &str,
    ) {
        let period = self.config.realtime_interval.max(Duration::from_millis(1));
        let active: ActiveFlag = Arc::new(std::sync::Mutex::new(true));
        let symbol = symbol_info.name.clone();

        let handle = self.runtime.spawn(run_ticker(
            self.registry.clone(),
            symbol.clone(),
            period,
            active.clone(),
            on_tick,
        ));

        let replaced = self.realtime.insert(
            listener_guid,
            RealtimeSubscription::new(symbol.clone(), active, handle),
        );
        tracing::debug!(
            listener = listener_guid,
            symbol = %symbol,
            resolution = %resolution,
            replaced,
            "realtime subscribed"
        );
    }

    fn unsubscribe_bars(&self, listener_guid: &str) {
        if self.realtime.remove(listener_guid) {
            tracing::debug!(listener = listener_guid, "realtime unsubscribed");
        }
    }

    fn search_symbols(
        &self,
        user_input: &str,
        _exchange: &str,
        _symbol_type: &str,
        on_result: OnSearch,
    ) {
        let feed = self.clone();
        let user_input = user_input.to_string();
        self.runtime.spawn(async move {
            let results = feed.search(&user_input).await;
            on_result(results);
        });
    }
}

impl std::fmt::Debug for FeedAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedAdapter")
            .field("config", &self.config)
            .field("realtime", &self.realtime)
            .finish()
    }
}
