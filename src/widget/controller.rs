//! Chart lifecycle controller.
//!
//! Owns one widget instance at a time together with the registry and feed it
//! was built on. The host forwards its events (new upstream data, the widget's
//! ready signal, theme switches, compare actions) as method calls.

use std::sync::Arc;

use super::{
    ChartConfig, ChartWidget, HeaderButton, WidgetFactory, WidgetOptions, DEFAULT_SYMBOL,
    DISABLED_FEATURES, ENABLED_FEATURES, LOCALE, WIDGET_TIMEZONE,
};
use crate::domain::bar::Bar;
use crate::domain::compare::{CompareData, CompareDataProvider, CompareDialog, NoCompare};
use crate::domain::symbol::{SharedRegistry, SymbolEntry, SymbolRegistry};
use crate::error::{ChartError, CompareError, WidgetError};
use crate::feed::{Datafeed, FeedAdapter};
use crate::shared::{PriceFormatter, SymbolName, Theme};

/// Widget lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidgetState {
    #[default]
    Uninitialized,
    /// Widget built, waiting for its ready signal.
    Constructed,
    Ready,
}

/// Upstream data for the main symbol, tagged with the page route it belongs to.
///
/// Route and symbol name form the chart identity: a change in either rebuilds
/// the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct MainSeries {
    pub route: String,
    pub entry: SymbolEntry,
}

impl MainSeries {
    pub fn new(
        route: impl Into<String>,
        symbol: impl Into<String>,
        description: impl Into<String>,
        exchange: impl Into<String>,
        bars: Vec<Bar>,
    ) -> Self {
        let symbol = symbol.into();
        let symbol = if symbol.is_empty() {
            DEFAULT_SYMBOL.to_string()
        } else {
            symbol
        };
        Self {
            route: route.into(),
            entry: SymbolEntry::new(symbol, description, exchange, bars),
        }
    }
}

/// Result of a compare add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareOutcome {
    /// Registered and overlaid.
    Added(SymbolName),
    /// Already on the chart; nothing changed.
    AlreadyPresent(SymbolName),
}

impl CompareOutcome {
    pub fn symbol(&self) -> &SymbolName {
        match self {
            CompareOutcome::Added(name) | CompareOutcome::AlreadyPresent(name) => name,
        }
    }
}

struct MountedChart<W> {
    widget: W,
    feed: FeedAdapter,
    route: String,
    symbol: SymbolName,
    toolbar_ready: bool,
    /// Data changed before the ready signal; reset once ready.
    pending_reset: bool,
}

/// Drives a single chart widget through mount, refresh and teardown.
///
/// `P` supplies comparison series; charts built with [`ChartController::new`]
/// have no compare support and no toolbar button.
pub struct ChartController<F: WidgetFactory, P = NoCompare> {
    factory: F,
    compare: Option<P>,
    config: ChartConfig,
    theme: Theme,
    state: WidgetState,
    chart: Option<MountedChart<F::Widget>>,
    dialog: CompareDialog,
}

impl<F: WidgetFactory> ChartController<F, NoCompare> {
    pub fn new(factory: F, config: ChartConfig) -> Self {
        Self::build(factory, config, None)
    }
}

impl<F: WidgetFactory, P> ChartController<F, P> {
    fn build(factory: F, config: ChartConfig, compare: Option<P>) -> Self {
        Self {
            factory,
            compare,
            theme: config.theme,
            config,
            state: WidgetState::Uninitialized,
            chart: None,
            dialog: CompareDialog::new(),
        }
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn has_compare(&self) -> bool {
        self.compare.is_some()
    }

    pub fn widget(&self) -> Option<&F::Widget> {
        self.chart.as_ref().map(|chart| &chart.widget)
    }

    pub fn feed(&self) -> Option<&FeedAdapter> {
        self.chart.as_ref().map(|chart| &chart.feed)
    }

    pub fn registry(&self) -> Option<&SharedRegistry> {
        self.feed().map(FeedAdapter::registry)
    }

    pub fn dialog(&self) -> &CompareDialog {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut CompareDialog {
        &mut self.dialog
    }

    /// Release the widget: cancel realtime timers, then remove it.
    pub fn teardown(&mut self) {
        if let Some(mut chart) = self.chart.take() {
            let cancelled = chart.feed.unsubscribe_all();
            chart.widget.remove();
            tracing::info!(
                route = %chart.route,
                symbol = %chart.symbol,
                cancelled,
                "chart torn down"
            );
        }
        self.state = WidgetState::Uninitialized;
    }
}

impl<F: WidgetFactory, P: CompareDataProvider> ChartController<F, P> {
    pub fn with_compare(factory: F, config: ChartConfig, provider: P) -> Self {
        Self::build(factory, config, Some(provider))
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Build a fresh registry, feed and widget for `series`.
    ///
    /// Any previous widget is torn down first; its comparison entries are
    /// discarded with its registry.
    pub fn mount(&mut self, series: MainSeries) -> Result<(), ChartError> {
        self.teardown();

        let MainSeries { route, entry } = series;
        let symbol = entry.name.clone();
        let registry = SymbolRegistry::new(entry).into_shared();
        let feed = FeedAdapter::new(
            registry,
            self.config.search_symbols.clone(),
            self.config.feed.clone(),
        )?;

        let options = self.widget_options(&symbol, Arc::new(feed.clone()));
        let widget = self.factory.create(options)?;

        tracing::info!(route = %route, symbol = %symbol, "chart mounted");
        self.chart = Some(MountedChart {
            widget,
            feed,
            route,
            symbol,
            toolbar_ready: false,
            pending_reset: false,
        });
        self.state = WidgetState::Constructed;
        Ok(())
    }

    /// Apply new upstream data.
    ///
    /// A different route or main symbol remounts. Otherwise the main entry is
    /// replaced in place and the widget re-pulls everything, immediately when
    /// ready or on the ready signal otherwise.
    pub async fn update(&mut self, series: MainSeries) -> Result<(), ChartError> {
        let same_chart = self.chart.as_ref().is_some_and(|chart| {
            chart.route == series.route && chart.symbol == series.entry.name
        });
        if !same_chart {
            return self.mount(series);
        }

        let ready = self.state == WidgetState::Ready;
        if let Some(chart) = self.chart.as_mut() {
            chart.feed.registry().write().await.set_main(series.entry);
            if ready {
                chart.widget.reset_data();
                tracing::debug!(symbol = %chart.symbol, "chart data reset");
            } else {
                chart.pending_reset = true;
            }
        }
        Ok(())
    }

    /// The widget's ready signal. Syncs the theme, applies a data reset
    /// deferred by [`update`](Self::update) and adds the compare button.
    /// Stale signals (not in `Constructed`) are ignored.
    pub fn on_chart_ready(&mut self) -> Result<(), ChartError> {
        if self.state != WidgetState::Constructed {
            tracing::debug!(state = ?self.state, "ignoring chart ready signal");
            return Ok(());
        }
        self.state = WidgetState::Ready;

        let theme = self.theme;
        let has_compare = self.compare.is_some();
        if let Some(chart) = self.chart.as_mut() {
            chart.widget.change_theme(theme);
            if std::mem::take(&mut chart.pending_reset) {
                chart.widget.reset_data();
                tracing::debug!(symbol = %chart.symbol, "deferred chart data reset");
            }
            if has_compare && !chart.toolbar_ready {
                chart.widget.create_button(HeaderButton::compare())?;
                chart.toolbar_ready = true;
            }
            tracing::info!(symbol = %chart.symbol, "chart ready");
        }
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if self.state != WidgetState::Ready {
            return;
        }
        if let Some(chart) = self.chart.as_mut() {
            chart.widget.change_theme(theme);
        }
    }

    // ── Compare ──────────────────────────────────────────────────────────

    /// Compare button clicked.
    pub fn open_compare_dialog(&mut self) {
        self.dialog.open();
    }

    pub fn close_compare_dialog(&mut self) {
        self.dialog.close();
    }

    /// Fetch the series for `address` and overlay it.
    ///
    /// A symbol that is already registered is left untouched and no study is
    /// created. If the study cannot be created the entry is unregistered again.
    pub async fn add_compare(&mut self, address: &str) -> Result<CompareOutcome, CompareError> {
        let provider = self.compare.as_ref().ok_or(CompareError::Unavailable)?;
        let chart = self.chart.as_mut().ok_or(WidgetError::NotMounted)?;

        let CompareData {
            bars,
            symbol_name,
            description,
        } = provider
            .fetch_compare(address)
            .await
            .map_err(|e| match e {
                ChartError::Compare(inner) => inner,
                other => CompareError::Fetch(other.to_string()),
            })?;

        {
            let mut registry = chart.feed.registry().write().await;
            if registry.contains(symbol_name.as_str()) {
                tracing::debug!(symbol = %symbol_name, "comparison already on chart");
                return Ok(CompareOutcome::AlreadyPresent(symbol_name));
            }
            let exchange = registry.main().exchange.clone();
            registry.put(SymbolEntry::new(
                symbol_name.clone(),
                description,
                exchange,
                bars,
            ));
        }

        if let Err(e) = chart.widget.create_compare_study(&symbol_name) {
            chart.feed.registry().write().await.remove(symbol_name.as_str());
            return Err(e.into());
        }
        tracing::info!(symbol = %symbol_name, address, "comparison added");
        Ok(CompareOutcome::Added(symbol_name))
    }

    /// Add the dialog's current choice. Drives the dialog's loading, error
    /// and close states.
    pub async fn submit_compare(&mut self) -> Result<CompareOutcome, CompareError> {
        let address = self.dialog.begin_submit()?;
        let result = self.add_compare(&address).await;
        if let Err(e) = &result {
            tracing::warn!(address = %address, error = %e, "comparison add failed");
        }
        self.dialog.finish_submit(&result);
        result
    }

    fn widget_options(&self, symbol: &SymbolName, datafeed: Arc<dyn Datafeed>) -> WidgetOptions {
        WidgetOptions {
            symbol: symbol.clone(),
            interval: self.config.interval,
            datafeed,
            locale: LOCALE.to_string(),
            disabled_features: DISABLED_FEATURES.iter().map(|f| f.to_string()).collect(),
            enabled_features: ENABLED_FEATURES.iter().map(|f| f.to_string()).collect(),
            timezone: WIDGET_TIMEZONE.to_string(),
            theme: self.theme,
            price_formatter: PriceFormatter,
            library_path: self.config.library_path.clone(),
            charts_storage_url: self.config.charts_storage_url.clone(),
            charts_storage_api_version: self.config.charts_storage_api_version.clone(),
            client_id: self.config.client_id.clone(),
            user_id: self.config.user_id.clone(),
            fullscreen: self.config.fullscreen,
            autosize: self.config.autosize,
            debug: false,
        }
    }
}

impl<F: WidgetFactory, P> Drop for ChartController<F, P> {
    fn drop(&mut self) {
        self.teardown();
    }
}
