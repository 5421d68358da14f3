//! Charting widget seam: construction options, the widget handle, and the
//! lifecycle controller that owns it.

pub mod controller;

pub use controller::{ChartController, CompareOutcome, MainSeries, WidgetState};

use std::sync::Arc;

use crate::error::WidgetError;
use crate::feed::{Datafeed, FeedConfig, SearchSymbol};
use crate::network::DEFAULT_LIBRARY_PATH;
use crate::shared::{PriceFormatter, Resolution, SymbolName, Theme};

pub const LOCALE: &str = "en";
pub const DISABLED_FEATURES: [&str; 1] = ["use_localstorage_for_settings"];
pub const ENABLED_FEATURES: [&str; 1] = ["study_templates"];
pub const WIDGET_TIMEZONE: &str = "Etc/UTC";

/// Study used for comparison overlays.
pub const COMPARE_STUDY: &str = "Compare";

/// Symbol charted when the host supplies none.
pub const DEFAULT_SYMBOL: &str = "DefaultSymbol";

/// A live widget instance.
pub trait ChartWidget {
    fn change_theme(&mut self, theme: Theme);

    /// Drop cached bars and re-request them from the datafeed.
    fn reset_data(&mut self);

    /// Overlay `symbol` with the [`COMPARE_STUDY`] study.
    fn create_compare_study(&mut self, symbol: &SymbolName) -> Result<(), WidgetError>;

    fn create_button(&mut self, button: HeaderButton) -> Result<(), WidgetError>;

    fn remove(&mut self);
}

/// Builds widget instances.
pub trait WidgetFactory {
    type Widget: ChartWidget;

    fn create(&self, options: WidgetOptions) -> Result<Self::Widget, WidgetError>;
}

/// Everything a widget is constructed with.
#[derive(Clone)]
pub struct WidgetOptions {
    pub symbol: SymbolName,
    pub interval: Resolution,
    pub datafeed: Arc<dyn Datafeed>,
    pub locale: String,
    pub disabled_features: Vec<String>,
    pub enabled_features: Vec<String>,
    pub timezone: String,
    pub theme: Theme,
    pub price_formatter: PriceFormatter,
    pub library_path: String,
    pub charts_storage_url: Option<String>,
    pub charts_storage_api_version: Option<String>,
    pub client_id: Option<String>,
    pub user_id: Option<String>,
    pub fullscreen: bool,
    pub autosize: bool,
    pub debug: bool,
}

impl std::fmt::Debug for WidgetOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetOptions")
            .field("symbol", &self.symbol)
            .field("interval", &self.interval)
            .field("locale", &self.locale)
            .field("disabled_features", &self.disabled_features)
            .field("enabled_features", &self.enabled_features)
            .field("timezone", &self.timezone)
            .field("theme", &self.theme)
            .field("library_path", &self.library_path)
            .field("fullscreen", &self.fullscreen)
            .field("autosize", &self.autosize)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAlign {
    Left,
    Right,
}

/// A toolbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderButton {
    pub align: ButtonAlign,
    pub title: String,
    pub label: String,
}

impl HeaderButton {
    /// The "Compare" button that opens the comparison dialog.
    pub fn compare() -> Self {
        Self {
            align: ButtonAlign::Right,
            title: "Compare with another token".to_string(),
            label: "Compare".to_string(),
        }
    }
}

/// Static chart settings. Changing any of these requires a remount.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub interval: Resolution,
    pub theme: Theme,
    pub library_path: String,
    pub charts_storage_url: Option<String>,
    pub charts_storage_api_version: Option<String>,
    pub client_id: Option<String>,
    pub user_id: Option<String>,
    pub fullscreen: bool,
    pub autosize: bool,
    pub feed: FeedConfig,
    pub search_symbols: Vec<SearchSymbol>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            interval: Resolution::default(),
            theme: Theme::default(),
            library_path: DEFAULT_LIBRARY_PATH.to_string(),
            charts_storage_url: None,
            charts_storage_api_version: None,
            client_id: None,
            user_id: None,
            fullscreen: false,
            autosize: true,
            feed: FeedConfig::default(),
            search_symbols: Vec::new(),
        }
    }
}

impl ChartConfig {
    pub fn builder() -> ChartConfigBuilder {
        ChartConfigBuilder::default()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct ChartConfigBuilder {
    config: ChartConfig,
}

impl ChartConfigBuilder {
    pub fn interval(mut self, interval: Resolution) -> Self {
        self.config.interval = interval;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    pub fn library_path(mut self, path: &str) -> Self {
        self.config.library_path = path.to_string();
        self
    }

    pub fn charts_storage(mut self, url: &str, api_version: &str) -> Self {
        self.config.charts_storage_url = Some(url.to_string());
        self.config.charts_storage_api_version = Some(api_version.to_string());
        self
    }

    pub fn client_id(mut self, client_id: &str) -> Self {
        self.config.client_id = Some(client_id.to_string());
        self
    }

    pub fn user_id(mut self, user_id: &str) -> Self {
        self.config.user_id = Some(user_id.to_string());
        self
    }

    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.config.fullscreen = fullscreen;
        self
    }

    pub fn autosize(mut self, autosize: bool) -> Self {
        self.config.autosize = autosize;
        self
    }

    pub fn feed(mut self, feed: FeedConfig) -> Self {
        self.config.feed = feed;
        self
    }

    pub fn search_symbol(mut self, symbol: SearchSymbol) -> Self {
        self.config.search_symbols.push(symbol);
        self
    }

    pub fn build(self) -> ChartConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_compare_button() {
        let button = HeaderButton::compare();
        assert_eq!(button.align, ButtonAlign::Right);
        assert_eq!(button.title, "Compare with another token");
        assert_eq!(button.label, "Compare");
    }

    #[test]
    fn test_config_defaults() {
        let config = ChartConfig::default();
        assert_eq!(config.interval, Resolution::Hour4);
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.library_path, DEFAULT_LIBRARY_PATH);
        assert!(config.autosize);
        assert!(config.search_symbols.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = ChartConfig::builder()
            .interval(Resolution::Day1)
            .theme(Theme::Light)
            .charts_storage("https://saveload.example", "1.1")
            .client_id("dexchart")
            .user_id("anon")
            .feed(FeedConfig::default().bars_delay(Duration::ZERO))
            .search_symbol(SearchSymbol::new("PEPE", "PEPE / WETH", ""))
            .build();
        assert_eq!(config.interval, Resolution::Day1);
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.charts_storage_api_version.as_deref(), Some("1.1"));
        assert_eq!(config.feed.bars_delay, Duration::ZERO);
        assert_eq!(config.search_symbols.len(), 1);
    }
}
