//! # dexchart
//!
//! Datafeed bridge between DEX token data and a pull-based charting widget.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Price scale, subscript price formatting, shared newtypes,
//!    domain models (bars, symbols, tokens, compare dialog)
//! 2. **Feed**: `FeedAdapter`, the registry-backed implementation of the
//!    widget's `Datafeed` contract with realtime timers
//! 3. **Widget**: `ChartController`, the widget lifecycle state machine
//! 4. **HTTP API**: `DexHttp` with per-endpoint retry policies
//! 5. **High-Level Client**: `DexClient` with nested sub-clients and caching;
//!    implements the token search and compare providers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dexchart::prelude::*;
//!
//! let client = DexClient::builder().build()?;
//! let series = client.main_series("solana", address, None).await?;
//!
//! let mut chart = ChartController::with_compare(factory, ChartConfig::default(), client);
//! chart.mount(series)?;
//! // ... the widget signals readiness
//! chart.on_chart_ready()?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, price scale and price formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network and widget path constants.
pub mod network;

// ── Layer 2: Feed ────────────────────────────────────────────────────────────

/// The widget's datafeed contract and its registry-backed implementation.
pub mod feed;

// ── Layer 3: Widget ──────────────────────────────────────────────────────────

/// Widget seam, static options and the lifecycle controller.
pub mod widget;

// ── Layer 4: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `DexClient`: token search and OHLCV provider.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes + formatting
    pub use crate::shared::{
        format_price, parse_price, price_scale, short_address, PriceFormatter, Resolution,
        SymbolName, Theme,
    };

    // Domain types
    pub use crate::domain::bar::{Bar, ChartBar};
    pub use crate::domain::compare::{
        CompareData, CompareDataProvider, CompareDialog, DropdownStatus, NoCompare,
    };
    pub use crate::domain::symbol::{SharedRegistry, SymbolEntry, SymbolRegistry};
    pub use crate::domain::token::{TokenSearch, TokenSummary};

    // Errors
    pub use crate::error::{ChartError, CompareError, FeedError, WidgetError};

    // Feed
    pub use crate::feed::{
        BarsResult, Datafeed, DatafeedConfiguration, FeedAdapter, FeedConfig, PeriodParams,
        SearchSymbol, SearchSymbolResult, SymbolInfo,
    };

    // Widget
    pub use crate::widget::{
        ChartConfig, ChartController, ChartWidget, CompareOutcome, HeaderButton, MainSeries,
        WidgetFactory, WidgetOptions, WidgetState,
    };

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{DexClient, DexClientBuilder, OhlcvClient, TokensClient};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
