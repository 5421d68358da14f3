//! Network and widget constants.

/// Default REST API base URL for token search and OHLCV.
pub const DEFAULT_API_URL: &str = "https://api.dextrading.com";

/// Default path of the charting library bundle served next to the page.
pub const DEFAULT_LIBRARY_PATH: &str = "/static/charting_library/";
