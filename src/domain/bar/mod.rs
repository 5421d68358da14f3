//! Bar domain: OHLCV samples and the widget's bar shape.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV sample as delivered by the data provider.
///
/// `time` is the bucket start in Unix seconds. Series are expected to be in
/// strictly increasing time order; this is not validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Bar {
    /// Bucket start in Unix milliseconds.
    pub fn time_ms(&self) -> i64 {
        self.time.saturating_mul(1000)
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.time, 0)
    }

    /// `low ≤ open, close ≤ high`.
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open.min(self.close) && self.open.max(self.close) <= self.high
    }
}

/// A bar in the shape the charting widget consumes (`time` in milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl From<&Bar> for ChartBar {
    fn from(bar: &Bar) -> Self {
        Self {
            time: bar.time_ms(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

impl From<Bar> for ChartBar {
    fn from(bar: Bar) -> Self {
        Self::from(&bar)
    }
}

/// Bars whose time lies in `[from, to]` (Unix seconds, inclusive), compared at
/// millisecond precision and mapped to the widget shape.
pub fn bars_in_window(bars: &[Bar], from: i64, to: i64) -> Vec<ChartBar> {
    let from_ms = from.saturating_mul(1000);
    let to_ms = to.saturating_mul(1000);
    bars.iter()
        .filter(|bar| {
            let t = bar.time_ms();
            t >= from_ms && t <= to_ms
        })
        .map(ChartBar::from)
        .collect()
}

/// Close of the most recent bar, or `0.0` for an empty series.
pub fn latest_close(bars: &[Bar]) -> f64 {
    bars.last().map(|bar| bar.close).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(time: i64, close: f64) -> Bar {
        Bar {
            time,
            open: close,
            high: close * 1.1,
            low: close * 0.9,
            close,
            volume: 10.0,
        }
    }

    #[test]
    fn test_chart_bar_uses_milliseconds() {
        let chart: ChartBar = bar(1_700_000_000, 2.0).into();
        assert_eq!(chart.time, 1_700_000_000_000);
        assert_eq!(chart.close, 2.0);
        assert_eq!(chart.volume, 10.0);
    }

    #[test]
    fn test_window_is_inclusive_on_both_ends() {
        let bars = vec![bar(100, 1.0), bar(200, 2.0), bar(300, 3.0), bar(400, 4.0)];
        let window = bars_in_window(&bars, 200, 300);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].time, 200_000);
        assert_eq!(window[1].time, 300_000);
    }

    #[test]
    fn test_empty_window() {
        let bars = vec![bar(100, 1.0), bar(200, 2.0)];
        assert!(bars_in_window(&bars, 201, 299).is_empty());
        assert!(bars_in_window(&bars, 300, 100).is_empty());
        assert!(bars_in_window(&[], 0, i64::MAX).is_empty());
    }

    #[test]
    fn test_latest_close() {
        assert_eq!(latest_close(&[]), 0.0);
        assert_eq!(latest_close(&[bar(1, 1.5), bar(2, 0.25)]), 0.25);
    }

    #[test]
    fn test_consistency_check() {
        assert!(bar(1, 1.0).is_consistent());
        let broken = Bar {
            high: 0.5,
            ..bar(1, 1.0)
        };
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_volume_defaults_when_missing() {
        let parsed: Bar =
            serde_json::from_str(r#"{"time":5,"open":1,"high":2,"low":0.5,"close":1.5}"#).unwrap();
        assert_eq!(parsed.volume, 0.0);
        assert_eq!(parsed.datetime().unwrap().timestamp(), 5);
    }
}
