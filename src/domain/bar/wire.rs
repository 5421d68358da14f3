//! Wire types for OHLCV responses (REST).

use super::Bar;
use serde::Deserialize;

/// OHLCV payload: either a bare bar array or wrapped in `{ "data": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OhlcvResponse {
    Bars(Vec<Bar>),
    Wrapped { data: Vec<Bar> },
}

impl OhlcvResponse {
    pub fn into_bars(self) -> Vec<Bar> {
        match self {
            OhlcvResponse::Bars(bars) => bars,
            OhlcvResponse::Wrapped { data } => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let json = r#"[{"time":1,"open":1,"high":1,"low":1,"close":1,"volume":3}]"#;
        let bars = serde_json::from_str::<OhlcvResponse>(json).unwrap().into_bars();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].volume, 3.0);
    }

    #[test]
    fn test_wrapped_array() {
        let json = r#"{"data":[{"time":1,"open":1,"high":2,"low":0.5,"close":1.5,"volume":0}]}"#;
        let bars = serde_json::from_str::<OhlcvResponse>(json).unwrap().into_bars();
        assert_eq!(bars[0].close, 1.5);
    }
}
