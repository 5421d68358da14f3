//! Price-axis scale derivation.
//!
//! The widget renders price ticks as integers over a power-of-ten denominator.
//! Tokens trading at `0.000000031` need far more fractional digits than ones
//! trading at `3100`, so the scale is derived per symbol from its latest close.

/// Scale used when no meaningful reference price exists (2 decimals).
pub const DEFAULT_PRICE_SCALE: u64 = 100;

const MIN_DECIMALS: u32 = 2;
const MAX_DECIMALS: u32 = 18;
const PADDING_DECIMALS: u32 = 2;

/// Number of fractional digits the price axis shows for `price`.
///
/// `ceil(|log10(price)|) + 2`, clamped to `[2, 18]`. Zero, negative, NaN and
/// infinite prices fall back to 2.
pub fn price_decimals(price: f64) -> u32 {
    if !(price > 0.0) || !price.is_finite() {
        return MIN_DECIMALS;
    }

    let magnitude = price.log10().abs().ceil();
    if magnitude >= MAX_DECIMALS as f64 {
        return MAX_DECIMALS;
    }

    (magnitude as u32 + PADDING_DECIMALS).clamp(MIN_DECIMALS, MAX_DECIMALS)
}

/// Price scale (`10^decimals`) for the widget's `pricescale` field.
pub fn price_scale(price: f64) -> u64 {
    if !(price > 0.0) || !price.is_finite() {
        return DEFAULT_PRICE_SCALE;
    }
    10u64.pow(price_decimals(price))
}
