//! Subscript price formatting for axis and tooltip labels.
//!
//! Prices with a run of leading fractional zeros are compressed by writing the
//! length of the run as subscript digits: `0.00000000123` becomes `0.0₈123`.
//! Counts of ten or more keep one glyph per decimal digit (`0.0₁₂5`).

const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Fractional digits rendered before compression.
const FIXED_DIGITS: usize = 18;

const INFINITY_LABEL: &str = "∞";

/// Format a price for display, compressing leading fractional zeros.
pub fn format_price(price: f64) -> String {
    if price == 0.0 || price.is_nan() {
        return "0".to_string();
    }

    let negative = price < 0.0;
    let abs_price = price.abs();

    let formatted = if abs_price.is_infinite() {
        INFINITY_LABEL.to_string()
    } else {
        compress_fixed(&format!("{:.1$}", abs_price, FIXED_DIGITS))
    };

    if negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

fn compress_fixed(fixed: &str) -> String {
    match fixed.strip_prefix("0.") {
        Some(fraction) if fraction.starts_with('0') => {
            let significant = fraction.trim_start_matches('0');
            let leading_zeros = fraction.len() - significant.len();

            let mut out = String::with_capacity(fixed.len() + 8);
            out.push_str("0.0");
            out.push_str(&subscript(leading_zeros));
            out.push_str(significant);
            out.trim_end_matches('0').to_string()
        }
        _ => fixed
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
    }
}

/// Render a count as subscript digits, one glyph per decimal digit.
pub fn subscript(count: usize) -> String {
    count
        .to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => SUBSCRIPT_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

fn subscript_value(c: char) -> Option<u32> {
    SUBSCRIPT_DIGITS
        .iter()
        .position(|&s| s == c)
        .map(|p| p as u32)
}

/// Parse a label produced by [`format_price`] back into a number.
///
/// Plain decimal strings are accepted too. Returns `None` for anything else.
pub fn parse_price(label: &str) -> Option<f64> {
    let (negative, body) = match label.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, label),
    };

    let value = if body == INFINITY_LABEL {
        f64::INFINITY
    } else {
        match body.strip_prefix("0.0") {
            Some(rest) if rest.starts_with(|c| subscript_value(c).is_some()) => {
                let mut zeros: usize = 0;
                let mut digits = String::new();
                for c in rest.chars() {
                    match subscript_value(c) {
                        Some(d) if digits.is_empty() => {
                            zeros = zeros.checked_mul(10)?.checked_add(d as usize)?;
                        }
                        _ => digits.push(c),
                    }
                }
                format!("0.{}{}", "0".repeat(zeros), digits)
                    .parse::<f64>()
                    .ok()?
            }
            _ => body.parse::<f64>().ok()?,
        }
    };

    Some(if negative { -value } else { value })
}

/// Price formatter handed to the widget as its custom axis/tooltip formatter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceFormatter;

impl PriceFormatter {
    pub fn format(&self, price: f64) -> String {
        format_price(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_nan() {
        assert_eq!(format_price(0.0), "0");
        assert_eq!(format_price(-0.0), "0");
        assert_eq!(format_price(f64::NAN), "0");
    }

    #[test]
    fn test_leading_zero_run_is_subscripted() {
        let label = format_price(0.00000000123);
        assert_eq!(label, "0.0₈123");
        assert!(label.contains('₈'));
    }

    #[test]
    fn test_single_leading_zero() {
        assert_eq!(format_price(0.0625), "0.0₁625");
        assert_eq!(format_price(0.00390625), "0.0₂390625");
    }

    #[test]
    fn test_multi_digit_zero_count() {
        assert_eq!(format_price(0.0000000000005), "0.0₁₂5");
        assert_eq!(subscript(12), "₁₂");
        assert_eq!(subscript(10), "₁₀");
    }

    #[test]
    fn test_values_without_leading_zero_run() {
        assert_eq!(format_price(0.5), "0.5");
        assert_eq!(format_price(1.0), "1");
        assert_eq!(format_price(1.25), "1.25");
        assert_eq!(format_price(100.0), "100");
        assert_eq!(format_price(3100.75), "3100.75");
    }

    #[test]
    fn test_negative_mirrors_positive() {
        for x in [0.00000000123, 0.05, 0.5, 1.25, 100.0, 42_000.125] {
            assert_eq!(format_price(-x), format!("-{}", format_price(x)));
        }
    }

    #[test]
    fn test_below_fixed_precision() {
        // Rounds to zero at 18 digits: the whole run is encoded.
        assert_eq!(format_price(1e-20), "0.0₁₈");
    }

    #[test]
    fn test_infinity() {
        assert_eq!(format_price(f64::INFINITY), "∞");
        assert_eq!(format_price(f64::NEG_INFINITY), "-∞");
        assert_eq!(parse_price("-∞"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_never_trailing_decimal_point_or_zero() {
        let mut x = 1e-17;
        while x < 1e9 {
            let label = format_price(x);
            assert!(!label.ends_with('.'), "{} -> {}", x, label);
            if label.contains('.') {
                assert!(!label.ends_with('0'), "{} -> {}", x, label);
            }
            x *= 3.7;
        }
    }

    #[test]
    fn test_round_trip_three_significant_digits() {
        let mut x = 1.37e-15;
        while x < 1.0 {
            let label = format_price(x);
            let back = parse_price(&label).unwrap();
            let rel = ((back - x) / x).abs();
            assert!(rel < 1e-3, "{} -> {} -> {}", x, label, back);
            x *= 1.9;
        }
    }

    #[test]
    fn test_parse_plain_and_invalid() {
        assert_eq!(parse_price("1.25"), Some(1.25));
        assert_eq!(parse_price("-0.0₂5"), Some(-0.005));
        assert_eq!(parse_price("abc"), None);
    }

    #[test]
    fn test_formatter_is_idempotent_through_parse() {
        for x in [0.00000000123, 0.0042, 0.73, 12.5] {
            let once = format_price(x);
            let twice = format_price(parse_price(&once).unwrap());
            assert_eq!(once, twice);
        }
    }
}
