//! Indian-locale currency formatting for budgets and bid amounts.
//!
//! Budgets are loosely typed in the store: posted tasks carry a number,
//! imported records sometimes carry a pre-formatted range string. The
//! formatter coerces what it can and passes the rest through unchanged.

use serde_json::Value;

/// Format a loosely-numeric value as an INR currency string.
///
/// - `Null` → empty string
/// - numbers → `₹` with Indian digit grouping and two fraction digits,
///   e.g. `1000` → `"₹1,000.00"`, `100000` → `"₹1,00,000.00"`
/// - strings → coerced by stripping everything but digits, `.` and `-`
///   (`"₹1,000"` → `"₹1,000.00"`); strings that do not coerce to a single
///   number (e.g. `"₹50 - ₹500"`) are returned unchanged
/// - anything else → its plain string representation
#[must_use]
pub fn format_inr(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Number(n) => n.as_f64().map(format_amount).unwrap_or_default(),
        Value::String(s) => match coerce_numeric(s) {
            Some(n) => format_amount(n),
            None => s.clone(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Strip currency symbols and separators, then parse.
///
/// An all-symbol string coerces to zero rather than failing, matching the
/// store's historical records.
fn coerce_numeric(s: &str) -> Option<f64> {
    let filtered: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if filtered.is_empty() {
        return Some(0.0);
    }
    filtered.parse::<f64>().ok()
}

/// Render an amount with the rupee sign and 2,2,3 digit grouping.
fn format_amount(n: f64) -> String {
    let negative = n < 0.0;
    let fixed = format!("{:.2}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_indian(int_part);
    let sign = if negative { "-" } else { "" };
    format!("{sign}₹{grouped}.{frac_part}")
}

/// Indian grouping: the last three digits form one group, the rest pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut pairs = Vec::new();
    let head_bytes = head.as_bytes();
    let mut end = head_bytes.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        pairs.push(&head[start..end]);
        end = start;
    }
    pairs.reverse();
    format!("{},{}", pairs.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn null_is_empty() {
        assert_eq!(format_inr(&Value::Null), "");
    }

    #[rstest::rstest]
    #[case(500, "₹500.00")]
    #[case(1000, "₹1,000.00")]
    #[case(100_000, "₹1,00,000.00")]
    #[case(12_345_678, "₹1,23,45,678.00")]
    fn integer_grouping(#[case] amount: i64, #[case] expected: &str) {
        assert_eq!(format_inr(&json!(amount)), expected);
    }

    #[test]
    fn fractional_amounts() {
        assert_eq!(format_inr(&json!(1234.5)), "₹1,234.50");
        assert_eq!(format_inr(&json!(0.99)), "₹0.99");
    }

    #[test]
    fn negative_amounts() {
        assert_eq!(format_inr(&json!(-500)), "-₹500.00");
    }

    #[test]
    fn numeric_string_is_coerced() {
        assert_eq!(format_inr(&json!("₹1,000")), "₹1,000.00");
        assert_eq!(format_inr(&json!("$250")), "₹250.00");
        assert_eq!(format_inr(&json!("750")), "₹750.00");
    }

    #[test]
    fn range_string_passes_through() {
        assert_eq!(format_inr(&json!("₹50 - ₹500")), "₹50 - ₹500");
    }

    #[test]
    fn symbol_only_string_coerces_to_zero() {
        assert_eq!(format_inr(&json!("₹")), "₹0.00");
    }
}
