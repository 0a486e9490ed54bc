//! Reading single cells out of raw and warehouse frames.
//!
//! Raw frames hold text, warehouse frames hold typed columns. These helpers
//! accept either so callers never branch on the column dtype.

use polars::prelude::AnyValue;

/// Cell as trimmed text. Nulls and blank strings are `None`.
pub fn cell_text(value: AnyValue<'_>) -> Option<String> {
    let text = match value {
        AnyValue::Null => return None,
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Float64(v) => v.to_string(),
        other => other.to_string(),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Cell as an integer identifier.
///
/// Integral decimals such as `"12.0"` are accepted; `"12.5"` is not.
pub fn cell_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::Float64(v) => integral(v),
        AnyValue::String(s) => parse_id(s),
        AnyValue::StringOwned(s) => parse_id(&s),
        _ => None,
    }
}

pub fn cell_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => s.trim().parse().ok(),
        AnyValue::StringOwned(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse an identifier cell.
pub fn parse_id(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(integral))
}

fn integral(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integral_decimals() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id(" 12.0 "), Some(12));
        assert_eq!(parse_id("12.5"), None);
        assert_eq!(parse_id("\\N"), None);
        assert_eq!(parse_id(""), None);
    }

    #[test]
    fn reads_text_and_typed_cells() {
        assert_eq!(cell_i64(AnyValue::String("7")), Some(7));
        assert_eq!(cell_i64(AnyValue::Float64(3.0)), Some(3));
        assert_eq!(cell_f64(AnyValue::Int64(4)), Some(4.0));
        assert_eq!(cell_f64(AnyValue::String(" 218.3 ")), Some(218.3));
        assert_eq!(cell_text(AnyValue::String("  ")), None);
        assert_eq!(cell_text(AnyValue::Int64(84_603)).as_deref(), Some("84603"));
        assert_eq!(cell_text(AnyValue::Null), None);
    }
}
