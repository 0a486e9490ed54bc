//! Numeric coercion for fact columns.
//!
//! Raw numeric cells are text. Coercion never fails: anything that is not a
//! finite number becomes missing, and the zero-filling helpers then turn
//! missing into 0 for columns that must not hold nulls.

use f1_model::NULL_PLACEHOLDER;

/// Parse a cell as a finite number.
pub fn parse_numeric(value: Option<&str>) -> Option<f64> {
    let trimmed = value?.trim();
    if trimmed.is_empty() || trimmed == NULL_PLACEHOLDER {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Parse a cell as an integer, truncating any fractional part.
pub fn parse_integer(value: Option<&str>) -> Option<i64> {
    parse_numeric(value).and_then(truncate_to_i64)
}

/// Numeric value with missing filled as 0.
pub fn real_or_zero(value: Option<&str>) -> f64 {
    parse_numeric(value).unwrap_or(0.0)
}

/// Integer value with missing filled as 0.
pub fn integer_or_zero(value: Option<&str>) -> i64 {
    parse_integer(value).unwrap_or(0)
}

/// Replace NaN with 0.
pub fn fill_nan_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

/// Places gained between the starting grid slot and the finishing position.
///
/// A missing grid or position makes the difference NaN, which is then
/// filled with 0. The subtraction never sees a substituted 0.
///
/// ```
/// use f1_transform::numeric::positions_gained;
///
/// assert_eq!(positions_gained(Some(5.0), Some(3.0)), 2.0);
/// assert_eq!(positions_gained(Some(5.0), None), 0.0);
/// ```
pub fn positions_gained(grid: Option<f64>, position: Option<f64>) -> f64 {
    let gained = match (grid, position) {
        (Some(grid), Some(position)) => grid - position,
        _ => f64::NAN,
    };
    fill_nan_zero(gained)
}

fn truncate_to_i64(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    if truncated.abs() < 9.0e15 {
        Some(truncated as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers() {
        assert_eq!(parse_numeric(Some("218.300")), Some(218.3));
        assert_eq!(parse_numeric(Some(" 10 ")), Some(10.0));
        assert_eq!(parse_numeric(Some("\\N")), None);
        assert_eq!(parse_numeric(Some("nan")), None);
        assert_eq!(parse_numeric(Some("fast")), None);
        assert_eq!(parse_numeric(None), None);
    }

    #[test]
    fn integers_truncate() {
        assert_eq!(parse_integer(Some("58")), Some(58));
        assert_eq!(parse_integer(Some("3.9")), Some(3));
        assert_eq!(integer_or_zero(Some("R")), 0);
        assert_eq!(integer_or_zero(None), 0);
    }

    #[test]
    fn zero_fill() {
        assert_eq!(real_or_zero(Some("4.5")), 4.5);
        assert_eq!(real_or_zero(Some("")), 0.0);
        assert_eq!(fill_nan_zero(f64::NAN), 0.0);
        assert_eq!(fill_nan_zero(-1.5), -1.5);
    }

    #[test]
    fn positions_gained_handles_missing_inputs() {
        assert_eq!(positions_gained(Some(5.0), Some(3.0)), 2.0);
        assert_eq!(positions_gained(Some(1.0), Some(4.0)), -3.0);
        assert_eq!(positions_gained(None, Some(3.0)), 0.0);
        assert_eq!(positions_gained(Some(5.0), None), 0.0);
        assert_eq!(positions_gained(None, None), 0.0);
    }
}
