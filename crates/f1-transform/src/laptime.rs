//! Lap-time codec.
//!
//! Timing columns in the raw extracts are written as `MINUTES:SECONDS.FRACTION`
//! (e.g. `1:24.603`). The warehouse stores integer milliseconds.
//!
//! Decoding is total: anything that is not a well-formed, non-negative lap
//! time decodes to `None` so a single bad cell never aborts a run. Digits
//! beyond the millisecond are truncated, never rounded. Results can be 1 ms
//! above a float computation of the same value (`4:59.958` is 299958 here,
//! 299957 via `f64`).

use f1_model::NULL_PLACEHOLDER;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Decode a lap time into milliseconds.
///
/// Returns `None` for a missing cell, an empty string, the `\N` placeholder,
/// or any malformed value.
///
/// # Examples
///
/// ```
/// use f1_transform::laptime::parse_lap_time;
///
/// assert_eq!(parse_lap_time(Some("1:24.603")), Some(84_603));
/// assert_eq!(parse_lap_time(Some("\\N")), None);
/// assert_eq!(parse_lap_time(None), None);
/// ```
pub fn parse_lap_time(value: Option<&str>) -> Option<i64> {
    let raw = value?.trim();
    if raw.is_empty() || raw == NULL_PLACEHOLDER || raw.contains('-') {
        return None;
    }
    let (minutes, seconds) = raw.split_once(':')?;
    if seconds.contains(':') {
        return None;
    }
    let minutes: i64 = minutes.trim().parse().ok()?;
    let seconds = seconds_to_millis(seconds.trim())?;
    minutes.checked_mul(MILLIS_PER_MINUTE)?.checked_add(seconds)
}

/// Render milliseconds as `M:SS.mmm`, the inverse of [`parse_lap_time`].
///
/// Negative durations have no lap-time form.
pub fn format_lap_time(millis: i64) -> Option<String> {
    if millis < 0 {
        return None;
    }
    let minutes = millis / MILLIS_PER_MINUTE;
    let rest = millis % MILLIS_PER_MINUTE;
    Some(format!("{minutes}:{:02}.{:03}", rest / 1000, rest % 1000))
}

/// Convert the seconds part to whole milliseconds.
///
/// Plain decimals are converted digit by digit so binary floating-point
/// artefacts cannot shift the truncated result. Other numeric spellings fall
/// back to `f64` parsing.
fn seconds_to_millis(value: &str) -> Option<i64> {
    if value.is_empty() {
        return None;
    }
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    let plain = !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit());
    if plain {
        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().ok()?
        };
        let mut millis = 0i64;
        let mut scale = 100i64;
        for digit in fraction.bytes().take(3) {
            millis += i64::from(digit - b'0') * scale;
            scale /= 10;
        }
        return whole.checked_mul(1000)?.checked_add(millis);
    }
    let seconds: f64 = value.parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    let millis = (seconds * 1000.0).trunc();
    if millis > i64::MAX as f64 {
        return None;
    }
    Some(millis as i64)
}
