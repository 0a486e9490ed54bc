//! Property tests for the lap-time codec.

use f1_transform::{format_lap_time, parse_lap_time};
use proptest::prelude::*;

proptest! {
    #[test]
    fn decode_inverts_encode(minutes in 0i64..600, millis in 0i64..60_000) {
        let total = minutes * 60_000 + millis;
        let encoded = format_lap_time(total).expect("non-negative");
        prop_assert_eq!(parse_lap_time(Some(&encoded)), Some(total));
    }

    #[test]
    fn decode_recovers_minutes_and_seconds(minutes in 0i64..600, seconds in 0i64..60, millis in 0i64..1000) {
        let text = format!("{minutes}:{seconds:02}.{millis:03}");
        let decoded = parse_lap_time(Some(&text)).expect("valid lap time");
        prop_assert_eq!(decoded / 60_000, minutes);
        prop_assert_eq!(decoded % 60_000, seconds * 1000 + millis);
    }

    #[test]
    fn extra_digits_are_truncated(minutes in 0i64..10, millis in 0i64..60_000, extra in 0u32..10_000) {
        let text = format!("{minutes}:{:02}.{:03}{extra:04}", millis / 1000, millis % 1000);
        prop_assert_eq!(parse_lap_time(Some(&text)), Some(minutes * 60_000 + millis));
    }

    #[test]
    fn arbitrary_text_never_panics(text in ".{0,16}") {
        let _ = parse_lap_time(Some(&text));
    }
}
