//! Value-level transformations for the racing warehouse.
//!
//! - **laptime**: `M:SS.mmm` lap times to integer milliseconds and back
//! - **numeric**: numeric coercion with zero-fill and NaN propagation
//! - **date**: race date parsing with sentinel substitution
//! - **text**: derived text columns

pub mod date;
pub mod laptime;
pub mod numeric;
pub mod text;

pub use date::{RaceDate, clean_race_date, format_iso_date, parse_race_date};
pub use laptime::{format_lap_time, parse_lap_time};
pub use numeric::{
    fill_nan_zero, integer_or_zero, parse_integer, parse_numeric, positions_gained, real_or_zero,
};
pub use text::full_name;
