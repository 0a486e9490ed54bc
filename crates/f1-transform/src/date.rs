//! Race date cleaning.

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a calendar date, accepting a date-time and keeping its date part.
pub fn parse_race_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|datetime| datetime.date())
        })
}

/// A race date after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceDate {
    Parsed(NaiveDate),
    /// The cell was missing or unparsable.
    Sentinel(NaiveDate),
}

impl RaceDate {
    pub fn date(self) -> NaiveDate {
        match self {
            RaceDate::Parsed(date) | RaceDate::Sentinel(date) => date,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, RaceDate::Sentinel(_))
    }
}

/// Parsed date, or `sentinel` when the cell is missing or unparsable.
pub fn clean_race_date(value: Option<&str>, sentinel: NaiveDate) -> RaceDate {
    match value.and_then(parse_race_date) {
        Some(date) => RaceDate::Parsed(date),
        None => RaceDate::Sentinel(sentinel),
    }
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentinel() -> NaiveDate {
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()
    }

    #[test]
    fn parses_supported_formats() {
        let expected = NaiveDate::from_ymd_opt(2008, 3, 16).unwrap();
        assert_eq!(parse_race_date("2008-03-16"), Some(expected));
        assert_eq!(parse_race_date("2008/03/16"), Some(expected));
        assert_eq!(parse_race_date("16/03/2008"), Some(expected));
        assert_eq!(parse_race_date("2008-03-16 04:30:00"), Some(expected));
    }

    #[test]
    fn substitutes_sentinel() {
        let fallback = RaceDate::Sentinel(sentinel());
        assert_eq!(clean_race_date(None, sentinel()), fallback);
        assert_eq!(clean_race_date(Some("\\N"), sentinel()), fallback);
        assert_eq!(clean_race_date(Some("2008-02-30"), sentinel()), fallback);
        let cleaned = clean_race_date(Some(""), sentinel());
        assert!(cleaned.is_sentinel());
        assert_eq!(format_iso_date(cleaned.date()), "1900-01-01");
    }

    #[test]
    fn keeps_parsed_dates() {
        let cleaned = clean_race_date(Some("2008-03-16"), sentinel());
        assert!(!cleaned.is_sentinel());
        assert_eq!(format_iso_date(cleaned.date()), "2008-03-16");
    }
}
