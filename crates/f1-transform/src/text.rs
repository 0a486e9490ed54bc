//! Text derivations for dimension rows.

/// `forename surname`, or missing if either part is missing.
pub fn full_name(forename: Option<&str>, surname: Option<&str>) -> Option<String> {
    match (forename, surname) {
        (Some(forename), Some(surname)) => Some(format!("{forename} {surname}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_single_space() {
        assert_eq!(
            full_name(Some("Lewis"), Some("Hamilton")).as_deref(),
            Some("Lewis Hamilton")
        );
        assert_eq!(full_name(Some("Lewis"), None), None);
        assert_eq!(full_name(None, Some("Hamilton")), None);
    }
}
