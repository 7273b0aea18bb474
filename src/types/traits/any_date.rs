use chrono::{NaiveDate, NaiveDateTime};

/// Anything that can be read as a single calendar date.
///
/// Implemented for [`NaiveDate`], [`NaiveDateTime`] (time part dropped) and ISO
/// `YYYY-MM-DD` strings. Strings that carry a trailing time component, like
/// `2024-01-01T00:00:00` or `2024-01-01 06:00`, are accepted as well.
pub trait AnyDate {
    fn get_date(self) -> Option<NaiveDate>;
}

impl AnyDate for NaiveDate {
    fn get_date(self) -> Option<NaiveDate> {
        Some(self)
    }
}

impl AnyDate for NaiveDateTime {
    fn get_date(self) -> Option<NaiveDate> {
        Some(self.date())
    }
}

impl AnyDate for &str {
    fn get_date(self) -> Option<NaiveDate> {
        let trimmed = self.trim();
        if let Ok(naive_date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Some(naive_date);
        }
        // Date followed by a time part
        let date_part = trimmed.get(..10)?;
        match trimmed[10..].chars().next() {
            Some('T') | Some(' ') => NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok(),
            _ => None,
        }
    }
}

impl AnyDate for &String {
    fn get_date(self) -> Option<NaiveDate> {
        self.as_str().get_date()
    }
}

impl AnyDate for String {
    fn get_date(self) -> Option<NaiveDate> {
        self.as_str().get_date()
    }
}
