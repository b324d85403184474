use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Weekday};

use crate::error::InvalidDay;

/// Calendar day a feed file refers to (the "as-of" date).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDay(Date);

const ISO: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DAY_MONTH_YEAR: &[BorrowedFormatItem<'static>] = format_description!("[day]-[month]-[year]");
const DAY_MONTH_NAME_YEAR: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month repr:short]-[year]");

impl TradingDay {
    pub fn today() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    /// Strict `YYYY-MM-DD` parse for caller-provided dates.
    pub fn parse_iso(input: &str) -> Result<Self, InvalidDay> {
        Date::parse(input.trim(), ISO)
            .map(Self)
            .map_err(|_| InvalidDay {
                value: input.to_owned(),
            })
    }

    /// Lenient parse for upstream date cells. The sources mix
    /// `26-12-2013`, `26-Dec-2013` and `26-DEC-2013` spellings; an
    /// unreadable cell is a data-quality signal, not an error.
    pub fn parse_lenient(input: &str) -> Option<Self> {
        let token = input.trim();
        if token.is_empty() {
            return None;
        }
        if let Ok(date) = Date::parse(token, ISO) {
            return Some(Self(date));
        }
        if let Ok(date) = Date::parse(token, DAY_MONTH_YEAR) {
            return Some(Self(date));
        }
        Date::parse(&normalize_month_case(token), DAY_MONTH_NAME_YEAR)
            .ok()
            .map(Self)
    }

    pub const fn date(self) -> Date {
        self.0
    }

    pub fn is_weekend(self) -> bool {
        matches!(self.0.weekday(), Weekday::Saturday | Weekday::Sunday)
    }

    pub fn next(self) -> Option<Self> {
        self.0.next_day().map(Self)
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(&ISO)
            .expect("TradingDay must be ISO formattable")
    }
}

/// Rewrite an alphabetic month segment to title case so that `26-DEC-2013`
/// parses with the short month-name format.
fn normalize_month_case(token: &str) -> String {
    token
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) if part.chars().all(|ch| ch.is_ascii_alphabetic()) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                _ => part.to_owned(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

impl Display for TradingDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for TradingDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for TradingDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse_iso(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_iso_date() {
        let day = TradingDay::parse_iso("2014-05-28").expect("must parse");
        assert_eq!(day.date(), date!(2014 - 05 - 28));
    }

    #[test]
    fn rejects_non_iso_input() {
        let err = TradingDay::parse_iso("28-05-2014").expect_err("must fail");
        assert_eq!(err.value, "28-05-2014");
    }

    #[test]
    fn lenient_parse_accepts_source_spellings() {
        for input in ["26-12-2013", "26-Dec-2013", "26-DEC-2013", "2013-12-26"] {
            let day = TradingDay::parse_lenient(input).expect("must parse");
            assert_eq!(day.date(), date!(2013 - 12 - 26), "input {input}");
        }
    }

    #[test]
    fn lenient_parse_returns_none_on_garbage() {
        assert_eq!(TradingDay::parse_lenient(""), None);
        assert_eq!(TradingDay::parse_lenient("Date"), None);
        assert_eq!(TradingDay::parse_lenient("99-99-9999"), None);
    }

    #[test]
    fn detects_weekends() {
        assert!(TradingDay::from_date(date!(2014 - 05 - 31)).is_weekend());
        assert!(!TradingDay::from_date(date!(2014 - 05 - 28)).is_weekend());
    }
}
