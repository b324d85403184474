use crate::domain::RawRecord;
use crate::sanitize;
use crate::Category;

use super::{read_rows, FeedParser, FeedPayload};

/// Raw column layout of `ind_close_all_*.csv`.
const BHAV_FIELDS: &[&str] = &[
    "Symbol",
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Change",
    "Change_pct",
    "Volume",
    "Turnover",
    "PE",
    "PB",
    "Div_yield",
];

/// Raw column layout of the standalone VIX history table.
const VIX_FIELDS: &[&str] = &[
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Prev_Close",
    "Change",
    "Change_pct",
];

/// NSE Indices close-of-day table, plus the standalone INDIAVIX history
/// table that existed before the VIX merge date.
pub struct IndicesParser;

impl FeedParser for IndicesParser {
    fn category(&self) -> Category {
        Category::Indices
    }

    fn parse(&self, payload: &FeedPayload) -> Vec<RawRecord> {
        let mut records = Vec::new();

        for mut record in read_rows(&payload.primary, BHAV_FIELDS) {
            if is_header(&record) {
                continue;
            }
            derive_volume(&mut record);
            record.set("OI", "0");
            records.push(record);
        }

        if let Some(vix) = payload.auxiliary.as_deref() {
            for mut record in read_rows(vix, VIX_FIELDS) {
                if is_header(&record) {
                    continue;
                }
                record.set("Symbol", "INDIAVIX");
                record.set("Volume", "0");
                record.set("OI", "0");
                records.push(record);
            }
        }

        records
    }
}

/// Both tables ship a header row; its date cell reads "Date" or
/// "Index Date" instead of a date.
fn is_header(record: &RawRecord) -> bool {
    record.get("Date").is_some_and(|token| {
        let token = token.trim();
        token.eq_ignore_ascii_case("Date") || token.eq_ignore_ascii_case("Index Date")
    })
}

/// Indices have no meaningful share volume; turnover (published in
/// crore) converted to lakh stands in for it.
fn derive_volume(record: &mut RawRecord) {
    let turnover = record.get("Turnover").unwrap_or("");
    let cleaned = sanitize::blank_to_zero(sanitize::dash_to_zero(turnover)).trim();
    if let Ok(crore) = cleaned.parse::<f64>() {
        record.set("Volume", format!("{:.0}", crore * 100.0));
    }
}
