use std::collections::HashMap;

use crate::domain::RawRecord;
use crate::Category;

use super::{read_rows, FeedParser, FeedPayload};

/// Raw column layout of `cm*bhav.csv`; the trailing administrative
/// columns never reach the canonical shape.
const BHAV_FIELDS: &[&str] = &[
    "Symbol",
    "Series",
    "Open",
    "High",
    "Low",
    "Close",
    "LTP",
    "Prev_Close",
    "Volume",
    "Turnover",
    "Date",
    "Total_Trades",
    "ISIN",
];

/// Record-type tag of the data rows inside the MTO delivery dump.
const DELIVERY_ROW_TAG: &str = "20";

/// NSE Equities bhavcopy joined with the MTO delivery file: deliverable
/// quantity rides in the OI column, the way downstream consumers expect.
pub struct EquitiesParser;

impl FeedParser for EquitiesParser {
    fn category(&self) -> Category {
        Category::Equities
    }

    fn parse(&self, payload: &FeedPayload) -> Vec<RawRecord> {
        let delivered = payload.auxiliary.as_deref().map(delivered_quantities);

        let mut records = Vec::new();
        for mut record in read_rows(&payload.primary, BHAV_FIELDS) {
            let series = record.get("Series").unwrap_or("").trim().to_owned();
            match series.as_str() {
                // BE scrips settle trade-for-trade: everything delivered
                "BE" => {
                    let volume = record.get("Volume").unwrap_or("0").to_owned();
                    record.set("OI", volume);
                }
                "EQ" => {
                    let symbol = record.get("Symbol").unwrap_or("").trim().to_owned();
                    let quantity = delivered
                        .as_ref()
                        .and_then(|map| map.get(&(symbol, series.clone())))
                        .cloned()
                        .unwrap_or_else(|| String::from("0"));
                    record.set("OI", quantity);
                }
                // other series (and the header row) are administrative
                _ => continue,
            }
            records.push(record);
        }
        records
    }
}

/// The MTO file is a multi-section text dump; only type-20 rows carry
/// per-symbol deliverable quantities:
/// `20,<serial>,<symbol>,<series>,<traded qty>,<deliverable qty>,<pct>`.
fn delivered_quantities(input: &str) -> HashMap<(String, String), String> {
    let mut quantities = HashMap::new();
    for line in input.lines() {
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if cells.first() != Some(&DELIVERY_ROW_TAG) || cells.len() < 6 {
            continue;
        }
        quantities
            .entry((cells[2].to_owned(), cells[3].to_owned()))
            .or_insert_with(|| cells[5].to_owned());
    }
    quantities
}
