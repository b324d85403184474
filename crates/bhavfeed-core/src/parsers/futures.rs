use std::collections::HashMap;

use crate::domain::{RawRecord, TradingDay};
use crate::sanitize;
use crate::Category;

use super::{read_rows, FeedParser, FeedPayload};

/// Raw column layout of `fo*bhav.csv`.
const BHAV_FIELDS: &[&str] = &[
    "Instrument",
    "Symbol",
    "Expiry_Date",
    "Strike_Price",
    "Option_Type",
    "Open",
    "High",
    "Low",
    "Close",
    "Settlement_Price",
    "Contracts",
    "Turnover_lakh",
    "OI",
    "OI_Change",
    "Date",
];

/// Instrument codes that belong to the futures feed; option rows arrive
/// interleaved in the same file and are skipped.
const FUTURE_INSTRUMENTS: &[&str] = &["FUTIDX", "FUTIVX", "FUTSTK"];

/// Series ordinal suffixes, nearest expiry first.
const SERIES_SUFFIXES: &[&str] = &[
    "-I", "-II", "-III", "-IV", "-V", "-VI", "-VII", "-VIII", "-IX", "-X", "-XI", "-XII", "-XIII",
    "-XIV", "-XV", "-XVI",
];

/// NSE derivatives bhavcopy. A symbol's contract series (one row per
/// expiry) interleave with other instruments in one file; rows group by
/// composite instrument identity and the output symbol carries the
/// series ordinal (`NIFTY-I` is the nearest expiry).
pub struct FuturesParser;

impl FeedParser for FuturesParser {
    fn category(&self) -> Category {
        Category::Futures
    }

    fn parse(&self, payload: &FeedPayload) -> Vec<RawRecord> {
        // group rows by instrument identity, keeping the first row
        // published for a duplicated identity
        let mut order: Vec<String> = Vec::new();
        let mut by_symbol: HashMap<String, Vec<(SeriesId, RawRecord)>> = HashMap::new();

        for record in read_rows(&payload.primary, BHAV_FIELDS) {
            let instrument = record.get("Instrument").unwrap_or("").trim();
            if !FUTURE_INSTRUMENTS.contains(&instrument) {
                continue;
            }
            let id = SeriesId::of(&record);
            let series = by_symbol.entry(id.symbol.clone()).or_insert_with(|| {
                order.push(id.symbol.clone());
                Vec::new()
            });
            if series.iter().any(|(existing, _)| *existing == id) {
                continue;
            }
            series.push((id, record));
        }

        let mut records = Vec::new();
        for symbol in order {
            let mut series = by_symbol.remove(&symbol).unwrap_or_default();
            series.sort_by_key(|(id, _)| id.expiry_order());
            for (position, (_, mut record)) in series.into_iter().enumerate() {
                let Some(suffix) = SERIES_SUFFIXES.get(position) else {
                    break;
                };
                record.set("Symbol", format!("{symbol}{suffix}"));
                records.push(record);
            }
        }
        records
    }
}

/// Composite instrument identity: a futures row is keyed by symbol,
/// expiry and option type together, never by the symbol column alone.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SeriesId {
    symbol: String,
    expiry: String,
    option_type: String,
}

impl SeriesId {
    fn of(record: &RawRecord) -> Self {
        Self {
            symbol: sanitize::normalize_symbol(record.get("Symbol").unwrap_or("")),
            expiry: record.get("Expiry_Date").unwrap_or("").trim().to_owned(),
            option_type: record.get("Option_Type").unwrap_or("").trim().to_owned(),
        }
    }

    /// Series sort rank: parsed expiries ascending, unreadable expiries
    /// last in raw-token order.
    fn expiry_order(&self) -> (u8, Option<TradingDay>, String) {
        match TradingDay::parse_lenient(&self.expiry) {
            Some(day) => (0, Some(day), String::new()),
            None => (1, None, self.expiry.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BHAV: &str = "\
INSTRUMENT,SYMBOL,EXPIRY_DT,STRIKE_PR,OPTION_TYP,OPEN,HIGH,LOW,CLOSE,SETTLE_PR,CONTRACTS,VAL_INLAKH,OPEN_INT,CHG_IN_OI,TIMESTAMP
FUTIDX,NIFTY,31-JUL-2014,0,XX,7350.00,7400.00,7300.00,7380.00,7381.20,210,15000.00,81000,1200,28-MAY-2014
OPTIDX,NIFTY,26-JUN-2014,7400,CE,80.00,95.00,75.00,88.00,88.50,5000,4000.00,250000,10000,28-MAY-2014
FUTIDX,NIFTY,26-JUN-2014,0,XX,7320.00,7360.00,7290.00,7340.00,7341.05,4200,310000.00,1650000,-3200,28-MAY-2014
FUTSTK,ABB,26-JUN-2014,0,XX,1010.00,1025.00,1005.00,1018.00,1019.35,320,3200.00,64000,500,28-MAY-2014
FUTIDX,NIFTY,26-JUN-2014,0,XX,9999.00,9999.00,9999.00,9999.00,9999.00,1,1.00,1,0,28-MAY-2014
";

    #[test]
    fn keeps_only_future_instruments() {
        let records = FuturesParser.parse(&FeedPayload::new(BHAV));
        assert!(records
            .iter()
            .all(|record| record.get("Instrument").unwrap().starts_with("FUT")));
    }

    #[test]
    fn suffixes_series_by_expiry_nearest_first() {
        let records = FuturesParser.parse(&FeedPayload::new(BHAV));
        let symbols: Vec<_> = records
            .iter()
            .map(|record| record.get("Symbol").unwrap())
            .collect();
        assert_eq!(symbols, ["NIFTY-I", "NIFTY-II", "ABB-I"]);
        // the June contract sorts ahead of the July one even though the
        // July row came first in the file
        assert_eq!(records[0].get("Expiry_Date"), Some("26-JUN-2014"));
        assert_eq!(records[1].get("Expiry_Date"), Some("31-JUL-2014"));
    }

    #[test]
    fn duplicate_identity_keeps_first_row() {
        let records = FuturesParser.parse(&FeedPayload::new(BHAV));
        // the second 26-JUN NIFTY row is a duplicate identity and is dropped
        assert_eq!(records[0].get("Settlement_Price"), Some("7341.05"));
        assert_eq!(records.len(), 3);
    }
}
