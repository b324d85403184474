//! Schema-driven transform from one raw record to one canonical record.

use crate::domain::{CanonicalRecord, FieldValue, RawRecord, RecordKey, TradingDay};
use crate::error::MalformedValue;
use crate::sanitize;
use crate::schema::{Schema, ValueKind, CLOSE, DATE, HIGH, LOW, OPEN, SYMBOL};
use crate::Category;

/// Maps raw records into the category's canonical shape. Pure: the same
/// raw record always maps to the same canonical record, and a failure
/// affects only the record it occurred in.
#[derive(Debug, Clone, Copy)]
pub struct RecordMapper {
    schema: &'static Schema,
}

impl RecordMapper {
    pub fn new(category: Category) -> Self {
        Self {
            schema: Schema::for_category(category),
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn map(&self, raw: &RawRecord) -> Result<CanonicalRecord, MalformedValue> {
        let mut fields = Vec::with_capacity(self.schema.fields.len());
        for spec in self.schema.fields {
            let token = first_present(raw, spec.raw);
            let value = match spec.kind {
                ValueKind::Symbol => FieldValue::Symbol(sanitize::normalize_symbol(token)),
                ValueKind::Day => FieldValue::Day(TradingDay::parse_lenient(token)),
                ValueKind::Price => FieldValue::Price(
                    sanitize::parse_price(token)
                        .map_err(|reason| MalformedValue::new(spec.canonical, token, reason))?,
                ),
                ValueKind::Quantity => FieldValue::Quantity(
                    sanitize::parse_quantity(token)
                        .map_err(|reason| MalformedValue::new(spec.canonical, token, reason))?,
                ),
            };
            fields.push((spec.canonical, value));
        }

        cross_check_ohlc(&mut fields);

        let key = derive_key(&fields);
        Ok(CanonicalRecord::new(key, fields))
    }
}

/// First raw field present on the record wins; a fully absent field maps
/// like a blank cell.
fn first_present<'a>(raw: &'a RawRecord, names: &[&'static str]) -> &'a str {
    names.iter().find_map(|name| raw.get(name)).unwrap_or("")
}

fn cross_check_ohlc(fields: &mut [(&'static str, FieldValue)]) {
    let price_of = |fields: &[(&'static str, FieldValue)], name: &str| {
        fields
            .iter()
            .find(|(field, _)| *field == name)
            .and_then(|(_, value)| value.as_price())
    };

    let (Some(open), Some(high), Some(low), Some(close)) = (
        price_of(fields, OPEN),
        price_of(fields, HIGH),
        price_of(fields, LOW),
        price_of(fields, CLOSE),
    ) else {
        return;
    };

    let (open, high, low, close) = sanitize::sanitize_ohlc(open, high, low, close);
    for (name, value) in fields.iter_mut() {
        match *name {
            OPEN => *value = FieldValue::Price(open),
            HIGH => *value = FieldValue::Price(high),
            LOW => *value = FieldValue::Price(low),
            CLOSE => *value = FieldValue::Price(close),
            _ => {}
        }
    }
}

fn derive_key(fields: &[(&'static str, FieldValue)]) -> RecordKey {
    let mut symbol = String::new();
    let mut day = None;
    for (name, value) in fields {
        match *name {
            SYMBOL => {
                if let Some(text) = value.as_symbol() {
                    symbol = text.to_owned();
                }
            }
            DATE => day = value.as_day(),
            _ => {}
        }
    }
    RecordKey { symbol, day }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{OPEN_INTEREST, VOLUME};
    use time::macros::date;

    fn equities_row() -> RawRecord {
        let mut raw = RawRecord::new();
        raw.set("Symbol", "ABC");
        raw.set("Date", "28-MAY-2014");
        raw.set("Open", "-");
        raw.set("High", "105.5");
        raw.set("Low", "-");
        raw.set("Close", "104.0");
        raw.set("Volume", "1200");
        raw.set("OI", "");
        raw
    }

    #[test]
    fn maps_dash_sentinels_to_zero_without_clamping() {
        let mapper = RecordMapper::new(Category::Equities);
        let record = mapper.map(&equities_row()).expect("must map");

        assert_eq!(record.get(SYMBOL).unwrap().as_symbol(), Some("ABC"));
        assert_eq!(record.get(OPEN).unwrap().as_price(), Some(0.0));
        assert_eq!(record.get(HIGH).unwrap().as_price(), Some(105.5));
        assert_eq!(record.get(LOW).unwrap().as_price(), Some(0.0));
        assert_eq!(record.get(CLOSE).unwrap().as_price(), Some(104.0));
        assert_eq!(record.get(VOLUME).unwrap().as_quantity(), Some(1200));
        assert_eq!(record.get(OPEN_INTEREST).unwrap().as_quantity(), Some(0));
    }

    #[test]
    fn mapping_is_deterministic() {
        let mapper = RecordMapper::new(Category::Equities);
        let raw = equities_row();
        let first = mapper.map(&raw).expect("must map");
        let second = mapper.map(&raw).expect("must map");
        assert_eq!(first, second);
    }

    #[test]
    fn output_fields_follow_schema_order() {
        let mapper = RecordMapper::new(Category::Equities);
        let record = mapper.map(&equities_row()).expect("must map");
        let names: Vec<_> = record.field_names().collect();
        assert_eq!(
            names,
            Schema::for_category(Category::Equities).field_names()
        );
    }

    #[test]
    fn garbage_numeric_cell_is_reported_not_zeroed() {
        let mut raw = equities_row();
        raw.set("High", "n/a");
        let mapper = RecordMapper::new(Category::Equities);
        let err = mapper.map(&raw).expect_err("must fail");
        assert_eq!(err.field, HIGH);
        assert_eq!(err.token, "n/a");
    }

    #[test]
    fn unparsable_date_becomes_absent_value() {
        let mut raw = equities_row();
        raw.set("Date", "not a date");
        let mapper = RecordMapper::new(Category::Equities);
        let record = mapper.map(&raw).expect("must map");
        assert_eq!(record.get(DATE).unwrap().as_day(), None);
        assert_eq!(record.key().day, None);
    }

    #[test]
    fn futures_close_reads_settlement_price() {
        let mut raw = RawRecord::new();
        raw.set("Symbol", "NIFTY-I");
        raw.set("Date", "28-MAY-2014");
        raw.set("Open", "7300.0");
        raw.set("High", "7350.0");
        raw.set("Low", "7280.0");
        raw.set("Close", "7310.0");
        raw.set("Settlement_Price", "7321.55");
        raw.set("Contracts", "4521");
        raw.set("OI", "120000");

        let mapper = RecordMapper::new(Category::Futures);
        let record = mapper.map(&raw).expect("must map");
        assert_eq!(record.get(CLOSE).unwrap().as_price(), Some(7321.55));
        assert_eq!(record.get(VOLUME).unwrap().as_quantity(), Some(4521));
    }

    #[test]
    fn derives_symbol_and_day_key() {
        let mapper = RecordMapper::new(Category::Equities);
        let record = mapper.map(&equities_row()).expect("must map");
        assert_eq!(record.key().symbol, "ABC");
        assert_eq!(
            record.key().day.map(|day| day.date()),
            Some(date!(2014 - 05 - 28))
        );
    }

    #[test]
    fn unmapped_raw_fields_are_dropped() {
        let mut raw = equities_row();
        raw.set("ISIN", "INE000A01001");
        raw.set("Series", "EQ");
        let mapper = RecordMapper::new(Category::Equities);
        let record = mapper.map(&raw).expect("must map");
        assert!(record.get("ISIN").is_none());
        assert!(record.get("Series").is_none());
    }
}
