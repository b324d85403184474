//! Per-category canonical field definitions.
//!
//! A schema fixes the output shape: which canonical fields exist, in
//! which order, which raw fields feed them, and which sanitization rule
//! applies. Schemas are immutable statics; raw fields no triple names
//! are dropped on mapping (the registry describes the output, it does
//! not validate the input).

use crate::Category;

/// How a raw token becomes a typed canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Identifier text, uppercased with interior spaces stripped.
    Symbol,
    /// Trading-day cell parsed leniently; failures become absent values.
    Day,
    /// Decimal price; dash/blank sentinels mean zero. Open/high/low/close
    /// additionally go through the OHLC cross-check as a group.
    Price,
    /// Integral count; dash/blank sentinels mean zero.
    Quantity,
}

/// One canonical output field and the raw fields that can feed it, in
/// preference order.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub canonical: &'static str,
    pub raw: &'static [&'static str],
    pub kind: ValueKind,
}

/// Ordered canonical shape for one category.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub category: Category,
    pub fields: &'static [FieldSpec],
}

pub const SYMBOL: &str = "Symbol";
pub const DATE: &str = "Date";
pub const OPEN: &str = "Open";
pub const HIGH: &str = "High";
pub const LOW: &str = "Low";
pub const CLOSE: &str = "Close";
pub const VOLUME: &str = "Volume";
pub const OPEN_INTEREST: &str = "OI";

const fn field(
    canonical: &'static str,
    raw: &'static [&'static str],
    kind: ValueKind,
) -> FieldSpec {
    FieldSpec {
        canonical,
        raw,
        kind,
    }
}

const INDICES_FIELDS: [FieldSpec; 8] = [
    field(SYMBOL, &["Symbol"], ValueKind::Symbol),
    field(DATE, &["Date"], ValueKind::Day),
    field(OPEN, &["Open"], ValueKind::Price),
    field(HIGH, &["High"], ValueKind::Price),
    field(LOW, &["Low"], ValueKind::Price),
    field(CLOSE, &["Close"], ValueKind::Price),
    field(VOLUME, &["Volume"], ValueKind::Quantity),
    field(OPEN_INTEREST, &["OI"], ValueKind::Quantity),
];

const EQUITIES_FIELDS: [FieldSpec; 8] = [
    field(SYMBOL, &["Symbol"], ValueKind::Symbol),
    field(DATE, &["Date"], ValueKind::Day),
    field(OPEN, &["Open"], ValueKind::Price),
    field(HIGH, &["High"], ValueKind::Price),
    field(LOW, &["Low"], ValueKind::Price),
    field(CLOSE, &["Close"], ValueKind::Price),
    field(VOLUME, &["Volume"], ValueKind::Quantity),
    field(OPEN_INTEREST, &["OI"], ValueKind::Quantity),
];

// Futures settle against the exchange settlement price, and activity is
// counted in contracts rather than shares.
const FUTURES_FIELDS: [FieldSpec; 8] = [
    field(SYMBOL, &["Symbol"], ValueKind::Symbol),
    field(DATE, &["Date"], ValueKind::Day),
    field(OPEN, &["Open"], ValueKind::Price),
    field(HIGH, &["High"], ValueKind::Price),
    field(LOW, &["Low"], ValueKind::Price),
    field(CLOSE, &["Settlement_Price", "Close"], ValueKind::Price),
    field(VOLUME, &["Contracts"], ValueKind::Quantity),
    field(OPEN_INTEREST, &["OI"], ValueKind::Quantity),
];

static INDICES: Schema = Schema {
    category: Category::Indices,
    fields: &INDICES_FIELDS,
};
static EQUITIES: Schema = Schema {
    category: Category::Equities,
    fields: &EQUITIES_FIELDS,
};
static FUTURES: Schema = Schema {
    category: Category::Futures,
    fields: &FUTURES_FIELDS,
};

impl Schema {
    pub fn for_category(category: Category) -> &'static Schema {
        match category {
            Category::Indices => &INDICES,
            Category::Equities => &EQUITIES,
            Category::Futures => &FUTURES,
        }
    }

    /// Canonical field names in output order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|spec| spec.canonical).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_shares_the_canonical_order() {
        let expected = vec![SYMBOL, DATE, OPEN, HIGH, LOW, CLOSE, VOLUME, OPEN_INTEREST];
        for category in Category::ALL {
            assert_eq!(Schema::for_category(category).field_names(), expected);
        }
    }

    #[test]
    fn futures_close_prefers_settlement_price() {
        let schema = Schema::for_category(Category::Futures);
        let close = schema
            .fields
            .iter()
            .find(|spec| spec.canonical == CLOSE)
            .expect("close field");
        assert_eq!(close.raw, ["Settlement_Price", "Close"]);
    }
}
