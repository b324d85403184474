use crate::domain::TradingDay;

/// One logical row of raw input: raw field name → unparsed token, in the
/// order the source published the fields. Transient; consumed by the
/// record mapper immediately after parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(&'static str, String)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record by zipping positional tokens against the wire
    /// field names. Missing trailing cells become empty tokens; surplus
    /// cells are dropped.
    pub fn from_tokens<'a, I>(names: &'static [&'static str], tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tokens = tokens.into_iter();
        let fields = names
            .iter()
            .map(|name| (*name, tokens.next().unwrap_or("").to_owned()))
            .collect();
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, token)| token.as_str())
    }

    /// Insert or overwrite a field, preserving first-insertion order.
    pub fn set(&mut self, name: &'static str, token: impl Into<String>) {
        let token = token.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => *existing = token,
            None => self.fields.push((name, token)),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Typed value of one canonical field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Symbol(String),
    Day(Option<TradingDay>),
    Price(f64),
    Quantity(u64),
}

impl FieldValue {
    /// Cell text as written to the output table: prices carry two
    /// decimals, absent days render empty.
    pub fn render(&self) -> String {
        match self {
            Self::Symbol(symbol) => symbol.clone(),
            Self::Day(Some(day)) => day.format_iso(),
            Self::Day(None) => String::new(),
            Self::Price(value) => format!("{value:.2}"),
            Self::Quantity(value) => value.to_string(),
        }
    }

    pub fn as_price(&self) -> Option<f64> {
        match self {
            Self::Price(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_quantity(&self) -> Option<u64> {
        match self {
            Self::Quantity(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_day(&self) -> Option<TradingDay> {
        match self {
            Self::Day(day) => *day,
            _ => None,
        }
    }
}

/// Identity used for final ordering and duplicate removal. For futures
/// the symbol already carries the series ordinal suffix, so symbol + day
/// is unique across every category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    pub symbol: String,
    pub day: Option<TradingDay>,
}

/// Fully normalized record. Field set and order always match the
/// category schema; no raw sentinel survives into one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    key: RecordKey,
    fields: Vec<(&'static str, FieldValue)>,
}

impl CanonicalRecord {
    pub(crate) fn new(key: RecordKey, fields: Vec<(&'static str, FieldValue)>) -> Self {
        Self { key, fields }
    }

    pub fn key(&self) -> &RecordKey {
        &self.key
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Rendered cells in schema order.
    pub fn cells(&self) -> Vec<String> {
        self.fields.iter().map(|(_, value)| value.render()).collect()
    }
}
