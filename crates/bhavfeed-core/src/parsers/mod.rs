//! Category-specific wire-shape parsers.
//!
//! Each source publishes a different raw shape; one parser per category
//! owns that knowledge and produces [`RawRecord`]s in input order. Any
//! required re-sort happens later in the pipeline, never here.

mod equities;
mod futures;
mod indices;

pub use equities::EquitiesParser;
pub use futures::FuturesParser;
pub use indices::IndicesParser;

use crate::domain::RawRecord;
use crate::Category;

/// Fetched input for one category run, decoded to text. Zip payloads are
/// already extracted by the time a parser sees them.
#[derive(Debug, Clone, Default)]
pub struct FeedPayload {
    /// Main bhavcopy table.
    pub primary: String,
    /// Secondary table merged in by some categories (VIX history for
    /// indices, delivery data for equities).
    pub auxiliary: Option<String>,
}

impl FeedPayload {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            auxiliary: None,
        }
    }

    pub fn with_auxiliary(mut self, auxiliary: impl Into<String>) -> Self {
        self.auxiliary = Some(auxiliary.into());
        self
    }
}

/// Common contract for turning one category's payload into raw records.
pub trait FeedParser: Send + Sync {
    fn category(&self) -> Category;

    /// Produce raw records in input-file order.
    fn parse(&self, payload: &FeedPayload) -> Vec<RawRecord>;
}

/// Parser variant for a category tag.
pub fn parser_for(category: Category) -> &'static dyn FeedParser {
    match category {
        Category::Indices => &IndicesParser,
        Category::Equities => &EquitiesParser,
        Category::Futures => &FuturesParser,
    }
}

/// Split one delimited table into positional raw records. Short rows pad
/// with empty tokens, long rows drop the surplus, blank rows are skipped.
pub(crate) fn read_rows(input: &str, names: &'static [&'static str]) -> Vec<RawRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else { continue };
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(RawRecord::from_tokens(names, record.iter()));
    }
    rows
}
