//! Domain types shared across the pipeline: the lifecycle goes
//! [`RawRecord`] (parser output) → [`CanonicalRecord`] (mapper output),
//! keyed by [`RecordKey`] for final ordering and deduplication.

mod day;
mod record;

pub use day::TradingDay;
pub use record::{CanonicalRecord, FieldValue, RawRecord, RecordKey};
