//! # bhavfeed Core
//!
//! Normalization pipeline for NSE end-of-day market data.
//!
//! ## Overview
//!
//! The exchange publishes each data category in a different raw shape:
//! wide multi-section text dumps, delimited tables with dash sentinels
//! for "no trade", inconsistent field naming, and zipped archives. This
//! crate folds all of them into one canonical tabular record per
//! category and writes deterministic, correctly-ordered CSV output.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`archive`] | Zip extraction for bhavcopy archives |
//! | [`category`] | Category tags (Indices, Equities, Futures) |
//! | [`domain`] | Raw and canonical record types |
//! | [`error`] | Run-level errors and recoverable warnings |
//! | [`mapper`] | Schema-driven raw → canonical transform |
//! | [`parsers`] | One wire-shape parser per category |
//! | [`pipeline`] | Fetch → parse → map → finalize → write orchestration |
//! | [`sanitize`] | Sentinel and OHLC sanitization rules |
//! | [`schema`] | Per-category canonical field registry |
//! | [`sources`] | Remote endpoints and output naming |
//! | [`table`] | Delimited table writer/reader |
//! | [`transport`] | Download trait with reqwest and test transports |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bhavfeed_core::{Pipeline, PipelineConfig, ReqwestTransport, TradingDay};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = Pipeline::new(
//!         Arc::new(ReqwestTransport::new()),
//!         PipelineConfig::default(),
//!     );
//!
//!     let day = TradingDay::parse_iso("2014-05-28")?;
//!     let report = pipeline.process_equities(Some(day)).await?;
//!     println!("wrote {:?} with {} warnings", report.written, report.warnings.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! A malformed record never aborts a run: it is skipped and reported in
//! the run's warnings. Transport failures on the primary file, payloads
//! of the wrong shape, and feeds where every record is malformed are
//! fatal, and nothing is written in those cases — a partial output file
//! never exists.

pub mod archive;
pub mod category;
pub mod domain;
pub mod error;
pub mod mapper;
pub mod parsers;
pub mod pipeline;
pub mod sanitize;
pub mod schema;
pub mod sources;
pub mod table;
pub mod transport;

// Re-export commonly used types at crate root for convenience

pub use category::Category;
pub use domain::{CanonicalRecord, FieldValue, RawRecord, RecordKey, TradingDay};
pub use error::{InvalidDay, MalformedValue, RunError, RunWarning};
pub use mapper::RecordMapper;
pub use parsers::{parser_for, FeedParser, FeedPayload};
pub use pipeline::{Pipeline, PipelineConfig, RunReport, RunState};
pub use schema::{FieldSpec, Schema, ValueKind};
pub use sources::{output_name, source_files, SourceFile, VIX_MERGE_DAY};
pub use transport::{FetchRequest, ReqwestTransport, StaticTransport, Transport, TransportError};
