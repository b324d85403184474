//! Per-category run orchestration.
//!
//! One [`Pipeline`] drives fetch → parse → map → finalize → write for a
//! category and trading day. Runs share nothing mutable: three pipeline
//! calls may execute in parallel tasks without coordination, since the
//! schema registry is read-only and each run owns its record sequences
//! exclusively.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::archive;
use crate::domain::{CanonicalRecord, TradingDay};
use crate::error::{RunError, RunWarning};
use crate::mapper::RecordMapper;
use crate::parsers::{parser_for, FeedPayload};
use crate::schema::Schema;
use crate::sources::{output_name, source_files};
use crate::table;
use crate::transport::{FetchRequest, Transport};
use crate::Category;

/// Tunables for a pipeline instance. `dry_run` replaces any notion of a
/// global debugging switch: a dry pipeline logs the downloads it would
/// perform and touches neither network nor disk.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub timeout_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("processed_data"),
            dry_run: false,
            timeout_ms: 30_000,
        }
    }
}

/// Progress of one category run. `Failed` is reachable from every other
/// state and is reported through [`RunError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Fetching,
    Parsing,
    Mapping,
    Finalizing,
    Done,
    Failed,
}

/// Outcome of one successful category run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub category: Category,
    pub day: TradingDay,
    pub state: RunState,
    pub written: Vec<PathBuf>,
    pub record_count: usize,
    pub warnings: Vec<RunWarning>,
}

/// Sequences one run per category: fetch through an injected transport,
/// parse, map, finalize, and hand the result to the table writer.
pub struct Pipeline {
    transport: Arc<dyn Transport>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(transport: Arc<dyn Transport>, config: PipelineConfig) -> Self {
        Self { transport, config }
    }

    pub async fn process_indices(&self, day: Option<TradingDay>) -> Result<RunReport, RunError> {
        self.run(Category::Indices, day.unwrap_or_else(TradingDay::today))
            .await
    }

    pub async fn process_equities(&self, day: Option<TradingDay>) -> Result<RunReport, RunError> {
        self.run(Category::Equities, day.unwrap_or_else(TradingDay::today))
            .await
    }

    pub async fn process_futures(&self, day: Option<TradingDay>) -> Result<RunReport, RunError> {
        self.run(Category::Futures, day.unwrap_or_else(TradingDay::today))
            .await
    }

    /// Run one category for one trading day.
    pub async fn run(&self, category: Category, day: TradingDay) -> Result<RunReport, RunError> {
        info!(%category, %day, "processing feed");
        let mut warnings = Vec::new();

        let mut state = RunState::Fetching;
        debug!(?state, "run state");
        if self.config.dry_run {
            for file in source_files(category, day) {
                info!(url = %file.url, "dry run: would fetch");
            }
            return Ok(RunReport {
                category,
                day,
                state: RunState::Done,
                written: Vec::new(),
                record_count: 0,
                warnings,
            });
        }
        let payload = self.fetch_payload(category, day, &mut warnings).await?;

        state = RunState::Parsing;
        debug!(?state, "run state");
        let raw = parser_for(category).parse(&payload);
        debug!(count = raw.len(), "parsed raw records");

        state = RunState::Mapping;
        debug!(?state, "run state");
        let mapper = RecordMapper::new(category);
        let mut records = Vec::with_capacity(raw.len());
        for (row, record) in raw.iter().enumerate() {
            match mapper.map(record) {
                Ok(mapped) => records.push(mapped),
                Err(malformed) => {
                    warn!(row, %malformed, "skipping malformed record");
                    warnings.push(RunWarning::malformed(row, malformed));
                }
            }
        }
        if !raw.is_empty() && records.is_empty() {
            // an empty-but-successful output would be indistinguishable
            // from a holiday, so a fully unparsable feed is fatal
            return Err(RunError::AllRecordsMalformed {
                category,
                total: raw.len(),
            });
        }

        state = RunState::Finalizing;
        debug!(?state, "run state");
        let records = finalize(records);

        state = RunState::Done;
        let mut written = Vec::new();
        if records.is_empty() {
            warn!(%category, %day, "no records available; nothing written");
        } else {
            table::ensure_folder(&self.config.output_dir)?;
            let path = self.config.output_dir.join(output_name(category, day));
            let field_names = Schema::for_category(category).field_names();
            table::write_table(&path, &field_names, &records)?;
            info!(path = %path.display(), rows = records.len(), "table written");
            written.push(path);
        }

        Ok(RunReport {
            category,
            day,
            state,
            written,
            record_count: records.len(),
            warnings,
        })
    }

    /// Fetch every source file for the run. The primary file is fatal on
    /// failure; auxiliary files degrade to warnings. Zip payloads are
    /// extracted here so parsers always see plain text.
    async fn fetch_payload(
        &self,
        category: Category,
        day: TradingDay,
        warnings: &mut Vec<RunWarning>,
    ) -> Result<FeedPayload, RunError> {
        let mut payload = FeedPayload::default();
        for (index, file) in source_files(category, day).into_iter().enumerate() {
            info!(url = %file.url, "fetching");
            let request = FetchRequest::new(&file.url)
                .with_default_headers()
                .with_timeout_ms(self.config.timeout_ms);

            let bytes = match self.transport.fetch(request).await {
                Ok(bytes) => bytes,
                Err(error) if file.required => {
                    return Err(RunError::Transport {
                        url: file.url,
                        reason: error.message().to_owned(),
                    });
                }
                Err(error) => {
                    warn!(url = %file.url, %error, "auxiliary file unavailable; continuing without it");
                    warnings.push(RunWarning::AuxiliaryUnavailable {
                        url: file.url,
                        reason: error.message().to_owned(),
                    });
                    continue;
                }
            };

            let bytes = if file.zipped {
                archive::csv_entry(&file.url, &bytes)?
            } else {
                bytes
            };
            let text = String::from_utf8_lossy(&bytes).into_owned();
            if index == 0 {
                payload.primary = text;
            } else {
                payload.auxiliary = Some(text);
            }
        }
        Ok(payload)
    }
}

/// Deterministic output order independent of upstream row order: stable
/// sort by key after dropping duplicate keys, keeping the first
/// occurrence from input order.
fn finalize(mut records: Vec<CanonicalRecord>) -> Vec<CanonicalRecord> {
    let mut seen = std::collections::HashSet::new();
    records.retain(|record| seen.insert(record.key().clone()));
    records.sort_by(|a, b| a.key().cmp(b.key()));
    records
}
