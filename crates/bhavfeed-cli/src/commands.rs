use std::sync::Arc;

use bhavfeed_core::{
    Category, Pipeline, PipelineConfig, ReqwestTransport, RunReport, TradingDay,
};
use tracing::debug;

use crate::cli::{Cli, Command, RangeArgs};
use crate::error::CliError;

/// Run the selected command over its date range and collect one report
/// per category run.
pub async fn run(cli: &Cli) -> Result<Vec<RunReport>, CliError> {
    let (categories, range): (&[Category], &RangeArgs) = match &cli.command {
        Command::Indices(args) => (&[Category::Indices], args),
        Command::Equities(args) => (&[Category::Equities], args),
        Command::Futures(args) => (&[Category::Futures], args),
        Command::All(args) => (&Category::ALL, args),
    };

    let start = TradingDay::parse_iso(&range.start)?;
    let end = match &range.end {
        Some(end) => TradingDay::parse_iso(end)?,
        None => start,
    };
    if end < start {
        return Err(CliError::Command(String::from(
            "end date is before start date",
        )));
    }

    let config = PipelineConfig {
        output_dir: cli.output_dir.clone(),
        dry_run: cli.dry_run,
        timeout_ms: cli.timeout_ms,
    };
    let pipeline = Pipeline::new(Arc::new(ReqwestTransport::new()), config);

    let mut reports = Vec::new();
    let mut current = start;
    loop {
        if range.include_weekends || !current.is_weekend() {
            for category in categories {
                reports.push(pipeline.run(*category, current).await?);
            }
        } else {
            debug!(day = %current, "skipping weekend");
        }
        if current >= end {
            break;
        }
        let Some(next) = current.next() else { break };
        current = next;
    }

    Ok(reports)
}
