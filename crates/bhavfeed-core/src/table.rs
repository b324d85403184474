//! Delimited output-table collaborator.

use std::path::Path;

use crate::domain::CanonicalRecord;
use crate::error::RunError;

/// Idempotent output-folder creation.
pub fn ensure_folder(path: &Path) -> Result<(), RunError> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Persist the finalized sequence. The header carries the canonical
/// field names in schema order; rows are written exactly as given,
/// comma-delimited with `\n` terminators.
pub fn write_table(
    path: &Path,
    field_names: &[&str],
    records: &[CanonicalRecord],
) -> Result<(), RunError> {
    let table_error = |source: csv::Error| RunError::Table {
        path: path.to_owned(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(table_error)?;

    writer.write_record(field_names).map_err(table_error)?;
    for record in records {
        writer.write_record(record.cells()).map_err(table_error)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a written table back as a header row plus token rows. Exists so
/// tests can verify the write/read round trip.
pub fn read_table(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>), RunError> {
    let table_error = |source: csv::Error| RunError::Table {
        path: path.to_owned(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(table_error)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(table_error)?;
        rows.push(record.iter().map(str::to_owned).collect());
    }
    if rows.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }
    let header = rows.remove(0);
    Ok((header, rows))
}
