//! Zip payload handling for the bhavcopy archives.

use std::io::{Cursor, Read};

use crate::error::RunError;

/// Extract every file entry of a zip payload. A payload that is not a
/// zip archive is an unsupported shape, fatal to the run.
pub fn extract_archive(name: &str, bytes: &[u8]) -> Result<Vec<(String, Vec<u8>)>, RunError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|error| {
        RunError::UnsupportedPayload {
            name: name.to_owned(),
            reason: error.to_string(),
        }
    })?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|error| RunError::UnsupportedPayload {
                name: name.to_owned(),
                reason: error.to_string(),
            })?;
        if !file.is_file() {
            continue;
        }
        let mut contents = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut contents)?;
        entries.push((file.name().to_owned(), contents));
    }
    Ok(entries)
}

/// The single `.csv` table expected inside a bhavcopy archive.
pub fn csv_entry(name: &str, bytes: &[u8]) -> Result<Vec<u8>, RunError> {
    extract_archive(name, bytes)?
        .into_iter()
        .find(|(entry, _)| entry.to_ascii_lowercase().ends_with(".csv"))
        .map(|(_, contents)| contents)
        .ok_or_else(|| RunError::UnsupportedPayload {
            name: name.to_owned(),
            reason: String::from("archive holds no csv table"),
        })
}
