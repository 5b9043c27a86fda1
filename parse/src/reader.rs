use std::path::Path;

use crate::{Error, Result};

/// Marks sessions which never authenticated; these carry nothing worth loading.
const NOT_LOGGED_IN: &str = "(not logged in)";

/// Entries written by the FTP server begin with their session id, e.g. `(000012)`.
pub fn is_entry(line: &str) -> bool {
    line.starts_with('(') && !line.contains(NOT_LOGGED_IN)
}

/// Reads the entries worth parsing from `path`, in file order and without line terminators.
///
/// Returns [`Error::NoEntries`] when nothing is left after filtering, so the caller can stop
/// before connecting to the database.
pub fn read_entries(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = std::fs::read(path)?;
    // The server does not guarantee UTF-8 in user supplied paths
    let contents = String::from_utf8_lossy(&contents);

    let entries: Vec<String> = contents
        .lines()
        .filter(|line| is_entry(line))
        .map(str::to_string)
        .collect();

    if entries.is_empty() {
        log::info!("Found no entries to load. Terminating.");
        return Err(Error::NoEntries(path.to_path_buf()));
    }

    log::debug!("Read {} entries from {}", entries.len(), path.display());
    Ok(entries)
}
