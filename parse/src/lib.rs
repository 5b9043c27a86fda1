use std::path::{Path, PathBuf};

use chrono::NaiveDate;

pub mod config;
pub mod data;
pub mod database;
mod error;
pub mod locator;
pub mod parser;
pub mod reader;
#[cfg(test)]
mod test_util;

pub use config::Config;
pub use data::Record;
pub use database::{insert_entries, Connector, LoadOutcome, SqliteConnector, Store};
pub use error::Error;
pub use error::Result;

/// Which log file a run should load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Yesterday,
    Day(NaiveDate),
    File(PathBuf),
}

impl Source {
    pub fn path(&self, config: &Config) -> PathBuf {
        match self {
            Source::Yesterday => locator::yesterday_log_file(config),
            Source::Day(day) => {
                let path = locator::log_file_for(config, *day);
                log::info!("checking file {} for entries", path.display());
                path
            }
            Source::File(path) => {
                log::info!("checking file {} for entries", path.display());
                path.clone()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub path: PathBuf,
    /// Lines which looked like entries
    pub entries: usize,
    /// Entries which parsed into records
    pub parsed: usize,
    pub outcome: LoadOutcome,
}

/// Reads and parses the entries of one log file without touching the database.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let entries = reader::read_entries(path)?;
    Ok(parser::parse_entries(&entries))
}

/// Loads the log selected by `source` through `connector`.
///
/// Fails without connecting when the file is unreadable or holds no entries.
pub fn run<C: Connector>(config: &Config, source: &Source, connector: &C) -> Result<Summary> {
    let path = source.path(config);
    let entries = reader::read_entries(&path)?;
    let records = parser::parse_entries(&entries);
    let outcome = insert_entries(connector, &records)?;

    Ok(Summary {
        path,
        entries: entries.len(),
        parsed: records.len(),
        outcome,
    })
}
