use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("DB Connection Error {0}")]
    DbConn(rusqlite::Error),
    #[error("SQLite Error {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO Error {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML Error {0}")]
    SerdeYaml(#[from] serde_yaml::Error),
    #[error("No entries to load in \"{0}\"")]
    NoEntries(PathBuf),
    #[error("No match for line \"{0}\"")]
    NoMatch(String),
    #[error("No message in line \"{0}\"")]
    NoMessage(String),
    #[error("Invalid table name \"{0}\"")]
    InvalidTable(String),
    #[error("Invalid log level \"{0}\"")]
    InvalidLevel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
