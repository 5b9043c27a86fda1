use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("{0}")]
    Load(#[from] ftplog_parse::Error),
    #[error("Unable to open log output: {0}")]
    LogOutput(io::Error),
    #[error("IO Error {0}")]
    Io(#[from] io::Error),
    #[error("Unable to write records: {0}")]
    Output(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LoaderError>;
