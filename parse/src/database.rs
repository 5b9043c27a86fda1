use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use crate::config::DatabaseConfig;
use crate::{data::Record, Error, Result};

/// Opens connections to wherever records are loaded.
pub trait Connector {
    type Store: Store;

    fn connect(&self) -> Result<Self::Store>;
}

/// An open connection. Dropping it closes the connection.
pub trait Store {
    /// Writes all `records` in one transaction and commits, returning the number of rows written.
    fn insert_batch(&mut self, records: &[Record]) -> Result<usize>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Inserted(usize),
    Failed,
}

/// Connects and inserts `records` in a single batch.
///
/// A connection failure is returned as an error. A failed insert is only logged, since there is
/// nothing left to do with the records. The connection is closed before returning either way.
pub fn insert_entries<C: Connector>(connector: &C, records: &[Record]) -> Result<LoadOutcome> {
    log::debug!("Connecting to database...");
    let mut store = match connector.connect() {
        Ok(store) => store,
        Err(err) => {
            log::error!("Error connecting to database: {}", err);
            return Err(err);
        }
    };
    log::info!("Connection established.");

    let outcome = match store.insert_batch(records) {
        Ok(count) => {
            log::info!("Inserted {} entries to database.", count);
            LoadOutcome::Inserted(count)
        }
        Err(err) => {
            log::error!("Problem encountered during insert to database: {}", err);
            LoadOutcome::Failed
        }
    };

    drop(store);
    Ok(outcome)
}

pub struct SqliteConnector {
    path: PathBuf,
    table: String,
}

pub struct SqliteStore {
    conn: Connection,
    table: String,
}

impl SqliteConnector {
    pub fn new(path: impl AsRef<Path>, table: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            table: table.into(),
        }
    }
}

impl From<&DatabaseConfig> for SqliteConnector {
    fn from(config: &DatabaseConfig) -> Self {
        Self::new(&config.path, config.table.as_str())
    }
}

impl Connector for SqliteConnector {
    type Store = SqliteStore;

    fn connect(&self) -> Result<SqliteStore> {
        log::debug!(
            "Opening database with {{ path: '{}', table: '{}' }}",
            self.path.display(),
            self.table
        );
        let conn = Connection::open(&self.path).map_err(Error::DbConn)?;
        conn.execute_batch(&format!(
            "
            CREATE TABLE IF NOT EXISTS {} (
                date TEXT NOT NULL,
                time TEXT NOT NULL,
                username TEXT NOT NULL,
                ip TEXT NOT NULL,
                message TEXT NOT NULL
            );",
            self.table
        ))?;

        Ok(SqliteStore {
            conn,
            table: self.table.clone(),
        })
    }
}

impl Store for SqliteStore {
    fn insert_batch(&mut self, records: &[Record]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut statement = tx.prepare(&format!(
                "
                INSERT INTO {}
                    (date, time, username, ip, message)
                VALUES (?1, ?2, ?3, ?4, ?5)",
                self.table
            ))?;
            for record in records {
                statement.execute(params![
                    record.date,
                    record.time,
                    record.username,
                    record.ip,
                    record.message,
                ])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }
}

impl Drop for SqliteStore {
    fn drop(&mut self) {
        log::debug!("Closing database connection");
    }
}
