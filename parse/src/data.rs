use serde::Serialize;

/// One FTP server log entry, in the column order of the target table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// `yy-mm-dd`, reordered from the server's `mm/dd/yy`
    pub date: String,
    /// `hh:mm:ss` followed by the AM/PM marker
    pub time: String,
    pub username: String,
    pub ip: String,
    pub message: String,
}
