use lazy_static::lazy_static;
use regex::Regex;

use crate::{data::Record, Error, Result};

lazy_static! {
    static ref ENTRY_REGEX: Regex = Regex::new(
        r"^(?P<session>\(\d+\)) (?P<month>\d+)/(?P<day>\d+)/(?P<year>\d+) (?P<time>\d+:\d+:\d+) (?P<meridiem>[AP]M) - (?P<user>\w+-?\w+) \((?P<ip>\d+\.\d+\.\d+\.\d+)\)"
    )
    .unwrap();
}

/// Parses every entry, logging and skipping those which don't fit the server's format.
pub fn parse_entries<S: AsRef<str>>(entries: &[S]) -> Vec<Record> {
    let records: Vec<Record> = entries
        .iter()
        .map(|entry| entry.as_ref())
        .filter_map(|line| match parse_entry(line) {
            Ok(record) => Some(record),
            Err(err) => {
                log::error!("Failed to parse entry '{}': {}", line, err);
                None
            }
        })
        .collect();

    log::debug!(
        "Parsed {} entries ({} skipped)",
        records.len(),
        entries.len() - records.len()
    );

    records
}

/// Extracts a [`Record`] from one entry such as
/// `(000042) 01/15/24 10:30:00 AM - jdoe (10.0.0.1)> 226 Transfer OK`.
pub fn parse_entry(line: &str) -> Result<Record> {
    let Some(caps) = ENTRY_REGEX.captures(line) else {
        return Err(Error::NoMatch(line.to_string()));
    };

    let message = parse_message(line).ok_or_else(|| Error::NoMessage(line.to_string()))?;

    Ok(Record {
        date: format!("{}-{}-{}", &caps["year"], &caps["month"], &caps["day"]),
        time: format!("{} {}", &caps["time"], &caps["meridiem"]),
        username: caps["user"].to_string(),
        ip: caps["ip"].to_string(),
        message: message.to_string(),
    })
}

/// The message follows the last `>` on the line, separated from it by a single space.
fn parse_message(line: &str) -> Option<&str> {
    let rest = &line[line.rfind('>')? + 1..];
    let message = rest.strip_prefix(' ').unwrap_or(rest);
    (!message.is_empty()).then_some(message)
}
