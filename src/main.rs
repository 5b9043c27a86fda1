mod error;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use ftplog_parse::{Config, LoadOutcome, Source, SqliteConnector};

use error::{LoaderError, Result};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    /// YAML configuration file; built-in defaults are used when omitted
    config: Option<PathBuf>,
    #[arg(short, long, conflicts_with = "file")]
    /// Load the log written on this day (YYYY-MM-DD) instead of yesterday's
    date: Option<NaiveDate>,
    #[arg(short, long)]
    /// Load this log file instead of locating one by date
    file: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    /// Print parsed records as JSON lines instead of loading them
    dry_run: bool,
    #[arg(short, long)]
    /// Enable verbose logging
    verbose: bool,
    #[arg(short, long)]
    /// Enable extra verbose logging
    extra_verbose: bool,
}

impl Args {
    fn source(&self) -> Source {
        match (&self.file, self.date) {
            (Some(path), _) => Source::File(path.clone()),
            (None, Some(day)) => Source::Day(day),
            (None, None) => Source::Yesterday,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(err) => {
                // The configured sink is unknown, so report on stderr
                init_stderr_logger(&args);
                log::error!("Invalid configuration {:?}: {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    if let Err(err) = init_logger(level_filter(&args, &config), config.logging.file.as_deref()) {
        init_stderr_logger(&args);
        log::error!("{}", err);
        return ExitCode::FAILURE;
    }

    if let Some(path) = &args.config {
        log::debug!("Loaded config from {:?}", path);
    }
    log::info!("Starting scheduled run...");

    match load(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(level) = failure_level(&err) {
                log::log!(level, "Run failed: {}", err);
            }
            ExitCode::FAILURE
        }
    }
}

/// Level to report a failed run at, or `None` when the failure was already logged where it
/// happened. An empty log is only informational.
fn failure_level(err: &LoaderError) -> Option<log::Level> {
    match err {
        LoaderError::Load(ftplog_parse::Error::NoEntries(_) | ftplog_parse::Error::DbConn(_)) => {
            None
        }
        _ => Some(log::Level::Error),
    }
}

fn load(args: &Args, config: &Config) -> Result<()> {
    let source = args.source();

    if args.dry_run {
        let records = ftplog_parse::parse_file(source.path(config))?;
        let mut stdout = std::io::stdout().lock();
        for record in &records {
            serde_json::to_writer(&mut stdout, record)?;
            writeln!(stdout)?;
        }
        log::info!("Parsed {} entries (dry run)", records.len());
        return Ok(());
    }

    let connector = SqliteConnector::from(&config.database);
    let summary = ftplog_parse::run(config, &source, &connector)?;

    match summary.outcome {
        LoadOutcome::Inserted(count) => log::debug!(
            "Finished '{}': {} entries, {} parsed, {} inserted",
            summary.path.display(),
            summary.entries,
            summary.parsed,
            count
        ),
        LoadOutcome::Failed => log::debug!(
            "Finished '{}': {} entries, {} parsed, none inserted",
            summary.path.display(),
            summary.entries,
            summary.parsed
        ),
    }

    Ok(())
}

fn level_filter(args: &Args, config: &Config) -> log::LevelFilter {
    if args.extra_verbose {
        log::LevelFilter::Trace
    } else if args.verbose {
        log::LevelFilter::Debug
    } else {
        // Already validated by Config::load
        config
            .logging
            .level_filter()
            .unwrap_or(log::LevelFilter::Info)
    }
}

fn init_logger(level_filter: log::LevelFilter, file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::builder();
    builder.format_timestamp_millis().filter_level(level_filter);

    if let Some(path) = file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(LoaderError::LogOutput)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn init_stderr_logger(args: &Args) {
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(level_filter(args, &Config::default()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_defaults_to_yesterday() {
        let args = Args::parse_from(["ftplog-loader"]);
        assert_eq!(args.source(), Source::Yesterday);
    }

    #[test]
    fn source_from_date() {
        let args = Args::parse_from(["ftplog-loader", "--date", "2024-01-15"]);
        assert_eq!(
            args.source(),
            Source::Day(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
    }

    #[test]
    fn source_from_file() {
        let args = Args::parse_from(["ftplog-loader", "-f", "/tmp/fzs-2024-01-15.log", "-v"]);
        assert_eq!(
            args.source(),
            Source::File(PathBuf::from("/tmp/fzs-2024-01-15.log"))
        );
        assert!(args.verbose);
    }

    #[test]
    fn date_and_file_conflict() {
        let parsed = Args::try_parse_from([
            "ftplog-loader",
            "--date",
            "2024-01-15",
            "--file",
            "x.log",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn invalid_date_is_rejected() {
        assert!(Args::try_parse_from(["ftplog-loader", "--date", "15/01/2024"]).is_err());
    }

    #[test]
    fn empty_log_is_not_reported_as_failure() {
        let err = LoaderError::Load(ftplog_parse::Error::NoEntries(PathBuf::from(
            "fzs-2024-01-15.log",
        )));
        assert_eq!(failure_level(&err), None);
    }

    #[test]
    fn connection_failure_is_not_reported_twice() {
        let err = LoaderError::Load(ftplog_parse::Error::DbConn(
            rusqlite::Error::InvalidQuery,
        ));
        assert_eq!(failure_level(&err), None);
    }

    #[test]
    fn unreadable_log_is_reported_as_error() {
        let err = LoaderError::Load(ftplog_parse::Error::Io(std::io::Error::from(
            std::io::ErrorKind::NotFound,
        )));
        assert_eq!(failure_level(&err), Some(log::Level::Error));
    }

    #[test]
    fn verbosity_flags_override_configured_level() {
        let config = Config::from_yaml("logging:\n  level: warn\n").unwrap();
        let args = Args::parse_from(["ftplog-loader"]);
        assert_eq!(level_filter(&args, &config), log::LevelFilter::Warn);
        let args = Args::parse_from(["ftplog-loader", "-v"]);
        assert_eq!(level_filter(&args, &config), log::LevelFilter::Debug);
        let args = Args::parse_from(["ftplog-loader", "-e"]);
        assert_eq!(level_filter(&args, &config), log::LevelFilter::Trace);
    }
}
