use std::path::PathBuf;

use chrono::{Local, NaiveDate, TimeDelta};

use crate::Config;

/// Path of the log the FTP server wrote on `day`, e.g. `fzs-2024-01-15.log`.
pub fn log_file_for(config: &Config, day: NaiveDate) -> PathBuf {
    let file_name = format!(
        "{}{}{}",
        config.file_prefix,
        day.format("%Y-%m-%d"),
        config.file_suffix
    );
    config.log_dir.join(file_name)
}

pub fn yesterday() -> NaiveDate {
    Local::now().date_naive() - TimeDelta::days(1)
}

pub fn yesterday_log_file(config: &Config) -> PathBuf {
    let path = log_file_for(config, yesterday());
    log::info!("checking file {} for entries", path.display());
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            log_dir: PathBuf::from("/srv/ftp/logs"),
            ..Config::default()
        }
    }

    #[test]
    fn builds_name_from_prefix_date_and_suffix() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(
            log_file_for(&config(), day),
            PathBuf::from("/srv/ftp/logs/fzs-2024-01-05.log")
        );
    }

    #[test]
    fn yesterday_crosses_month_and_year() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() - TimeDelta::days(1);
        assert_eq!(
            log_file_for(&config(), day),
            PathBuf::from("/srv/ftp/logs/fzs-2023-12-31.log")
        );
    }

    #[test]
    fn yesterday_log_file_uses_config() {
        let path = yesterday_log_file(&config());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("fzs-"));
        assert!(name.ends_with(".log"));
        assert_eq!(path.parent().unwrap(), PathBuf::from("/srv/ftp/logs"));
    }
}
