//! Logger setup for the terminal binary.
//!
//! stderr shares the tty with the game, so records only go to a file named by
//! `BLOCKFALL_LOG_PATH`. Without one, logging stays off.

use std::fs::OpenOptions;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Build the logger for an optional log file. Filters come from `RUST_LOG`,
/// defaulting to `warn`.
pub fn logger_builder(log_path: Option<&str>) -> Result<Builder> {
    let Some(path) = log_path else {
        let mut builder = Builder::new();
        builder.filter_level(LevelFilter::Off);
        return Ok(builder);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {path}"))?;

    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)));
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Record};

    fn emit(logger: &env_logger::Logger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .args(format_args!("{message}"))
                .level(level)
                .target("blockfall")
                .build(),
        );
        logger.flush();
    }

    #[test]
    fn test_no_path_disables_logging() {
        let logger = logger_builder(None).unwrap().build();
        assert_eq!(logger.filter(), LevelFilter::Off);
    }

    #[test]
    fn test_records_go_to_the_log_file() {
        let path = std::env::temp_dir().join(format!("blockfall-log-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let logger = logger_builder(path.to_str()).unwrap().build();
        emit(&logger, Level::Error, "engine stopped");

        let written = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(written.contains("engine stopped"));
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = std::env::temp_dir();
        assert!(logger_builder(dir.to_str()).is_err());
    }
}
