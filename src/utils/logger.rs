//! Logger utility for application-wide logging
//!
//! This module provides a file logger that works alongside the standard
//! log crate, plus a console fallback through env_logger.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Level, Metadata, LevelFilter};

/// File-backed logger
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
        })
    }

    /// Logger that discards messages, for library use without a log file
    pub fn disabled() -> Self {
        Logger {
            file: Mutex::new(None),
        }
    }

    /// Logs a message to the log file
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Logs the formatted table of a dataset, one line per row
    pub fn log_rows(&self, rows: &[crate::dataset::DisplayRow]) -> io::Result<()> {
        self.log("N°\tX\tY\tX Transformado\tY Transformado")?;
        for row in rows {
            self.log(&format!("{}\t{}\t{}\t{}\t{}", row.position, row.x, row.y, row.x_target, row.y_target))?;
        }
        Ok(())
    }

    /// Install a file logger as the global `log` backend
    pub fn init_global_logger(log_file: &str) -> io::Result<()> {
        let global_logger = Logger::new(log_file)?;

        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(LevelFilter::Debug);
        Ok(())
    }

    /// Install env_logger on stderr; `RUST_LOG` overrides the default level
    pub fn init_console_logger(verbose: bool) {
        let default_level = if verbose { "debug" } else { "warn" };
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .format_timestamp(None)
            .try_init();
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = Logger::log(self, &message);
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DisplayRow;

    #[test]
    fn test_log_rows_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coordkit.log");
        let logger = Logger::new(path.to_str().unwrap()).unwrap();

        logger.log_rows(&[DisplayRow {
            position: 1,
            x: "-74.0800000".to_string(),
            y: "4.6000000".to_string(),
            x_target: String::new(),
            y_target: String::new(),
        }]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("1\t-74.0800000\t4.6000000\t\t"));
    }

    #[test]
    fn test_global_logger_writes_log_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coordkit-debug.log");
        Logger::init_global_logger(path.to_str().unwrap()).unwrap();

        log::info!("global logger ready");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[INFO] global logger ready"));
    }

    #[test]
    fn test_disabled_logger_accepts_messages() {
        assert!(Logger::disabled().log("ignored").is_ok());
    }
}
