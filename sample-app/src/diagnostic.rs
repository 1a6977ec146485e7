use std::{
    fmt,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use chrono::Local;
use log::debug;
use thiserror::Error;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};

pub const SPEED_LOG_PATH: &str = "logs/vehicle/crash_diagnostic";
pub const SPEED_LOGGER_NAME: &str = "speed";

const LOG_FILE_SUFFIX: &str = "log";
const MAX_LOG_FILES: usize = 5;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

#[derive(Error, Debug)]
pub enum DiagnosticLogError {
    #[error("Unable to prepare diagnostic log directory {path:?}: {source}")]
    Directory { path: PathBuf, source: io::Error },
    #[error("Unable to create diagnostic log appender: {0}")]
    Appender(#[from] InitError),
}

/// A rotating file log used to keep a short history of vehicle values for crash diagnostics.
///
/// A new file is started every minute and only the most recent files are kept.
/// Each line has the form `<local time> [<name>] - <message>`.
pub struct DiagnosticLog {
    name: String,
    directory: PathBuf,
    writer: Mutex<RollingFileAppender>,
}

impl DiagnosticLog {
    /// Create the log in `directory`, removing any files left from a previous run.
    pub fn create<P: AsRef<Path>>(directory: P, name: &str) -> Result<Self, DiagnosticLogError> {
        let directory = directory.as_ref().to_path_buf();
        clear_directory(&directory).map_err(|source| DiagnosticLogError::Directory {
            path: directory.clone(),
            source,
        })?;

        let writer = RollingFileAppender::builder()
            .rotation(Rotation::MINUTELY)
            .filename_prefix(name)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(MAX_LOG_FILES)
            .build(&directory)?;

        debug!("Diagnostic log {name} writing to {}", directory.display());
        Ok(Self {
            name: name.into(),
            directory,
            writer: Mutex::new(writer),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Append a line to the log
    pub fn record(&self, message: fmt::Arguments<'_>) -> io::Result<()> {
        let line = format!(
            "{} [{}] - {}\n",
            Local::now().format(TIMESTAMP_FORMAT),
            self.name,
            message
        );
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}

fn clear_directory(directory: &Path) -> io::Result<()> {
    fs::create_dir_all(directory)?;
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
