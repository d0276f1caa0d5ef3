//! Action log for the command line front end
//!
//! Every record is echoed to stderr and, when a log file is open, appended
//! to it as one JSON object per line.

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Directory under the home directory holding the log and saved options
pub const APP_DIR_NAME: &str = ".pdf_booklet_creator";
pub const LOG_FILE_NAME: &str = "pdf_booklet_creator.log";
pub const CONFIG_FILE_NAME: &str = "pdf_booklet_config.json";

pub fn app_dir() -> Option<PathBuf> {
    dirs_next::home_dir().map(|home| home.join(APP_DIR_NAME))
}

pub fn default_log_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join(LOG_FILE_NAME))
}

pub fn default_config_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Open `path` for appending, creating it and its directory if needed
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

pub struct ActionLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

impl ActionLogger {
    pub fn new(level: LevelFilter, file: Option<File>) -> Self {
        Self {
            level,
            file: file.map(Mutex::new),
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

/// Name of a level as written to the action log
fn entry_type(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warning",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

fn json_line(timestamp: &DateTime<Local>, level: Level, target: &str, message: &str) -> String {
    serde_json::json!({
        "timestamp": timestamp.to_rfc3339(),
        "type": entry_type(level),
        "target": target,
        "message": message,
    })
    .to_string()
}

impl log::Log for ActionLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Local::now();
        let message = record.args().to_string();
        eprintln!(
            "[{}] [{}] {}",
            timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            message
        );

        if let Some(file) = &self.file {
            let line = json_line(&timestamp, record.level(), record.target(), &message);
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{}", line);
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}
