use colored::*;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

mod colors;

/// The four levels the CLI layer logs at. Distinct from `diagnostic`'s
/// `Diagnostic`/`Severity`: these are operational session events (phase
/// started, file loaded), not source-level errors.
#[derive(Debug)]
pub enum LogType<'a> {
  Error(&'a str),
  Warn(&'a str),
  Info(&'a str),
  Debug(&'a str),
}

impl<'a> fmt::Display for LogType<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LogType::Error(msg) => write!(f, "{} {}", "[error]".red().bold(), msg.red().bold()),
      LogType::Warn(msg) => write!(f, "{} {}", "[warn]".yellow().bold(), msg.yellow().bold()),
      LogType::Info(msg) => write!(f, "{} {}", "[info]".cyan().bold(), msg.cyan().bold()),
      LogType::Debug(msg) => write!(f, "{} {}", "[debug]", msg),
    }
  }
}

/// A session logger. Always prints to the console; optionally mirrors each
/// line to a file sink when constructed with [`Logger::with_file`].
pub struct Logger {
  file_path: Option<PathBuf>,
}

impl Default for Logger {
  fn default() -> Self {
    Self { file_path: None }
  }
}

impl Logger {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_file(path: impl Into<PathBuf>) -> Self {
    Self {
      file_path: Some(path.into()),
    }
  }

  pub fn log(&self, log: LogType) -> String {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let log_str = format!("[{}] {}", now, log);

    println!("{}", log_str);
    if let Some(path) = &self.file_path {
      Self::log_to_file(path, &log_str);
    }
    log_str
  }

  pub fn info(&self, msg: &str) -> String {
    self.log(LogType::Info(msg))
  }

  pub fn warn(&self, msg: &str) -> String {
    self.log(LogType::Warn(msg))
  }

  pub fn error(&self, msg: &str) -> String {
    self.log(LogType::Error(msg))
  }

  pub fn debug(&self, msg: &str) -> String {
    self.log(LogType::Debug(msg))
  }

  /// Logs which pipeline phase is executing, e.g. "scanning", "parsing".
  pub fn phase(&self, phase: &str) -> String {
    self.info(&format!("{phase}..."))
  }

  fn log_to_file(path: &PathBuf, log_str: &str) {
    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() {
        let _ = fs::create_dir_all(parent);
      }
    }

    let file_handler = OpenOptions::new().create(true).append(true).open(path);
    match file_handler {
      Ok(file) => {
        let mut writer = io::BufWriter::new(file);
        if let Err(e) = writeln!(writer, "{}", log_str) {
          eprintln!("failed to write to log file: {}", e);
        }
      },
      Err(e) => {
        eprintln!("failed to open or create log file {}: {}", path.display(), e);
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn formats_info_line_with_timestamp_prefix() {
    let logger = Logger::new();
    let line = logger.log(LogType::Info("hello"));
    assert!(line.contains("hello"));
  }

  #[test]
  fn phase_wraps_message_with_ellipsis() {
    let logger = Logger::new();
    let line = logger.phase("parsing");
    assert!(line.contains("parsing..."));
  }
}
