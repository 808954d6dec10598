//! Leveled diagnostics sink.
//!
//! A `Logger` is constructed explicitly and handed to the lexer, parser and
//! analyzer. It gates messages on an enable flag and a minimum level and
//! forwards each record to `tracing`. A capturing logger also keeps every
//! emitted record so callers (and tests) can inspect them.

use std::{fmt::Display, str::FromStr, sync::Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            other => Err(format!("unknown log level `{}`", other)),
        }
    }
}

impl From<Level> for tracing::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Debug => tracing::Level::DEBUG,
            Level::Info => tracing::Level::INFO,
            Level::Warning => tracing::Level::WARN,
            Level::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]: {}", self.level, self.message)
    }
}

#[derive(Debug)]
pub struct Logger {
    enabled: bool,
    min_level: Level,
    capture: bool,
    records: Mutex<Vec<Diagnostic>>,
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new(true, Level::Debug)
    }
}

impl Logger {
    /// A logger that keeps every emitted record.
    pub fn new(enabled: bool, min_level: Level) -> Self {
        Logger {
            enabled,
            min_level,
            capture: true,
            records: Mutex::new(vec![]),
        }
    }

    /// A logger that only forwards to `tracing`. `records` stays empty.
    pub fn streaming(enabled: bool, min_level: Level) -> Self {
        Logger {
            capture: false,
            ..Logger::new(enabled, min_level)
        }
    }

    /// A logger that drops everything.
    pub fn disabled() -> Self {
        Logger::new(false, Level::Error)
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        self.enabled && level >= self.min_level
    }

    pub fn log(&self, level: Level, message: impl Into<String>) {
        if !self.is_enabled(level) {
            return;
        }

        let message = message.into();
        match level {
            Level::Debug => tracing::debug!("{}", message),
            Level::Info => tracing::info!("{}", message),
            Level::Warning => tracing::warn!("{}", message),
            Level::Error => tracing::error!("{}", message),
        }

        if !self.capture {
            return;
        }

        // Records stay readable after a poisoned lock
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.push(Diagnostic { level, message });
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    /// Snapshot of everything emitted so far.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn records_at(&self, level: Level) -> Vec<Diagnostic> {
        self.records()
            .into_iter()
            .filter(|record| record.level == level)
            .collect()
    }
}
