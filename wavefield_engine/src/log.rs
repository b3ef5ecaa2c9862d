//! Logging system for the Wavefield engine
//!
//! - Pluggable `Logger` trait (replace the sink with `Engine::set_logger`)
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default
//! - File and line information for ERROR logs
//! - `DebugTrace`, an owned verbose tracer that remembers when it last spoke

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Duration, Local};

/// Logger trait for custom logging implementations
///
/// Shader compile and link diagnostics, resource errors and verbose traces
/// all end up here.
///
/// # Example
///
/// ```no_run
/// use wavefield_engine::wavefield::log::{Logger, LogEntry};
///
/// struct ConsoleBuffer {
///     lines: std::sync::Mutex<Vec<String>>,
/// }
///
/// impl Logger for ConsoleBuffer {
///     fn log(&self, entry: &LogEntry) {
///         self.lines.lock().unwrap().push(entry.message.clone());
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "wavefield::Material", "wavefield::webgl")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose frame-level information
    Trace,

    /// Development/debugging information
    Debug,

    /// Important informational messages
    Info,

    /// Warning messages (degraded but working)
    Warn,

    /// Error messages (shader failures, missing resources)
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by the console output
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl DefaultLogger {
    /// Render an entry to a plain (uncolored) line
    pub fn format_plain(entry: &LogEntry) -> String {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f");
        match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, entry.severity.label(), entry.source, entry.message, file, line
            ),
            _ => format!(
                "[{}] [{}] [{}] {}",
                timestamp, entry.severity.label(), entry.source, entry.message
            ),
        }
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let label = entry.severity.label();
        let severity_str = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, entry.message, file, line
            );
        } else {
            println!("[{}] [{}] [{}] {}", timestamp, severity_str, source, entry.message);
        }
    }
}

// ===== DEBUG TRACE =====

/// Column the trace message is right-aligned to
const TRACE_GUTTER: usize = 32;

/// Verbose tracer owned by whoever emits the trace (the animation controller)
///
/// Messages go to the engine logger at Debug severity. When more than one
/// second passed since the previous message a `---` separator is emitted
/// first, so bursts of activity read as groups.
#[derive(Debug, Clone)]
pub struct DebugTrace {
    source: &'static str,
    enabled: bool,
    last_emitted: Option<DateTime<Local>>,
}

impl DebugTrace {
    pub fn new(source: &'static str, enabled: bool) -> Self {
        Self { source, enabled, last_emitted: None }
    }

    /// Time of the last emitted message
    pub fn last_emitted(&self) -> Option<DateTime<Local>> {
        self.last_emitted
    }

    /// Emit a trace message stamped with the current local time
    pub fn trace(&mut self, message: &str) {
        self.trace_at(Local::now(), message);
    }

    /// Emit a trace message stamped with `now`
    pub fn trace_at(&mut self, now: DateTime<Local>, message: &str) {
        if !self.enabled {
            return;
        }

        let quiet_gap = self
            .last_emitted
            .map_or(true, |last| now - last > Duration::seconds(1));
        if quiet_gap {
            crate::wavefield::Engine::log(LogSeverity::Debug, self.source, "---".to_string());
        }

        crate::wavefield::Engine::log(
            LogSeverity::Debug,
            self.source,
            format!("{} {:>width$}", now.format("%H:%M:%S"), message, width = TRACE_GUTTER),
        );
        self.last_emitted = Some(now);
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
///
/// ```no_run
/// # use wavefield_engine::engine_trace;
/// engine_trace!("wavefield::Mesh", "drawing {} indices", 24);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::wavefield::Engine::log(
            $crate::wavefield::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::wavefield::Engine::log(
            $crate::wavefield::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::wavefield::Engine::log(
            $crate::wavefield::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::wavefield::Engine::log(
            $crate::wavefield::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
///
/// ```no_run
/// # use wavefield_engine::engine_error;
/// engine_error!("wavefield::Material", "Failed to link program: {}", "missing main");
/// ```
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::wavefield::Engine::log_detailed(
            $crate::wavefield::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
