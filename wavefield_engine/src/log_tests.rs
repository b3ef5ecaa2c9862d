//! Unit tests for log.rs
//!
//! Tests LogSeverity, LogEntry, DefaultLogger formatting, and DebugTrace.

use crate::log::{DebugTrace, DefaultLogger, LogEntry, LogSeverity, Logger};
use crate::wavefield::Engine;
use chrono::{Duration, Local};
use serial_test::serial;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

// ============================================================================
// HELPERS
// ============================================================================

struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

fn capture() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(CaptureLogger { entries: entries.clone() });
    entries
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn trace_messages(entries: &Arc<Mutex<Vec<LogEntry>>>) -> Vec<String> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.source == "wavefield::trace-test")
        .map(|e| e.message.clone())
        .collect()
}

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "wavefield::Material".to_string(),
        message: "vertex shader failed".to_string(),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_have_fixed_width() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_format_plain_without_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Warn, None, None));
    assert!(line.contains("[WARN ]"));
    assert!(line.ends_with("[wavefield::Material] vertex shader failed"));
}

#[test]
fn test_format_plain_with_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Error, Some("material.rs"), Some(88)));
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with("vertex shader failed (material.rs:88)"));
}

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger;
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        logger.log(&entry(severity, None, None));
        logger.log(&entry(severity, Some("test.rs"), Some(1)));
    }
}

#[test]
fn test_logger_trait_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
}

// ============================================================================
// DEBUG TRACE TESTS
// ============================================================================

#[test]
#[serial]
fn test_disabled_trace_emits_nothing() {
    let entries = capture();
    let mut trace = DebugTrace::new("wavefield::trace-test", false);

    trace.trace("resize");

    assert!(trace_messages(&entries).is_empty());
    assert!(trace.last_emitted().is_none());
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_trace_separates_bursts() {
    let entries = capture();
    let mut trace = DebugTrace::new("wavefield::trace-test", true);
    let start = Local::now();

    trace.trace_at(start, "play");
    trace.trace_at(start + Duration::milliseconds(200), "frame");
    trace.trace_at(start + Duration::milliseconds(2500), "pause");

    let messages = trace_messages(&entries);
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[0], "---");
    assert!(messages[1].ends_with("play"));
    assert!(messages[2].ends_with("frame"));
    assert_eq!(messages[3], "---");
    assert!(messages[4].ends_with("pause"));
    assert_eq!(trace.last_emitted(), Some(start + Duration::milliseconds(2500)));
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_trace_right_aligns_message() {
    let entries = capture();
    let mut trace = DebugTrace::new("wavefield::trace-test", true);

    trace.trace_at(Local::now(), "tick");

    let messages = trace_messages(&entries);
    let line = &messages[1];
    // "HH:MM:SS " followed by the 32-column gutter
    assert_eq!(line.len(), 9 + 32);
    assert!(line.ends_with(" tick"));
    Engine::reset_logger();
}
