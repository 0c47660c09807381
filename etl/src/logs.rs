//! Pipeline progress logging.
//!
//! Each stage reports progress as [`LogEntry`] values. They are printed to
//! stdout and published on a broadcast channel so that library callers can
//! follow a run as it happens.

use once_cell::sync::Lazy;
use tokio::sync::broadcast;

/// Entries buffered per subscriber before the oldest are dropped.
const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
}

impl LogLevel {
    fn marker(self) -> &'static str {
        match self {
            LogLevel::Info => "",
            LogLevel::Success => "✓ ",
            LogLevel::Warning => "⚠️ ",
        }
    }
}

/// One progress line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth under the current stage
    pub depth: u8,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), depth: 0 }
    }

    pub fn nested(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// The line as printed: three spaces per depth level plus one for the
    /// stage itself, then the level marker.
    pub fn render(&self) -> String {
        let pad = "   ".repeat(self.depth as usize + 1);
        format!("{}{}{}", pad, self.level.marker(), self.message)
    }
}

/// Process-wide progress channel.
pub static LOG_BROADCASTER: Lazy<LogBroadcaster> = Lazy::new(LogBroadcaster::new);

pub struct LogBroadcaster {
    sender: broadcast::Sender<LogEntry>,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn log(&self, entry: LogEntry) {
        println!("{}", entry.render());
        // Err only means nobody is subscribed
        let _ = self.sender.send(entry);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_info(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::new(LogLevel::Info, msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::new(LogLevel::Success, msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::new(LogLevel::Warning, msg));
}

/// Info line nested `depth` levels under the current stage, e.g. per table.
pub fn log_info_indent(msg: impl Into<String>, depth: u8) {
    LOG_BROADCASTER.log(LogEntry::new(LogLevel::Info, msg).nested(depth));
}
