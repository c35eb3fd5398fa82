//! Tracing set-up and the in-app event log
//!
//! The terminal is owned by the TUI, so events are never written to stdout or
//! stderr while it runs. Instead [`EventLogLayer`] formats each event into a
//! bounded [`EventLog`] that the log pane renders; an optional file layer
//! mirrors everything to disk.

use crate::config::LogConfig;
use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::fs::File;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Lines kept by default in the event log
pub const DEFAULT_LOG_CAPACITY: usize = 500;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("cannot open log file: {0}")]
    File(#[from] std::io::Error),

    #[error("global subscriber already installed: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// A formatted log event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: Level,
    pub target: String,
    pub text: String,
}

/// Shared ring buffer of formatted events
#[derive(Debug, Clone)]
pub struct EventLog {
    inner: Arc<Mutex<VecDeque<LogLine>>>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        EventLog {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogLine>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn push(&self, line: LogLine) {
        let mut lines = self.lock();
        while lines.len() >= self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Copy of all retained lines, oldest first
    pub fn lines(&self) -> Vec<LogLine> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: String,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Layer that appends every event to an [`EventLog`]
pub struct EventLogLayer {
    log: EventLog,
}

impl EventLogLayer {
    pub fn new(log: EventLog) -> Self {
        EventLogLayer { log }
    }
}

impl<S: Subscriber> Layer<S> for EventLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut text = visitor.message.unwrap_or_default();
        text.push_str(&visitor.fields);

        let metadata = event.metadata();
        self.log.push(LogLine {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            text,
        });
    }
}

/// Install the global subscriber: event log layer plus optional file output
pub fn init(config: &LogConfig, log: EventLog) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.filter)?;

    let file_layer = match &config.file {
        Some(path) => {
            let file = File::create(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(EventLogLayer::new(log))
        .with(file_layer)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_drops_oldest() {
        let log = EventLog::new(2);
        for i in 0..3 {
            log.push(LogLine {
                level: Level::INFO,
                target: "test".to_string(),
                text: format!("line {}", i),
            });
        }
        let texts: Vec<String> = log.lines().into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["line 1", "line 2"]);
    }

    #[test]
    fn test_layer_captures_message_and_fields() {
        let log = EventLog::new(10);
        let subscriber = tracing_subscriber::registry().with(EventLogLayer::new(log.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(disks = 3, "reset rejected");
        });

        let lines = log.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].level, Level::WARN);
        assert_eq!(lines[0].text, "reset rejected disks=3");
    }
}
