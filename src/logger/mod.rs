//! # Logger
//!
//! A [`Logger`] holds an immutable configuration (labels, quoting, stringify strategy)
//! together with a [`Sink`] and a [`Clock`]. Every call to [`Log::log_with`] builds one
//! complete line and hands it to the sink exactly once.
//!
//! ## Line layout
//!
//! ```text
//! [time_label=]<timestamp> <level_label>=<level> [<label>=<value> ...] <message_label>=<message>
//! ```
//!
//! The timestamp is always first, the level second and the message last. Free-form
//! fields appear in the order the caller inserted them.
//!
//! ## Usage
//!
//! ```rust
//! use simplog::logger::{Log, Logger, MemorySink};
//! use simplog::fields;
//!
//! # fn main() -> Result<(), simplog::logger::LogError> {
//! let sink = MemorySink::new();
//! let log = Logger::builder(sink.clone()).force_quotes(true).build()?;
//! log.log_fields("Hey!", fields! { "meals" => "breakfast lunch dinner" })?;
//!
//! let line = sink.last().unwrap();
//! assert!(line.ends_with(r#"level="info" meals="breakfast lunch dinner" msg="Hey!""#));
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod refine;
pub mod sink;

pub use clock::{Clock, FixedClock, SystemClock, TIMESTAMP_FORMAT};
pub use refine::{refine_logger, RefinedLogger};
pub use sink::{FileSink, MemorySink, Sink, StdoutSink, WriterSink};

use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::config::LoggerConfig;
use crate::logutil::escape_value;
use crate::validation::{validate_label, LabelError};
use crate::value::{force_string, Fields, Value};

pub const DEFAULT_MESSAGE_LABEL: &str = "msg";
pub const DEFAULT_LEVEL_LABEL: &str = "level";
pub const DEFAULT_LEVEL: &str = "info";

/// Pluggable value-to-text conversion applied before escaping.
pub type Stringify = Arc<dyn Fn(&Value) -> Result<String, LogError> + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Raised by a stringify strategy; passed through to the caller unchanged
    #[error("value cannot be stringified: {0}")]
    UnstringifiableValue(String),

    #[error("sink write failed: {0}")]
    SinkWrite(#[from] std::io::Error),

    #[error("invalid {role} label {label:?}: {source}")]
    InvalidLabel {
        role: &'static str,
        label: String,
        source: LabelError,
    },
}

/// Anything that accepts `(message, level, fields)` and emits a line.
///
/// Implemented by [`Logger`] and [`RefinedLogger`]; refinement works on any
/// implementor, so refined loggers can be refined again.
pub trait Log: Send + Sync {
    fn log_with(&self, message: Value, level: Value, fields: Fields) -> Result<(), LogError>;

    /// Log `message` at the default `info` level with no extra fields.
    fn log(&self, message: impl Into<Value>) -> Result<(), LogError>
    where
        Self: Sized,
    {
        self.log_with(message.into(), Value::from(DEFAULT_LEVEL), Fields::new())
    }

    fn log_at(&self, message: impl Into<Value>, level: impl Into<Value>) -> Result<(), LogError>
    where
        Self: Sized,
    {
        self.log_with(message.into(), level.into(), Fields::new())
    }

    fn log_fields(&self, message: impl Into<Value>, fields: Fields) -> Result<(), LogError>
    where
        Self: Sized,
    {
        self.log_with(message.into(), Value::from(DEFAULT_LEVEL), fields)
    }

    /// Derive a logger that adds `fixed` to every call. `self` is left untouched.
    fn refine(&self, fixed: Fields) -> RefinedLogger
    where
        Self: Clone + Sized + 'static,
    {
        RefinedLogger::new(Arc::new(self.clone()), fixed)
    }
}

struct LoggerInner {
    sink: Arc<dyn Sink>,
    clock: Arc<dyn Clock>,
    message_label: String,
    level_label: String,
    time_label: Option<String>,
    stringify: Stringify,
    force_quotes: bool,
}

/// Line-formatting logger. Cheap to clone; clones share configuration and sink.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("message_label", &self.inner.message_label)
            .field("level_label", &self.inner.level_label)
            .field("time_label", &self.inner.time_label)
            .field("force_quotes", &self.inner.force_quotes)
            .finish_non_exhaustive()
    }
}

/// Build a logger from file-level options, validating its labels up front.
pub fn make_logger(
    sink: impl Sink + 'static,
    config: &LoggerConfig,
) -> Result<Logger, LogError> {
    config.builder(sink).build()
}

impl Logger {
    pub fn new(sink: impl Sink + 'static) -> Self {
        LoggerBuilder::new(sink).assemble()
    }

    pub fn builder(sink: impl Sink + 'static) -> LoggerBuilder {
        LoggerBuilder::new(sink)
    }

    pub fn message_label(&self) -> &str {
        &self.inner.message_label
    }

    pub fn level_label(&self) -> &str {
        &self.inner.level_label
    }

    pub fn time_label(&self) -> Option<&str> {
        self.inner.time_label.as_deref()
    }

    pub fn force_quotes(&self) -> bool {
        self.inner.force_quotes
    }

    /// Build the line `log_with` would emit, without touching the sink.
    pub fn format_line(
        &self,
        message: &Value,
        level: &Value,
        fields: &Fields,
    ) -> Result<String, LogError> {
        let inner = &*self.inner;
        let esc = |value: &Value| escape_value(value, &*inner.stringify, inner.force_quotes);

        let timestamp = inner.clock.now().format(TIMESTAMP_FORMAT);
        let mut line = match &inner.time_label {
            Some(label) => format!("{}={}", label, timestamp),
            None => timestamp.to_string(),
        };

        push_field(&mut line, &inner.level_label, &esc(level)?);
        for (label, value) in fields.iter() {
            push_field(&mut line, label, &esc(value)?);
        }
        push_field(&mut line, &inner.message_label, &esc(message)?);
        Ok(line)
    }
}

fn push_field(line: &mut String, label: &str, escaped: &str) {
    line.push(' ');
    line.push_str(label);
    line.push('=');
    line.push_str(escaped);
}

impl Log for Logger {
    fn log_with(&self, message: Value, level: Value, fields: Fields) -> Result<(), LogError> {
        let line = self.format_line(&message, &level, &fields)?;
        trace!("emitting {} byte line with {} fields", line.len(), fields.len());
        self.inner.sink.write_line(&line)?;
        Ok(())
    }
}

/// Collects logger options; labels are validated in [`LoggerBuilder::build`].
pub struct LoggerBuilder {
    sink: Arc<dyn Sink>,
    clock: Arc<dyn Clock>,
    message_label: String,
    level_label: String,
    time_label: Option<String>,
    stringify: Stringify,
    force_quotes: bool,
}

impl LoggerBuilder {
    pub fn new(sink: impl Sink + 'static) -> Self {
        LoggerBuilder {
            sink: Arc::new(sink),
            clock: Arc::new(SystemClock),
            message_label: DEFAULT_MESSAGE_LABEL.to_string(),
            level_label: DEFAULT_LEVEL_LABEL.to_string(),
            time_label: None,
            stringify: Arc::new(force_string),
            force_quotes: false,
        }
    }

    pub fn message_label(mut self, label: impl Into<String>) -> Self {
        self.message_label = label.into();
        self
    }

    pub fn level_label(mut self, label: impl Into<String>) -> Self {
        self.level_label = label.into();
        self
    }

    /// Prefix the timestamp with `label=`. Without one the timestamp is emitted bare.
    pub fn time_label(mut self, label: impl Into<String>) -> Self {
        self.time_label = Some(label.into());
        self
    }

    pub fn stringify<F>(mut self, strategy: F) -> Self
    where
        F: Fn(&Value) -> Result<String, LogError> + Send + Sync + 'static,
    {
        self.stringify = Arc::new(strategy);
        self
    }

    pub fn force_quotes(mut self, force: bool) -> Self {
        self.force_quotes = force;
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn build(self) -> Result<Logger, LogError> {
        check_label("message", &self.message_label)?;
        check_label("level", &self.level_label)?;
        if let Some(label) = &self.time_label {
            check_label("time", label)?;
        }
        debug!(
            "logger built: message_label={} level_label={} time_label={:?} force_quotes={}",
            self.message_label, self.level_label, self.time_label, self.force_quotes
        );
        Ok(self.assemble())
    }

    fn assemble(self) -> Logger {
        Logger {
            inner: Arc::new(LoggerInner {
                sink: self.sink,
                clock: self.clock,
                message_label: self.message_label,
                level_label: self.level_label,
                time_label: self.time_label,
                stringify: self.stringify,
                force_quotes: self.force_quotes,
            }),
        }
    }
}

fn check_label(role: &'static str, label: &str) -> Result<(), LogError> {
    validate_label(label).map_err(|source| LogError::InvalidLabel {
        role,
        label: label.to_string(),
        source,
    })
}
