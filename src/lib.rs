//! # simplog - key=value structured logging
//!
//! simplog turns a message, a level and a set of named fields into one deterministic
//! text line in the `key=value` style understood by common log indexers, and hands that
//! line to a caller-supplied sink.
//!
//! ## Features
//!
//! - **Single-line output**: backslashes, null bytes, newlines and tabs in values are escaped.
//! - **Fixed field order**: timestamp, level, free-form fields in insertion order, message.
//! - **Quoting**: values containing spaces are double-quoted; `force_quotes` quotes everything.
//! - **Refinement**: derive loggers with permanently bound context fields.
//! - **Pluggable collaborators**: sinks, clocks and stringify strategies are injected.
//!
//! ## Quick Start
//!
//! ```rust
//! use simplog::{fields, Log, Logger, MemorySink};
//!
//! # fn main() -> Result<(), simplog::LogError> {
//! let sink = MemorySink::new();
//! let log = Logger::new(sink.clone());
//! let clog = log.refine(fields! { "context" => "abc" });
//!
//! clog.log_fields("Hey!", fields! { "panic" => "Maybe or maybe not" })?;
//! // 2024-03-09T12:30:05.000250 level=info context=abc panic="Maybe or maybe not" msg=Hey!
//! assert!(sink.last().unwrap().ends_with(r#"context=abc panic="Maybe or maybe not" msg=Hey!"#));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`logutil`] - value escaping pipeline
//! - [`value`] - field values, ordered field sets, default stringify strategy
//! - [`logger`] - logger factory, refinement, sinks and clocks
//! - [`config`] - TOML configuration of labels and quoting
//! - [`validation`] - label checks applied when a logger is built
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ RefinedLogger   │ ← merges bound fields (optional)
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Logger        │ ← assembles the line
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   logutil       │ ← escapes each value
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Sink          │ ← one write per line
//! └─────────────────┘
//! ```

pub mod config;
pub mod logger;
pub mod logutil;
pub mod validation;
pub mod value;

pub use logger::{
    make_logger, refine_logger, Log, LogError, Logger, LoggerBuilder, MemorySink, RefinedLogger,
    Sink, StdoutSink,
};
pub use logutil::escape_value;
pub use value::{Fields, Value};
