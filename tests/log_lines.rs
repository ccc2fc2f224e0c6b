//! End-to-end line assembly through the public API

use chrono::NaiveDateTime;
use simplog::config::LoggerConfig;
use simplog::logger::{FixedClock, TIMESTAMP_FORMAT};
use simplog::{escape_value, fields, make_logger, Fields, Log, LogError, Logger, MemorySink, Value};
use std::io;

fn default_logger(sink: &MemorySink) -> Logger {
    make_logger(sink.clone(), &LoggerConfig::default()).unwrap()
}

/// Split a line into its timestamp and the remainder, checking the timestamp parses.
fn split_timestamp(line: &str) -> (&str, &str) {
    let (ts, rest) = line.split_once(' ').expect("line has a timestamp");
    assert!(
        NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).is_ok(),
        "not an ISO-8601 timestamp: {}",
        ts
    );
    (ts, rest)
}

#[test]
fn basic_logger() {
    let sink = MemorySink::new();
    let log = default_logger(&sink);
    log.log("Hey!").unwrap();

    let line = sink.last().unwrap();
    let (_, rest) = split_timestamp(&line);
    assert_eq!(rest, "level=info msg=Hey!");
}

#[test]
fn different_level() {
    let sink = MemorySink::new();
    default_logger(&sink).log_at("Hey!", "warn").unwrap();
    let line = sink.last().unwrap();
    assert_eq!(split_timestamp(&line).1, "level=warn msg=Hey!");
}

#[test]
fn time_label_prefixes_timestamp() {
    let sink = MemorySink::new();
    let log = Logger::builder(sink.clone()).time_label("app_time").build().unwrap();
    log.log("Hey!").unwrap();

    let line = sink.last().unwrap();
    let labelled = line.strip_prefix("app_time=").expect("time label first");
    assert_eq!(split_timestamp(labelled).1, "level=info msg=Hey!");
}

#[test]
fn force_quotes_quotes_every_field() {
    let sink = MemorySink::new();
    let log = Logger::builder(sink.clone()).force_quotes(true).build().unwrap();
    log.log_fields("Hey!", fields! { "meals" => "breakfast lunch dinner" })
        .unwrap();

    let line = sink.last().unwrap();
    assert_eq!(
        split_timestamp(&line).1,
        "level=\"info\" meals=\"breakfast lunch dinner\" msg=\"Hey!\""
    );
}

#[test]
fn fields_keep_insertion_order() {
    let sink = MemorySink::new();
    let log = default_logger(&sink);
    log.log_fields("Hey!", fields! { "zeta" => 1, "alpha" => 2, "mid" => vec![1, 2, 3] })
        .unwrap();

    let line = sink.last().unwrap();
    assert_eq!(
        split_timestamp(&line).1,
        "level=info zeta=1 alpha=2 mid=\"[1, 2, 3]\" msg=Hey!"
    );
    assert_eq!(line.matches("zeta=").count(), 1);
    assert_eq!(line.matches("alpha=").count(), 1);
}

#[test]
fn values_are_escaped_on_the_line() {
    let at = NaiveDateTime::parse_from_str("2022-11-30T23:59:59.999999", TIMESTAMP_FORMAT).unwrap();
    let sink = MemorySink::new();
    let log = Logger::builder(sink.clone()).clock(FixedClock::new(at)).build().unwrap();
    log.log_fields(
        "line one\nline two",
        fields! { "path" => "C:\\temp", "quote" => "say \"hi\"", "cr" => "a\rb" },
    )
    .unwrap();

    assert_eq!(
        sink.last().unwrap(),
        "2022-11-30T23:59:59.999999 level=info path=C:\\\\temp quote=\"say 'hi'\" cr=a\rb msg=\"line one\\nline two\""
    );
}

#[test]
fn plain_text_is_unchanged_unless_spaced() {
    for s in ["abc", "a.b-c_d", "ünïcode", "", "x:y/z"] {
        assert_eq!(escape_value(&Value::from(s), simplog::value::force_string, false).unwrap(), s);
    }
    assert_eq!(
        escape_value(&Value::from("a b"), simplog::value::force_string, false).unwrap(),
        "\"a b\""
    );
}

#[test]
fn sink_errors_propagate() {
    let log = Logger::new(|_: &str| -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    });
    let err = log.log("Hey!").unwrap_err();
    match err {
        LogError::SinkWrite(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn one_sink_call_per_line() {
    let sink = MemorySink::new();
    let log = default_logger(&sink);
    log.log_with(Value::from("a"), Value::from("info"), Fields::new()).unwrap();
    log.log_with(Value::from("b"), Value::from("error"), Fields::new()).unwrap();
    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| !l.contains('\n')));
    assert!(lines[1].ends_with("level=error msg=b"));
}

#[test]
fn loggers_are_shareable_across_threads() {
    let sink = MemorySink::new();
    let log = default_logger(&sink);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let log = log.clone();
            std::thread::spawn(move || log.log_fields("tick", fields! { "worker" => i }))
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }
    assert_eq!(sink.lines().len(), 4);
}
