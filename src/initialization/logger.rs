//! Logger setup.
//!
//! Walk and batch log calls attach `url`, `batch_size`, `failed` and
//! `elapsed_ms` as key-values. The JSON format turns them into top-level
//! fields; the plain format appends them as `key=value`.

use std::io::Write;

use colored::*;
use log::kv::{self, Key, Value, VisitSource};
use log::{Level, LevelFilter, Record};
use serde_json::{Map, Value as JsonValue};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependencies that are chatty below these levels.
const NOISY_MODULES: &[(&str, LevelFilter)] = &[
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    ("rustls", LevelFilter::Warn),
    ("tungstenite", LevelFilter::Info),
    // truncated UDP answers are retried over TCP by hickory itself
    ("hickory_proto", LevelFilter::Error),
    ("hickory_resolver", LevelFilter::Warn),
];

/// Installs the global logger.
///
/// `RUST_LOG` is read first, then `level` applies to this crate and
/// `NOISY_MODULES` caps dependencies. Fails if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, cap) in NOISY_MODULES {
        builder.filter_module(module, (*cap).min(level));
    }
    builder.filter_module(env!("CARGO_PKG_NAME"), level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| writeln!(buf, "{}", json_line(record)));
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| writeln!(buf, "{}", plain_line(record)));
        }
    }

    builder.try_init()?;
    Ok(())
}

/// Collects a record's key-values in call-site order.
#[derive(Default)]
struct Fields(Vec<(String, JsonValue)>);

impl<'kvs> VisitSource<'kvs> for Fields {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        let json = if let Some(n) = value.to_u64() {
            JsonValue::from(n)
        } else if let Some(b) = value.to_bool() {
            JsonValue::from(b)
        } else {
            JsonValue::from(value.to_string())
        };
        self.0.push((key.as_str().to_string(), json));
        Ok(())
    }
}

fn fields(record: &Record<'_>) -> Fields {
    let mut fields = Fields::default();
    // visiting only fails when a visitor does, and ours never does
    let _ = record.key_values().visit(&mut fields);
    fields
}

/// One log record as a single JSON object.
///
/// Key-values are written after `msg` and never replace the fixed fields.
fn json_line(record: &Record<'_>) -> JsonValue {
    let mut line = Map::new();
    line.insert(
        "ts".into(),
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true).into(),
    );
    line.insert("level".into(), record.level().as_str().into());
    line.insert("target".into(), record.target().into());
    line.insert("msg".into(), record.args().to_string().into());
    for (key, value) in fields(record).0 {
        line.entry(key).or_insert(value);
    }
    JsonValue::Object(line)
}

fn level_style(level: Level) -> (&'static str, ColoredString) {
    let name = level.as_str();
    match level {
        Level::Error => ("❌", name.red().bold()),
        Level::Warn => ("⚠️", name.yellow().bold()),
        Level::Info => ("✔️", name.green()),
        Level::Debug => ("🔍", name.blue()),
        Level::Trace => ("🔬", name.purple()),
    }
}

fn plain_line(record: &Record<'_>) -> String {
    let (emoji, level) = level_style(record.level());
    let mut line = format!("{emoji} {level} {} {}", record.target().cyan(), record.args());
    for (key, value) in fields(record).0 {
        match value {
            JsonValue::String(s) => line.push_str(&format!(" {}={s}", key.dimmed())),
            other => line.push_str(&format!(" {}={other}", key.dimmed())),
        }
    }
    line
}
