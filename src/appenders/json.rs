//! JSON appender for structured logging

use crate::core::{Appender, LogEntry, Result};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON file appender for structured logging
///
/// Writes each log entry as a single-line JSON object (JSONL format).
/// Compatible with log aggregation tools like ELK, Loki, etc.
pub struct JsonAppender {
    writer: BufWriter<File>,
}

impl JsonAppender {
    /// Create a new JSON appender
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Render one entry as a flat JSON object
    ///
    /// Context fields are merged into the top-level object; fixed fields
    /// win on key collision.
    fn to_json(&self, entry: &LogEntry) -> Result<String> {
        let mut obj = Map::new();

        if let Some(context) = &entry.context {
            for (key, value) in context.fields() {
                obj.insert(key.clone(), value.to_json_value());
            }
        }

        obj.insert(
            "timestamp".to_string(),
            Value::String(entry.timestamp.to_rfc3339()),
        );
        obj.insert(
            "level".to_string(),
            Value::String(entry.level.to_str().to_string()),
        );
        obj.insert("message".to_string(), Value::String(entry.message.clone()));
        obj.insert(
            "thread".to_string(),
            Value::String(
                entry
                    .thread_name
                    .clone()
                    .unwrap_or_else(|| entry.thread_id.clone()),
            ),
        );
        if let (Some(file), Some(line)) = (&entry.file, entry.line) {
            obj.insert("file".to_string(), Value::String(file.clone()));
            obj.insert("line".to_string(), Value::Number(line.into()));
        }

        Ok(serde_json::to_string(&Value::Object(obj))?)
    }
}

impl Appender for JsonAppender {
    fn name(&self) -> &str {
        "json"
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let json = self.to_json(entry)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonAppender {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
