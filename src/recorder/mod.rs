//! Persistence collaborators for extracted records.
//!
//! A [`Recorder`] receives one ordered row per surviving record; its
//! `field_keys` decide both which fields are projected and in what order.
//! The extraction engine never writes anywhere itself, it only hands rows
//! across this seam.

use std::io::Write;

use anyhow::{Context, Result};

use crate::extract::FieldValue;

/// The full flat-record schema, in export order.
pub const DEFAULT_FIELD_KEYS: [&str; 29] = [
    "collection_time",
    "id",
    "desc",
    "create_time",
    "create_timestamp",
    "type",
    "downloads",
    "dynamic_cover",
    "origin_cover",
    "height",
    "width",
    "ratio",
    "music_author",
    "music_title",
    "music_url",
    "digg_count",
    "comment_count",
    "collect_count",
    "share_count",
    "tag_1",
    "tag_2",
    "tag_3",
    "uid",
    "sec_uid",
    "short_id",
    "unique_id",
    "signature",
    "nickname",
    "mark",
];

/// Accepts ordered rows of scalar values for persistence.
pub trait Recorder {
    /// The projection: which fields to save, in which order.
    fn field_keys(&self) -> &[String];

    /// Persist one row; `values` follows `field_keys` order.
    fn save(&mut self, values: Vec<FieldValue>) -> Result<()>;
}

fn default_keys() -> Vec<String> {
    DEFAULT_FIELD_KEYS.iter().map(|k| k.to_string()).collect()
}

/// Collects rows in memory. Used by tests and by callers that post-process
/// rows themselves.
#[derive(Debug)]
pub struct MemoryRecorder {
    keys: Vec<String>,
    rows: Vec<Vec<FieldValue>>,
}

impl Default for MemoryRecorder {
    fn default() -> Self {
        Self::new(default_keys())
    }
}

impl MemoryRecorder {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[Vec<FieldValue>] {
        &self.rows
    }
}

impl Recorder for MemoryRecorder {
    fn field_keys(&self) -> &[String] {
        &self.keys
    }

    fn save(&mut self, values: Vec<FieldValue>) -> Result<()> {
        self.rows.push(values);
        Ok(())
    }
}

/// Writes one JSON object per row to a sink, JSON-Lines style.
pub struct JsonlRecorder<W: Write> {
    keys: Vec<String>,
    writer: W,
}

impl<W: Write> JsonlRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            keys: default_keys(),
            writer,
        }
    }

    pub fn with_keys(writer: W, keys: Vec<String>) -> Self {
        Self { keys, writer }
    }

    /// Flush and hand back the sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush().context("Failed to flush record sink")?;
        Ok(self.writer)
    }
}

impl<W: Write> Recorder for JsonlRecorder<W> {
    fn field_keys(&self) -> &[String] {
        &self.keys
    }

    fn save(&mut self, values: Vec<FieldValue>) -> Result<()> {
        let row: serde_json::Map<String, serde_json::Value> = self
            .keys
            .iter()
            .zip(values)
            .map(|(key, value)| {
                let value = match value {
                    FieldValue::Str(s) => serde_json::Value::String(s),
                    FieldValue::Int(i) => serde_json::Value::from(i),
                };
                (key.clone(), value)
            })
            .collect();
        let line = serde_json::to_string(&row).context("Failed to serialize record")?;
        writeln!(self.writer, "{line}").context("Failed to write record")?;
        Ok(())
    }
}
