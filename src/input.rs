//! Loading article records from JSON.
//!
//! Two shapes are accepted: a bare array of records, or the envelope returned by the
//! summarization endpoint, `{"success": true, "summaries": [...]}`.  An envelope carrying an
//! `error` field instead of summaries is reported as [`InputError::Upstream`].
//!
//! Records are read one at a time so that a bad record is reported with its index and, where it
//! can be isolated, the name of the offending field.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::error::InputError;
use crate::model::ArticleRecord;

const STRING_FIELDS: [&str; 5] = ["title", "source", "url", "summary", "author"];

/// Parses article records from a JSON string.
pub fn parse_articles(json: &str) -> Result<Vec<ArticleRecord>, InputError> {
    let records = match serde_json::from_str::<Value>(json)? {
        Value::Array(records) => records,
        Value::Object(mut envelope) => match envelope.remove("summaries") {
            Some(Value::Array(records)) => records,
            Some(Value::Null) | None => {
                let reason = match envelope.get("error") {
                    Some(Value::String(reason)) => reason.clone(),
                    Some(Value::Null) | None => "response carried no summaries".to_owned(),
                    Some(other) => other.to_string(),
                };
                return Err(InputError::Upstream(reason));
            }
            Some(other) => {
                return Err(InputError::Shape(format!(
                    "`summaries` must be an array, got {}",
                    kind(&other)
                )))
            }
        },
        other => {
            return Err(InputError::Shape(format!(
                "expected an array of articles or a summaries object, got {}",
                kind(&other)
            )))
        }
    };

    let articles = records
        .iter()
        .enumerate()
        .map(|(index, record)| read_record(index, record))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("parsed {} article records", articles.len());
    Ok(articles)
}

/// Reads and parses article records from the JSON file at `path`.
pub fn load_articles(path: impl AsRef<Path>) -> Result<Vec<ArticleRecord>, InputError> {
    let json = fs::read_to_string(path.as_ref())?;
    parse_articles(&json)
}

fn read_record(index: usize, record: &Value) -> Result<ArticleRecord, InputError> {
    ArticleRecord::deserialize(record).map_err(|source| match offending_field(record) {
        Some(field) => InputError::Field {
            index,
            field,
            source,
        },
        None => InputError::Record { index, source },
    })
}

/// Finds the first known field whose value cannot be read on its own.
fn offending_field(record: &Value) -> Option<String> {
    record.as_object()?.iter().find_map(|(key, value)| {
        let readable = if key == "date" {
            Option::<DateTime<Utc>>::deserialize(value).is_ok()
        } else if STRING_FIELDS.contains(&key.as_str()) {
            Option::<String>::deserialize(value).is_ok()
        } else {
            true
        };
        (!readable).then(|| key.clone())
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
