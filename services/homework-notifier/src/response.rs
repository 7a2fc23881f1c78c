//! Review API response shape and validation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const HOMEWORKS_KEY: &str = "homeworks";
const CURRENT_DATE_KEY: &str = "current_date";
const ALLOWED_KEYS: [&str; 2] = [HOMEWORKS_KEY, CURRENT_DATE_KEY];

/// How strictly the top level of a response is checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaMode {
    /// Reject top-level keys other than `homeworks` and `current_date`
    #[default]
    Strict,
    /// Only require `homeworks` to be a list
    Loose,
}

/// One homework entry as reported by the review API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub homework_name: Option<String>,
    pub status: Option<String>,
}

/// A validated review API response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResponse {
    pub homeworks: Vec<HomeworkRecord>,
    /// Server checkpoint for the next poll, if it was a usable timestamp
    pub current_date: Option<u64>,
}

/// Check the shape of a decoded response and extract its homework records.
///
/// Only the structure is checked: `homeworks` must be a list of objects whose
/// `homework_name` and `status` are strings when present. Record contents are
/// left for the status formatter.
pub fn validate(raw: &Value, mode: SchemaMode) -> crate::Result<ApiResponse> {
    let object = raw.as_object().ok_or_else(|| {
        crate::NotifierError::Schema(format!("response is not an object: {}", kind(raw)))
    })?;

    let homeworks = match object.get(HOMEWORKS_KEY) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(crate::NotifierError::Schema(format!(
                "`{}` is not a list: {}",
                HOMEWORKS_KEY,
                kind(other)
            )))
        }
        None => {
            return Err(crate::NotifierError::Schema(format!(
                "response has no `{}` field",
                HOMEWORKS_KEY
            )))
        }
    };

    let records = homeworks
        .iter()
        .enumerate()
        .map(|(index, item)| parse_record(index, item))
        .collect::<crate::Result<Vec<_>>>()?;

    if mode == SchemaMode::Strict {
        let extra: Vec<&str> = object
            .keys()
            .map(String::as_str)
            .filter(|key| !ALLOWED_KEYS.contains(key))
            .collect();
        if !extra.is_empty() {
            return Err(crate::NotifierError::Schema(format!(
                "unexpected fields in response: {}",
                extra.join(", ")
            )));
        }
    }

    let current_date = match object.get(CURRENT_DATE_KEY) {
        Some(value) => {
            let parsed = value.as_u64();
            if parsed.is_none() {
                tracing::warn!("Ignoring unusable `{}`: {}", CURRENT_DATE_KEY, value);
            }
            parsed
        }
        None => {
            tracing::warn!("Response has no `{}` field", CURRENT_DATE_KEY);
            None
        }
    };

    tracing::debug!(
        "Response matches the expected shape: {} homework(s), current_date={:?}",
        records.len(),
        current_date
    );

    Ok(ApiResponse {
        homeworks: records,
        current_date,
    })
}

fn parse_record(index: usize, item: &Value) -> crate::Result<HomeworkRecord> {
    let fields = item.as_object().ok_or_else(|| {
        crate::NotifierError::Schema(format!(
            "homework #{} is not an object: {}",
            index,
            kind(item)
        ))
    })?;

    Ok(HomeworkRecord {
        homework_name: optional_string(index, fields, "homework_name")?,
        status: optional_string(index, fields, "status")?,
    })
}

fn optional_string(
    index: usize,
    fields: &Map<String, Value>,
    key: &str,
) -> crate::Result<Option<String>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(crate::NotifierError::Schema(format!(
            "homework #{} field `{}` is not a string: {}",
            index,
            key,
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
