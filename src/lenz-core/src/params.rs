use crate::error::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-invocation credentials supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub access_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
        }
    }

    /// Decode from the host's credentials mapping; a missing key decodes to
    /// an empty string rather than failing.
    pub fn from_value(credentials: &Value) -> Self {
        let access_key = credentials
            .get("access_key")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self { access_key }
    }

    pub fn is_empty(&self) -> bool {
        self.access_key.trim().is_empty()
    }
}

/// Validated, normalized input for a search invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub per_page: u32,
    pub orientation: Option<String>,
    pub color: Option<String>,
}

impl SearchParams {
    pub fn from_value(params: &Value) -> Result<Self, ToolError> {
        let query = required_string(params, "query", "Search query cannot be empty")?;
        let per_page = bounded_count(
            params,
            "per_page",
            10,
            "Results per page must be an integer between 1 and 30",
        )?;
        Ok(Self {
            query,
            per_page,
            orientation: optional_string(params, "orientation"),
            color: optional_string(params, "color"),
        })
    }
}

/// Validated, normalized input for a random-photo invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomParams {
    pub query: Option<String>,
    pub count: u32,
    pub orientation: Option<String>,
    pub color: Option<String>,
}

impl RandomParams {
    pub fn from_value(params: &Value) -> Result<Self, ToolError> {
        let count = bounded_count(
            params,
            "count",
            1,
            "Photo count must be an integer between 1 and 30",
        )?;
        Ok(Self {
            query: optional_string(params, "query"),
            count,
            orientation: optional_string(params, "orientation"),
            color: optional_string(params, "color"),
        })
    }
}

fn required_string(params: &Value, key: &str, message: &str) -> Result<String, ToolError> {
    match params.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(ToolError::InvalidParameters {
            message: message.into(),
        }),
    }
}

fn optional_string(params: &Value, key: &str) -> Option<String> {
    match params.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

// Hosts send page sizes as JSON numbers, occasionally fractional; accept any
// numeric value in [1, 30] and truncate toward zero. Null counts as absent.
fn bounded_count(params: &Value, key: &str, default: u32, message: &str) -> Result<u32, ToolError> {
    let value = match params.get(key) {
        None | Some(Value::Null) => return Ok(default),
        Some(value) => value,
    };
    let number = value.as_f64().ok_or_else(|| ToolError::InvalidParameters {
        message: message.into(),
    })?;
    if !(1.0..=30.0).contains(&number) {
        return Err(ToolError::InvalidParameters {
            message: message.into(),
        });
    }
    Ok(number.trunc() as u32)
}
