//! Output message types for tool invocations.
//!
//! Every invocation produces an ordered stream of [`ToolMessage`] values for
//! the host workflow engine: human-readable text, structured JSON results,
//! binary image payloads, and named output variables. Emission order is part
//! of the observable contract, so messages flow through a [`MessageSink`]
//! rather than being collected and reordered.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One message in a tool's output stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolMessage {
    /// Human-readable summary or progress text.
    Text { text: String },
    /// Structured result payload.
    Json { payload: Value },
    /// Binary payload (image bytes) with describing metadata.
    Blob {
        #[serde(with = "base64_bytes")]
        data: Vec<u8>,
        meta: BlobMeta,
    },
    /// Named output variable for downstream workflow steps.
    Variable { name: String, value: Value },
}

/// Metadata attached to a binary payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobMeta {
    pub mime_type: String,
    pub filename: String,
    pub description: String,
}

impl ToolMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn json<T: Serialize>(payload: &T) -> Self {
        Self::Json {
            payload: to_value_or_null(payload),
        }
    }

    pub fn blob(data: Vec<u8>, meta: BlobMeta) -> Self {
        Self::Blob { data, meta }
    }

    pub fn variable<T: Serialize>(name: impl Into<String>, value: &T) -> Self {
        Self::Variable {
            name: name.into(),
            value: to_value_or_null(value),
        }
    }
}

/// Ordered consumer of tool messages.
///
/// Emission is infallible from the tool's point of view. A sink that can
/// fail (for example one writing to a closed host pipe) records the failure
/// internally and surfaces it after the invocation completes.
pub trait MessageSink {
    fn emit(&mut self, message: ToolMessage);
}

impl MessageSink for Vec<ToolMessage> {
    fn emit(&mut self, message: ToolMessage) {
        self.push(message);
    }
}

fn to_value_or_null<T: Serialize>(payload: &T) -> Value {
    match serde_json::to_value(payload) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!("failed to serialize message payload: {err}");
            Value::Null
        }
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
