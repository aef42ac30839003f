use resume_core::Failure;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A collaborator body: either the expected payload or an embedded `error` field.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceReply<T> {
    Success(T),
    Failed(String),
}

impl<T: DeserializeOwned> ServiceReply<T> {
    /// Decodes a 2xx body. An `error` field wins over any payload fields next to it.
    pub fn decode(body: &[u8]) -> Result<Self, Failure> {
        let value: Value =
            serde_json::from_slice(body).map_err(|err| Failure::Malformed(err.to_string()))?;
        if let Some(message) = embedded_error(&value) {
            return Ok(ServiceReply::Failed(message));
        }
        serde_json::from_value(value)
            .map(ServiceReply::Success)
            .map_err(|err| Failure::Malformed(err.to_string()))
    }
}

impl<T> ServiceReply<T> {
    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            ServiceReply::Success(payload) => Ok(payload),
            ServiceReply::Failed(message) => Err(Failure::Service(message)),
        }
    }
}

/// Empty, `null` and `false` error fields count as absent.
fn embedded_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
