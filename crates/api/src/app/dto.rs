use serde_json::Value as JsonValue;

use greenloop_core::{DomainError, DomainResult};

/// `POST /assets/analyze` body. `items` stays raw so that a wrong shape is
/// reported as `invalid_input` by the handler.
#[derive(Debug)]
pub struct AnalyzeRequest {
    pub items: JsonValue,
}

impl AnalyzeRequest {
    /// Any body that is not a JSON object is rejected.
    pub fn from_body(body: JsonValue) -> DomainResult<Self> {
        match body {
            JsonValue::Object(mut map) => Ok(Self {
                items: map.remove("items").unwrap_or(JsonValue::Null),
            }),
            _ => Err(DomainError::invalid_input("request body must be an object with an `items` array")),
        }
    }
}
