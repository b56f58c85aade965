// SPDX-License-Identifier: MPL-2.0
//! Request descriptors.

use super::RequestError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// HTTP method of a gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// GET carries its payload in the query string, everything else in a JSON body.
    #[must_use]
    pub fn uses_query(self) -> bool {
        matches!(self, Method::Get)
    }

    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

/// One outbound call: where, how, and with what data.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    target: String,
    method: Method,
    payload: Option<Value>,
}

impl Request {
    /// `target` is a path resolved against the gateway base URL, or an absolute URL.
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            method,
            payload: None,
        }
    }

    pub fn get(target: impl Into<String>) -> Self {
        Self::new(Method::Get, target)
    }

    pub fn post(target: impl Into<String>) -> Self {
        Self::new(Method::Post, target)
    }

    pub fn put(target: impl Into<String>) -> Self {
        Self::new(Method::Put, target)
    }

    pub fn delete(target: impl Into<String>) -> Self {
        Self::new(Method::Delete, target)
    }

    /// Attaches a JSON payload. `Value::Null` means "no payload".
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = (!payload.is_null()).then_some(payload);
        self
    }

    /// Attaches any serializable payload.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidPayload`] if `payload` cannot be
    /// represented as JSON.
    pub fn with_serialized<T: Serialize>(self, payload: &T) -> Result<Self, RequestError> {
        let value =
            serde_json::to_value(payload).map_err(|e| RequestError::InvalidPayload(e.to_string()))?;
        Ok(self.with_payload(value))
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Flattens the payload into query pairs.
    ///
    /// Only an object of scalar values can be expressed as a query string.
    pub(crate) fn query_pairs(&self) -> Result<Vec<(String, String)>, RequestError> {
        let Some(payload) = &self.payload else {
            return Ok(Vec::new());
        };
        let Value::Object(map) = payload else {
            return Err(RequestError::InvalidPayload(
                "query payload must be an object".to_string(),
            ));
        };

        map.iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::Null => String::new(),
                    Value::String(s) => s.clone(),
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    Value::Array(_) | Value::Object(_) => {
                        return Err(RequestError::InvalidPayload(format!(
                            "query field `{key}` is not a scalar"
                        )))
                    }
                };
                Ok((key.clone(), text))
            })
            .collect()
    }
}
