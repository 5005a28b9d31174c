//! Call descriptors and the `{"data": ...}` JSON envelope.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// JSON envelope wrapping every request and response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Body<T> {
    pub data: T,
}

/// A single API endpoint invocation awaiting execution.
///
/// Immutable once handed to the dispatcher. The request payload is wrapped in
/// the envelope and encoded exactly once here, so retries reuse the same bytes
/// without re-encoding.
#[derive(Debug, Clone)]
pub struct Call {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl Call {
    /// A call to `path`, resolved relative to the client's base URL.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Appends a query parameter. May be called repeatedly, including with the
    /// same key for multi-valued parameters.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the request payload, serialised as `{"data": <payload>}`.
    pub fn json<T: Serialize>(mut self, payload: &T) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_vec(&Body { data: payload })?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub(crate) fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}
