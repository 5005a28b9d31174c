//! Typed errors for API calls, with a stable retry-relevant classification.

use reqwest::StatusCode;
use serde::Deserialize;

/// Category of an API error response, derived purely from the HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request is invalid and will not succeed on retry (4xx other than 409/429).
    ClientError,
    /// The resource already exists (HTTP 409).
    Conflict,
    /// Server-signalled throttling (HTTP 429).
    TooManyRequests,
    /// The server failed to process the request (5xx).
    ServerError,
    /// Any status outside the recognised ranges (e.g. 3xx).
    Unknown,
}

/// Error response returned by an API endpoint.
///
/// Carries the status code, the raw response body, and whichever of the flat
/// error fields the server populated. Callers should branch on [`kind`], never
/// on message strings.
///
/// [`kind`]: ResponseError::kind
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseError {
    #[serde(skip)]
    pub status_code: u16,
    #[serde(skip)]
    pub raw_body: Vec<u8>,
    pub error_message: Option<String>,
    pub error_code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl ResponseError {
    /// Builds an error from a non-success response. The body is parsed
    /// leniently: a non-JSON body leaves the optional fields empty.
    pub(crate) fn from_body(status_code: u16, raw_body: Vec<u8>) -> Self {
        let mut err: ResponseError = serde_json::from_slice(&raw_body).unwrap_or_default();
        err.status_code = status_code;
        err.raw_body = raw_body;
        err
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status_code {
            409 => ErrorKind::Conflict,
            429 => ErrorKind::TooManyRequests,
            400..=499 => ErrorKind::ClientError,
            500..=599 => ErrorKind::ServerError,
            _ => ErrorKind::Unknown,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::ServerError | ErrorKind::TooManyRequests
        )
    }
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (code, message) = if let Some(error) = &self.error {
            (Some(error.clone()), self.error_description.clone())
        } else if let Some(error_code) = &self.error_code {
            (Some(error_code.clone()), self.error_message.clone())
        } else if self.status_code != 0 {
            let reason = StatusCode::from_u16(self.status_code)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string);
            (
                Some(format!("HTTP {}", self.status_code)),
                self.error_message.clone().or(reason),
            )
        } else {
            (None, None)
        };

        match (code, message) {
            (Some(code), Some(message)) => write!(f, "{code}: {message}"),
            (Some(code), None) => write!(f, "{code}"),
            _ => write!(f, "Unrecognised error"),
        }
    }
}

impl std::error::Error for ResponseError {}

/// Error returned by API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connection error, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// A successful response body could not be decoded into the expected envelope.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The API answered with a non-success status code.
    #[error(transparent)]
    Api(#[from] ResponseError),
    /// The call was cancelled before it completed.
    #[error("call cancelled")]
    Cancelled,
    /// The base URL or call path could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// The classified error response, if the failure was an HTTP error status.
    pub fn response(&self) -> Option<&ResponseError> {
        match self {
            ApiError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Transient failures worth retrying: transport errors (conservatively, all
    /// of them) and retryable HTTP statuses. Decode errors and cancellation are
    /// always terminal.
    pub(crate) fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Api(err) => err.is_retryable(),
            _ => false,
        }
    }
}
